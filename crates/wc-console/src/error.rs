use serde::de::DeserializeOwned;
use serde_json::Value;

/// Outcome of a failed backend call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("backend returned {status}: {message}")]
    Status {
        status: u16,
        message: String,
        body: String,
    },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build a status error, pulling the human-readable message out of the body.
    pub fn from_status(status: u16, body: String) -> Self {
        let message = extract_message(&body).unwrap_or_default();
        ApiError::Status {
            status,
            message,
            body,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message supplied by the backend, if any.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }

    /// Message to show the user, falling back to `fallback` when the backend sent none.
    pub fn display_message(&self, fallback: &str) -> String {
        self.backend_message().unwrap_or(fallback).to_owned()
    }

    /// Decode the error body of a status failure as `T`.
    pub fn decode_body<T: DeserializeOwned>(&self) -> Option<T> {
        match self {
            ApiError::Status { body, .. } => serde_json::from_str(body).ok(),
            _ => None,
        }
    }
}

fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["result", "msg", "error"].iter().find_map(|key| match value.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_prefers_result_field() {
        let err = ApiError::from_status(409, r#"{"result": "account exists"}"#.to_owned());
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.backend_message(), Some("account exists"));
    }

    #[test]
    fn status_error_falls_back_to_msg_and_error() {
        let err = ApiError::from_status(500, r#"{"msg": "account exists."}"#.to_owned());
        assert_eq!(err.backend_message(), Some("account exists."));

        let err = ApiError::from_status(400, r#"{"error": "bad input"}"#.to_owned());
        assert_eq!(err.backend_message(), Some("bad input"));
    }

    #[test]
    fn non_json_body_has_no_backend_message() {
        let err = ApiError::from_status(502, "<html>Bad Gateway</html>".to_owned());
        assert_eq!(err.backend_message(), None);
        assert_eq!(err.display_message("Failed"), "Failed");
    }

    #[test]
    fn transport_error_has_no_status() {
        let err = ApiError::Transport("connection refused".to_owned());
        assert_eq!(err.status(), None);
        assert_eq!(err.decode_body::<Value>(), None);
    }
}
