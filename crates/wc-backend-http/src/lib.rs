use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use wc_api_types::HttpMethod;
use wc_console::{ApiError, RawResponse, Transport};

/// `reqwest`-backed transport for native hosts.
#[derive(Clone, Default)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<Value>,
    ) -> Result<RawResponse, ApiError> {
        let mut request = match method {
            HttpMethod::Get => self.http.get(url),
            HttpMethod::Post => self.http.post(url),
        };
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|err| ApiError::Transport(format!("{} {url}: {err}", method.as_str())))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| ApiError::Transport(format!("reading {url}: {err}")))?;
        debug!("{} {} -> {}", method.as_str(), url, status);

        Ok(RawResponse { status, body })
    }
}
