//! Host capabilities injected into the view-models.
//!
//! The browser and terminal front-ends each provide their own prompter,
//! notifier, navigator and timer; view-models only see these traits.

use async_trait::async_trait;
use std::rc::Rc;
use std::time::Duration;
use tracing::warn;

use crate::client::ManagerClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRule {
    Any,
    NonBlank,
    /// Exactly `len` hexadecimal characters.
    Hex { len: usize },
}

impl InputRule {
    pub fn accepts(&self, input: &str) -> bool {
        match self {
            InputRule::Any => true,
            InputRule::NonBlank => !input.trim().is_empty(),
            InputRule::Hex { len } => {
                input.len() == *len && input.chars().all(|c| c.is_ascii_hexdigit())
            }
        }
    }
}

/// A blocking modal prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptRequest {
    pub title: &'static str,
    pub message: &'static str,
    pub rule: InputRule,
    pub error_message: &'static str,
    pub secret: bool,
}

impl PromptRequest {
    pub const fn text(
        title: &'static str,
        message: &'static str,
        rule: InputRule,
        error_message: &'static str,
    ) -> Self {
        Self {
            title,
            message,
            rule,
            error_message,
            secret: false,
        }
    }

    pub const fn password(title: &'static str, message: &'static str) -> Self {
        Self {
            title,
            message,
            rule: InputRule::NonBlank,
            error_message: "invalid password",
            secret: true,
        }
    }
}

#[async_trait(?Send)]
pub trait Prompter {
    /// Ask for a value. Implementations re-ask until `request.rule` accepts the input;
    /// `None` means the user cancelled.
    async fn prompt(&self, request: &PromptRequest) -> Option<String>;

    async fn confirm(&self, title: &str, message: &str) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

// Notice durations in milliseconds.
pub const BRIEF_MS: u64 = 800;
pub const SHORT_MS: u64 = 1200;
pub const NORMAL_MS: u64 = 2000;
pub const LONG_MS: u64 = 2400;
pub const LOGIN_MS: u64 = 3000;

/// Transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: Option<&'static str>,
    pub message: String,
    pub duration: Duration,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            level,
            title: None,
            message: message.into(),
            duration: Duration::from_millis(duration_ms),
        }
    }

    pub fn success(message: impl Into<String>, duration_ms: u64) -> Self {
        Self::new(NoticeLevel::Success, message, duration_ms)
    }

    pub fn warning(message: impl Into<String>, duration_ms: u64) -> Self {
        Self::new(NoticeLevel::Warning, message, duration_ms)
    }

    pub fn error(message: impl Into<String>, duration_ms: u64) -> Self {
        Self::new(NoticeLevel::Error, message, duration_ms)
    }

    pub fn titled(mut self, title: &'static str) -> Self {
        self.title = Some(title);
        self
    }
}

pub trait Notifier {
    fn notify(&self, notice: Notice);
}

pub trait Navigator {
    /// Replace the current location with `url`.
    fn replace(&self, url: &str);
    fn reload(&self);
}

#[async_trait(?Send)]
pub trait Timer {
    async fn sleep(&self, duration: Duration);
}

/// Everything a handler may touch besides its own state.
#[derive(Clone)]
pub struct Capabilities {
    pub client: ManagerClient,
    pub prompter: Rc<dyn Prompter>,
    pub notifier: Rc<dyn Notifier>,
    pub navigator: Rc<dyn Navigator>,
    pub timer: Rc<dyn Timer>,
}

impl Capabilities {
    /// Prompt and return input that satisfies the request's rule.
    pub async fn ask(&self, request: &PromptRequest) -> Option<String> {
        let value = self.prompter.prompt(request).await?;
        if request.rule.accepts(&value) {
            Some(value)
        } else {
            warn!("prompt '{}' returned input that fails its rule", request.message);
            None
        }
    }

    pub fn notify(&self, notice: Notice) {
        self.notifier.notify(notice);
    }
}
