//! Terminal implementations of the console capabilities.
//!
//! Input is read synchronously from stdin; the shell runs on a single-threaded
//! runtime and nothing else is in flight while it waits for the user.

use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::io::{self, BufRead, Write};
use std::time::Duration;
use tracing::debug;
use wc_console::{Navigator, Notice, NoticeLevel, Notifier, PromptRequest, Prompter, Timer};

/// Print `label` and read one trimmed line. `None` on EOF or read error.
pub fn read_line(label: &str) -> Option<String> {
    print!("{label}");
    let _ = io::stdout().flush();

    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_owned()),
    }
}

/// Like [`read_line`] but with echo disabled. Empty input reads as `None`.
pub fn read_secret(label: &str) -> Option<String> {
    rpassword::prompt_password(label)
        .ok()
        .filter(|secret| !secret.is_empty())
}

fn prompt_label(request: &PromptRequest) -> String {
    format!("{} (empty to cancel): ", request.message)
}

pub struct TerminalPrompter;

#[async_trait(?Send)]
impl Prompter for TerminalPrompter {
    async fn prompt(&self, request: &PromptRequest) -> Option<String> {
        println!("== {} ==", request.title);
        loop {
            let label = prompt_label(request);
            let input = if request.secret {
                read_secret(&label)?
            } else {
                read_line(&label).filter(|line| !line.is_empty())?
            };
            if request.rule.accepts(&input) {
                return Some(input);
            }
            println!("  {}", request.error_message);
        }
    }

    async fn confirm(&self, title: &str, message: &str) -> bool {
        println!("== {title} ==");
        matches!(
            read_line(&format!("{message} [y/N]: ")).as_deref().map(str::trim),
            Some("y" | "Y" | "yes")
        )
    }
}

pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: Notice) {
        let level = match notice.level {
            NoticeLevel::Success => "ok",
            NoticeLevel::Warning => "warn",
            NoticeLevel::Error => "error",
        };
        debug!("notice shown for {:?}", notice.duration);
        match notice.title {
            Some(title) => println!("[{level}] {title}: {}", notice.message),
            None => println!("[{level}] {}", notice.message),
        }
    }
}

/// Records navigation requests; the command loop acts on them after each command.
#[derive(Default)]
pub struct TerminalNavigator {
    reload: Cell<bool>,
    location: RefCell<Option<String>>,
}

impl TerminalNavigator {
    pub fn take_reload(&self) -> bool {
        self.reload.replace(false)
    }

    pub fn take_location(&self) -> Option<String> {
        self.location.borrow_mut().take()
    }
}

impl Navigator for TerminalNavigator {
    fn replace(&self, url: &str) {
        *self.location.borrow_mut() = Some(url.to_owned());
    }

    fn reload(&self) {
        self.reload.set(true);
    }
}

pub struct TokioTimer;

#[async_trait(?Send)]
impl Timer for TokioTimer {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_label_offers_cancel() {
        let request = PromptRequest::password("Create Account", "Account password");
        assert_eq!(prompt_label(&request), "Account password (empty to cancel): ");
    }

    #[test]
    fn navigator_hands_out_each_request_once() {
        let navigator = TerminalNavigator::default();
        navigator.reload();
        navigator.replace("http://console.test/");

        assert!(navigator.take_reload());
        assert!(!navigator.take_reload());
        assert_eq!(navigator.take_location().as_deref(), Some("http://console.test/"));
        assert_eq!(navigator.take_location(), None);
    }
}
