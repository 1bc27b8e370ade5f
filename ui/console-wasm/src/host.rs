//! Browser implementations of the console capabilities.

use async_trait::async_trait;
use gloo_timers::callback::Timeout;
use std::time::Duration;
use wc_console::{Navigator, Notice, NoticeLevel, Notifier, PromptRequest, Prompter, Timer};

use crate::dom;

/// `window.prompt` / `window.confirm`. Invalid input is reported and asked again.
pub struct WindowPrompter;

#[async_trait(?Send)]
impl Prompter for WindowPrompter {
    async fn prompt(&self, request: &PromptRequest) -> Option<String> {
        let window = dom::window().ok()?;
        let message = format!("{}\n\n{}", request.title, request.message);
        loop {
            let value = window.prompt_with_message(&message).ok().flatten()?;
            if request.rule.accepts(&value) {
                return Some(value);
            }
            let _ = window.alert_with_message(request.error_message);
        }
    }

    async fn confirm(&self, title: &str, message: &str) -> bool {
        dom::window()
            .and_then(|w| w.confirm_with_message(&format!("{title}\n\n{message}")))
            .unwrap_or(false)
    }
}

/// Stacks toasts in `#toastContainer` (or `<body>`) and removes them after their duration.
pub struct ToastNotifier;

impl ToastNotifier {
    fn show(notice: &Notice) -> Result<(), wasm_bindgen::JsValue> {
        let level = match notice.level {
            NoticeLevel::Success => "success",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };
        let toast = dom::create_element("div")?;
        dom::add_class(&toast, "toast");
        dom::add_class(&toast, &format!("toast-{level}"));
        let text = match notice.title {
            Some(title) => format!("{title}: {}", notice.message),
            None => notice.message.clone(),
        };
        dom::set_text(&toast, &text);

        let container = match dom::by_id("toastContainer") {
            Some(el) => el,
            None => dom::document()?
                .body()
                .ok_or_else(|| wasm_bindgen::JsValue::from_str("no body"))?
                .into(),
        };
        container.append_child(&toast)?;

        let millis = u32::try_from(notice.duration.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, move || toast.remove()).forget();
        Ok(())
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, notice: Notice) {
        if let Err(err) = Self::show(&notice) {
            gloo_console::error!(format!("toast failed: {err:?}"));
        }
    }
}

pub struct LocationNavigator;

impl Navigator for LocationNavigator {
    fn replace(&self, url: &str) {
        if let Ok(window) = dom::window() {
            let _ = window.location().replace(url);
        }
    }

    fn reload(&self) {
        if let Ok(window) = dom::window() {
            let _ = window.location().reload();
        }
    }
}

pub struct GlooTimer;

#[async_trait(?Send)]
impl Timer for GlooTimer {
    async fn sleep(&self, duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }
}
