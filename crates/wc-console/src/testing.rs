//! In-crate fakes for handler tests.

use async_trait::async_trait;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;
use wc_api_types::{Endpoint, HttpMethod};

use crate::capabilities::{
    Capabilities, Navigator, Notice, Notifier, PromptRequest, Prompter, Timer,
};
use crate::client::{ManagerClient, RawResponse, Transport};
use crate::config::ConsoleConfig;
use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<Value>,
}

#[derive(Default)]
struct Script {
    pending: VecDeque<RawResponse>,
    last: Option<RawResponse>,
}

/// Serves scripted responses per endpoint in order; once exhausted, the last one repeats.
#[derive(Default)]
pub struct RecordingTransport {
    responses: RefCell<HashMap<&'static str, Script>>,
    calls: RefCell<Vec<RecordedCall>>,
}

impl RecordingTransport {
    pub fn respond(&self, endpoint: Endpoint, status: u16, body: &str) {
        self.responses
            .borrow_mut()
            .entry(endpoint.name())
            .or_default()
            .pending
            .push_back(RawResponse {
                status,
                body: body.to_owned(),
            });
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    pub fn calls_to(&self, endpoint: Endpoint) -> usize {
        let suffix = format!("/{}", endpoint.name());
        self.calls.borrow().iter().filter(|call| call.url.ends_with(&suffix)).count()
    }

    pub fn last_body(&self, endpoint: Endpoint) -> Option<Value> {
        let suffix = format!("/{}", endpoint.name());
        self.calls
            .borrow()
            .iter()
            .rev()
            .find(|call| call.url.ends_with(&suffix))
            .and_then(|call| call.body.clone())
    }
}

#[async_trait(?Send)]
impl Transport for RecordingTransport {
    async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<Value>,
    ) -> Result<RawResponse, ApiError> {
        self.calls.borrow_mut().push(RecordedCall {
            method,
            url: url.to_owned(),
            body,
        });

        let name = url.rsplit('/').next().unwrap_or_default();
        let mut responses = self.responses.borrow_mut();
        let script = responses.get_mut(name);
        let response = script.and_then(|script| {
            if let Some(next) = script.pending.pop_front() {
                script.last = Some(next);
            }
            script.last.clone()
        });
        response.ok_or_else(|| ApiError::Transport(format!("no scripted response for {url}")))
    }
}

/// Answers prompts from a script; an exhausted script cancels.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<Option<String>>>,
    confirmations: RefCell<VecDeque<bool>>,
    asked: RefCell<Vec<PromptRequest>>,
}

impl ScriptedPrompter {
    pub fn answer(&self, value: &str) {
        self.answers.borrow_mut().push_back(Some(value.to_owned()));
    }

    pub fn cancel(&self) {
        self.answers.borrow_mut().push_back(None);
    }

    pub fn confirm_with(&self, answer: bool) {
        self.confirmations.borrow_mut().push_back(answer);
    }

    pub fn asked(&self) -> Vec<PromptRequest> {
        self.asked.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Prompter for ScriptedPrompter {
    async fn prompt(&self, request: &PromptRequest) -> Option<String> {
        self.asked.borrow_mut().push(*request);
        self.answers.borrow_mut().pop_front().flatten()
    }

    async fn confirm(&self, _title: &str, _message: &str) -> bool {
        self.confirmations.borrow_mut().pop_front().unwrap_or(false)
    }
}

#[derive(Default)]
pub struct CollectingNotifier {
    notices: RefCell<Vec<Notice>>,
}

impl CollectingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Replace(String),
    Reload,
}

#[derive(Default)]
pub struct RecordingNavigator {
    visits: RefCell<Vec<Navigation>>,
}

impl RecordingNavigator {
    pub fn visits(&self) -> Vec<Navigation> {
        self.visits.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn replace(&self, url: &str) {
        self.visits.borrow_mut().push(Navigation::Replace(url.to_owned()));
    }

    fn reload(&self) {
        self.visits.borrow_mut().push(Navigation::Reload);
    }
}

#[derive(Default)]
pub struct InstantTimer {
    slept: RefCell<Vec<Duration>>,
}

impl InstantTimer {
    pub fn slept(&self) -> Vec<Duration> {
        self.slept.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Timer for InstantTimer {
    async fn sleep(&self, duration: Duration) {
        self.slept.borrow_mut().push(duration);
    }
}

pub struct Harness {
    pub transport: Rc<RecordingTransport>,
    pub prompter: Rc<ScriptedPrompter>,
    pub notifier: Rc<CollectingNotifier>,
    pub navigator: Rc<RecordingNavigator>,
    pub timer: Rc<InstantTimer>,
    pub caps: Capabilities,
}

impl Harness {
    pub fn new() -> Self {
        let transport = Rc::new(RecordingTransport::default());
        let prompter = Rc::new(ScriptedPrompter::default());
        let notifier = Rc::new(CollectingNotifier::default());
        let navigator = Rc::new(RecordingNavigator::default());
        let timer = Rc::new(InstantTimer::default());
        let config = ConsoleConfig::default().with_base_url("http://console.test");
        let caps = Capabilities {
            client: ManagerClient::new(transport.clone(), config),
            prompter: prompter.clone(),
            notifier: notifier.clone(),
            navigator: navigator.clone(),
            timer: timer.clone(),
        };
        Self {
            transport,
            prompter,
            notifier,
            navigator,
            timer,
            caps,
        }
    }
}
