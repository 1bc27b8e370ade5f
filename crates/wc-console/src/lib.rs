//! Wallet console view-models.
//!
//! Host-independent logic for the setting and login dialogs. Front-ends
//! supply a [`Transport`] and the prompt, notification, navigation and timer
//! capabilities; the view-models own their state and drive the backend.

pub mod capabilities;
pub mod client;
pub mod config;
pub mod error;
pub mod identity;
pub mod login;
pub mod network;
pub mod prompts;
pub mod setting;
pub mod state;

#[cfg(test)]
mod testing;

pub use capabilities::{
    Capabilities, InputRule, Navigator, Notice, NoticeLevel, Notifier, PromptRequest, Prompter,
    Timer,
};
pub use client::{ManagerClient, RawResponse, Transport};
pub use config::{ConsoleConfig, RouteTable};
pub use error::ApiError;
pub use login::LoginViewModel;
pub use setting::SettingViewModel;
pub use state::{ListOption, Outcome, Selection};
pub use wc_api_types::Network;
