//! Wallet console WASM front-end.
//!
//! Binds the setting or login page, whichever the document contains, to its
//! view-model and wires browser capabilities into it.

pub mod api;
pub mod dom;
pub mod events;
pub mod host;
pub mod render;
pub mod state;

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wc_console::{Capabilities, LoginViewModel, ManagerClient, SettingViewModel};

/// WASM entry point, called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    init().await
}

fn capabilities() -> Capabilities {
    let config = api::page_config();
    gloo_console::log!(format!("console backend at {}", config.base_url));
    Capabilities {
        client: ManagerClient::new(Rc::new(api::FetchTransport), config),
        prompter: Rc::new(host::WindowPrompter),
        notifier: Rc::new(host::ToastNotifier),
        navigator: Rc::new(host::LocationNavigator),
        timer: Rc::new(host::GlooTimer),
    }
}

async fn init() -> Result<(), JsValue> {
    if dom::by_id("settingView").is_some() {
        let els = dom::SettingElements::bind()?;
        let vm = Rc::new(SettingViewModel::new(capabilities()));
        state::set_setting(vm.clone());
        events::bind_setting(&els);
        vm.on_load().await;
        render::setting(&els, &vm);
    } else if dom::by_id("loginView").is_some() {
        let els = dom::LoginElements::bind()?;
        let vm = Rc::new(LoginViewModel::new(capabilities()));
        state::set_login(vm.clone());
        events::bind_login(&els);
        vm.on_load().await;
        render::login(&els, &vm);
    } else {
        gloo_console::warn!("no #settingView or #loginView on this page");
    }
    Ok(())
}
