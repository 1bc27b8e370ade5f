//! Page-level state.
//!
//! Holds the active view-model in a `thread_local!` (WASM is single-threaded).
//! View-model state itself lives inside the view-models.

use std::cell::RefCell;
use std::rc::Rc;
use wc_console::{LoginViewModel, SettingViewModel};

#[derive(Clone, Default)]
pub struct AppState {
    pub setting: Option<Rc<SettingViewModel>>,
    pub login: Option<Rc<LoginViewModel>>,
}

thread_local! {
    static STATE: RefCell<AppState> = RefCell::new(AppState::default());
}

/// Run a closure with shared read access to the state.
pub fn with<F, R>(f: F) -> R
where
    F: FnOnce(&AppState) -> R,
{
    STATE.with(|s| f(&s.borrow()))
}

/// Run a closure with mutable access to the state.
pub fn with_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut AppState) -> R,
{
    STATE.with(|s| f(&mut s.borrow_mut()))
}

pub fn setting() -> Option<Rc<SettingViewModel>> {
    with(|s| s.setting.clone())
}

pub fn set_setting(vm: Rc<SettingViewModel>) {
    with_mut(|s| s.setting = Some(vm));
}

pub fn login() -> Option<Rc<LoginViewModel>> {
    with(|s| s.login.clone())
}

pub fn set_login(vm: Rc<LoginViewModel>) {
    with_mut(|s| s.login = Some(vm));
}
