//! Event binding.
//!
//! Every listener runs one view-model handler and re-renders the page from the
//! resulting state. Async handlers are spawned via `wasm_bindgen_futures::spawn_local`.

use std::future::Future;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wc_console::{LoginViewModel, SettingViewModel};
use web_sys::{EventTarget, HtmlSelectElement};

use crate::dom::{self, IdentityElements, LoginElements, NetworkElements, SettingElements};
use crate::render;
use crate::state;

/// Attach `action` to `event` on `target`; when it settles, `render` redraws `els`.
fn listen<V, E, F, Fut>(
    target: &EventTarget,
    event: &str,
    els: &E,
    view_model: fn() -> Option<Rc<V>>,
    render: fn(&E, &V),
    action: F,
) where
    V: 'static,
    E: Clone + 'static,
    F: Fn(Rc<V>) -> Fut + 'static,
    Fut: Future + 'static,
{
    let els = els.clone();
    let cb = Closure::wrap(Box::new(move |_: web_sys::Event| {
        let Some(vm) = view_model() else {
            return;
        };
        let pending = action(vm.clone());
        let els = els.clone();
        wasm_bindgen_futures::spawn_local(async move {
            pending.await;
            render(&els, &vm);
        });
    }) as Box<dyn FnMut(_)>);
    if let Err(err) = target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref()) {
        gloo_console::error!(format!("failed to bind {event}: {err:?}"));
    }
    cb.forget();
}

fn selected(select: &HtmlSelectElement) -> impl Fn() -> String + 'static {
    let select = select.clone();
    move || dom::get_select_value(&select)
}

// ── Setting page ──

fn on_setting<F, Fut>(target: &EventTarget, event: &str, els: &SettingElements, action: F)
where
    F: Fn(Rc<SettingViewModel>) -> Fut + 'static,
    Fut: Future + 'static,
{
    listen(target, event, els, state::setting, render::setting, action);
}

pub fn bind_setting(els: &SettingElements) {
    on_setting(&els.change_contract_btn, "click", els, |vm| async move {
        vm.change_contract().await;
    });

    // ── Accounts ──
    on_setting(&els.import_account_btn, "click", els, |vm| async move {
        vm.import_account().await;
    });
    on_setting(&els.create_account_btn, "click", els, |vm| async move {
        vm.create_account().await;
    });
    on_setting(&els.remove_account_btn, "click", els, |vm| async move {
        vm.remove_account().await;
    });
    let account = selected(&els.account_select);
    on_setting(&els.account_select, "change", els, move |vm| {
        let address = account();
        async move {
            vm.change_account(&address).await;
        }
    });
    on_setting(&els.close_account_key_btn, "click", els, |vm| async move {
        vm.clear_new_account_private_key();
    });

    // ── Identities ──
    bind_identity_panel(
        &els.identities,
        els,
        state::setting,
        render::setting,
        IdentityActions::<SettingViewModel> {
            create: |vm| Box::pin(async move { vm.create_identity().await; }),
            import: Some(|vm| Box::pin(async move { vm.import_identity().await; })),
            remove: Some(|vm| Box::pin(async move { vm.remove_identity().await; })),
            select: |vm, ont_id| Box::pin(async move { vm.change_identity(&ont_id).await; }),
            clear: |vm| vm.clear_new_identity_private_key(),
        },
    );

    // ── Network ──
    bind_network(&els.network, els, state::setting, render::setting, |vm, name| {
        Box::pin(async move {
            vm.change_network_by_name(&name).await;
        })
    });
}

// ── Login page ──

fn on_login<F, Fut>(target: &EventTarget, event: &str, els: &LoginElements, action: F)
where
    F: Fn(Rc<LoginViewModel>) -> Fut + 'static,
    Fut: Future + 'static,
{
    listen(target, event, els, state::login, render::login, action);
}

pub fn bind_login(els: &LoginElements) {
    let password = els.password.clone();
    on_login(&els.password, "input", els, move |vm| {
        vm.set_password(&password.value());
        async {}
    });
    on_login(&els.login_btn, "click", els, |vm| async move {
        vm.login().await;
    });
    on_login(&els.close_btn, "click", els, |vm| async move {
        vm.close_dialog().await;
    });

    bind_identity_panel(
        &els.identities,
        els,
        state::login,
        render::login,
        IdentityActions::<LoginViewModel> {
            create: |vm| Box::pin(async move { vm.create_identity().await; }),
            import: None,
            remove: None,
            select: |vm, ont_id| Box::pin(async move { vm.select_login_identity(&ont_id); }),
            clear: |vm| vm.clear_new_identity_private_key(),
        },
    );

    bind_network(&els.network, els, state::login, render::login, |vm, name| {
        Box::pin(async move {
            vm.change_network_by_name(&name).await;
        })
    });
}

// ── Shared panels ──

type Pending = std::pin::Pin<Box<dyn Future<Output = ()>>>;

struct IdentityActions<V> {
    create: fn(Rc<V>) -> Pending,
    /// Setting page only.
    import: Option<fn(Rc<V>) -> Pending>,
    remove: Option<fn(Rc<V>) -> Pending>,
    select: fn(Rc<V>, String) -> Pending,
    clear: fn(&V),
}

fn bind_identity_panel<V, E>(
    panel: &IdentityElements,
    els: &E,
    view_model: fn() -> Option<Rc<V>>,
    render: fn(&E, &V),
    actions: IdentityActions<V>,
) where
    V: 'static,
    E: Clone + 'static,
{
    listen(&panel.create_btn, "click", els, view_model, render, actions.create);
    if let (Some(btn), Some(import)) = (&panel.import_btn, actions.import) {
        listen(btn, "click", els, view_model, render, import);
    }
    if let (Some(btn), Some(remove)) = (&panel.remove_btn, actions.remove) {
        listen(btn, "click", els, view_model, render, remove);
    }

    let ont_id = selected(&panel.select);
    let select = actions.select;
    listen(&panel.select, "change", els, view_model, render, move |vm| select(vm, ont_id()));

    let clear = actions.clear;
    listen(&panel.close_key_btn, "click", els, view_model, render, move |vm| {
        clear(&vm);
        async {}
    });
}

fn bind_network<V, E>(
    panel: &NetworkElements,
    els: &E,
    view_model: fn() -> Option<Rc<V>>,
    render: fn(&E, &V),
    change: fn(Rc<V>, String) -> Pending,
) where
    V: 'static,
    E: Clone + 'static,
{
    let name = selected(&panel.select);
    listen(&panel.select, "change", els, view_model, render, move |vm| change(vm, name()));
}
