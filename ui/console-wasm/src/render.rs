//! Copies view-model state into the DOM after every handler.

use wc_console::state::{IdentityState, NetworkState};
use wc_console::{LoginViewModel, ListOption, SettingViewModel};

use crate::dom::{self, IdentityElements, LoginElements, NetworkElements, SettingElements};

fn network(els: &NetworkElements, state: &NetworkState) {
    let options: Vec<ListOption> = state
        .options()
        .iter()
        .map(|network| ListOption {
            value: network.as_str().to_owned(),
            label: network.label().to_owned(),
        })
        .collect();
    dom::fill_select(&els.select, &options, Some(state.selected.as_str()));
}

fn identities(els: &IdentityElements, state: &IdentityState) {
    dom::fill_select(&els.select, state.identities.options(), state.identities.selected());

    let visible = state.new_private_key.is_visible();
    dom::toggle_class(&els.key_dialog, "hidden", !visible);
    if visible {
        dom::set_text(&els.new_ont_id, &state.new_ont_id);
        dom::set_text(&els.new_private_key, state.new_private_key.value());
    } else {
        dom::set_text(&els.new_ont_id, "");
        dom::set_text(&els.new_private_key, "");
    }
}

pub fn setting(els: &SettingElements, vm: &SettingViewModel) {
    dom::set_text(&els.contract_address, &vm.contract_address.snapshot());

    vm.accounts.with(|s| {
        dom::fill_select(&els.account_select, s.accounts.options(), s.accounts.selected());
        let visible = s.new_private_key.is_visible();
        dom::toggle_class(&els.account_key_dialog, "hidden", !visible);
        dom::set_text(&els.new_account_key, if visible { s.new_private_key.value() } else { "" });
    });

    vm.identities.with(|s| identities(&els.identities, s));
    network(&els.network, &vm.network.snapshot());
}

pub fn login(els: &LoginElements, vm: &LoginViewModel) {
    vm.form.with(|f| {
        dom::toggle_class(&els.dialog, "hidden", !f.dialog_visible);
        if els.password.value() != f.identity_password.as_str() {
            els.password.set_value(&f.identity_password);
        }
    });
    vm.identities.with(|s| identities(&els.identities, s));
    network(&els.network, &vm.network.snapshot());
}
