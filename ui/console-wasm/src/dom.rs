//! DOM element bindings.
//!
//! Each page view binds its elements once at startup. The identity and network
//! panels appear on both the setting and login pages.

use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlElement, HtmlInputElement, HtmlOptionElement, HtmlSelectElement, Window,
};
use wc_console::ListOption;

// ── Helpers ──

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

pub fn by_id(id: &str) -> Option<Element> {
    document().ok()?.get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn get_select_value(el: &HtmlSelectElement) -> String {
    el.value()
}

pub fn add_class(el: &Element, cls: &str) {
    let _ = el.class_list().add_1(cls);
}

pub fn toggle_class(el: &Element, cls: &str, force: bool) {
    let _ = el.class_list().toggle_with_force(cls, force);
}

pub fn create_element(tag: &str) -> Result<Element, JsValue> {
    document()?.create_element(tag)
}

pub fn create_option(
    value: &str,
    text: &str,
    selected: bool,
) -> Result<HtmlOptionElement, JsValue> {
    let opt: HtmlOptionElement = create_element("option")?.dyn_into()?;
    opt.set_value(value);
    opt.set_text_content(Some(text));
    opt.set_selected(selected);
    Ok(opt)
}

/// Rebuild a `<select>` from view-model options.
pub fn fill_select(sel: &HtmlSelectElement, options: &[ListOption], selected: Option<&str>) {
    sel.set_inner_html("");
    for option in options {
        let is_selected = selected == Some(option.value.as_str());
        let text = format!("{} ({})", option.label, option.value);
        if let Ok(opt) = create_option(&option.value, &text, is_selected) {
            let _ = sel.append_child(&opt);
        }
    }
}

macro_rules! get_el {
    ($id:expr) => {
        by_id($id).ok_or_else(|| JsValue::from_str(&format!("missing element #{}", $id)))?
    };
}

macro_rules! get_input {
    ($id:expr) => {
        by_id_typed::<HtmlInputElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing input #{}", $id)))?
    };
}

macro_rules! get_select {
    ($id:expr) => {
        by_id_typed::<HtmlSelectElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing select #{}", $id)))?
    };
}

macro_rules! get_html {
    ($id:expr) => {
        by_id_typed::<HtmlElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing html element #{}", $id)))?
    };
}

// ── Shared panels ──

#[derive(Clone)]
pub struct IdentityElements {
    pub select: HtmlSelectElement,
    pub create_btn: HtmlElement,
    /// Only present on the setting page.
    pub import_btn: Option<HtmlElement>,
    pub remove_btn: Option<HtmlElement>,
    pub key_dialog: Element,
    pub new_ont_id: Element,
    pub new_private_key: Element,
    pub close_key_btn: HtmlElement,
}

impl IdentityElements {
    fn bind() -> Result<Self, JsValue> {
        Ok(Self {
            select: get_select!("identitySelect"),
            create_btn: get_html!("createIdentityBtn"),
            import_btn: by_id_typed("importIdentityBtn"),
            remove_btn: by_id_typed("removeIdentityBtn"),
            key_dialog: get_el!("identityKeyDialog"),
            new_ont_id: get_el!("newIdentityOntId"),
            new_private_key: get_el!("newIdentityKey"),
            close_key_btn: get_html!("closeIdentityKeyBtn"),
        })
    }
}

#[derive(Clone)]
pub struct NetworkElements {
    pub select: HtmlSelectElement,
}

impl NetworkElements {
    fn bind() -> Result<Self, JsValue> {
        Ok(Self {
            select: get_select!("networkSelect"),
        })
    }
}

// ── Page views ──

#[derive(Clone)]
pub struct SettingElements {
    pub contract_address: Element,
    pub change_contract_btn: HtmlElement,

    pub account_select: HtmlSelectElement,
    pub import_account_btn: HtmlElement,
    pub create_account_btn: HtmlElement,
    pub remove_account_btn: HtmlElement,
    pub account_key_dialog: Element,
    pub new_account_key: Element,
    pub close_account_key_btn: HtmlElement,

    pub identities: IdentityElements,
    pub network: NetworkElements,
}

impl SettingElements {
    pub fn bind() -> Result<Self, JsValue> {
        Ok(Self {
            contract_address: get_el!("contractAddress"),
            change_contract_btn: get_html!("changeContractBtn"),

            account_select: get_select!("accountSelect"),
            import_account_btn: get_html!("importAccountBtn"),
            create_account_btn: get_html!("createAccountBtn"),
            remove_account_btn: get_html!("removeAccountBtn"),
            account_key_dialog: get_el!("accountKeyDialog"),
            new_account_key: get_el!("newAccountKey"),
            close_account_key_btn: get_html!("closeAccountKeyBtn"),

            identities: IdentityElements::bind()?,
            network: NetworkElements::bind()?,
        })
    }
}

#[derive(Clone)]
pub struct LoginElements {
    pub dialog: Element,
    pub password: HtmlInputElement,
    pub login_btn: HtmlElement,
    pub close_btn: HtmlElement,

    pub identities: IdentityElements,
    pub network: NetworkElements,
}

impl LoginElements {
    pub fn bind() -> Result<Self, JsValue> {
        Ok(Self {
            dialog: get_el!("loginDialog"),
            password: get_input!("identityPassword"),
            login_btn: get_html!("loginBtn"),
            close_btn: get_html!("closeLoginBtn"),

            identities: IdentityElements::bind()?,
            network: NetworkElements::bind()?,
        })
    }
}
