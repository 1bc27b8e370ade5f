//! View-model state.
//!
//! Each view-model owns its slices in `StateCell`s (single-threaded, like the
//! browser host). Handlers borrow briefly through `with`/`with_mut` and never
//! hold a borrow across an await point.

use std::cell::RefCell;
use std::fmt;
use wc_api_types::{AccountEntry, IdentityEntry, Network};
use zeroize::{Zeroize, Zeroizing};

use crate::error::ApiError;

#[derive(Debug, Default)]
pub struct StateCell<T>(RefCell<T>);

impl<T> StateCell<T> {
    pub fn new(value: T) -> Self {
        Self(RefCell::new(value))
    }

    /// Run a closure with shared read access to the state.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.0.borrow())
    }

    /// Run a closure with mutable access to the state.
    pub fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        f(&mut self.0.borrow_mut())
    }
}

impl<T: Clone> StateCell<T> {
    pub fn snapshot(&self) -> T {
        self.0.borrow().clone()
    }
}

/// What a handler did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// The user dismissed a prompt; nothing was sent.
    Cancelled,
    /// Nothing to do; nothing was sent.
    Skipped,
    Failed(ApiError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOption {
    pub value: String,
    pub label: String,
}

impl From<AccountEntry> for ListOption {
    fn from(entry: AccountEntry) -> Self {
        Self {
            value: entry.b58_address,
            label: entry.label,
        }
    }
}

impl From<IdentityEntry> for ListOption {
    fn from(entry: IdentityEntry) -> Self {
        Self {
            value: entry.ont_id,
            label: entry.label,
        }
    }
}

/// Ordered options plus a selection that is always one of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    options: Vec<ListOption>,
    selected: Option<String>,
}

impl Selection {
    pub fn options(&self) -> &[ListOption] {
        &self.options
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.options.iter().any(|option| option.value == value)
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Replace the options; a selection that disappeared from the list is dropped.
    pub fn replace_options(&mut self, options: Vec<ListOption>) {
        self.options = options;
        if let Some(selected) = &self.selected {
            if !self.contains(selected) {
                self.selected = None;
            }
        }
    }

    /// Select `value` if it is one of the options.
    pub fn select(&mut self, value: &str) -> bool {
        if self.contains(value) {
            self.selected = Some(value.to_owned());
            true
        } else {
            false
        }
    }

    /// Drop `value` from the options, clearing the selection if it pointed there.
    pub fn remove(&mut self, value: &str) {
        self.options.retain(|option| option.value != value);
        if self.selected.as_deref() == Some(value) {
            self.selected = None;
        }
    }

    /// Select the first option, or nothing when the list is empty.
    pub fn select_first(&mut self) {
        self.selected = self.options.first().map(|option| option.value.clone());
    }

    /// Select the first option only if nothing is selected yet.
    pub fn select_first_if_unset(&mut self) -> bool {
        if self.selected.is_none() && !self.options.is_empty() {
            self.select_first();
            true
        } else {
            false
        }
    }
}

/// A secret shown once in a dialog, then wiped.
#[derive(Default)]
pub struct RevealedSecret {
    value: Zeroizing<String>,
    visible: bool,
}

impl RevealedSecret {
    pub fn reveal(&mut self, value: String) {
        self.value = Zeroizing::new(value);
        self.visible = true;
    }

    pub fn clear(&mut self) {
        self.value.zeroize();
        self.visible = false;
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl fmt::Debug for RevealedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RevealedSecret")
            .field("value", &"<redacted>")
            .field("visible", &self.visible)
            .finish()
    }
}

#[derive(Debug, Default)]
pub struct AccountState {
    pub accounts: Selection,
    pub new_private_key: RevealedSecret,
}

#[derive(Debug, Default)]
pub struct IdentityState {
    pub identities: Selection,
    pub new_ont_id: String,
    pub new_private_key: RevealedSecret,
}

impl IdentityState {
    pub fn clear_new_identity(&mut self) {
        self.new_ont_id.zeroize();
        self.new_private_key.clear();
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetworkState {
    pub selected: Network,
}

impl NetworkState {
    pub fn options(&self) -> [Network; 3] {
        Network::ALL
    }
}
