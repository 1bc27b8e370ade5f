//! Setting view-model: contract address, accounts, identities and network.

use tracing::{debug, info, warn};
use wc_api_types::{
    AccountChangeRequest, CreateKeyRequest, ImportKeyRequest, Network, RemoveAccountRequest,
};

use crate::capabilities::{BRIEF_MS, Capabilities, LONG_MS, NORMAL_MS, Notice, SHORT_MS};
use crate::identity;
use crate::network;
use crate::prompts;
use crate::state::{AccountState, IdentityState, ListOption, NetworkState, Outcome, StateCell};

pub struct SettingViewModel {
    caps: Capabilities,
    pub network: StateCell<NetworkState>,
    pub accounts: StateCell<AccountState>,
    pub identities: StateCell<IdentityState>,
    pub contract_address: StateCell<String>,
}

impl SettingViewModel {
    pub fn new(caps: Capabilities) -> Self {
        Self {
            caps,
            network: StateCell::default(),
            accounts: StateCell::default(),
            identities: StateCell::default(),
            contract_address: StateCell::default(),
        }
    }

    /// Initial page load: contract address, lists and default selections.
    pub async fn on_load(&self) {
        self.load_contract_address().await;
        self.load_accounts().await;
        self.load_default_account().await;
        self.select_first_account();
        self.load_identities().await;
        self.select_first_identity();
    }

    // ── Contract ──

    pub async fn load_contract_address(&self) -> Outcome {
        match self.caps.client.get_contract_address().await {
            Ok(address) => {
                self.contract_address.with_mut(|s| *s = address);
                Outcome::Done
            }
            Err(err) => {
                warn!("failed to load contract address: {}", err);
                Outcome::Failed(err)
            }
        }
    }

    pub async fn change_contract(&self) -> Outcome {
        let Some(contract_address) = self.caps.ask(&prompts::CHANGE_CONTRACT).await else {
            self.caps.notify(Notice::warning("Change contract canceled", NORMAL_MS));
            return Outcome::Cancelled;
        };

        match self.caps.client.set_contract_address(&contract_address).await {
            Ok(()) => {
                info!("contract address set to {}", contract_address);
                self.caps
                    .notify(Notice::success("change contract address successful!", NORMAL_MS));
                self.load_contract_address().await;
                Outcome::Done
            }
            Err(err) => {
                warn!("set contract address failed: {}", err);
                self.caps
                    .notify(Notice::error(err.display_message("Change contract failed"), LONG_MS));
                Outcome::Failed(err)
            }
        }
    }

    // ── Accounts ──

    pub async fn load_accounts(&self) -> Outcome {
        match self.caps.client.get_accounts().await {
            Ok(accounts) => {
                let options: Vec<ListOption> = accounts.into_iter().map(ListOption::from).collect();
                debug!("loaded {} accounts", options.len());
                self.accounts.with_mut(|s| s.accounts.replace_options(options));
                Outcome::Done
            }
            Err(err) => {
                warn!("failed to load accounts: {}", err);
                Outcome::Failed(err)
            }
        }
    }

    pub fn select_first_account(&self) -> bool {
        self.accounts.with_mut(|s| s.accounts.select_first_if_unset())
    }

    /// Select the backend's default account when it is unlocked.
    pub async fn load_default_account(&self) -> Outcome {
        match self.caps.client.is_default_account_unlocked().await {
            Ok(true) => {}
            Ok(false) => return Outcome::Skipped,
            Err(err) => {
                warn!("failed to query default account lock state: {}", err);
                return Outcome::Failed(err);
            }
        }

        match self.caps.client.get_default_account().await {
            Ok(address) => {
                if self.accounts.with_mut(|s| s.accounts.select(&address)) {
                    Outcome::Done
                } else {
                    debug!("default account {} is not in the account list", address);
                    Outcome::Skipped
                }
            }
            Err(err) => {
                warn!("failed to load default account: {}", err);
                Outcome::Failed(err)
            }
        }
    }

    pub async fn import_account(&self) -> Outcome {
        let Some(hex_private_key) = self.caps.ask(&prompts::IMPORT_ACCOUNT_KEY).await else {
            return self.cancelled("Import canceled", NORMAL_MS);
        };
        let Some(label) = self.caps.ask(&prompts::IMPORT_ACCOUNT_LABEL).await else {
            return self.cancelled("Import canceled", NORMAL_MS);
        };
        let Some(password) = self.caps.ask(&prompts::IMPORT_ACCOUNT_PASSWORD).await else {
            return self.cancelled("Import canceled", NORMAL_MS);
        };

        let request = ImportKeyRequest {
            hex_private_key,
            label,
            password,
        };
        match self.caps.client.import_account(&request).await {
            Ok(()) => {
                info!("imported account labelled {}", request.label);
                self.load_accounts().await;
                self.select_first_account();
                self.caps.notify(Notice::success("Import successful", SHORT_MS));
                Outcome::Done
            }
            Err(err) => {
                warn!("import account failed: {}", err);
                let message = match err.status() {
                    Some(409) => err.display_message("Account already exists"),
                    _ => err.display_message("Import failed"),
                };
                self.caps.notify(Notice::error(message, LONG_MS));
                Outcome::Failed(err)
            }
        }
    }

    pub async fn create_account(&self) -> Outcome {
        let Some(label) = self.caps.ask(&prompts::CREATE_ACCOUNT_LABEL).await else {
            return self.cancelled("create account canceled", NORMAL_MS);
        };
        let Some(password) = self.caps.ask(&prompts::CREATE_ACCOUNT_PASSWORD).await else {
            return self.cancelled("create account canceled", NORMAL_MS);
        };

        match self.caps.client.create_account(&CreateKeyRequest { label, password }).await {
            Ok(created) => {
                info!("created account");
                self.accounts.with_mut(|s| s.new_private_key.reveal(created.hex_private_key));
                self.load_accounts().await;
                self.select_first_account();
                self.caps.notify(Notice::success("Create account successful", SHORT_MS));
                Outcome::Done
            }
            Err(err) => {
                warn!("create account failed: {}", err);
                self.caps
                    .notify(Notice::error(err.display_message("Create account failed"), LONG_MS));
                Outcome::Failed(err)
            }
        }
    }

    /// Remove the selected account, then fall back to the first remaining one.
    pub async fn remove_account(&self) -> Outcome {
        let Some(b58_address_remove) =
            self.accounts.with(|s| s.accounts.selected().map(str::to_owned))
        else {
            self.caps.notify(Notice::warning("No account selected", BRIEF_MS));
            return Outcome::Skipped;
        };
        let Some(password) = self.caps.ask(&prompts::REMOVE_ACCOUNT_PASSWORD).await else {
            return self.cancelled("remove account canceled", BRIEF_MS);
        };

        let request = RemoveAccountRequest {
            password,
            b58_address_remove,
        };
        match self.caps.client.remove_account(&request).await {
            Ok(response) => {
                info!("removed account {}", request.b58_address_remove);
                self.caps.notify(Notice::success(response.result, LONG_MS));
                if let Outcome::Failed(err) = self.load_accounts().await {
                    self.accounts
                        .with_mut(|s| s.accounts.remove(&request.b58_address_remove));
                    let message = err.display_message("Failed to refresh accounts");
                    self.caps.notify(Notice::error(message, LONG_MS));
                }
                self.accounts.with_mut(|s| s.accounts.select_first());
                Outcome::Done
            }
            Err(err) => {
                warn!("remove account failed: {}", err);
                self.caps
                    .notify(Notice::error(err.display_message("Remove account failed"), LONG_MS));
                Outcome::Failed(err)
            }
        }
    }

    /// Make `address` the backend's default account. Re-selecting the current account is a no-op.
    pub async fn change_account(&self, address: &str) -> Outcome {
        if self.accounts.with(|s| s.accounts.selected() == Some(address)) {
            return Outcome::Skipped;
        }
        let Some(password) = self.caps.ask(&prompts::CHANGE_ACCOUNT_PASSWORD).await else {
            return self.cancelled("change account canceled", BRIEF_MS);
        };

        let request = AccountChangeRequest {
            b58_address_selected: address.to_owned(),
            password,
        };
        match self.caps.client.account_change(&request).await {
            Ok(response) => {
                info!("default account changed to {}", address);
                self.accounts.with_mut(|s| s.accounts.select(address));
                self.caps.notify(Notice::success(response.result, SHORT_MS));
                Outcome::Done
            }
            Err(err) => {
                warn!("account change failed: {}", err);
                self.caps
                    .notify(Notice::error(err.display_message("Change account failed"), LONG_MS));
                Outcome::Failed(err)
            }
        }
    }

    pub fn clear_new_account_private_key(&self) {
        self.accounts.with_mut(|s| s.new_private_key.clear());
    }

    // ── Identities ──

    pub async fn load_identities(&self) -> Outcome {
        identity::load_identities(&self.caps, &self.identities).await
    }

    pub fn select_first_identity(&self) -> bool {
        identity::select_first_identity(&self.identities)
    }

    pub fn select_login_identity(&self, ont_id: &str) -> bool {
        identity::select_login_identity(&self.identities, ont_id)
    }

    pub async fn create_identity(&self) -> Outcome {
        identity::create_identity(&self.caps, &self.identities).await
    }

    pub async fn import_identity(&self) -> Outcome {
        identity::import_identity(&self.caps, &self.identities).await
    }

    pub async fn remove_identity(&self) -> Outcome {
        identity::remove_identity(&self.caps, &self.identities).await
    }

    pub async fn change_identity(&self, ont_id: &str) -> Outcome {
        identity::change_identity(&self.caps, &self.identities, ont_id).await
    }

    pub fn clear_new_identity_private_key(&self) {
        identity::clear_new_identity_private_key(&self.identities);
    }

    // ── Network ──

    pub async fn change_network(&self, network: Network) -> Outcome {
        network::change_network(&self.caps, &self.network, network).await
    }

    pub async fn change_network_by_name(&self, value: &str) -> Outcome {
        network::change_network_by_name(&self.caps, &self.network, value).await
    }

    fn cancelled(&self, message: &str, duration_ms: u64) -> Outcome {
        self.caps.notify(Notice::warning(message, duration_ms));
        Outcome::Cancelled
    }
}
