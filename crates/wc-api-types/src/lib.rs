use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Network {
    MainNet,
    #[default]
    TestNet,
    Localhost,
}

impl Network {
    pub const ALL: [Network; 3] = [Network::MainNet, Network::TestNet, Network::Localhost];

    pub fn as_str(&self) -> &'static str {
        match self {
            Network::MainNet => "MainNet",
            Network::TestNet => "TestNet",
            Network::Localhost => "Localhost",
        }
    }

    /// Human-readable option label.
    pub fn label(&self) -> &'static str {
        match self {
            Network::MainNet => "Main Network",
            Network::TestNet => "Polaris Test Network",
            Network::Localhost => "Localhost 20336",
        }
    }

    pub fn connecting_message(&self) -> &'static str {
        match self {
            Network::MainNet => "Connecting to Main Network",
            Network::TestNet => "Connecting to Polaris Test Network",
            Network::Localhost => "Connecting to Localhost",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownNetwork(pub String);

impl fmt::Display for UnknownNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported network: {}", self.0)
    }
}

impl std::error::Error for UnknownNetwork {}

impl FromStr for Network {
    type Err = UnknownNetwork;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Network::ALL
            .into_iter()
            .find(|network| network.as_str() == s)
            .ok_or_else(|| UnknownNetwork(s.to_owned()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// Logical backend endpoints. Paths are resolved at runtime by the console's route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    GetContractAddress,
    SetContractAddress,
    GetAccounts,
    ImportAccount,
    CreateAccount,
    RemoveAccount,
    AccountChange,
    IsDefaultAccountUnlocked,
    GetDefaultAccountData,
    GetIdentities,
    CreateIdentity,
    ImportIdentity,
    RemoveIdentity,
    IdentityChange,
    UnlockIdentity,
    ChangeNet,
}

impl Endpoint {
    pub const ALL: [Endpoint; 16] = [
        Endpoint::GetContractAddress,
        Endpoint::SetContractAddress,
        Endpoint::GetAccounts,
        Endpoint::ImportAccount,
        Endpoint::CreateAccount,
        Endpoint::RemoveAccount,
        Endpoint::AccountChange,
        Endpoint::IsDefaultAccountUnlocked,
        Endpoint::GetDefaultAccountData,
        Endpoint::GetIdentities,
        Endpoint::CreateIdentity,
        Endpoint::ImportIdentity,
        Endpoint::RemoveIdentity,
        Endpoint::IdentityChange,
        Endpoint::UnlockIdentity,
        Endpoint::ChangeNet,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::GetContractAddress => "get_contract_address",
            Endpoint::SetContractAddress => "set_contract_address",
            Endpoint::GetAccounts => "get_accounts",
            Endpoint::ImportAccount => "import_account",
            Endpoint::CreateAccount => "create_account",
            Endpoint::RemoveAccount => "remove_account",
            Endpoint::AccountChange => "account_change",
            Endpoint::IsDefaultAccountUnlocked => "is_default_wallet_account_unlock",
            Endpoint::GetDefaultAccountData => "get_default_wallet_account_data",
            Endpoint::GetIdentities => "get_identities",
            Endpoint::CreateIdentity => "create_identity",
            Endpoint::ImportIdentity => "import_identity",
            Endpoint::RemoveIdentity => "remove_identity",
            Endpoint::IdentityChange => "identity_change",
            Endpoint::UnlockIdentity => "unlock_identity",
            Endpoint::ChangeNet => "change_net",
        }
    }

    pub fn method(&self) -> HttpMethod {
        match self {
            Endpoint::GetContractAddress
            | Endpoint::GetAccounts
            | Endpoint::IsDefaultAccountUnlocked
            | Endpoint::GetDefaultAccountData
            | Endpoint::GetIdentities => HttpMethod::Get,
            _ => HttpMethod::Post,
        }
    }

    pub fn from_name(name: &str) -> Option<Endpoint> {
        Endpoint::ALL.into_iter().find(|endpoint| endpoint.name() == name)
    }
}

// ── Response envelopes ──

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultResponse<T> {
    pub result: T,
}

/// `{result: message}` body used by mutating endpoints on success and failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    #[serde(default)]
    pub result: String,
}

// ── Accounts ──

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountEntry {
    pub b58_address: String,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetContractAddressRequest {
    pub contract_address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportKeyRequest {
    pub hex_private_key: String,
    pub label: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateKeyRequest {
    pub label: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccountResponse {
    pub hex_private_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveAccountRequest {
    pub password: String,
    pub b58_address_remove: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountChangeRequest {
    pub b58_address_selected: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultAccountResponse {
    pub b58_address: String,
}

// ── Identities ──

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdentityEntry {
    pub ont_id: String,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIdentityResponse {
    pub ont_id: String,
    pub hex_private_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveIdentityRequest {
    pub password: String,
    pub ont_id_remove: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityChangeRequest {
    pub ont_id_selected: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnlockIdentityRequest {
    pub ont_id: String,
    pub pwd: String,
}

/// Returned by unlock_identity on success and on failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnlockIdentityResponse {
    #[serde(default)]
    pub result: String,
    #[serde(default)]
    pub redirect_url: String,
}

// ── Network ──

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeNetRequest {
    pub network_selected: Network,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_uses_literal_names_on_the_wire() {
        let body = serde_json::to_value(ChangeNetRequest {
            network_selected: Network::Localhost,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "network_selected": "Localhost" }));
        assert_eq!("MainNet".parse::<Network>().unwrap(), Network::MainNet);
        assert!("DevNet".parse::<Network>().is_err());
        assert_eq!(Network::default(), Network::TestNet);
    }

    #[test]
    fn endpoint_names_are_unique_and_resolvable() {
        for endpoint in Endpoint::ALL {
            assert_eq!(Endpoint::from_name(endpoint.name()), Some(endpoint));
        }
        assert_eq!(Endpoint::GetAccounts.method(), HttpMethod::Get);
        assert_eq!(Endpoint::ChangeNet.method(), HttpMethod::Post);
    }

    #[test]
    fn unlock_response_tolerates_missing_fields() {
        let parsed: UnlockIdentityResponse =
            serde_json::from_str(r#"{"result": "unlock failed!"}"#).unwrap();
        assert_eq!(parsed.result, "unlock failed!");
        assert!(parsed.redirect_url.is_empty());
    }
}
