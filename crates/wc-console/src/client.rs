//! Typed backend client.
//!
//! Every logical endpoint gets one method here; the actual bytes move through
//! a host-provided [`Transport`] (reqwest natively, `fetch` in the browser).

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::rc::Rc;
use tracing::{debug, warn};
use wc_api_types::{
    AccountChangeRequest, AccountEntry, ChangeNetRequest, CreateAccountResponse,
    CreateIdentityResponse, CreateKeyRequest, DefaultAccountResponse, Endpoint, HttpMethod,
    IdentityChangeRequest, IdentityEntry, ImportKeyRequest, MessageResponse, Network,
    RemoveAccountRequest, RemoveIdentityRequest, ResultResponse, SetContractAddressRequest,
    UnlockIdentityRequest, UnlockIdentityResponse,
};

use crate::config::ConsoleConfig;
use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Moves one JSON request to the backend. Non-2xx statuses are returned as responses, not errors.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<Value>,
    ) -> Result<RawResponse, ApiError>;
}

#[derive(Clone)]
pub struct ManagerClient {
    transport: Rc<dyn Transport>,
    config: Rc<ConsoleConfig>,
}

impl ManagerClient {
    pub fn new(transport: Rc<dyn Transport>, config: ConsoleConfig) -> Self {
        Self {
            transport,
            config: Rc::new(config),
        }
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    async fn exchange(
        &self,
        endpoint: Endpoint,
        body: Option<Value>,
    ) -> Result<RawResponse, ApiError> {
        let url = self.config.url(endpoint);
        let method = endpoint.method();
        debug!("{} {}", method.as_str(), url);

        let response = self.transport.send(method, &url, body).await?;
        if !response.is_success() {
            warn!("{} returned status {}", endpoint.name(), response.status);
            return Err(ApiError::from_status(response.status, response.body));
        }
        Ok(response)
    }

    async fn call<Req, Resp>(
        &self,
        endpoint: Endpoint,
        request: Option<&Req>,
    ) -> Result<Resp, ApiError>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let body = request
            .map(serde_json::to_value)
            .transpose()
            .map_err(|err| ApiError::Decode(err.to_string()))?;
        let response = self.exchange(endpoint, body).await?;
        serde_json::from_str(&response.body)
            .map_err(|err| ApiError::Decode(format!("{}: {err}", endpoint.name())))
    }

    /// For endpoints whose success is signaled by status alone.
    async fn call_unit<Req: Serialize>(
        &self,
        endpoint: Endpoint,
        request: &Req,
    ) -> Result<(), ApiError> {
        let body = serde_json::to_value(request).map_err(|err| ApiError::Decode(err.to_string()))?;
        self.exchange(endpoint, Some(body)).await.map(|_| ())
    }

    async fn get<Resp: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<Resp, ApiError> {
        self.call::<(), Resp>(endpoint, None).await
    }

    pub async fn get_contract_address(&self) -> Result<String, ApiError> {
        let response: ResultResponse<String> = self.get(Endpoint::GetContractAddress).await?;
        Ok(response.result)
    }

    pub async fn set_contract_address(&self, contract_address: &str) -> Result<(), ApiError> {
        let request = SetContractAddressRequest {
            contract_address: contract_address.to_owned(),
        };
        self.call_unit(Endpoint::SetContractAddress, &request).await
    }

    pub async fn get_accounts(&self) -> Result<Vec<AccountEntry>, ApiError> {
        let response: ResultResponse<Vec<AccountEntry>> = self.get(Endpoint::GetAccounts).await?;
        Ok(response.result)
    }

    pub async fn import_account(&self, request: &ImportKeyRequest) -> Result<(), ApiError> {
        self.call_unit(Endpoint::ImportAccount, request).await
    }

    pub async fn create_account(
        &self,
        request: &CreateKeyRequest,
    ) -> Result<CreateAccountResponse, ApiError> {
        self.call(Endpoint::CreateAccount, Some(request)).await
    }

    pub async fn remove_account(
        &self,
        request: &RemoveAccountRequest,
    ) -> Result<MessageResponse, ApiError> {
        self.call(Endpoint::RemoveAccount, Some(request)).await
    }

    pub async fn account_change(
        &self,
        request: &AccountChangeRequest,
    ) -> Result<MessageResponse, ApiError> {
        self.call(Endpoint::AccountChange, Some(request)).await
    }

    pub async fn is_default_account_unlocked(&self) -> Result<bool, ApiError> {
        let response: ResultResponse<bool> = self.get(Endpoint::IsDefaultAccountUnlocked).await?;
        Ok(response.result)
    }

    pub async fn get_default_account(&self) -> Result<String, ApiError> {
        let response: DefaultAccountResponse = self.get(Endpoint::GetDefaultAccountData).await?;
        Ok(response.b58_address)
    }

    pub async fn get_identities(&self) -> Result<Vec<IdentityEntry>, ApiError> {
        let response: ResultResponse<Vec<IdentityEntry>> = self.get(Endpoint::GetIdentities).await?;
        Ok(response.result)
    }

    pub async fn create_identity(
        &self,
        request: &CreateKeyRequest,
    ) -> Result<CreateIdentityResponse, ApiError> {
        self.call(Endpoint::CreateIdentity, Some(request)).await
    }

    pub async fn import_identity(
        &self,
        request: &ImportKeyRequest,
    ) -> Result<CreateIdentityResponse, ApiError> {
        self.call(Endpoint::ImportIdentity, Some(request)).await
    }

    pub async fn remove_identity(
        &self,
        request: &RemoveIdentityRequest,
    ) -> Result<MessageResponse, ApiError> {
        self.call(Endpoint::RemoveIdentity, Some(request)).await
    }

    pub async fn identity_change(
        &self,
        request: &IdentityChangeRequest,
    ) -> Result<MessageResponse, ApiError> {
        self.call(Endpoint::IdentityChange, Some(request)).await
    }

    /// On failure the error body carries the same `{result, redirect_url}` shape.
    pub async fn unlock_identity(
        &self,
        request: &UnlockIdentityRequest,
    ) -> Result<UnlockIdentityResponse, ApiError> {
        self.call(Endpoint::UnlockIdentity, Some(request)).await
    }

    pub async fn change_net(&self, network: Network) -> Result<(), ApiError> {
        let request = ChangeNetRequest {
            network_selected: network,
        };
        self.call_unit(Endpoint::ChangeNet, &request).await
    }
}
