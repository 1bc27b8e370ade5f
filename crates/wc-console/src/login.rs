//! Login view-model.
//!
//! Reuses the identity and network handlers and adds the unlock form and
//! the confirmable dialog close.

use tracing::{info, warn};
use wc_api_types::{Network, UnlockIdentityRequest, UnlockIdentityResponse};
use zeroize::{Zeroize, Zeroizing};

use crate::capabilities::{Capabilities, LOGIN_MS, Notice};
use crate::identity;
use crate::network;
use crate::state::{IdentityState, NetworkState, Outcome, StateCell};

pub struct LoginForm {
    pub dialog_visible: bool,
    pub identity_password: Zeroizing<String>,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            dialog_visible: true,
            identity_password: Zeroizing::default(),
        }
    }
}

pub struct LoginViewModel {
    caps: Capabilities,
    pub form: StateCell<LoginForm>,
    pub network: StateCell<NetworkState>,
    pub identities: StateCell<IdentityState>,
}

impl LoginViewModel {
    pub fn new(caps: Capabilities) -> Self {
        Self {
            caps,
            form: StateCell::default(),
            network: StateCell::default(),
            identities: StateCell::default(),
        }
    }

    pub async fn on_load(&self) {
        self.load_identities().await;
        self.select_first_identity();
    }

    pub fn set_password(&self, password: &str) {
        self.form
            .with_mut(|f| f.identity_password = Zeroizing::new(password.to_owned()));
    }

    /// Unlock the selected identity and navigate to the redirect the backend supplies,
    /// whether the unlock succeeded or not.
    pub async fn login(&self) -> Outcome {
        let pwd = self.form.with(|f| f.identity_password.as_str().to_owned());
        if pwd.is_empty() {
            self.caps.notify(Notice::error("Please input password", LOGIN_MS));
            return Outcome::Cancelled;
        }
        let ont_id = self
            .identities
            .with(|s| s.identities.selected().map(str::to_owned))
            .unwrap_or_default();

        let mut request = UnlockIdentityRequest { ont_id, pwd };
        let (outcome, redirect_url) = match self.caps.client.unlock_identity(&request).await {
            Ok(response) => {
                info!("unlocked identity {}", request.ont_id);
                self.caps.notify(Notice::success(response.result, LOGIN_MS));
                (Outcome::Done, Some(response.redirect_url))
            }
            Err(err) => {
                warn!("unlock identity failed: {}", err);
                let body = err.decode_body::<UnlockIdentityResponse>();
                let message = match &body {
                    Some(body) if !body.result.is_empty() => body.result.clone(),
                    _ => err.display_message("unlock failed!"),
                };
                self.caps.notify(Notice::error(message, LOGIN_MS));
                (Outcome::Failed(err), body.map(|body| body.redirect_url))
            }
        };
        request.pwd.zeroize();

        self.caps.timer.sleep(self.caps.client.config().login_redirect_delay()).await;
        self.form.with_mut(|f| f.identity_password.zeroize());

        match redirect_url.filter(|url| !url.is_empty()) {
            Some(url) => self.caps.navigator.replace(&url),
            None => {
                warn!("unlock response carried no redirect url; reloading");
                self.caps.navigator.reload();
            }
        }
        outcome
    }

    /// Closing the dialog asks for confirmation; confirming reloads the page.
    pub async fn close_dialog(&self) -> bool {
        let confirmed = self
            .caps
            .prompter
            .confirm("Warning", "Are you sure to close this dialog?")
            .await;
        if confirmed {
            self.caps.navigator.reload();
        }
        confirmed
    }

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

    pub fn clear_new_identity_private_key(&self) {
        identity::clear_new_identity_private_key(&self.identities);
    }

    pub async fn change_network(&self, network: Network) -> Outcome {
        network::change_network(&self.caps, &self.network, network).await
    }

    pub async fn change_network_by_name(&self, value: &str) -> Outcome {
        network::change_network_by_name(&self.caps, &self.network, value).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::NoticeLevel;
    use crate::testing::{Harness, Navigation};
    use std::time::Duration;
    use wc_api_types::Endpoint;

    async fn loaded(harness: &Harness) -> LoginViewModel {
        harness.transport.respond(
            Endpoint::GetIdentities,
            200,
            r#"{"result": [
                {"ont_id": "did:ont:A", "label": "alice"},
                {"ont_id": "did:ont:B", "label": "bob"}
            ]}"#,
        );
        let vm = LoginViewModel::new(harness.caps.clone());
        vm.on_load().await;
        vm
    }

    #[tokio::test]
    async fn on_load_selects_first_identity() {
        let harness = Harness::new();
        let vm = loaded(&harness).await;

        assert_eq!(
            vm.identities.with(|s| s.identities.selected().map(str::to_owned)),
            Some("did:ont:A".to_owned())
        );
        assert!(vm.form.with(|f| f.dialog_visible));
    }

    #[tokio::test]
    async fn empty_password_sends_nothing() {
        let harness = Harness::new();
        let vm = loaded(&harness).await;
        let calls_before = harness.transport.calls().len();

        assert_eq!(vm.login().await, Outcome::Cancelled);

        assert_eq!(harness.transport.calls().len(), calls_before);
        let notice = harness.notifier.notices()[0].clone();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.message, "Please input password");
        assert!(harness.navigator.visits().is_empty());
    }

    #[tokio::test]
    async fn successful_unlock_waits_then_redirects() {
        let harness = Harness::new();
        let vm = loaded(&harness).await;
        vm.select_login_identity("did:ont:B");
        vm.set_password("secret");
        harness.transport.respond(
            Endpoint::UnlockIdentity,
            200,
            r#"{"result": "unlock did:ont:B successful!", "redirect_url": "http://console.test/"}"#,
        );

        assert_eq!(vm.login().await, Outcome::Done);

        assert_eq!(
            harness.transport.last_body(Endpoint::UnlockIdentity),
            Some(serde_json::json!({ "ont_id": "did:ont:B", "pwd": "secret" }))
        );
        assert_eq!(harness.timer.slept(), vec![Duration::from_secs(2)]);
        assert!(vm.form.with(|f| f.identity_password.is_empty()));
        assert_eq!(
            harness.navigator.visits(),
            vec![Navigation::Replace("http://console.test/".to_owned())]
        );
        assert_eq!(harness.notifier.notices()[0].message, "unlock did:ont:B successful!");
    }

    #[tokio::test]
    async fn failed_unlock_still_redirects() {
        let harness = Harness::new();
        let vm = loaded(&harness).await;
        vm.set_password("wrong");
        harness.transport.respond(
            Endpoint::UnlockIdentity,
            501,
            r#"{"result": "invalid password", "redirect_url": "http://console.test/login"}"#,
        );

        assert!(matches!(vm.login().await, Outcome::Failed(_)));

        let notice = harness.notifier.notices()[0].clone();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.message, "invalid password");
        assert!(vm.form.with(|f| f.identity_password.is_empty()));
        assert_eq!(
            harness.navigator.visits(),
            vec![Navigation::Replace("http://console.test/login".to_owned())]
        );
    }

    #[tokio::test]
    async fn unreachable_backend_reloads_page() {
        let harness = Harness::new();
        let vm = LoginViewModel::new(harness.caps.clone());
        vm.set_password("secret");

        assert!(matches!(vm.login().await, Outcome::Failed(_)));
        assert_eq!(harness.navigator.visits(), vec![Navigation::Reload]);
    }

    #[tokio::test]
    async fn close_dialog_reloads_only_when_confirmed() {
        let harness = Harness::new();
        let vm = LoginViewModel::new(harness.caps.clone());

        harness.prompter.confirm_with(false);
        assert!(!vm.close_dialog().await);
        assert!(harness.navigator.visits().is_empty());

        harness.prompter.confirm_with(true);
        assert!(vm.close_dialog().await);
        assert_eq!(harness.navigator.visits(), vec![Navigation::Reload]);
    }

    #[tokio::test]
    async fn login_reuses_identity_creation() {
        let harness = Harness::new();
        let vm = LoginViewModel::new(harness.caps.clone());
        harness.prompter.answer("dave");
        harness.prompter.answer("pw");
        harness.transport.respond(
            Endpoint::CreateIdentity,
            200,
            &format!(r#"{{"ont_id": "did:ont:D", "hex_private_key": "{}"}}"#, "9".repeat(64)),
        );
        harness.transport.respond(
            Endpoint::GetIdentities,
            200,
            r#"{"result": [{"ont_id": "did:ont:D", "label": "dave"}]}"#,
        );

        assert_eq!(vm.create_identity().await, Outcome::Done);
        assert!(vm.identities.with(|s| s.new_private_key.is_visible()));

        vm.clear_new_identity_private_key();
        assert!(!vm.identities.with(|s| s.new_private_key.is_visible()));
    }

    #[tokio::test]
    async fn identity_created_on_empty_list_is_used_for_login() {
        let harness = Harness::new();
        harness
            .transport
            .respond(Endpoint::GetIdentities, 200, r#"{"result": []}"#);
        let vm = LoginViewModel::new(harness.caps.clone());
        vm.on_load().await;
        harness.prompter.answer("dave");
        harness.prompter.answer("pw");
        harness.transport.respond(
            Endpoint::CreateIdentity,
            200,
            &format!(r#"{{"ont_id": "did:ont:D", "hex_private_key": "{}"}}"#, "9".repeat(64)),
        );
        harness.transport.respond(
            Endpoint::GetIdentities,
            200,
            r#"{"result": [{"ont_id": "did:ont:D", "label": "dave"}]}"#,
        );
        harness.transport.respond(
            Endpoint::UnlockIdentity,
            200,
            r#"{"result": "ok", "redirect_url": "http://console.test/"}"#,
        );

        assert_eq!(vm.create_identity().await, Outcome::Done);
        vm.set_password("pw");
        assert_eq!(vm.login().await, Outcome::Done);

        assert_eq!(
            harness.transport.last_body(Endpoint::UnlockIdentity),
            Some(serde_json::json!({ "ont_id": "did:ont:D", "pwd": "pw" }))
        );
    }

    #[tokio::test]
    async fn login_network_rejection_reverts() {
        let harness = Harness::new();
        let vm = LoginViewModel::new(harness.caps.clone());
        harness.transport.respond(Endpoint::ChangeNet, 500, r#"{"result": "rpc error"}"#);

        vm.change_network(Network::MainNet).await;

        assert_eq!(vm.network.snapshot().selected, Network::TestNet);
        assert_eq!(harness.notifier.notices()[0].message, "rpc error");
    }
}
