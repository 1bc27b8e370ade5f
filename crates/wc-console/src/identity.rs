//! Identity handlers, shared by the setting and login view-models.

use tracing::{info, warn};
use wc_api_types::{
    CreateKeyRequest, IdentityChangeRequest, ImportKeyRequest, RemoveIdentityRequest,
};

use crate::capabilities::{BRIEF_MS, Capabilities, LONG_MS, NORMAL_MS, Notice, SHORT_MS};
use crate::prompts;
use crate::state::{IdentityState, ListOption, Outcome, StateCell};

/// GET the identity list and replace the cached options.
pub async fn load_identities(caps: &Capabilities, state: &StateCell<IdentityState>) -> Outcome {
    match caps.client.get_identities().await {
        Ok(identities) => {
            let options: Vec<ListOption> = identities.into_iter().map(ListOption::from).collect();
            state.with_mut(|s| s.identities.replace_options(options));
            Outcome::Done
        }
        Err(err) => {
            warn!("failed to load identities: {}", err);
            Outcome::Failed(err)
        }
    }
}

/// Select the first identity when nothing is selected yet.
pub fn select_first_identity(state: &StateCell<IdentityState>) -> bool {
    state.with_mut(|s| s.identities.select_first_if_unset())
}

/// Local selection used by the login form; no request is made.
pub fn select_login_identity(state: &StateCell<IdentityState>, ont_id: &str) -> bool {
    state.with_mut(|s| s.identities.select(ont_id))
}

pub async fn create_identity(caps: &Capabilities, state: &StateCell<IdentityState>) -> Outcome {
    let Some(label) = caps.ask(&prompts::CREATE_IDENTITY_LABEL).await else {
        caps.notify(Notice::warning("create identity canceled", NORMAL_MS));
        return Outcome::Cancelled;
    };
    let Some(password) = caps.ask(&prompts::CREATE_IDENTITY_PASSWORD).await else {
        caps.notify(Notice::warning("create identity canceled", NORMAL_MS));
        return Outcome::Cancelled;
    };

    match caps.client.create_identity(&CreateKeyRequest { label, password }).await {
        Ok(created) => {
            info!("created identity {}", created.ont_id);
            state.with_mut(|s| {
                s.new_ont_id = created.ont_id;
                s.new_private_key.reveal(created.hex_private_key);
            });
            load_identities(caps, state).await;
            select_first_identity(state);
            caps.notify(Notice::success("Create identity successful", SHORT_MS));
            Outcome::Done
        }
        Err(err) => {
            warn!("create identity failed: {}", err);
            caps.notify(Notice::error(err.display_message("Create identity failed"), LONG_MS));
            Outcome::Failed(err)
        }
    }
}

pub async fn import_identity(caps: &Capabilities, state: &StateCell<IdentityState>) -> Outcome {
    let Some(hex_private_key) = caps.ask(&prompts::IMPORT_IDENTITY_KEY).await else {
        caps.notify(Notice::warning("Import canceled", NORMAL_MS));
        return Outcome::Cancelled;
    };
    let Some(label) = caps.ask(&prompts::IMPORT_IDENTITY_LABEL).await else {
        caps.notify(Notice::warning("Import canceled", NORMAL_MS));
        return Outcome::Cancelled;
    };
    let Some(password) = caps.ask(&prompts::IMPORT_IDENTITY_PASSWORD).await else {
        caps.notify(Notice::warning("Import canceled", NORMAL_MS));
        return Outcome::Cancelled;
    };

    let request = ImportKeyRequest {
        hex_private_key,
        label,
        password,
    };
    match caps.client.import_identity(&request).await {
        Ok(imported) => {
            info!("imported identity {}", imported.ont_id);
            state.with_mut(|s| s.new_ont_id = imported.ont_id);
            load_identities(caps, state).await;
            select_first_identity(state);
            caps.notify(Notice::success("Import successful", SHORT_MS));
            Outcome::Done
        }
        Err(err) => {
            warn!("import identity failed: {}", err);
            caps.notify(Notice::error(err.display_message("Import failed"), LONG_MS));
            Outcome::Failed(err)
        }
    }
}

/// Remove the selected identity, then fall back to the first remaining one.
pub async fn remove_identity(caps: &Capabilities, state: &StateCell<IdentityState>) -> Outcome {
    let Some(ont_id_remove) = state.with(|s| s.identities.selected().map(str::to_owned)) else {
        caps.notify(Notice::warning("No identity selected", BRIEF_MS));
        return Outcome::Skipped;
    };
    let Some(password) = caps.ask(&prompts::REMOVE_IDENTITY_PASSWORD).await else {
        caps.notify(Notice::warning("remove identity canceled", BRIEF_MS));
        return Outcome::Cancelled;
    };

    let request = RemoveIdentityRequest {
        password,
        ont_id_remove,
    };
    match caps.client.remove_identity(&request).await {
        Ok(response) => {
            info!("removed identity {}", request.ont_id_remove);
            caps.notify(Notice::success(response.result, LONG_MS));
            if let Outcome::Failed(err) = load_identities(caps, state).await {
                state.with_mut(|s| s.identities.remove(&request.ont_id_remove));
                caps.notify(Notice::error(
                    err.display_message("Failed to refresh identities"),
                    LONG_MS,
                ));
            }
            state.with_mut(|s| s.identities.select_first());
            Outcome::Done
        }
        Err(err) => {
            warn!("remove identity failed: {}", err);
            caps.notify(Notice::error(err.display_message("Remove identity failed"), LONG_MS));
            Outcome::Failed(err)
        }
    }
}

/// Make `ont_id` the backend's default identity. Re-selecting the current identity is a no-op.
pub async fn change_identity(
    caps: &Capabilities,
    state: &StateCell<IdentityState>,
    ont_id: &str,
) -> Outcome {
    if state.with(|s| s.identities.selected() == Some(ont_id)) {
        return Outcome::Skipped;
    }
    let Some(password) = caps.ask(&prompts::CHANGE_IDENTITY_PASSWORD).await else {
        caps.notify(Notice::warning("change identity canceled", BRIEF_MS));
        return Outcome::Cancelled;
    };

    let request = IdentityChangeRequest {
        ont_id_selected: ont_id.to_owned(),
        password,
    };
    match caps.client.identity_change(&request).await {
        Ok(response) => {
            info!("default identity changed to {}", ont_id);
            state.with_mut(|s| s.identities.select(ont_id));
            caps.notify(Notice::success(response.result, SHORT_MS));
            Outcome::Done
        }
        Err(err) => {
            warn!("identity change failed: {}", err);
            caps.notify(Notice::error(err.display_message("Change identity failed"), LONG_MS));
            Outcome::Failed(err)
        }
    }
}

pub fn clear_new_identity_private_key(state: &StateCell<IdentityState>) {
    state.with_mut(|s| s.clear_new_identity());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::NoticeLevel;
    use crate::testing::Harness;
    use wc_api_types::Endpoint;

    const IDENTITIES: &str = r#"{"result": [
        {"ont_id": "did:ont:A", "label": "alice"},
        {"ont_id": "did:ont:B", "label": "bob"}
    ]}"#;

    async fn loaded_state(harness: &Harness) -> StateCell<IdentityState> {
        harness.transport.respond(Endpoint::GetIdentities, 200, IDENTITIES);
        let state = StateCell::new(IdentityState::default());
        load_identities(&harness.caps, &state).await;
        state
    }

    #[tokio::test]
    async fn load_then_select_first_identity() {
        let harness = Harness::new();
        let state = loaded_state(&harness).await;

        assert!(select_first_identity(&state));
        state.with(|s| {
            assert_eq!(s.identities.options().len(), 2);
            assert_eq!(s.identities.selected(), Some("did:ont:A"));
        });
        assert!(!select_first_identity(&state));
    }

    #[tokio::test]
    async fn failed_load_leaves_state_unchanged() {
        let harness = Harness::new();
        let state = loaded_state(&harness).await;
        harness.transport.respond(Endpoint::GetIdentities, 500, "{}");

        let outcome = load_identities(&harness.caps, &state).await;
        assert!(matches!(outcome, Outcome::Failed(_)));
        assert_eq!(state.with(|s| s.identities.options().len()), 2);
        assert!(harness.notifier.notices().is_empty());
    }

    #[tokio::test]
    async fn create_identity_reveals_key_and_refreshes() {
        let harness = Harness::new();
        let state = StateCell::new(IdentityState::default());
        harness.prompter.answer("carol");
        harness.prompter.answer("secret");
        harness.transport.respond(
            Endpoint::CreateIdentity,
            200,
            &format!(r#"{{"ont_id": "did:ont:C", "hex_private_key": "{}"}}"#, "1f".repeat(32)),
        );
        harness.transport.respond(
            Endpoint::GetIdentities,
            200,
            r#"{"result": [{"ont_id": "did:ont:C", "label": "carol"}]}"#,
        );

        let outcome = create_identity(&harness.caps, &state).await;

        assert_eq!(outcome, Outcome::Done);
        state.with(|s| {
            assert_eq!(s.new_ont_id, "did:ont:C");
            assert!(s.new_private_key.is_visible());
            assert_eq!(s.new_private_key.value(), "1f".repeat(32));
            assert!(s.identities.contains("did:ont:C"));
            assert_eq!(s.identities.selected(), Some("did:ont:C"));
        });
        assert_eq!(
            harness.transport.last_body(Endpoint::CreateIdentity),
            Some(serde_json::json!({ "label": "carol", "password": "secret" }))
        );

        clear_new_identity_private_key(&state);
        state.with(|s| {
            assert!(!s.new_private_key.is_visible());
            assert!(s.new_private_key.value().is_empty());
            assert!(s.new_ont_id.is_empty());
        });
    }

    #[tokio::test]
    async fn cancelled_password_sends_nothing() {
        let harness = Harness::new();
        let state = StateCell::new(IdentityState::default());
        harness.prompter.answer("carol");
        harness.prompter.cancel();

        let outcome = create_identity(&harness.caps, &state).await;

        assert_eq!(outcome, Outcome::Cancelled);
        assert!(harness.transport.calls().is_empty());
        assert!(!state.with(|s| s.new_private_key.is_visible()));
        assert_eq!(harness.notifier.notices()[0].level, NoticeLevel::Warning);
    }

    #[tokio::test]
    async fn import_identity_rejects_malformed_key_without_request() {
        let harness = Harness::new();
        let state = StateCell::new(IdentityState::default());
        harness.prompter.answer("not-a-key");

        let outcome = import_identity(&harness.caps, &state).await;

        assert_eq!(outcome, Outcome::Cancelled);
        assert!(harness.transport.calls().is_empty());
    }

    #[tokio::test]
    async fn remove_selected_identity_selects_first_remaining() {
        let harness = Harness::new();
        let state = loaded_state(&harness).await;
        select_login_identity(&state, "did:ont:B");
        harness.prompter.answer("secret");
        harness.transport.respond(
            Endpoint::RemoveIdentity,
            200,
            r#"{"result": "remove did:ont:B successful!"}"#,
        );
        harness.transport.respond(
            Endpoint::GetIdentities,
            200,
            r#"{"result": [{"ont_id": "did:ont:A", "label": "alice"}]}"#,
        );

        let outcome = remove_identity(&harness.caps, &state).await;

        assert_eq!(outcome, Outcome::Done);
        assert_eq!(
            state.with(|s| s.identities.selected().map(str::to_owned)),
            Some("did:ont:A".to_owned())
        );
        assert_eq!(
            harness.transport.last_body(Endpoint::RemoveIdentity),
            Some(serde_json::json!({ "password": "secret", "ont_id_remove": "did:ont:B" }))
        );
        assert_eq!(harness.notifier.notices()[0].message, "remove did:ont:B successful!");
    }

    #[tokio::test]
    async fn import_into_empty_list_selects_imported_identity() {
        let harness = Harness::new();
        let state = StateCell::new(IdentityState::default());
        harness.prompter.answer(&"ab".repeat(32));
        harness.prompter.answer("erin");
        harness.prompter.answer("pw");
        harness.transport.respond(
            Endpoint::ImportIdentity,
            200,
            &format!(r#"{{"ont_id": "did:ont:E", "hex_private_key": "{}"}}"#, "ab".repeat(32)),
        );
        harness.transport.respond(
            Endpoint::GetIdentities,
            200,
            r#"{"result": [{"ont_id": "did:ont:E", "label": "erin"}]}"#,
        );

        assert_eq!(import_identity(&harness.caps, &state).await, Outcome::Done);
        state.with(|s| {
            assert_eq!(s.new_ont_id, "did:ont:E");
            assert_eq!(s.identities.selected(), Some("did:ont:E"));
        });
    }

    #[tokio::test]
    async fn remove_with_failed_refresh_drops_removed_identity() {
        let harness = Harness::new();
        let state = loaded_state(&harness).await;
        select_first_identity(&state);
        harness.prompter.answer("secret");
        harness.transport.respond(
            Endpoint::RemoveIdentity,
            200,
            r#"{"result": "remove did:ont:A successful!"}"#,
        );
        harness.transport.respond(Endpoint::GetIdentities, 500, "{}");

        assert_eq!(remove_identity(&harness.caps, &state).await, Outcome::Done);

        state.with(|s| {
            assert!(!s.identities.contains("did:ont:A"));
            assert_eq!(s.identities.selected(), Some("did:ont:B"));
        });
        let notices = harness.notifier.notices();
        assert_eq!(notices[0].level, NoticeLevel::Success);
        assert_eq!(notices[1].level, NoticeLevel::Error);
        assert_eq!(notices[1].message, "Failed to refresh identities");
    }

    #[tokio::test]
    async fn change_identity_failure_keeps_selection() {
        let harness = Harness::new();
        let state = loaded_state(&harness).await;
        select_first_identity(&state);
        harness.prompter.answer("wrong");
        harness
            .transport
            .respond(Endpoint::IdentityChange, 501, r#"{"result": "Invalid Password"}"#);

        let outcome = change_identity(&harness.caps, &state, "did:ont:B").await;

        assert!(matches!(outcome, Outcome::Failed(_)));
        assert_eq!(
            state.with(|s| s.identities.selected().map(str::to_owned)),
            Some("did:ont:A".to_owned())
        );
        let notice = harness.notifier.notices()[0].clone();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.message, "Invalid Password");
    }

    #[tokio::test]
    async fn change_to_selected_identity_is_noop() {
        let harness = Harness::new();
        let state = loaded_state(&harness).await;
        select_first_identity(&state);

        let outcome = change_identity(&harness.caps, &state, "did:ont:A").await;

        assert_eq!(outcome, Outcome::Skipped);
        assert!(harness.prompter.asked().is_empty());
        assert_eq!(harness.transport.calls_to(Endpoint::IdentityChange), 0);
    }
}
