//! Network switching, shared by both view-models.

use tracing::{info, warn};
use wc_api_types::Network;

use crate::capabilities::{Capabilities, NORMAL_MS, Notice};
use crate::state::{NetworkState, Outcome, StateCell};

const TITLE: &str = "Network Change";

/// Statuses whose body carries a displayable reason.
const EXPLAINED_STATUSES: [u16; 4] = [400, 409, 500, 501];

/// Optimistically switch to `network`. On rejection the selection falls back to TestNet.
///
/// The request is sent even when `network` is already selected.
pub async fn change_network(
    caps: &Capabilities,
    state: &StateCell<NetworkState>,
    network: Network,
) -> Outcome {
    state.with_mut(|s| s.selected = network);

    match caps.client.change_net(network).await {
        Ok(()) => {
            info!("network changed to {}", network);
            caps.notify(Notice::success(network.connecting_message(), NORMAL_MS).titled(TITLE));
            Outcome::Done
        }
        Err(err) => {
            warn!("network change to {} rejected: {}", network, err);
            state.with_mut(|s| s.selected = Network::TestNet);
            let notice = match (err.status(), err.backend_message()) {
                (Some(status), Some(message)) if EXPLAINED_STATUSES.contains(&status) => {
                    Notice::warning(message, NORMAL_MS)
                }
                _ => Notice::error("Failed", NORMAL_MS),
            };
            caps.notify(notice.titled(TITLE));
            Outcome::Failed(err)
        }
    }
}

/// Parse a selection coming from the UI; unknown values are ignored.
pub async fn change_network_by_name(
    caps: &Capabilities,
    state: &StateCell<NetworkState>,
    value: &str,
) -> Outcome {
    match value.parse::<Network>() {
        Ok(network) => change_network(caps, state, network).await,
        Err(err) => {
            warn!("{}", err);
            Outcome::Skipped
        }
    }
}
