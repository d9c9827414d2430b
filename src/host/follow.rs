//! Live snapshot feed.
//!
//! Collaborators publish into a `watch` channel, so a burst of snapshots
//! collapses to the newest one before the host sees it. Superseding a
//! stale snapshot is the only cancellation there is.

use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

use crate::host::{NavigationEvent, NavigationHost};
use crate::types::AuthState;

/// Apply every snapshot observed on `snapshots` to `host`, forwarding the
/// resulting events.
///
/// Ends when the publisher is dropped (after the last published snapshot
/// has been applied) or when nobody is listening for events. Rejected
/// snapshots are logged and skipped. Returns the host for inspection.
pub async fn follow(
    mut host: NavigationHost,
    mut snapshots: watch::Receiver<Option<AuthState>>,
    events: mpsc::Sender<NavigationEvent>,
) -> NavigationHost {
    loop {
        let latest = snapshots.borrow_and_update().clone();

        if let Some(snapshot) = latest {
            match host.apply(snapshot) {
                Ok(event) => {
                    if events.send(event).await.is_err() {
                        debug!("Event receiver closed, stopping feed");
                        break;
                    }
                }
                Err(e) => warn!(error = %e.format_for_log(), "Snapshot rejected"),
            }
        }

        if snapshots.changed().await.is_err() {
            debug!("Snapshot publisher dropped, stopping feed");
            break;
        }
    }

    host
}
