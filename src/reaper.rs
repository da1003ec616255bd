//! Session reaping (kill-inactive mode).
//!
//! Watches the host's pane-termination stream and closes each of our panes as
//! its session ends. The loop is done once the last tracked pane is gone.
//! Events for panes outside our window are ignored without error.

use std::collections::HashSet;

use tokio_stream::StreamExt;
use tracing::debug;

use crate::builder::BuiltGrid;
use crate::error::Error;
use crate::host::{HostError, PaneHost};

/// Watches termination events until every real pane of `grid` is gone.
///
/// A termination may arrive for a pane the host already removed; the explicit
/// close is then refused host-side and the refusal is ignored. If the stream
/// ends while panes are still tracked, the host went away mid-watch.
///
/// # Errors
/// Returns [`HostError::Disconnected`] when the stream ends early, or any
/// error from the subscription itself.
pub async fn reap<H: PaneHost>(host: &H, grid: &BuiltGrid) -> Result<(), Error> {
    let mut tracked: HashSet<_> = grid.real_panes().into_iter().collect();
    if tracked.is_empty() {
        return Ok(());
    }

    let mut events = host.subscribe_terminations().await?;
    debug!(tracked = tracked.len(), "watching for session terminations");

    while !tracked.is_empty() {
        let Some(pane) = events.next().await else {
            return Err(Error::Host(HostError::Disconnected));
        };
        if !tracked.remove(&pane) {
            debug!(pane = %pane, "termination for untracked pane, ignoring");
            continue;
        }
        // The pane may already be gone host-side; that is fine.
        if let Err(err) = host.close_pane(&pane).await {
            debug!(pane = %pane, error = %err, "close refused, pane already gone");
        }
        debug!(pane = %pane, remaining = tracked.len(), "session reaped");
    }

    debug!("all sessions ended");
    Ok(())
}
