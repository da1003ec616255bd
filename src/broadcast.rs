//! Input-fanout registration.
//!
//! One-time setup: the just-built window's real panes become a single
//! broadcast group with the host, so one keyboard stream drives every
//! connection. Placeholders are never part of the group. Toggling broadcast
//! afterwards is a user-facing capability of the host itself.

use tracing::debug;

use crate::builder::BuiltGrid;
use crate::config::RunConfig;
use crate::error::Error;
use crate::host::PaneHost;

/// Registers the grid's real panes as one input-fanout group.
///
/// Does nothing when broadcasting was disabled for this run. The group is
/// appended host-side; groups belonging to other windows are left alone.
///
/// # Errors
/// Returns the host error if registration fails.
pub async fn register_fanout<H: PaneHost>(
    host: &H,
    grid: &BuiltGrid,
    config: &RunConfig,
) -> Result<(), Error> {
    if !config.broadcast {
        debug!("broadcast disabled, skipping fanout registration");
        return Ok(());
    }
    let panes = grid.real_panes();
    debug!(panes = panes.len(), window = %grid.window, "registering broadcast group");
    host.register_broadcast_group(&grid.window, &panes).await?;
    Ok(())
}
