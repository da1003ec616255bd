//! End-to-end launch flow.
//!
//! Everything that can fail on purely local input — shell discovery,
//! destination resolution, grid planning — happens before the first pane-host
//! call, so a typo never leaves a half-built window behind.

use tracing::debug;

use crate::broadcast;
use crate::builder::GridBuilder;
use crate::config::RunConfig;
use crate::error::Error;
use crate::grid;
use crate::host::PaneHost;
use crate::hostspec;
use crate::reaper;
use crate::shell;

/// Launches the grid for `destinations` and, in kill-inactive mode, watches
/// it until every session ends.
///
/// # Errors
/// Returns the first fatal error; host failures mid-build leave the window
/// as-is for the user to close.
pub async fn launch<H: PaneHost>(
    host: &H,
    config: &RunConfig,
    destinations: &[String],
) -> Result<(), Error> {
    let login_shell = shell::login_shell()?;
    let specs = hostspec::pane_specs(destinations, config, &login_shell)?;
    let plan = grid::plan(specs.len(), config.columns_max, config.rows_max)?;
    debug!(
        panes = specs.len(),
        columns = plan.columns,
        rows = plan.rows,
        "planned grid"
    );

    host.launch_application().await?;
    let built = GridBuilder::new(host, config).build(&specs, &plan).await?;
    broadcast::register_fanout(host, &built, config).await?;

    if config.kill_inactive {
        reaper::reap(host, &built).await?;
    }
    Ok(())
}
