//! The external pane-host capability.
//!
//! Everything this tool does to the terminal multiplexer goes through the
//! [`PaneHost`] trait: window creation, splits, session enumeration,
//! broadcast registration, termination events, and pane housekeeping. Every
//! operation is asynchronous and may fail with a [`HostError`], which the
//! core treats as fatal and unrecoverable mid-build.

pub mod tmux;

use std::fmt;
use std::io;

use thiserror::Error;
use tokio_stream::wrappers::ReceiverStream;

pub use tmux::TmuxHost;

/// Opaque handle to one pane owned by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PaneId(String);

impl PaneId {
    /// Wraps a host-side pane identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the host-side identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque handle to one window (tab) owned by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WindowId(String);

impl WindowId {
    /// Wraps a host-side window identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the host-side identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Split orientation, named for the divider the host draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitDirection {
    /// Vertical divider: the new pane appears to the right.
    Vertical,
    /// Horizontal divider: the new pane appears below.
    Horizontal,
}

/// Title and command for a pane about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneConfig {
    /// Pane title, set on creation.
    pub title: String,
    /// Command the pane runs.
    pub command: String,
}

/// One session row from host enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    /// Window containing the pane.
    pub window: WindowId,
    /// The pane itself.
    pub pane: PaneId,
    /// Current pane title.
    pub title: String,
}

/// Errors from pane-host communication.
#[derive(Debug, Error)]
pub enum HostError {
    /// The host binary could not be spawned.
    #[error("failed to run host command: {0}")]
    Spawn(#[from] io::Error),

    /// A host command ran but reported failure.
    #[error("host command '{command}' failed: {stderr}")]
    CommandFailed {
        /// The command that failed.
        command: String,
        /// Trimmed stderr from the host.
        stderr: String,
    },

    /// The host answered with output the integration cannot interpret.
    #[error("unexpected host output: {0}")]
    MalformedOutput(String),

    /// The host went away while being watched.
    #[error("lost connection to the pane host")]
    Disconnected,
}

/// Asynchronous pane-host operations.
///
/// Calls are always issued one at a time and awaited to completion; later
/// steps depend on the exact pane identities earlier calls return.
#[allow(async_fn_in_trait)]
pub trait PaneHost {
    /// Ensures the host application is running.
    async fn launch_application(&self) -> Result<(), HostError>;

    /// Creates a new window whose first pane runs `config`.
    async fn create_window(&self, config: &PaneConfig) -> Result<(WindowId, PaneId), HostError>;

    /// Splits `origin`, producing a new pane running `config`.
    async fn split(
        &self,
        origin: &PaneId,
        direction: SplitDirection,
        config: &PaneConfig,
    ) -> Result<PaneId, HostError>;

    /// Enumerates every pane in every window the host knows about.
    async fn list_sessions(&self) -> Result<Vec<SessionInfo>, HostError>;

    /// Registers `panes` as one input-fanout group in `window`, without
    /// touching groups belonging to other windows.
    async fn register_broadcast_group(
        &self,
        window: &WindowId,
        panes: &[PaneId],
    ) -> Result<(), HostError>;

    /// Subscribes to pane-termination events.
    async fn subscribe_terminations(&self) -> Result<ReceiverStream<PaneId>, HostError>;

    /// Closes a pane. Fails if the host no longer knows the pane.
    async fn close_pane(&self, pane: &PaneId) -> Result<(), HostError>;

    /// Redistributes pane sizes evenly across `window`.
    async fn arrange_evenly(&self, window: &WindowId) -> Result<(), HostError>;

    /// Brings a pane to the foreground and focuses it.
    async fn activate_pane(&self, pane: &PaneId) -> Result<(), HostError>;
}
