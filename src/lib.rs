//! sshgrid - launch a grid of broadcast-linked SSH sessions.
//!
//! Opens one tmux window split into a near-square grid, one pane per
//! destination host, and fans keyboard input out across all of them. The
//! pane host is abstracted behind [`host::PaneHost`], so the grid engine is
//! testable without a running tmux server.

pub mod broadcast;
pub mod builder;
pub mod cli;
pub mod config;
pub mod error;
pub mod grid;
pub mod host;
pub mod hostspec;
pub mod launcher;
pub mod logging;
pub mod reaper;
pub mod sessions;
pub mod shell;
pub mod tree;

pub use builder::{BuiltGrid, GridBuilder};
pub use config::RunConfig;
pub use error::Error;
pub use grid::GridPlan;
pub use hostspec::{Destination, PaneSpec};
