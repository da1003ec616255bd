//! Command-line surface.
//!
//! Destinations are required unless `--list` is given, and the two are
//! mutually exclusive; clap reports those as usage errors (exit code 2).
//! Grid-constraint conflicts are left to the planner so they surface as
//! fatal errors (exit code 1) like every other bad input.

use clap::Parser;

use crate::config::RunConfig;

/// Launch a grid of SSH sessions in one tmux window and broadcast keyboard
/// input across them.
#[derive(Debug, Parser)]
#[command(name = "sshgrid", version, about)]
pub struct Cli {
    /// Destination hosts, `[user@]host[:port]`.
    #[arg(
        value_name = "DESTINATION",
        required_unless_present = "list",
        conflicts_with = "list"
    )]
    pub destinations: Vec<String>,

    /// Emit verbose per-step diagnostics on stderr.
    #[arg(short, long)]
    pub debug: bool,

    /// Close panes as sessions exit instead of keeping placeholder panes.
    #[arg(short, long)]
    pub kill_inactive: bool,

    /// Keep the machine awake while the sessions run.
    #[arg(short = 'A', long)]
    pub keep_awake: bool,

    /// Do not link keyboard input across the panes.
    #[arg(short = 'b', long = "no-broadcast")]
    pub no_broadcast: bool,

    /// Default username for destinations that give none.
    #[arg(short, long, value_name = "USER")]
    pub login: Option<String>,

    /// Default port for destinations that give none.
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Jump host passed to the client with -J.
    #[arg(short = 'J', long, value_name = "SPEC")]
    pub jump_host: Option<String>,

    /// Seconds to wait between opening panes.
    #[arg(short, long, value_name = "SECONDS", default_value_t = 0.0)]
    pub sleep: f64,

    /// Raw client option passed with -o (repeatable).
    #[arg(short, long = "option", value_name = "OPTION")]
    pub options: Vec<String>,

    /// Remote-shell client binary.
    #[arg(long, value_name = "BINARY", default_value = "ssh")]
    pub ssh_binary: String,

    /// Maximum grid columns (exclusive with --rows).
    #[arg(short, long, value_name = "N")]
    pub columns: Option<usize>,

    /// Maximum grid rows (exclusive with --columns).
    #[arg(short, long, value_name = "N")]
    pub rows: Option<usize>,

    /// List sessions created by this tool instead of launching.
    #[arg(long)]
    pub list: bool,
}

impl Cli {
    /// Converts the parsed arguments into a [`RunConfig`].
    #[must_use]
    pub fn to_config(&self) -> RunConfig {
        RunConfig {
            debug: self.debug,
            kill_inactive: self.kill_inactive,
            keep_awake: self.keep_awake,
            broadcast: !self.no_broadcast,
            login: self.login.clone(),
            port: self.port,
            jump_host: self.jump_host.clone(),
            sleep_secs: self.sleep,
            ssh_options: self.options.clone(),
            ssh_binary: self.ssh_binary.clone(),
            columns_max: self.columns,
            rows_max: self.rows,
        }
    }
}
