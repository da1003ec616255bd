//! Run configuration.
//!
//! All mode flags and connection defaults live in one explicit record that is
//! passed into the builder, broadcast, and reaper stages rather than being
//! read from ambient state.

/// Configuration for one launcher run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Emit verbose per-step diagnostics.
    pub debug: bool,
    /// Close panes as their sessions exit instead of keeping placeholders;
    /// enables the session reaper loop.
    pub kill_inactive: bool,
    /// Prefix each connection with a keep-awake wrapper.
    pub keep_awake: bool,
    /// Register the real panes as one input-fanout group.
    pub broadcast: bool,
    /// Default username when a destination gives none.
    pub login: Option<String>,
    /// Default port when a destination gives none.
    pub port: Option<u16>,
    /// Jump host (ProxyJump) spec passed with `-J`.
    pub jump_host: Option<String>,
    /// Cooperative delay in seconds before each split beyond the first.
    pub sleep_secs: f64,
    /// Raw `-o` option strings, order preserved.
    pub ssh_options: Vec<String>,
    /// Remote-shell client binary.
    pub ssh_binary: String,
    /// Upper bound on grid columns (mutually exclusive with `rows_max`).
    pub columns_max: Option<usize>,
    /// Upper bound on grid rows (mutually exclusive with `columns_max`).
    pub rows_max: Option<usize>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            debug: false,
            kill_inactive: false,
            keep_awake: false,
            broadcast: true,
            login: None,
            port: None,
            jump_host: None,
            sleep_secs: 0.0,
            ssh_options: Vec::new(),
            ssh_binary: "ssh".to_string(),
            columns_max: None,
            rows_max: None,
        }
    }
}
