//! tmux integration.
//!
//! Drives a tmux server through one-shot `tmux` subprocess calls. Pane and
//! window handles are tmux's own stable ids (`%n`, `@n`). Termination events
//! come from a background task that polls the server's pane set and reports
//! panes that disappear.

use std::collections::BTreeSet;
use std::process::Output;
use std::time::Duration;

use tokio::process::Command;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, trace};

use super::{HostError, PaneConfig, PaneHost, PaneId, SessionInfo, SplitDirection, WindowId};

/// Interval between pane-set polls for termination detection.
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Buffered termination events before the poller blocks.
const EVENT_BUFFER: usize = 64;

/// Field separator for tmux format strings (titles may contain spaces).
const FIELD_SEP: char = '\t';

/// A tmux server reached through the `tmux` binary.
#[derive(Debug, Clone)]
pub struct TmuxHost {
    binary: String,
}

impl TmuxHost {
    /// Creates a host that talks to the default `tmux` binary on `$PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_binary("tmux")
    }

    /// Creates a host that talks to a specific tmux binary.
    #[must_use]
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Returns true when we are already inside a tmux client.
    fn inside_session() -> bool {
        std::env::var_os("TMUX").is_some()
    }

    async fn run(&self, args: &[&str]) -> Result<String, HostError> {
        run_with(&self.binary, args).await
    }

    async fn set_title(&self, pane: &PaneId, title: &str) -> Result<(), HostError> {
        self.run(&["select-pane", "-t", pane.as_str(), "-T", title])
            .await?;
        Ok(())
    }

    /// Snapshot of every pane id the server currently knows.
    async fn pane_set(binary: &str) -> Result<BTreeSet<PaneId>, HostError> {
        let out = run_with(binary, &["list-panes", "-a", "-F", "#{pane_id}"]).await?;
        Ok(out.lines().map(PaneId::new).collect())
    }
}

impl Default for TmuxHost {
    fn default() -> Self {
        Self::new()
    }
}

impl PaneHost for TmuxHost {
    async fn launch_application(&self) -> Result<(), HostError> {
        self.run(&["start-server"]).await?;
        Ok(())
    }

    async fn create_window(&self, config: &PaneConfig) -> Result<(WindowId, PaneId), HostError> {
        let format = format!("#{{window_id}}{}#{{pane_id}}", FIELD_SEP);
        let out = if Self::inside_session() {
            self.run(&["new-window", "-P", "-F", format.as_str(), config.command.as_str()])
                .await?
        } else {
            self.run(&["new-session", "-d", "-P", "-F", format.as_str(), config.command.as_str()])
                .await?
        };
        let (window, pane) = parse_window_pane(out.trim())?;
        self.set_title(&pane, &config.title).await?;
        debug!(%window, %pane, "created window");
        Ok((window, pane))
    }

    async fn split(
        &self,
        origin: &PaneId,
        direction: SplitDirection,
        config: &PaneConfig,
    ) -> Result<PaneId, HostError> {
        // tmux names splits after the motion, not the divider: -h puts the
        // new pane to the right, -v puts it below.
        let flag = match direction {
            SplitDirection::Vertical => "-h",
            SplitDirection::Horizontal => "-v",
        };
        let out = self
            .run(&[
                "split-window",
                flag,
                "-t",
                origin.as_str(),
                "-P",
                "-F",
                "#{pane_id}",
                config.command.as_str(),
            ])
            .await?;
        let pane = PaneId::new(out.trim());
        if pane.as_str().is_empty() {
            return Err(HostError::MalformedOutput(
                "split-window returned no pane id".to_string(),
            ));
        }
        self.set_title(&pane, &config.title).await?;
        debug!(origin = %origin, new = %pane, ?direction, "split pane");
        Ok(pane)
    }

    async fn list_sessions(&self) -> Result<Vec<SessionInfo>, HostError> {
        let format = format!(
            "#{{window_id}}{sep}#{{pane_id}}{sep}#{{pane_title}}",
            sep = FIELD_SEP
        );
        let out = self.run(&["list-panes", "-a", "-F", format.as_str()]).await?;
        out.lines().map(parse_session_line).collect()
    }

    async fn register_broadcast_group(
        &self,
        window: &WindowId,
        panes: &[PaneId],
    ) -> Result<(), HostError> {
        // synchronize-panes is window-scoped, so input is disabled on every
        // pane in the window that is not part of the group (placeholders).
        self.run(&[
            "set-window-option",
            "-t",
            window.as_str(),
            "synchronize-panes",
            "on",
        ])
        .await?;
        for info in self.list_sessions().await? {
            if info.window == *window && !panes.contains(&info.pane) {
                self.run(&["select-pane", "-t", info.pane.as_str(), "-d"])
                    .await?;
            }
        }
        Ok(())
    }

    async fn subscribe_terminations(&self) -> Result<ReceiverStream<PaneId>, HostError> {
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        let binary = self.binary.clone();
        let mut known = Self::pane_set(&binary).await?;
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(POLL_INTERVAL).await;
                let current = match Self::pane_set(&binary).await {
                    Ok(set) => set,
                    // Server gone: drop the sender so the stream ends.
                    Err(_) => return,
                };
                for gone in known.difference(&current) {
                    trace!(pane = %gone, "pane disappeared");
                    if tx.send(gone.clone()).await.is_err() {
                        return;
                    }
                }
                known = current;
            }
        });
        Ok(ReceiverStream::new(rx))
    }

    async fn close_pane(&self, pane: &PaneId) -> Result<(), HostError> {
        self.run(&["kill-pane", "-t", pane.as_str()]).await?;
        Ok(())
    }

    async fn arrange_evenly(&self, window: &WindowId) -> Result<(), HostError> {
        self.run(&["select-layout", "-t", window.as_str(), "tiled"])
            .await?;
        Ok(())
    }

    async fn activate_pane(&self, pane: &PaneId) -> Result<(), HostError> {
        self.run(&["select-window", "-t", pane.as_str()]).await?;
        self.run(&["select-pane", "-t", pane.as_str()]).await?;
        Ok(())
    }
}

async fn run_with(binary: &str, args: &[&str]) -> Result<String, HostError> {
    trace!(binary, ?args, "tmux call");
    let Output {
        status,
        stdout,
        stderr,
    } = Command::new(binary).args(args).output().await?;
    if !status.success() {
        return Err(HostError::CommandFailed {
            command: format!("{} {}", binary, args.join(" ")),
            stderr: String::from_utf8_lossy(&stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&stdout).into_owned())
}

fn parse_window_pane(line: &str) -> Result<(WindowId, PaneId), HostError> {
    let mut fields = line.split(FIELD_SEP);
    match (fields.next(), fields.next()) {
        (Some(window), Some(pane)) if !window.is_empty() && !pane.is_empty() => {
            Ok((WindowId::new(window), PaneId::new(pane)))
        }
        _ => Err(HostError::MalformedOutput(format!(
            "expected 'window<TAB>pane', got '{line}'"
        ))),
    }
}

fn parse_session_line(line: &str) -> Result<SessionInfo, HostError> {
    let mut fields = line.splitn(3, FIELD_SEP);
    match (fields.next(), fields.next(), fields.next()) {
        (Some(window), Some(pane), Some(title)) if !window.is_empty() && !pane.is_empty() => {
            Ok(SessionInfo {
                window: WindowId::new(window),
                pane: PaneId::new(pane),
                title: title.to_string(),
            })
        }
        _ => Err(HostError::MalformedOutput(format!(
            "expected 'window<TAB>pane<TAB>title', got '{line}'"
        ))),
    }
}
