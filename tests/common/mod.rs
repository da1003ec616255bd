//! Shared test support: an in-memory pane host.
//!
//! Records every operation the grid engine issues and lets tests inject
//! failures and termination events, so build and reaper behavior can be
//! verified without a tmux server.

#![allow(dead_code)] // not every test file uses every helper

use std::sync::Mutex;

use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use sshgrid::host::{
    HostError, PaneConfig, PaneHost, PaneId, SessionInfo, SplitDirection, WindowId,
};

/// One pane the mock has created.
#[derive(Debug, Clone)]
pub struct CreatedPane {
    pub id: PaneId,
    pub window: WindowId,
    pub title: String,
    pub command: String,
    pub split_from: Option<PaneId>,
    pub direction: Option<SplitDirection>,
    pub open: bool,
}

/// Recorded mock state.
#[derive(Debug, Default)]
pub struct MockState {
    next_id: u64,
    pub launched: bool,
    pub panes: Vec<CreatedPane>,
    pub broadcast_groups: Vec<(WindowId, Vec<PaneId>)>,
    pub arranged: Vec<WindowId>,
    pub activated: Vec<PaneId>,
    /// When set, the nth split call (0-based) fails.
    pub fail_on_split: Option<usize>,
    pub splits_seen: usize,
}

/// Scripted in-memory [`PaneHost`].
#[derive(Default)]
pub struct MockHost {
    pub state: Mutex<MockState>,
    events: Mutex<Option<mpsc::Sender<PaneId>>>,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the nth split call (0-based) fail.
    pub fn fail_on_split(&self, nth: usize) {
        self.state.lock().unwrap().fail_on_split = Some(nth);
    }

    /// Adds a pane as if some other tool had created it.
    pub fn seed_pane(&self, window: &str, title: &str) -> PaneId {
        let mut state = self.state.lock().unwrap();
        let id = PaneId::new(format!("%{}", state.next_id));
        state.next_id += 1;
        state.panes.push(CreatedPane {
            id: id.clone(),
            window: WindowId::new(window),
            title: title.to_string(),
            command: String::new(),
            split_from: None,
            direction: None,
            open: true,
        });
        id
    }

    /// Delivers a termination event to an active subscription.
    pub async fn terminate(&self, pane: &PaneId) {
        let sender = self
            .events
            .lock()
            .unwrap()
            .clone()
            .expect("no termination subscription");
        sender.send(pane.clone()).await.expect("subscriber gone");
    }

    /// Ends the termination stream, as if the host went away.
    pub fn drop_stream(&self) {
        self.events.lock().unwrap().take();
    }

    /// Titles of all created panes, in creation order.
    pub fn titles(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .panes
            .iter()
            .map(|p| p.title.clone())
            .collect()
    }

    /// Panes still open.
    pub fn open_panes(&self) -> Vec<PaneId> {
        self.state
            .lock()
            .unwrap()
            .panes
            .iter()
            .filter(|p| p.open)
            .map(|p| p.id.clone())
            .collect()
    }

    fn fresh_pane(
        state: &mut MockState,
        window: WindowId,
        config: &PaneConfig,
        split_from: Option<PaneId>,
        direction: Option<SplitDirection>,
    ) -> PaneId {
        let id = PaneId::new(format!("%{}", state.next_id));
        state.next_id += 1;
        state.panes.push(CreatedPane {
            id: id.clone(),
            window,
            title: config.title.clone(),
            command: config.command.clone(),
            split_from,
            direction,
            open: true,
        });
        id
    }
}

impl PaneHost for MockHost {
    async fn launch_application(&self) -> Result<(), HostError> {
        self.state.lock().unwrap().launched = true;
        Ok(())
    }

    async fn create_window(&self, config: &PaneConfig) -> Result<(WindowId, PaneId), HostError> {
        let mut state = self.state.lock().unwrap();
        let window = WindowId::new("@0");
        let pane = Self::fresh_pane(&mut state, window.clone(), config, None, None);
        Ok((window, pane))
    }

    async fn split(
        &self,
        origin: &PaneId,
        direction: SplitDirection,
        config: &PaneConfig,
    ) -> Result<PaneId, HostError> {
        let mut state = self.state.lock().unwrap();
        let nth = state.splits_seen;
        state.splits_seen += 1;
        if state.fail_on_split == Some(nth) {
            return Err(HostError::CommandFailed {
                command: "split".to_string(),
                stderr: "injected failure".to_string(),
            });
        }
        let window = state
            .panes
            .iter()
            .find(|p| p.id == *origin)
            .map(|p| p.window.clone())
            .ok_or_else(|| HostError::MalformedOutput(format!("unknown origin {origin}")))?;
        Ok(Self::fresh_pane(
            &mut state,
            window,
            config,
            Some(origin.clone()),
            Some(direction),
        ))
    }

    async fn list_sessions(&self) -> Result<Vec<SessionInfo>, HostError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .panes
            .iter()
            .filter(|p| p.open)
            .map(|p| SessionInfo {
                window: p.window.clone(),
                pane: p.id.clone(),
                title: p.title.clone(),
            })
            .collect())
    }

    async fn register_broadcast_group(
        &self,
        window: &WindowId,
        panes: &[PaneId],
    ) -> Result<(), HostError> {
        self.state
            .lock()
            .unwrap()
            .broadcast_groups
            .push((window.clone(), panes.to_vec()));
        Ok(())
    }

    async fn subscribe_terminations(&self) -> Result<ReceiverStream<PaneId>, HostError> {
        let (tx, rx) = mpsc::channel(16);
        *self.events.lock().unwrap() = Some(tx);
        Ok(ReceiverStream::new(rx))
    }

    async fn close_pane(&self, pane: &PaneId) -> Result<(), HostError> {
        let mut state = self.state.lock().unwrap();
        match state.panes.iter_mut().find(|p| p.id == *pane && p.open) {
            Some(entry) => {
                entry.open = false;
                Ok(())
            }
            None => Err(HostError::CommandFailed {
                command: format!("close-pane {pane}"),
                stderr: "can't find pane".to_string(),
            }),
        }
    }

    async fn arrange_evenly(&self, window: &WindowId) -> Result<(), HostError> {
        self.state.lock().unwrap().arranged.push(window.clone());
        Ok(())
    }

    async fn activate_pane(&self, pane: &PaneId) -> Result<(), HostError> {
        self.state.lock().unwrap().activated.push(pane.clone());
        Ok(())
    }
}
