//! Grid construction.
//!
//! Realizes a [`GridPlan`] against the pane host, one sequenced split at a
//! time. The head row is built left to right by vertical splits off the pane
//! created just before; every later row is built by horizontal splits off the
//! previous row's pane in the same column (the column tail). When the real
//! panes run out, placeholder panes keep the grid rectangular, unless
//! kill-inactive mode leaves those cells empty instead.
//!
//! Any host failure aborts the build: the host offers no rollback primitive,
//! so partial grids are never repaired.

use std::time::Duration;

use tracing::debug;

use crate::config::RunConfig;
use crate::error::Error;
use crate::grid::GridPlan;
use crate::host::{PaneConfig, PaneHost, PaneId, SplitDirection, WindowId};
use crate::hostspec::{PaneSpec, PLACEHOLDER_COMMAND};
use crate::tree::{NodeId, PaneRole, PaneTree};

/// Title given to placeholder panes. No marker: they are not sessions.
const PLACEHOLDER_TITLE: &str = "not in use";

/// A fully built grid.
#[derive(Debug)]
pub struct BuiltGrid {
    /// Window the grid lives in.
    pub window: WindowId,
    /// Record of every pane created.
    pub tree: PaneTree,
    /// Host handle of the first real pane (focused after the build).
    pub first_real: PaneId,
}

impl BuiltGrid {
    /// Host handles of the real panes, in launch order.
    #[must_use]
    pub fn real_panes(&self) -> Vec<PaneId> {
        self.tree.real_panes()
    }

    /// Number of placeholder panes created.
    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        self.tree.placeholder_count()
    }
}

/// Drives the pane host to build one grid.
pub struct GridBuilder<'a, H: PaneHost> {
    host: &'a H,
    config: &'a RunConfig,
    splits_issued: usize,
}

impl<'a, H: PaneHost> GridBuilder<'a, H> {
    /// Creates a builder over `host` with the run's mode flags.
    pub fn new(host: &'a H, config: &'a RunConfig) -> Self {
        Self {
            host,
            config,
            splits_issued: 0,
        }
    }

    /// Builds the grid for `specs` laid out as `plan`.
    ///
    /// Exactly `specs.len()` real panes are created. The remaining
    /// `plan.cells() - specs.len()` cells become placeholders, or stay empty
    /// in kill-inactive mode. Afterwards pane sizes are evened out and the
    /// first real pane is focused.
    ///
    /// # Errors
    /// Returns the first host error; the window is left as-is (no rollback).
    pub async fn build(mut self, specs: &[PaneSpec], plan: &GridPlan) -> Result<BuiltGrid, Error> {
        debug_assert!(!specs.is_empty());
        debug_assert!(plan.columns <= specs.len());
        debug_assert!(specs.len() <= plan.cells());

        let mut tree = PaneTree::new();
        let mut tails: Vec<Option<NodeId>> = vec![None; plan.columns];

        // The head pane opens a fresh window; everything else is a split.
        let (window, root_pane) = self.host.create_window(&real_config(&specs[0])).await?;
        let root = tree.insert(root_pane.clone(), PaneRole::Real { spec_index: 0 }, None);
        tails[0] = Some(root);

        // Head row: vertical splits off the pane created just before.
        let mut current = root;
        for col in 1..plan.columns {
            let node = self
                .split_real(&mut tree, current, SplitDirection::Vertical, &specs[col], col)
                .await?;
            tails[col] = Some(node);
            current = node;
        }

        // Later rows: horizontal splits off each column tail.
        for row in 1..plan.rows {
            for col in 0..plan.columns {
                let index = row * plan.columns + col;
                let Some(origin) = tails[col] else {
                    // Column already ended in kill-inactive mode.
                    continue;
                };
                if index < specs.len() {
                    let node = self
                        .split_real(
                            &mut tree,
                            origin,
                            SplitDirection::Horizontal,
                            &specs[index],
                            index,
                        )
                        .await?;
                    tails[col] = Some(node);
                } else if self.config.kill_inactive {
                    // No filler: the grid is simply short in this cell.
                    tails[col] = None;
                } else {
                    let node = self
                        .split_placeholder(&mut tree, origin, SplitDirection::Horizontal)
                        .await?;
                    tails[col] = Some(node);
                }
            }
        }

        debug!(
            real = tree.real_panes().len(),
            placeholders = tree.placeholder_count(),
            "grid built, tidying up"
        );
        self.host.arrange_evenly(&window).await?;
        self.host.activate_pane(&root_pane).await?;

        Ok(BuiltGrid {
            window,
            tree,
            first_real: root_pane,
        })
    }

    async fn split_real(
        &mut self,
        tree: &mut PaneTree,
        origin: NodeId,
        direction: SplitDirection,
        spec: &PaneSpec,
        spec_index: usize,
    ) -> Result<NodeId, Error> {
        let pane = self
            .split_pane(tree, origin, direction, &real_config(spec))
            .await?;
        Ok(tree.insert(pane, PaneRole::Real { spec_index }, Some(origin)))
    }

    async fn split_placeholder(
        &mut self,
        tree: &mut PaneTree,
        origin: NodeId,
        direction: SplitDirection,
    ) -> Result<NodeId, Error> {
        let config = PaneConfig {
            title: PLACEHOLDER_TITLE.to_string(),
            command: PLACEHOLDER_COMMAND.to_string(),
        };
        let pane = self.split_pane(tree, origin, direction, &config).await?;
        Ok(tree.insert(pane, PaneRole::Placeholder, Some(origin)))
    }

    async fn split_pane(
        &mut self,
        tree: &PaneTree,
        origin: NodeId,
        direction: SplitDirection,
        config: &PaneConfig,
    ) -> Result<PaneId, Error> {
        self.pause_between_splits().await;
        let origin_pane = tree.node(origin).pane.clone();
        let pane = self.host.split(&origin_pane, direction, config).await?;
        self.splits_issued += 1;
        Ok(pane)
    }

    /// Cooperative delay before each split beyond the first.
    async fn pause_between_splits(&self) {
        if self.splits_issued > 0 && self.config.sleep_secs > 0.0 {
            debug!(seconds = self.config.sleep_secs, "inter-pane sleep");
            tokio::time::sleep(Duration::from_secs_f64(self.config.sleep_secs)).await;
        }
    }
}

fn real_config(spec: &PaneSpec) -> PaneConfig {
    PaneConfig {
        title: spec.label.clone(),
        command: spec.command.clone(),
    }
}
