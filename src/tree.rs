//! Pane tree.
//!
//! An arena of pane records indexed by stable [`NodeId`]s. The host owns the
//! rendered panes; nodes here are lightweight handles plus a role tag, with a
//! back-reference to the node they were split from. Index-based links keep
//! the column-tail bookkeeping free of reference cycles.

use crate::host::PaneId;

/// Stable index of a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Whether a pane carries a real connection or is grid filler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneRole {
    /// Bound to the pane spec at this launch index.
    Real {
        /// Index into the launch-order spec list.
        spec_index: usize,
    },
    /// Filler keeping the grid rectangular.
    Placeholder,
}

/// One pane record.
#[derive(Debug, Clone)]
pub struct PaneNode {
    /// Host-side pane handle.
    pub pane: PaneId,
    /// Real or placeholder.
    pub role: PaneRole,
    /// Node this pane was split from; `None` for the root.
    pub split_from: Option<NodeId>,
}

impl PaneNode {
    /// Returns true for real (non-placeholder) panes.
    #[must_use]
    pub fn is_real(&self) -> bool {
        matches!(self.role, PaneRole::Real { .. })
    }
}

/// Arena of pane records for one built window.
#[derive(Debug, Default)]
pub struct PaneTree {
    nodes: Vec<PaneNode>,
}

impl PaneTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node, returning its id.
    pub fn insert(
        &mut self,
        pane: PaneId,
        role: PaneRole,
        split_from: Option<NodeId>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(PaneNode {
            pane,
            role,
            split_from,
        });
        id
    }

    /// Returns the node for `id`.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &PaneNode {
        &self.nodes[id.0]
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when no panes have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates all nodes in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &PaneNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Host handles of all real panes, in creation order.
    #[must_use]
    pub fn real_panes(&self) -> Vec<PaneId> {
        self.nodes
            .iter()
            .filter(|n| n.is_real())
            .map(|n| n.pane.clone())
            .collect()
    }

    /// Number of placeholder panes.
    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        self.nodes.iter().filter(|n| !n.is_real()).count()
    }
}
