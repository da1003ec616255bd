//! Grid planning.
//!
//! Computes a near-square (columns, rows) layout for a pane count, honoring an
//! optional max-columns or max-rows constraint.

use crate::error::Error;

/// A planned grid shape.
///
/// Invariants: `columns * rows >= pane_count` and
/// `columns * (rows - 1) < pane_count` (rows is the minimum needed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPlan {
    /// Number of columns, at least 1.
    pub columns: usize,
    /// Number of rows, at least 1.
    pub rows: usize,
}

impl GridPlan {
    /// Total cells in the grid.
    #[must_use]
    pub fn cells(&self) -> usize {
        self.columns * self.rows
    }
}

/// Plans the grid for `pane_count` panes.
///
/// Without a constraint, columns = floor(sqrt(pane_count)). A `columns_max`
/// at or below that natural width narrows the grid; a larger one is ignored,
/// since honoring it would only make the grid less square. A `rows_max`
/// widens the grid instead: columns = ceil(pane_count / rows_max). Rows are
/// always the minimum for the chosen width.
///
/// # Errors
/// Returns [`Error::InvalidGridConstraint`] when `pane_count` is zero, when a
/// constraint is below 1, or when both constraints are given.
pub fn plan(
    pane_count: usize,
    columns_max: Option<usize>,
    rows_max: Option<usize>,
) -> Result<GridPlan, Error> {
    if pane_count == 0 {
        return Err(Error::InvalidGridConstraint(
            "at least one pane is required".to_string(),
        ));
    }
    if columns_max.is_some() && rows_max.is_some() {
        return Err(Error::InvalidGridConstraint(
            "columns and rows limits are mutually exclusive".to_string(),
        ));
    }
    if columns_max == Some(0) || rows_max == Some(0) {
        return Err(Error::InvalidGridConstraint(
            "columns/rows limit must be at least 1".to_string(),
        ));
    }

    let mut columns = pane_count.isqrt().max(1);
    if let Some(max) = columns_max {
        if max <= columns {
            columns = max;
        }
    }
    if let Some(max) = rows_max {
        columns = pane_count.div_ceil(max);
    }
    let rows = pane_count.div_ceil(columns);

    Ok(GridPlan { columns, rows })
}
