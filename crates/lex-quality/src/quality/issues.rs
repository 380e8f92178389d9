//! Cell-level issue map.

use crate::types::{CellIssue, CellIssueMap, ColumnAnalysis};

/// Flatten per-column findings into one `(row, column) -> issue` lookup.
///
/// Missing entries are written first and outlier entries second, so if a
/// cell were ever flagged as both the outlier entry would replace the
/// missing one. With a single classifier a missing cell is never numeric,
/// so the two sets do not overlap in practice.
pub fn build_cell_issue_map(columns: &[ColumnAnalysis]) -> CellIssueMap {
    let mut issues = CellIssueMap::new();

    for column in columns {
        for &row in &column.quality.missing_indices {
            issues.insert(row, column.index, CellIssue::Missing);
        }
        for &row in &column.quality.outlier_indices {
            issues.insert(row, column.index, CellIssue::Outlier);
        }
    }

    issues
}
