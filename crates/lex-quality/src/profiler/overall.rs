//! Dataset-level analysis: empty rows and duplicate rows.

use crate::types::{Grid, OverallAnalysis};
use crate::utils::{MissingRule, row_key};
use std::collections::HashMap;

/// Compute totals, empty-row indices and duplicate-row indices.
///
/// A row is empty when every cell it holds is missing, including cells past
/// the header. A row
/// is a duplicate when an earlier row has the same canonical key; the first
/// occurrence is never reported. Indices are 1-based data row indices.
pub(crate) fn analyze_overall(grid: &Grid) -> OverallAnalysis {
    let width = grid.width();
    let mut empty_row_indices = Vec::new();
    let mut duplicate_row_indices = Vec::new();
    // key -> first row index that produced it
    let mut seen: HashMap<String, usize> = HashMap::new();

    for (i, row) in grid.data_rows().iter().enumerate() {
        let row_index = i + 1;

        // Absent trailing cells of a short row are missing too
        if row.iter().all(|cell| MissingRule::Structural.is_missing(cell)) {
            empty_row_indices.push(row_index);
        }

        let key = row_key(row, width);
        if seen.contains_key(&key) {
            duplicate_row_indices.push(row_index);
        } else {
            seen.insert(key, row_index);
        }
    }

    let has_issues = !empty_row_indices.is_empty() || !duplicate_row_indices.is_empty();

    OverallAnalysis {
        total_rows: grid.data_row_count(),
        total_columns: width,
        empty_row_indices,
        duplicate_row_indices,
        has_issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_duplicates_keep_first_occurrence() {
        let grid = Grid::from_rows(vec![
            vec!["a", "b"],
            vec!["1", "x"],
            vec!["2", "y"],
            vec!["1", "x"],
            vec!["1", "x"],
        ]);
        let overall = analyze_overall(&grid);

        assert_eq!(overall.total_rows, 4);
        assert_eq!(overall.total_columns, 2);
        assert_eq!(overall.duplicate_row_indices, vec![3, 4]);
        assert!(overall.empty_row_indices.is_empty());
        assert!(overall.has_issues);
    }

    #[test]
    fn test_duplicates_are_type_sensitive() {
        let grid = Grid::new(vec![
            vec![Cell::text("a")],
            vec![Cell::Number(1.0)],
            vec![Cell::text("1")],
        ]);
        let overall = analyze_overall(&grid);
        assert!(overall.duplicate_row_indices.is_empty());
        assert!(!overall.has_issues);
    }

    #[test]
    fn test_empty_rows() {
        let grid = Grid::new(vec![
            vec![Cell::text("a"), Cell::text("b")],
            vec![Cell::text(""), Cell::Null],
            vec![Cell::text("v")],
            vec![Cell::text("")],
            vec![],
            vec![Cell::text("   ")],
        ]);
        let overall = analyze_overall(&grid);

        assert_eq!(overall.empty_row_indices, vec![1, 3, 4, 5]);
        // Rows 3 and 4 both pad to ["", ""]; row 1 holds a null instead
        assert_eq!(overall.duplicate_row_indices, vec![4]);
    }

    #[test]
    fn test_value_past_header_keeps_row() {
        let grid = Grid::from_rows(vec![
            vec!["a", "b"],
            vec!["1", "2"],
            vec!["", "", "x"],
            vec!["", "", " "],
        ]);
        let overall = analyze_overall(&grid);
        assert_eq!(overall.empty_row_indices, vec![3]);
    }
}
