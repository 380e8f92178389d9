//! Row-level cleaning: empty rows and duplicate rows.

use crate::types::Grid;
use crate::utils::{is_blank, row_key};
use std::collections::HashSet;

/// Drop data rows whose cells are all blank. The header row is kept.
///
/// Returns the number of rows removed.
pub(crate) fn remove_empty_rows(grid: &mut Grid) -> usize {
    if grid.is_empty() {
        return 0;
    }

    let rows = grid.rows_mut();
    let before = rows.len();
    let mut index = 0;
    rows.retain(|row| {
        let keep = index == 0 || !row.iter().all(is_blank);
        index += 1;
        keep
    });
    before - rows.len()
}

/// Drop data rows that repeat an earlier data row. The first occurrence and
/// the header row are kept.
///
/// Returns the number of rows removed.
pub(crate) fn remove_duplicate_rows(grid: &mut Grid) -> usize {
    if grid.is_empty() {
        return 0;
    }

    let width = grid.width();
    let rows = grid.rows_mut();
    let before = rows.len();
    let mut seen: HashSet<String> = HashSet::new();
    let mut index = 0;
    rows.retain(|row| {
        let keep = index == 0 || seen.insert(row_key(row, width));
        index += 1;
        keep
    });
    before - rows.len()
}
