//! Data profiling module for grid analysis.
//!
//! This module provides the single-pass analyzer that turns a raw grid into
//! [`AnalysisResults`]:
//! - Per-cell type classification
//! - Per-column type distribution, missing map, numeric stats and z-score outliers
//! - Dataset-level empty and duplicate rows
//! - The cell issue map consumed by the annotated export

mod column;
mod overall;
mod statistics;
mod type_inference;

use crate::config::QualityConfig;
use crate::error::{QualityError, Result};
use crate::quality::build_cell_issue_map;
use crate::types::{AnalysisResults, ColumnAnalysis, Grid};
use tracing::{debug, info};

pub use type_inference::classify_cell;

pub(crate) use type_inference::classify_present;

/// Data profiler for analyzing grid structure and quality facts.
pub struct DataProfiler;

impl DataProfiler {
    /// Analyze a raw grid.
    ///
    /// Fails with [`QualityError::EmptyDataset`] for a grid without rows and
    /// [`QualityError::InsufficientData`] for a header-only grid. The input
    /// grid is never modified.
    pub fn analyze(grid: &Grid, config: &QualityConfig) -> Result<AnalysisResults> {
        ensure_analyzable(grid)?;

        info!(
            "Analyzing {} data rows x {} columns",
            grid.data_row_count(),
            grid.width()
        );

        let overall = overall::analyze_overall(grid);
        let columns = Self::analyze_columns(grid, config);
        let cell_issues = build_cell_issue_map(&columns);

        debug!(
            "Analysis complete: {} empty rows, {} duplicate rows, {} flagged cells",
            overall.empty_row_indices.len(),
            overall.duplicate_row_indices.len(),
            cell_issues.len()
        );

        Ok(AnalysisResults {
            overall,
            columns,
            cell_issues,
        })
    }

    /// Analyze every column in header order.
    pub fn analyze_columns(grid: &Grid, config: &QualityConfig) -> Vec<ColumnAnalysis> {
        (0..grid.width())
            .map(|index| column::analyze_column(grid, index, config))
            .collect()
    }
}

/// Shape preconditions shared by analysis and scoring.
pub(crate) fn ensure_analyzable(grid: &Grid) -> Result<()> {
    match grid.len() {
        0 => Err(QualityError::EmptyDataset),
        1 => Err(QualityError::InsufficientData),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CellIssue, ColumnType};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rejects_empty_and_header_only() {
        let config = QualityConfig::default();
        assert!(matches!(
            DataProfiler::analyze(&Grid::default(), &config),
            Err(QualityError::EmptyDataset)
        ));
        assert!(matches!(
            DataProfiler::analyze(&Grid::from_rows(vec![vec!["a"]]), &config),
            Err(QualityError::InsufficientData)
        ));
    }

    #[test]
    fn test_full_analysis() {
        let grid = Grid::from_rows(vec![
            vec!["name", "age"],
            vec!["Ada", "36"],
            vec!["", "41"],
            vec!["Ada", "36"],
        ]);
        let results = DataProfiler::analyze(&grid, &QualityConfig::default()).unwrap();

        assert_eq!(results.overall.duplicate_row_indices, vec![3]);
        assert_eq!(results.columns.len(), 2);
        assert_eq!(
            results.column("age").unwrap().dominant_type,
            Some(ColumnType::Numeric)
        );
        assert_eq!(results.column("name").unwrap().quality.missing_indices, vec![2]);
        assert_eq!(results.cell_issues.get(2, 0), Some(CellIssue::Missing));
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let grid = Grid::from_rows(vec![vec!["x", "y"], vec!["1", "a"], vec!["2", ""]]);
        let config = QualityConfig::default();
        let first = DataProfiler::analyze(&grid, &config).unwrap();
        let second = DataProfiler::analyze(&grid, &config).unwrap();
        assert_eq!(first, second);
    }
}
