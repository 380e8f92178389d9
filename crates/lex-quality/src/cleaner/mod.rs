//! Cleaning operations for the working grid.
//!
//! This module provides three transformations:
//! - Removing empty rows
//! - Removing duplicate rows
//! - Nulling out z-score outliers
//!
//! Operations work on the session's current grid, never on the raw grid,
//! and always keep the header row. Running an operation a second time is
//! handled by the [`crate::Session`], which replays the first result.

mod outliers;
mod rows;

pub use outliers::{ColumnOutlierSummary, OutlierSummary};

use crate::config::QualityConfig;
use crate::types::Grid;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// A named cleaning operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleaningOperation {
    RemoveEmptyRows,
    RemoveDuplicateRows,
    DetectOutliers,
}

impl CleaningOperation {
    pub const ALL: [CleaningOperation; 3] = [
        CleaningOperation::RemoveEmptyRows,
        CleaningOperation::RemoveDuplicateRows,
        CleaningOperation::DetectOutliers,
    ];

    /// Name shown in the operation log.
    pub fn display_name(&self) -> &'static str {
        match self {
            CleaningOperation::RemoveEmptyRows => "Remove Empty Rows",
            CleaningOperation::RemoveDuplicateRows => "Remove Duplicate Rows",
            CleaningOperation::DetectOutliers => "Detect Outliers",
        }
    }
}

impl fmt::Display for CleaningOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for CleaningOperation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "remove_empty_rows" | "empty_rows" => Ok(CleaningOperation::RemoveEmptyRows),
            "remove_duplicate_rows" | "duplicate_rows" | "duplicates" => {
                Ok(CleaningOperation::RemoveDuplicateRows)
            }
            "detect_outliers" | "outliers" => Ok(CleaningOperation::DetectOutliers),
            other => Err(format!("Unknown cleaning operation: {}", other)),
        }
    }
}

/// What an operation did to the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CleaningOutcome {
    RowsRemoved { removed: usize },
    OutliersNulled(OutlierSummary),
}

impl CleaningOutcome {
    /// First line of the user-facing message.
    pub fn headline(&self, operation: CleaningOperation) -> String {
        match self {
            CleaningOutcome::RowsRemoved { removed } => {
                let kind = match operation {
                    CleaningOperation::RemoveDuplicateRows => "duplicate",
                    _ => "empty",
                };
                format!(
                    "Removed {} {} row{}.",
                    removed,
                    kind,
                    if *removed == 1 { "" } else { "s" }
                )
            }
            CleaningOutcome::OutliersNulled(summary) => {
                if summary.total_outliers == 0 {
                    "No outliers detected.".to_string()
                } else {
                    let columns: Vec<String> = summary
                        .columns
                        .iter()
                        .map(|c| {
                            format!(
                                "{}: {} (mean {:.2}, std dev {:.2})",
                                c.name, c.outlier_count, c.mean, c.std_dev
                            )
                        })
                        .collect();
                    format!(
                        "Replaced {} outliers with empty cells. {}",
                        summary.total_outliers,
                        columns.join("; ")
                    )
                }
            }
        }
    }
}

/// Stateless cleaning operations over a grid.
pub struct DataCleaner;

impl DataCleaner {
    /// Apply one operation to `grid` in place.
    pub fn apply(
        grid: &mut Grid,
        operation: CleaningOperation,
        config: &QualityConfig,
    ) -> CleaningOutcome {
        info!("Applying cleaning operation: {}", operation);

        let outcome = match operation {
            CleaningOperation::RemoveEmptyRows => CleaningOutcome::RowsRemoved {
                removed: rows::remove_empty_rows(grid),
            },
            CleaningOperation::RemoveDuplicateRows => CleaningOutcome::RowsRemoved {
                removed: rows::remove_duplicate_rows(grid),
            },
            CleaningOperation::DetectOutliers => {
                CleaningOutcome::OutliersNulled(outliers::detect_outliers(grid, config))
            }
        };

        info!("{}", outcome.headline(operation));
        outcome
    }
}
