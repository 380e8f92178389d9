//! Z-score outlier redaction.

use crate::config::QualityConfig;
use crate::quality::pure_numeric_column;
use crate::types::{Cell, Grid, NumericStats, OutlierDetail};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Outliers redacted from one column.
///
/// `mean` and `std_dev` are the exact values the decision was made with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnOutlierSummary {
    pub name: String,
    pub index: usize,
    pub outlier_count: usize,
    pub mean: f64,
    pub std_dev: f64,
    /// Redacted cells with their original values (1-based data rows).
    pub cells: Vec<OutlierDetail>,
}

/// Result of the outlier operation. Only columns with at least one outlier
/// are listed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutlierSummary {
    pub columns: Vec<ColumnOutlierSummary>,
    pub total_outliers: usize,
}

/// Replace z-score outliers with null cells.
///
/// A column is considered only when every present value (null and empty
/// strings are skipped) is numeric, it has at least
/// `config.min_outlier_sample` values and a non-zero spread.
pub(crate) fn detect_outliers(grid: &mut Grid, config: &QualityConfig) -> OutlierSummary {
    let names = grid.column_names();
    let mut summary = OutlierSummary::default();

    for (index, name) in names.iter().enumerate() {
        let Some(cells) = pure_numeric_column(grid, index, config.numeric_rule) else {
            continue;
        };
        if cells.len() < config.min_outlier_sample {
            continue;
        }

        let values: Vec<f64> = cells.iter().map(|(_, v)| *v).collect();
        let Some(stats) = NumericStats::from_values(&values) else {
            continue;
        };

        let flagged: Vec<OutlierDetail> = cells
            .iter()
            .filter_map(|&(row, value)| {
                let z_score = stats.z_score(value)?;
                (z_score.abs() > config.outlier_z_threshold).then_some(OutlierDetail {
                    row,
                    value,
                    z_score,
                })
            })
            .collect();

        if flagged.is_empty() {
            continue;
        }

        let rows = grid.rows_mut();
        for detail in &flagged {
            if let Some(cell) = rows.get_mut(detail.row).and_then(|r| r.get_mut(index)) {
                *cell = Cell::Null;
            }
        }

        debug!(
            "Nulled {} outliers in '{}' (mean {:.2}, std {:.2})",
            flagged.len(),
            name,
            stats.mean,
            stats.std_dev
        );

        summary.total_outliers += flagged.len();
        summary.columns.push(ColumnOutlierSummary {
            name: display_name(name, index),
            index,
            outlier_count: flagged.len(),
            mean: stats.mean,
            std_dev: stats.std_dev,
            cells: flagged,
        });
    }

    summary
}

/// Header name, or `Column {n}` (1-based) for a blank header cell.
fn display_name(name: &str, index: usize) -> String {
    if name.is_empty() {
        format!("Column {}", index + 1)
    } else {
        name.to_string()
    }
}
