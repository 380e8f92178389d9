//! Column-level analysis: type distribution, missing map, stats, outliers.

use super::type_inference::classify_cell;
use crate::config::QualityConfig;
use crate::types::{
    CellType, ColumnAnalysis, ColumnQuality, ColumnType, Grid, NumericStats, OutlierDetail,
    TypeDistribution,
};
use tracing::debug;

/// Analyze one column of the grid in a single pass over the data rows.
///
/// Row indices in the result are 1-based data row indices.
pub(crate) fn analyze_column(grid: &Grid, index: usize, config: &QualityConfig) -> ColumnAnalysis {
    let name = grid
        .header()
        .and_then(|h| h.get(index))
        .map(ToString::to_string)
        .unwrap_or_default();

    let mut distribution = TypeDistribution::default();
    let mut missing_indices = Vec::new();
    // (row, value) for every numeric cell
    let mut numeric_cells: Vec<(usize, f64)> = Vec::new();

    for row in 0..grid.data_row_count() {
        let cell = grid.cell(row, index);
        let cell_type = classify_cell(cell, config.numeric_rule);
        match cell_type {
            CellType::Empty => missing_indices.push(row + 1),
            CellType::Numeric => {
                if let Some(value) = config.numeric_rule.parse(cell) {
                    numeric_cells.push((row + 1, value));
                }
            }
            _ => {}
        }
        distribution.record(cell_type);
    }

    let dominant_type = dominant_type(&distribution);

    let numeric_stats = if dominant_type == Some(ColumnType::Numeric) {
        let values: Vec<f64> = numeric_cells.iter().map(|(_, v)| *v).collect();
        NumericStats::from_values(&values)
    } else {
        None
    };

    let outlier_details: Vec<OutlierDetail> = numeric_stats
        .map(|stats| {
            numeric_cells
                .iter()
                .filter_map(|&(row, value)| {
                    let z_score = stats.z_score(value)?;
                    (z_score.abs() > config.outlier_z_threshold).then_some(OutlierDetail {
                        row,
                        value,
                        z_score,
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    debug!(
        "Column '{}' ({}): dominant {:?}, {} missing, {} outliers",
        name,
        index,
        dominant_type,
        missing_indices.len(),
        outlier_details.len()
    );

    ColumnAnalysis {
        name,
        index,
        dominant_type,
        type_distribution: distribution,
        numeric_stats,
        quality: ColumnQuality {
            missing_count: missing_indices.len(),
            missing_indices,
            outlier_count: outlier_details.len(),
            outlier_indices: outlier_details.iter().map(|d| d.row).collect(),
            outlier_details,
        },
    }
}

/// Most frequent non-empty type, `Mixed` when several are present, `None`
/// when the column is entirely empty.
pub(crate) fn dominant_type(distribution: &TypeDistribution) -> Option<ColumnType> {
    match distribution.present_types().as_slice() {
        [] => None,
        [single] => Some(*single),
        _ => Some(ColumnType::Mixed),
    }
}
