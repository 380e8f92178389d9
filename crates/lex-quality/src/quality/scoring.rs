//! Four-dimension quality scoring.
//!
//! Each dimension is scored independently from the raw grid:
//!
//! | Dimension    | Unit   | Missing rule   | Not applicable when          |
//! |--------------|--------|----------------|------------------------------|
//! | uniqueness   | rows   | -              | never                        |
//! | completeness | column | explicit only  | grid has no columns          |
//! | accuracy     | column | explicit only  | no purely numeric column     |
//! | consistency  | column | explicit only  | grid has no columns          |
//!
//! Column-based dimensions are combined with a penalty: the average column
//! rate is multiplied by `sqrt(min / 100)`, so one bad column drags the
//! whole dimension down. A single column at 0 zeroes the dimension.

use crate::config::QualityConfig;
use crate::error::Result;
use crate::profiler::{classify_present, ensure_analyzable};
use crate::types::{
    ColumnScore, ColumnScores, DimensionScores, Grid, NumericStats, ScoreResult,
    ScoreWarning, TypeDistribution,
};
use crate::utils::{MissingRule, NumericRule, row_key};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Unrounded rate for one column within one dimension.
#[derive(Debug, Clone)]
struct ColumnRate {
    index: usize,
    name: String,
    rate: f64,
}

impl ColumnRate {
    fn to_score(&self) -> ColumnScore {
        ColumnScore {
            column: self.name.clone(),
            index: self.index,
            score: to_score(self.rate),
        }
    }
}

/// Scoring engine for the four quality dimensions.
pub struct ScoringEngine;

impl ScoringEngine {
    /// Score a raw grid.
    ///
    /// Fails with [`crate::QualityError::EmptyDataset`] or
    /// [`crate::QualityError::InsufficientData`] when there is nothing to
    /// score. Rows shorter than the header are read as if padded with empty
    /// strings.
    pub fn score(grid: &Grid, config: &QualityConfig) -> Result<ScoreResult> {
        ensure_analyzable(grid)?;

        let width = grid.width();
        let short_rows = grid
            .data_rows()
            .iter()
            .filter(|row| row.len() < width)
            .count();
        if short_rows > 0 {
            debug!(
                "Padding {} rows shorter than the {}-column header",
                short_rows, width
            );
        }

        let names = grid.column_names();

        let uniqueness = Self::uniqueness(grid);
        let completeness = Self::completeness_rates(grid, &names);
        let accuracy = Self::accuracy_rates(grid, &names, config);
        let consistency = Self::consistency_rates(grid, &names, config.numeric_rule);

        let mut warnings = Vec::new();
        if accuracy.is_empty() {
            warn!("No purely numeric columns; accuracy dimension not applicable");
            warnings.push(ScoreWarning::NoNumericColumns);
        }

        let dimensions = DimensionScores {
            uniqueness,
            completeness: penalized_score(&rates(&completeness)),
            accuracy: penalized_score(&rates(&accuracy)),
            consistency: penalized_score(&rates(&consistency)),
        };

        let applicable = dimensions.applicable();
        let score = if applicable.is_empty() {
            0
        } else {
            let total: f64 = applicable.iter().map(|s| f64::from(*s)).sum();
            to_score(total / applicable.len() as f64)
        };

        debug!(
            "Scored dataset: overall {}, dimensions {:?}",
            score, dimensions
        );

        Ok(ScoreResult {
            score,
            dimensions,
            column_scores: ColumnScores {
                completeness: completeness.iter().map(ColumnRate::to_score).collect(),
                accuracy: accuracy.iter().map(ColumnRate::to_score).collect(),
                consistency: consistency.iter().map(ColumnRate::to_score).collect(),
            },
            warnings,
        })
    }

    /// Share of distinct rows, 0-100.
    pub fn uniqueness(grid: &Grid) -> u8 {
        let total = grid.data_row_count();
        if total == 0 {
            return 100;
        }
        let width = grid.width();
        let distinct: HashSet<String> = grid
            .data_rows()
            .iter()
            .map(|row| row_key(row, width))
            .collect();
        to_score(distinct.len() as f64 / total as f64 * 100.0)
    }

    fn completeness_rates(grid: &Grid, names: &[String]) -> Vec<ColumnRate> {
        let total = grid.data_row_count() as f64;
        names
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let missing = (0..grid.data_row_count())
                    .filter(|&row| MissingRule::ExplicitOnly.is_missing(grid.cell(row, index)))
                    .count();
                ColumnRate {
                    index,
                    name: name.clone(),
                    rate: (1.0 - missing as f64 / total) * 100.0,
                }
            })
            .collect()
    }

    fn accuracy_rates(grid: &Grid, names: &[String], config: &QualityConfig) -> Vec<ColumnRate> {
        names
            .iter()
            .enumerate()
            .filter_map(|(index, name)| {
                let values: Vec<f64> = pure_numeric_column(grid, index, config.numeric_rule)?
                    .into_iter()
                    .map(|(_, v)| v)
                    .collect();
                let stats = NumericStats::from_values(&values)?;
                let outliers = stats.count_outliers(&values, config.outlier_z_threshold);
                debug!(
                    "Accuracy '{}': {} values, {} outliers",
                    name,
                    values.len(),
                    outliers
                );
                Some(ColumnRate {
                    index,
                    name: name.clone(),
                    rate: (values.len() - outliers) as f64 / values.len() as f64 * 100.0,
                })
            })
            .collect()
    }

    fn consistency_rates(grid: &Grid, names: &[String], rule: NumericRule) -> Vec<ColumnRate> {
        names
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let mut votes = TypeDistribution::default();
                for row in 0..grid.data_row_count() {
                    let cell = grid.cell(row, index);
                    if MissingRule::ExplicitOnly.is_missing(cell) {
                        continue;
                    }
                    votes.record(classify_present(cell, rule));
                }

                let present = votes.total();
                let rate = if present == 0 {
                    100.0
                } else {
                    votes.max_count() as f64 / present as f64 * 100.0
                };
                ColumnRate {
                    index,
                    name: name.clone(),
                    rate,
                }
            })
            .collect()
    }
}

/// Numeric values of a column with their 1-based data row index, or `None`
/// when any present value fails the numeric rule.
///
/// Only null and empty-string cells are skipped; a whitespace-only cell is
/// present and, not being a number, disqualifies the column.
pub(crate) fn pure_numeric_column(
    grid: &Grid,
    column: usize,
    rule: NumericRule,
) -> Option<Vec<(usize, f64)>> {
    let mut values = Vec::new();
    for row in 0..grid.data_row_count() {
        let cell = grid.cell(row, column);
        if MissingRule::ExplicitOnly.is_missing(cell) {
            continue;
        }
        values.push((row + 1, rule.parse(cell)?));
    }
    Some(values)
}

/// `round(avg * sqrt(min / 100))` over unrounded column rates.
///
/// Returns `None` when there are no columns to aggregate.
pub fn penalized_score(rates: &[f64]) -> Option<u8> {
    if rates.is_empty() {
        return None;
    }
    let avg = rates.iter().sum::<f64>() / rates.len() as f64;
    let min = rates.iter().copied().fold(f64::INFINITY, f64::min);
    Some(to_score(avg * (min / 100.0).sqrt()))
}

fn rates(columns: &[ColumnRate]) -> Vec<f64> {
    columns.iter().map(|c| c.rate).collect()
}

/// Round half away from zero and clamp to 0-100.
fn to_score(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}
