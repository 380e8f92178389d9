//! Annotated export plan.
//!
//! Describes which cells of the raw grid to highlight and which notes to
//! attach, so that a spreadsheet writer can render the sheet without
//! re-deriving any quality facts.

use crate::types::{AnalysisResults, CellIssue, Grid};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Highlight colour of an annotated cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Highlight {
    Blue,
    Yellow,
    Red,
}

impl Highlight {
    /// ARGB fill used by spreadsheet writers.
    pub fn argb(&self) -> &'static str {
        match self {
            Highlight::Blue => "9CC3FF",
            Highlight::Yellow => "FFEB9C",
            Highlight::Red => "FF9999",
        }
    }

    pub fn legend_label(&self) -> &'static str {
        match self {
            Highlight::Blue => "Blue - Empty Rows",
            Highlight::Yellow => "Yellow - Missing Values",
            Highlight::Red => "Red - Outliers",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub highlight: Highlight,
    pub argb: String,
    pub label: String,
}

/// A highlighted cell. `row` is the 1-based data row, `column` zero-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellMark {
    pub row: usize,
    pub column: usize,
    pub highlight: Highlight,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationCounts {
    pub empty_rows: usize,
    pub missing_values: usize,
    pub outliers: usize,
}

impl AnnotationCounts {
    pub fn total(&self) -> usize {
        self.empty_rows + self.missing_values + self.outliers
    }
}

/// Everything needed to render the annotated sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedSheet {
    pub legend: Vec<LegendEntry>,
    pub header: Vec<String>,
    pub marks: Vec<CellMark>,
    pub counts: AnnotationCounts,
    pub summary: String,
}

impl AnnotatedSheet {
    pub fn mark_at(&self, row: usize, column: usize) -> Option<&CellMark> {
        self.marks
            .iter()
            .find(|m| m.row == row && m.column == column)
    }
}

pub struct AnnotationPlanner;

impl AnnotationPlanner {
    /// Plan the annotated sheet for the raw grid the analysis was built from.
    ///
    /// Empty rows are painted blue across every cell the row holds, with an
    /// "Empty Row" note on the first cell. Other rows take their marks from
    /// the cell issue map. Only cells present in the row are checked.
    pub fn plan(grid: &Grid, analysis: &AnalysisResults) -> AnnotatedSheet {
        let mut marks = Vec::new();
        let mut counts = AnnotationCounts::default();
        let empty_rows: HashSet<usize> =
            analysis.overall.empty_row_indices.iter().copied().collect();

        for (i, row) in grid.data_rows().iter().enumerate() {
            let row_index = i + 1;

            if empty_rows.contains(&row_index) {
                counts.empty_rows += 1;
                let cells = row.len().max(1);
                marks.extend((0..cells).map(|column| CellMark {
                    row: row_index,
                    column,
                    highlight: Highlight::Blue,
                    note: (column == 0).then(|| "Empty Row".to_string()),
                }));
                continue;
            }

            for column in 0..row.len() {
                match analysis.cell_issues.get(row_index, column) {
                    Some(CellIssue::Missing) => {
                        counts.missing_values += 1;
                        marks.push(CellMark {
                            row: row_index,
                            column,
                            highlight: Highlight::Yellow,
                            note: Some("Missing Value".to_string()),
                        });
                    }
                    Some(CellIssue::Outlier) => {
                        counts.outliers += 1;
                        marks.push(CellMark {
                            row: row_index,
                            column,
                            highlight: Highlight::Red,
                            note: Some(Self::outlier_note(analysis, row_index, column)),
                        });
                    }
                    None => {}
                }
            }
        }

        let summary = format!(
            "Issues found: {} (Empty rows: {}, Missing values: {}, Outliers: {})",
            counts.total(),
            counts.empty_rows,
            counts.missing_values,
            counts.outliers
        );

        AnnotatedSheet {
            legend: [Highlight::Blue, Highlight::Yellow, Highlight::Red]
                .into_iter()
                .map(|highlight| LegendEntry {
                    highlight,
                    argb: highlight.argb().to_string(),
                    label: highlight.legend_label().to_string(),
                })
                .collect(),
            header: grid.column_names(),
            marks,
            counts,
            summary,
        }
    }

    fn outlier_note(analysis: &AnalysisResults, row: usize, column: usize) -> String {
        let column = analysis.column_at(column);
        let stats = column.and_then(|c| c.numeric_stats);
        let z_score = column
            .and_then(|c| c.quality.outlier_details.iter().find(|d| d.row == row))
            .map(|d| d.z_score.abs());

        match (z_score, stats) {
            (Some(z), Some(stats)) => format!(
                "Outlier\nZ-score: {:.2}\nMean: {:.2}\nStd Dev: {:.2}",
                z, stats.mean, stats.std_dev
            ),
            _ => "Outlier".to_string(),
        }
    }
}
