//! Working state for one loaded dataset.
//!
//! ```text
//! ┌───────────────────────────── Session ─────────────────────────────┐
//! │ config: QualityConfig                                             │
//! ├───────────────────────────────────────────────────────────────────┤
//! │ dataset: Option<Dataset>                                          │
//! │   raw      Grid             as loaded, never modified             │
//! │   current  Grid             cleaning operations write here        │
//! │   operations                applied operations, in order          │
//! │   results  op -> report     replayed on repeat invocation         │
//! │   analysis Option<...>      built lazily from `raw`, then cached  │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Analysis and scoring always read the raw grid. Cleaning never triggers
//! re-analysis, so the score describes the data as uploaded.

use crate::cleaner::{CleaningOperation, CleaningOutcome, DataCleaner};
use crate::config::QualityConfig;
use crate::error::{QualityError, Result};
use crate::profiler::DataProfiler;
use crate::quality::{ScoringEngine, ValidationReport, Validator};
use crate::reporting::{AnnotatedSheet, AnnotationPlanner};
use crate::types::{AnalysisResults, Grid, ScoreResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

/// What a cleaning operation reports back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningReport {
    pub operation: CleaningOperation,
    pub outcome: CleaningOutcome,
    /// Multi-line message for display.
    pub message: String,
    /// Data rows in the current grid after the operation.
    pub rows_current: usize,
    /// Data rows in the raw grid.
    pub rows_original: usize,
    /// Operation log at the time the operation first ran.
    pub applied_operations: Vec<CleaningOperation>,
    /// True when this report is a replay of an earlier invocation.
    pub replayed: bool,
}

#[derive(Debug, Clone)]
struct Dataset {
    raw: Grid,
    current: Grid,
    operations: Vec<CleaningOperation>,
    results: HashMap<CleaningOperation, CleaningReport>,
    analysis: Option<AnalysisResults>,
}

/// One session per active dataset.
#[derive(Debug, Clone, Default)]
pub struct Session {
    config: QualityConfig,
    dataset: Option<Dataset>,
}

impl Session {
    pub fn new(config: QualityConfig) -> Self {
        Self {
            config,
            dataset: None,
        }
    }

    pub fn config(&self) -> &QualityConfig {
        &self.config
    }

    /// Load a grid, replacing any previous dataset and its derived state.
    pub fn load(&mut self, grid: Grid) {
        info!(
            "Loaded dataset: {} rows x {} columns",
            grid.len(),
            grid.width()
        );
        self.dataset = Some(Dataset {
            current: grid.clone(),
            raw: grid,
            operations: Vec::new(),
            results: HashMap::new(),
            analysis: None,
        });
    }

    /// Drop the loaded dataset.
    pub fn clear(&mut self) {
        if self.dataset.take().is_some() {
            info!("Session cleared");
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.dataset.is_some()
    }

    pub fn raw_grid(&self) -> Result<&Grid> {
        self.dataset().map(|d| &d.raw)
    }

    /// The grid after all applied cleaning operations.
    pub fn current_grid(&self) -> Result<&Grid> {
        self.dataset().map(|d| &d.current)
    }

    /// Applied operations in the order they first ran.
    pub fn operations(&self) -> &[CleaningOperation] {
        self.dataset
            .as_ref()
            .map(|d| d.operations.as_slice())
            .unwrap_or_default()
    }

    /// Reports of applied operations, in operation order.
    pub fn cleaning_reports(&self) -> Vec<&CleaningReport> {
        self.dataset
            .as_ref()
            .map(|d| {
                d.operations
                    .iter()
                    .filter_map(|op| d.results.get(op))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Analysis of the raw grid, built on first use and cached.
    pub fn analysis(&mut self) -> Result<&AnalysisResults> {
        let dataset = self.dataset.as_mut().ok_or(QualityError::NoDataLoaded)?;
        if dataset.analysis.is_none() {
            let results = DataProfiler::analyze(&dataset.raw, &self.config)?;
            dataset.analysis = Some(results);
        } else {
            debug!("Using cached analysis results");
        }
        dataset
            .analysis
            .as_ref()
            .ok_or_else(|| QualityError::Internal("analysis cache empty".to_string()))
    }

    /// Score the raw grid.
    pub fn score(&self) -> Result<ScoreResult> {
        ScoringEngine::score(&self.dataset()?.raw, &self.config)
    }

    /// Validation findings for the raw grid.
    pub fn validate(&mut self) -> Result<ValidationReport> {
        let score = self.score()?;
        let analysis = self.analysis()?;
        Ok(Validator::validate(analysis, &score))
    }

    /// Annotated export plan for the raw grid.
    pub fn annotate(&mut self) -> Result<AnnotatedSheet> {
        self.analysis()?;
        let dataset = self.dataset()?;
        let analysis = dataset
            .analysis
            .as_ref()
            .ok_or_else(|| QualityError::Internal("analysis cache empty".to_string()))?;
        Ok(AnnotationPlanner::plan(&dataset.raw, analysis))
    }

    /// Apply a cleaning operation to the current grid.
    ///
    /// An operation runs at most once per loaded dataset. Later invocations
    /// return the first report with `replayed` set and leave the grid alone.
    pub fn apply(&mut self, operation: CleaningOperation) -> Result<CleaningReport> {
        let dataset = self.dataset.as_mut().ok_or(QualityError::NoDataLoaded)?;

        if let Some(previous) = dataset.results.get(&operation) {
            debug!("{} already applied, replaying result", operation);
            return Ok(CleaningReport {
                replayed: true,
                ..previous.clone()
            });
        }

        if dataset.current.is_empty() {
            return Err(QualityError::NoDataLoaded);
        }

        let outcome = DataCleaner::apply(&mut dataset.current, operation, &self.config);
        dataset.operations.push(operation);

        let rows_current = dataset.current.data_row_count();
        let rows_original = dataset.raw.data_row_count();
        let applied: Vec<String> = dataset.operations.iter().map(ToString::to_string).collect();
        let message = format!(
            "{}\nCurrent data: {} rows (Original: {} rows)\nApplied operations: {}",
            outcome.headline(operation),
            rows_current,
            rows_original,
            applied.join(", ")
        );

        let report = CleaningReport {
            operation,
            outcome,
            message,
            rows_current,
            rows_original,
            applied_operations: dataset.operations.clone(),
            replayed: false,
        };
        dataset.results.insert(operation, report.clone());
        Ok(report)
    }

    fn dataset(&self) -> Result<&Dataset> {
        self.dataset.as_ref().ok_or(QualityError::NoDataLoaded)
    }
}

static_assertions::assert_impl_all!(Session: Send, Sync);
static_assertions::assert_impl_all!(CleaningReport: Send, Sync);
