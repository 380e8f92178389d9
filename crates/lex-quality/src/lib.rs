//! Data Quality Scoring Library
//!
//! Analysis, scoring and cleaning for tabular imports (CSV or spreadsheet
//! data already parsed into a grid of raw cells).
//!
//! # Overview
//!
//! - **Profiling**: per-cell type classification, per-column type
//!   distribution, missing map, numeric stats and z-score outliers, plus
//!   dataset-level empty and duplicate rows
//! - **Scoring**: four quality dimensions (uniqueness, completeness,
//!   accuracy, consistency) combined into a 0-100 score, with a penalty
//!   that lets one bad column pull its dimension down
//! - **Cleaning**: idempotent operations on a working copy of the grid
//! - **Reporting**: validation findings, an annotated export plan and a
//!   JSON quality report
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use lex_quality::{CleaningOperation, Grid, QualityConfig, Session};
//!
//! let grid = Grid::from_rows(vec![
//!     vec!["name", "age"],
//!     vec!["Ada", "36"],
//!     vec!["", "41"],
//!     vec!["Ada", "36"],
//! ]);
//!
//! let mut session = Session::new(QualityConfig::default());
//! session.load(grid);
//!
//! let score = session.score()?;
//! println!("Quality score: {}", score.score);
//!
//! let report = session.apply(CleaningOperation::RemoveDuplicateRows)?;
//! println!("{}", report.message);
//! ```
//!
//! # Configuration
//!
//! One [`QualityConfig`] decides how numbers are recognised and where the
//! outlier boundary sits, for every component at once:
//!
//! ```rust,ignore
//! use lex_quality::{NumericRule, QualityConfig};
//!
//! let config = QualityConfig::builder()
//!     .numeric_rule(NumericRule::StrictPattern)
//!     .outlier_z_threshold(3.0)
//!     .build()?;
//! ```

pub mod cleaner;
pub mod config;
pub mod error;
pub mod profiler;
pub mod quality;
pub mod reporting;
pub mod session;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use cleaner::{
    CleaningOperation, CleaningOutcome, ColumnOutlierSummary, DataCleaner, OutlierSummary,
};
pub use config::{ConfigValidationError, QualityConfig, QualityConfigBuilder};
pub use error::{QualityError, Result as QualityResult, ResultExt};
pub use profiler::{DataProfiler, classify_cell};
pub use quality::{
    ScoreBand, ScoringEngine, Severity, ValidationFinding, ValidationReport, Validator,
    build_cell_issue_map,
};
pub use reporting::{AnnotatedSheet, AnnotationPlanner, QualityReport, ReportGenerator};
pub use session::{CleaningReport, Session};
pub use types::{
    AnalysisResults, Cell, CellIssue, CellIssueMap, CellType, ColumnAnalysis, ColumnQuality,
    ColumnScore, ColumnScores, ColumnType, DimensionScores, Grid, NumericStats, OutlierDetail,
    OverallAnalysis, ScoreResult, ScoreWarning, TypeDistribution,
};
pub use utils::{MissingRule, NumericRule, row_key};
