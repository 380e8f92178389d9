//! Quality assessment: cell issue map, scoring and validation findings.

mod issues;
mod scoring;
mod validator;

pub use issues::build_cell_issue_map;
pub use scoring::{ScoringEngine, penalized_score};
pub use validator::{ScoreBand, Severity, ValidationFinding, ValidationReport, Validator};

pub(crate) use scoring::pure_numeric_column;
