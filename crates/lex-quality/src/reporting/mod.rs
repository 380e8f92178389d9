//! Report generation module.
//!
//! This module turns analysis results into outputs for presentation:
//! - [`AnnotatedSheet`]: which cells of the raw grid to highlight, with notes
//! - [`QualityReport`]: analysis, score, findings and cleaning log as JSON
//!
//! # Example
//!
//! ```rust,ignore
//! use lex_quality::reporting::ReportGenerator;
//!
//! let report = ReportGenerator::build_report("data/train.csv", &mut session)?;
//!
//! // Print as JSON
//! println!("{}", serde_json::to_string_pretty(&report)?);
//!
//! // Or write to file
//! let generator = ReportGenerator::new(PathBuf::from("output"));
//! generator.write_report_to_file(&report, "train")?;
//! ```

mod annotation;
mod generator;

pub use annotation::{
    AnnotatedSheet, AnnotationCounts, AnnotationPlanner, CellMark, Highlight, LegendEntry,
};
pub use generator::{QualityReport, ReportGenerator};
