use crate::cleaner::CleaningOperation;
use crate::error::{QualityError, Result, ResultExt};
use crate::quality::ValidationReport;
use crate::session::{CleaningReport, Session};
use crate::types::{AnalysisResults, ScoreResult};
use chrono::Local;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

// ============================================================================
// Quality Report Types
// ============================================================================

/// Full quality report for one dataset.
///
/// Use this for both JSON output (`--json`) and file writing (`--emit-report`).
#[derive(Debug, Clone, Serialize)]
pub struct QualityReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Path or name of the input
    pub input_file: String,
    /// (data rows, columns) of the raw grid
    pub original_shape: (usize, usize),
    /// (data rows, columns) of the current grid after cleaning
    pub cleaned_shape: (usize, usize),
    pub analysis: AnalysisResults,
    pub score: ScoreResult,
    pub validation: ValidationReport,
    /// Applied operations, in order
    pub applied_operations: Vec<CleaningOperation>,
    pub cleaning_results: Vec<CleaningReport>,
}

// ============================================================================
// Generator
// ============================================================================

pub struct ReportGenerator {
    output_dir: PathBuf,
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./outputs"),
        }
    }
}

impl ReportGenerator {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Build a report from a loaded session.
    pub fn build_report(input_file: &str, session: &mut Session) -> Result<QualityReport> {
        let score = session.score()?;
        let validation = session.validate()?;
        let analysis = session.analysis()?.clone();

        let raw = session.raw_grid()?;
        let original_shape = (raw.data_row_count(), raw.width());
        let current = session.current_grid()?;
        let cleaned_shape = (current.data_row_count(), current.width());

        Ok(QualityReport {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: input_file.to_string(),
            original_shape,
            cleaned_shape,
            analysis,
            score,
            validation,
            applied_operations: session.operations().to_vec(),
            cleaning_results: session.cleaning_reports().into_iter().cloned().collect(),
        })
    }

    /// Write the report as pretty JSON to `<output_dir>/<base>_quality_report.json`.
    pub fn write_report_to_file(
        &self,
        report: &QualityReport,
        report_base_name: &str,
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).context(format!(
            "Failed to create output directory {}",
            self.output_dir.display()
        ))?;

        let report_path = self
            .output_dir
            .join(format!("{}_quality_report.json", report_base_name));
        let json = serde_json::to_string_pretty(report)
            .map_err(|e| QualityError::ReportGenerationFailed(e.to_string()))?;

        let mut file = File::create(&report_path)
            .context(format!("Failed to create {}", report_path.display()))?;
        file.write_all(json.as_bytes())?;

        info!("Report saved: {}", report_path.display());

        Ok(report_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Grid;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn session() -> Session {
        let mut session = Session::default();
        session.load(Grid::from_rows(vec![
            vec!["id", "city"],
            vec!["1", "Oslo"],
            vec!["2", ""],
            vec!["1", "Oslo"],
        ]));
        session
    }

    #[test]
    fn test_build_report() {
        let mut session = session();
        session.apply(CleaningOperation::RemoveDuplicateRows).unwrap();

        let report = ReportGenerator::build_report("cities.csv", &mut session).unwrap();
        assert_eq!(report.input_file, "cities.csv");
        assert_eq!(report.original_shape, (3, 2));
        assert_eq!(report.cleaned_shape, (2, 2));
        assert_eq!(
            report.applied_operations,
            vec![CleaningOperation::RemoveDuplicateRows]
        );
        assert_eq!(report.cleaning_results.len(), 1);
        assert_eq!(report.analysis.overall.duplicate_row_indices, vec![3]);
    }

    #[test]
    fn test_build_report_requires_data() {
        let mut session = Session::default();
        assert!(matches!(
            ReportGenerator::build_report("x.csv", &mut session),
            Err(QualityError::NoDataLoaded)
        ));
    }

    #[test]
    fn test_write_report_to_file() {
        let dir = TempDir::new().unwrap();
        let generator = ReportGenerator::new(dir.path().join("reports"));
        let report = ReportGenerator::build_report("cities.csv", &mut session()).unwrap();

        let path = generator.write_report_to_file(&report, "cities").unwrap();
        assert!(path.ends_with("cities_quality_report.json"));

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["input_file"], "cities.csv");
        assert_eq!(written["analysis"]["cell_issues"]["2,1"], "missing");
        assert!(written["score"]["score"].is_u64());
    }
}
