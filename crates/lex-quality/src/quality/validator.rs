//! Human-readable validation findings built from analysis and score.

use crate::types::{AnalysisResults, ColumnType, ScoreResult};
use serde::{Deserialize, Serialize};

/// Severity of a finding, also used for the score band card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Error,
}

/// Coarse rating of the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Excellent,
    Good,
    Poor,
}

impl ScoreBand {
    /// 80 and above is excellent, 60 and above is good.
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => ScoreBand::Excellent,
            60..=79 => ScoreBand::Good,
            _ => ScoreBand::Poor,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            ScoreBand::Excellent => Severity::Success,
            ScoreBand::Good => Severity::Warning,
            ScoreBand::Poor => Severity::Error,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent data quality!",
            ScoreBand::Good => "Good data quality with room for improvement.",
            ScoreBand::Poor => "Poor data quality - significant cleaning required.",
        }
    }
}

/// One validation card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFinding {
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub recommendation: String,
}

impl ValidationFinding {
    fn new(
        severity: Severity,
        title: &str,
        description: String,
        recommendation: &str,
    ) -> Self {
        Self {
            severity,
            title: title.to_string(),
            description,
            recommendation: recommendation.to_string(),
        }
    }
}

/// Score card plus findings, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub score: u8,
    pub band: ScoreBand,
    pub band_message: String,
    pub findings: Vec<ValidationFinding>,
}

impl ValidationReport {
    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Error)
    }
}

pub struct Validator;

impl Validator {
    /// Build the validation report.
    ///
    /// Findings are produced in a fixed order: missing values, type
    /// inconsistencies, duplicates (always present, as a success card when
    /// there are none), outliers.
    pub fn validate(analysis: &AnalysisResults, score: &ScoreResult) -> ValidationReport {
        let mut findings = Vec::new();

        findings.extend(Self::missing_values(analysis));
        findings.extend(Self::type_inconsistencies(analysis));
        findings.push(Self::duplicates(analysis));
        findings.extend(Self::outliers(analysis));

        let band = ScoreBand::from_score(score.score);
        ValidationReport {
            score: score.score,
            band,
            band_message: band.message().to_string(),
            findings,
        }
    }

    fn missing_values(analysis: &AnalysisResults) -> Option<ValidationFinding> {
        let columns: Vec<String> = analysis
            .columns
            .iter()
            .filter(|c| c.quality.missing_count > 0)
            .map(|c| format!("{} ({} missing)", c.name, c.quality.missing_count))
            .collect();

        if columns.is_empty() {
            return None;
        }

        Some(ValidationFinding::new(
            Severity::Warning,
            "Missing Values Detected",
            format!(
                "Found missing values in {} columns: {}",
                columns.len(),
                columns.join(", ")
            ),
            "Consider filling missing values or removing incomplete rows.",
        ))
    }

    fn type_inconsistencies(analysis: &AnalysisResults) -> Option<ValidationFinding> {
        let columns: Vec<&str> = analysis
            .columns
            .iter()
            .filter(|c| c.dominant_type == Some(ColumnType::Mixed))
            .map(|c| c.name.as_str())
            .collect();

        if columns.is_empty() {
            return None;
        }

        Some(ValidationFinding::new(
            Severity::Error,
            "Data Type Inconsistencies",
            format!(
                "Inconsistent data types found in columns: {}",
                columns.join(", ")
            ),
            "Standardize data types by converting values to consistent formats.",
        ))
    }

    fn duplicates(analysis: &AnalysisResults) -> ValidationFinding {
        let count = analysis.overall.duplicate_row_indices.len();
        if count > 0 {
            ValidationFinding::new(
                Severity::Warning,
                "Duplicate Records",
                format!("Found {} duplicate records.", count),
                "Remove duplicate entries to ensure data integrity.",
            )
        } else {
            ValidationFinding::new(
                Severity::Success,
                "No Duplicates",
                "Your dataset contains no duplicate records.".to_string(),
                "Data is clean in terms of duplicates.",
            )
        }
    }

    fn outliers(analysis: &AnalysisResults) -> Option<ValidationFinding> {
        let columns: Vec<String> = analysis
            .columns
            .iter()
            .filter(|c| c.quality.outlier_count > 0)
            .map(|c| format!("{} ({} outliers)", c.name, c.quality.outlier_count))
            .collect();

        if columns.is_empty() {
            return None;
        }

        Some(ValidationFinding::new(
            Severity::Warning,
            "Potential Outliers",
            format!(
                "Detected potential outliers in {} numeric columns: {}",
                columns.len(),
                columns.join(", ")
            ),
            "Review outlier values to confirm validity.",
        ))
    }
}
