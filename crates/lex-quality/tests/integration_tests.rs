//! Integration tests for the data quality engine.
//!
//! These tests verify end-to-end behavior through the public API: analysis,
//! scoring, validation, annotation and cleaning on a shared session.

use lex_quality::{
    AnnotationPlanner, Cell, CleaningOperation, CleaningOutcome, ColumnType, DataProfiler, Grid,
    NumericRule, NumericStats, QualityConfig, QualityError, ScoreWarning, ScoringEngine, Session,
    Severity, Validator,
};
use pretty_assertions::assert_eq;
use std::path::PathBuf;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_grid(filename: &str) -> Grid {
    let content =
        std::fs::read_to_string(fixtures_path().join(filename)).expect("Failed to read fixture");
    serde_json::from_str(&content).expect("Failed to parse grid")
}

fn single_column(values: &[&str]) -> Grid {
    let mut rows = vec![vec!["a".to_string()]];
    rows.extend(values.iter().map(|v| vec![v.to_string()]));
    Grid::from_rows(rows)
}

fn spiked_column() -> Grid {
    let mut rows = vec![vec![Cell::text("reading")]];
    rows.extend((0..20).map(|i| vec![Cell::Number(10.0 + (i % 3) as f64)]));
    rows.push(vec![Cell::Number(500.0)]);
    Grid::new(rows)
}

// ============================================================================
// Fixture Dataset
// ============================================================================

#[test]
fn test_customers_analysis() {
    let grid = load_grid("customers.json");
    let analysis = DataProfiler::analyze(&grid, &QualityConfig::default()).unwrap();

    assert_eq!(analysis.overall.total_rows, 9);
    assert_eq!(analysis.overall.total_columns, 5);
    assert_eq!(analysis.overall.empty_row_indices, vec![5]);
    assert_eq!(analysis.overall.duplicate_row_indices, vec![4]);
    assert!(analysis.overall.has_issues);

    let joined = analysis.column("joined").unwrap();
    assert_eq!(joined.dominant_type, Some(ColumnType::Mixed));
    assert_eq!(joined.type_distribution.date, 6);
    assert_eq!(joined.type_distribution.text, 1);
    assert_eq!(joined.quality.missing_indices, vec![5, 8]);

    let age = analysis.column("age").unwrap();
    assert_eq!(age.dominant_type, Some(ColumnType::Numeric));
    assert_eq!(age.quality.missing_indices, vec![5, 7]);
    assert_eq!(age.numeric_stats.unwrap().count, 7);

    assert_eq!(
        analysis.column("active").unwrap().dominant_type,
        Some(ColumnType::Boolean)
    );
}

#[test]
fn test_customers_score() {
    let grid = load_grid("customers.json");
    let result = ScoringEngine::score(&grid, &QualityConfig::default()).unwrap();

    // 8 distinct of 9 rows
    assert_eq!(result.dimensions.uniqueness, 89);
    // rates 88.9, 77.8 x4: avg 80 * sqrt(0.778)
    assert_eq!(result.dimensions.completeness, Some(71));
    assert_eq!(result.dimensions.accuracy, Some(100));
    // joined is 6/7 dates: avg 97.1 * sqrt(0.857)
    assert_eq!(result.dimensions.consistency, Some(90));
    assert_eq!(result.score, 88);

    let accuracy_columns: Vec<&str> = result
        .column_scores
        .accuracy
        .iter()
        .map(|c| c.column.as_str())
        .collect();
    assert_eq!(accuracy_columns, vec!["id", "age"]);
}

#[test]
fn test_customers_validation_and_annotation() {
    let grid = load_grid("customers.json");
    let config = QualityConfig::default();
    let analysis = DataProfiler::analyze(&grid, &config).unwrap();
    let score = ScoringEngine::score(&grid, &config).unwrap();

    let report = Validator::validate(&analysis, &score);
    assert_eq!(report.score, 88);
    let titles: Vec<&str> = report.findings.iter().map(|f| f.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Missing Values Detected",
            "Data Type Inconsistencies",
            "Duplicate Records"
        ]
    );
    assert_eq!(report.findings[1].severity, Severity::Error);

    let sheet = AnnotationPlanner::plan(&grid, &analysis);
    assert_eq!(
        sheet.summary,
        "Issues found: 3 (Empty rows: 1, Missing values: 2, Outliers: 0)"
    );
}

#[test]
fn test_customers_cleaning_session() {
    let mut session = Session::default();
    session.load(load_grid("customers.json"));

    let empty = session.apply(CleaningOperation::RemoveEmptyRows).unwrap();
    assert_eq!(empty.outcome, CleaningOutcome::RowsRemoved { removed: 1 });

    let duplicates = session
        .apply(CleaningOperation::RemoveDuplicateRows)
        .unwrap();
    assert_eq!(duplicates.outcome, CleaningOutcome::RowsRemoved { removed: 1 });
    assert_eq!(duplicates.rows_current, 7);
    assert_eq!(duplicates.rows_original, 9);
    assert!(
        duplicates
            .message
            .ends_with("Applied operations: Remove Empty Rows, Remove Duplicate Rows")
    );

    // Score still describes the raw upload
    assert_eq!(session.score().unwrap().score, 88);
}

// ============================================================================
// Core Properties
// ============================================================================

#[test]
fn test_duplicates_never_flag_first_or_unique_rows() {
    let grid = single_column(&["x", "y", "x", "z", "y", "x"]);
    let analysis = DataProfiler::analyze(&grid, &QualityConfig::default()).unwrap();

    assert_eq!(analysis.overall.duplicate_row_indices, vec![3, 5, 6]);
    assert!(!analysis.overall.duplicate_row_indices.contains(&1));
}

#[test]
fn test_distribution_plus_missing_equals_rows() {
    let grid = load_grid("customers.json");
    let analysis = DataProfiler::analyze(&grid, &QualityConfig::default()).unwrap();

    for column in &analysis.columns {
        assert_eq!(
            column.type_distribution.total() + column.quality.missing_count,
            analysis.overall.total_rows,
            "column {}",
            column.name
        );
    }
}

#[test]
fn test_reference_numeric_column() {
    let grid = single_column(&["1", "2", "3", "100"]);
    let config = QualityConfig::default();
    let analysis = DataProfiler::analyze(&grid, &config).unwrap();

    let stats = analysis.column("a").unwrap().numeric_stats.unwrap();
    assert_eq!(stats.mean, 26.5);
    assert!((stats.std_dev - 42.44).abs() < 0.01);
    assert!((stats.z_score(100.0).unwrap() - 1.73).abs() < 0.01);
    assert_eq!(analysis.column("a").unwrap().quality.outlier_count, 0);

    let score = ScoringEngine::score(&grid, &config).unwrap();
    assert_eq!(score.dimensions.accuracy, Some(100));
    assert_eq!(score.dimensions.uniqueness, 100);
}

#[test]
fn test_repeated_row_uniqueness() {
    let grid = single_column(&["1", "2", "1"]);
    let score = ScoringEngine::score(&grid, &QualityConfig::default()).unwrap();
    assert_eq!(score.dimensions.uniqueness, 67);
}

#[test]
fn test_all_empty_column() {
    let grid = Grid::from_rows(vec![
        vec!["name", "notes"],
        vec!["a", ""],
        vec!["b", ""],
    ]);
    let config = QualityConfig::default();

    let analysis = DataProfiler::analyze(&grid, &config).unwrap();
    assert_eq!(analysis.column("notes").unwrap().dominant_type, None);

    let score = ScoringEngine::score(&grid, &config).unwrap();
    let notes_consistency = &score.column_scores.consistency[1];
    assert_eq!(notes_consistency.score, 100);
    assert_eq!(score.column_scores.completeness[1].score, 0);
    assert_eq!(score.dimensions.completeness, Some(0));
}

#[test]
fn test_header_only_has_no_score() {
    let grid = Grid::from_rows(vec![vec!["a", "b"]]);
    let err = ScoringEngine::score(&grid, &QualityConfig::default()).unwrap_err();
    assert!(matches!(err, QualityError::InsufficientData));
    assert_eq!(err.to_string(), "Only one row, unable to analyze");
}

#[test]
fn test_no_numeric_columns_warning() {
    let grid = single_column(&["red", "green"]);
    let score = ScoringEngine::score(&grid, &QualityConfig::default()).unwrap();
    assert_eq!(score.dimensions.accuracy, None);
    assert_eq!(score.warnings, vec![ScoreWarning::NoNumericColumns]);
}

#[test]
fn test_non_finite_number_is_not_a_null_duplicate() {
    let grid = Grid::new(vec![
        vec![Cell::text("reading")],
        vec![Cell::Number(f64::NAN)],
        vec![Cell::Null],
    ]);
    let config = QualityConfig::default();

    let analysis = DataProfiler::analyze(&grid, &config).unwrap();
    assert!(analysis.overall.duplicate_row_indices.is_empty());

    let score = ScoringEngine::score(&grid, &config).unwrap();
    assert_eq!(score.dimensions.uniqueness, 100);

    let mut session = Session::default();
    session.load(grid);
    let report = session
        .apply(CleaningOperation::RemoveDuplicateRows)
        .unwrap();
    assert_eq!(report.outcome, CleaningOutcome::RowsRemoved { removed: 0 });
}

// ============================================================================
// Cleaning Properties
// ============================================================================

#[test]
fn test_remove_empty_rows_twice_equals_once() {
    let mut session = Session::default();
    session.load(single_column(&["1", "", "2", "  "]));

    let first = session.apply(CleaningOperation::RemoveEmptyRows).unwrap();
    let grid_once = session.current_grid().unwrap().clone();
    let second = session.apply(CleaningOperation::RemoveEmptyRows).unwrap();

    assert_eq!(session.current_grid().unwrap(), &grid_once);
    assert_eq!(first.outcome, second.outcome);
    assert_eq!(first.outcome, CleaningOutcome::RowsRemoved { removed: 2 });
    assert!(second.replayed);
}

#[test]
fn test_empty_row_detection_agrees_with_cleaning_on_wide_rows() {
    let grid = Grid::from_rows(vec![
        vec!["a", "b"],
        vec!["1", "2"],
        vec!["", "", "x"],
        vec!["", "", ""],
    ]);
    let analysis = DataProfiler::analyze(&grid, &QualityConfig::default()).unwrap();
    assert_eq!(analysis.overall.empty_row_indices, vec![3]);

    let mut session = Session::default();
    session.load(grid);
    let report = session.apply(CleaningOperation::RemoveEmptyRows).unwrap();
    assert_eq!(
        report.outcome,
        CleaningOutcome::RowsRemoved {
            removed: analysis.overall.empty_row_indices.len()
        }
    );
    assert_eq!(report.rows_current, 2);
}

#[test]
fn test_detect_outliers_reports_decision_stats() {
    let grid = spiked_column();
    let values: Vec<f64> = (0..grid.data_row_count())
        .filter_map(|r| match grid.cell(r, 0) {
            Cell::Number(n) => Some(*n),
            _ => None,
        })
        .collect();
    let expected = NumericStats::from_values(&values).unwrap();

    let mut session = Session::default();
    session.load(grid);
    let report = session.apply(CleaningOperation::DetectOutliers).unwrap();

    let CleaningOutcome::OutliersNulled(summary) = &report.outcome else {
        panic!("expected outlier summary, got {:?}", report.outcome);
    };
    assert_eq!(summary.total_outliers, 1);
    assert_eq!(summary.columns[0].mean, expected.mean);
    assert_eq!(summary.columns[0].std_dev, expected.std_dev);
    assert_eq!(session.current_grid().unwrap().cell(20, 0), &Cell::Null);
    assert_eq!(session.raw_grid().unwrap().cell(20, 0), &Cell::Number(500.0));

    // A second run does not compound
    let again = session.apply(CleaningOperation::DetectOutliers).unwrap();
    assert!(again.replayed);
    assert_eq!(again.outcome, report.outcome);
}

#[test]
fn test_numeric_rule_is_shared() {
    // "1e3" is a number only under the lenient rule
    let grid = single_column(&["1", "2", "1e3"]);

    let lenient = QualityConfig::default();
    let strict = QualityConfig::builder()
        .numeric_rule(NumericRule::StrictPattern)
        .build()
        .unwrap();

    let lenient_analysis = DataProfiler::analyze(&grid, &lenient).unwrap();
    let strict_analysis = DataProfiler::analyze(&grid, &strict).unwrap();
    assert_eq!(
        lenient_analysis.column("a").unwrap().dominant_type,
        Some(ColumnType::Numeric)
    );
    assert_eq!(
        strict_analysis.column("a").unwrap().dominant_type,
        Some(ColumnType::Mixed)
    );

    assert!(
        ScoringEngine::score(&grid, &lenient)
            .unwrap()
            .dimensions
            .accuracy
            .is_some()
    );
    assert_eq!(
        ScoringEngine::score(&grid, &strict)
            .unwrap()
            .dimensions
            .accuracy,
        None
    );
}

#[test]
fn test_session_without_data() {
    let mut session = Session::default();
    let err = session
        .apply(CleaningOperation::RemoveDuplicateRows)
        .unwrap_err();
    assert_eq!(err.to_string(), "Please upload a file first.");
    assert_eq!(err.error_code(), "NO_DATA_LOADED");
}
