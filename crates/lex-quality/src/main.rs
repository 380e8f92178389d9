//! CLI entry point for the data quality engine.

use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use lex_quality::{
    Cell, CleaningOperation, Grid, NumericRule, QualityConfig, QualityReport, ReportGenerator,
    Session,
};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// CLI-compatible numeric rule enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliNumericRule {
    /// Anything that parses as a finite number
    Lenient,
    /// Signed decimals only (no exponent, no leading '+')
    Strict,
}

impl From<CliNumericRule> for NumericRule {
    fn from(cli: CliNumericRule) -> Self {
        match cli {
            CliNumericRule::Lenient => NumericRule::LenientParse,
            CliNumericRule::Strict => NumericRule::StrictPattern,
        }
    }
}

/// CLI-compatible cleaning operation enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliCleaningOperation {
    /// Drop rows whose cells are all blank
    EmptyRows,
    /// Drop rows that repeat an earlier row
    Duplicates,
    /// Replace z-score outliers with empty cells
    Outliers,
}

impl From<CliCleaningOperation> for CleaningOperation {
    fn from(cli: CliCleaningOperation) -> Self {
        match cli {
            CliCleaningOperation::EmptyRows => CleaningOperation::RemoveEmptyRows,
            CliCleaningOperation::Duplicates => CleaningOperation::RemoveDuplicateRows,
            CliCleaningOperation::Outliers => CleaningOperation::DetectOutliers,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    author = "Lex Machina Team",
    version,
    about = "Data quality scoring for tabular imports",
    long_about = "Scores a CSV file on uniqueness, completeness, accuracy and consistency,\n\
                  lists validation findings and optionally applies cleaning operations.\n\n\
                  EXAMPLES:\n  \
                  # Score a file\n  \
                  lex-quality -i data.csv\n\n  \
                  # Clean and write a JSON report\n  \
                  lex-quality -i data.csv --clean empty-rows,duplicates -r -o results/\n\n  \
                  # Machine-readable output\n  \
                  lex-quality -i data.csv --json | jq .score"
)]
struct Args {
    /// Path to the CSV file (or a JSON array-of-arrays grid)
    #[arg(short, long)]
    input: String,

    /// Output directory for reports
    #[arg(short, long, default_value = "./outputs")]
    output: String,

    /// Cleaning operations to apply, in order
    #[arg(short, long, value_enum, value_delimiter = ',')]
    clean: Vec<CliCleaningOperation>,

    /// Rule used to recognise numbers
    #[arg(long, value_enum, default_value = "lenient")]
    numeric_rule: CliNumericRule,

    /// Absolute z-score above which a value is an outlier
    #[arg(long, default_value = "3.0")]
    z_threshold: f64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON to stdout instead of human-readable summary
    ///
    /// Disables all logs; only outputs the final JSON report.
    #[arg(long)]
    json: bool,

    /// Write a detailed JSON report to the output directory
    ///
    /// The report will be saved as <input_name>_quality_report.json
    #[arg(short = 'r', long)]
    emit_report: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    if !Path::new(&args.input).exists() {
        return Err(anyhow!("Input file not found: {}", args.input));
    }

    let config = QualityConfig::builder()
        .numeric_rule(args.numeric_rule.into())
        .outlier_z_threshold(args.z_threshold)
        .build()?;

    info!("Loading dataset from: {}", args.input);
    let grid = load_grid(&args.input)?;
    info!(
        "Dataset loaded: {} data rows x {} columns",
        grid.data_row_count(),
        grid.width()
    );

    let mut session = Session::new(config);
    session.load(grid);

    // Surface dataset errors ("File is empty", ...) before cleaning
    session.analysis()?;

    for operation in &args.clean {
        let report = session.apply((*operation).into())?;
        debug!("{}", report.message);
    }

    let report = ReportGenerator::build_report(&args.input, &mut session)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if args.emit_report {
        let generator = ReportGenerator::new(PathBuf::from(&args.output));
        let report_path = generator.write_report_to_file(&report, &extract_file_stem(&args.input))?;
        info!("Report written to: {}", report_path.display());
    }

    print_human_readable_summary(&report);

    Ok(())
}

/// Extract the file stem (name without extension) from a path.
fn extract_file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}

/// Load a grid from a JSON array of arrays or from CSV.
fn load_grid(path: &str) -> Result<Grid> {
    let is_json = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if is_json {
        let content = std::fs::read_to_string(path)?;
        return Ok(serde_json::from_str(&content)?);
    }

    let df = load_csv_with_fallbacks(path)?;
    dataframe_to_grid(&df)
}

/// Load CSV with a quoted read first and a plain read as fallback
fn load_csv_with_fallbacks(path: &str) -> Result<DataFrame> {
    match CsvReadOptions::default()
        .with_infer_schema_length(Some(100))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
        .finish()
    {
        Ok(df) => return Ok(df),
        Err(e) => {
            debug!("Standard loading failed: {}", e);
        }
    }

    CsvReadOptions::default()
        .with_infer_schema_length(Some(100))
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
        .finish()
        .map_err(|e| anyhow!("Failed to read CSV file: {}", e))
}

/// Header row from the column names, then one grid row per frame row.
fn dataframe_to_grid(df: &DataFrame) -> Result<Grid> {
    let mut rows = Vec::with_capacity(df.height() + 1);
    rows.push(
        df.get_column_names()
            .iter()
            .map(|name| Cell::text(name.as_str()))
            .collect::<Vec<_>>(),
    );

    let columns = df.get_columns();
    for i in 0..df.height() {
        let row = columns
            .iter()
            .map(|column| -> Result<Cell> { Ok(any_value_to_cell(column.get(i)?)) })
            .collect::<Result<Vec<_>>>()?;
        rows.push(row);
    }

    Ok(Grid::new(rows))
}

/// Converts a Polars `AnyValue` to a raw grid cell.
///
/// | Polars Type | Cell   |
/// |-------------|--------|
/// | Null        | Null   |
/// | Int/UInt    | Number |
/// | Float32/64  | Number |
/// | String      | Text   |
/// | Other       | Text   |
fn any_value_to_cell(value: AnyValue) -> Cell {
    match value {
        AnyValue::Null => Cell::Null,

        AnyValue::Int8(i) => Cell::Number(i.into()),
        AnyValue::Int16(i) => Cell::Number(i.into()),
        AnyValue::Int32(i) => Cell::Number(i.into()),
        AnyValue::Int64(i) => Cell::Number(i as f64),

        AnyValue::UInt8(u) => Cell::Number(u.into()),
        AnyValue::UInt16(u) => Cell::Number(u.into()),
        AnyValue::UInt32(u) => Cell::Number(u.into()),
        AnyValue::UInt64(u) => Cell::Number(u as f64),

        AnyValue::Float32(f) => Cell::Number(f.into()),
        AnyValue::Float64(f) => Cell::Number(f),

        AnyValue::String(s) => Cell::text(s),
        AnyValue::StringOwned(s) => Cell::text(s.as_str()),

        // Booleans, dates and nested values keep their display form
        _ => Cell::text(format!("{}", value)),
    }
}

/// Print a human-readable summary of the quality report.
fn print_human_readable_summary(report: &QualityReport) {
    let dims = &report.score.dimensions;
    let show = |score: Option<u8>| score.map_or_else(|| "n/a".to_string(), |s| s.to_string());

    println!();
    println!("{}", "=".repeat(80));
    println!("DATA QUALITY REPORT");
    println!("{}", "=".repeat(80));
    println!();

    println!(
        "Input: {} ({} rows x {} columns)",
        report.input_file, report.original_shape.0, report.original_shape.1
    );
    println!();

    println!(
        "Quality Score: {} ({})",
        report.score.score, report.validation.band_message
    );
    println!("  Uniqueness:   {}", dims.uniqueness);
    println!("  Completeness: {}", show(dims.completeness));
    println!("  Accuracy:     {}", show(dims.accuracy));
    println!("  Consistency:  {}", show(dims.consistency));
    println!();

    println!("Findings:");
    for finding in &report.validation.findings {
        println!("  - [{:?}] {}: {}", finding.severity, finding.title, finding.description);
    }
    println!();

    if !report.cleaning_results.is_empty() {
        println!("Cleaning:");
        for result in &report.cleaning_results {
            for line in result.message.lines() {
                println!("  {}", line);
            }
        }
        println!(
            "  Result: {} rows x {} columns",
            report.cleaned_shape.0, report.cleaned_shape.1
        );
        println!();
    }

    println!("Use --json for machine-readable output");
    println!("Use --emit-report to save detailed JSON report");
    println!("{}", "=".repeat(80));
}
