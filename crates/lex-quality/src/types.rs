use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Grid Types
// ============================================================================

/// A single raw cell value as produced by the ingestion layer.
///
/// Cells are untyped: a CSV or spreadsheet reader hands over whatever it
/// parsed (nothing, a number, or a string). Classification into coarse types
/// happens later, per cell, in [`crate::profiler::classify_cell`].
///
/// Serialized untagged so a grid round-trips as a plain JSON array of arrays
/// (`[["id","age"],[1,"42"],[null,""]]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Number(f64),
    Text(String),
}

/// Shared stand-in for trailing cells that a short row does not have.
pub(crate) static EMPTY_CELL: Cell = Cell::Text(String::new());

impl Cell {
    /// Create a text cell.
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => Ok(()),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Number(value as f64)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Cell::Null, Into::into)
    }
}

/// A rectangular-ish table of raw cells.
///
/// Row 0 is the header; rows 1..N are data rows. Data rows may be shorter
/// than the header, in which case the absent trailing cells read as empty
/// strings through [`Grid::cell`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// Build a grid from anything convertible into cells.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let grid = Grid::from_rows(vec![vec!["name", "age"], vec!["Ada", "36"]]);
    /// ```
    pub fn from_rows<R, C>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Total number of rows, header included.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut Vec<Vec<Cell>> {
        &mut self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<Cell>> {
        self.rows
    }

    pub fn header(&self) -> Option<&[Cell]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Number of columns, taken from the header.
    pub fn width(&self) -> usize {
        self.header().map_or(0, <[Cell]>::len)
    }

    /// Data rows (everything after the header).
    pub fn data_rows(&self) -> &[Vec<Cell>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    pub fn data_row_count(&self) -> usize {
        self.data_rows().len()
    }

    /// Cell at a zero-based data row and column, padding short rows.
    pub fn cell(&self, data_row: usize, column: usize) -> &Cell {
        self.data_rows()
            .get(data_row)
            .and_then(|row| row.get(column))
            .unwrap_or(&EMPTY_CELL)
    }

    /// Header names as display strings (empty for null header cells).
    pub fn column_names(&self) -> Vec<String> {
        self.header()
            .map(|header| header.iter().map(ToString::to_string).collect())
            .unwrap_or_default()
    }
}

// ============================================================================
// Classification Types
// ============================================================================

/// Coarse classification of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    Numeric,
    Text,
    Date,
    Boolean,
    Empty,
}

/// Dominant type of a column. `None` at the use site means every value
/// in the column was empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Numeric,
    Text,
    Date,
    Boolean,
    Mixed,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Numeric => "numeric",
            ColumnType::Text => "text",
            ColumnType::Date => "date",
            ColumnType::Boolean => "boolean",
            ColumnType::Mixed => "mixed",
        };
        f.write_str(name)
    }
}

/// Counts of non-empty cell types in a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDistribution {
    pub numeric: usize,
    pub text: usize,
    pub date: usize,
    pub boolean: usize,
}

impl TypeDistribution {
    /// Record one classified cell. Empty cells are not part of the distribution.
    pub fn record(&mut self, cell_type: CellType) {
        match cell_type {
            CellType::Numeric => self.numeric += 1,
            CellType::Text => self.text += 1,
            CellType::Date => self.date += 1,
            CellType::Boolean => self.boolean += 1,
            CellType::Empty => {}
        }
    }

    pub fn total(&self) -> usize {
        self.numeric + self.text + self.date + self.boolean
    }

    /// Entries in a fixed order (numeric, text, date, boolean).
    pub fn entries(&self) -> [(ColumnType, usize); 4] {
        [
            (ColumnType::Numeric, self.numeric),
            (ColumnType::Text, self.text),
            (ColumnType::Date, self.date),
            (ColumnType::Boolean, self.boolean),
        ]
    }

    /// Types with a non-zero count.
    pub fn present_types(&self) -> Vec<ColumnType> {
        self.entries()
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .map(|(kind, _)| kind)
            .collect()
    }

    pub fn max_count(&self) -> usize {
        self.entries()
            .into_iter()
            .map(|(_, count)| count)
            .max()
            .unwrap_or(0)
    }
}

// ============================================================================
// Analysis Result Types
// ============================================================================

/// Population statistics over the numeric values of a column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericStats {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

/// One value flagged as an outlier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlierDetail {
    /// 1-based data row index (header excluded).
    pub row: usize,
    pub value: f64,
    pub z_score: f64,
}

/// Missing and outlier findings for one column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnQuality {
    pub missing_count: usize,
    pub missing_indices: Vec<usize>,
    pub outlier_count: usize,
    pub outlier_indices: Vec<usize>,
    pub outlier_details: Vec<OutlierDetail>,
}

/// Per-column analysis produced by the column analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnAnalysis {
    pub name: String,
    pub index: usize,
    pub dominant_type: Option<ColumnType>,
    pub type_distribution: TypeDistribution,
    pub numeric_stats: Option<NumericStats>,
    pub quality: ColumnQuality,
}

/// Dataset-level facts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverallAnalysis {
    pub total_rows: usize,
    pub total_columns: usize,
    /// 1-based data row indices where every cell is missing.
    pub empty_row_indices: Vec<usize>,
    /// 1-based data row indices that repeat an earlier row.
    pub duplicate_row_indices: Vec<usize>,
    pub has_issues: bool,
}

/// Issue recorded against a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellIssue {
    Missing,
    Outlier,
}

/// Lookup of `(data row, column)` to the issue recorded for that cell.
///
/// Rows are 1-based data row indices, columns are zero-based. Serializes as
/// a JSON object keyed by `"row,col"`, ordered by row then column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellIssueMap {
    issues: BTreeMap<(usize, usize), CellIssue>,
}

impl CellIssueMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an issue, replacing any earlier entry for the same cell.
    pub fn insert(&mut self, row: usize, column: usize, issue: CellIssue) {
        self.issues.insert((row, column), issue);
    }

    pub fn get(&self, row: usize, column: usize) -> Option<CellIssue> {
        self.issues.get(&(row, column)).copied()
    }

    /// Look up by the `"row,col"` key used in serialized output.
    pub fn get_by_key(&self, key: &str) -> Option<CellIssue> {
        let (row, column) = key.split_once(',')?;
        let row = row.trim().parse().ok()?;
        let column = column.trim().parse().ok()?;
        self.get(row, column)
    }

    pub fn key(row: usize, column: usize) -> String {
        format!("{},{}", row, column)
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn count(&self, issue: CellIssue) -> usize {
        self.issues.values().filter(|i| **i == issue).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), CellIssue)> + '_ {
        self.issues.iter().map(|(k, v)| (*k, *v))
    }
}

impl Serialize for CellIssueMap {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.issues.len()))?;
        for ((row, column), issue) in &self.issues {
            map.serialize_entry(&Self::key(*row, *column), issue)?;
        }
        map.end()
    }
}

/// Everything the analyzer derives from the raw grid.
///
/// Built once per loaded dataset and cached by the [`crate::Session`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResults {
    pub overall: OverallAnalysis,
    /// Column analyses in header order.
    pub columns: Vec<ColumnAnalysis>,
    pub cell_issues: CellIssueMap,
}

impl AnalysisResults {
    /// Find a column analysis by header name (first match wins).
    pub fn column(&self, name: &str) -> Option<&ColumnAnalysis> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_at(&self, index: usize) -> Option<&ColumnAnalysis> {
        self.columns.iter().find(|c| c.index == index)
    }
}

// ============================================================================
// Scoring Types
// ============================================================================

/// Scores for the four quality dimensions.
///
/// `None` means the dimension does not apply to this dataset (for example,
/// accuracy when no column is purely numeric) and is left out of the
/// overall average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionScores {
    pub uniqueness: u8,
    pub completeness: Option<u8>,
    pub accuracy: Option<u8>,
    pub consistency: Option<u8>,
}

impl DimensionScores {
    /// Non-null dimension scores in a fixed order.
    pub fn applicable(&self) -> Vec<u8> {
        [
            Some(self.uniqueness),
            self.completeness,
            self.accuracy,
            self.consistency,
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Score of one column within one dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnScore {
    pub column: String,
    pub index: usize,
    pub score: u8,
}

/// Per-column breakdown. Uniqueness is row-level and has no breakdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnScores {
    pub completeness: Vec<ColumnScore>,
    pub accuracy: Vec<ColumnScore>,
    pub consistency: Vec<ColumnScore>,
}

/// Non-fatal conditions noticed while scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreWarning {
    /// No column is purely numeric, so accuracy was not scored.
    NoNumericColumns,
}

/// Output of the scoring engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Overall score, 0-100.
    pub score: u8,
    pub dimensions: DimensionScores,
    pub column_scores: ColumnScores,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ScoreWarning>,
}

static_assertions::assert_impl_all!(Grid: Send, Sync);
static_assertions::assert_impl_all!(AnalysisResults: Send, Sync);
static_assertions::assert_impl_all!(ScoreResult: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_grid_pads_short_rows() {
        let grid = Grid::from_rows(vec![vec!["a", "b", "c"], vec!["1"]]);
        assert_eq!(grid.cell(0, 0), &Cell::text("1"));
        assert_eq!(grid.cell(0, 2), &Cell::text(""));
        assert_eq!(grid.cell(5, 0), &Cell::text(""));
    }

    #[test]
    fn test_grid_header_only() {
        let grid = Grid::from_rows(vec![vec!["a"]]);
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.width(), 1);
        assert!(grid.data_rows().is_empty());
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::Number(1.0).to_string(), "1");
        assert_eq!(Cell::Number(2.5).to_string(), "2.5");
        assert_eq!(Cell::Null.to_string(), "");
        assert_eq!(Cell::text("x").to_string(), "x");
    }

    #[test]
    fn test_grid_json_round_trip_shape() {
        let grid: Grid = serde_json::from_str(r#"[["id","v"],[1,"x"],[null,""]]"#).unwrap();
        assert_eq!(grid.cell(0, 0), &Cell::Number(1.0));
        assert_eq!(grid.cell(1, 0), &Cell::Null);
        assert_eq!(
            serde_json::to_string(&grid).unwrap(),
            r#"[["id","v"],[1.0,"x"],[null,""]]"#
        );
    }

    #[test]
    fn test_type_distribution_present_types() {
        let mut dist = TypeDistribution::default();
        dist.record(CellType::Numeric);
        dist.record(CellType::Numeric);
        dist.record(CellType::Date);
        dist.record(CellType::Empty);
        assert_eq!(dist.total(), 3);
        assert_eq!(dist.max_count(), 2);
        assert_eq!(
            dist.present_types(),
            vec![ColumnType::Numeric, ColumnType::Date]
        );
    }

    #[test]
    fn test_cell_issue_map_serializes_with_string_keys() {
        let mut map = CellIssueMap::new();
        map.insert(2, 0, CellIssue::Missing);
        map.insert(1, 3, CellIssue::Outlier);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"1,3":"outlier","2,0":"missing"}"#);
        assert_eq!(map.get_by_key("2,0"), Some(CellIssue::Missing));
        assert_eq!(map.get_by_key("bogus"), None);
    }
}
