//! Shared utilities for cell inspection.
//!
//! Every component that needs to decide "is this cell missing?" or "is this
//! cell a number?" goes through the rules defined here, so that the
//! classifier, the scoring engine and the cleaning operations cannot drift
//! apart.

use crate::types::Cell;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::borrow::Cow;

// =============================================================================
// Numeric Detection
// =============================================================================

static STRICT_NUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d*\.?\d+$").expect("Invalid regex: signed decimal"));

/// How a cell is recognised as a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum NumericRule {
    /// Optional leading `-`, digits, optional single `.`, digits.
    StrictPattern,
    /// Anything that parses as a finite `f64`.
    #[default]
    LenientParse,
}

impl NumericRule {
    /// Parse a trimmed string under this rule.
    pub fn parse_str(self, value: &str) -> Option<f64> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }
        match self {
            NumericRule::StrictPattern if !STRICT_NUMERIC.is_match(trimmed) => None,
            _ => trimmed.parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }

    /// Parse a cell under this rule. Null cells are never numeric.
    pub fn parse(self, cell: &Cell) -> Option<f64> {
        match cell {
            Cell::Null => None,
            Cell::Number(n) => match self {
                NumericRule::LenientParse => Some(*n).filter(|n| n.is_finite()),
                NumericRule::StrictPattern => self.parse_str(&n.to_string()),
            },
            Cell::Text(s) => self.parse_str(s),
        }
    }

    pub fn is_numeric(self, cell: &Cell) -> bool {
        self.parse(cell).is_some()
    }
}

// =============================================================================
// Missing Detection
// =============================================================================

/// How a cell is recognised as missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MissingRule {
    /// Null, empty, or whitespace-only.
    #[default]
    Structural,
    /// Null or exactly the empty string. Whitespace counts as present.
    ExplicitOnly,
}

impl MissingRule {
    pub fn is_missing(self, cell: &Cell) -> bool {
        match (self, cell) {
            (_, Cell::Null) => true,
            (_, Cell::Number(_)) => false,
            (MissingRule::Structural, Cell::Text(s)) => s.trim().is_empty(),
            (MissingRule::ExplicitOnly, Cell::Text(s)) => s.is_empty(),
        }
    }
}

// =============================================================================
// String Helpers
// =============================================================================

/// Words recognised as boolean values (compared lower-cased).
pub const BOOLEAN_WORDS: [&str; 4] = ["true", "false", "yes", "no"];

/// Check if a string is one of the boolean words.
pub fn is_boolean_string(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    BOOLEAN_WORDS.iter().any(|&w| w == lower)
}

/// Coarse date heuristic: contains `/` or `-` and at least one digit.
///
/// This is not calendar validation; `"abc-1"` counts as a date.
pub fn looks_like_date(s: &str) -> bool {
    let trimmed = s.trim();
    (trimmed.contains('/') || trimmed.contains('-')) && trimmed.chars().any(|c| c.is_ascii_digit())
}

/// String form of a cell used for classification.
pub fn cell_text(cell: &Cell) -> Cow<'_, str> {
    match cell {
        Cell::Text(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}

/// Blank test used by the empty-row cleaning operation.
#[inline]
pub fn is_blank(cell: &Cell) -> bool {
    MissingRule::Structural.is_missing(cell)
}

// =============================================================================
// Row Serialization
// =============================================================================

/// Canonical, order- and type-sensitive key for a row.
///
/// The row is read at `width` columns: short rows are padded with empty
/// strings and cells beyond the header are ignored, so `[1]` and `[1, ""]`
/// under a two-column header produce the same key while `1` and `"1"` do not.
/// Non-finite numbers keep their own key instead of collapsing into `null`.
pub fn row_key(row: &[Cell], width: usize) -> String {
    let padded: Vec<Value> = (0..width)
        .map(|i| key_value(row.get(i).unwrap_or(&crate::types::EMPTY_CELL)))
        .collect();
    Value::Array(padded).to_string()
}

fn key_value(cell: &Cell) -> Value {
    match cell {
        Cell::Null => Value::Null,
        Cell::Number(n) if n.is_finite() => Value::from(*n),
        // JSON has no NaN or infinity; text cells never serialize as objects
        Cell::Number(n) => json!({ "number": n.to_string() }),
        Cell::Text(s) => Value::from(s.as_str()),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_parse() {
        let rule = NumericRule::LenientParse;
        assert_eq!(rule.parse_str("42"), Some(42.0));
        assert_eq!(rule.parse_str(" -3.5 "), Some(-3.5));
        assert_eq!(rule.parse_str("1e3"), Some(1000.0));
        assert_eq!(rule.parse_str("inf"), None);
        assert_eq!(rule.parse_str("NaN"), None);
        assert_eq!(rule.parse_str(""), None);
        assert_eq!(rule.parse_str("12abc"), None);
        assert_eq!(rule.parse(&Cell::Number(f64::INFINITY)), None);
        assert_eq!(rule.parse(&Cell::Number(7.0)), Some(7.0));
    }

    #[test]
    fn test_strict_pattern() {
        let rule = NumericRule::StrictPattern;
        assert_eq!(rule.parse_str("42"), Some(42.0));
        assert_eq!(rule.parse_str("-0.5"), Some(-0.5));
        assert_eq!(rule.parse_str(".5"), Some(0.5));
        assert_eq!(rule.parse_str("1e3"), None);
        assert_eq!(rule.parse_str("+4"), None);
        assert_eq!(rule.parse_str("5."), None);
        assert_eq!(rule.parse(&Cell::Number(12.25)), Some(12.25));
    }

    #[test]
    fn test_missing_rules() {
        let ws = Cell::text("   ");
        assert!(MissingRule::Structural.is_missing(&ws));
        assert!(!MissingRule::ExplicitOnly.is_missing(&ws));
        assert!(MissingRule::ExplicitOnly.is_missing(&Cell::text("")));
        assert!(MissingRule::ExplicitOnly.is_missing(&Cell::Null));
        assert!(!MissingRule::Structural.is_missing(&Cell::Number(0.0)));
    }

    #[test]
    fn test_boolean_and_date_heuristics() {
        assert!(is_boolean_string("YES"));
        assert!(is_boolean_string(" false "));
        assert!(!is_boolean_string("1"));
        assert!(looks_like_date("2024-01-05"));
        assert!(looks_like_date("1/2/2024"));
        assert!(looks_like_date("abc-1"));
        assert!(!looks_like_date("a-b"));
        assert!(!looks_like_date("20240105"));
    }

    #[test]
    fn test_row_key_pads_and_is_type_sensitive() {
        let short = vec![Cell::Number(1.0)];
        let padded = vec![Cell::Number(1.0), Cell::text("")];
        assert_eq!(row_key(&short, 2), row_key(&padded, 2));
        assert_ne!(
            row_key(&[Cell::Number(1.0)], 1),
            row_key(&[Cell::text("1")], 1)
        );
        assert_ne!(row_key(&[Cell::Null], 1), row_key(&[Cell::text("")], 1));
    }

    #[test]
    fn test_row_key_keeps_non_finite_numbers_apart() {
        let nan = row_key(&[Cell::Number(f64::NAN)], 1);
        assert_ne!(nan, row_key(&[Cell::Null], 1));
        assert_ne!(nan, row_key(&[Cell::text("NaN")], 1));
        assert_ne!(
            row_key(&[Cell::Number(f64::INFINITY)], 1),
            row_key(&[Cell::Number(f64::NEG_INFINITY)], 1)
        );
        assert_eq!(nan, row_key(&[Cell::Number(f64::NAN)], 1));
        assert_eq!(row_key(&[Cell::Number(1.5)], 1), "[1.5]");
    }
}
