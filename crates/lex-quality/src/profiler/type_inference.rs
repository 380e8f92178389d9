//! Per-cell type classification.

use crate::types::{Cell, CellType};
use crate::utils::{MissingRule, NumericRule, cell_text, is_boolean_string, looks_like_date};

/// Classify one cell into {numeric, text, date, boolean, empty}.
///
/// Rules are applied in order to the trimmed string form of the cell:
/// missing (structural rule), boolean word, date heuristic, number, text.
/// Because the date check runs before the numeric check, a value such as
/// `-5` classifies as a date.
pub fn classify_cell(cell: &Cell, rule: NumericRule) -> CellType {
    if MissingRule::Structural.is_missing(cell) {
        return CellType::Empty;
    }
    classify_present(cell, rule)
}

/// Classify a cell already known to be present.
///
/// Used directly by the consistency dimension, which filters missing values
/// with its own (narrower) rule and then votes on everything else. A
/// whitespace-only cell reaching this function classifies as text.
pub(crate) fn classify_present(cell: &Cell, rule: NumericRule) -> CellType {
    let text = cell_text(cell);
    let trimmed = text.trim();

    if is_boolean_string(trimmed) {
        CellType::Boolean
    } else if looks_like_date(trimmed) {
        CellType::Date
    } else if rule.parse_str(trimmed).is_some() {
        CellType::Numeric
    } else {
        CellType::Text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(cell: impl Into<Cell>) -> CellType {
        classify_cell(&cell.into(), NumericRule::LenientParse)
    }

    #[test]
    fn test_missing_values() {
        assert_eq!(classify(""), CellType::Empty);
        assert_eq!(classify("   "), CellType::Empty);
        assert_eq!(classify(Cell::Null), CellType::Empty);
    }

    #[test]
    fn test_boolean_words() {
        assert_eq!(classify("TRUE"), CellType::Boolean);
        assert_eq!(classify(" no "), CellType::Boolean);
        assert_eq!(classify("y"), CellType::Text);
    }

    #[test]
    fn test_date_heuristic_is_permissive() {
        assert_eq!(classify("2023-04-01"), CellType::Date);
        assert_eq!(classify("04/01/2023"), CellType::Date);
        assert_eq!(classify("abc-1"), CellType::Date);
        assert_eq!(classify("-5"), CellType::Date);
        assert_eq!(classify(-5i64), CellType::Date);
        assert_eq!(classify("a-b"), CellType::Text);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(classify("42"), CellType::Numeric);
        assert_eq!(classify(" 3.14 "), CellType::Numeric);
        assert_eq!(classify(7.5), CellType::Numeric);
        assert_eq!(classify("1e3"), CellType::Numeric);
        assert_eq!(classify("12abc"), CellType::Text);
    }

    #[test]
    fn test_strict_rule_rejects_exponent() {
        assert_eq!(
            classify_cell(&Cell::text("1e3"), NumericRule::StrictPattern),
            CellType::Text
        );
        assert_eq!(
            classify_cell(&Cell::text("10.5"), NumericRule::StrictPattern),
            CellType::Numeric
        );
    }

    #[test]
    fn test_present_whitespace_is_text() {
        assert_eq!(
            classify_present(&Cell::text("  "), NumericRule::LenientParse),
            CellType::Text
        );
    }
}
