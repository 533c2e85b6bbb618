//! Lenient numeric coercion for spreadsheet cells.
//!
//! Source sheets carry amounts as numbers, as thousands-separated text
//! (`"1,000"`), or annotated with a currency (`"₹ 2,500.00"`). All of them
//! coerce to `f64`; anything unparseable is `0`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Cell;

static NON_NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9.\-]").expect("valid regex"));

static LEADING_FLOAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?(?:\d+\.?\d*|\.\d+)").expect("valid regex"));

/// Coerce a cell to a number.
///
/// - empty → `0`
/// - number → itself (`NaN` → `0`)
/// - text → every character outside `[0-9.-]` is removed and the longest
///   leading float is parsed; no float → `0`
pub fn clean_numeric(cell: &Cell) -> f64 {
    match cell {
        Cell::Empty => 0.0,
        Cell::Number(n) if n.is_nan() => 0.0,
        Cell::Number(n) => *n,
        Cell::Text(s) => parse_lenient(s),
    }
}

/// Text half of [`clean_numeric`].
pub fn parse_lenient(text: &str) -> f64 {
    let cleaned = NON_NUMERIC.replace_all(text.trim(), "");
    LEADING_FLOAT
        .find(&cleaned)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|n| !n.is_nan())
        .unwrap_or(0.0)
}

/// Round to a whole number and group digits the Indian way
/// (last three digits, then pairs): `173033` → `"1,73,033"`.
pub fn format_inr(amount: f64) -> String {
    if !amount.is_finite() {
        return "0".to_string();
    }
    let rounded = amount.round();
    if rounded == 0.0 {
        return "0".to_string();
    }

    let digits = format!("{}", rounded.abs() as u128);
    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut pairs: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(2);
            pairs.push(&head[start..end]);
            end = start;
        }
        pairs.reverse();
        format!("{},{}", pairs.join(","), tail)
    };

    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_nan_are_zero() {
        assert_eq!(clean_numeric(&Cell::Empty), 0.0);
        assert_eq!(clean_numeric(&Cell::Number(f64::NAN)), 0.0);
        assert_eq!(clean_numeric(&Cell::text("")), 0.0);
    }

    #[test]
    fn test_numbers_pass_through() {
        assert_eq!(clean_numeric(&Cell::Number(1234.5)), 1234.5);
        assert_eq!(clean_numeric(&Cell::Number(-20.0)), -20.0);
    }

    #[test]
    fn test_separated_and_annotated_text() {
        assert_eq!(clean_numeric(&Cell::text("1,000")), 1000.0);
        assert_eq!(clean_numeric(&Cell::text("₹ 2,500.75")), 2500.75);
        assert_eq!(clean_numeric(&Cell::text("INR 1,73,033")), 173033.0);
        // a stray dot survives cleanup and leads the number
        assert_eq!(clean_numeric(&Cell::text("Rs. 50")), 0.5);
        assert_eq!(clean_numeric(&Cell::text(" -45 ")), -45.0);
    }

    #[test]
    fn test_unparseable_text_is_zero() {
        assert_eq!(clean_numeric(&Cell::text("N/A")), 0.0);
        assert_eq!(clean_numeric(&Cell::text("-")), 0.0);
        assert_eq!(clean_numeric(&Cell::text("--5")), 0.0);
    }

    #[test]
    fn test_longest_leading_float_wins() {
        assert_eq!(parse_lenient("1.2.3"), 1.2);
        assert_eq!(parse_lenient("12-5"), 12.0);
        assert_eq!(parse_lenient(".5"), 0.5);
    }

    #[test]
    fn test_format_inr_grouping() {
        assert_eq!(format_inr(0.0), "0");
        assert_eq!(format_inr(0.4), "0");
        assert_eq!(format_inr(999.0), "999");
        assert_eq!(format_inr(1000.0), "1,000");
        assert_eq!(format_inr(173033.0), "1,73,033");
        assert_eq!(format_inr(12345678.6), "1,23,45,679");
        assert_eq!(format_inr(-250000.0), "-2,50,000");
    }
}
