//! Date handling for spreadsheet cells.
//!
//! Dates reach us either as Excel serial numbers or as text that a person
//! typed. Display form is `D-MMM-YY` (`5-Jan-26`).

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Cell;

/// Serials at or above this are not treated as dates.
const MAX_SERIAL: f64 = 1_000_000.0;

const DISPLAY_FORMAT: &str = "%-d-%b-%y";

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%d/%m/%y", "%m/%d/%Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const FULL_MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

static MONTH_WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:^|[^a-z])(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?(?:$|[^a-z])",
    )
    .expect("valid regex")
});

static SHEET_MONTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)({})\s*'?([0-9]{{2,4}})", FULL_MONTHS.join("|"))).expect("valid regex")
});

/// Convert an Excel serial to a calendar date.
///
/// `1900-01-01 + (serial - 2)` days: Excel counts from 1 and also counts the
/// non-existent 29 Feb 1900. Fractions (time of day) are dropped.
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial <= 0.0 || serial >= MAX_SERIAL {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1900, 1, 1)?;
    epoch.checked_add_signed(Duration::days(serial.floor() as i64 - 2))
}

/// Render a date as `D-MMM-YY`.
pub fn display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// True when the text names a month (`Jan`, `sept.`, `December`).
pub fn has_month_name(text: &str) -> bool {
    MONTH_WORD.is_match(text)
}

/// Parse common numeric date layouts, day-first before month-first.
pub fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive()))
}

/// Whether a cell can serve as a ledger context date.
pub fn is_date_like(cell: &Cell) -> bool {
    match cell {
        Cell::Empty => false,
        Cell::Number(n) => excel_serial_to_date(*n).is_some(),
        Cell::Text(s) => {
            let s = s.trim();
            parse_date_text(s).is_some()
                || (has_month_name(s) && s.chars().any(|c| c.is_ascii_digit()))
        }
    }
}

/// Presentation form of a date cell.
///
/// Serials become `D-MMM-YY`. Text that already names a month is kept as
/// typed; other parseable text is reformatted; the rest passes through.
pub fn format_date_cell(cell: &Cell) -> String {
    match cell {
        Cell::Empty => String::new(),
        Cell::Number(n) => excel_serial_to_date(*n)
            .map(display_date)
            .unwrap_or_else(|| cell.as_text()),
        Cell::Text(s) => {
            let s = s.trim();
            if has_month_name(s) {
                return s.to_string();
            }
            parse_date_text(s)
                .map(display_date)
                .unwrap_or_else(|| s.to_string())
        }
    }
}

/// Month label from a sheet name: `"January 2026"` → `"Jan 26"`.
///
/// Names without a full month name and year are returned unchanged.
pub fn month_label_from_sheet(sheet_name: &str) -> String {
    let Some(caps) = SHEET_MONTH.captures(sheet_name) else {
        return sheet_name.to_string();
    };
    let month = &caps[1];
    let year = &caps[2];

    let mut short: String = month.chars().take(1).flat_map(char::to_uppercase).collect();
    short.extend(month.chars().skip(1).take(2).flat_map(char::to_lowercase));
    let year: String = year.chars().skip(year.chars().count().saturating_sub(2)).collect();

    format!("{} {}", short, year)
}
