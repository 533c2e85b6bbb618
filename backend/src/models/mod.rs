//! Domain models for the Paysheet transformation engine.
//!
//! This module contains the core data structures used throughout the pipeline:
//!
//! - [`Cell`] / [`Row`] / [`Sheet`] - Raw spreadsheet input
//! - [`TransactionRecord`] - Reconstructed ledger transaction
//! - [`AggregatedRow`] - One cost-centre summary row (or the Grand Total)
//! - [`PayslipRecord`] - Normalized per-employee payslip fields

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

// =============================================================================
// Raw Input
// =============================================================================

/// A single spreadsheet cell value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// Blank cell.
    #[default]
    Empty,
    /// Numeric cell (dates arrive as Excel serials).
    Number(f64),
    /// Text cell, untrimmed.
    Text(String),
}

impl Cell {
    /// Build a text cell, mapping the empty string to [`Cell::Empty`].
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value)
        }
    }

    /// True for blank cells and empty strings.
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.is_empty(),
            Cell::Number(_) => false,
        }
    }

    /// True when the cell's text form is blank after trimming.
    pub fn is_blank(&self) -> bool {
        self.trimmed().is_empty()
    }

    /// Text form of the cell. Integral numbers render without a fractional part.
    pub fn as_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => format_number(*n),
        }
    }

    /// Trimmed text form of the cell.
    pub fn trimmed(&self) -> String {
        match self {
            Cell::Text(s) => s.trim().to_string(),
            other => other.as_text(),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::text(value)
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::text(value)
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

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// An ordered list of cells. Index-addressed; no inherent schema.
pub type Row = Vec<Cell>;

/// Cell at `index`, or [`Cell::Empty`] when the row is shorter.
pub fn cell_at(row: &[Cell], index: usize) -> &Cell {
    static EMPTY: Cell = Cell::Empty;
    row.get(index).unwrap_or(&EMPTY)
}

/// A named sheet of rows as produced by the sheet reader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Row>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }
}

// =============================================================================
// Ledger
// =============================================================================

/// Debit/credit marker of a ledger transaction row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    #[serde(rename = "DR")]
    Debit,
    #[serde(rename = "CR")]
    Credit,
}

impl TransactionType {
    /// Parse a type-column value (trimmed, case-insensitive).
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker.trim().to_uppercase().as_str() {
            "DR" => Some(Self::Debit),
            "CR" => Some(Self::Credit),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debit => "DR",
            Self::Credit => "CR",
        }
    }

    /// Apply the sign convention: credits are negated.
    pub fn signed(&self, amount: f64) -> f64 {
        match self {
            Self::Debit => amount,
            Self::Credit => -amount,
        }
    }
}

/// A ledger transaction merged with the header context that preceded it.
///
/// `amount` is `original_amount` for debits and its negation for credits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Header Group Name")]
    pub header_group_name: String,
    #[serde(rename = "Cost Centre")]
    pub cost_centre: String,
    #[serde(rename = "Transaction Type")]
    pub transaction_type: TransactionType,
    #[serde(rename = "Amount")]
    pub amount: f64,
    #[serde(rename = "Original Amount")]
    pub original_amount: f64,
    #[serde(rename = "Description")]
    pub description: String,
}

// =============================================================================
// Payroll
// =============================================================================

/// Value of one field in an [`AggregatedRow`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl FieldValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Number(_) => None,
        }
    }
}

/// One projected output row, fields in the declared schema order.
///
/// Serializes as a map whose key order is the schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedRow {
    fields: Vec<(String, FieldValue)>,
}

/// Label of the synthetic total row.
pub const GRAND_TOTAL_LABEL: &str = "Grand Total";

impl AggregatedRow {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Append a field. Order of calls is the output order.
    pub fn push(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.push((name.into(), value));
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Numeric value of a field, `None` for text or unknown fields.
    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(FieldValue::as_number)
    }

    /// Text value of a field, `None` for numeric or unknown fields.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }

    /// Field names in output order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn fields(&self) -> &[(String, FieldValue)] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Default for AggregatedRow {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for AggregatedRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

// =============================================================================
// Payslip
// =============================================================================

/// Normalized per-employee payslip record.
///
/// Optional earning components are omitted when zero; the three derived
/// totals are always present.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayslipRecord {
    // Identity
    pub employee_name: String,
    pub designation: String,
    pub emp_id: String,
    pub location: String,
    pub date_of_joining: String,
    pub effective_days: String,
    pub days_in_month: String,
    pub lop: String,
    pub bank_name: String,
    pub bank_account: String,
    pub ifsc_code: String,
    pub pf_uan: String,
    pub pan_no: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub esi_no: Option<String>,
    pub month_label: String,

    // Earnings
    pub basic: f64,
    pub hra: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conveyance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_allowance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children_allowance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statutory_bonus: Option<f64>,
    pub lta: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_allowance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telephone_allowance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport_allowance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrears_salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrears: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_payments: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_allowances: Option<f64>,
    pub gross_earning: f64,
    pub pf_employer: f64,
    pub total_earnings: f64,

    // Deductions
    pub pf_employee: f64,
    pub professional_tax: f64,
    pub tds: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub esi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_advance_recovery: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_deduction: Option<f64>,
    pub total_deductions: f64,
    pub net_pay: f64,

    // Meta
    pub company_name: String,
    pub company_address: String,
}

impl PayslipRecord {
    /// Filesystem-safe stem for this employee's payslip document.
    pub fn file_stem(&self) -> String {
        let join = |s: &str| s.split_whitespace().collect::<Vec<_>>().join("_");
        format!(
            "{}_{}_{}",
            self.emp_id,
            join(&self.employee_name),
            join(&self.month_label)
        )
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
    }
}
