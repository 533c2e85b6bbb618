//! Ledger reconstruction.
//!
//! Ledger exports interleave *context rows* (a posting date, a group name)
//! with *transaction rows* that inherit that context by position:
//!
//! ```text
//! row  A (date)     B (group / cc)  C (amount)  D (type)  E (description)
//! 2    01-Apr-2024  Travel
//! 3                 Sales           1,200       Dr        Taxi
//! 4                 Admin           300         Cr        Refund
//! 5    02-Apr-2024  Office
//! 6                 Admin           80          Dr        Paper
//! ```
//!
//! Rows 3 and 4 carry `(01-Apr-2024, Travel)`; row 6 carries
//! `(02-Apr-2024, Office)`. The first two rows are report metadata and are
//! never read.

use serde::Serialize;

use crate::config::LedgerConfig;
use crate::error::{TransformError, TransformResult};
use crate::models::{cell_at, Cell, Row, TransactionRecord, TransactionType};
use crate::primitives::{clean_numeric, format_date_cell, is_date_like};

/// Leading metadata rows.
pub const METADATA_ROWS: usize = 2;

/// Column of the posting date on context rows.
pub const DATE_COLUMN: usize = 0;

/// Column of the amount on transaction rows.
pub const AMOUNT_COLUMN: usize = 2;

/// Column holding the `DR` / `CR` marker.
pub const TYPE_COLUMN: usize = 3;

/// Column of the description on transaction rows.
pub const DESCRIPTION_COLUMN: usize = 4;

/// Most recent context seen. Fields persist until replaced by a non-empty value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderContext {
    pub date: Cell,
    pub header_group_name: String,
}

impl HeaderContext {
    /// Context after reading a context row.
    pub fn absorb(self, row: &[Cell], config: &LedgerConfig) -> Self {
        let date_cell = cell_at(row, DATE_COLUMN);
        let date = if !date_cell.is_blank() && is_date_like(date_cell) {
            match date_cell {
                Cell::Text(s) => Cell::Text(s.trim().to_string()),
                other => other.clone(),
            }
        } else {
            self.date
        };

        let group = cell_at(row, config.header_group_name_index).trimmed();
        let header_group_name = if group.is_empty() {
            self.header_group_name
        } else {
            group
        };

        Self {
            date,
            header_group_name,
        }
    }

    /// Materialize a transaction row under this context.
    pub fn emit(&self, row: &[Cell], kind: TransactionType, config: &LedgerConfig) -> TransactionRecord {
        let original_amount = clean_numeric(cell_at(row, AMOUNT_COLUMN));
        TransactionRecord {
            date: format_date_cell(&self.date),
            header_group_name: self.header_group_name.clone(),
            cost_centre: cell_at(row, config.cost_centre_index).trimmed(),
            transaction_type: kind,
            amount: kind.signed(original_amount),
            original_amount,
            description: cell_at(row, DESCRIPTION_COLUMN).trimmed(),
        }
    }
}

/// How a row participates in reconstruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// No cells at all.
    Blank,
    /// Type column holds `DR` or `CR`.
    Transaction(TransactionType),
    /// Anything else; may update the context.
    Context,
}

pub fn classify(row: &[Cell]) -> RowKind {
    if row.is_empty() {
        return RowKind::Blank;
    }
    match TransactionType::from_marker(&cell_at(row, TYPE_COLUMN).as_text()) {
        Some(kind) => RowKind::Transaction(kind),
        None => RowKind::Context,
    }
}

/// Records plus counts for one reconstruction pass.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerOutput {
    pub records: Vec<TransactionRecord>,
    /// Rows after the metadata region.
    pub rows_read: usize,
    /// Context rows that replaced at least one context field.
    pub context_rows: usize,
    /// Rows that produced nothing and changed nothing.
    pub skipped: usize,
}

/// Reconstruct ledger transactions from raw rows.
///
/// Fails only on a sheet with no rows at all.
pub fn reconstruct(rows: &[Row], config: &LedgerConfig) -> TransformResult<LedgerOutput> {
    if rows.is_empty() {
        return Err(TransformError::EmptySheet);
    }

    let data = rows.get(METADATA_ROWS..).unwrap_or(&[]);
    let (_, output) = data.iter().fold(
        (HeaderContext::default(), LedgerOutput::default()),
        |(context, mut output), row| {
            output.rows_read += 1;
            let context = match classify(row) {
                RowKind::Blank => {
                    output.skipped += 1;
                    context
                }
                RowKind::Transaction(kind) => {
                    output.records.push(context.emit(row, kind, config));
                    context
                }
                RowKind::Context => {
                    let next = context.clone().absorb(row, config);
                    if next == context {
                        output.skipped += 1;
                    } else {
                        output.context_rows += 1;
                    }
                    next
                }
            };
            (context, output)
        },
    );

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|c| Cell::text(*c)).collect()
    }

    fn metadata() -> Vec<Row> {
        vec![row(&["Ledger: Expenses"]), row(&["1-Apr-24 to 31-Mar-25"])]
    }

    fn config() -> LedgerConfig {
        LedgerConfig::default()
    }

    #[test]
    fn test_context_persists_across_transactions() {
        let mut rows = metadata();
        rows.push(row(&["01-Apr-2024", "Travel"]));
        rows.push(row(&["", "Sales", "1,200", "Dr", "Taxi"]));
        rows.push(row(&["", "Admin", "300", "Cr", "Refund"]));
        rows.push(row(&["", "HR", "50", "dr", "Lunch"]));
        rows.push(row(&["02-Apr-2024", "Office"]));
        rows.push(row(&["", "Admin", "80", "DR", "Paper"]));

        let out = reconstruct(&rows, &config()).unwrap();
        assert_eq!(out.records.len(), 4);
        for rec in &out.records[..3] {
            assert_eq!(rec.date, "01-Apr-2024");
            assert_eq!(rec.header_group_name, "Travel");
        }
        assert_eq!(out.records[3].date, "02-Apr-2024");
        assert_eq!(out.records[3].header_group_name, "Office");
        assert_eq!(out.context_rows, 2);
    }

    #[test]
    fn test_sign_normalization() {
        let mut rows = metadata();
        rows.push(row(&["", "Sales", "100", "CR", "x"]));
        rows.push(row(&["", "Sales", "100", "DR", "y"]));

        let out = reconstruct(&rows, &config()).unwrap();
        let credit = &out.records[0];
        assert_eq!(credit.transaction_type, TransactionType::Credit);
        assert_eq!(credit.amount, -100.0);
        assert_eq!(credit.original_amount, 100.0);

        let debit = &out.records[1];
        assert_eq!(debit.amount, 100.0);
        assert_eq!(debit.original_amount, 100.0);
    }

    #[test]
    fn test_transaction_before_context_has_empty_context() {
        let mut rows = metadata();
        rows.push(row(&["", "Sales", "10", "DR", "early"]));

        let out = reconstruct(&rows, &config()).unwrap();
        assert_eq!(out.records[0].date, "");
        assert_eq!(out.records[0].header_group_name, "");
        assert_eq!(out.records[0].cost_centre, "Sales");
    }

    #[test]
    fn test_serial_dates_are_formatted() {
        let mut rows = metadata();
        rows.push(vec![Cell::Number(46027.0), Cell::text("Rent")]);
        rows.push(row(&["", "Admin", "5000", "DR", "January rent"]));

        let out = reconstruct(&rows, &config()).unwrap();
        assert_eq!(out.records[0].date, "5-Jan-26");
    }

    #[test]
    fn test_non_date_text_keeps_previous_date() {
        let mut rows = metadata();
        rows.push(row(&["01-04-2024", "Travel"]));
        rows.push(row(&["Opening Balance", ""]));
        rows.push(row(&["", "Sales", "1", "DR", ""]));

        let out = reconstruct(&rows, &config()).unwrap();
        assert_eq!(out.records[0].date, "1-Apr-24");
        assert_eq!(out.records[0].header_group_name, "Travel");
    }

    #[test]
    fn test_metadata_rows_are_ignored() {
        let rows = vec![
            row(&["", "Sales", "99", "DR", "looks like a transaction"]),
            row(&["01-Apr-2024", "Metadata group"]),
            row(&["", "Sales", "1", "DR", "real"]),
        ];

        let out = reconstruct(&rows, &config()).unwrap();
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].header_group_name, "");
        assert_eq!(out.rows_read, 1);
    }

    #[test]
    fn test_configured_indices() {
        let config = LedgerConfig::default()
            .with_header_group_name_index(4)
            .with_cost_centre_index(5);
        let mut rows = metadata();
        rows.push(row(&["01-Apr-2024", "", "", "", "Capex"]));
        rows.push(row(&["", "", "10", "DR", "Laptop", "IT"]));

        let out = reconstruct(&rows, &config).unwrap();
        assert_eq!(out.records[0].header_group_name, "Capex");
        assert_eq!(out.records[0].cost_centre, "IT");
    }

    #[test]
    fn test_unparseable_amount_is_zero() {
        let mut rows = metadata();
        rows.push(row(&["", "Sales", "n/a", "CR", ""]));

        let out = reconstruct(&rows, &config()).unwrap();
        assert_eq!(out.records[0].amount, 0.0);
        assert_eq!(out.records[0].original_amount, 0.0);
    }

    #[test]
    fn test_blank_rows_are_skipped() {
        let mut rows = metadata();
        rows.push(vec![]);
        rows.push(row(&["", ""]));
        rows.push(row(&["", "Sales", "1", "DR", ""]));

        let out = reconstruct(&rows, &config()).unwrap();
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.skipped, 2);
    }

    #[test]
    fn test_empty_sheet_is_an_error() {
        assert!(matches!(
            reconstruct(&[], &config()),
            Err(TransformError::EmptySheet)
        ));
    }

    #[test]
    fn test_metadata_only_sheet_yields_nothing() {
        let out = reconstruct(&metadata(), &config()).unwrap();
        assert!(out.records.is_empty());
        assert_eq!(out.rows_read, 0);
    }
}
