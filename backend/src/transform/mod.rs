//! Transformation module.
//!
//! Each transformer turns raw sheet rows into typed records:
//! - Ledger: positional context reconstruction into transactions
//! - Payroll: cost-centre grouping and summation
//! - Payslip: per-company header mapping into payslip records
//! - Statement: presentation-ready payslip content
//! - Pipeline: file loading, sheet selection and batch processing

pub mod ledger;
pub mod payroll;
pub mod payslip;
pub mod pipeline;
pub mod statement;

pub use ledger::{reconstruct, HeaderContext, LedgerOutput, RowKind};
pub use payroll::{aggregate, PayrollOutput};
pub use payslip::{map_employees, ColumnIndex, PayslipOutput};
pub use pipeline::*;
pub use statement::{build_statement, build_statements, DetailItem, LineItem, PayslipStatement};
