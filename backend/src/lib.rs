//! # Paysheet - accounting and payroll spreadsheet transformation
//!
//! Paysheet turns raw spreadsheet exports (CSV or Excel) into clean, typed
//! records: ledger transactions with their inherited context, cost-centre
//! payroll summaries, and per-employee payslips.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌──────────────────┐     ┌─────────────┐
//! │ CSV / XLSX  │────▶│   Parser    │────▶│    Transform     │────▶│   Export    │
//! │   (bytes)   │     │ (auto-enc,  │     │ ledger / payroll │     │ (JSON, CSV) │
//! │             │     │  sheets)    │     │ payslip          │     │             │
//! └─────────────┘     └─────────────┘     └──────────────────┘     └─────────────┘
//!                                                  ▲
//!                                        ┌─────────┴────────┐
//!                                        │ Schemas + config │
//!                                        └──────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use paysheet::{process_ledger_file, LedgerConfig};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = LedgerConfig::from_env().unwrap();
//!     let report = process_ledger_file(Path::new("ledger.csv"), &config).await.unwrap();
//!     println!("{}", report.message());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`config`] - Ledger column configuration and pipeline options
//! - [`logs`] - Log broadcaster and helpers
//! - [`models`] - Domain models (Cell, TransactionRecord, AggregatedRow, PayslipRecord)
//! - [`primitives`] - Numeric coercion, dates, amounts in words
//! - [`schema`] - Payroll and per-company payslip schemas
//! - [`parser`] - CSV and workbook reading with auto-detection
//! - [`transform`] - Ledger, payroll and payslip engines plus the pipeline
//! - [`export`] - JSON and CSV output

// Core modules
pub mod config;
pub mod error;
pub mod logs;
pub mod models;

// Value handling
pub mod primitives;
pub mod schema;

// Parsing
pub mod parser;

// Transformation
pub mod transform;

// Output
pub mod export;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    ConfigError, ExportError, PipelineError, PipelineResult, SheetError, TransformError,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    AggregatedRow, Cell, FieldValue, PayslipRecord, Row, Sheet, TransactionRecord,
    TransactionType, GRAND_TOTAL_LABEL,
};

// =============================================================================
// Re-exports - Configuration
// =============================================================================

pub use config::{LedgerConfig, PipelineOptions};

// =============================================================================
// Re-exports - Schemas
// =============================================================================

pub use schema::{companies, CompanyId, CompanySchema, PayrollSchema, PayslipField};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{read_bytes, read_file, SourceFormat, Workbook};

// =============================================================================
// Re-exports - Engines
// =============================================================================

pub use transform::{
    aggregate, build_statement, build_statements, map_employees, reconstruct, LedgerOutput,
    PayrollOutput, PayslipOutput, PayslipStatement,
};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::pipeline::{
    load_workbook, process_ledger_file, process_ledger_files, process_many,
    process_payroll_file, process_payslip_file, LedgerReport, PayrollReport, PayslipReport,
    Report,
};

// =============================================================================
// Re-exports - Export
// =============================================================================

pub use export::{
    aggregated_to_csv, payslips_to_csv, statements_to_csv, to_json, transactions_to_csv,
    OutputFormat,
};
