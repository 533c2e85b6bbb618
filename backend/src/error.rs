//! Error types for the Paysheet transformation engine.
//!
//! One error enum per layer:
//!
//! - [`SheetError`] - Reading a source file into rows
//! - [`TransformError`] - Ledger, payroll and payslip engines
//! - [`ConfigError`] - Configuration and company selection
//! - [`ExportError`] - Serialising records to JSON or CSV
//! - [`PipelineError`] - Top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries. Every error also
//! carries a stable machine-readable [`code`](PipelineError::code).

use thiserror::Error;

// =============================================================================
// Sheet Reader Errors
// =============================================================================

/// Errors while turning source bytes into sheets of rows.
#[derive(Debug, Error)]
pub enum SheetError {
    /// Failed to read the file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// The bytes could not be decoded as a spreadsheet.
    #[error("Unreadable source: {0}")]
    Unreadable(String),

    /// File extension is not a known spreadsheet format.
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Workbook decoded but contains no sheets.
    #[error("Workbook contains no sheets")]
    NoSheets,
}

impl SheetError {
    pub fn code(&self) -> &'static str {
        match self {
            SheetError::Io(_) | SheetError::Unreadable(_) => "UNREADABLE_SOURCE",
            SheetError::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            SheetError::NoSheets => "NO_SHEETS",
        }
    }
}

// =============================================================================
// Transformation Errors
// =============================================================================

/// Errors raised by the row transformers.
///
/// Skipped rows are never errors; these variants are fatal to one invocation.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The sheet has zero rows.
    #[error("The sheet is empty")]
    EmptySheet,

    /// A required header was not found in the header row.
    #[error("\"{column}\" column not found in the sheet. Available columns: {}", .available.join(", "))]
    MissingRequiredColumn {
        column: String,
        available: Vec<String>,
    },

    /// The configured header row lies beyond the end of the sheet.
    #[error("Header row {index} is out of range (sheet has {row_count} rows)")]
    MissingHeaderRow { index: usize, row_count: usize },
}

impl TransformError {
    pub fn code(&self) -> &'static str {
        match self {
            TransformError::EmptySheet => "EMPTY_SHEET",
            TransformError::MissingRequiredColumn { .. } => "MISSING_REQUIRED_COLUMN",
            TransformError::MissingHeaderRow { .. } => "MISSING_HEADER_ROW",
        }
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while building configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A configuration value could not be parsed.
    #[error("Invalid value for '{key}': {value}")]
    InvalidValue { key: String, value: String },

    /// No company schema with this id.
    #[error("Unknown company: {0}")]
    UnknownCompany(String),
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::InvalidValue { .. } => "INVALID_CONFIG",
            ConfigError::UnknownCompany(_) => "UNKNOWN_COMPANY",
        }
    }
}

// =============================================================================
// Export Errors
// =============================================================================

/// Errors while serialising output records.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("JSON serialisation failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV serialisation failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

impl ExportError {
    pub fn code(&self) -> &'static str {
        "EXPORT_FAILED"
    }
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline orchestration errors.
///
/// This is the error type returned by the functions in
/// [`crate::transform::pipeline`]. It wraps all lower-level errors.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Sheet reading error.
    #[error("Sheet error: {0}")]
    Sheet(#[from] SheetError),

    /// Transformation error.
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Output serialisation error.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// IO error outside the sheet reader (e.g. writing output).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A concurrent job did not run to completion.
    #[error("Task failed: {0}")]
    Task(String),
}

impl PipelineError {
    /// Stable error code for callers that need to branch on the failure kind.
    pub fn code(&self) -> &'static str {
        match self {
            PipelineError::Sheet(e) => e.code(),
            PipelineError::Transform(e) => e.code(),
            PipelineError::Config(e) => e.code(),
            PipelineError::Export(e) => e.code(),
            PipelineError::Io(_) => "IO_ERROR",
            PipelineError::Task(_) => "TASK_FAILED",
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for sheet reading.
pub type SheetResult<T> = Result<T, SheetError>;

/// Result type for transformation operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// Result type for configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        let sheet_err = SheetError::Unreadable("bad zip".into());
        let pipeline_err: PipelineError = sheet_err.into();
        assert!(pipeline_err.to_string().contains("bad zip"));
        assert_eq!(pipeline_err.code(), "UNREADABLE_SOURCE");

        let transform_err = TransformError::EmptySheet;
        let pipeline_err: PipelineError = transform_err.into();
        assert!(pipeline_err.to_string().contains("empty"));
        assert_eq!(pipeline_err.code(), "EMPTY_SHEET");
    }

    #[test]
    fn test_missing_column_lists_available_headers() {
        let err = TransformError::MissingRequiredColumn {
            column: "Cost Centre".into(),
            available: vec!["Employee".into(), "Basic".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("\"Cost Centre\" column not found"));
        assert!(msg.contains("Available columns: Employee, Basic"));
        assert_eq!(err.code(), "MISSING_REQUIRED_COLUMN");
    }

    #[test]
    fn test_config_error_format() {
        let err = ConfigError::InvalidValue {
            key: "PAYSHEET_COST_CENTRE_INDEX".into(),
            value: "abc".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("PAYSHEET_COST_CENTRE_INDEX"));
        assert!(msg.contains("abc"));
    }
}
