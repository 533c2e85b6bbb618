//! High-level pipeline API: source file to records.
//!
//! Each entry point reads a file, selects a sheet, runs one engine and logs
//! what happened. Several files can be processed at once; each is an
//! independent task and fails on its own.
//!
//! # Example
//!
//! ```rust,ignore
//! use paysheet::{process_payroll_file, PayrollSchema, PipelineOptions};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let report = process_payroll_file(
//!         Path::new("payroll.xlsx"),
//!         &PayrollSchema::cost_centre_summary(),
//!         &PipelineOptions::default().with_sheet("Jan 2026"),
//!     ).await?;
//!
//!     println!("{} cost centres", report.output.groups);
//!     Ok(())
//! }
//! ```

use futures::future::join_all;
use serde::Serialize;
use std::future::Future;
use std::path::{Path, PathBuf};

use crate::config::{LedgerConfig, PipelineOptions};
use crate::error::{PipelineError, PipelineResult};
use crate::logs::{log_info, log_info_indent, log_success, log_warning};
use crate::parser::{self, file_stem, SourceFormat, Workbook};
use crate::schema::{CompanyId, PayrollSchema};
use crate::transform::ledger::{reconstruct, LedgerOutput};
use crate::transform::payroll::{aggregate, PayrollOutput};
use crate::transform::payslip::{map_employees, PayslipOutput};

/// Output of one engine run together with where it came from.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report<T> {
    pub source: String,
    pub sheet_name: String,
    pub output: T,
}

pub type LedgerReport = Report<LedgerOutput>;
pub type PayrollReport = Report<PayrollOutput>;
pub type PayslipReport = Report<PayslipOutput>;

impl LedgerReport {
    pub fn message(&self) -> String {
        format!("Successfully processed {} transactions", self.output.records.len())
    }
}

impl PayrollReport {
    pub fn message(&self) -> String {
        format!(
            "Successfully processed {} cost centres from sheet \"{}\" (including Grand Total)",
            self.output.groups, self.sheet_name
        )
    }
}

impl PayslipReport {
    pub fn message(&self) -> String {
        format!(
            "Successfully mapped {} employees for {} from sheet \"{}\"",
            self.output.records.len(),
            self.output.month_label,
            self.sheet_name
        )
    }
}

// =============================================================================
// Reading
// =============================================================================

/// Read and decode a source file.
///
/// Bytes are read asynchronously; decoding runs on the blocking pool.
pub async fn load_workbook(path: &Path) -> PipelineResult<Workbook> {
    let format = SourceFormat::from_path(path)?;
    log_info(format!("📖 Reading {}...", path.display()));

    let bytes = tokio::fs::read(path).await.map_err(parser_io)?;
    let stem = file_stem(path);
    let workbook = tokio::task::spawn_blocking(move || parser::read_bytes(bytes, format, &stem))
        .await
        .map_err(|e| PipelineError::Task(e.to_string()))??;

    log_success(format!(
        "Read {} sheet(s): {}",
        workbook.sheets.len(),
        workbook.sheet_names().join(", ")
    ));
    Ok(workbook)
}

fn parser_io(e: std::io::Error) -> PipelineError {
    PipelineError::Sheet(e.into())
}

// =============================================================================
// Engines
// =============================================================================

/// Reconstruct ledger transactions from the first sheet of `path`.
pub async fn process_ledger_file(path: &Path, config: &LedgerConfig) -> PipelineResult<LedgerReport> {
    let workbook = load_workbook(path).await?;
    let sheet = workbook.select_sheet(None, None)?;
    log_info(format!(
        "🔄 Reconstructing ledger from \"{}\" (group column {}, cost centre column {})",
        sheet.name, config.header_group_name_index, config.cost_centre_index
    ));

    let output = reconstruct(&sheet.rows, config)?;
    log_info_indent(
        format!("{} rows read, {} context rows", output.rows_read, output.context_rows),
        1,
    );
    if output.skipped > 0 {
        log_warning(format!("{} rows skipped", output.skipped));
    }

    let report = Report {
        source: path.display().to_string(),
        sheet_name: sheet.name.clone(),
        output,
    };
    log_success(report.message());
    Ok(report)
}

/// Aggregate the requested sheet (or the first) of `path` by cost centre.
pub async fn process_payroll_file(
    path: &Path,
    schema: &PayrollSchema,
    options: &PipelineOptions,
) -> PipelineResult<PayrollReport> {
    let workbook = load_workbook(path).await?;
    let sheet = workbook.select_sheet(options.sheet_name.as_deref(), None)?;
    warn_if_fallback(options.sheet_name.as_deref(), &sheet.name);
    log_info(format!("📦 Grouping \"{}\" by {}...", sheet.name, schema.key_column));

    let output = aggregate(&sheet.rows, schema)?;
    log_info_indent(format!("{} data rows read", output.rows_read), 1);
    if output.skipped > 0 {
        log_warning(format!("{} rows without a {} skipped", output.skipped, schema.key_column));
    }

    let report = Report {
        source: path.display().to_string(),
        sheet_name: sheet.name.clone(),
        output,
    };
    log_success(report.message());
    Ok(report)
}

/// Map employee rows of `path` using the company's schema.
///
/// Sheet: requested, else the company default, else the first.
pub async fn process_payslip_file(
    path: &Path,
    company: CompanyId,
    options: &PipelineOptions,
) -> PipelineResult<PayslipReport> {
    let schema = company.schema();
    let workbook = load_workbook(path).await?;
    let sheet = workbook.select_sheet(options.sheet_name.as_deref(), Some(schema.default_sheet_name))?;
    warn_if_fallback(options.sheet_name.as_deref(), &sheet.name);
    log_info(format!(
        "🗺️  Mapping \"{}\" with the {} schema (header row {})",
        sheet.name,
        schema.label,
        schema.header_row_index + 1
    ));

    let output = map_employees(&sheet.rows, schema, &sheet.name, options.month_label.as_deref())?;
    if !output.unresolved.is_empty() {
        log_warning(format!("{} mapped column(s) not found:", output.unresolved.len()));
        for field in &output.unresolved {
            if let Some(header) = schema.header_for(*field) {
                log_info_indent(format!("{:?} ← \"{}\"", field, header), 1);
            }
        }
    }
    if output.skipped > 0 {
        log_info_indent(format!("{} rows without an employee name skipped", output.skipped), 1);
    }

    let report = Report {
        source: path.display().to_string(),
        sheet_name: sheet.name.clone(),
        output,
    };
    log_success(report.message());
    Ok(report)
}

fn warn_if_fallback(requested: Option<&str>, chosen: &str) {
    if let Some(requested) = requested {
        if requested != chosen {
            log_warning(format!("Sheet \"{}\" not found, using \"{}\"", requested, chosen));
        }
    }
}

// =============================================================================
// Batches
// =============================================================================

/// Run `job` for every path concurrently. Results keep input order.
pub async fn process_many<T, F, Fut>(paths: Vec<PathBuf>, job: F) -> Vec<PipelineResult<T>>
where
    T: Send + 'static,
    F: Fn(PathBuf) -> Fut,
    Fut: Future<Output = PipelineResult<T>> + Send + 'static,
{
    let handles: Vec<_> = paths.into_iter().map(|path| tokio::spawn(job(path))).collect();

    join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.unwrap_or_else(|e| Err(PipelineError::Task(e.to_string()))))
        .collect()
}

/// [`process_ledger_file`] over many files.
pub async fn process_ledger_files(
    paths: Vec<PathBuf>,
    config: LedgerConfig,
) -> Vec<PipelineResult<LedgerReport>> {
    process_many(paths, move |path| async move {
        process_ledger_file(&path, &config).await
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const LEDGER: &str = "\
Expenses Ledger,,,,
01-Apr-24 to 31-Mar-25,,,,
01-Apr-2024,Travel,,,
,Sales,\"1,200\",Dr,Taxi
,Admin,300,Cr,Refund
";

    #[tokio::test]
    async fn test_ledger_file() {
        let file = csv_file(LEDGER);
        let report = process_ledger_file(file.path(), &LedgerConfig::default()).await.unwrap();

        assert_eq!(report.output.records.len(), 2);
        assert_eq!(report.output.records[0].amount, 1200.0);
        assert_eq!(report.output.records[1].amount, -300.0);
        assert_eq!(report.output.records[1].header_group_name, "Travel");
        assert_eq!(report.message(), "Successfully processed 2 transactions");
    }

    #[tokio::test]
    async fn test_payroll_file() {
        let file = csv_file("Cost Centre,Basic,HRA\nSales,\"1,000\",200\nSales,500,0\nAdmin,,100\n");
        let report = process_payroll_file(
            file.path(),
            &PayrollSchema::cost_centre_summary(),
            &PipelineOptions::default(),
        )
        .await
        .unwrap();

        assert_eq!(report.output.groups, 2);
        let total = report.output.grand_total().unwrap();
        assert_eq!(total.number("Sum of Basic"), Some(1500.0));
        assert_eq!(total.number("Sum of HRA"), Some(300.0));
        assert!(report.message().contains("2 cost centres"));
    }

    #[tokio::test]
    async fn test_payroll_missing_key_column() {
        let file = csv_file("Department,Basic\nSales,1\n");
        let err = process_payroll_file(
            file.path(),
            &PayrollSchema::cost_centre_summary(),
            &PipelineOptions::default().with_sheet("Nope"),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code(), "MISSING_REQUIRED_COLUMN");
        assert!(err.to_string().contains("Department, Basic"));
    }

    #[tokio::test]
    async fn test_payslip_file_with_month_override() {
        let file = csv_file(
            "Vira Payroll\n\
             Employee ID,Employee Name,Basic,HRA,Net pay for the Month\n\
             V1,Asha,\"50,000\",\"20,000\",\"68,800\"\n\
             ,,,,\n",
        );
        let report = process_payslip_file(
            file.path(),
            CompanyId::Vira,
            &PipelineOptions::default().with_month_label("Mar 26"),
        )
        .await
        .unwrap();

        assert_eq!(report.output.records.len(), 1);
        assert_eq!(report.output.skipped, 1);
        let rec = &report.output.records[0];
        assert_eq!(rec.gross_earning, 70000.0);
        assert_eq!(rec.net_pay, 68800.0);
        assert_eq!(rec.month_label, "Mar 26");
    }

    #[tokio::test]
    async fn test_empty_file() {
        let file = csv_file("");
        let err = process_ledger_file(file.path(), &LedgerConfig::default()).await.unwrap_err();
        assert_eq!(err.code(), "EMPTY_SHEET");
    }

    #[tokio::test]
    async fn test_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        let err = load_workbook(file.path()).await.unwrap_err();
        assert_eq!(err.code(), "UNSUPPORTED_FORMAT");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = load_workbook(Path::new("/nonexistent/ledger.csv")).await.unwrap_err();
        assert_eq!(err.code(), "UNREADABLE_SOURCE");
    }

    #[tokio::test]
    async fn test_batch_keeps_order_and_isolates_failures() {
        let good = csv_file(LEDGER);
        let empty = csv_file("");
        let paths = vec![
            good.path().to_path_buf(),
            empty.path().to_path_buf(),
            good.path().to_path_buf(),
        ];

        let results = process_ledger_files(paths, LedgerConfig::default()).await;
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().output.records.len(), 2);
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
    }
}
