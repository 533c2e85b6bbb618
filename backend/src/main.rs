//! Paysheet CLI - Transform accounting and payroll exports
//!
//! # Commands
//!
//! ```bash
//! paysheet ledger april.csv may.xlsx            # Reconstruct ledger transactions
//! paysheet payroll payroll.xlsx --sheet "Jan 26" # Cost-centre summary with Grand Total
//! paysheet payslip salaries.xlsx --company vira  # Per-employee payslip records
//! paysheet payslip salaries.xlsx -c vira --statements --format csv
//! paysheet companies                             # List supported company schemas
//! paysheet sheets payroll.xlsx                   # List sheets and row counts
//! ```
//!
//! `--quiet` silences progress on stderr; `--log-file run.jsonl` records every
//! log entry of the run as JSON lines. Both work with any command.
//!
//! Ledger column indices come from flags, then `PAYSHEET_HEADER_GROUP_INDEX` /
//! `PAYSHEET_COST_CENTRE_INDEX` (a `.env` file is honoured), then defaults.

use clap::{Parser, Subcommand};
use paysheet::logs::{
    log_error, log_info, log_info_indent, log_success, log_warning, LogRecorder, LOG_BROADCASTER,
};
use paysheet::{
    aggregated_to_csv, build_statements, companies, load_workbook, payslips_to_csv,
    process_ledger_files, process_payroll_file, process_payslip_file, statements_to_csv,
    to_json, transactions_to_csv, CompanyId, LedgerConfig, OutputFormat, PayrollSchema,
    PipelineError, PipelineOptions,
};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "paysheet")]
#[command(about = "Transform ledger and payroll spreadsheet exports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Do not print progress to stderr
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Record the run's log entries to this file as JSON lines
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconstruct ledger transactions from one or more exports
    Ledger {
        /// Input CSV / Excel files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Column holding the header group name (zero-based)
        #[arg(long)]
        header_group_index: Option<usize>,

        /// Column holding the cost centre (zero-based)
        #[arg(long)]
        cost_centre_index: Option<usize>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Summarise a payroll sheet per cost centre
    Payroll {
        /// Input CSV / Excel file
        input: PathBuf,

        /// Sheet to read (default: first sheet)
        #[arg(short, long)]
        sheet: Option<String>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Map employee rows to payslip records
    Payslip {
        /// Input CSV / Excel file
        input: PathBuf,

        /// Company schema (sunstripe, valuestream, vira)
        #[arg(short, long)]
        company: CompanyId,

        /// Sheet to read (default: the company's usual sheet)
        #[arg(short, long)]
        sheet: Option<String>,

        /// Month label, e.g. "Jan 26" (default: derived from the sheet name)
        #[arg(short, long)]
        month: Option<String>,

        /// Emit payslip statements instead of raw records
        #[arg(long)]
        statements: bool,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// List supported company schemas
    Companies,

    /// List the sheets of a file with their row counts
    Sheets {
        /// Input CSV / Excel file
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if cli.quiet {
        LOG_BROADCASTER.set_echo(false);
    }
    let mut recorder = cli.log_file.as_ref().map(|_| LOG_BROADCASTER.record());

    let result = match cli.command {
        Commands::Ledger {
            inputs,
            header_group_index,
            cost_centre_index,
            output,
            format,
        } => {
            cmd_ledger(
                inputs,
                header_group_index,
                cost_centre_index,
                output.as_deref(),
                format,
            )
            .await
        }

        Commands::Payroll {
            input,
            sheet,
            output,
            format,
        } => cmd_payroll(&input, sheet, output.as_deref(), format).await,

        Commands::Payslip {
            input,
            company,
            sheet,
            month,
            statements,
            output,
            format,
        } => {
            let options = PipelineOptions {
                sheet_name: sheet,
                month_label: month,
            };
            cmd_payslip(&input, company, &options, statements, output.as_deref(), format).await
        }

        Commands::Companies => cmd_companies(),

        Commands::Sheets { input } => cmd_sheets(&input).await,
    };

    if let (Some(path), Some(recorder)) = (cli.log_file.as_deref(), recorder.as_mut()) {
        if let Err(e) = write_log_file(path, recorder) {
            eprintln!("⚠️  Could not write log file {}: {}", path.display(), e);
        }
    }

    if let Err(e) = result {
        match e.downcast_ref::<PipelineError>() {
            Some(pe) => eprintln!("❌ Error [{}]: {}", pe.code(), pe),
            None => eprintln!("❌ Error: {}", e),
        }
        std::process::exit(1);
    }
}

async fn cmd_ledger(
    inputs: Vec<PathBuf>,
    header_group_index: Option<usize>,
    cost_centre_index: Option<usize>,
    output: Option<&Path>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = LedgerConfig::from_env().map_err(PipelineError::from)?;
    if let Some(index) = header_group_index {
        config = config.with_header_group_name_index(index);
    }
    if let Some(index) = cost_centre_index {
        config = config.with_cost_centre_index(index);
    }

    let total = inputs.len();
    let results = process_ledger_files(inputs.clone(), config).await;

    let mut records = Vec::new();
    let mut failed = 0;
    for (path, result) in inputs.iter().zip(results) {
        match result {
            Ok(report) => records.extend(report.output.records),
            Err(e) => {
                failed += 1;
                log_error(format!("{}: {} [{}]", path.display(), e, e.code()));
            }
        }
    }

    let content = match format {
        OutputFormat::Json => to_json(&records)?,
        OutputFormat::Csv => transactions_to_csv(&records)?,
    };
    write_output(&content, output)?;

    if failed > 0 {
        return Err(format!("{} of {} files failed", failed, total).into());
    }
    if total > 1 {
        log_success(format!("{} transactions from {} files", records.len(), total));
    }
    Ok(())
}

async fn cmd_payroll(
    input: &Path,
    sheet: Option<String>,
    output: Option<&Path>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = PipelineOptions {
        sheet_name: sheet,
        month_label: None,
    };
    let report = process_payroll_file(input, &PayrollSchema::cost_centre_summary(), &options).await?;

    let content = match format {
        OutputFormat::Json => to_json(&report.output.rows)?,
        OutputFormat::Csv => aggregated_to_csv(&report.output.rows)?,
    };
    write_output(&content, output)
}

async fn cmd_payslip(
    input: &Path,
    company: CompanyId,
    options: &PipelineOptions,
    statements: bool,
    output: Option<&Path>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = process_payslip_file(input, company, options).await?;
    let records = &report.output.records;
    if records.is_empty() {
        log_warning("No employee rows found");
    }

    let content = if statements {
        let statements = build_statements(company, records);
        log_info(format!("🧾 Built {} payslip statements", statements.len()));
        match format {
            OutputFormat::Json => to_json(&statements)?,
            OutputFormat::Csv => statements_to_csv(&statements)?,
        }
    } else {
        match format {
            OutputFormat::Json => to_json(records)?,
            OutputFormat::Csv => payslips_to_csv(records)?,
        }
    };
    write_output(&content, output)
}

fn cmd_companies() -> Result<(), Box<dyn std::error::Error>> {
    let list: Vec<_> = companies()
        .iter()
        .map(|schema| {
            json!({
                "id": schema.id.as_str(),
                "label": schema.label,
                "headerRow": schema.header_row_index + 1,
                "defaultSheet": schema.default_sheet_name,
                "mappedColumns": schema.column_map.len(),
            })
        })
        .collect();

    for schema in companies() {
        log_info(format!("🏢 {} ({})", schema.label, schema.id));
        log_info_indent(
            format!(
                "sheet \"{}\", header row {}",
                schema.default_sheet_name,
                schema.header_row_index + 1
            ),
            1,
        );
    }
    write_output(&to_json(&list)?, None)
}

async fn cmd_sheets(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let workbook = load_workbook(input).await?;
    let list: Vec<_> = workbook
        .sheets
        .iter()
        .map(|sheet| json!({ "name": sheet.name, "rows": sheet.rows.len() }))
        .collect();
    write_output(&to_json(&list)?, None)
}

fn write_log_file(path: &Path, recorder: &mut LogRecorder) -> Result<(), Box<dyn std::error::Error>> {
    fs::write(path, recorder.drain_json_lines()?)?;
    Ok(())
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            log_info(format!("💾 Output written to: {}", p.display()));
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
