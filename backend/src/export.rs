//! Output serialisation.
//!
//! Records leave the engine either as pretty JSON (any `Serialize` value) or
//! as CSV. CSV columns follow the record's own field order; payroll rows use
//! the schema order they were projected in.

use clap::ValueEnum;
use serde::Serialize;

use crate::error::ExportResult;
use crate::models::{AggregatedRow, FieldValue, PayslipRecord, TransactionRecord};
use crate::transform::statement::PayslipStatement;

/// Output encodings offered by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

/// Pretty-printed JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> ExportResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

// =============================================================================
// CSV
// =============================================================================

const LEDGER_COLUMNS: [&str; 7] = [
    "Date",
    "Header Group Name",
    "Cost Centre",
    "Transaction Type",
    "Amount",
    "Original Amount",
    "Description",
];

const PAYSLIP_COLUMNS: [&str; 42] = [
    "employeeName",
    "designation",
    "empId",
    "location",
    "dateOfJoining",
    "effectiveDays",
    "daysInMonth",
    "lop",
    "bankName",
    "bankAccount",
    "ifscCode",
    "pfUan",
    "panNo",
    "esiNo",
    "monthLabel",
    "basic",
    "hra",
    "conveyance",
    "medicalAllowance",
    "childrenAllowance",
    "statutoryBonus",
    "lta",
    "specialAllowance",
    "telephoneAllowance",
    "transportAllowance",
    "arrearsSalary",
    "arrears",
    "otherPayments",
    "otherAllowances",
    "grossEarning",
    "pfEmployer",
    "totalEarnings",
    "pfEmployee",
    "professionalTax",
    "tds",
    "esi",
    "salaryAdvanceRecovery",
    "otherDeduction",
    "totalDeductions",
    "netPay",
    "companyName",
    "companyAddress",
];

const STATEMENT_COLUMNS: [&str; 5] = ["File", "Section", "Label", "Amount", "Display"];

fn number(n: f64) -> String {
    n.to_string()
}

fn optional(n: Option<f64>) -> String {
    n.map(number).unwrap_or_default()
}

fn write_csv<I, R>(header: &[&str], records: I) -> ExportResult<String>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = String>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(header)?;
    for record in records {
        writer.write_record(record.into_iter().collect::<Vec<_>>())?;
    }
    writer.flush()?;
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Ledger transactions, one row each.
pub fn transactions_to_csv(records: &[TransactionRecord]) -> ExportResult<String> {
    write_csv(
        &LEDGER_COLUMNS,
        records.iter().map(|r| {
            vec![
                r.date.clone(),
                r.header_group_name.clone(),
                r.cost_centre.clone(),
                r.transaction_type.as_str().to_string(),
                number(r.amount),
                number(r.original_amount),
                r.description.clone(),
            ]
        }),
    )
}

/// Aggregated payroll rows. The header comes from the first row.
pub fn aggregated_to_csv(rows: &[AggregatedRow]) -> ExportResult<String> {
    let Some(first) = rows.first() else {
        return Ok(String::new());
    };
    let header: Vec<&str> = first.field_names().collect();
    write_csv(
        &header,
        rows.iter().map(|row| {
            row.fields()
                .iter()
                .map(|(_, value)| match value {
                    FieldValue::Text(s) => s.clone(),
                    FieldValue::Number(n) => number(*n),
                })
                .collect::<Vec<_>>()
        }),
    )
}

/// Payslip records with a fixed column set; absent components are blank.
pub fn payslips_to_csv(records: &[PayslipRecord]) -> ExportResult<String> {
    write_csv(
        &PAYSLIP_COLUMNS,
        records.iter().map(|r| {
            vec![
                r.employee_name.clone(),
                r.designation.clone(),
                r.emp_id.clone(),
                r.location.clone(),
                r.date_of_joining.clone(),
                r.effective_days.clone(),
                r.days_in_month.clone(),
                r.lop.clone(),
                r.bank_name.clone(),
                r.bank_account.clone(),
                r.ifsc_code.clone(),
                r.pf_uan.clone(),
                r.pan_no.clone(),
                r.esi_no.clone().unwrap_or_default(),
                r.month_label.clone(),
                number(r.basic),
                number(r.hra),
                optional(r.conveyance),
                optional(r.medical_allowance),
                optional(r.children_allowance),
                optional(r.statutory_bonus),
                number(r.lta),
                optional(r.special_allowance),
                optional(r.telephone_allowance),
                optional(r.transport_allowance),
                optional(r.arrears_salary),
                optional(r.arrears),
                optional(r.other_payments),
                optional(r.other_allowances),
                number(r.gross_earning),
                number(r.pf_employer),
                number(r.total_earnings),
                number(r.pf_employee),
                number(r.professional_tax),
                number(r.tds),
                optional(r.esi),
                optional(r.salary_advance_recovery),
                optional(r.other_deduction),
                number(r.total_deductions),
                number(r.net_pay),
                r.company_name.clone(),
                r.company_address.clone(),
            ]
        }),
    )
}

/// Statements flattened to one line item per row.
pub fn statements_to_csv(statements: &[PayslipStatement]) -> ExportResult<String> {
    let rows = statements.iter().flat_map(|s| {
        let sections = s
            .earnings
            .iter()
            .map(|l| ("Earnings", l))
            .chain(s.deductions.iter().map(|l| ("Deductions", l)))
            .chain(s.employer_contributions.iter().map(|l| ("Employer", l)))
            .chain([
                ("Total", &s.gross),
                ("Total", &s.total_earnings),
                ("Total", &s.total_deductions),
                ("Total", &s.net_pay),
            ]);
        sections.map(move |(section, line)| {
            vec![
                s.file_stem.clone(),
                section.to_string(),
                line.label.to_string(),
                number(line.amount),
                line.display.clone(),
            ]
        })
    });
    write_csv(&STATEMENT_COLUMNS, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;
    use crate::schema::CompanyId;
    use crate::transform::statement::build_statement;

    fn transaction() -> TransactionRecord {
        TransactionRecord {
            date: "1-Apr-24".into(),
            header_group_name: "Travel".into(),
            cost_centre: "Sales, North".into(),
            transaction_type: TransactionType::Credit,
            amount: -1200.5,
            original_amount: 1200.5,
            description: "Taxi".into(),
        }
    }

    #[test]
    fn test_transactions_csv() {
        let csv = transactions_to_csv(&[transaction()]).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "Date,Header Group Name,Cost Centre,Transaction Type,Amount,Original Amount,Description"
        );
        assert_eq!(lines[1], "1-Apr-24,Travel,\"Sales, North\",CR,-1200.5,1200.5,Taxi");
    }

    #[test]
    fn test_aggregated_csv_keeps_field_order() {
        let mut row = AggregatedRow::new();
        row.push("Row Labels", FieldValue::Text("Sales".into()));
        row.push("Sum of Basic", FieldValue::Number(1500.0));
        row.push("Direct / Indirect", FieldValue::Text("Direct".into()));

        let csv = aggregated_to_csv(&[row]).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "Row Labels,Sum of Basic,Direct / Indirect");
        assert_eq!(lines[1], "Sales,1500,Direct");
    }

    #[test]
    fn test_aggregated_csv_empty() {
        assert_eq!(aggregated_to_csv(&[]).unwrap(), "");
    }

    #[test]
    fn test_payslip_csv_blanks_absent_components() {
        let record = PayslipRecord {
            employee_name: "Asha Rao".into(),
            basic: 1000.0,
            conveyance: None,
            net_pay: 1000.0,
            company_name: "Vira Insight".into(),
            company_address: "Madhapur, Hyderabad".into(),
            ..Default::default()
        };
        let csv = payslips_to_csv(&[record]).unwrap();
        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let headers = reader.headers().unwrap().clone();
        let row = reader.records().next().unwrap().unwrap();

        assert_eq!(headers.len(), PAYSLIP_COLUMNS.len());
        assert_eq!(row.len(), PAYSLIP_COLUMNS.len());
        let at = |name: &str| {
            let i = headers.iter().position(|h| h == name).unwrap();
            row.get(i).unwrap().to_string()
        };
        assert_eq!(at("employeeName"), "Asha Rao");
        assert_eq!(at("basic"), "1000");
        assert_eq!(at("conveyance"), "");
        assert_eq!(at("netPay"), "1000");
        assert_eq!(headers.get(headers.len() - 1), Some("companyAddress"));
        assert_eq!(at("companyAddress"), "Madhapur, Hyderabad");
    }

    #[test]
    fn test_statements_csv_lists_every_line() {
        let record = PayslipRecord {
            emp_id: "V1".into(),
            employee_name: "Ravi".into(),
            month_label: "Jan 26".into(),
            basic: 50000.0,
            ..Default::default()
        };
        let statement = build_statement(CompanyId::Vira, &record);
        let expected = statement.earnings.len() + statement.deductions.len() + 4;

        let csv = statements_to_csv(&[statement]).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), expected + 1);
        assert_eq!(lines[1], "V1_Ravi_Jan_26,Earnings,Basic,50000,\"50,000\"");
        assert!(lines.last().unwrap().starts_with("V1_Ravi_Jan_26,Total,Net Pay"));
    }

    #[test]
    fn test_json_is_pretty() {
        let json = to_json(&[transaction()]).unwrap();
        assert!(json.contains("\n  {"));
        assert!(json.contains("\"Transaction Type\": \"CR\""));
    }
}
