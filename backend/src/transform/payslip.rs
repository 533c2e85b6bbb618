//! Payslip field mapping.
//!
//! A company's header row is located by its schema offset, every mapped
//! header is resolved to a column (trimmed, case-insensitive), and each row
//! below it that names an employee becomes one [`PayslipRecord`]. Unresolved
//! fields read as blank text or `0`; they never fail the pass.

use serde::Serialize;
use std::collections::HashMap;

use crate::error::{TransformError, TransformResult};
use crate::models::{cell_at, Cell, PayslipRecord, Row};
use crate::primitives::{clean_numeric, format_date_cell, month_label_from_sheet};
use crate::schema::{CompanySchema, PayslipField};

/// Records plus counts for one mapping pass.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayslipOutput {
    pub records: Vec<PayslipRecord>,
    pub month_label: String,
    /// Rows below the header row.
    pub rows_read: usize,
    /// Rows without an employee name.
    pub skipped: usize,
    /// Mapped fields whose header was not found.
    pub unresolved: Vec<PayslipField>,
}

/// Resolved field → column index for one header row.
#[derive(Debug, Clone, Default)]
pub struct ColumnIndex {
    columns: HashMap<PayslipField, usize>,
}

impl ColumnIndex {
    /// Match each mapped header against `headers`, first match wins.
    pub fn resolve(headers: &[Cell], schema: &CompanySchema) -> Self {
        let normalized: Vec<String> = headers.iter().map(|h| h.trimmed().to_lowercase()).collect();

        let columns = schema
            .column_map
            .iter()
            .filter_map(|(field, header)| {
                let want = header.trim().to_lowercase();
                normalized
                    .iter()
                    .position(|h| *h == want)
                    .map(|index| (*field, index))
            })
            .collect();

        Self { columns }
    }

    pub fn get(&self, field: PayslipField) -> Option<usize> {
        self.columns.get(&field).copied()
    }

    pub fn contains(&self, field: PayslipField) -> bool {
        self.columns.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Field accessors over one data row.
struct RowReader<'a> {
    row: &'a [Cell],
    index: &'a ColumnIndex,
}

impl<'a> RowReader<'a> {
    fn cell(&self, field: PayslipField) -> Option<&'a Cell> {
        self.index.get(field).map(|i| cell_at(self.row, i))
    }

    fn text(&self, field: PayslipField) -> String {
        self.cell(field).map(Cell::trimmed).unwrap_or_default()
    }

    fn number(&self, field: PayslipField) -> f64 {
        self.cell(field).map(clean_numeric).unwrap_or(0.0)
    }

    /// `None` when unresolved or zero.
    fn optional(&self, field: PayslipField) -> Option<f64> {
        Some(self.number(field)).filter(|n| *n != 0.0)
    }

    /// Explicit value, else the fallback when the column is absent or zero.
    fn or_derived(&self, field: PayslipField, fallback: impl FnOnce() -> f64) -> f64 {
        match self.number(field) {
            n if n != 0.0 => n,
            _ => fallback(),
        }
    }
}

/// Map every employee row of a company payroll sheet.
///
/// `month_label` replaces the label derived from `sheet_name` when given.
pub fn map_employees(
    rows: &[Row],
    schema: &CompanySchema,
    sheet_name: &str,
    month_label: Option<&str>,
) -> TransformResult<PayslipOutput> {
    if rows.is_empty() {
        return Err(TransformError::EmptySheet);
    }
    let headers = rows
        .get(schema.header_row_index)
        .ok_or(TransformError::MissingHeaderRow {
            index: schema.header_row_index,
            row_count: rows.len(),
        })?;

    let index = ColumnIndex::resolve(headers, schema);
    let month_label = month_label
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| derive_month_label(sheet_name));

    let data = &rows[schema.header_row_index + 1..];
    let mut records = Vec::new();
    for row in data {
        let reader = RowReader { row, index: &index };
        if let Some(record) = extract(&reader, schema, &month_label) {
            records.push(record);
        }
    }

    let unresolved: Vec<PayslipField> = schema
        .column_map
        .iter()
        .map(|(field, _)| *field)
        .filter(|field| !index.contains(*field))
        .collect();

    Ok(PayslipOutput {
        skipped: data.len() - records.len(),
        rows_read: data.len(),
        records,
        month_label,
        unresolved,
    })
}

fn derive_month_label(sheet_name: &str) -> String {
    let label = month_label_from_sheet(sheet_name);
    if label.is_empty() {
        sheet_name.to_string()
    } else {
        label
    }
}

fn extract(r: &RowReader<'_>, schema: &CompanySchema, month_label: &str) -> Option<PayslipRecord> {
    use PayslipField as F;

    let employee_name = r.text(F::EmployeeName);
    if employee_name.is_empty() {
        return None;
    }

    let gross_earning = r.or_derived(F::GrossEarning, || {
        F::EARNING_COMPONENTS.iter().map(|f| r.number(*f)).sum()
    });
    let pf_employer = r.number(F::PfEmployer);
    let total_earnings = r.or_derived(F::TotalEarnings, || gross_earning + pf_employer);
    let total_deductions = r.number(F::TotalDeductions);
    let net_pay = r.or_derived(F::NetPay, || total_earnings - total_deductions);

    Some(PayslipRecord {
        employee_name,
        designation: r.text(F::Designation),
        emp_id: r.text(F::EmpId),
        location: r.text(F::Location),
        date_of_joining: r.cell(F::DateOfJoining).map(format_date_cell).unwrap_or_default(),
        effective_days: r.text(F::EffectiveDays),
        days_in_month: r.text(F::DaysInMonth),
        lop: r.text(F::Lop),
        bank_name: r.text(F::BankName),
        bank_account: r.text(F::BankAccount),
        ifsc_code: r.text(F::IfscCode).replace("\r\n", ""),
        pf_uan: r.text(F::PfUan),
        pan_no: r.text(F::PanNo),
        esi_no: r.cell(F::EsiNo).map(Cell::trimmed),
        month_label: month_label.to_string(),

        basic: r.number(F::Basic),
        hra: r.number(F::Hra),
        conveyance: r.optional(F::Conveyance),
        medical_allowance: r.optional(F::MedicalAllowance),
        children_allowance: r.optional(F::ChildrenAllowance),
        statutory_bonus: r.optional(F::StatutoryBonus),
        lta: r.number(F::Lta),
        special_allowance: r.optional(F::SpecialAllowance),
        telephone_allowance: r.optional(F::TelephoneAllowance),
        transport_allowance: r.optional(F::TransportAllowance),
        arrears_salary: r.optional(F::ArrearsSalary),
        arrears: r.optional(F::Arrears),
        other_payments: r.optional(F::OtherPayments),
        other_allowances: r.optional(F::OtherAllowances),
        gross_earning,
        pf_employer,
        total_earnings,

        pf_employee: r.number(F::PfEmployee),
        professional_tax: r.number(F::ProfessionalTax),
        tds: r.number(F::Tds),
        esi: r.optional(F::Esi),
        salary_advance_recovery: r.optional(F::SalaryAdvanceRecovery),
        other_deduction: r.optional(F::OtherDeduction),
        total_deductions,
        net_pay,

        company_name: schema.company_name.to_string(),
        company_address: schema.company_address.to_string(),
    })
}
