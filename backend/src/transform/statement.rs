//! Per-company payslip statements.
//!
//! A [`PayslipStatement`] is the presentation-ready content of one payslip:
//! labelled detail rows, earning and deduction lines with Indian-grouped
//! amounts, totals and net pay in words. Layout is chosen per company.

use serde::Serialize;

use crate::models::PayslipRecord;
use crate::primitives::{amount_in_words, format_inr};
use crate::schema::CompanyId;

/// A labelled text value in the employee details block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailItem {
    pub label: &'static str,
    pub value: String,
}

/// A labelled amount.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    pub label: &'static str,
    pub amount: f64,
    /// `amount` rounded and grouped, e.g. `1,73,033`.
    pub display: String,
}

impl LineItem {
    pub fn new(label: &'static str, amount: f64) -> Self {
        Self {
            label,
            amount,
            display: format_inr(amount),
        }
    }

    /// A line printed with no amount.
    pub fn blank(label: &'static str) -> Self {
        Self {
            label,
            amount: 0.0,
            display: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayslipStatement {
    pub company: CompanyId,
    pub company_name: String,
    pub company_address: String,
    pub title: String,
    pub month_label: String,
    pub employee_name: String,
    pub details: Vec<DetailItem>,
    pub earnings: Vec<LineItem>,
    pub deductions: Vec<LineItem>,
    /// Employer-side contributions, listed apart from earnings.
    pub employer_contributions: Vec<LineItem>,
    pub gross: LineItem,
    pub total_earnings: LineItem,
    pub total_deductions: LineItem,
    pub net_pay: LineItem,
    pub net_pay_in_words: Option<String>,
    pub file_stem: String,
}

/// Build the statement for one record using the company's layout.
pub fn build_statement(company: CompanyId, record: &PayslipRecord) -> PayslipStatement {
    let (earnings, deductions) = match company {
        CompanyId::Sunstripe => sunstripe_lines(record),
        CompanyId::ValueStream => valuestream_lines(record),
        CompanyId::Vira => vira_lines(record),
    };

    PayslipStatement {
        company,
        company_name: record.company_name.clone(),
        company_address: record.company_address.clone(),
        title: format!("Payslip for {}", record.month_label),
        month_label: record.month_label.clone(),
        employee_name: record.employee_name.clone(),
        details: details(company, record),
        earnings,
        deductions,
        employer_contributions: employer_contributions(company, record),
        gross: LineItem::new("Gross", record.gross_earning),
        total_earnings: LineItem::new("Total Earnings", record.total_earnings),
        total_deductions: LineItem::new("Total Deductions", record.total_deductions),
        net_pay: LineItem::new("Net Pay", record.net_pay),
        net_pay_in_words: amount_in_words(record.net_pay),
        file_stem: record.file_stem(),
    }
}

/// Statements for a batch of records, in order.
pub fn build_statements(company: CompanyId, records: &[PayslipRecord]) -> Vec<PayslipStatement> {
    records.iter().map(|r| build_statement(company, r)).collect()
}

fn or_default(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

fn details(company: CompanyId, r: &PayslipRecord) -> Vec<DetailItem> {
    let item = |label, value: String| DetailItem { label, value };

    let mut items = vec![
        item("Name", r.employee_name.clone()),
        item("Designation", r.designation.clone()),
        item("Employee ID", r.emp_id.clone()),
        item("Location", r.location.clone()),
        item("Date of joining", r.date_of_joining.clone()),
        item("Effective working days", r.effective_days.clone()),
        item("Days in Month", r.days_in_month.clone()),
        item("Bank Name", r.bank_name.clone()),
        item("Bank A/c No", r.bank_account.clone()),
        item("IFSC Code", r.ifsc_code.clone()),
        item("PF UAN", or_default(&r.pf_uan, "NA")),
    ];
    if company != CompanyId::Sunstripe {
        items.push(item("ESI No", or_default(r.esi_no.as_deref().unwrap_or(""), "NA")));
    }
    items.push(item("PAN No", r.pan_no.clone()));
    items.push(item("LOP", or_default(&r.lop, "0")));
    items
}

fn employer_contributions(company: CompanyId, r: &PayslipRecord) -> Vec<LineItem> {
    match company {
        CompanyId::ValueStream => vec![
            LineItem::new("Employer PF", r.pf_employer),
            LineItem::blank("Employer PF arrears"),
            LineItem::blank("Employer ESI"),
        ],
        CompanyId::Sunstripe | CompanyId::Vira => Vec::new(),
    }
}

type Lines = (Vec<LineItem>, Vec<LineItem>);

fn sunstripe_lines(r: &PayslipRecord) -> Lines {
    let earnings = vec![
        LineItem::new("Basic", r.basic),
        LineItem::new("HRA", r.hra),
        LineItem::new("Conveyance", r.conveyance.unwrap_or(0.0)),
        LineItem::new("Medical Allowance", r.medical_allowance.unwrap_or(0.0)),
        LineItem::new("Children Education Allowance", r.children_allowance.unwrap_or(0.0)),
        LineItem::new("LTA", r.lta),
        LineItem::new("Special Allowance", r.special_allowance.unwrap_or(0.0)),
        LineItem::new("Arrears", r.arrears.unwrap_or(0.0)),
        LineItem::new("Other Payments", r.other_payments.unwrap_or(0.0)),
    ];
    let deductions = vec![
        LineItem::new("PF", r.pf_employee),
        LineItem::new("ESI", r.esi.unwrap_or(0.0)),
        LineItem::new("Professional Tax", r.professional_tax),
        LineItem::new("TDS", r.tds),
        LineItem::new("Salary Advance Recovery", r.salary_advance_recovery.unwrap_or(0.0)),
        LineItem::new("Other Deduction", r.other_deduction.unwrap_or(0.0)),
    ];
    (earnings, deductions)
}

fn valuestream_lines(r: &PayslipRecord) -> Lines {
    let earnings = vec![
        LineItem::new("BASIC", r.basic),
        LineItem::new("HRA", r.hra),
        LineItem::new("Children Allowance", r.children_allowance.unwrap_or(0.0)),
        LineItem::new("Statutory Bonus", r.statutory_bonus.unwrap_or(0.0)),
        LineItem::new("Leave Travel Allowance", r.lta),
        LineItem::new("Other allowances", r.other_allowances.unwrap_or(0.0)),
    ];
    let deductions = vec![
        LineItem::new("PROF TAX", r.professional_tax),
        LineItem::new("Employer PF", r.pf_employer),
        LineItem::new("Employee PF", r.pf_employee),
        LineItem::new("TDS", r.tds),
    ];
    (earnings, deductions)
}

fn vira_lines(r: &PayslipRecord) -> Lines {
    let earnings = vec![
        LineItem::new("Basic", r.basic),
        LineItem::new("HRA", r.hra),
        LineItem::new("Leave Travel Allowance", r.lta),
        LineItem::new("Telephone Allowance", r.telephone_allowance.unwrap_or(0.0)),
        LineItem::new("Transport Allowance", r.transport_allowance.unwrap_or(0.0)),
        LineItem::new("Arrears Salary", r.arrears_salary.unwrap_or(0.0)),
        LineItem::new("Other Allowances", r.other_allowances.unwrap_or(0.0)),
    ];
    let deductions = vec![
        LineItem::new("Employer PF", r.pf_employer),
        LineItem::new("Employee PF", r.pf_employee),
        LineItem::new("Professional Tax", r.professional_tax),
        LineItem::new("TDS", r.tds),
    ];
    (earnings, deductions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> PayslipRecord {
        PayslipRecord {
            employee_name: "Asha Rao".into(),
            emp_id: "VS01".into(),
            month_label: "Jan 26".into(),
            basic: 100000.0,
            hra: 40000.0,
            lta: 5000.0,
            statutory_bonus: Some(28033.0),
            gross_earning: 173033.0,
            pf_employer: 1800.0,
            total_earnings: 174833.0,
            pf_employee: 1800.0,
            professional_tax: 200.0,
            tds: 12000.0,
            total_deductions: 15800.0,
            net_pay: 173033.0,
            company_name: "VALUESTREAM ANALYTICS PRIVATE LIMITED".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valuestream_layout() {
        let s = build_statement(CompanyId::ValueStream, &record());

        let labels: Vec<_> = s.earnings.iter().map(|l| l.label).collect();
        assert_eq!(
            labels,
            vec![
                "BASIC",
                "HRA",
                "Children Allowance",
                "Statutory Bonus",
                "Leave Travel Allowance",
                "Other allowances"
            ]
        );
        let labels: Vec<_> = s.deductions.iter().map(|l| l.label).collect();
        assert_eq!(labels, vec!["PROF TAX", "Employer PF", "Employee PF", "TDS"]);

        assert_eq!(s.earnings[0].display, "1,00,000");
        assert_eq!(s.earnings[2].display, "0");
        assert_eq!(s.gross.display, "1,73,033");

        let employer: Vec<_> = s
            .employer_contributions
            .iter()
            .map(|l| (l.label, l.display.as_str()))
            .collect();
        assert_eq!(
            employer,
            vec![
                ("Employer PF", "1,800"),
                ("Employer PF arrears", ""),
                ("Employer ESI", "")
            ]
        );
        assert_eq!(s.total_earnings.label, "Total Earnings");
        assert_eq!(s.total_earnings.display, "1,74,833");
    }

    #[test]
    fn test_only_valuestream_lists_employer_contributions() {
        assert!(build_statement(CompanyId::Vira, &record()).employer_contributions.is_empty());
        assert!(build_statement(CompanyId::Sunstripe, &record()).employer_contributions.is_empty());
    }

    #[test]
    fn test_net_pay_in_words() {
        let s = build_statement(CompanyId::ValueStream, &record());
        assert_eq!(
            s.net_pay_in_words.as_deref(),
            Some("Rupees One Lakh Seventy-Three Thousand Thirty-Three Only")
        );
        assert_eq!(s.title, "Payslip for Jan 26");
        assert_eq!(s.file_stem, "VS01_Asha_Rao_Jan_26");
    }

    #[test]
    fn test_negative_net_pay_has_no_words() {
        let mut r = record();
        r.net_pay = -50.0;
        let s = build_statement(CompanyId::Vira, &r);
        assert_eq!(s.net_pay_in_words, None);
        assert_eq!(s.net_pay.display, "-50");
    }

    #[test]
    fn test_detail_defaults() {
        let s = build_statement(CompanyId::Vira, &record());
        let value = |label: &str| {
            s.details
                .iter()
                .find(|d| d.label == label)
                .map(|d| d.value.clone())
        };
        assert_eq!(value("PF UAN").as_deref(), Some("NA"));
        assert_eq!(value("ESI No").as_deref(), Some("NA"));
        assert_eq!(value("LOP").as_deref(), Some("0"));

        let sunstripe = build_statement(CompanyId::Sunstripe, &record());
        assert!(sunstripe.details.iter().all(|d| d.label != "ESI No"));
    }

    #[test]
    fn test_sunstripe_extra_deductions() {
        let mut r = record();
        r.esi = Some(375.0);
        r.salary_advance_recovery = Some(5000.0);
        let s = build_statement(CompanyId::Sunstripe, &r);
        let find = |label: &str| s.deductions.iter().find(|l| l.label == label).map(|l| l.amount);
        assert_eq!(find("ESI"), Some(375.0));
        assert_eq!(find("Salary Advance Recovery"), Some(5000.0));
        assert_eq!(find("Other Deduction"), Some(0.0));
    }

    #[test]
    fn test_batch_keeps_order() {
        let mut second = record();
        second.employee_name = "Ravi".into();
        let statements = build_statements(CompanyId::Vira, &[record(), second]);
        assert_eq!(statements.len(), 2);
        assert_eq!(statements[1].details[0].value, "Ravi");
        assert_eq!(statements[1].employee_name, "Ravi");
    }
}
