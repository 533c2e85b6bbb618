//! Company payslip schemas.
//!
//! Each supported company exports its payroll register with its own header
//! row position and column vocabulary. A [`CompanySchema`] maps the logical
//! [`PayslipField`]s onto that vocabulary. The table is static and read-only;
//! adding a company means adding a [`CompanyId`] variant, one table entry and
//! one statement layout in [`crate::transform::statement`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Known companies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanyId {
    Sunstripe,
    ValueStream,
    Vira,
}

impl CompanyId {
    pub const ALL: [CompanyId; 3] = [CompanyId::Sunstripe, CompanyId::ValueStream, CompanyId::Vira];

    pub fn as_str(&self) -> &'static str {
        match self {
            CompanyId::Sunstripe => "sunstripe",
            CompanyId::ValueStream => "valuestream",
            CompanyId::Vira => "vira",
        }
    }

    /// The schema for this company.
    pub fn schema(&self) -> &'static CompanySchema {
        match self {
            CompanyId::Sunstripe => &SUNSTRIPE,
            CompanyId::ValueStream => &VALUESTREAM,
            CompanyId::Vira => &VIRA,
        }
    }
}

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompanyId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace([' ', '-', '_'], "");
        CompanyId::ALL
            .into_iter()
            .find(|id| id.as_str() == wanted)
            .ok_or_else(|| ConfigError::UnknownCompany(s.to_string()))
    }
}

/// Logical payslip fields a company schema may map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PayslipField {
    EmployeeName,
    Designation,
    EmpId,
    Location,
    DateOfJoining,
    EffectiveDays,
    DaysInMonth,
    BankName,
    BankAccount,
    IfscCode,
    PfUan,
    PanNo,
    EsiNo,
    Lop,
    Basic,
    Hra,
    Conveyance,
    MedicalAllowance,
    ChildrenAllowance,
    StatutoryBonus,
    Lta,
    SpecialAllowance,
    TelephoneAllowance,
    TransportAllowance,
    ArrearsSalary,
    Arrears,
    OtherPayments,
    OtherAllowances,
    GrossEarning,
    TotalEarnings,
    PfEmployee,
    PfEmployer,
    Esi,
    ProfessionalTax,
    Tds,
    SalaryAdvanceRecovery,
    OtherDeduction,
    TotalDeductions,
    NetPay,
}

impl PayslipField {
    /// Earning components summed when no gross column supplies a value.
    pub const EARNING_COMPONENTS: [PayslipField; 14] = [
        PayslipField::Basic,
        PayslipField::Hra,
        PayslipField::Conveyance,
        PayslipField::MedicalAllowance,
        PayslipField::ChildrenAllowance,
        PayslipField::Lta,
        PayslipField::SpecialAllowance,
        PayslipField::Arrears,
        PayslipField::OtherPayments,
        PayslipField::OtherAllowances,
        PayslipField::StatutoryBonus,
        PayslipField::TelephoneAllowance,
        PayslipField::TransportAllowance,
        PayslipField::ArrearsSalary,
    ];
}

/// Static description of one company's payroll export.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySchema {
    pub id: CompanyId,
    pub label: &'static str,
    /// Zero-based row index of the header row.
    pub header_row_index: usize,
    /// Sheet used when the caller names none.
    pub default_sheet_name: &'static str,
    /// Logical field → header text. Matching is trimmed and case-insensitive.
    pub column_map: &'static [(PayslipField, &'static str)],
    pub company_name: &'static str,
    pub company_address: &'static str,
}

impl CompanySchema {
    /// Header text mapped for `field`, if any.
    pub fn header_for(&self, field: PayslipField) -> Option<&'static str> {
        self.column_map
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, header)| *header)
    }
}

/// All company schemas, in display order.
pub fn companies() -> [&'static CompanySchema; 3] {
    CompanyId::ALL.map(|id| id.schema())
}

use PayslipField as F;

pub static SUNSTRIPE: CompanySchema = CompanySchema {
    id: CompanyId::Sunstripe,
    label: "Sunstripe",
    header_row_index: 4,
    default_sheet_name: "January 2026",
    company_name: "SUNSTRIPE ENERGY TECHNOLOGIES PRIVATE LIMITED",
    company_address: "Level 16, H-Tower, Raheja Commerzone, Raidurg, Hyderabad, Shaikpet, Telangana, India, 500081",
    column_map: &[
        (F::EmployeeName, "Employee Name"),
        (F::Designation, "Designation"),
        (F::EmpId, "Emp ID"),
        (F::Location, "Location"),
        (F::DateOfJoining, "Date of Joining"),
        (F::EffectiveDays, "Effective Working Days"),
        (F::DaysInMonth, "Days in Month"),
        (F::BankName, "Bank Name"),
        (F::BankAccount, "Bank A/c No"),
        (F::IfscCode, "IFSC Code"),
        (F::PfUan, "PF UAN"),
        (F::PanNo, "PAN No"),
        (F::Lop, "LOP"),
        (F::Basic, "Basic"),
        (F::Hra, "HRA"),
        (F::Conveyance, "Conveyance"),
        (F::MedicalAllowance, "Medical  Allowance"),
        (F::ChildrenAllowance, "Childeren Education Allowance"),
        (F::Lta, "LTA"),
        (F::SpecialAllowance, "Spl. Allow"),
        (F::Arrears, "Arrears"),
        (F::OtherPayments, "Other Payments"),
        (F::GrossEarning, "Gross Earning"),
        (F::TotalEarnings, "Gross Earning"),
        (F::PfEmployee, "PF"),
        (F::PfEmployer, "PF"),
        (F::Esi, "ESI"),
        (F::ProfessionalTax, "PT"),
        (F::Tds, "TDS"),
        (F::SalaryAdvanceRecovery, "Salary Advance Recovery"),
        (F::OtherDeduction, "Other Deduction"),
        (F::TotalDeductions, "Gross Deduction"),
        (F::NetPay, "Net Pay"),
    ],
};

pub static VALUESTREAM: CompanySchema = CompanySchema {
    id: CompanyId::ValueStream,
    label: "Value Stream",
    header_row_index: 1,
    default_sheet_name: "Payregister",
    company_name: "VALUESTREAM ANALYTICS PRIVATE LIMITED",
    company_address: "FLAT NO 902 BLOCK A, HALLMARK VICINIA, Gachibowli, K.V.Rangareddy, Seri Lingampally, Telangana, India, 500032",
    column_map: &[
        (F::EmployeeName, "Employee Name"),
        (F::Designation, "Designation"),
        (F::EmpId, "Emp ID"),
        (F::Location, "Location "),
        (F::DateOfJoining, "Date of Joining"),
        (F::EffectiveDays, "Effective working days"),
        (F::DaysInMonth, "Days in Month"),
        (F::BankName, "Bank Name"),
        (F::BankAccount, "Bank Account No"),
        (F::IfscCode, "IFSC Code"),
        (F::PfUan, "PF UAN"),
        (F::PanNo, "PAN No."),
        (F::Lop, "LOP"),
        (F::Basic, "Basic"),
        (F::Hra, "HRA"),
        (F::ChildrenAllowance, "Children Allowance"),
        (F::StatutoryBonus, "Statutory bonus"),
        (F::Lta, "Leave travel allowance"),
        (F::OtherAllowances, "Other allowances"),
        (F::GrossEarning, "Gross salary"),
        (F::TotalEarnings, "Total earnings"),
        (F::PfEmployer, "PF Employer"),
        (F::PfEmployee, "PF Employee"),
        (F::ProfessionalTax, "Professional Tax"),
        (F::Tds, "TDS"),
        (F::TotalDeductions, "Total deductions"),
        (F::NetPay, "Net pay for the Month"),
    ],
};

pub static VIRA: CompanySchema = CompanySchema {
    id: CompanyId::Vira,
    label: "Vira",
    header_row_index: 1,
    default_sheet_name: "Payroll",
    company_name: "VIRA INSIGHT INDIA PRIVATE LIMITED",
    company_address: "1st Floor, Golden Heights, Plot No 9/1, Sector III, Madhapur, Hyderabad, Telangana - 500081",
    column_map: &[
        (F::EmployeeName, "Employee Name"),
        (F::Designation, "Designation"),
        (F::EmpId, "Employee ID"),
        (F::Location, "Location"),
        (F::DateOfJoining, "Date of Joining"),
        (F::EffectiveDays, "Effective Working Days"),
        (F::DaysInMonth, "Days in Month"),
        (F::BankName, "Bank Name"),
        (F::BankAccount, "Bank Account No"),
        (F::IfscCode, "IFSC Code"),
        (F::PfUan, "PF UAN"),
        (F::EsiNo, "EIS NO"),
        (F::PanNo, "PAN No."),
        (F::Lop, "LOP"),
        (F::Basic, "Basic"),
        (F::Hra, "HRA"),
        (F::Lta, "Leave travel allowance"),
        (F::TelephoneAllowance, "Telephone allowance"),
        (F::TransportAllowance, "Transport Allowance"),
        (F::ArrearsSalary, "Arrers Salary"),
        (F::OtherAllowances, "Other allowances"),
        (F::GrossEarning, "Gross salary"),
        (F::TotalEarnings, "Total earnings"),
        (F::PfEmployer, "PF Employer"),
        (F::PfEmployee, "PF Employee"),
        (F::ProfessionalTax, "Professional tax"),
        (F::Tds, "TDS"),
        (F::TotalDeductions, "Total deductions"),
        (F::NetPay, "Net pay for the Month"),
    ],
};
