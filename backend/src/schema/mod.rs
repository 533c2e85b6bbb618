//! Static configuration tables.
//!
//! - [`payroll`]: output schema of the cost-centre summary and its lookup tables
//! - [`company`]: per-company payslip column vocabularies
//!
//! Everything here is built once and never mutated.

pub mod company;
pub mod payroll;

pub use company::{companies, CompanyId, CompanySchema, PayslipField};
pub use payroll::{LookupFallback, LookupField, PayrollSchema, SumField, COST_CENTRE_HEADER};
