//! Output schema of the cost-centre payroll summary.
//!
//! A [`PayrollSchema`] declares, in order, every field of an
//! [`AggregatedRow`](crate::models::AggregatedRow): the group label, any
//! lookup fields derived from the label, and the summed columns with the
//! source header each one reads.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

/// Header of the grouping column in payroll sources.
pub const COST_CENTRE_HEADER: &str = "Cost Centre";

/// How a lookup field behaves when the group key is not in its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupFallback {
    /// Echo the raw key.
    Key,
    /// Empty string.
    Empty,
}

/// A text field resolved from the group key through a static table.
#[derive(Debug, Clone, Serialize)]
pub struct LookupField {
    pub name: String,
    #[serde(skip)]
    pub table: &'static HashMap<&'static str, &'static str>,
    pub fallback: LookupFallback,
}

impl LookupField {
    pub fn resolve(&self, key: &str) -> String {
        match self.table.get(key) {
            Some(value) => value.to_string(),
            None => match self.fallback {
                LookupFallback::Key => key.to_string(),
                LookupFallback::Empty => String::new(),
            },
        }
    }
}

/// A numeric field summing one source column over the group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SumField {
    pub name: String,
    pub source: String,
}

/// Declared output shape of the payroll aggregator.
#[derive(Debug, Clone, Serialize)]
pub struct PayrollSchema {
    /// Header text of the grouping column.
    pub key_column: String,
    /// Output field holding the group key.
    pub label_field: String,
    pub lookups: Vec<LookupField>,
    pub sums: Vec<SumField>,
}

impl PayrollSchema {
    /// Schema with no lookups, built from `(output field, source header)` pairs.
    pub fn new(
        key_column: impl Into<String>,
        label_field: impl Into<String>,
        sums: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Self {
        Self {
            key_column: key_column.into(),
            label_field: label_field.into(),
            lookups: Vec::new(),
            sums: sums
                .into_iter()
                .map(|(name, source)| SumField {
                    name: name.into(),
                    source: source.into(),
                })
                .collect(),
        }
    }

    pub fn with_lookup(
        mut self,
        name: impl Into<String>,
        table: &'static HashMap<&'static str, &'static str>,
        fallback: LookupFallback,
    ) -> Self {
        self.lookups.push(LookupField {
            name: name.into(),
            table,
            fallback,
        });
        self
    }

    /// All output field names in order.
    pub fn field_names(&self) -> Vec<&str> {
        std::iter::once(self.label_field.as_str())
            .chain(self.lookups.iter().map(|l| l.name.as_str()))
            .chain(self.sums.iter().map(|s| s.name.as_str()))
            .collect()
    }

    /// The 30-column cost-centre summary.
    pub fn cost_centre_summary() -> Self {
        Self::new(
            COST_CENTRE_HEADER,
            "Row Labels",
            SUMMED_COLUMNS
                .iter()
                .map(|source| (format!("Sum of {}", source), *source)),
        )
        .with_lookup(
            "Cost Centre As Per Books",
            &COST_CENTRE_AS_PER_BOOKS,
            LookupFallback::Key,
        )
        .with_lookup("Direct/Indirect", &DIRECT_INDIRECT, LookupFallback::Empty)
    }
}

impl Default for PayrollSchema {
    fn default() -> Self {
        Self::cost_centre_summary()
    }
}

/// Source headers summed into `Sum of <header>`, in output order.
pub const SUMMED_COLUMNS: [&str; 27] = [
    "Basic",
    "Food Coupon",
    "Basic Arrears",
    "HRA",
    "HRA Arrears",
    "Statutory Bonus",
    "OTHERS",
    "Statutory Bonus Arrears",
    "Special Allowances",
    "Special Allowances Arrears",
    "LTA",
    "LTA Arrears",
    "Food Coupon Arrears",
    "Other Allowance",
    "Other Allowance Arrears",
    "BONUS",
    "INCENTIVE",
    "ARREARS",
    "VARIABLE PAY",
    "SHIFT ALLOWANCE",
    "VARIABLE PERFORMANCE PAY",
    "TDS",
    "Professional Tax",
    "Provident Fund",
    "Provident Fund Arrears",
    "OTHER RECOVERIES",
    "Mediclaim Insurance Recovery",
];

/// Cost centre → name used in the books.
pub static COST_CENTRE_AS_PER_BOOKS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Admin", "Facilities"),
        ("AI/ML Delivery", "AL/MI Delivery"),
        ("Cloud", "Cloud Solutions"),
        ("Corporate", "Corporate"),
        ("Cyber Security", "Cyber Security"),
        ("Data & Insights", "Data Engeering"),
        ("Executive Management", "Corporate"),
        ("Finance", "Finance"),
        ("HR", "HR"),
        ("Internal IT", "IT Hyderabad"),
        ("Product Engeering", "Product Engeering"),
        ("Product Engineering", "Product Engeering"),
        ("Quality Engineering", "Quality Engineering"),
        ("Sales", "Sales"),
        ("Staffing", "Eknazar"),
        ("Talent Acquisition", "Talent Acquisation"),
    ])
});

/// Cost centre → direct or indirect cost.
pub static DIRECT_INDIRECT: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Admin", "Indirect"),
        ("AI/ML Delivery", "Direct"),
        ("Cloud", "Direct"),
        ("Corporate", "Indirect"),
        ("Cyber Security", "Direct"),
        ("Data & Insights", "Direct"),
        ("Executive Management", "Indirect"),
        ("Finance", "Indirect"),
        ("HR", "Indirect"),
        ("Internal IT", "Indirect"),
        ("Product Engeering", "Direct"),
        ("Product Engineering", "Direct"),
        ("Quality Engineering", "Direct"),
        ("Sales", "Indirect"),
        ("Staffing", "Indirect"),
        ("Talent Acquisition", "Indirect"),
    ])
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_has_thirty_ordered_fields() {
        let schema = PayrollSchema::cost_centre_summary();
        let names = schema.field_names();
        assert_eq!(names.len(), 30);
        assert_eq!(names[0], "Row Labels");
        assert_eq!(names[1], "Cost Centre As Per Books");
        assert_eq!(names[2], "Direct/Indirect");
        assert_eq!(names[3], "Sum of Basic");
        assert_eq!(names[29], "Sum of Mediclaim Insurance Recovery");
    }

    #[test]
    fn test_lookup_fallbacks() {
        let schema = PayrollSchema::cost_centre_summary();
        let books = &schema.lookups[0];
        let class = &schema.lookups[1];

        assert_eq!(books.resolve("Staffing"), "Eknazar");
        assert_eq!(class.resolve("Cloud"), "Direct");

        assert_eq!(books.resolve("Logistics"), "Logistics");
        assert_eq!(class.resolve("Logistics"), "");
    }

    #[test]
    fn test_custom_schema() {
        let schema = PayrollSchema::new("Dept", "Department", [("Total Basic", "Basic")]);
        assert_eq!(schema.field_names(), vec!["Department", "Total Basic"]);
        assert_eq!(schema.sums[0].source, "Basic");
    }
}
