//! Cost-centre payroll aggregation.
//!
//! ```text
//! header row ──▶ header map (trimmed text → column, last wins)
//!                     │
//! data rows ──▶ group by trimmed key (first-occurrence order)
//!                     │
//!                     ▼
//!        project each group onto the schema
//!        (label, lookups, Σ coerced source column, 0 if absent)
//!                     │
//!                     ▼
//!        append Grand Total = column-wise Σ of projected rows
//! ```

use serde::Serialize;
use std::collections::HashMap;

use crate::error::{TransformError, TransformResult};
use crate::models::{cell_at, AggregatedRow, Cell, FieldValue, Row, GRAND_TOTAL_LABEL};
use crate::primitives::clean_numeric;
use crate::schema::PayrollSchema;

/// Aggregated rows (Grand Total last) plus counts.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollOutput {
    pub rows: Vec<AggregatedRow>,
    /// Distinct keys, excluding the Grand Total.
    pub groups: usize,
    /// Data rows after the header row.
    pub rows_read: usize,
    /// Data rows with no cells or a blank key.
    pub skipped: usize,
}

impl PayrollOutput {
    pub fn grand_total(&self) -> Option<&AggregatedRow> {
        self.rows.last()
    }
}

/// Trimmed header text → column index. Later duplicates win; blank headers are ignored.
pub fn header_map(headers: &[Cell]) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .filter_map(|(i, h)| {
            let text = h.trimmed();
            (!text.is_empty()).then_some((text, i))
        })
        .collect()
}

/// Rows sharing one key, in encounter order.
struct Group<'a> {
    key: String,
    rows: Vec<&'a Row>,
}

/// Group, project and total payroll rows according to `schema`.
///
/// Row 0 is the header row. A missing key column is the only failure;
/// missing summed columns contribute `0`.
pub fn aggregate(rows: &[Row], schema: &PayrollSchema) -> TransformResult<PayrollOutput> {
    let headers = rows.first().ok_or(TransformError::EmptySheet)?;

    let key_index = headers
        .iter()
        .position(|h| h.trimmed() == schema.key_column)
        .ok_or_else(|| TransformError::MissingRequiredColumn {
            column: schema.key_column.clone(),
            available: headers
                .iter()
                .map(Cell::trimmed)
                .filter(|h| !h.is_empty())
                .collect(),
        })?;
    let columns = header_map(headers);

    let mut groups: Vec<Group<'_>> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut skipped = 0;

    for row in &rows[1..] {
        let key = cell_at(row, key_index).trimmed();
        if row.is_empty() || key.is_empty() {
            skipped += 1;
            continue;
        }
        match positions.get(&key) {
            Some(&pos) => groups[pos].rows.push(row),
            None => {
                positions.insert(key.clone(), groups.len());
                groups.push(Group {
                    key,
                    rows: vec![row],
                });
            }
        }
    }

    // source column index per summed field, None when absent
    let sources: Vec<Option<usize>> = schema
        .sums
        .iter()
        .map(|field| columns.get(field.source.trim()).copied())
        .collect();

    let mut projected: Vec<AggregatedRow> = groups
        .iter()
        .map(|group| project(group, schema, &sources))
        .collect();

    let group_count = projected.len();
    projected.push(grand_total(&projected, schema));

    Ok(PayrollOutput {
        rows: projected,
        groups: group_count,
        rows_read: rows.len() - 1,
        skipped,
    })
}

fn project(group: &Group<'_>, schema: &PayrollSchema, sources: &[Option<usize>]) -> AggregatedRow {
    let mut row = AggregatedRow::new();
    row.push(&schema.label_field, FieldValue::Text(group.key.clone()));

    for lookup in &schema.lookups {
        row.push(&lookup.name, FieldValue::Text(lookup.resolve(&group.key)));
    }

    for (field, source) in schema.sums.iter().zip(sources) {
        let sum = match source {
            Some(index) => group
                .rows
                .iter()
                .map(|r| clean_numeric(cell_at(r, *index)))
                .sum(),
            None => 0.0,
        };
        row.push(&field.name, FieldValue::Number(sum));
    }
    row
}

/// Column-wise totals over already projected rows.
fn grand_total(projected: &[AggregatedRow], schema: &PayrollSchema) -> AggregatedRow {
    let mut total = AggregatedRow::new();
    total.push(&schema.label_field, FieldValue::Text(GRAND_TOTAL_LABEL.to_string()));

    for lookup in &schema.lookups {
        total.push(&lookup.name, FieldValue::Text(String::new()));
    }

    for field in &schema.sums {
        let sum: f64 = projected
            .iter()
            .filter_map(|row| row.number(&field.name))
            .sum();
        total.push(&field.name, FieldValue::Number(sum));
    }
    total
}
