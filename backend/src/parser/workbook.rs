//! Workbook sources (xlsx, xlsm, xlsb, xls, ods) decoded with calamine.

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use std::io::Cursor;

use crate::error::{SheetError, SheetResult};
use crate::models::{Cell, Row, Sheet};

/// Decode every sheet of a workbook, in workbook order.
pub fn read_workbook_bytes(bytes: Vec<u8>) -> SheetResult<Vec<Sheet>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| SheetError::Unreadable(e.to_string()))?;

    let names: Vec<String> = workbook.sheet_names().to_vec();
    if names.is_empty() {
        return Err(SheetError::NoSheets);
    }

    let mut sheets = Vec::with_capacity(names.len());
    for name in names {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| SheetError::Unreadable(format!("sheet '{}': {}", name, e)))?;
        sheets.push(Sheet::new(name, range_to_rows(&range)));
    }
    Ok(sheets)
}

/// Rows of a used range, re-anchored at A1.
///
/// calamine trims leading empty rows and columns from the used range and
/// reports coordinates relative to `range.start()`. Both offsets are restored
/// so column indices match the sheet.
pub fn range_to_rows(range: &Range<Data>) -> Vec<Row> {
    let Some((start_row, start_col)) = range.start() else {
        return Vec::new();
    };

    let mut rows: Vec<Row> = vec![Vec::new(); start_row as usize];
    for cells in range.rows() {
        let mut row: Row = vec![Cell::Empty; start_col as usize];
        row.extend(cells.iter().map(to_cell));
        while matches!(row.last(), Some(Cell::Empty)) {
            row.pop();
        }
        rows.push(row);
    }
    rows
}

fn to_cell(value: &Data) -> Cell {
    match value {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::Int(n) => Cell::Number(*n as f64),
        Data::Float(n) => Cell::Number(*n),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::Bool(b) => Cell::text(if *b { "TRUE" } else { "FALSE" }),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::text(s.clone()),
    }
}
