//! Sheet reader: source bytes to named sheets of rows.
//!
//! ```text
//! ┌──────────────┐  extension  ┌──────────────┐
//! │  file bytes  │────────────▶│ SourceFormat │
//! └──────────────┘             └──────┬───────┘
//!                    ┌────────────────┴────────────────┐
//!                    ▼                                 ▼
//!          ┌───────────────────┐             ┌───────────────────┐
//!          │ delimited (csv)   │             │ workbook          │
//!          │ chardet + csv     │             │ calamine          │
//!          └─────────┬─────────┘             └─────────┬─────────┘
//!                    └────────────────┬────────────────┘
//!                                     ▼
//!                            Workbook { sheets }
//! ```
//!
//! A delimited file yields one sheet named after the file stem. Cells keep
//! their original column positions (A = 0).

pub mod delimited;
pub mod workbook;

use serde::Serialize;
use std::path::Path;

use crate::error::{SheetError, SheetResult};
use crate::models::Sheet;

pub use delimited::{decode_content, detect_delimiter, detect_encoding, read_delimited, DelimitedInfo};
pub use workbook::{range_to_rows, read_workbook_bytes};

/// Container format of a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Delimited,
    Workbook,
}

impl SourceFormat {
    pub fn from_extension(ext: &str) -> SheetResult<Self> {
        match ext.to_lowercase().as_str() {
            "csv" | "tsv" | "txt" => Ok(Self::Delimited),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(Self::Workbook),
            other => Err(SheetError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn from_path(path: &Path) -> SheetResult<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if ext.is_empty() {
            return Err(SheetError::UnsupportedFormat(path.display().to_string()));
        }
        Self::from_extension(ext)
    }
}

/// All sheets of one source, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Workbook {
    pub format: SourceFormat,
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// The `requested` sheet if present, else `fallback` if present, else
    /// the first sheet.
    pub fn select_sheet(&self, requested: Option<&str>, fallback: Option<&str>) -> SheetResult<&Sheet> {
        requested
            .and_then(|name| self.sheet(name))
            .or_else(|| fallback.and_then(|name| self.sheet(name)))
            .or_else(|| self.sheets.first())
            .ok_or(SheetError::NoSheets)
    }

    pub fn into_sheets(self) -> Vec<Sheet> {
        self.sheets
    }
}

/// Decode raw bytes of a known format. `stem` names a delimited sheet.
pub fn read_bytes(bytes: Vec<u8>, format: SourceFormat, stem: &str) -> SheetResult<Workbook> {
    let sheets = match format {
        SourceFormat::Delimited => {
            let (rows, _) = read_delimited(&bytes)?;
            vec![Sheet::new(stem, rows)]
        }
        SourceFormat::Workbook => read_workbook_bytes(bytes)?,
    };
    Ok(Workbook { format, sheets })
}

/// Read and decode a file, choosing the format by extension.
pub fn read_file(path: &Path) -> SheetResult<Workbook> {
    let format = SourceFormat::from_path(path)?;
    let bytes = std::fs::read(path)?;
    read_bytes(bytes, format, &file_stem(path))
}

/// File name without extension, or `"Sheet1"` when there is none.
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Sheet1")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Cell;
    use std::io::Write;

    fn workbook(names: &[&str]) -> Workbook {
        Workbook {
            format: SourceFormat::Workbook,
            sheets: names.iter().map(|n| Sheet::new(*n, vec![])).collect(),
        }
    }

    #[test]
    fn test_format_by_extension() {
        assert_eq!(SourceFormat::from_extension("CSV").unwrap(), SourceFormat::Delimited);
        assert_eq!(SourceFormat::from_extension("xlsx").unwrap(), SourceFormat::Workbook);
        assert_eq!(SourceFormat::from_extension("ods").unwrap(), SourceFormat::Workbook);
        assert!(matches!(
            SourceFormat::from_extension("pdf"),
            Err(SheetError::UnsupportedFormat(_))
        ));
        assert!(SourceFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_select_sheet_order() {
        let wb = workbook(&["Summary", "Payroll", "January 2026"]);

        assert_eq!(wb.select_sheet(Some("Payroll"), None).unwrap().name, "Payroll");
        assert_eq!(
            wb.select_sheet(Some("Missing"), Some("January 2026")).unwrap().name,
            "January 2026"
        );
        assert_eq!(wb.select_sheet(Some("Missing"), Some("Other")).unwrap().name, "Summary");
        assert_eq!(wb.select_sheet(None, None).unwrap().name, "Summary");
    }

    #[test]
    fn test_select_sheet_without_sheets() {
        let wb = workbook(&[]);
        assert!(matches!(wb.select_sheet(None, None), Err(SheetError::NoSheets)));
    }

    #[test]
    fn test_read_csv_file() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "Cost Centre,Basic").unwrap();
        writeln!(file, "Sales,100").unwrap();

        let wb = read_file(file.path()).unwrap();
        assert_eq!(wb.format, SourceFormat::Delimited);
        assert_eq!(wb.sheets.len(), 1);
        assert_eq!(wb.sheets[0].name, file_stem(file.path()));
        assert_eq!(wb.sheets[0].rows[1][0], Cell::text("Sales"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_file(Path::new("/nonexistent/payroll.csv")).unwrap_err();
        assert!(matches!(err, SheetError::Io(_)));
    }
}
