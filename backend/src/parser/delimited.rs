//! Delimited text sources with encoding and delimiter auto-detection.

use csv::ReaderBuilder;

use crate::error::{SheetError, SheetResult};
use crate::models::{Cell, Row};

/// Metadata detected while decoding a delimited file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimitedInfo {
    pub encoding: String,
    pub delimiter: char,
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let charset = chardet::detect(bytes).0;

    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" | "utf-8-sig" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes using a detected encoding name.
///
/// Unknown encodings and invalid UTF-8 decode lossily.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match encoding.to_lowercase().as_str() {
        "iso-8859-1" | "latin-1" | "latin1" => encoding_rs::ISO_8859_15.decode(bytes).0.into_owned(),
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned(),
        _ => String::from_utf8_lossy(bytes).into_owned(),
    }
}

/// Pick the separator occurring most often in the first line.
///
/// Ties keep the earlier candidate; a line with none of them yields `,`.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let mut best = (',', 0);
    for sep in [';', ',', '\t', '|'] {
        let count = first_line.matches(sep).count();
        if count > best.1 {
            best = (sep, count);
        }
    }
    best.0
}

/// Split decoded content into rows of text cells.
///
/// No header interpretation: the first line is row 0. Rows keep their own
/// width; blank fields become [`Cell::Empty`].
pub fn parse_rows(content: &str, delimiter: char) -> SheetResult<Vec<Row>> {
    let delimiter = u8::try_from(delimiter)
        .map_err(|_| SheetError::Unreadable(format!("unsupported delimiter {:?}", delimiter)))?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record =
            record.map_err(|e| SheetError::Unreadable(format!("line {}: {}", i + 1, e)))?;
        rows.push(record.iter().map(to_cell).collect());
    }
    Ok(rows)
}

fn to_cell(field: &str) -> Cell {
    if field.trim().is_empty() {
        Cell::Empty
    } else {
        Cell::Text(field.to_string())
    }
}

/// Decode and split raw bytes, returning the detected settings.
pub fn read_delimited(bytes: &[u8]) -> SheetResult<(Vec<Row>, DelimitedInfo)> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding);
    let delimiter = detect_delimiter(&content);
    let rows = parse_rows(&content, delimiter)?;
    Ok((rows, DelimitedInfo { encoding, delimiter }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_keep_header_line() {
        let rows = parse_rows("Cost Centre,Basic\nSales,\"1,000\"\n", ',').unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], Cell::text("Cost Centre"));
        assert_eq!(rows[1][1], Cell::text("1,000"));
    }

    #[test]
    fn test_blank_fields_are_empty_cells() {
        let rows = parse_rows("a;;  ;d", ';').unwrap();
        assert_eq!(rows[0], vec![Cell::text("a"), Cell::Empty, Cell::Empty, Cell::text("d")]);
    }

    #[test]
    fn test_ragged_rows_allowed() {
        let rows = parse_rows("a,b,c\n1\n1,2,3,4", ',').unwrap();
        assert_eq!(rows[1].len(), 1);
        assert_eq!(rows[2].len(), 4);
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("a;b;c\n1;2;3"), ';');
        assert_eq!(detect_delimiter("a,b,c"), ',');
        assert_eq!(detect_delimiter("a\tb\tc"), '\t');
        assert_eq!(detect_delimiter("a|b|c"), '|');
        assert_eq!(detect_delimiter("single"), ',');
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        assert_eq!(decode_content(bytes, "iso-8859-1"), "Société");
    }

    #[test]
    fn test_bom_is_stripped() {
        let rows = parse_rows(&decode_content(b"\xEF\xBB\xBFName,Amount\nA,1", "utf-8"), ',').unwrap();
        assert_eq!(rows[0][0], Cell::text("Name"));
    }

    #[test]
    fn test_read_delimited() {
        let (rows, info) = read_delimited(b"Cost Centre;Basic\nSales;100\n").unwrap();
        assert_eq!(info.delimiter, ';');
        assert_eq!(rows.len(), 2);
    }
}
