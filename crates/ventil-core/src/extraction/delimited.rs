use crate::error::VentilError;
use crate::model::{Cell, Dataset};
use std::borrow::Cow;

/// Decode raw CSV bytes as text.
///
/// UTF-8 (with or without BOM) is tried first; bytes that are not valid
/// UTF-8 are decoded as Windows-1252, the usual encoding of building
/// automation exports. Returns the text and the name of the encoding used.
pub fn decode_text(bytes: &[u8]) -> (Cow<'_, str>, &'static str) {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => (Cow::Borrowed(text), encoding_rs::UTF_8.name()),
        Err(_) => {
            let (text, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            (text, encoding_rs::WINDOWS_1252.name())
        }
    }
}

/// Pick the delimiter that occurs most often on the header line.
pub fn sniff_delimiter(text: &str) -> u8 {
    let first = text.lines().next().unwrap_or_default();
    [b',', b';', b'\t']
        .into_iter()
        .map(|d| (d, first.bytes().filter(|b| *b == d).count()))
        .filter(|(_, n)| *n > 0)
        .max_by_key(|(_, n)| *n)
        .map(|(d, _)| d)
        .unwrap_or(b',')
}

/// Parse delimited text into a dataset. The first record is the header row.
///
/// Short rows are padded with empty cells. A row with more cells than
/// there are headers is rejected.
pub fn parse_delimited(text: &str) -> Result<Dataset, VentilError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(sniff_delimiter(text))
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let headers: Vec<String> = match records.next() {
        Some(record) => record?.iter().map(|h| h.trim().to_string()).collect(),
        None => return Err(VentilError::EmptyInput("no header row".into())),
    };

    let mut rows = Vec::new();
    for (row, record) in records.enumerate() {
        let record = record?;
        if record.len() > headers.len() {
            return Err(VentilError::ColumnCountMismatch {
                row,
                expected: headers.len(),
                found: record.len(),
            });
        }
        let mut cells: Vec<Cell> = record.iter().map(Cell::from_text).collect();
        cells.resize(headers.len(), Cell::Empty);
        rows.push(cells);
    }

    Dataset::new(headers, rows)
}

/// Decode and parse CSV bytes.
pub fn read_delimited(bytes: &[u8]) -> Result<Dataset, VentilError> {
    let (text, encoding) = decode_text(bytes);
    if encoding != encoding_rs::UTF_8.name() {
        tracing::warn!(encoding, "input is not valid UTF-8, decoded with fallback encoding");
    } else {
        tracing::debug!(encoding, "decoded input");
    }
    parse_delimited(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_csv() {
        let ds = parse_delimited("Date,Time,SucPr1\n31-May,10:00,40\n31-May,10:15,41\n").unwrap();
        assert_eq!(ds.headers(), &["Date", "Time", "SucPr1"]);
        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.rows()[1][2].as_number(), Some(41.0));
    }

    #[test]
    fn test_short_rows_padded() {
        let ds = parse_delimited("A,B,C\n1,2\n").unwrap();
        assert_eq!(ds.rows()[0], vec![Cell::from_text("1"), Cell::from_text("2"), Cell::Empty]);
    }

    #[test]
    fn test_long_row_rejected() {
        let err = parse_delimited("A,B\n1,2,3\n").unwrap_err();
        assert!(matches!(
            err,
            VentilError::ColumnCountMismatch {
                row: 0,
                expected: 2,
                found: 3
            }
        ));
    }

    #[test]
    fn test_semicolon_and_tab_delimiters() {
        let ds = parse_delimited("Date;SucPr1\n1/1/2024;40\n").unwrap();
        assert_eq!(ds.column_count(), 2);
        let ds = parse_delimited("Date\tSucPr1\n1/1/2024\t40\n").unwrap();
        assert_eq!(ds.headers()[1], "SucPr1");
    }

    #[test]
    fn test_header_only() {
        let ds = parse_delimited("Date,SucPr1\n").unwrap();
        assert_eq!(ds.row_count(), 0);
        assert!(matches!(parse_delimited(""), Err(VentilError::EmptyInput(_))));
    }

    #[test]
    fn test_windows_1252_fallback() {
        // "Temp °F" with 0xB0 for the degree sign.
        let bytes = b"Zone Temp \xB0F\n72\n";
        let (text, encoding) = decode_text(bytes);
        assert_eq!(encoding, "windows-1252");
        assert!(text.contains("°F"));
        let ds = read_delimited(bytes).unwrap();
        assert_eq!(ds.headers()[0], "Zone Temp °F");
    }

    #[test]
    fn test_utf8_bom_stripped() {
        let ds = read_delimited(b"\xEF\xBB\xBFDate,SucPr1\n1/1/2024,40\n").unwrap();
        assert_eq!(ds.headers()[0], "Date");
    }
}
