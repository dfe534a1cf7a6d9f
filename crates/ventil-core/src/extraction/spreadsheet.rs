use std::path::Path;

use calamine::{open_workbook_auto, Data, DataType, Reader};

use crate::error::VentilError;
use crate::model::{Cell, Dataset};

/// Read the first worksheet of an xlsx/xlsm/xls/ods workbook.
///
/// The first row holds the headers; every later row becomes a dataset row.
pub fn read_spreadsheet(path: &Path) -> Result<Dataset, VentilError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| VentilError::Ingest {
        path: path.to_path_buf(),
        reason: format!("failed to open workbook: {e}"),
    })?;

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(|e| VentilError::Ingest {
            path: path.to_path_buf(),
            reason: format!("failed to read first sheet: {e}"),
        })?,
        None => {
            return Err(VentilError::EmptyInput(format!(
                "{} has no worksheets",
                path.display()
            )))
        }
    };

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row.iter().map(header_text).collect(),
        None => {
            return Err(VentilError::EmptyInput(format!(
                "{} has an empty first sheet",
                path.display()
            )))
        }
    };

    let body: Vec<Vec<Cell>> = rows
        .map(|row| row.iter().map(to_cell).collect())
        .collect();

    tracing::debug!(
        path = %path.display(),
        columns = headers.len(),
        rows = body.len(),
        "read worksheet"
    );
    Dataset::new(headers, body)
}

fn header_text(cell: &Data) -> String {
    match to_cell(cell) {
        Cell::Empty => String::new(),
        other => other.to_string(),
    }
}

/// Map a workbook cell onto a dataset cell.
///
/// Date cells become text so the timeline parser sees them the same way it
/// sees CSV input. Serial values below one day are times of day.
fn to_cell(cell: &Data) -> Cell {
    match cell {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::from_text(s),
        Data::DateTime(dt) => match cell.as_datetime() {
            Some(ts) if dt.as_f64() < 1.0 => Cell::Text(ts.format("%H:%M:%S").to_string()),
            Some(ts) => Cell::Text(ts.format("%Y-%m-%d %H:%M:%S").to_string()),
            None => Cell::Number(dt.as_f64()),
        },
    }
}
