pub mod delimited;
pub mod spreadsheet;

use std::path::Path;

use crate::error::VentilError;
use crate::model::Dataset;
use serde::{Deserialize, Serialize};

/// Input formats a table can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Delimited,
    Spreadsheet,
}

impl TableFormat {
    /// Detect the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<TableFormat, VentilError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "csv" | "txt" => Ok(TableFormat::Delimited),
            "xlsx" | "xlsm" | "xls" | "ods" => Ok(TableFormat::Spreadsheet),
            _ => Err(VentilError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Read one table file.
pub fn load_table(path: &Path) -> Result<Dataset, VentilError> {
    match TableFormat::from_path(path)? {
        TableFormat::Delimited => {
            let bytes = std::fs::read(path).map_err(|e| VentilError::Ingest {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
            delimited::read_delimited(&bytes).map_err(|e| match e {
                VentilError::Csv(e) => VentilError::Ingest {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                },
                other => other,
            })
        }
        TableFormat::Spreadsheet => spreadsheet::read_spreadsheet(path),
    }
}

/// A file left out of a multi-file load because it could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFile {
    pub path: String,
    pub reason: String,
}

/// Result of [`load_tables`].
#[derive(Debug, Clone)]
pub struct LoadedTables {
    pub dataset: Dataset,
    /// Files that failed to read, in input order.
    pub skipped: Vec<SkippedFile>,
}

/// Read several files and concatenate them into one dataset with a
/// `source_file` column naming the file each row came from.
///
/// A file that fails to read is logged and skipped. The call only fails
/// when no file could be read, with the error of the first failure.
pub fn load_tables<P: AsRef<Path>>(paths: &[P]) -> Result<LoadedTables, VentilError> {
    if paths.is_empty() {
        return Err(VentilError::EmptyInput("no input files".into()));
    }

    let mut parts = Vec::with_capacity(paths.len());
    let mut skipped = Vec::new();
    let mut first_error = None;
    for path in paths {
        let path = path.as_ref();
        let dataset = match load_table(path) {
            Ok(dataset) => dataset,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable file");
                skipped.push(SkippedFile {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                });
                first_error.get_or_insert(e);
                continue;
            }
        };
        tracing::info!(
            path = %path.display(),
            rows = dataset.row_count(),
            columns = dataset.column_count(),
            "loaded table"
        );
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        parts.push((name, dataset));
    }

    if parts.is_empty() {
        return Err(first_error
            .unwrap_or_else(|| VentilError::EmptyInput("no input files".into())));
    }

    Ok(LoadedTables {
        dataset: Dataset::concat(parts),
        skipped,
    })
}
