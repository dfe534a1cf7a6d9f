use std::path::PathBuf;

use ventil_core::error::VentilError;
use ventil_core::extraction;
use ventil_core::parsing::header::explain_headers;
use ventil_core::trace::ColumnDecision;

use crate::output;

/// Column decisions for each readable file, plus the combined table when
/// more than one file is given.
pub fn run(files: &[PathBuf], output_format: &str) -> Result<(), VentilError> {
    let loaded = extraction::load_tables(files)?;
    for skipped in &loaded.skipped {
        eprintln!("Warning: skipped {}: {}", skipped.path, skipped.reason);
    }

    let mut sections: Vec<(String, Vec<ColumnDecision>)> = Vec::new();
    for path in files {
        let name = path.display().to_string();
        if loaded.skipped.iter().any(|s| s.path == name) {
            continue;
        }
        let dataset = extraction::load_table(path)?;
        let (_, decisions) = explain_headers(dataset.headers());
        sections.push((name, decisions));
    }

    if files.len() > 1 {
        let (_, decisions) = explain_headers(loaded.dataset.headers());
        sections.push(("combined".to_string(), decisions));
    }

    match output_format {
        "json" => output::json::print_columns(&sections)?,
        _ => output::table::print_columns(&sections),
    }

    Ok(())
}
