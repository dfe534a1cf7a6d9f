use std::path::{Path, PathBuf};

use ventil_core::error::VentilError;
use ventil_core::reference::diagnostic_reference;
use ventil_core::rules::{self, builtin};
use ventil_core::{analyze_files, AnalysisOptions};

use crate::output;

pub fn run(
    files: &[PathBuf],
    preset: &str,
    profile: Option<&Path>,
    output_format: &str,
    reference: bool,
    details: bool,
) -> Result<(), VentilError> {
    let profile = match profile {
        Some(path) => rules::load_profile(path)?,
        None => builtin::load_preset(preset)?,
    };
    tracing::debug!(profile = %profile.name, files = files.len(), "starting analysis");

    let options = AnalysisOptions {
        profile,
        ..AnalysisOptions::default()
    };
    let report = analyze_files(files, &options)?;

    let sections = if reference {
        diagnostic_reference(&report.findings)
    } else {
        Vec::new()
    };

    match output_format {
        "json" => output::json::print_report(&report, reference.then_some(sections.as_slice()))?,
        _ => output::table::print_report(&report, &sections, details),
    }

    Ok(())
}
