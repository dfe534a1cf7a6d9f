pub mod diagnose;
pub mod error;
pub mod extraction;
pub mod model;
pub mod parsing;
pub mod recommend;
pub mod reference;
pub mod rules;
pub mod trace;

use std::path::Path;

use diagnose::{Action, ComfortResult, Finding};
use error::VentilError;
use model::{ColumnRoleMap, Dataset};
use parsing::timeline::{build_timeline, Timeline, TimelineOptions, TimelineSource};
use parsing::RoleSeries;
use rules::schema::ThresholdProfile;
use serde::{Deserialize, Serialize};
use trace::{TraceBundle, TraceWarningKind};

/// Settings for one analysis run.
#[derive(Debug, Clone, Default)]
pub struct AnalysisOptions {
    pub profile: ThresholdProfile,
    pub timeline: TimelineOptions,
}

/// Everything produced by one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Name of the threshold profile the findings were computed with.
    pub profile: String,
    pub headers: Vec<String>,
    pub row_count: usize,
    pub roles: ColumnRoleMap,
    pub timeline: Timeline,
    pub findings: Vec<Finding>,
    pub comfort: Vec<ComfortResult>,
    pub actions: Vec<Action>,
    pub trace: TraceBundle,
}

/// Main API entry point: classify, diagnose and rank one dataset.
///
/// Never fails. Problems with the data itself (no recognizable columns,
/// unparseable timestamps, an empty table) end up as trace warnings.
pub fn analyze(dataset: &Dataset, options: &AnalysisOptions) -> AnalysisReport {
    let (roles, decisions) = parsing::header::explain_headers(dataset.headers());
    let mut trace = TraceBundle::new(decisions);

    if dataset.row_count() == 0 {
        trace.warn(TraceWarningKind::EmptyDataset, "the table has no data rows");
    }
    if roles.is_empty() {
        tracing::warn!(
            columns = dataset.column_count(),
            "no column header matched a known sensor role"
        );
        trace.warn(
            TraceWarningKind::NoClassifiedColumns,
            "no column header matched a known sensor role",
        );
    }

    let timeline = build_timeline(dataset, &roles, &options.timeline);
    if let TimelineSource::Synthetic { reason } = &timeline.source {
        if dataset.row_count() > 0 {
            trace.warn(
                TraceWarningKind::SyntheticTimeline,
                format!("{reason}; using hourly placeholder timestamps"),
            );
        }
    }

    let series = RoleSeries::from_dataset(dataset, &roles);
    let findings = diagnose::evaluate(&series, &options.profile);
    let comfort = diagnose::check_comfort(&series, &options.profile.comfort);
    let actions = recommend::aggregate(&findings, options.profile.actions.limit);

    tracing::info!(
        profile = %options.profile.name,
        rows = dataset.row_count(),
        classified = roles.classified_count(),
        findings = findings.len(),
        actions = actions.len(),
        "analysis complete"
    );

    AnalysisReport {
        profile: options.profile.name.clone(),
        headers: dataset.headers().to_vec(),
        row_count: dataset.row_count(),
        roles,
        timeline,
        findings,
        comfort,
        actions,
        trace,
    }
}

/// Load one or more table files, concatenate them and analyze the result.
///
/// The combined header list is classified afresh, so columns present in
/// only some files still get a role. Files that cannot be read are left
/// out and reported as trace warnings; the call fails only when none can.
pub fn analyze_files<P: AsRef<Path>>(
    paths: &[P],
    options: &AnalysisOptions,
) -> Result<AnalysisReport, VentilError> {
    let loaded = extraction::load_tables(paths)?;
    let mut report = analyze(&loaded.dataset, options);
    for skipped in &loaded.skipped {
        report.trace.warn(
            TraceWarningKind::SkippedFile,
            format!("{} was not loaded: {}", skipped.path, skipped.reason),
        );
    }
    Ok(report)
}
