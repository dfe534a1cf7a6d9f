//! End-to-end tests for analyze() and analyze_files().
//!
//! Datasets are built in memory from string rows; the file tests write
//! small CSV logs into a temporary directory.

use ventil_core::diagnose::{ComfortKind, IssueType, RuleId};
use ventil_core::error::VentilError;
use ventil_core::model::{Cell, Dataset, Role, Severity, SOURCE_FILE_COLUMN};
use ventil_core::parsing::timeline::TimelineSource;
use ventil_core::rules::builtin::load_preset;
use ventil_core::trace::TraceWarningKind;
use ventil_core::{analyze, analyze_files, AnalysisOptions};

fn dataset(headers: &[&str], rows: &[Vec<String>]) -> Dataset {
    Dataset::new(
        headers.iter().map(|h| h.to_string()).collect(),
        rows.iter()
            .map(|r| r.iter().map(|v| Cell::from_text(v)).collect())
            .collect(),
    )
    .unwrap()
}

fn row(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn standard() -> AnalysisOptions {
    AnalysisOptions::default()
}

fn strict() -> AnalysisOptions {
    AnalysisOptions {
        profile: load_preset("strict").unwrap(),
        ..AnalysisOptions::default()
    }
}

// ---------------------------------------------------------------------------
// Scenario A: date/time/suction/discharge log with starved suction
// ---------------------------------------------------------------------------
#[test]
fn low_suction_pressure_log() {
    let rows: Vec<Vec<String>> = (0..6)
        .map(|i| row(&["31-May", &format!("10:{:02}", i * 5), "40", "250"]))
        .collect();
    let ds = dataset(&["Date", "Time", "SucPr1", "Dischg1"], &rows);

    let report = analyze(&ds, &standard());

    assert_eq!(report.roles.date, Some(0));
    assert_eq!(report.roles.time, Some(1));
    assert_eq!(report.roles.indices(Role::SuctionPressure), &[2]);
    assert_eq!(report.roles.indices(Role::DischargePressure), &[3]);

    let low = report
        .findings
        .iter()
        .find(|f| f.rule == RuleId::LowSuctionPressure)
        .expect("low suction pressure finding");
    assert_eq!(low.severity, Severity::High);
    assert!(low.message.starts_with("Low suction pressure"));
    assert!(low.message.contains("SucPr1"));
    assert!(!low.suggestions.is_empty());

    assert_eq!(
        report.timeline.source,
        TimelineSource::DateAndTime {
            date_column: 0,
            time_column: 1
        }
    );
    assert_eq!(report.timeline.parsed_count(), 6);
    assert!(report.trace.warnings.is_empty());
}

// ---------------------------------------------------------------------------
// Scenario B/C: indoor comfort
// ---------------------------------------------------------------------------
#[test]
fn indoor_temperature_in_band_is_compliant() {
    let rows: Vec<Vec<String>> = (0..8).map(|_| row(&["72"])).collect();
    let report = analyze(&dataset(&["Indoor Temp"], &rows), &standard());

    assert_eq!(report.comfort.len(), 1);
    let c = &report.comfort[0];
    assert_eq!(c.kind, ComfortKind::IndoorTemperature);
    assert_eq!(c.percent_outside, 0.0);
    assert!(c.compliant);
}

#[test]
fn indoor_temperature_half_out_of_band() {
    let rows: Vec<Vec<String>> = (0..8)
        .map(|i| row(&[if i < 4 { "80" } else { "72" }]))
        .collect();
    let report = analyze(&dataset(&["Indoor Temp"], &rows), &standard());

    let c = &report.comfort[0];
    assert_eq!(c.percent_outside, 50.0);
    assert!(!c.compliant);
    assert_eq!(c.average, 76.0);
}

// ---------------------------------------------------------------------------
// Scenario D: unusable date column
// ---------------------------------------------------------------------------
#[test]
fn unparseable_dates_fall_back_to_synthetic_timeline() {
    let rows: Vec<Vec<String>> = (0..5).map(|_| row(&["pending", "55"])).collect();
    let report = analyze(&dataset(&["Date", "SAT"], &rows), &standard());

    assert!(report.timeline.is_synthetic());
    assert_eq!(report.timeline.len(), 5);
    assert!(report.timeline.timestamps.iter().all(Option::is_some));
    assert!(report
        .timeline
        .timestamps
        .windows(2)
        .all(|w| w[0] < w[1]));
    assert!(report
        .trace
        .warnings
        .iter()
        .any(|w| w.kind == TraceWarningKind::SyntheticTimeline));
}

// ---------------------------------------------------------------------------
// Scenario E: high head pressure
// ---------------------------------------------------------------------------
#[test]
fn high_discharge_pressure_single_condenser_finding() {
    let rows: Vec<Vec<String>> = (0..6)
        .map(|i| row(&[&format!("2024-06-01 1{i}:00"), "450"]))
        .collect();
    let report = analyze(&dataset(&["Timestamp", "Dischg1"], &rows), &standard());

    let condenser: Vec<_> = report
        .findings
        .iter()
        .filter(|f| f.issue_type == IssueType::CondenserSystem && f.column == "Dischg1")
        .collect();
    assert_eq!(condenser.len(), 1);
    assert_eq!(condenser[0].severity, Severity::High);
    assert!(condenser[0]
        .suggestions
        .iter()
        .any(|s| s == "Clean condenser coil"));
    assert_eq!(report.timeline.source, TimelineSource::Datetime { column: 0 });
}

// ---------------------------------------------------------------------------
// Empty and unrecognized tables
// ---------------------------------------------------------------------------
#[test]
fn zero_rows_classify_but_find_nothing() {
    let ds = Dataset::empty(vec!["Date".into(), "SucPr1".into(), "Indoor Temp".into()]);
    let report = analyze(&ds, &standard());

    assert_eq!(report.roles.indices(Role::SuctionPressure), &[1]);
    assert!(report.findings.is_empty());
    assert!(report.comfort.is_empty());
    assert!(report.actions.is_empty());
    assert!(report.timeline.is_empty());
    assert!(report
        .trace
        .warnings
        .iter()
        .any(|w| w.kind == TraceWarningKind::EmptyDataset));
}

#[test]
fn unrecognized_headers_are_reported() {
    let rows = vec![row(&["on", "12.5"])];
    let report = analyze(&dataset(&["Fan Status", "Compressor Amps"], &rows), &standard());

    assert!(report.roles.is_empty());
    assert!(report.findings.is_empty());
    assert_eq!(report.trace.unclassified().count(), 2);
    assert!(report
        .trace
        .warnings
        .iter()
        .any(|w| w.kind == TraceWarningKind::NoClassifiedColumns));
}

// ---------------------------------------------------------------------------
// Action ranking
// ---------------------------------------------------------------------------
#[test]
fn urgent_actions_come_first() {
    // SucPr1 averages well under 60 PSI; HSP has a few wild readings.
    let mut rows = Vec::new();
    for i in 0..12 {
        let hsp = match i {
            3 => "90",
            7 => "40",
            9 => "95",
            _ => "68",
        };
        rows.push(row(&["40", hsp]));
    }
    let report = analyze(&dataset(&["SucPr1", "HSP"], &rows), &standard());

    let rules: Vec<RuleId> = report.findings.iter().map(|f| f.rule).collect();
    assert!(rules.contains(&RuleId::LowSuctionPressure));
    assert!(rules.contains(&RuleId::FrequentOutliers));

    let first_p5 = report.actions.iter().position(|a| a.priority == 5).unwrap();
    let last_p1 = report.actions.iter().rposition(|a| a.priority == 1).unwrap();
    assert!(last_p1 < first_p5);

    let mut texts: Vec<&str> = report.actions.iter().map(|a| a.text.as_str()).collect();
    let total = texts.len();
    texts.sort();
    texts.dedup();
    assert_eq!(texts.len(), total);
}

#[test]
fn strict_profile_changes_severity_and_limit() {
    let rows: Vec<Vec<String>> = (0..6).map(|_| row(&["45", "500", "20"])).collect();
    let ds = dataset(&["SucPr1", "HeadPr1", "SucT1"], &rows);

    let std_report = analyze(&ds, &standard());
    let strict_report = analyze(&ds, &strict());

    let severity = |r: &ventil_core::AnalysisReport| {
        r.findings
            .iter()
            .find(|f| f.rule == RuleId::LowSuctionPressure)
            .map(|f| f.severity)
    };
    assert_eq!(severity(&std_report), Some(Severity::High));
    assert_eq!(severity(&strict_report), Some(Severity::Medium));
    assert_eq!(strict_report.profile, "strict");
    assert!(std_report.actions.len() <= 15);
    assert!(strict_report.actions.len() >= std_report.actions.len());
}

// ---------------------------------------------------------------------------
// File ingestion
// ---------------------------------------------------------------------------
#[test]
fn analyze_combined_csv_files() {
    let dir = tempfile::tempdir().unwrap();
    let unit_a = dir.path().join("rtu1.csv");
    let unit_b = dir.path().join("rtu2.csv");
    std::fs::write(
        &unit_a,
        "Date,Time,SucPr1\n31-May,10:00,40\n31-May,10:15,41\n31-May,10:30,39\n",
    )
    .unwrap();
    std::fs::write(
        &unit_b,
        "Date,Time,Dischg1,Zone RH\n1-Jun,10:00,300,55\n1-Jun,10:15,305,58\n",
    )
    .unwrap();

    let report = analyze_files(&[&unit_a, &unit_b], &standard()).unwrap();

    assert_eq!(report.row_count, 5);
    assert_eq!(
        report.headers,
        vec!["Date", "Time", "SucPr1", "Dischg1", "Zone RH", SOURCE_FILE_COLUMN]
    );
    assert_eq!(report.roles.indices(Role::SuctionPressure), &[2]);
    assert_eq!(report.roles.indices(Role::DischargePressure), &[3]);
    assert_eq!(report.roles.indices(Role::IndoorHumidity), &[4]);
    assert_eq!(report.roles.role_of(5), None);
    assert_eq!(report.timeline.parsed_count(), 5);
    assert!(report
        .findings
        .iter()
        .any(|f| f.rule == RuleId::LowSuctionPressure));
}

#[test]
fn unreadable_file_is_skipped_with_warning() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("rtu1.csv");
    let corrupt = dir.path().join("rtu2.xlsx");
    std::fs::write(
        &good,
        "Date,Time,SucPr1\n31-May,10:00,40\n31-May,10:15,41\n31-May,10:30,39\n",
    )
    .unwrap();
    std::fs::write(&corrupt, b"PK\x03\x04 truncated").unwrap();

    let report = analyze_files(&[&good, &corrupt], &standard()).unwrap();

    assert_eq!(report.row_count, 3);
    assert_eq!(report.roles.indices(Role::SuctionPressure), &[2]);
    assert!(report
        .findings
        .iter()
        .any(|f| f.rule == RuleId::LowSuctionPressure));

    let skipped: Vec<_> = report
        .trace
        .warnings
        .iter()
        .filter(|w| w.kind == TraceWarningKind::SkippedFile)
        .collect();
    assert_eq!(skipped.len(), 1);
    assert!(skipped[0].message.contains("rtu2.xlsx"));
}

#[test]
fn unsupported_extension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("report.pdf");
    std::fs::write(&pdf, b"%PDF-1.4").unwrap();

    let err = analyze_files(&[&pdf], &standard()).unwrap_err();
    assert!(matches!(err, VentilError::UnsupportedFormat(_)));
}

#[test]
fn over_long_csv_row_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    std::fs::write(&path, "Date,SucPr1\n1/1/2024,40,extra\n").unwrap();

    let err = analyze_files(&[&path], &standard()).unwrap_err();
    assert!(matches!(err, VentilError::ColumnCountMismatch { .. }));
}
