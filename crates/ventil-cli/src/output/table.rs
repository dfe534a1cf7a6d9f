use ventil_core::model::Severity;
use ventil_core::parsing::timeline::TimelineSource;
use ventil_core::reference::ReferenceSection;
use ventil_core::trace::ColumnDecision;
use ventil_core::AnalysisReport;

pub fn print_columns(sections: &[(String, Vec<ColumnDecision>)]) {
    for (i, (source, decisions)) in sections.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("=== {} ===\n", source);
        print_decisions(decisions);
    }
}

fn print_decisions(decisions: &[ColumnDecision]) {
    let max_header = decisions
        .iter()
        .map(|d| d.header.chars().count())
        .max()
        .unwrap_or(6)
        .max(6);

    println!(
        "  {:>3}  {:<width$}  {:<26}  Rule",
        "#",
        "Header",
        "Role",
        width = max_header
    );
    println!("  {}", "-".repeat(max_header + 45));
    for d in decisions {
        let role = match (d.role, d.rule.as_deref()) {
            (Some(role), _) => role.label().to_string(),
            (None, Some(_)) => "(duplicate, ignored)".to_string(),
            (None, None) => "-".to_string(),
        };
        println!(
            "  {:>3}  {:<width$}  {:<26}  {}",
            d.index,
            d.header,
            role,
            d.rule.as_deref().unwrap_or("-"),
            width = max_header
        );
    }
}

fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::High => "HIGH",
        Severity::Medium => "MED ",
        Severity::Low => "LOW ",
    }
}

fn describe_timeline(report: &AnalysisReport) -> String {
    let header = |i: usize| {
        report
            .headers
            .get(i)
            .map(String::as_str)
            .unwrap_or("?")
            .to_string()
    };
    let source = match &report.timeline.source {
        TimelineSource::Datetime { column } => format!("'{}'", header(*column)),
        TimelineSource::DateAndTime {
            date_column,
            time_column,
        } => format!("'{}' + '{}'", header(*date_column), header(*time_column)),
        TimelineSource::DateOnly { column } => format!("'{}' (dates only)", header(*column)),
        TimelineSource::TimeOnly { column } => format!("'{}' (times only)", header(*column)),
        TimelineSource::Synthetic { reason } => return format!("hourly placeholder ({reason})"),
    };
    format!(
        "{} ({} of {} rows parsed)",
        source,
        report.timeline.parsed_count(),
        report.timeline.len()
    )
}

pub fn print_report(report: &AnalysisReport, reference: &[ReferenceSection], details: bool) {
    println!("=== Analysis (profile: {}) ===\n", report.profile);
    println!(
        "  Rows: {}   Columns: {} ({} classified)",
        report.row_count,
        report.headers.len(),
        report.roles.classified_count()
    );
    println!("  Timeline: {}\n", describe_timeline(report));

    if !report.trace.warnings.is_empty() {
        println!("Warnings:");
        for w in &report.trace.warnings {
            println!("  - {}", w.message);
        }
        println!();
    }

    println!("Columns:\n");
    print_decisions(&report.trace.decisions);
    println!();

    if report.findings.is_empty() {
        println!("Findings: none\n");
    } else {
        println!("Findings ({}):\n", report.findings.len());
        for f in &report.findings {
            println!("  [{}] {}", severity_tag(f.severity), f.message);
            if details {
                println!("         {}", f.explanation);
                for s in &f.suggestions {
                    println!("         - {}", s);
                }
                println!();
            }
        }
        if !details {
            println!();
        }
    }

    if !report.comfort.is_empty() {
        println!("Comfort:\n");
        let max_col = report
            .comfort
            .iter()
            .map(|c| c.column.chars().count())
            .max()
            .unwrap_or(10);
        for c in &report.comfort {
            let status = if c.compliant {
                "compliant"
            } else {
                "NOT compliant"
            };
            println!(
                "  {:<20} {:<width$}  avg {:>6.1}  {:>5.1}% outside  {}",
                c.kind.label(),
                c.column,
                c.average,
                c.percent_outside,
                status,
                width = max_col
            );
        }
        println!();
    }

    if !report.actions.is_empty() {
        println!("Recommended actions:\n");
        for a in &report.actions {
            println!("  {:>2}. [{}] {}", a.id, severity_tag(a.severity), a.text);
            if details {
                println!("          from: {}", a.source);
            }
        }
        println!();
    }

    if !reference.is_empty() {
        println!("Diagnostic reference:\n");
        for section in reference {
            println!("  == {} ==\n", section.title);
            for p in &section.problems {
                println!("  {}", p.title);
                println!("    Symptoms: {}", p.symptoms);
                println!("    Causes:   {}", p.causes);
                println!("    Diagnostics:");
                for d in &p.diagnostics {
                    println!("      - {}", d);
                }
                println!("    Solutions:");
                for s in &p.solutions {
                    println!("      - {}", s);
                }
                println!();
            }
        }
    }
}
