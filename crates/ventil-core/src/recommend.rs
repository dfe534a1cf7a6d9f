use crate::diagnose::outcome::{Action, Finding};
use std::collections::HashSet;

/// Longest finding message shown next to an action before it is cut.
pub const SOURCE_DISPLAY_CHARS: usize = 60;

/// Flatten findings into a ranked technician checklist.
///
/// Findings are taken most urgent first (stable, so equal priorities keep
/// their evaluation order). Each suggestion is emitted once; later repeats
/// of the exact same text are dropped. Stops after `limit` actions.
pub fn aggregate(findings: &[Finding], limit: Option<usize>) -> Vec<Action> {
    let mut ordered: Vec<&Finding> = findings.iter().collect();
    ordered.sort_by_key(|f| f.priority);

    let mut seen: HashSet<&str> = HashSet::new();
    let mut actions = Vec::new();

    'findings: for finding in ordered {
        for suggestion in &finding.suggestions {
            if limit.is_some_and(|max| actions.len() >= max) {
                break 'findings;
            }
            if !seen.insert(suggestion.as_str()) {
                continue;
            }
            actions.push(Action {
                id: actions.len() + 1,
                text: suggestion.clone(),
                source: shorten(&finding.message, SOURCE_DISPLAY_CHARS),
                severity: finding.severity,
                priority: finding.priority,
            });
        }
    }

    tracing::debug!(findings = findings.len(), actions = actions.len(), "aggregated actions");
    actions
}

fn shorten(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{cut}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnose::catalog::RuleId;
    use crate::model::Severity;

    fn finding(priority: u8, message: &str, suggestions: &[&str]) -> Finding {
        let mut f = Finding::new(
            RuleId::FrequentOutliers,
            Severity::Medium,
            "col",
            0.0,
            String::new(),
        );
        f.priority = priority;
        f.message = message.to_string();
        f.suggestions = suggestions.iter().map(|s| s.to_string()).collect();
        f
    }

    #[test]
    fn test_sorted_by_priority_and_deduplicated() {
        let findings = vec![
            finding(5, "sensor", &["Calibrate", "Rewire"]),
            finding(1, "charge", &["Check charge", "Calibrate"]),
        ];
        let actions = aggregate(&findings, None);
        let texts: Vec<&str> = actions.iter().map(|a| a.text.as_str()).collect();
        assert_eq!(texts, vec!["Check charge", "Calibrate", "Rewire"]);
        assert_eq!(actions[1].priority, 1);
        assert_eq!(actions[2].source, "sensor");
        assert_eq!(actions.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_dedupe_is_case_sensitive() {
        let findings = vec![finding(1, "m", &["Check charge", "check charge"])];
        assert_eq!(aggregate(&findings, None).len(), 2);
    }

    #[test]
    fn test_limit() {
        let findings = vec![finding(1, "m", &["a", "b", "c", "d"])];
        assert_eq!(aggregate(&findings, Some(2)).len(), 2);
        assert_eq!(aggregate(&findings, None).len(), 4);
    }

    #[test]
    fn test_equal_priority_keeps_input_order() {
        let findings = vec![finding(2, "first", &["x"]), finding(2, "second", &["y"])];
        let actions = aggregate(&findings, None);
        assert_eq!(actions[0].source, "first");
        assert_eq!(actions[1].source, "second");
    }

    #[test]
    fn test_long_message_truncated() {
        let long = "x".repeat(80);
        let findings = vec![finding(1, &long, &["a"])];
        let actions = aggregate(&findings, None);
        assert_eq!(actions[0].source.len(), 63);
        assert!(actions[0].source.ends_with("..."));
    }

    #[test]
    fn test_empty_findings() {
        assert!(aggregate(&[], Some(15)).is_empty());
    }
}
