use crate::diagnose::catalog::{IssueType, RuleId};
use crate::model::Severity;
use serde::{Deserialize, Serialize};

/// Priority assumed for a finding that carries none.
pub const DEFAULT_PRIORITY: u8 = 99;

fn default_priority() -> u8 {
    DEFAULT_PRIORITY
}

/// One flagged condition on one column (or column pair).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub rule: RuleId,
    pub severity: Severity,
    /// Short human-readable description naming the column and the statistic.
    pub message: String,
    pub explanation: String,
    /// Ordered, most useful first.
    pub suggestions: Vec<String>,
    pub issue_type: IssueType,
    /// Lower is more urgent.
    #[serde(default = "default_priority")]
    pub priority: u8,
    /// Header of the column the statistic was computed on.
    pub column: String,
    /// The computed statistic that crossed the threshold.
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outlier_count: Option<usize>,
}

impl Finding {
    /// Build a finding with the fixed content of `rule`.
    pub fn new(
        rule: RuleId,
        severity: Severity,
        column: &str,
        value: f64,
        detail: String,
    ) -> Finding {
        Finding {
            rule,
            severity,
            message: format!("{} in {}: {}", rule.title(), column, detail),
            explanation: rule.explanation().to_string(),
            suggestions: rule.suggestions().iter().map(|s| s.to_string()).collect(),
            issue_type: rule.issue_type(),
            priority: rule.priority(),
            column: column.to_string(),
            value,
            outlier_count: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComfortKind {
    IndoorHumidity,
    IndoorTemperature,
}

impl ComfortKind {
    pub fn label(self) -> &'static str {
        match self {
            ComfortKind::IndoorHumidity => "Relative Humidity",
            ComfortKind::IndoorTemperature => "Indoor Temperature",
        }
    }
}

/// Share of an indoor column's samples outside the comfort band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComfortResult {
    pub kind: ComfortKind,
    pub column: String,
    pub average: f64,
    /// 0 to 100.
    pub percent_outside: f64,
    /// True only when not a single sample was outside the band.
    pub compliant: bool,
}

/// One line of the technician checklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// 1-based position in the checklist.
    pub id: usize,
    pub text: String,
    /// Message of the finding the suggestion came from, shortened for display.
    pub source: String,
    pub severity: Severity,
    pub priority: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finding_carries_rule_content() {
        let f = Finding::new(
            RuleId::LowSuctionPressure,
            Severity::High,
            "SucPr1",
            40.0,
            "avg 40.0 PSI".into(),
        );
        assert_eq!(f.message, "Low suction pressure in SucPr1: avg 40.0 PSI");
        assert_eq!(f.issue_type, IssueType::RefrigerantSystem);
        assert_eq!(f.priority, 1);
        assert!(!f.suggestions.is_empty());
    }

    #[test]
    fn test_missing_priority_defaults_to_99() {
        let json = r#"{
            "rule": "frequent_outliers",
            "severity": "medium",
            "message": "m",
            "explanation": "e",
            "suggestions": [],
            "issue_type": "sensor_system",
            "column": "SucPr1",
            "value": 0.2
        }"#;
        let f: Finding = serde_json::from_str(json).unwrap();
        assert_eq!(f.priority, DEFAULT_PRIORITY);
        assert_eq!(f.outlier_count, None);
    }
}
