use crate::model::Role;
use serde::{Deserialize, Serialize};

pub const TRACE_SCHEMA_VERSION: &str = "1.0";

/// How one header was classified, and by which rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDecision {
    pub index: usize,
    pub header: String,
    /// Role actually assigned. `None` for unmatched headers and for headers
    /// that matched a single-valued role already taken by an earlier column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// Name of the classifier rule that fired first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
}

impl ColumnDecision {
    /// True when a rule fired but its role was already filled.
    pub fn is_shadowed(&self) -> bool {
        self.role.is_none() && self.rule.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceWarningKind {
    SyntheticTimeline,
    NoClassifiedColumns,
    EmptyDataset,
    /// An input file could not be read and was left out.
    SkippedFile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceWarning {
    pub kind: TraceWarningKind,
    pub message: String,
}

impl TraceWarning {
    pub fn new(kind: TraceWarningKind, message: impl Into<String>) -> Self {
        TraceWarning {
            kind,
            message: message.into(),
        }
    }
}

/// Record of every classification decision plus the data-quality warnings
/// raised during one analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceBundle {
    pub trace_schema_version: String,
    pub decisions: Vec<ColumnDecision>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<TraceWarning>,
}

impl Default for TraceBundle {
    fn default() -> Self {
        Self {
            trace_schema_version: TRACE_SCHEMA_VERSION.to_string(),
            decisions: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

impl TraceBundle {
    pub fn new(decisions: Vec<ColumnDecision>) -> Self {
        Self {
            decisions,
            ..Self::default()
        }
    }

    pub fn warn(&mut self, kind: TraceWarningKind, message: impl Into<String>) {
        self.warnings.push(TraceWarning::new(kind, message));
    }

    /// Headers no rule matched.
    pub fn unclassified(&self) -> impl Iterator<Item = &ColumnDecision> {
        self.decisions.iter().filter(|d| d.rule.is_none())
    }
}
