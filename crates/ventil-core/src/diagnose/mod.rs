pub mod catalog;
pub mod comfort;
pub mod engine;
pub mod outcome;
pub mod stats;

pub use catalog::{IssueType, RuleId};
pub use comfort::check_comfort;
pub use engine::evaluate;
pub use outcome::{Action, ComfortKind, ComfortResult, Finding};
