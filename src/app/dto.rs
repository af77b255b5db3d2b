use crate::domain::access::AccessLevel;
use serde::{Deserialize, Serialize};

/// One tightening suggestion: the declaration's current level can be lowered
/// to the suggested one without breaking any usage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: u32,
    pub name: String,
    pub qualified_name: String,
    pub kind: String,
    pub current: AccessLevel,
    pub suggested: AccessLevel,
}

/// Result of one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub project: String,
    /// Declarations in the snapshot.
    pub declaration_count: usize,
    /// Declarations that resolved to a level (skips count, cancelled do not).
    pub resolved_count: usize,
    /// Container suggestions withdrawn by the containment invariant.
    pub withdrawn_count: usize,
    /// The run's cancellation token fired; unresolved declarations are
    /// simply absent from the suggestions.
    pub interrupted: bool,
    pub suggestions: Vec<Suggestion>,
}
