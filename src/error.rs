use thiserror::Error;

/// Errors produced while synthesizing, parsing or resolving selectors
#[derive(Debug, Error)]
pub enum SelectorError {
    /// The target cannot be reached from the root by following parent links
    #[error("target {target} is not contained in root {root}: root is unreachable from target")]
    NotContained { root: String, target: String },

    /// A selector string could not be parsed
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    /// A synthesized selector failed to resolve to exactly its target
    #[error("Selector '{selector}' resolved to {matches} nodes instead of exactly one")]
    Ambiguous { selector: String, matches: usize },

    /// User selection outside the list of candidates
    #[error("Invalid selection '{input}': expected numbers within 1-{count}")]
    InvalidSelection { input: String, count: usize },

    /// User selection that names no candidate at all
    #[error("Nothing was selected")]
    EmptySelection,

    /// Nothing to choose from
    #[error("No candidates found: {0}")]
    NoCandidates(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for selector operations
pub type Result<T> = std::result::Result<T, SelectorError>;
