use thiserror::Error;

/// Faults surfaced by the search entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Query was blank, or held nothing but operators.
    #[error("empty query")]
    EmptyQuery,
    #[error("unknown ranking model: {0}")]
    UnknownModel(String),
    /// Search was attempted before any corpus was loaded.
    #[error("no corpus loaded")]
    NotLoaded,
}
