use thiserror::Error;

/// Errors returned by the searchers.
///
/// Failures raised by the rules engine or evaluator pass through unchanged as
/// [`SearchError::Rules`]; the search performs no recovery.
#[derive(Debug, Error)]
pub enum SearchError<E: std::error::Error + 'static> {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Rules(#[from] E),
}
