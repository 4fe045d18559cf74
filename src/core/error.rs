use thiserror::Error;

/// Errors raised by the matching core
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    #[error("Malformed opportunity at index {index}: {reason}")]
    MalformedOpportunity { index: usize, reason: String },

    #[error("Invalid {model} weights: {reason}")]
    InvalidWeights { model: &'static str, reason: String },
}
