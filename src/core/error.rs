use thiserror::Error;

/// Fatal outcomes of a pairing run
///
/// An empty roster is not an error; it produces an empty result with
/// `metadata.error` set instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PairingError {
    #[error("cannot form a pair from a single participant ({name})")]
    InsufficientPopulation { name: String },

    #[error("no valid arrangement found for group of {size} participants after {attempts} attempts")]
    GroupUnsolvable { size: usize, attempts: usize },

    #[error("reciprocal assignment detected: {giver} and {receiver} give to each other")]
    ReciprocityViolation { giver: String, receiver: String },

    #[error("invalid pairing configuration: {0}")]
    InvalidConfiguration(String),
}

impl PairingError {
    /// Whether retrying with fresh randomness or relaxed constraints could help
    pub fn is_retryable(&self) -> bool {
        matches!(self, PairingError::GroupUnsolvable { .. })
    }
}
