use crate::models::Roster;
use std::future::Future;
use thiserror::Error;

/// Errors that can occur when reading or writing the tabular store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Unauthorized: invalid or expired access token")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// I/O boundary of the pairing service
///
/// The engine itself never talks to storage; the service loads a roster
/// through this trait, runs the engine on plain data, then hands the
/// `(giver, receiver)` list back for persistence.
pub trait PairingStore: Send + Sync {
    /// Fetch the three category lists and the forbidden pairs
    fn load_roster(&self) -> impl Future<Output = Result<Roster, StoreError>> + Send;

    /// Write the pairs, in order, as two parallel columns
    fn save_pairings(
        &self,
        pairs: &[(String, String)],
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}
