use crate::models::Roster;
use crate::services::store::{PairingStore, StoreError};
use std::sync::Mutex;

/// In-process store, used for dry runs and tests
#[derive(Debug, Default)]
pub struct InMemoryStore {
    roster: Mutex<Roster>,
    saved: Mutex<Vec<(String, String)>>,
}

impl InMemoryStore {
    pub fn new(roster: Roster) -> Self {
        Self {
            roster: Mutex::new(roster),
            saved: Mutex::new(Vec::new()),
        }
    }

    pub fn replace_roster(&self, roster: Roster) -> Result<(), StoreError> {
        let mut guard = self
            .roster
            .lock()
            .map_err(|_| StoreError::ApiError("roster lock poisoned".to_string()))?;
        *guard = roster;
        Ok(())
    }

    /// Pairs written by the last `save_pairings` call
    pub fn saved_pairs(&self) -> Result<Vec<(String, String)>, StoreError> {
        self.saved
            .lock()
            .map(|guard| guard.clone())
            .map_err(|_| StoreError::ApiError("output lock poisoned".to_string()))
    }
}

impl PairingStore for InMemoryStore {
    async fn load_roster(&self) -> Result<Roster, StoreError> {
        self.roster
            .lock()
            .map(|guard| guard.clone())
            .map_err(|_| StoreError::ApiError("roster lock poisoned".to_string()))
    }

    async fn save_pairings(&self, pairs: &[(String, String)]) -> Result<(), StoreError> {
        let mut guard = self
            .saved
            .lock()
            .map_err(|_| StoreError::ApiError("output lock poisoned".to_string()))?;
        *guard = pairs.to_vec();
        Ok(())
    }
}
