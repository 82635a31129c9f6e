//! Gift Rotation - constrained giver/receiver pairing service
//!
//! This library provides the pairing engine that assigns every roster member
//! exactly one person to give to, honouring category rules and a deny-list,
//! plus the spreadsheet collaborator and HTTP surface around it.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Matcher, PairingError};
pub use crate::models::{Assignment, Category, PairingResult, Participant, Roster};
pub use crate::services::{InMemoryStore, PairingService, PairingStore, SheetsClient};

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_library_exports() {
        let roster = Roster {
            ordinary: vec!["A".to_string(), "B".to_string(), "C".to_string()],
            ..Roster::default()
        };
        let result = Matcher::default()
            .generate(&roster, &mut ChaCha8Rng::seed_from_u64(1))
            .unwrap();
        assert_eq!(result.assignments.len(), 3);
    }
}
