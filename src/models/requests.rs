use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to generate a new rotation
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct GeneratePairingsRequest {
    /// Seed for the shuffle source; a fresh entropy seed is drawn when absent
    #[serde(default)]
    pub seed: Option<u64>,
    #[validate(range(min = 1, max = 10000))]
    #[serde(alias = "max_attempts", rename = "maxAttempts", default)]
    pub max_attempts: Option<usize>,
    /// Compute the rotation without writing it back to the sheet
    #[serde(alias = "dry_run", rename = "dryRun", default)]
    pub dry_run: bool,
}
