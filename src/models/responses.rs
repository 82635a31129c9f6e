use serde::{Deserialize, Serialize};
use crate::models::domain::{Assignment, PairingMetadata};

/// Response for the generate endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratePairingsResponse {
    #[serde(rename = "runId")]
    pub run_id: String,
    pub seed: u64,
    pub persisted: bool,
    pub assignments: Vec<Assignment>,
    pub metadata: PairingMetadata,
}

/// Roster as currently stored in the sheet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterResponse {
    pub ordinary: Vec<String>,
    pub newcomers: Vec<String>,
    pub leads: Vec<String>,
    #[serde(rename = "forbiddenPairs")]
    pub forbidden_pairs: Vec<(String, String)>,
    #[serde(rename = "totalParticipants")]
    pub total_participants: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}
