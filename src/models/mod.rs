// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Assignment, Category, ExcludedParticipant, ForbiddenPairs, GroupLabel, GroupReport,
    MatchGroup, PairingMetadata, PairingResult, Participant, Roster,
};
pub use requests::GeneratePairingsRequest;
pub use responses::{ErrorResponse, GeneratePairingsResponse, HealthResponse, RosterResponse};
