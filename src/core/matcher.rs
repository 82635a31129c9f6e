use crate::core::{
    error::PairingError,
    partition::partition,
    registry::register,
    rules::RULES_APPLIED,
    sampler::RejectionSampler,
    validator::ensure_no_reciprocal_pairs,
};
use crate::models::{
    Assignment, ForbiddenPairs, GroupReport, PairingMetadata, PairingResult, Roster,
};
use chrono::{DateTime, Utc};
use rand::Rng;

/// Message attached to the result when the roster holds nobody
pub const EMPTY_ROSTER_MESSAGE: &str = "No participants found in the roster";

/// Main pairing orchestrator
///
/// # Pipeline Stages
/// 1. Register roster names as typed participants
/// 2. Partition into the newcomer group (A) and the ordinary group (B)
/// 3. Rejection-sample a cycle for each group
/// 4. Concatenate and renumber the assignments
/// 5. Reject reciprocal pairs across the whole result
#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher {
    sampler: RejectionSampler,
}

impl Matcher {
    pub fn new(max_attempts: usize) -> Result<Self, PairingError> {
        Ok(Self {
            sampler: RejectionSampler::new(max_attempts)?,
        })
    }

    pub fn with_default_attempts() -> Self {
        Self {
            sampler: RejectionSampler::default(),
        }
    }

    pub fn max_attempts(&self) -> usize {
        self.sampler.max_attempts()
    }

    /// Generate a full rotation for the roster
    ///
    /// # Arguments
    /// * `roster` - Category lists and forbidden pairs
    /// * `rng` - Randomness for lead selection and shuffling
    ///
    /// # Returns
    /// The renumbered assignments with run metadata. An empty roster yields an
    /// empty result with `metadata.error` set rather than an error.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        roster: &Roster,
        rng: &mut R,
    ) -> Result<PairingResult, PairingError> {
        let generated_at = Utc::now();
        let participants = register(roster);
        let forbidden = ForbiddenPairs::from_pairs(&roster.forbidden_pairs);

        match participants.as_slice() {
            [] => {
                tracing::info!("Roster is empty, nothing to pair");
                return Ok(empty_result(forbidden.len(), generated_at));
            }
            [only] => {
                return Err(PairingError::InsufficientPopulation {
                    name: only.name.clone(),
                })
            }
            _ => {}
        }

        let total_participants = participants.len();
        let split = partition(&participants, rng);

        let mut groups = Vec::with_capacity(2);
        let mut edges = Vec::with_capacity(total_participants);
        for group in [&split.group_a, &split.group_b] {
            let draw = self.sampler.draw(group, &forbidden, rng)?;
            groups.push(GroupReport {
                group: group.label,
                size: group.len(),
                attempts: draw.attempts,
            });
            edges.extend(draw.edges);
        }

        let assignments: Vec<Assignment> = edges
            .into_iter()
            .enumerate()
            .map(|(i, (giver, receiver))| Assignment {
                id: i + 1,
                giver: giver.name,
                giver_category: giver.category,
                receiver: receiver.name,
                receiver_category: receiver.category,
                created_at: generated_at,
            })
            .collect();

        ensure_no_reciprocal_pairs(&assignments)?;

        tracing::info!(
            "Generated {} assignments for {} participants ({} forbidden pairs)",
            assignments.len(),
            total_participants,
            forbidden.len()
        );

        Ok(PairingResult {
            assignments,
            metadata: PairingMetadata {
                total_participants,
                used_participants: total_participants,
                excluded_participants: 0,
                excluded: Vec::new(),
                forbidden_pair_count: forbidden.len(),
                generated_at,
                rules_applied: rules_applied(),
                groups,
                error: None,
            },
        })
    }
}

fn rules_applied() -> Vec<String> {
    RULES_APPLIED.iter().map(|rule| rule.to_string()).collect()
}

fn empty_result(forbidden_pair_count: usize, generated_at: DateTime<Utc>) -> PairingResult {
    PairingResult {
        assignments: Vec::new(),
        metadata: PairingMetadata {
            total_participants: 0,
            used_participants: 0,
            excluded_participants: 0,
            excluded: Vec::new(),
            forbidden_pair_count,
            generated_at,
            rules_applied: rules_applied(),
            groups: Vec::new(),
            error: Some(EMPTY_ROSTER_MESSAGE.to_string()),
        },
    }
}
