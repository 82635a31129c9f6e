use crate::core::error::PairingError;
use crate::models::Assignment;
use std::collections::HashSet;

/// Reject any pair of assignments where two people give to each other
///
/// Runs over the combined list of both groups. The cycle construction cannot
/// produce a reciprocal pair for groups larger than two, so a failure here
/// outside of a two-member group points at an engine defect.
pub fn ensure_no_reciprocal_pairs(assignments: &[Assignment]) -> Result<(), PairingError> {
    let mut seen: HashSet<(&str, &str)> = HashSet::with_capacity(assignments.len());

    for assignment in assignments {
        let edge = (assignment.giver.as_str(), assignment.receiver.as_str());
        if seen.contains(&(edge.1, edge.0)) {
            return Err(PairingError::ReciprocityViolation {
                giver: assignment.giver.clone(),
                receiver: assignment.receiver.clone(),
            });
        }
        seen.insert(edge);
    }

    Ok(())
}
