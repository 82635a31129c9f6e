use crate::models::{Category, ForbiddenPairs, Participant};

/// Human readable rule list reported with every result
pub const RULES_APPLIED: [&str; 5] = [
    "Nobody is assigned to themselves",
    "Forbidden pairs are blocked in both directions",
    "Newcomers are never paired with ordinary members",
    "Newcomers are never paired with other newcomers",
    "No two participants give to each other",
];

/// Reason a candidate giver -> receiver edge was turned down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    SelfPair,
    Forbidden,
    NewcomerWithOrdinary,
    NewcomerWithNewcomer,
}

/// Evaluate the eligibility rules for a directed pair
///
/// Rules are checked in order and the first failing one is returned.
/// Lead -> lead edges are legal.
#[inline]
pub fn rejection(
    giver: &Participant,
    receiver: &Participant,
    forbidden: &ForbiddenPairs,
) -> Option<Rejection> {
    if giver.name == receiver.name {
        return Some(Rejection::SelfPair);
    }

    if forbidden.contains(&giver.name, &receiver.name) {
        return Some(Rejection::Forbidden);
    }

    match (giver.category, receiver.category) {
        (Category::Newcomer, Category::Ordinary) | (Category::Ordinary, Category::Newcomer) => {
            Some(Rejection::NewcomerWithOrdinary)
        }
        (Category::Newcomer, Category::Newcomer) => Some(Rejection::NewcomerWithNewcomer),
        _ => None,
    }
}

#[inline]
pub fn is_eligible(giver: &Participant, receiver: &Participant, forbidden: &ForbiddenPairs) -> bool {
    rejection(giver, receiver, forbidden).is_none()
}
