use crate::models::{Category, Participant, Roster};

/// Turn the roster's raw name lists into typed participants
///
/// Order is ordinary members, then newcomers, then leads. Blank names are
/// skipped; duplicates are kept as-is.
pub fn register(roster: &Roster) -> Vec<Participant> {
    let sources = [
        (&roster.ordinary, Category::Ordinary),
        (&roster.newcomers, Category::Newcomer),
        (&roster.leads, Category::Lead),
    ];

    let mut participants = Vec::with_capacity(roster.member_count());
    for (names, category) in sources {
        for raw in names {
            match Participant::new(raw, category) {
                Some(participant) => participants.push(participant),
                None => tracing::debug!("Skipping blank {} entry", category),
            }
        }
    }

    participants
}
