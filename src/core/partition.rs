use crate::models::{Category, GroupLabel, MatchGroup, Participant};
use rand::seq::index;
use rand::Rng;
use std::collections::HashSet;

/// The two groups matched independently by the sampler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub group_a: MatchGroup,
    pub group_b: MatchGroup,
}

/// Split the population into the newcomer group (A) and the ordinary group (B)
///
/// Newcomers can only be paired with leads, so group A receives every
/// newcomer plus at most one lead per newcomer. When there are more leads than
/// newcomers, a uniform random subset of leads is drawn for group A and the
/// rest join the ordinary members in group B.
pub fn partition<R: Rng + ?Sized>(participants: &[Participant], rng: &mut R) -> Partition {
    let by_category = |category: Category| -> Vec<Participant> {
        participants
            .iter()
            .filter(|p| p.category == category)
            .cloned()
            .collect()
    };

    let ordinary = by_category(Category::Ordinary);
    let newcomers = by_category(Category::Newcomer);
    let leads = by_category(Category::Lead);

    let (group_a, group_b) = if newcomers.is_empty() {
        (Vec::new(), [ordinary, leads].concat())
    } else if leads.len() <= newcomers.len() {
        ([newcomers, leads].concat(), ordinary)
    } else {
        let chosen: HashSet<usize> = index::sample(rng, leads.len(), newcomers.len())
            .into_iter()
            .collect();

        let mut allotted = Vec::with_capacity(chosen.len());
        let mut remaining = Vec::with_capacity(leads.len() - chosen.len());
        for (i, lead) in leads.into_iter().enumerate() {
            if chosen.contains(&i) {
                allotted.push(lead);
            } else {
                remaining.push(lead);
            }
        }

        ([newcomers, allotted].concat(), [ordinary, remaining].concat())
    };

    tracing::debug!(
        "Partitioned population: group A = {}, group B = {}",
        group_a.len(),
        group_b.len()
    );

    Partition {
        group_a: MatchGroup::new(GroupLabel::A, group_a),
        group_b: MatchGroup::new(GroupLabel::B, group_b),
    }
}
