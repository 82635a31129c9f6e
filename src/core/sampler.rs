use crate::core::error::PairingError;
use crate::core::rules::rejection;
use crate::models::{ForbiddenPairs, MatchGroup, Participant};
use rand::seq::SliceRandom;
use rand::Rng;

/// Default attempt budget per group
pub const DEFAULT_MAX_ATTEMPTS: usize = 100;

/// Directed edges drawn for one group, with the number of shuffles it took
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleDraw {
    pub edges: Vec<(Participant, Participant)>,
    pub attempts: usize,
}

/// Bounded rejection sampler over single-cycle arrangements
///
/// Each attempt shuffles the group and links every member to the next one,
/// wrapping around at the end. An attempt is discarded as soon as one edge
/// breaks an eligibility rule. This is a heuristic: an adversarial deny-list
/// can exhaust the budget even though a valid arrangement exists.
#[derive(Debug, Clone, Copy)]
pub struct RejectionSampler {
    max_attempts: usize,
}

impl RejectionSampler {
    pub fn new(max_attempts: usize) -> Result<Self, PairingError> {
        if max_attempts == 0 {
            return Err(PairingError::InvalidConfiguration(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(Self { max_attempts })
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Draw a giver -> receiver cycle covering the whole group
    pub fn draw<R: Rng + ?Sized>(
        &self,
        group: &MatchGroup,
        forbidden: &ForbiddenPairs,
        rng: &mut R,
    ) -> Result<CycleDraw, PairingError> {
        match group.members.as_slice() {
            [] => {
                return Ok(CycleDraw {
                    edges: Vec::new(),
                    attempts: 0,
                })
            }
            [only] => {
                return Err(PairingError::InsufficientPopulation {
                    name: only.name.clone(),
                })
            }
            _ => {}
        }

        let n = group.len();
        let mut order: Vec<&Participant> = group.members.iter().collect();

        for attempt in 1..=self.max_attempts {
            order.shuffle(rng);

            let broken = (0..n).find_map(|i| {
                let (giver, receiver) = (order[i], order[(i + 1) % n]);
                rejection(giver, receiver, forbidden).map(|reason| (i, reason))
            });

            match broken {
                Some((position, reason)) => {
                    tracing::trace!(
                        "Group {} attempt {} rejected at edge {}: {:?}",
                        group.label,
                        attempt,
                        position,
                        reason
                    );
                }
                None => {
                    tracing::debug!(
                        "Group {} ({} members) solved after {} attempt(s)",
                        group.label,
                        n,
                        attempt
                    );

                    let edges = (0..n)
                        .map(|i| (order[i].clone(), order[(i + 1) % n].clone()))
                        .collect();
                    return Ok(CycleDraw { edges, attempts: attempt });
                }
            }
        }

        tracing::warn!(
            "Group {} ({} members) unsolved after {} attempts",
            group.label,
            n,
            self.max_attempts
        );

        Err(PairingError::GroupUnsolvable {
            size: n,
            attempts: self.max_attempts,
        })
    }
}

impl Default for RejectionSampler {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rules::is_eligible;
    use crate::models::{Category, GroupLabel};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    fn group(members: &[(&str, Category)]) -> MatchGroup {
        MatchGroup::new(
            GroupLabel::B,
            members
                .iter()
                .map(|(name, category)| Participant::new(name, *category).unwrap())
                .collect(),
        )
    }

    fn ordinary(names: &[&str]) -> MatchGroup {
        group(&names.iter().map(|n| (*n, Category::Ordinary)).collect::<Vec<_>>())
    }

    #[test]
    fn test_zero_attempts_rejected() {
        assert!(matches!(
            RejectionSampler::new(0),
            Err(PairingError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_empty_group_is_skipped() {
        let sampler = RejectionSampler::default();
        let draw = sampler
            .draw(&ordinary(&[]), &ForbiddenPairs::new(), &mut ChaCha8Rng::seed_from_u64(0))
            .unwrap();

        assert!(draw.edges.is_empty());
        assert_eq!(draw.attempts, 0);
    }

    #[test]
    fn test_single_member_group_fails() {
        let sampler = RejectionSampler::default();
        let err = sampler
            .draw(&ordinary(&["Solo"]), &ForbiddenPairs::new(), &mut ChaCha8Rng::seed_from_u64(0))
            .unwrap_err();

        assert_eq!(
            err,
            PairingError::InsufficientPopulation {
                name: "Solo".to_string()
            }
        );
    }

    #[test]
    fn test_draw_forms_single_cycle() {
        let sampler = RejectionSampler::default();
        let members = ordinary(&["A", "B", "C", "D", "E"]);
        let draw = sampler
            .draw(&members, &ForbiddenPairs::new(), &mut ChaCha8Rng::seed_from_u64(3))
            .unwrap();

        assert_eq!(draw.edges.len(), 5);
        assert_eq!(draw.attempts, 1);

        let givers: HashSet<&str> = draw.edges.iter().map(|(g, _)| g.name.as_str()).collect();
        let receivers: HashSet<&str> = draw.edges.iter().map(|(_, r)| r.name.as_str()).collect();
        assert_eq!(givers.len(), 5);
        assert_eq!(receivers.len(), 5);

        // Following receivers from any giver visits everyone before returning
        let mut current = draw.edges[0].0.name.clone();
        for _ in 0..5 {
            current = draw
                .edges
                .iter()
                .find(|(g, _)| g.name == current)
                .map(|(_, r)| r.name.clone())
                .unwrap();
        }
        assert_eq!(current, draw.edges[0].0.name);
    }

    #[test]
    fn test_forbidden_edges_are_avoided() {
        let sampler = RejectionSampler::default();
        let members = ordinary(&["A", "B", "C", "D", "E", "F"]);
        let forbidden = ForbiddenPairs::from_pairs(&[
            ("A".to_string(), "B".to_string()),
            ("C".to_string(), "D".to_string()),
        ]);

        for seed in 0..50 {
            let draw = sampler
                .draw(&members, &forbidden, &mut ChaCha8Rng::seed_from_u64(seed))
                .unwrap();
            for (giver, receiver) in &draw.edges {
                assert!(is_eligible(giver, receiver, &forbidden));
            }
        }
    }

    #[test]
    fn test_newcomers_alternate_with_leads() {
        let sampler = RejectionSampler::default();
        let members = group(&[
            ("N1", Category::Newcomer),
            ("N2", Category::Newcomer),
            ("L1", Category::Lead),
            ("L2", Category::Lead),
        ]);

        let draw = sampler
            .draw(&members, &ForbiddenPairs::new(), &mut ChaCha8Rng::seed_from_u64(11))
            .unwrap();

        for (giver, receiver) in &draw.edges {
            assert!(giver.category == Category::Lead || receiver.category == Category::Lead);
        }
    }

    #[test]
    fn test_unsolvable_group_exhausts_budget() {
        let sampler = RejectionSampler::new(25).unwrap();
        // Every 3-cycle links all three members, so A-B is always adjacent
        let members = ordinary(&["A", "B", "C"]);
        let forbidden = ForbiddenPairs::from_pairs(&[("A".to_string(), "B".to_string())]);

        let err = sampler
            .draw(&members, &forbidden, &mut ChaCha8Rng::seed_from_u64(5))
            .unwrap_err();

        assert_eq!(err, PairingError::GroupUnsolvable { size: 3, attempts: 25 });
    }

    #[test]
    fn test_same_seed_same_cycle() {
        let sampler = RejectionSampler::default();
        let members = ordinary(&["A", "B", "C", "D", "E", "F", "G"]);

        let first = sampler
            .draw(&members, &ForbiddenPairs::new(), &mut ChaCha8Rng::seed_from_u64(42))
            .unwrap();
        let second = sampler
            .draw(&members, &ForbiddenPairs::new(), &mut ChaCha8Rng::seed_from_u64(42))
            .unwrap();

        assert_eq!(first, second);
    }
}
