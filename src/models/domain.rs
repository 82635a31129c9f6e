use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Member category, drives the eligibility rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Ordinary,
    Newcomer,
    Lead,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Ordinary => "ORDINARY",
            Category::Newcomer => "NEWCOMER",
            Category::Lead => "LEAD",
        };
        f.write_str(label)
    }
}

/// A single member of the rotation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub category: Category,
}

impl Participant {
    /// Build a participant from a raw name.
    ///
    /// Returns `None` when the name is blank after trimming, so an
    /// unnamed participant can never exist.
    pub fn new(name: &str, category: Category) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        Some(Self {
            name: name.to_string(),
            category,
        })
    }
}

/// Roster snapshot as read from the tabular store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub ordinary: Vec<String>,
    #[serde(default)]
    pub newcomers: Vec<String>,
    #[serde(default)]
    pub leads: Vec<String>,
    #[serde(rename = "forbiddenPairs", default)]
    pub forbidden_pairs: Vec<(String, String)>,
}

impl Roster {
    pub fn member_count(&self) -> usize {
        self.ordinary.len() + self.newcomers.len() + self.leads.len()
    }
}

/// Symmetric deny-list of giver/receiver pairs
///
/// Every relationship is stored under both orientations, so a single
/// entry `{a, b}` blocks `a -> b` as well as `b -> a`.
#[derive(Debug, Clone, Default)]
pub struct ForbiddenPairs {
    edges: HashMap<String, HashSet<String>>,
    supplied: usize,
}

impl ForbiddenPairs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = &'a (String, String)>,
    {
        let mut forbidden = Self::new();
        for (a, b) in pairs {
            forbidden.insert(a, b);
        }
        forbidden
    }

    pub fn insert(&mut self, a: &str, b: &str) {
        let (a, b) = (a.trim(), b.trim());
        self.edges.entry(a.to_string()).or_default().insert(b.to_string());
        self.edges.entry(b.to_string()).or_default().insert(a.to_string());
        self.supplied += 1;
    }

    /// Whether the directed edge `giver -> receiver` is forbidden
    #[inline]
    pub fn contains(&self, giver: &str, receiver: &str) -> bool {
        self.edges
            .get(giver)
            .map_or(false, |receivers| receivers.contains(receiver))
    }

    /// Number of relationships supplied by the caller
    pub fn len(&self) -> usize {
        self.supplied
    }

    pub fn is_empty(&self) -> bool {
        self.supplied == 0
    }
}

/// Label of a matching group produced by the partitioner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupLabel {
    /// Newcomers plus their allotted leads
    A,
    /// Ordinary members plus any remaining leads
    B,
}

impl fmt::Display for GroupLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupLabel::A => f.write_str("A"),
            GroupLabel::B => f.write_str("B"),
        }
    }
}

/// Sub-population handed to one run of the sampler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchGroup {
    pub label: GroupLabel,
    pub members: Vec<Participant>,
}

impl MatchGroup {
    pub fn new(label: GroupLabel, members: Vec<Participant>) -> Self {
        Self { label, members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// One directed giver -> receiver edge of the rotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: usize,
    pub giver: String,
    #[serde(rename = "giverCategory")]
    pub giver_category: Category,
    pub receiver: String,
    #[serde(rename = "receiverCategory")]
    pub receiver_category: Category,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Participant left out of a rotation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludedParticipant {
    pub name: String,
    pub category: Category,
}

/// Per-group outcome of the sampler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupReport {
    pub group: GroupLabel,
    pub size: usize,
    pub attempts: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairingMetadata {
    #[serde(rename = "totalParticipants")]
    pub total_participants: usize,
    #[serde(rename = "usedParticipants")]
    pub used_participants: usize,
    #[serde(rename = "excludedParticipants")]
    pub excluded_participants: usize,
    pub excluded: Vec<ExcludedParticipant>,
    #[serde(rename = "forbiddenPairCount")]
    pub forbidden_pair_count: usize,
    #[serde(rename = "generatedAt")]
    pub generated_at: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "rulesApplied")]
    pub rules_applied: Vec<String>,
    #[serde(default)]
    pub groups: Vec<GroupReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Final output of a pairing run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairingResult {
    pub assignments: Vec<Assignment>,
    pub metadata: PairingMetadata,
}

impl PairingResult {
    /// `(giver, receiver)` tuples in id order, ready to be written as two columns
    pub fn pairs(&self) -> Vec<(String, String)> {
        self.assignments
            .iter()
            .map(|a| (a.giver.clone(), a.receiver.clone()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}
