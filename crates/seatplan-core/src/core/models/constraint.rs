use super::ids::StudentId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unrecognized {kind} '{value}'")]
pub struct ParseKindError {
    pub kind: &'static str,
    pub value: String,
}

/// Adjacency relation between two distinct students.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstraintKind {
    Ban,
    Prefer,
}

impl FromStr for ConstraintKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ban" => Ok(Self::Ban),
            "prefer" => Ok(Self::Prefer),
            _ => Err(ParseKindError {
                kind: "constraint kind",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintKind::Ban => write!(f, "ban"),
            ConstraintKind::Prefer => write!(f, "prefer"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowPreference {
    #[default]
    None,
    Front,
    Back,
}

impl FromStr for RowPreference {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "front" => Ok(Self::Front),
            "back" => Ok(Self::Back),
            _ => Err(ParseKindError {
                kind: "row preference",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenderMode {
    #[default]
    None,
    Same,
    Different,
}

impl FromStr for GenderMode {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "same" => Ok(Self::Same),
            "different" => Ok(Self::Different),
            _ => Err(ParseKindError {
                kind: "gender mode",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for GenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenderMode::None => write!(f, "none"),
            GenderMode::Same => write!(f, "same"),
            GenderMode::Different => write!(f, "different"),
        }
    }
}

/// Unordered pair of student ids, stored with the smaller id first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StudentPair {
    low: StudentId,
    high: StudentId,
}

impl StudentPair {
    pub fn new(a: StudentId, b: StudentId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    pub fn ids(&self) -> (&StudentId, &StudentId) {
        (&self.low, &self.high)
    }

    pub fn is_self_pair(&self) -> bool {
        self.low == self.high
    }
}

/// Ban/prefer relations keyed by unordered pair. At most one relation per pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintSet {
    entries: BTreeMap<StudentPair, ConstraintKind>,
}

impl ConstraintSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the relation for the pair, returning the previous one.
    pub fn upsert(&mut self, pair: StudentPair, kind: ConstraintKind) -> Option<ConstraintKind> {
        self.entries.insert(pair, kind)
    }

    pub fn remove(&mut self, pair: &StudentPair) -> Option<ConstraintKind> {
        self.entries.remove(pair)
    }

    pub fn between(&self, a: &StudentId, b: &StudentId) -> Option<ConstraintKind> {
        self.entries
            .get(&StudentPair::new(a.clone(), b.clone()))
            .copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StudentPair, ConstraintKind)> {
        self.entries.iter().map(|(pair, kind)| (pair, *kind))
    }

    pub fn count_of(&self, kind: ConstraintKind) -> usize {
        self.entries.values().filter(|k| **k == kind).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl FromIterator<(StudentPair, ConstraintKind)> for ConstraintSet {
    fn from_iter<T: IntoIterator<Item = (StudentPair, ConstraintKind)>>(iter: T) -> Self {
        let mut set = ConstraintSet::new();
        for (pair, kind) in iter {
            set.upsert(pair, kind);
        }
        set
    }
}
