use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Free-form interest tags in insertion order.
///
/// Uniqueness is enforced only by [`Interests::add`]; a list coming from the
/// API is kept as-is, duplicates included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, From, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Interests(Vec<String>);

impl Interests {
    /// An empty set.
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends the trimmed candidate unless it is empty or already present
    /// (exact, case-sensitive). Returns whether the set changed.
    pub fn add(&mut self, candidate: &str) -> bool {
        let trimmed = candidate.trim();
        if trimmed.is_empty() || self.contains_exact(trimmed) {
            return false;
        }
        self.0.push(trimmed.to_owned());
        true
    }

    /// Drops every entry equal to `value`. Returns whether anything was removed.
    pub fn remove(&mut self, value: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|interest| interest != value);
        self.0.len() != before
    }

    /// Case-sensitive membership, no trimming.
    pub fn contains_exact(&self, value: &str) -> bool {
        self.0.iter().any(|interest| interest == value)
    }
}

impl<S: Into<String>> FromIterator<S> for Interests {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
