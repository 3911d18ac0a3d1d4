//! Per-term mistake counters and the hardest-card query.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Mistake counts keyed by term. Terms never missed are implicitly zero.
///
/// Removing a card does not touch its counter, so stale counts for removed
/// terms may remain until [`MistakeCounts::reset`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MistakeCounts {
    counts: BTreeMap<String, u32>,
}

/// The term(s) sharing the highest non-zero mistake count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hardest {
    /// Tied terms in term order. Never empty.
    pub terms: Vec<String>,
    /// The shared mistake count.
    pub errors: u32,
}

impl MistakeCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one more wrong answer for `term`.
    pub fn increment(&mut self, term: &str) {
        let count = self.counts.entry(term.to_string()).or_insert(0);
        *count = count.saturating_add(1);
    }

    pub fn count(&self, term: &str) -> u32 {
        self.counts.get(term).copied().unwrap_or(0)
    }

    /// Forget every recorded mistake.
    pub fn reset(&mut self) {
        self.counts.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// All terms at the maximum count, or `None` when that maximum is zero.
    pub fn hardest(&self) -> Option<Hardest> {
        let errors = self.counts.values().copied().max().unwrap_or(0);
        if errors == 0 {
            return None;
        }
        let terms = self
            .counts
            .iter()
            .filter(|(_, c)| **c == errors)
            .map(|(t, _)| t.clone())
            .collect();
        Some(Hardest { terms, errors })
    }
}

impl FromIterator<(String, u32)> for MistakeCounts {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Hardest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.terms.as_slice() {
            [term] => write!(
                f,
                "The hardest card is \"{term}\". You have {} errors answering it.",
                self.errors
            ),
            terms => {
                let listed = terms
                    .iter()
                    .map(|t| format!("\"{t}\""))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(
                    f,
                    "The hardest cards are {listed}. You have {} errors answering them.",
                    self.errors
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, u32)]) -> MistakeCounts {
        pairs.iter().map(|(t, c)| (t.to_string(), *c)).collect()
    }

    #[test]
    fn increment_starts_from_zero() {
        let mut m = MistakeCounts::new();
        assert_eq!(m.count("apple"), 0);
        m.increment("apple");
        m.increment("apple");
        assert_eq!(m.count("apple"), 2);
    }

    #[test]
    fn hardest_none_when_empty() {
        assert!(MistakeCounts::new().hardest().is_none());
    }

    #[test]
    fn hardest_none_when_all_zero() {
        assert!(counts(&[("a", 0), ("b", 0)]).hardest().is_none());
    }

    #[test]
    fn hardest_keeps_ties() {
        let hardest = counts(&[("a", 2), ("b", 2), ("c", 1)]).hardest().unwrap();
        assert_eq!(hardest.terms, vec!["a", "b"]);
        assert_eq!(hardest.errors, 2);
        assert_eq!(
            hardest.to_string(),
            r#"The hardest cards are "a", "b". You have 2 errors answering them."#
        );
    }

    #[test]
    fn hardest_single() {
        let hardest = counts(&[("a", 1), ("b", 3)]).hardest().unwrap();
        assert_eq!(
            hardest.to_string(),
            r#"The hardest card is "b". You have 3 errors answering it."#
        );
    }

    #[test]
    fn reset_clears_everything() {
        let mut m = counts(&[("a", 4), ("b", 1)]);
        m.reset();
        assert!(m.is_empty());
        assert!(m.hardest().is_none());
    }
}
