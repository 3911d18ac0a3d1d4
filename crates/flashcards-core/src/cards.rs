//! The card store: a term → definition mapping with unique definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{FlashcardError, Result};

/// A single flashcard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// The prompt side.
    pub term: String,
    /// The answer side.
    pub definition: String,
}

/// The set of cards held by a session.
///
/// Terms are unique because they are the map keys. [`CardSet::insert`]
/// additionally refuses a definition that another term already uses;
/// [`CardSet::merge`] does not re-check it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardSet {
    cards: BTreeMap<String, String>,
}

impl CardSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.cards.contains_key(term)
    }

    pub fn contains_definition(&self, definition: &str) -> bool {
        self.cards.values().any(|d| d == definition)
    }

    /// The definition stored for `term`.
    pub fn definition(&self, term: &str) -> Option<&str> {
        self.cards.get(term).map(String::as_str)
    }

    /// The first term (in term order) whose definition is `definition`.
    pub fn term_for(&self, definition: &str) -> Option<&str> {
        self.cards
            .iter()
            .find(|(_, d)| d.as_str() == definition)
            .map(|(t, _)| t.as_str())
    }

    /// Insert a new card, enforcing non-empty fields and both uniqueness rules.
    pub fn insert(&mut self, term: impl Into<String>, definition: impl Into<String>) -> Result<()> {
        let term = term.into();
        let definition = definition.into();
        if term.is_empty() {
            return Err(FlashcardError::EmptyField("term"));
        }
        if definition.is_empty() {
            return Err(FlashcardError::EmptyField("definition"));
        }
        if self.contains_term(&term) {
            return Err(FlashcardError::DuplicateTerm(term));
        }
        if self.contains_definition(&definition) {
            return Err(FlashcardError::DuplicateDefinition(definition));
        }
        self.cards.insert(term, definition);
        Ok(())
    }

    /// Remove a card, returning its definition if it was present.
    pub fn remove(&mut self, term: &str) -> Option<String> {
        self.cards.remove(term)
    }

    /// Overlay `other` onto this set. Matching terms take the incoming
    /// definition. Returns the number of cards held afterwards.
    pub fn merge(&mut self, other: CardSet) -> usize {
        self.cards.extend(other.cards);
        self.cards.len()
    }

    /// Terms in sorted order.
    pub fn terms(&self) -> impl ExactSizeIterator<Item = &str> {
        self.cards.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cards.iter().map(|(t, d)| (t.as_str(), d.as_str()))
    }

    /// The card stored for `term`, cloned out of the set.
    pub fn card(&self, term: &str) -> Option<Card> {
        self.cards.get_key_value(term).map(|(t, d)| Card {
            term: t.clone(),
            definition: d.clone(),
        })
    }

    /// Returns the first empty term or definition, if any.
    pub(crate) fn find_empty_field(&self) -> Option<&'static str> {
        self.cards.iter().find_map(|(t, d)| {
            if t.is_empty() {
                Some("term")
            } else if d.is_empty() {
                Some("definition")
            } else {
                None
            }
        })
    }
}

impl<T: Into<String>, D: Into<String>> FromIterator<(T, D)> for CardSet {
    /// Collects pairs with last-write-wins semantics, like [`CardSet::merge`].
    fn from_iter<I: IntoIterator<Item = (T, D)>>(iter: I) -> Self {
        Self {
            cards: iter
                .into_iter()
                .map(|(t, d)| (t.into(), d.into()))
                .collect(),
        }
    }
}
