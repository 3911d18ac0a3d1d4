//! Quiz engine: random card draws and answer grading.

use std::fmt;

use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};

use crate::cards::{Card, CardSet};
use crate::error::{FlashcardError, Result};

/// Draws cards uniformly at random. Every draw is independent, so the same
/// card may come up several times in one `ask`.
pub struct Quiz<R = StdRng> {
    rng: R,
}

impl Quiz<StdRng> {
    /// A quiz seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// A reproducible quiz.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Quiz<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Pick one card from `cards`.
    pub fn draw(&mut self, cards: &CardSet) -> Result<Card> {
        let term = cards
            .terms()
            .choose(&mut self.rng)
            .ok_or(FlashcardError::EmptyCardSet)?;
        cards.card(term).ok_or(FlashcardError::EmptyCardSet)
    }
}

/// The outcome of one quiz round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    /// The answer matches no definition in the set.
    Wrong { expected: String },
    /// The answer is the definition of `owner`, a different card.
    Misplaced { expected: String, owner: String },
}

impl Verdict {
    pub fn is_correct(&self) -> bool {
        matches!(self, Verdict::Correct)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Correct => write!(f, "Correct!"),
            Verdict::Wrong { expected } => write!(f, "Wrong. The right answer is \"{expected}\"."),
            Verdict::Misplaced { expected, owner } => write!(
                f,
                "Wrong. The right answer is \"{expected}\", but your definition is correct for \"{owner}\"."
            ),
        }
    }
}

/// Grade `answer` for `card`. Answers are compared exactly.
pub fn grade(cards: &CardSet, card: &Card, answer: &str) -> Verdict {
    if answer == card.definition {
        return Verdict::Correct;
    }
    let expected = card.definition.clone();
    match cards.term_for(answer) {
        Some(owner) if owner != card.term => Verdict::Misplaced {
            expected,
            owner: owner.to_string(),
        },
        _ => Verdict::Wrong { expected },
    }
}

/// Parse the `ask` repetition count.
pub fn parse_repeat_count(input: &str) -> Result<u32> {
    input
        .trim()
        .parse()
        .map_err(|_| FlashcardError::NonIntegerRepeatCount(input.to_string()))
}
