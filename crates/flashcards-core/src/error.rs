//! Error types for flashcards-core.
//!
//! Every operation of a session reports failures through [`FlashcardError`].
//! Most variants are recovered by the session loop and shown to the user;
//! the rest end the session.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using [`FlashcardError`].
pub type Result<T> = std::result::Result<T, FlashcardError>;

/// Errors that can occur while running a flashcard session.
#[derive(Debug, Error)]
pub enum FlashcardError {
    /// A snapshot path does not exist.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Reading or writing a file failed for a reason other than absence.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file exists but is not a `[cards, mistakes]` snapshot.
    #[error("malformed snapshot {}: {reason}", path.display())]
    MalformedSnapshot { path: PathBuf, reason: String },

    /// The input line is not one of the menu actions.
    #[error("invalid command: {0:?}")]
    InvalidCommand(String),

    /// The card set has no cards to draw from.
    #[error("the card set is empty")]
    EmptyCardSet,

    /// `ask` was given something other than a non-negative integer.
    #[error("invalid repeat count: {0:?}")]
    NonIntegerRepeatCount(String),

    /// The term is already present in the card set.
    #[error("duplicate term: {0:?}")]
    DuplicateTerm(String),

    /// Another term already uses this definition.
    #[error("duplicate definition: {0:?}")]
    DuplicateDefinition(String),

    /// Terms and definitions must not be empty.
    #[error("empty {0}")]
    EmptyField(&'static str),

    /// The input source reached end of file.
    #[error("input closed")]
    InputClosed,

    /// Reading from or writing to the console failed.
    #[error("console error: {0}")]
    Console(#[source] io::Error),
}

impl FlashcardError {
    /// Wrap an I/O error raised while touching `path`, folding `NotFound`
    /// into [`FlashcardError::FileNotFound`].
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            FlashcardError::FileNotFound(path)
        } else {
            FlashcardError::Io { path, source }
        }
    }

    /// Wrap an I/O error raised while writing `path`. A missing parent
    /// directory is reported as an I/O failure, not as a missing file.
    pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        FlashcardError::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if a command failing with this error leaves the
    /// session able to continue.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            FlashcardError::InputClosed
                | FlashcardError::Console(_)
                | FlashcardError::InvalidCommand(_)
        )
    }
}
