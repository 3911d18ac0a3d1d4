//! flashcards-core — card store, mistake tracking, quiz engine and session loop.
//!
//! A [`session::Session`] reads commands from a [`traits::LineSource`] and
//! answers on a [`traits::OutputSink`]; everything it mutates lives in the
//! session itself.

pub mod cards;
pub mod config;
pub mod console;
pub mod error;
pub mod mistakes;
pub mod mock;
pub mod quiz;
pub mod session;
pub mod snapshot;
pub mod traits;
pub mod transcript;

pub use error::{FlashcardError, Result};
