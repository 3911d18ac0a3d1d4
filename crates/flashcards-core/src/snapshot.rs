//! Snapshot files: a two-element JSON array `[cards, mistakes]`.
//!
//! Element 0 maps term → definition, element 1 maps term → mistake count.
//! Both are written on export; only the cards are used on import.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cards::CardSet;
use crate::error::{FlashcardError, Result};
use crate::mistakes::MistakeCounts;

/// The persisted state of a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot(pub CardSet, pub MistakeCounts);

impl Snapshot {
    /// Copy the current cards and counters.
    pub fn capture(cards: &CardSet, mistakes: &MistakeCounts) -> Self {
        Self(cards.clone(), mistakes.clone())
    }

    pub fn cards(&self) -> &CardSet {
        &self.0
    }

    pub fn mistakes(&self) -> &MistakeCounts {
        &self.1
    }

    pub fn into_cards(self) -> CardSet {
        self.0
    }

    /// Parse snapshot JSON from raw bytes; invalid UTF-8 is a parse
    /// failure. `path` is only used for error reporting.
    pub fn parse(content: &[u8], path: &Path) -> Result<Self> {
        let snapshot: Snapshot =
            serde_json::from_slice(content).map_err(|e| FlashcardError::MalformedSnapshot {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        if let Some(field) = snapshot.0.find_empty_field() {
            return Err(FlashcardError::MalformedSnapshot {
                path: path.to_path_buf(),
                reason: format!("empty {field}"),
            });
        }
        Ok(snapshot)
    }

    /// Load a snapshot from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read(path).map_err(|e| FlashcardError::io(path, e))?;
        let snapshot = Self::parse(&content, path)?;
        tracing::info!(cards = snapshot.0.len(), path = %path.display(), "snapshot loaded");
        Ok(snapshot)
    }

    /// Save the snapshot as pretty-printed JSON, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| FlashcardError::write(path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)
            .map_err(|e| FlashcardError::write(path, e.into()))?;
        writer
            .write_all(b"\n")
            .map_err(|e| FlashcardError::write(path, e))?;
        writer.flush().map_err(|e| FlashcardError::write(path, e))?;
        tracing::info!(cards = self.0.len(), path = %path.display(), "snapshot saved");
        Ok(())
    }
}
