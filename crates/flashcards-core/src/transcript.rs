//! Append-only record of every line the user typed.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{FlashcardError, Result};

#[derive(Debug, Clone, Default)]
pub struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Write every recorded line to `path`, one per line, replacing the file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| FlashcardError::write(path, e))?;
        let mut writer = BufWriter::new(file);
        for line in &self.lines {
            writeln!(writer, "{line}").map_err(|e| FlashcardError::write(path, e))?;
        }
        writer.flush().map_err(|e| FlashcardError::write(path, e))?;
        tracing::info!(lines = self.lines.len(), path = %path.display(), "transcript saved");
        Ok(())
    }
}
