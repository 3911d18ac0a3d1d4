//! Configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::session::SessionConfig;

/// What the session does with a line that is not a menu action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidCommandPolicy {
    /// Report it and show the menu again, up to `max_invalid_commands` in a row.
    #[default]
    Reprompt,
    /// End the session with an error.
    Abort,
}

/// Top-level flashcards configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashcardsConfig {
    /// Snapshot loaded before the first prompt.
    #[serde(default)]
    pub import_from: Option<PathBuf>,
    /// Snapshot written on exit.
    #[serde(default)]
    pub export_to: Option<PathBuf>,
    #[serde(default)]
    pub invalid_command: InvalidCommandPolicy,
    /// Consecutive unknown commands tolerated when re-prompting.
    #[serde(default = "default_max_invalid_commands")]
    pub max_invalid_commands: u32,
    /// Seed for the quiz RNG.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_max_invalid_commands() -> u32 {
    5
}

impl Default for FlashcardsConfig {
    fn default() -> Self {
        Self {
            import_from: None,
            export_to: None,
            invalid_command: InvalidCommandPolicy::default(),
            max_invalid_commands: default_max_invalid_commands(),
            seed: None,
        }
    }
}

impl FlashcardsConfig {
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            import_from: self.import_from.clone(),
            export_to: self.export_to.clone(),
            invalid_command: self.invalid_command,
            max_invalid_commands: self.max_invalid_commands,
            seed: self.seed,
        }
    }
}

/// Load config from an explicit path, or search the well-known paths:
/// 1. `flashcards.toml` in the current directory
/// 2. `~/.config/flashcards/config.toml`
///
/// Environment variable override: `FLASHCARDS_SEED`.
pub fn load_config_from(path: Option<&Path>) -> Result<FlashcardsConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("flashcards.toml");
        if local.exists() {
            Some(local)
        } else {
            config_dir()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => FlashcardsConfig::default(),
    };

    if let Ok(seed) = std::env::var("FLASHCARDS_SEED") {
        config.seed = Some(
            seed.trim()
                .parse()
                .with_context(|| format!("FLASHCARDS_SEED is not a u64: {seed:?}"))?,
        );
    }

    Ok(config)
}

/// Parse a TOML configuration document.
pub fn parse_config(content: &str) -> Result<FlashcardsConfig> {
    let config: FlashcardsConfig = toml::from_str(content)?;
    anyhow::ensure!(
        config.max_invalid_commands >= 1,
        "max_invalid_commands must be at least 1"
    );
    Ok(config)
}

fn config_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("flashcards"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = FlashcardsConfig::default();
        assert_eq!(config.invalid_command, InvalidCommandPolicy::Reprompt);
        assert_eq!(config.max_invalid_commands, 5);
        assert!(config.import_from.is_none());
        assert!(config.seed.is_none());
    }

    #[test]
    fn parse_full_config() {
        let config = parse_config(
            r#"
import_from = "cards.json"
export_to = "out.json"
invalid_command = "abort"
max_invalid_commands = 2
seed = 99
"#,
        )
        .unwrap();
        assert_eq!(config.import_from, Some(PathBuf::from("cards.json")));
        assert_eq!(config.export_to, Some(PathBuf::from("out.json")));
        assert_eq!(config.invalid_command, InvalidCommandPolicy::Abort);
        assert_eq!(config.max_invalid_commands, 2);
        assert_eq!(config.seed, Some(99));
    }

    #[test]
    fn parse_empty_config_uses_defaults() {
        assert_eq!(parse_config("").unwrap(), FlashcardsConfig::default());
    }

    #[test]
    fn parse_rejects_zero_budget() {
        assert!(parse_config("max_invalid_commands = 0").is_err());
    }

    #[test]
    fn parse_rejects_unknown_policy() {
        assert!(parse_config(r#"invalid_command = "ignore""#).is_err());
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = load_config_from(Some(Path::new("no-such-flashcards.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flashcards.toml");
        std::fs::write(&path, "export_to = \"saved.json\"\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.export_to, Some(PathBuf::from("saved.json")));
    }
}
