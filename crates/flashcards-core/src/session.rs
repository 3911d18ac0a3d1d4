//! The session controller: menu loop and command handlers.
//!
//! A [`Session`] owns the card set, the mistake counters and the transcript
//! for one run. It reads a command per iteration, dispatches it, reports
//! recoverable failures to the user and keeps going until `exit` or the end
//! of input, then runs the shutdown steps (farewell, export if configured).

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::cards::CardSet;
use crate::config::InvalidCommandPolicy;
use crate::error::{FlashcardError, Result};
use crate::mistakes::MistakeCounts;
use crate::quiz::{self, Quiz};
use crate::snapshot::Snapshot;
use crate::traits::{LineSource, OutputSink};
use crate::transcript::Transcript;

pub const MENU_PROMPT: &str =
    "Input the action (add, remove, import, export, ask, exit, log, hardest card, reset stats):";

/// The closed set of menu actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Add,
    Remove,
    Import,
    Export,
    Ask,
    Exit,
    Log,
    HardestCard,
    ResetStats,
}

impl Command {
    pub const ALL: [Command; 9] = [
        Command::Add,
        Command::Remove,
        Command::Import,
        Command::Export,
        Command::Ask,
        Command::Exit,
        Command::Log,
        Command::HardestCard,
        Command::ResetStats,
    ];

    /// The exact token that selects this command.
    pub fn as_str(self) -> &'static str {
        match self {
            Command::Add => "add",
            Command::Remove => "remove",
            Command::Import => "import",
            Command::Export => "export",
            Command::Ask => "ask",
            Command::Exit => "exit",
            Command::Log => "log",
            Command::HardestCard => "hardest card",
            Command::ResetStats => "reset stats",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = FlashcardError;

    fn from_str(s: &str) -> Result<Self> {
        Command::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| FlashcardError::InvalidCommand(s.to_string()))
    }
}

/// Whether the loop keeps running after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Settings fixed for the lifetime of a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Snapshot merged into the card set before the first prompt.
    pub import_from: Option<PathBuf>,
    /// Snapshot written during shutdown.
    pub export_to: Option<PathBuf>,
    pub invalid_command: InvalidCommandPolicy,
    /// Consecutive unknown commands tolerated under [`InvalidCommandPolicy::Reprompt`].
    pub max_invalid_commands: u32,
    /// Seed for card draws; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            import_from: None,
            export_to: None,
            invalid_command: InvalidCommandPolicy::Reprompt,
            max_invalid_commands: 5,
            seed: None,
        }
    }
}

/// One interactive flashcard session.
pub struct Session<I, O> {
    config: SessionConfig,
    cards: CardSet,
    mistakes: MistakeCounts,
    transcript: Transcript,
    quiz: Quiz,
    input: I,
    output: O,
    invalid_streak: u32,
}

impl<I: LineSource, O: OutputSink> Session<I, O> {
    pub fn new(config: SessionConfig, input: I, output: O) -> Self {
        let quiz = match config.seed {
            Some(seed) => Quiz::seeded(seed),
            None => Quiz::from_os_rng(),
        };
        Self {
            config,
            cards: CardSet::new(),
            mistakes: MistakeCounts::new(),
            transcript: Transcript::new(),
            quiz,
            input,
            output,
            invalid_streak: 0,
        }
    }

    /// Start from an existing card set instead of an empty one.
    pub fn with_cards(mut self, cards: CardSet) -> Self {
        self.cards = cards;
        self
    }

    pub fn cards(&self) -> &CardSet {
        &self.cards
    }

    pub fn mistakes(&self) -> &MistakeCounts {
        &self.mistakes
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Run the whole session: startup import, the menu loop, and shutdown.
    ///
    /// Returns `Ok` after `exit` or end of input. Errors are console failures
    /// and, depending on the policy, unknown commands.
    pub fn run(&mut self) -> Result<()> {
        if let Some(path) = self.config.import_from.clone() {
            self.recover(|s| s.import_from(&path))?;
        }

        loop {
            self.say(MENU_PROMPT)?;
            let line = match self.read() {
                Ok(line) => line,
                Err(FlashcardError::InputClosed) => {
                    tracing::warn!("input closed, shutting down");
                    break;
                }
                Err(e) => return Err(e),
            };

            let command = match line.parse::<Command>() {
                Ok(command) => {
                    self.invalid_streak = 0;
                    command
                }
                Err(e) => {
                    self.reject(e)?;
                    continue;
                }
            };

            tracing::debug!(%command, "dispatching");
            match self.execute(command) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(FlashcardError::InputClosed) => {
                    tracing::warn!(%command, "input closed mid-command, shutting down");
                    break;
                }
                Err(e) if e.is_recoverable() => self.report(&e)?,
                Err(e) => return Err(e),
            }
        }

        self.shutdown()
    }

    /// Run a single command. Recoverable failures are returned, not reported.
    pub fn execute(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Add => self.add()?,
            Command::Remove => self.remove()?,
            Command::Import => {
                let path = self.ask_file_name()?;
                self.import_from(&path)?;
            }
            Command::Export => {
                let path = self.ask_file_name()?;
                self.export_to(&path)?;
            }
            Command::Ask => self.ask()?,
            Command::Exit => return Ok(Flow::Exit),
            Command::Log => self.log()?,
            Command::HardestCard => self.hardest_card()?,
            Command::ResetStats => self.reset_stats()?,
        }
        Ok(Flow::Continue)
    }

    fn add(&mut self) -> Result<()> {
        self.say("The card:")?;
        let term = loop {
            let term = self.read()?;
            if term.is_empty() {
                self.say("The card cannot be empty. Try again:")?;
            } else if self.cards.contains_term(&term) {
                self.say(&format!("The card \"{term}\" already exists. Try again:"))?;
            } else {
                break term;
            }
        };

        self.say("The definition of the card:")?;
        let definition = loop {
            let definition = self.read()?;
            if definition.is_empty() {
                self.say("The definition cannot be empty. Try again:")?;
            } else if self.cards.contains_definition(&definition) {
                self.say(&format!(
                    "The definition \"{definition}\" already exists. Try again:"
                ))?;
            } else {
                break definition;
            }
        };

        self.cards.insert(term.as_str(), definition.as_str())?;
        self.say(&format!(
            "The pair (\"{term}\":\"{definition}\") has been added."
        ))
    }

    fn remove(&mut self) -> Result<()> {
        self.say("Which card?")?;
        let term = self.read()?;
        match self.cards.remove(&term) {
            Some(_) => self.say("The card has been removed."),
            None => self.say(&format!("Can't remove \"{term}\": there is no such card.")),
        }
    }

    /// Merge the cards of the snapshot at `path` into the set. Mistake
    /// counts in the snapshot are ignored.
    pub fn import_from(&mut self, path: &Path) -> Result<()> {
        let incoming = Snapshot::load(path)?.into_cards();
        let total = self.cards.merge(incoming);
        self.say(&format!("{total} cards have been loaded."))
    }

    /// Write the cards and mistake counts to `path`.
    pub fn export_to(&mut self, path: &Path) -> Result<()> {
        Snapshot::capture(&self.cards, &self.mistakes).save(path)?;
        let saved = self.cards.len();
        self.say(&format!("{saved} cards have been saved."))
    }

    fn ask(&mut self) -> Result<()> {
        if self.cards.is_empty() {
            return Err(FlashcardError::EmptyCardSet);
        }
        self.say("How many times to ask?")?;
        let rounds = quiz::parse_repeat_count(&self.read()?)?;

        for round in 0..rounds {
            let card = self.quiz.draw(&self.cards)?;
            self.say(&format!("Print the definition of \"{}\":", card.term))?;
            let answer = self.read()?;
            let verdict = quiz::grade(&self.cards, &card, &answer);
            if !verdict.is_correct() {
                self.mistakes.increment(&card.term);
            }
            tracing::debug!(round, term = %card.term, correct = verdict.is_correct(), "quiz round");
            self.say(&verdict.to_string())?;
        }
        Ok(())
    }

    fn log(&mut self) -> Result<()> {
        let path = self.ask_file_name()?;
        self.transcript.save(&path)?;
        self.say("The log has been saved.")
    }

    fn hardest_card(&mut self) -> Result<()> {
        match self.mistakes.hardest() {
            Some(hardest) => self.say(&hardest.to_string()),
            None => self.say("There are no cards with errors."),
        }
    }

    fn reset_stats(&mut self) -> Result<()> {
        self.mistakes.reset();
        self.say("Card statistics have been reset.")
    }

    fn shutdown(&mut self) -> Result<()> {
        self.say("Bye bye!")?;
        if let Some(path) = self.config.export_to.clone() {
            self.recover(|s| s.export_to(&path))?;
        }
        Ok(())
    }

    fn reject(&mut self, err: FlashcardError) -> Result<()> {
        self.invalid_streak += 1;
        let exhausted = match self.config.invalid_command {
            InvalidCommandPolicy::Abort => true,
            InvalidCommandPolicy::Reprompt => {
                self.invalid_streak >= self.config.max_invalid_commands
            }
        };
        if exhausted {
            tracing::warn!(streak = self.invalid_streak, "giving up after invalid command");
            return Err(err);
        }
        self.report(&err)
    }

    /// Run `op`, reporting a recoverable failure instead of returning it.
    fn recover(&mut self, op: impl FnOnce(&mut Self) -> Result<()>) -> Result<()> {
        match op(self) {
            Err(e) if e.is_recoverable() => self.report(&e),
            other => other,
        }
    }

    fn report(&mut self, err: &FlashcardError) -> Result<()> {
        tracing::warn!(error = %err, "command failed");
        self.say(&notice(err))
    }

    fn ask_file_name(&mut self) -> Result<PathBuf> {
        self.say("File name:")?;
        Ok(PathBuf::from(self.read()?))
    }

    fn say(&mut self, line: &str) -> Result<()> {
        self.output.write_line(line).map_err(FlashcardError::Console)
    }

    fn read(&mut self) -> Result<String> {
        let line = self
            .input
            .read_line()
            .map_err(FlashcardError::Console)?
            .ok_or(FlashcardError::InputClosed)?;
        self.transcript.record(line.as_str());
        Ok(line)
    }
}

/// The message shown to the user for a failed command.
pub fn notice(err: &FlashcardError) -> String {
    match err {
        FlashcardError::FileNotFound(_) => "File not found.".to_string(),
        FlashcardError::Io { path, source } => {
            format!("Could not access \"{}\": {source}.", path.display())
        }
        FlashcardError::MalformedSnapshot { path, .. } => {
            format!("The file \"{}\" is not a valid card set.", path.display())
        }
        FlashcardError::InvalidCommand(token) => format!("Unknown action \"{token}\"."),
        FlashcardError::EmptyCardSet => "There are no cards to ask.".to_string(),
        FlashcardError::NonIntegerRepeatCount(input) => {
            format!("Invalid number of times: \"{input}\".")
        }
        FlashcardError::DuplicateTerm(term) => format!("The card \"{term}\" already exists."),
        FlashcardError::DuplicateDefinition(definition) => {
            format!("The definition \"{definition}\" already exists.")
        }
        FlashcardError::EmptyField(field) => format!("The {field} cannot be empty."),
        FlashcardError::InputClosed | FlashcardError::Console(_) => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{CapturedOutput, ScriptedInput};

    fn session(lines: &[&str]) -> (Session<ScriptedInput, CapturedOutput>, CapturedOutput) {
        let output = CapturedOutput::new();
        let config = SessionConfig {
            seed: Some(1),
            ..SessionConfig::default()
        };
        let input = ScriptedInput::new(lines.iter().copied());
        let session = Session::new(config, input, output.clone());
        (session, output)
    }

    #[test]
    fn command_tokens_round_trip() {
        for command in Command::ALL {
            assert_eq!(command.as_str().parse::<Command>().unwrap(), command);
        }
    }

    #[test]
    fn command_tokens_are_exact() {
        for bad in ["Add", " add", "hardest", "reset", "hardest  card", ""] {
            assert!(matches!(
                bad.parse::<Command>(),
                Err(FlashcardError::InvalidCommand(_))
            ));
        }
    }

    #[test]
    fn add_reprompts_on_duplicates() {
        let (mut s, out) = session(&[
            "add", "apple", "a fruit", "add", "apple", "car", "a fruit", "a vehicle", "exit",
        ]);
        s.run().unwrap();
        assert_eq!(s.cards().len(), 2);
        assert_eq!(s.cards().definition("car"), Some("a vehicle"));
        assert!(out.contains(r#"The card "apple" already exists. Try again:"#));
        assert!(out.contains(r#"The definition "a fruit" already exists. Try again:"#));
        assert!(out.contains(r#"The pair ("car":"a vehicle") has been added."#));
    }

    #[test]
    fn add_reprompts_on_empty_input() {
        let (mut s, out) = session(&["add", "", "apple", "", "a fruit", "exit"]);
        s.run().unwrap();
        assert_eq!(s.cards().definition("apple"), Some("a fruit"));
        assert!(out.contains("The card cannot be empty. Try again:"));
        assert!(out.contains("The definition cannot be empty. Try again:"));
    }

    #[test]
    fn remove_reports_missing_card() {
        let (mut s, out) = session(&["remove", "ghost", "exit"]);
        s.run().unwrap();
        assert!(out.contains(r#"Can't remove "ghost": there is no such card."#));
    }

    #[test]
    fn ask_on_empty_set_does_not_read_a_count() {
        let (mut s, out) = session(&["ask", "hardest card", "exit"]);
        s.run().unwrap();
        assert!(out.contains("There are no cards to ask."));
        assert!(out.contains("There are no cards with errors."));
        assert_eq!(s.transcript().lines(), ["ask", "hardest card", "exit"]);
    }

    #[test]
    fn ask_rejects_bad_count() {
        let (mut s, out) = session(&["add", "a", "b", "ask", "lots", "exit"]);
        s.run().unwrap();
        assert!(out.contains(r#"Invalid number of times: "lots"."#));
        assert!(s.mistakes().is_empty());
    }

    #[test]
    fn ask_zero_rounds_asks_nothing() {
        let (mut s, out) = session(&["add", "a", "b", "ask", "0", "exit"]);
        s.run().unwrap();
        assert!(!out.lines().iter().any(|l| l.starts_with("Print the definition")));
    }

    #[test]
    fn unknown_command_reprompts() {
        let (mut s, out) = session(&["fly", "exit"]);
        s.run().unwrap();
        assert!(out.contains(r#"Unknown action "fly"."#));
        assert_eq!(out.last().as_deref(), Some("Bye bye!"));
    }

    #[test]
    fn unknown_commands_exhaust_budget() {
        let output = CapturedOutput::new();
        let config = SessionConfig {
            max_invalid_commands: 2,
            seed: Some(1),
            ..SessionConfig::default()
        };
        let input = ScriptedInput::new(["x", "y", "exit"]);
        let mut s = Session::new(config, input, output.clone());
        let err = s.run().unwrap_err();
        assert!(matches!(err, FlashcardError::InvalidCommand(t) if t == "y"));
        assert!(!output.contains("Bye bye!"));
    }

    #[test]
    fn valid_command_resets_invalid_streak() {
        let output = CapturedOutput::new();
        let config = SessionConfig {
            max_invalid_commands: 2,
            seed: Some(1),
            ..SessionConfig::default()
        };
        let input = ScriptedInput::new(["x", "hardest card", "y", "exit"]);
        let mut s = Session::new(config, input, output.clone());
        s.run().unwrap();
        assert!(output.contains("Bye bye!"));
    }

    #[test]
    fn abort_policy_fails_on_first_unknown_command() {
        let config = SessionConfig {
            invalid_command: InvalidCommandPolicy::Abort,
            seed: Some(1),
            ..SessionConfig::default()
        };
        let input = ScriptedInput::new(["fly", "exit"]);
        let mut s = Session::new(config, input, CapturedOutput::new());
        assert!(matches!(s.run(), Err(FlashcardError::InvalidCommand(_))));
    }

    #[test]
    fn end_of_input_acts_like_exit() {
        let (mut s, out) = session(&["add", "apple"]);
        s.run().unwrap();
        assert!(s.cards().is_empty());
        assert_eq!(out.last().as_deref(), Some("Bye bye!"));
    }

    #[test]
    fn reset_stats_confirms() {
        let (mut s, out) = session(&["reset stats", "exit"]);
        s.run().unwrap();
        assert!(out.contains("Card statistics have been reset."));
    }

    #[test]
    fn notices_for_recoverable_errors() {
        assert_eq!(
            notice(&FlashcardError::FileNotFound("x.json".into())),
            "File not found."
        );
        assert_eq!(
            notice(&FlashcardError::MalformedSnapshot {
                path: "x.json".into(),
                reason: "eof".into()
            }),
            r#"The file "x.json" is not a valid card set."#
        );
        assert_eq!(
            notice(&FlashcardError::write(
                "gone/x.json",
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory")
            )),
            r#"Could not access "gone/x.json": no such directory."#
        );
    }
}
