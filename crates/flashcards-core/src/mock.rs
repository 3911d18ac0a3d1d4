//! Scripted console for testing sessions without a terminal.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::io;
use std::rc::Rc;

use crate::traits::{LineSource, OutputSink};

/// Collects every message written by a session.
///
/// Clones share the same buffer, so a test can keep a handle while the
/// session owns another.
#[derive(Debug, Clone, Default)]
pub struct CapturedOutput {
    lines: Rc<RefCell<Vec<String>>>,
}

impl CapturedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every line written so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.lines.borrow().last().cloned()
    }

    /// Returns `true` if any written line equals `line`.
    pub fn contains(&self, line: &str) -> bool {
        self.lines.borrow().iter().any(|l| l == line)
    }
}

impl OutputSink for CapturedOutput {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.lines.borrow_mut().push(line.to_string());
        Ok(())
    }
}

/// Replays a fixed list of input lines, then reports end of input.
///
/// With [`ScriptedInput::answering`], quiz prompts are answered from a
/// term → answer key instead of the script, which keeps tests independent
/// of which term the quiz happens to draw.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    script: VecDeque<String>,
    answers: HashMap<String, String>,
    output: Option<CapturedOutput>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            script: lines.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Answer `Print the definition of "T":` prompts seen on `output`
    /// with `answers[T]`.
    pub fn answering<A, K, V>(mut self, output: &CapturedOutput, answers: A) -> Self
    where
        A: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.answers = answers
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.output = Some(output.clone());
        self
    }

    fn keyed_answer(&self) -> Option<String> {
        let last = self.output.as_ref()?.last()?;
        let term = last
            .strip_prefix("Print the definition of \"")?
            .strip_suffix("\":")?;
        self.answers.get(term).cloned()
    }
}

impl LineSource for ScriptedInput {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        match self.keyed_answer() {
            Some(answer) => Ok(Some(answer)),
            None => Ok(self.script.pop_front()),
        }
    }
}
