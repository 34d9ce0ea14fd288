// "Ask the user" capability. The flows in `editor` and `ui` only talk to a
// `Prompter`, so tests drive them with canned answers instead of a terminal.

use std::collections::VecDeque;
use std::io;

use dialoguer::Input;

use crate::error::{GalleryError, Result};

pub trait Prompter {
    /// Ask a free-text question. Answers come back trimmed; blank is allowed.
    fn ask(&mut self, prompt: &str) -> Result<String>;

    /// Show one line of output.
    fn say(&mut self, line: &str);
}

/// Prompts on the real terminal through `dialoguer`.
#[derive(Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        // `allow_empty` lets a bare Enter mean "use the default".
        let answer: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(GalleryError::Terminal)?;
        Ok(answer.trim().to_string())
    }

    fn say(&mut self, line: &str) {
        println!("{}", line);
    }
}

/// Replays a fixed list of answers and records everything shown, prompts
/// included. Running out of answers is an error, like closing stdin.
///
/// Public so callers can drive `ui::main_menu` or the `editor` flows from a
/// script (batch imports, other front ends), not just from the test suite.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    transcript: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedPrompter {
            answers: answers.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// True if any shown line contains `needle`.
    pub fn saw(&self, needle: &str) -> bool {
        self.transcript.iter().any(|line| line.contains(needle))
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        self.transcript.push(format!("? {prompt}"));
        match self.answers.pop_front() {
            Some(answer) => Ok(answer.trim().to_string()),
            None => Err(GalleryError::Terminal(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("no answer left for {prompt:?}"),
            ))),
        }
    }

    fn say(&mut self, line: &str) {
        self.transcript.push(line.to_string());
    }
}
