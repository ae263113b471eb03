use std::borrow::Cow::{self, Borrowed, Owned};

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

/// Completion for shell commands, and masking for secret prompts.
struct PromptHelper {
    commands: Vec<&'static str>,
    masking: bool,
}

impl Helper for PromptHelper {}

impl Completer for PromptHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if self.masking || line.contains(' ') {
            return Ok((0, vec![]));
        }
        let candidates = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for PromptHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if self.masking {
            Owned("*".repeat(line.chars().count()))
        } else if self.commands.iter().any(|cmd| line.starts_with(cmd)) {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for PromptHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if self.masking || line.is_empty() || line.contains(' ') {
            return None;
        }
        self.commands
            .iter()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Validator for PromptHelper {}

/// What a prompt produced.
pub enum Input {
    Line(String),
    /// Ctrl-C
    Interrupted,
    /// Ctrl-D or a broken terminal
    Closed,
}

/// A line editor on the controlling terminal.
pub struct Prompter {
    editor: Editor<PromptHelper, DefaultHistory>,
}

impl Prompter {
    pub fn new(commands: Vec<&'static str>) -> Result<Self> {
        let mut editor = Editor::new()?;
        editor.set_helper(Some(PromptHelper {
            commands,
            masking: false,
        }));
        Ok(Self { editor })
    }

    pub async fn line(&mut self, prompt: &str) -> Input {
        self.read(prompt, false)
    }

    /// Reads without echoing the typed characters and without history.
    pub async fn secret(&mut self, prompt: &str) -> Input {
        self.read(prompt, true)
    }

    fn read(&mut self, prompt: &str, masked: bool) -> Input {
        if let Some(helper) = self.editor.helper_mut() {
            helper.masking = masked;
        }
        // Reading blocks this worker thread; let the runtime move other tasks off it.
        let result = tokio::task::block_in_place(|| self.editor.readline(prompt));
        match result {
            Ok(line) => {
                if !masked && !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Input::Line(line)
            }
            Err(ReadlineError::Interrupted) => Input::Interrupted,
            Err(ReadlineError::Eof) => Input::Closed,
            Err(e) => {
                tracing::error!("[Terminal] Failed to read input: {}", e);
                Input::Closed
            }
        }
    }

    /// Asks a yes/no question; anything but "y" or "yes" means no.
    pub async fn confirm(&mut self, question: &str) -> bool {
        match self.line(&format!("{} [y/N] ", question)).await {
            Input::Line(answer) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Input::Interrupted | Input::Closed => false,
        }
    }
}
