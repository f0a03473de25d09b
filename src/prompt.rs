//! Confirmation prompts shown to the user.
//!
//! The engine only ever *requests* a confirmation (see
//! [`Step::Confirm`](crate::services::Step)); a [`PromptService`] is what
//! actually asks. The CLI uses [`TerminalPrompt`], or [`AssumeYes`] when
//! run with `--yes`.

use std::io::{BufRead, Write};

/// User's reply to a yes/no prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    /// Prompt closed without a choice. Treated as [`Answer::No`].
    Dismissed,
}

impl Answer {
    pub fn is_yes(&self) -> bool {
        matches!(self, Answer::Yes)
    }
}

/// Asks the user to confirm or acknowledge.
pub trait PromptService {
    /// Ask a yes/no question.
    fn ask_yes_no(&mut self, message: &str) -> Answer;

    /// Show a notice that only needs acknowledging.
    fn acknowledge(&mut self, message: &str);
}

/// Prompts on a terminal.
///
/// Questions go to the writer, replies are read line by line. End of input
/// counts as dismissing the prompt.
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompt<std::io::StdinLock<'static>, std::io::Stderr> {
    /// Prompt on stdin/stderr, keeping stdout free for command output.
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stderr())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_lowercase()),
        }
    }
}

impl<R: BufRead, W: Write> PromptService for TerminalPrompt<R, W> {
    fn ask_yes_no(&mut self, message: &str) -> Answer {
        loop {
            let _ = write!(self.output, "{message} [y/n] ");
            let _ = self.output.flush();

            match self.read_line().as_deref() {
                None => {
                    let _ = writeln!(self.output);
                    return Answer::Dismissed;
                }
                Some("y" | "yes") => return Answer::Yes,
                Some("n" | "no") => return Answer::No,
                Some(_) => {
                    let _ = writeln!(self.output, "Please answer y or n.");
                }
            }
        }
    }

    fn acknowledge(&mut self, message: &str) {
        let _ = writeln!(self.output, "{message}");
    }
}

/// Accepts every question. Notices are logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl PromptService for AssumeYes {
    fn ask_yes_no(&mut self, message: &str) -> Answer {
        tracing::info!(prompt = %message, "Assuming yes");
        Answer::Yes
    }

    fn acknowledge(&mut self, message: &str) {
        tracing::warn!("{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ask(input: &str) -> (Answer, String) {
        let mut output = Vec::new();
        let answer = TerminalPrompt::new(input.as_bytes(), &mut output).ask_yes_no("Overwrite?");
        (answer, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_terminal_prompt_answers() {
        assert_eq!(ask("y\n").0, Answer::Yes);
        assert_eq!(ask("YES\n").0, Answer::Yes);
        assert_eq!(ask("n\n").0, Answer::No);
        assert_eq!(ask("").0, Answer::Dismissed);
    }

    #[test]
    fn test_terminal_prompt_repeats_on_invalid_reply() {
        let (answer, output) = ask("maybe\nno\n");
        assert_eq!(answer, Answer::No);
        assert_eq!(output.matches("Overwrite? [y/n]").count(), 2);
        assert!(output.contains("Please answer y or n."));
    }

    #[test]
    fn test_dismissed_is_not_yes() {
        assert!(!Answer::Dismissed.is_yes());
        assert!(!Answer::No.is_yes());
        assert!(Answer::Yes.is_yes());
    }
}
