//! Domain entities: core data structures

use crate::domain::{DomainError, DomainResult};

/// Marker token that requests the captured stdout to be echoed.
pub const DEFAULT_ECHO_MARKER: &str = "stdout";

/// A parsed dispatcher invocation.
///
/// Built from the raw argument list: an optional leading marker followed by
/// the command to run and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Echo the captured stdout after the child exits
    pub echo: bool,
    /// Program to execute (resolved via PATH by the runner)
    pub program: String,
    /// Arguments passed verbatim to the program
    pub args: Vec<String>,
}

impl Invocation {
    /// Parse an argument list (program name excluded).
    ///
    /// Only the first element is checked against `marker`. Everything after
    /// it is treated as `<command> [args...]`, untouched.
    ///
    /// # Errors
    /// `DomainError::MissingCommand` if no command remains after the marker.
    pub fn parse(argv: &[String], marker: &str) -> DomainResult<Self> {
        let (echo, rest) = match argv.split_first() {
            Some((first, rest)) if first == marker => (true, rest),
            _ => (false, argv),
        };

        let (program, args) = rest
            .split_first()
            .ok_or_else(|| DomainError::MissingCommand {
                marker: marker.to_string(),
            })?;

        Ok(Self {
            echo,
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    /// Program and arguments joined by spaces, for diagnostics only.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Translate `\r\n` and lone `\r` line endings to `\n`.
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Result of one child process run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    /// Child stdout, decoded as UTF-8 with newlines normalized
    pub stdout: String,
    /// Exit code; `None` if the child was terminated by a signal
    pub exit_code: Option<i32>,
}

impl Capture {
    /// Whether the child exited with code 0.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}
