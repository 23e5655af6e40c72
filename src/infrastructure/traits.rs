//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested with mock implementations.

use std::io;
use std::process::{Output, Stdio};

/// External command runner abstraction.
pub trait CommandRunner: Send + Sync {
    /// Run a command to completion, capturing its stdout.
    ///
    /// Stdin, stderr and the environment are inherited from the current
    /// process; `Output::stderr` is therefore always empty.
    fn run(&self, program: &str, args: &[String]) -> io::Result<Output>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real command runner implementation.
#[derive(Debug, Default)]
pub struct RealCommandRunner;

impl CommandRunner for RealCommandRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<Output> {
        std::process::Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .output()
    }
}
