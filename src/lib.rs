//! runcap: run a command, optionally echoing its captured stdout.
//!
//! Invoked as `runcap [stdout] <command> [args...]`. The child inherits
//! stdin, stderr and the environment; its stdout is captured and, when the
//! leading `stdout` marker is present, printed back followed by a newline.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
