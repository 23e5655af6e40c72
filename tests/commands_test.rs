//! Tests for the CLI run path: parsing, dispatch and exit policy

#![cfg(unix)]

use std::io;
use std::os::unix::process::ExitStatusExt;
use std::process::{ExitStatus, Output};
use std::sync::{Arc, Mutex};

use rstest::rstest;

use runcap::cli::commands::run;
use runcap::cli::CliError;
use runcap::config::Settings;
use runcap::exitcode;
use runcap::infrastructure::di::ServiceContainer;
use runcap::infrastructure::traits::{CommandRunner, RealCommandRunner};

/// Runner that records what it was asked to run and replays a fixed result.
struct RecordingRunner {
    stdout: Vec<u8>,
    status: ExitStatus,
    seen: Mutex<Vec<(String, Vec<String>)>>,
}

impl RecordingRunner {
    fn exiting(stdout: &str, code: i32) -> Arc<Self> {
        Arc::new(Self {
            stdout: stdout.as_bytes().to_vec(),
            status: ExitStatus::from_raw(code << 8),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn signalled() -> Arc<Self> {
        Arc::new(Self {
            stdout: Vec::new(),
            status: ExitStatus::from_raw(9),
            seen: Mutex::new(Vec::new()),
        })
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<Output> {
        self.seen
            .lock()
            .unwrap()
            .push((program.to_string(), args.to_vec()));
        Ok(Output {
            status: self.status,
            stdout: self.stdout.clone(),
            stderr: Vec::new(),
        })
    }
}

fn argv(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn settings(propagate_exit: bool) -> Settings {
    Settings {
        propagate_exit,
        ..Settings::default()
    }
}

#[test]
fn given_marker_when_run_then_echo_reaches_output() {
    let runner = RecordingRunner::exiting("hello\n", 0);
    let container = ServiceContainer::with_deps(settings(false), runner.clone());
    let mut out = Vec::new();

    run(&container, &argv(&["stdout", "echo", "hello"]), &mut out).unwrap();

    assert_eq!(out, b"hello\n\n");
    let seen = runner.seen.lock().unwrap();
    assert_eq!(seen[0].0, "echo");
    assert_eq!(seen[0].1, vec!["hello".to_string()]);
}

#[test]
fn given_later_marker_token_when_run_then_passed_through_verbatim() {
    let runner = RecordingRunner::exiting("", 0);
    let container = ServiceContainer::with_deps(settings(false), runner.clone());
    let mut out = Vec::new();

    run(&container, &argv(&["echo", "stdout", "stdout"]), &mut out).unwrap();

    assert!(out.is_empty());
    let seen = runner.seen.lock().unwrap();
    assert_eq!(seen[0].1, argv(&["stdout", "stdout"]));
}

#[test]
fn given_failing_child_without_propagation_when_run_then_ok() {
    let container =
        ServiceContainer::with_deps(settings(false), RecordingRunner::exiting("", 1));
    let mut out = Vec::new();

    assert!(run(&container, &argv(&["false"]), &mut out).is_ok());
}

#[rstest]
#[case(RecordingRunner::exiting("", 1), 1)]
#[case(RecordingRunner::exiting("", 42), 42)]
#[case(RecordingRunner::signalled(), exitcode::SOFTWARE)]
fn given_failing_child_with_propagation_when_run_then_child_exit(
    #[case] runner: Arc<RecordingRunner>,
    #[case] expected: i32,
) {
    let container = ServiceContainer::with_deps(settings(true), runner);
    let mut out = Vec::new();

    let err = run(&container, &argv(&["false"]), &mut out).unwrap_err();

    assert!(matches!(err, CliError::ChildExit(_)));
    assert_eq!(err.exit_code(), expected);
}

#[test]
fn given_successful_child_with_propagation_when_run_then_ok() {
    let container =
        ServiceContainer::with_deps(settings(true), RecordingRunner::exiting("x", 0));
    let mut out = Vec::new();

    assert!(run(&container, &argv(&["true"]), &mut out).is_ok());
}

#[test]
fn given_marker_only_when_run_then_usage_error() {
    let runner = RecordingRunner::exiting("", 0);
    let container = ServiceContainer::with_deps(settings(false), runner.clone());
    let mut out = Vec::new();

    let err = run(&container, &argv(&["stdout"]), &mut out).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::USAGE);
    assert!(runner.seen.lock().unwrap().is_empty());
}

#[test]
fn given_custom_marker_when_run_then_only_custom_marker_echoes() {
    let runner = RecordingRunner::exiting("data", 0);
    let custom = Settings {
        marker: "--echo".to_string(),
        propagate_exit: false,
    };
    let container = ServiceContainer::with_deps(custom, runner.clone());

    let mut out = Vec::new();
    run(&container, &argv(&["--echo", "cat"]), &mut out).unwrap();
    assert_eq!(out, b"data\n");

    let mut out = Vec::new();
    run(&container, &argv(&["stdout", "cat"]), &mut out).unwrap();
    assert!(out.is_empty());
    assert_eq!(runner.seen.lock().unwrap()[1].0, "stdout");
}

#[test]
fn given_nonexistent_command_when_run_then_oserr() {
    let container = ServiceContainer::with_deps(settings(false), Arc::new(RealCommandRunner));
    let mut out = Vec::new();

    let err = run(&container, &argv(&["nonexistent-command-xyz"]), &mut out).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::OSERR);
    assert!(err.to_string().contains("nonexistent-command-xyz"));
}
