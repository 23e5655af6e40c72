//! Command dispatch service
//!
//! Runs an [`Invocation`] as a child process, decodes its stdout as UTF-8
//! text and, when requested, echoes it followed by a single newline.

use std::io::Write;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{normalize_newlines, Capture, Invocation};
use crate::infrastructure::traits::CommandRunner;

/// Service that executes dispatcher invocations.
pub struct DispatchService {
    cmd: Arc<dyn CommandRunner>,
}

impl DispatchService {
    /// Create a new dispatch service.
    pub fn new(cmd: Arc<dyn CommandRunner>) -> Self {
        Self { cmd }
    }

    /// Run the invocation and wait for the child to exit.
    ///
    /// The capture is always decoded, with `\r\n` and `\r` turned into `\n`.
    /// If `invocation.echo` is set, the text is written to `out` followed by
    /// `\n`. The child's exit status is reported in the returned [`Capture`]
    /// but never turned into an error here.
    ///
    /// # Errors
    /// - `ApplicationError::Spawn` if the child cannot be started or waited on
    /// - `ApplicationError::Decode` if the child's stdout is not UTF-8, echo or not
    /// - `ApplicationError::OperationFailed` if writing the echo fails
    #[instrument(skip_all, fields(program = %invocation.program, echo = invocation.echo))]
    pub fn dispatch(
        &self,
        invocation: &Invocation,
        out: &mut dyn Write,
    ) -> ApplicationResult<Capture> {
        debug!("dispatch: command={}", invocation.command_line());

        let output = self
            .cmd
            .run(&invocation.program, &invocation.args)
            .map_err(|source| ApplicationError::Spawn {
                program: invocation.program.clone(),
                source,
            })?;

        let text =
            String::from_utf8(output.stdout).map_err(|source| ApplicationError::Decode {
                program: invocation.program.clone(),
                source,
            })?;
        let capture = Capture {
            stdout: normalize_newlines(&text),
            exit_code: output.status.code(),
        };
        debug!(
            "dispatch: exit_code={:?}, captured={} bytes",
            capture.exit_code,
            capture.stdout.len()
        );

        if invocation.echo {
            writeln!(out, "{}", capture.stdout).with_context("echo captured stdout")?;
            out.flush().with_context("flush stdout")?;
        }

        Ok(capture)
    }
}
