//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    /// Child finished unsuccessfully and exit propagation was requested.
    /// `None` means the child was killed by a signal.
    #[error("command exited with {}", describe_exit(.0))]
    ChildExit(Option<i32>),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    }
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::ChildExit(code) => code.unwrap_or(crate::exitcode::SOFTWARE),
            CliError::Infra(e) => match e {
                InfraError::Io { .. } => crate::exitcode::IOERR,
                InfraError::Application(app) => match app {
                    ApplicationError::Domain(_) => crate::exitcode::USAGE,
                    ApplicationError::Spawn { .. } => crate::exitcode::OSERR,
                    ApplicationError::Decode { .. } => crate::exitcode::DATAERR,
                    ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                    ApplicationError::OperationFailed { .. } => crate::exitcode::IOERR,
                },
            },
        }
    }

    /// Whether `main` should print this error to stderr.
    ///
    /// A propagated child exit is reported through the exit code only; the
    /// child already wrote its own diagnostics.
    pub fn is_reportable(&self) -> bool {
        !matches!(self, CliError::ChildExit(_))
    }
}
