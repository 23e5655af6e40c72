//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// The child could not be spawned or failed while being waited on.
    /// Not-found and permission errors are not told apart.
    #[error("failed to execute '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The child's stdout is not valid UTF-8 text.
    #[error("output of '{program}' is not valid UTF-8: {source}")]
    Decode {
        program: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}: {source}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
