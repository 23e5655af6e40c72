//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent invalid invocations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("no command given (usage: runcap [{marker}] <command> [args...])")]
    MissingCommand { marker: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
