//! Domain layer: entities and invocation parsing
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;

pub use entities::*;
pub use error::{DomainError, DomainResult};
