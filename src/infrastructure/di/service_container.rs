//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::DispatchService;
use crate::config::Settings;
use crate::infrastructure::traits::{CommandRunner, RealCommandRunner};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Dispatcher running children through the injected runner
    pub dispatch: DispatchService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealCommandRunner))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, cmd: Arc<dyn CommandRunner>) -> Self {
        Self {
            settings: Arc::new(settings),
            dispatch: DispatchService::new(cmd),
        }
    }
}
