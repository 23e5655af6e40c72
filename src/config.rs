//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/runcap/runcap.toml`
//! 3. Environment variables: `RUNCAP_*` prefix
//! 4. CLI flags (applied by the caller)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::DEFAULT_ECHO_MARKER;

/// Unified configuration for runcap.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// First-position token that requests the capture to be echoed (default: "stdout")
    pub marker: String,
    /// Exit with the child's exit code instead of 0 (default: false)
    pub propagate_exit: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            marker: DEFAULT_ECHO_MARKER.to_string(),
            propagate_exit: false,
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, keep base).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub marker: Option<String>,
    pub propagate_exit: Option<bool>,
}

/// Get the XDG config directory for runcap.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "runcap").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("runcap.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

/// `RUNCAP_*` environment source.
fn env_source() -> Environment {
    Environment::with_prefix("RUNCAP").prefix_separator("_")
}

impl Settings {
    /// Merge overlay config onto self (base). Overlay wins if `Some`.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            marker: overlay
                .marker
                .clone()
                .unwrap_or_else(|| self.marker.clone()),
            propagate_exit: overlay.propagate_exit.unwrap_or(self.propagate_exit),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/runcap/runcap.toml`
    /// 3. Environment variables: `RUNCAP_MARKER`, `RUNCAP_PROPAGATE_EXIT`
    pub fn load() -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("load: global config {}", global_path.display());
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = current.apply_env_overrides(env_source())?;
        current.validate()?;

        Ok(current)
    }

    /// Load defaults overlaid with a single explicit config file.
    ///
    /// Environment variables are NOT applied.
    pub fn load_from(path: &Path) -> Result<Self, ApplicationError> {
        let raw = load_raw_settings(path)?;
        let settings = Self::default().merge_with(&raw);
        settings.validate()?;
        Ok(settings)
    }

    /// Apply `RUNCAP_*` environment variables as explicit overrides.
    ///
    /// Env vars replace values - they are explicit user overrides.
    pub fn apply_env_overrides(mut self, env: Environment) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(env)
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("marker") {
            self.marker = val;
        }
        match config.get_bool("propagate_exit") {
            Ok(val) => self.propagate_exit = val,
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }

        Ok(self)
    }

    /// Reject settings that cannot drive a dispatch.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.marker.trim().is_empty() {
            return Err(ApplicationError::Config {
                message: "marker must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
