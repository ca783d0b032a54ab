// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dispatcher configuration
//!
//! Loaded from TOML; every key is optional:
//!
//! ```toml
//! max_listeners_per_event = 64
//! warn_unheard = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tunables for a [`Dispatcher`](crate::Dispatcher)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DispatcherConfig {
    /// Registrations beyond this count per event name are refused
    pub max_listeners_per_event: Option<usize>,
    /// Log dispatches nobody listens to at warn instead of debug
    pub warn_unheard: bool,
}

impl DispatcherConfig {
    /// Parse configuration from TOML content
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), ?config, "loaded dispatcher config");
        Ok(config)
    }

    pub fn with_max_listeners(mut self, max: usize) -> Self {
        self.max_listeners_per_event = Some(max);
        self
    }

    pub fn with_warn_unheard(mut self, warn: bool) -> Self {
        self.warn_unheard = warn;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_listeners_per_event == Some(0) {
            return Err(ConfigError::Invalid(
                "max_listeners_per_event must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
