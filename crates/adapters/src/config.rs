// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bus configuration
//!
//! Parsed from TOML supplied by the hosting application:
//!
//! ```toml
//! name = "orders"
//! slow_dispatch_threshold = "250ms"
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid bus config: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusConfig {
    /// Name recorded on every log line emitted for this bus
    pub name: String,
    /// Dispatches slower than this are logged as warnings
    #[serde(with = "humantime_serde")]
    pub slow_dispatch_threshold: Duration,
}

impl BusConfig {
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            slow_dispatch_threshold: Duration::from_millis(100),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
