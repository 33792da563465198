//! Reporting configuration

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How reports are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Configuration for the reporting surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Prefix prepended to every console link
    pub route_prefix: String,
    pub format: OutputFormat,
    /// `tracing_subscriber::EnvFilter` directive
    pub log_filter: String,
    /// Exit non-zero when the overall state is Rejected
    pub fail_on_rejected: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            route_prefix: String::new(),
            format: OutputFormat::Text,
            log_filter: "warn".to_string(),
            fail_on_rejected: false,
        }
    }
}

impl ConsoleConfig {
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "loaded config");
        Self::from_toml(&contents)
    }
}
