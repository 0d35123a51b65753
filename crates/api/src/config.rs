//! Outline preferences handed over by the host.

use crate::error::{OutlineError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default number of characters kept from a debug token before it is shortened.
pub const DEFAULT_DEBUG_LABEL_LIMIT: usize = 40;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct OutlineConfig {
    pub debug_label_limit: usize,
    pub sort_alphabetical: bool,
    pub show_variables: bool,
    pub link_with_editor: bool,
    pub logging: LoggingConfig,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            debug_label_limit: DEFAULT_DEBUG_LABEL_LIMIT,
            sort_alphabetical: true,
            show_variables: true,
            link_with_editor: true,
            logging: LoggingConfig::default(),
        }
    }
}

impl OutlineConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.debug_label_limit == 0 {
            return Err(OutlineError::InvalidConfig(
                "debug_label_limit must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Directory for rolling log files; `~/.shellscope/logs` when unset.
    pub directory: Option<PathBuf>,
    pub to_stderr: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            to_stderr: false,
        }
    }
}

impl LoggingConfig {
    pub fn log_dir(&self) -> PathBuf {
        match &self.directory {
            Some(dir) => dir.clone(),
            None => {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                Path::new(&home).join(".shellscope/logs")
            }
        }
    }
}
