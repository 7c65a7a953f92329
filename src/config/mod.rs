// cascade: apply changes across many git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. ./cascade.toml (optional)
//! 3. --config FILE (in order, required)
//! 4. CASCADE_* env vars
//! 5. CLI flags
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! CASCADE_GLOBAL__LOG_LEVEL=4          → global.log_level = 4
//! CASCADE_APPLY__REMOTE=upstream       → apply.remote = "upstream"
//! CASCADE_APPLY__ERROR_LOG_DIR=/logs   → apply.error_log_dir = "/logs"
//! ```

pub mod loader;
pub mod types;


use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Result;

use loader::ConfigLoader;
use types::{ApplyConfig, GlobalConfig};

/// File looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "cascade.toml";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "CASCADE";

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub global: GlobalConfig,
    pub apply: ApplyConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use cascade::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("cascade.toml")
    ///     .with_env_prefix("CASCADE")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match `Config`.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Every option as `key = value`, sorted and aligned.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let fmt = |p: &Option<PathBuf>| {
            p.as_ref()
                .map_or_else(String::new, |p| p.display().to_string())
        };

        let mut options = BTreeMap::new();
        options.insert("global.log_level", self.global.log_level.to_string());
        options.insert(
            "global.file_log_level",
            self.global.file_log_level.to_string(),
        );
        options.insert("global.log_file", fmt(&self.global.log_file));
        options.insert("apply.remote", self.apply.remote.clone());
        options.insert(
            "apply.error_log_dir",
            self.apply.error_log_dir().display().to_string(),
        );

        let max_key_len = options.keys().map(|key| key.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}
