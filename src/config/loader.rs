// cascade: apply changes across many git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration loading from multiple sources.
//!
//! # Loader Pipeline
//!
//! ```text
//! ConfigLoader::new()
//!   .add_toml_file_optional(./cascade.toml)
//!   .add_toml_file(--config ...)
//!   .with_env_prefix("CASCADE")
//!   .set(key, value)              CLI flags
//!        |
//!        v
//!    build() --> Config
//! ```

use std::path::Path;

use config::{Environment, File, FileFormat, Map};

use super::Config;
use crate::error::{CascadeError, ConfigError, Result};

/// Separator between section and key in environment variable names.
pub const ENV_SEPARATOR: &str = "__";

/// Builder for loading configuration from multiple sources.
pub struct ConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: Option<String>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
        }
    }

    /// Adds a TOML file that must exist when `build()` runs.
    #[must_use]
    pub fn add_toml_file(mut self, path: impl AsRef<Path>) -> Self {
        self.builder = self.builder.add_source(
            File::from(path.as_ref())
                .format(FileFormat::Toml)
                .required(true),
        );
        self
    }

    /// Adds a TOML file that is skipped if missing.
    #[must_use]
    pub fn add_toml_file_optional(mut self, path: impl AsRef<Path>) -> Self {
        self.builder = self.builder.add_source(
            File::from(path.as_ref())
                .format(FileFormat::Toml)
                .required(false),
        );
        self
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self
    }

    /// Read `<PREFIX>_<SECTION>__<KEY>` environment variables.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Sets a configuration override.
    ///
    /// # Errors
    ///
    /// Returns an error if the key cannot be parsed as a config path.
    pub fn set<T: Into<config::Value>>(mut self, key: &str, value: T) -> Result<Self> {
        self.builder = self
            .builder
            .set_override(key, value)
            .map_err(|e| {
                CascadeError::from(ConfigError::InvalidValue {
                    section: key.split('.').next().unwrap_or_default().to_string(),
                    key: key.to_string(),
                    message: e.to_string(),
                })
            })?;
        Ok(self)
    }

    /// Sets an override only when a value is present.
    ///
    /// # Errors
    ///
    /// Returns an error if the key cannot be parsed as a config path.
    pub fn set_opt<T: Into<config::Value>>(self, key: &str, value: Option<T>) -> Result<Self> {
        match value {
            Some(value) => self.set(key, value),
            None => Ok(self),
        }
    }

    /// Builds the configuration from all added sources.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required configuration files are missing.
    /// - Configuration files have invalid TOML syntax.
    /// - The merged configuration cannot be deserialized into `Config`.
    pub fn build(self) -> Result<Config> {
        let builder = match &self.env_prefix {
            Some(prefix) => self.builder.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true)
                    .source(Some(sectioned_env_vars(prefix, std::env::vars()))),
            ),
            None => self.builder,
        };
        let config: Config = builder.build()?.try_deserialize()?;
        Ok(config)
    }
}

/// Keeps only `<PREFIX>_<SECTION>__<KEY>` variables; other variables sharing
/// the prefix (`CASCADE_HOME`) are ignored.
pub(crate) fn sectioned_env_vars(
    prefix: &str,
    vars: impl IntoIterator<Item = (String, String)>,
) -> Map<String, String> {
    vars.into_iter()
        .filter(|(key, _)| {
            key.strip_prefix(prefix)
                .and_then(|rest| rest.strip_prefix('_'))
                .is_some_and(|rest| rest.contains(ENV_SEPARATOR))
        })
        .collect()
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
