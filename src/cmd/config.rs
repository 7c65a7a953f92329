// cascade: apply changes across many git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config-related commands.

use std::path::Path;

use crate::cli::global::GlobalOptions;
use crate::config::loader::ConfigLoader;
use crate::config::{Config, DEFAULT_CONFIG_FILE, ENV_PREFIX};
use crate::error::Result;

/// Display current configuration options.
pub fn run_options_command(config: &Config) {
    for line in config.format_options() {
        println!("{line}");
    }
}

/// Loader with every configuration layer for this invocation.
///
/// # Errors
///
/// Returns an error if a command-line override is rejected.
pub fn build_config_loader(global: &GlobalOptions) -> Result<ConfigLoader> {
    build_config_loader_in(global, DEFAULT_CONFIG_FILE)
}

/// Same as [`build_config_loader`], with the optional default file at `default_file`.
///
/// # Errors
///
/// Returns an error if a command-line override is rejected.
pub fn build_config_loader_in(
    global: &GlobalOptions,
    default_file: impl AsRef<Path>,
) -> Result<ConfigLoader> {
    let mut loader = ConfigLoader::new().add_toml_file_optional(default_file);
    for path in &global.configs {
        loader = loader.add_toml_file(path);
    }
    global.apply_overrides(loader.with_env_prefix(ENV_PREFIX))
}

/// Load the effective configuration.
///
/// # Errors
///
/// Returns an error if a required file is missing or any layer is invalid.
pub fn load_config(global: &GlobalOptions) -> Result<Config> {
    build_config_loader(global)?.build()
}
