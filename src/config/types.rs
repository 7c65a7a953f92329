// cascade: apply changes across many git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration sections.
//!
//! ```text
//! Config: GlobalConfig [global], ApplyConfig [apply]
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;

/// `[global]`: diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Console log level (0-5).
    pub log_level: LogLevel,
    /// Diagnostic log file level (0-5).
    pub file_log_level: LogLevel,
    /// Diagnostic log file. No file is written when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
        }
    }
}

/// `[apply]`: batch behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApplyConfig {
    /// Remote that `--push` targets.
    pub remote: String,
    /// Directory for the per-run error log. Defaults to the system temp dir.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_log_dir: Option<PathBuf>,
}

impl Default for ApplyConfig {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            error_log_dir: None,
        }
    }
}

impl ApplyConfig {
    /// Where the error log goes.
    #[must_use]
    pub fn error_log_dir(&self) -> PathBuf {
        self.error_log_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir)
    }
}
