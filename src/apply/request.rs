// cascade: apply changes across many git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The resolved, immutable description of one `apply` run.

use std::path::{Path, PathBuf};

use bitflags::bitflags;
use bon::Builder;

use crate::error::ValidationError;

bitflags! {
    /// Optional behavior switches for a run.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ApplyFlags: u32 {
        /// Stash local changes before anything else
        const STASH = 0x01;
        /// Fast-forward pull before creating the branch
        const PULL = 0x02;
        /// Push the branch after committing
        const PUSH = 0x04;
        /// Skip commit and push hooks
        const NO_VERIFY = 0x08;
        /// Open the URL the remote reports after a push
        const OPEN_REMOTE_URL = 0x10;
    }
}

/// Where the change comes from. Exactly one per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeSource {
    Patch(PathBuf),
    Script(PathBuf),
}

impl ChangeSource {
    /// Pick the change source from the two mutually exclusive options.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` unless exactly one option is set.
    pub fn from_options(
        patch: Option<PathBuf>,
        script: Option<PathBuf>,
    ) -> Result<Self, ValidationError> {
        match (patch, script) {
            (Some(patch), None) => Ok(Self::Patch(patch)),
            (None, Some(script)) => Ok(Self::Script(script)),
            (Some(_), Some(_)) => Err(ValidationError::ConflictingChangeSource),
            (None, None) => Err(ValidationError::MissingChangeSource),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Patch(path) | Self::Script(path) => path,
        }
    }

    #[must_use]
    pub const fn is_script(&self) -> bool {
        matches!(self, Self::Script(_))
    }

    /// Same source with its path made absolute, since commands run inside each repository.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the current directory cannot be determined.
    pub fn to_absolute(&self) -> std::io::Result<Self> {
        Ok(match self {
            Self::Patch(path) => Self::Patch(std::path::absolute(path)?),
            Self::Script(path) => Self::Script(std::path::absolute(path)?),
        })
    }
}

/// Everything one run needs, fixed before the first repository is touched.
#[derive(Debug, Clone, Builder)]
pub struct ApplyRequest {
    source: ChangeSource,
    #[builder(into)]
    branch: String,
    #[builder(into)]
    message: String,
    #[builder(into)]
    base_branch: Option<String>,
    #[builder(into, default = String::from("origin"))]
    remote: String,
    #[builder(default)]
    flags: ApplyFlags,
}

impl ApplyRequest {
    #[must_use]
    pub const fn source(&self) -> &ChangeSource {
        &self.source
    }

    /// Target branch, created or reset in every repository.
    #[must_use]
    pub fn branch(&self) -> &str {
        &self.branch
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn base_branch(&self) -> Option<&str> {
        self.base_branch.as_deref()
    }

    #[must_use]
    pub fn remote(&self) -> &str {
        &self.remote
    }

    #[must_use]
    pub const fn flags(&self) -> ApplyFlags {
        self.flags
    }

    #[must_use]
    pub const fn has(&self, flag: ApplyFlags) -> bool {
        self.flags.contains(flag)
    }
}
