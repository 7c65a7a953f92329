// cascade: apply changes across many git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!          CascadeError (~24 bytes)
//!                   |
//!   +--------+------+------+------+------+
//!   v        v             v      v      v
//! Validation ErrorLog   Config   Io    Other
//!   Box      Box          Box    Box  Box<str>
//!
//! Per-repository (recorded, never fatal):
//!   StepError { step, source: GitError }
//!
//! Pre-flight (fatal, aggregated):
//!   ValidationFailure { problems: [ValidationError] }
//! ```
//!
//! [`chain::ErrorTree`] renders any of these as an indented cause tree.

pub mod chain;

use std::path::PathBuf;

use thiserror::Error;

use crate::apply::pipeline::Step;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`CascadeError`].
pub type CascadeResult<T> = std::result::Result<T, CascadeError>;

/// Result type for a single git or script invocation.
pub type GitResult<T> = std::result::Result<T, GitError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum CascadeError {
    /// Pre-flight validation rejected the invocation.
    #[error(transparent)]
    Validation(Box<ValidationFailure>),

    /// The error log could not be created or written.
    #[error(transparent)]
    ErrorLog(Box<ErrorLogError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(Box<ConfigError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

/// Create a [`CascadeError::Other`] from a message.
pub fn other(message: impl Into<String>) -> CascadeError {
    CascadeError::Other(message.into().into_boxed_str())
}

// --- From implementations for boxing ---

macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for CascadeError {
                fn from(err: $error) -> Self {
                    CascadeError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ValidationFailure => Validation,
    ErrorLogError => ErrorLog,
    ConfigError => Config,
    std::io::Error => Io,
}

// --- Git Errors ---

/// Failure of a single external command (git or a user script).
///
/// The captured output is kept verbatim so it can be written to the error log.
#[derive(Debug, Error)]
pub enum GitError {
    /// The program could not be started at all.
    #[error("failed to run '{program}'")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran and exited unsuccessfully.
    #[error("'{command}' exited with {status}{}", format_output(.output))]
    CommandFailed {
        command: String,
        status: String,
        output: String,
    },
}

impl GitError {
    /// Combined stdout/stderr captured from the failed command, if any.
    #[must_use]
    pub fn output(&self) -> Option<&str> {
        match self {
            Self::CommandFailed { output, .. } if !output.is_empty() => Some(output),
            _ => None,
        }
    }
}

fn format_output(output: &str) -> String {
    if output.is_empty() {
        String::new()
    } else {
        format!("\n{output}")
    }
}

// --- Step Errors ---

/// A pipeline step failed for one repository.
///
/// The step name prefixes the message; the command failure is kept as the source.
#[derive(Debug, Error)]
#[error("{step} failed")]
pub struct StepError {
    pub step: Step,
    #[source]
    pub source: GitError,
}

impl StepError {
    #[must_use]
    pub const fn new(step: Step, source: GitError) -> Self {
        Self { step, source }
    }
}

// --- Validation Errors ---

/// What kind of input file is being validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Patch,
    Script,
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Patch => write!(f, "patch"),
            Self::Script => write!(f, "script"),
        }
    }
}

/// Which branch argument a name error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchRole {
    Target,
    Base,
}

impl std::fmt::Display for BranchRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Target => write!(f, "target"),
            Self::Base => write!(f, "base"),
        }
    }
}

/// Why a branch name was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BranchNameRule {
    #[error("branch name cannot be empty")]
    Empty,
    #[error("branch name cannot start with '.'")]
    LeadingDot,
    #[error("branch name cannot contain '..'")]
    DoubleDot,
    #[error("branch name cannot end with '/'")]
    TrailingSlash,
    #[error("branch name cannot end with '.lock'")]
    LockSuffix,
    #[error("branch name contains invalid characters")]
    InvalidCharacter,
}

/// A single pre-flight problem.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Neither `--patch` nor `--script` was given.
    #[error("either --patch or --script must be specified")]
    MissingChangeSource,

    /// Both `--patch` and `--script` were given.
    #[error("--patch and --script cannot be used together")]
    ConflictingChangeSource,

    /// Script mode requested on a host that cannot exec scripts directly.
    #[error("--script option is not supported on this platform")]
    ScriptUnsupported,

    /// `git` is not on PATH.
    #[error("git executable not found in PATH")]
    GitNotFound(#[source] which::Error),

    #[error("{kind} file does not exist: {}", .path.display())]
    FileNotFound { kind: FileKind, path: PathBuf },

    #[error("error accessing {kind} file: {}", .path.display())]
    FileAccess {
        kind: FileKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{kind} file is a directory: {}", .path.display())]
    FileIsDirectory { kind: FileKind, path: PathBuf },

    #[error("script file is not executable: {}", .path.display())]
    ScriptNotExecutable { path: PathBuf },

    #[error("directory does not exist: {}", .path.display())]
    RepoNotFound { path: PathBuf },

    #[error("error accessing directory: {}", .path.display())]
    RepoAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("path is not a directory: {}", .path.display())]
    RepoNotDirectory { path: PathBuf },

    #[error("not a git repository: {}", .path.display())]
    NotARepository {
        path: PathBuf,
        #[source]
        source: GitError,
    },

    #[error("invalid {role} branch name '{name}'")]
    InvalidBranchName {
        role: BranchRole,
        name: String,
        #[source]
        rule: BranchNameRule,
    },

    #[error("commit message cannot be empty")]
    EmptyMessage,

    #[error("no repositories given")]
    NoRepositories,
}

/// Every pre-flight problem found for one invocation.
///
/// Never empty: the validator only builds one when at least one check failed.
#[derive(Debug, Error)]
#[error("pre-flight validation failed ({})", count_problems(.problems))]
pub struct ValidationFailure {
    pub problems: Vec<ValidationError>,
}

impl From<ValidationError> for ValidationFailure {
    fn from(problem: ValidationError) -> Self {
        Self {
            problems: vec![problem],
        }
    }
}

fn count_problems(problems: &[ValidationError]) -> String {
    match problems.len() {
        1 => "1 problem".to_string(),
        n => format!("{n} problems"),
    }
}

// --- Error Log Errors ---

/// The per-run error log could not be maintained.
///
/// Fatal: continuing would silently drop repository failures.
#[derive(Debug, Error)]
pub enum ErrorLogError {
    #[error("failed to create error log in {}", .dir.display())]
    Create {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write error log {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}
