// cascade: apply changes across many git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pre-flight gate.
//!
//! ```text
//! validate_request
//!   |-- script mode?  --> HostCapabilities
//!   |-- change file   --> validate_file
//!   |-- branch names  --> validate_branch_name (target, base)
//!   |-- message
//!   +-- each repo     --> validate_repository --> GitOperations::is_repository
//! ```
//!
//! Every check runs; all problems are returned together in one
//! [`ValidationFailure`]. Nothing here mutates a repository.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::apply::request::{ApplyRequest, ChangeSource};
use crate::error::{BranchNameRule, BranchRole, FileKind, ValidationError, ValidationFailure};
use crate::git::backend::GitOperations;

/// Whitespace, control characters and `~^:?*[\`.
static FORBIDDEN_BRANCH_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\x00-\x20\x7F~^:?*\[\\]").expect("static regex must compile")
});

/// Host features resolved once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostCapabilities {
    /// Scripts can be exec'd directly as standalone executables.
    pub scripts: bool,
}

impl HostCapabilities {
    #[must_use]
    pub const fn detect() -> Self {
        Self {
            scripts: !cfg!(windows),
        }
    }
}

impl Default for HostCapabilities {
    fn default() -> Self {
        Self::detect()
    }
}

/// Find `git` on `PATH`.
///
/// # Errors
///
/// Returns [`ValidationError::GitNotFound`] if it is missing.
pub fn ensure_git_available() -> Result<PathBuf, ValidationError> {
    let git = which::which("git").map_err(ValidationError::GitNotFound)?;
    debug!(path = %git.display(), "found git");
    Ok(git)
}

/// Check that a patch or script exists and is a regular file.
/// Scripts must also carry an executable bit.
///
/// # Errors
///
/// Returns the first problem found with the file.
pub fn validate_file(path: &Path, kind: FileKind) -> Result<(), ValidationError> {
    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(ValidationError::FileNotFound {
                kind,
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(ValidationError::FileAccess {
                kind,
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if metadata.is_dir() {
        return Err(ValidationError::FileIsDirectory {
            kind,
            path: path.to_path_buf(),
        });
    }

    if kind == FileKind::Script && !is_executable(&metadata) {
        return Err(ValidationError::ScriptNotExecutable {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

#[cfg(unix)]
fn is_executable(metadata: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
const fn is_executable(_metadata: &std::fs::Metadata) -> bool {
    true
}

/// Check that `path` is an existing directory that git recognizes as a repository.
///
/// # Errors
///
/// Returns the first problem found with the path.
pub fn validate_repository<G>(git: &G, path: &Path) -> Result<(), ValidationError>
where
    G: GitOperations + ?Sized,
{
    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(ValidationError::RepoNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(ValidationError::RepoAccess {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if !metadata.is_dir() {
        return Err(ValidationError::RepoNotDirectory {
            path: path.to_path_buf(),
        });
    }

    git.is_repository(path)
        .map_err(|source| ValidationError::NotARepository {
            path: path.to_path_buf(),
            source,
        })
}

/// Check a branch name against git's ref-name rules.
///
/// # Errors
///
/// Returns the first rule the name breaks.
pub fn validate_branch_name(name: &str) -> Result<(), BranchNameRule> {
    if name.is_empty() {
        return Err(BranchNameRule::Empty);
    }
    if name.starts_with('.') {
        return Err(BranchNameRule::LeadingDot);
    }
    if name.contains("..") {
        return Err(BranchNameRule::DoubleDot);
    }
    if name.ends_with('/') {
        return Err(BranchNameRule::TrailingSlash);
    }
    if name.ends_with(".lock") {
        return Err(BranchNameRule::LockSuffix);
    }
    if FORBIDDEN_BRANCH_CHARS.is_match(name) {
        return Err(BranchNameRule::InvalidCharacter);
    }
    Ok(())
}

/// Run every pre-flight check for one invocation.
///
/// # Errors
///
/// Returns a [`ValidationFailure`] listing every problem found.
pub fn validate_request<G>(
    git: &G,
    host: HostCapabilities,
    request: &ApplyRequest,
    repos: &[PathBuf],
) -> Result<(), ValidationFailure>
where
    G: GitOperations + ?Sized,
{
    let mut problems = Vec::new();

    match request.source() {
        ChangeSource::Script(_) if !host.scripts => {
            problems.push(ValidationError::ScriptUnsupported);
        }
        ChangeSource::Script(path) => {
            push_err(&mut problems, validate_file(path, FileKind::Script));
        }
        ChangeSource::Patch(path) => push_err(&mut problems, validate_file(path, FileKind::Patch)),
    }

    check_branch(&mut problems, BranchRole::Target, request.branch());
    if let Some(base) = request.base_branch() {
        check_branch(&mut problems, BranchRole::Base, base);
    }

    if request.message().trim().is_empty() {
        problems.push(ValidationError::EmptyMessage);
    }

    if repos.is_empty() {
        problems.push(ValidationError::NoRepositories);
    }
    for repo in repos {
        push_err(&mut problems, validate_repository(git, repo));
    }

    if problems.is_empty() {
        debug!(repos = repos.len(), "pre-flight validation passed");
        Ok(())
    } else {
        Err(ValidationFailure { problems })
    }
}

fn check_branch(problems: &mut Vec<ValidationError>, role: BranchRole, name: &str) {
    if let Err(rule) = validate_branch_name(name) {
        problems.push(ValidationError::InvalidBranchName {
            role,
            name: name.to_string(),
            rule,
        });
    }
}

fn push_err(problems: &mut Vec<ValidationError>, result: Result<(), ValidationError>) {
    if let Err(problem) = result {
        problems.push(problem);
    }
}

#[cfg(test)]
mod tests;
