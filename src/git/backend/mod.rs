// cascade: apply changes across many git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git backend abstraction layer.
//!
//! ```text
//! GitOperations --> ShellBackend (git CLI, user scripts)
//!               --> RecordingBackend (tests)
//! ```

#[cfg(test)]
pub(crate) mod recording;

use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Output};

use tracing::debug;

use crate::error::{GitError, GitResult};

/// Result of a stash request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StashOutcome {
    /// Local changes were moved to the stash.
    Stashed,
    /// Working tree was clean; `git stash` was not run.
    Clean,
}

/// Operations the per-repository pipeline needs from git.
///
/// Each method runs a single external command rooted at the repository and
/// reports failure with the command's combined output attached.
pub trait GitOperations {
    /// Check that `path` is inside a git repository, as git itself decides.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if git does not recognize the path.
    fn is_repository(&self, path: &Path) -> GitResult<()>;

    /// Create the branch, or reset it if it exists, at the current `HEAD`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the checkout fails.
    fn checkout_new_branch(&self, repo: &Path, branch: &str) -> GitResult<()>;

    /// Switch to a branch that must already exist.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the checkout fails.
    fn checkout_existing_branch(&self, repo: &Path, branch: &str) -> GitResult<()>;

    /// Stash tracked and untracked changes, skipping clean working trees.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the status check or the stash fails.
    fn stash_changes(&self, repo: &Path) -> GitResult<StashOutcome>;

    /// Pull, refusing anything but a fast-forward.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the pull fails or histories diverged.
    fn pull_fast_forward(&self, repo: &Path) -> GitResult<()>;

    /// Apply a patch file to the working tree.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` on conflicts or a malformed patch.
    fn apply_patch(&self, repo: &Path, patch: &Path) -> GitResult<()>;

    /// Run an executable with the repository as its working directory.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the script cannot start or exits non-zero.
    fn execute_script(&self, repo: &Path, script: &Path) -> GitResult<()>;

    /// Stage everything and commit.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if staging or committing fails.
    fn commit_all(&self, repo: &Path, message: &str, no_verify: bool) -> GitResult<()>;

    /// Push the branch to `remote` under the same name and return the output.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the push is rejected or the remote is unreachable.
    fn push_branch(
        &self,
        repo: &Path,
        remote: &str,
        branch: &str,
        no_verify: bool,
    ) -> GitResult<String>;
}

// --- ShellBackend Implementation (Git CLI) ---

/// Shell-based backend driving the `git` executable.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellBackend;

impl ShellBackend {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Execute a git command. Sets `GCM_INTERACTIVE=never` and `GIT_TERMINAL_PROMPT=0`.
    ///
    /// Returns stdout and stderr joined, trimmed.
    pub(crate) fn git_command(args: &[&OsStr], cwd: &Path) -> GitResult<String> {
        let mut command = Command::new("git");
        command
            .args(args)
            .current_dir(cwd)
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0");
        run(command, &describe("git", args), cwd)
    }
}

/// Run a prepared command, turning non-zero exits into [`GitError::CommandFailed`].
fn run(mut command: Command, command_line: &str, cwd: &Path) -> GitResult<String> {
    debug!(command = %command_line, cwd = %cwd.display(), "running");

    let output = command.output().map_err(|source| GitError::Spawn {
        program: command_line.to_string(),
        source,
    })?;

    let combined = combined_output(&output);
    if !output.status.success() {
        return Err(GitError::CommandFailed {
            command: command_line.to_string(),
            status: output.status.to_string(),
            output: combined,
        });
    }
    Ok(combined)
}

fn combined_output(output: &Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = stdout.trim();
    let stderr = stderr.trim();
    match (stdout.is_empty(), stderr.is_empty()) {
        (true, _) => stderr.to_string(),
        (false, true) => stdout.to_string(),
        (false, false) => format!("{stdout}\n{stderr}"),
    }
}

fn describe(program: &str, args: &[&OsStr]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(&arg.to_string_lossy());
    }
    line
}

impl GitOperations for ShellBackend {
    fn is_repository(&self, path: &Path) -> GitResult<()> {
        Self::git_command(
            &[
                OsStr::new("-C"),
                path.as_os_str(),
                OsStr::new("rev-parse"),
                OsStr::new("--git-dir"),
            ],
            Path::new("."),
        )?;
        Ok(())
    }

    fn checkout_new_branch(&self, repo: &Path, branch: &str) -> GitResult<()> {
        Self::git_command(
            &[OsStr::new("checkout"), OsStr::new("-B"), OsStr::new(branch)],
            repo,
        )?;
        Ok(())
    }

    fn checkout_existing_branch(&self, repo: &Path, branch: &str) -> GitResult<()> {
        Self::git_command(&[OsStr::new("checkout"), OsStr::new(branch)], repo)?;
        Ok(())
    }

    fn stash_changes(&self, repo: &Path) -> GitResult<StashOutcome> {
        let status = Self::git_command(&[OsStr::new("status"), OsStr::new("--porcelain")], repo)?;
        if status.is_empty() {
            debug!(repo = %repo.display(), "working tree clean, nothing to stash");
            return Ok(StashOutcome::Clean);
        }

        Self::git_command(
            &[OsStr::new("stash"), OsStr::new("push"), OsStr::new("-u")],
            repo,
        )?;
        Ok(StashOutcome::Stashed)
    }

    fn pull_fast_forward(&self, repo: &Path) -> GitResult<()> {
        Self::git_command(&[OsStr::new("pull"), OsStr::new("--ff-only")], repo)?;
        Ok(())
    }

    fn apply_patch(&self, repo: &Path, patch: &Path) -> GitResult<()> {
        Self::git_command(&[OsStr::new("apply"), patch.as_os_str()], repo)?;
        Ok(())
    }

    fn execute_script(&self, repo: &Path, script: &Path) -> GitResult<()> {
        let mut command = Command::new(script);
        command.current_dir(repo);
        run(command, &script.display().to_string(), repo)?;
        Ok(())
    }

    fn commit_all(&self, repo: &Path, message: &str, no_verify: bool) -> GitResult<()> {
        Self::git_command(&[OsStr::new("add"), OsStr::new(".")], repo)?;

        let mut args = vec![OsStr::new("commit")];
        if no_verify {
            args.push(OsStr::new("--no-verify"));
        }
        args.extend([OsStr::new("-m"), OsStr::new(message)]);
        Self::git_command(&args, repo)?;
        Ok(())
    }

    fn push_branch(
        &self,
        repo: &Path,
        remote: &str,
        branch: &str,
        no_verify: bool,
    ) -> GitResult<String> {
        let mut args = vec![OsStr::new("push")];
        if no_verify {
            args.push(OsStr::new("--no-verify"));
        }
        args.extend([OsStr::new("-u"), OsStr::new(remote), OsStr::new(branch)]);
        Self::git_command(&args, repo)
    }
}
