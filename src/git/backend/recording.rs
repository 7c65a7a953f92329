// cascade: apply changes across many git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! In-memory [`GitOperations`] double for pipeline and batch tests.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use super::{GitOperations, StashOutcome};
use crate::error::{GitError, GitResult};

/// Operation names as recorded by [`RecordingBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Op {
    IsRepository,
    CheckoutNewBranch,
    CheckoutExistingBranch,
    Stash,
    Pull,
    ApplyPatch,
    ExecuteScript,
    Commit,
    Push,
}

/// Records every call and fails the configured `(repo, op)` pairs.
#[derive(Debug, Default)]
pub(crate) struct RecordingBackend {
    calls: RefCell<Vec<(PathBuf, Op)>>,
    failures: BTreeSet<(PathBuf, Op)>,
    dirty: BTreeSet<PathBuf>,
    push_output: String,
}

impl RecordingBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Make `op` fail whenever it runs against `repo`.
    pub(crate) fn fail(mut self, repo: impl Into<PathBuf>, op: Op) -> Self {
        self.failures.insert((repo.into(), op));
        self
    }

    /// Report local changes for `repo` so that stashing really stashes.
    pub(crate) fn dirty(mut self, repo: impl Into<PathBuf>) -> Self {
        self.dirty.insert(repo.into());
        self
    }

    /// Output returned by every successful push.
    pub(crate) fn push_output(mut self, output: impl Into<String>) -> Self {
        self.push_output = output.into();
        self
    }

    /// Operations run against `repo`, in order.
    pub(crate) fn ops_for(&self, repo: &Path) -> Vec<Op> {
        self.calls
            .borrow()
            .iter()
            .filter(|(path, _)| path == repo)
            .map(|(_, op)| *op)
            .collect()
    }

    pub(crate) fn total_calls(&self) -> usize {
        self.calls.borrow().len()
    }

    fn record(&self, repo: &Path, op: Op) -> GitResult<()> {
        self.calls.borrow_mut().push((repo.to_path_buf(), op));
        if self.failures.contains(&(repo.to_path_buf(), op)) {
            return Err(GitError::CommandFailed {
                command: format!("{op:?}"),
                status: "exit status: 1".to_string(),
                output: format!("simulated {op:?} failure"),
            });
        }
        Ok(())
    }
}

impl GitOperations for RecordingBackend {
    fn is_repository(&self, path: &Path) -> GitResult<()> {
        self.record(path, Op::IsRepository)
    }

    fn checkout_new_branch(&self, repo: &Path, _branch: &str) -> GitResult<()> {
        self.record(repo, Op::CheckoutNewBranch)
    }

    fn checkout_existing_branch(&self, repo: &Path, _branch: &str) -> GitResult<()> {
        self.record(repo, Op::CheckoutExistingBranch)
    }

    fn stash_changes(&self, repo: &Path) -> GitResult<StashOutcome> {
        self.record(repo, Op::Stash)?;
        if self.dirty.contains(repo) {
            Ok(StashOutcome::Stashed)
        } else {
            Ok(StashOutcome::Clean)
        }
    }

    fn pull_fast_forward(&self, repo: &Path) -> GitResult<()> {
        self.record(repo, Op::Pull)
    }

    fn apply_patch(&self, repo: &Path, _patch: &Path) -> GitResult<()> {
        self.record(repo, Op::ApplyPatch)
    }

    fn execute_script(&self, repo: &Path, _script: &Path) -> GitResult<()> {
        self.record(repo, Op::ExecuteScript)
    }

    fn commit_all(&self, repo: &Path, _message: &str, _no_verify: bool) -> GitResult<()> {
        self.record(repo, Op::Commit)
    }

    fn push_branch(
        &self,
        repo: &Path,
        _remote: &str,
        _branch: &str,
        _no_verify: bool,
    ) -> GitResult<String> {
        self.record(repo, Op::Push)?;
        Ok(self.push_output.clone())
    }
}
