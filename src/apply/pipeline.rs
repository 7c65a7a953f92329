// cascade: apply changes across many git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-repository step chain.
//!
//! ```text
//! 1 Stash           if STASH       (no-op on a clean tree)
//! 2 BaseCheckout    if base branch
//! 3 Pull            if PULL        (--ff-only)
//! 4 BranchCheckout  always         (checkout -B)
//! 5 ApplyPatch | ExecuteScript     exactly one
//! 6 Commit          always
//! 7 Push            if PUSH
//! ```
//!
//! The first failing step ends the chain. Nothing is rolled back: a failure
//! after step 4 leaves the repository on the new branch with partial changes.

use std::path::Path;

use tracing::{debug, info};

use super::request::{ApplyFlags, ApplyRequest, ChangeSource};
use crate::error::{GitResult, StepError};
use crate::git::backend::{GitOperations, StashOutcome};
use crate::git::remote::last_remote_url;

/// A stage of the per-repository chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    Stash,
    BaseCheckout,
    Pull,
    BranchCheckout,
    ApplyPatch,
    ExecuteScript,
    Commit,
    Push,
}

impl Step {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stash => "stash",
            Self::BaseCheckout => "base branch checkout",
            Self::Pull => "pull latest",
            Self::BranchCheckout => "branch checkout",
            Self::ApplyPatch => "patch application",
            Self::ExecuteScript => "script execution",
            Self::Commit => "commit",
            Self::Push => "push",
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a successful chain observed along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    /// Set when the stash step ran.
    pub stash: Option<StashOutcome>,
    /// Last URL the remote printed during the push, if any.
    pub remote_url: Option<String>,
}

/// Run every enabled step against `repo`, stopping at the first failure.
///
/// # Errors
///
/// Returns the failing step together with the command error that stopped it.
pub fn run_pipeline<G>(
    git: &G,
    repo: &Path,
    request: &ApplyRequest,
) -> Result<PipelineReport, StepError>
where
    G: GitOperations + ?Sized,
{
    let mut report = PipelineReport::default();
    let no_verify = request.has(ApplyFlags::NO_VERIFY);

    if request.has(ApplyFlags::STASH) {
        report.stash = Some(run_step(Step::Stash, || git.stash_changes(repo))?);
    }

    if let Some(base) = request.base_branch() {
        run_step(Step::BaseCheckout, || git.checkout_existing_branch(repo, base))?;
    }

    if request.has(ApplyFlags::PULL) {
        run_step(Step::Pull, || git.pull_fast_forward(repo))?;
    }

    run_step(Step::BranchCheckout, || {
        git.checkout_new_branch(repo, request.branch())
    })?;

    match request.source() {
        ChangeSource::Patch(patch) => {
            run_step(Step::ApplyPatch, || git.apply_patch(repo, patch))?;
        }
        ChangeSource::Script(script) => {
            run_step(Step::ExecuteScript, || git.execute_script(repo, script))?;
        }
    }

    run_step(Step::Commit, || {
        git.commit_all(repo, request.message(), no_verify)
    })?;

    if request.has(ApplyFlags::PUSH) {
        let output = run_step(Step::Push, || {
            git.push_branch(repo, request.remote(), request.branch(), no_verify)
        })?;
        report.remote_url = last_remote_url(&output).map(str::to_string);
        if let Some(url) = &report.remote_url {
            info!(repo = %repo.display(), url = %url, "remote reported url");
        }
    }

    Ok(report)
}

fn run_step<T>(step: Step, op: impl FnOnce() -> GitResult<T>) -> Result<T, StepError> {
    debug!(step = %step, "running step");
    op().map_err(|source| StepError::new(step, source))
}

#[cfg(test)]
mod tests;
