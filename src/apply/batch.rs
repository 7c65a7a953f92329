// cascade: apply changes across many git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sequential batch driver.
//!
//! Repositories run one at a time, in input order. A failing repository is
//! recorded and logged, then the batch moves on; only a broken error log
//! stops the batch.

use std::path::{Path, PathBuf};

use tracing::{info, info_span, warn};

use super::error_log::ErrorLog;
use super::pipeline::{PipelineReport, Step, run_pipeline};
use super::request::ApplyRequest;
use crate::error::{ErrorLogError, StepError};
use crate::git::backend::GitOperations;

/// Terminal state of one repository.
#[derive(Debug)]
pub enum RepoStatus {
    Succeeded(PipelineReport),
    Failed(StepError),
}

/// One result per input repository, fixed once the pipeline halts.
#[derive(Debug)]
pub struct RepoOutcome {
    repo: PathBuf,
    status: RepoStatus,
}

impl RepoOutcome {
    #[must_use]
    pub fn repo(&self) -> &Path {
        &self.repo
    }

    #[must_use]
    pub const fn status(&self) -> &RepoStatus {
        &self.status
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.status, RepoStatus::Succeeded(_))
    }

    #[must_use]
    pub const fn failed_step(&self) -> Option<Step> {
        match &self.status {
            RepoStatus::Failed(err) => Some(err.step),
            RepoStatus::Succeeded(_) => None,
        }
    }

    #[must_use]
    pub fn remote_url(&self) -> Option<&str> {
        match &self.status {
            RepoStatus::Succeeded(report) => report.remote_url.as_deref(),
            RepoStatus::Failed(_) => None,
        }
    }
}

/// Outcomes in input order plus the error log path, if one was written.
#[derive(Debug)]
pub struct BatchReport {
    pub outcomes: Vec<RepoOutcome>,
    pub error_log: Option<PathBuf>,
}

impl BatchReport {
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_success()).count()
    }
}

/// Run the pipeline for every repository, in order.
///
/// # Errors
///
/// Returns an `ErrorLogError` if a failure cannot be written to the error log.
/// Repository failures themselves are never returned as errors.
pub fn run_batch<G>(
    git: &G,
    request: &ApplyRequest,
    repos: &[PathBuf],
    mut log: ErrorLog,
) -> Result<BatchReport, ErrorLogError>
where
    G: GitOperations + ?Sized,
{
    let mut outcomes = Vec::with_capacity(repos.len());

    for repo in repos {
        let span = info_span!("repo", path = %repo.display());
        let _enter = span.enter();

        let status = match run_pipeline(git, repo, request) {
            Ok(report) => RepoStatus::Succeeded(report),
            Err(err) => {
                log.record(repo, &err)?;
                RepoStatus::Failed(err)
            }
        };

        let outcome = RepoOutcome {
            repo: repo.clone(),
            status,
        };
        match outcome.failed_step() {
            Some(step) => warn!(%step, "failed"),
            None => info!("applied"),
        }
        outcomes.push(outcome);
    }

    let error_log = log.finish()?;
    Ok(BatchReport {
        outcomes,
        error_log,
    })
}
