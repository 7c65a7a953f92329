// cascade: apply changes across many git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Apply command implementation.
//!
//! ```text
//! ApplyArgs + Config
//!   --> build_request      (absolute change path, remote from config)
//!   --> validate_request   (fatal, nothing touched yet)
//!   --> run_batch          (per-repo failures recorded, not fatal)
//!   --> write_summary      (stdout)
//!   --> open remote URLs   (--open, best effort)
//! ```

use std::io::Write;

use tracing::{info, warn};

use crate::apply::batch::{BatchReport, run_batch};
use crate::apply::error_log::ErrorLog;
use crate::apply::report::write_summary;
use crate::apply::request::{ApplyFlags, ApplyRequest, ChangeSource};
use crate::cli::apply::ApplyArgs;
use crate::config::Config;
use crate::error::{CascadeError, CascadeResult, Result, ValidationFailure};
use crate::git::backend::{GitOperations, ShellBackend};
use crate::git::remote::open_in_browser;
use crate::validation::{HostCapabilities, ensure_git_available, validate_request};

/// Main handler for the apply command, using the `git` CLI and stdout.
///
/// # Errors
///
/// Returns an error if `git` is missing, validation fails, the error log
/// cannot be written, or the summary cannot be printed. Failing
/// repositories are not errors.
pub fn run_apply_command(args: &ApplyArgs, config: &Config) -> Result<()> {
    ensure_git_available().map_err(ValidationFailure::from).map_err(CascadeError::from)?;

    let mut stdout = std::io::stdout().lock();
    let report = run_apply(
        &ShellBackend::new(),
        HostCapabilities::detect(),
        args,
        config,
        &mut stdout,
    )?;

    if report.failure_count() > 0 {
        warn!(
            failed = report.failure_count(),
            total = report.outcomes.len(),
            "some repositories failed"
        );
    }
    Ok(())
}

/// Resolve the request from arguments and configuration.
///
/// # Errors
///
/// Returns a validation error if the change source is ambiguous, or an I/O
/// error if its path cannot be made absolute.
pub fn build_request(args: &ApplyArgs, config: &Config) -> CascadeResult<ApplyRequest> {
    let source = ChangeSource::from_options(args.patch.clone(), args.script.clone())
        .map_err(ValidationFailure::from)?
        .to_absolute()?;

    Ok(ApplyRequest::builder()
        .source(source)
        .branch(args.branch.as_str())
        .message(args.message.as_str())
        .maybe_base_branch(args.base_branch.clone())
        .remote(config.apply.remote.as_str())
        .flags(args.flags())
        .build())
}

/// Validate, run the batch, and write the summary to `out`.
///
/// # Errors
///
/// Returns an error if validation fails, the error log cannot be written,
/// or writing to `out` fails.
pub fn run_apply<G, W>(
    git: &G,
    host: HostCapabilities,
    args: &ApplyArgs,
    config: &Config,
    out: &mut W,
) -> Result<BatchReport>
where
    G: GitOperations + ?Sized,
    W: Write,
{
    let request = build_request(args, config)?;
    let repos = args.repos.as_slice();

    validate_request(git, host, &request, repos).map_err(CascadeError::from)?;
    info!(
        repos = repos.len(),
        branch = request.branch(),
        "applying {}",
        request.source().path().display()
    );

    let log = ErrorLog::new(config.apply.error_log_dir());
    let report = run_batch(git, &request, repos, log).map_err(CascadeError::from)?;

    write_summary(out, &report).map_err(CascadeError::from)?;
    out.flush().map_err(CascadeError::from)?;

    if request.has(ApplyFlags::OPEN_REMOTE_URL) {
        open_remote_urls(&report);
    }
    Ok(report)
}

fn open_remote_urls(report: &BatchReport) {
    for outcome in &report.outcomes {
        let Some(url) = outcome.remote_url() else {
            continue;
        };
        if let Err(e) = open_in_browser(url) {
            warn!(repo = %outcome.repo().display(), url, "failed to open URL: {e}");
        }
    }
}
