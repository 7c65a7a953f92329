// cascade: apply changes across many git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};

use super::{Step, run_pipeline};
use crate::apply::request::{ApplyFlags, ApplyRequest, ChangeSource};
use crate::git::backend::StashOutcome;
use crate::git::backend::recording::{Op, RecordingBackend};

const REPO: &str = "repo1";

fn patch_request(flags: ApplyFlags) -> ApplyRequest {
    ApplyRequest::builder()
        .source(ChangeSource::Patch(PathBuf::from("/tmp/change.patch")))
        .branch("feature/test-patch")
        .message("Add test.txt")
        .flags(flags)
        .build()
}

#[test]
fn test_minimal_chain() {
    let git = RecordingBackend::new();
    let report = run_pipeline(&git, Path::new(REPO), &patch_request(ApplyFlags::empty()))
        .expect("pipeline");

    assert_eq!(
        git.ops_for(Path::new(REPO)),
        [Op::CheckoutNewBranch, Op::ApplyPatch, Op::Commit]
    );
    assert_eq!(report.stash, None);
    assert_eq!(report.remote_url, None);
}

#[test]
fn test_full_chain_order() {
    let git = RecordingBackend::new();
    let request = ApplyRequest::builder()
        .source(ChangeSource::Patch(PathBuf::from("/tmp/change.patch")))
        .branch("feature/x")
        .message("msg")
        .base_branch("main")
        .flags(ApplyFlags::STASH | ApplyFlags::PULL | ApplyFlags::PUSH)
        .build();

    run_pipeline(&git, Path::new(REPO), &request).expect("pipeline");

    assert_eq!(
        git.ops_for(Path::new(REPO)),
        [
            Op::Stash,
            Op::CheckoutExistingBranch,
            Op::Pull,
            Op::CheckoutNewBranch,
            Op::ApplyPatch,
            Op::Commit,
            Op::Push,
        ]
    );
}

#[test]
fn test_script_replaces_patch_step() {
    let git = RecordingBackend::new();
    let request = ApplyRequest::builder()
        .source(ChangeSource::Script(PathBuf::from("/tmp/script.sh")))
        .branch("feature/script")
        .message("Run script")
        .build();

    run_pipeline(&git, Path::new(REPO), &request).expect("pipeline");

    let ops = git.ops_for(Path::new(REPO));
    assert!(ops.contains(&Op::ExecuteScript));
    assert!(!ops.contains(&Op::ApplyPatch));
}

#[test]
fn test_checkout_failure_halts_chain() {
    let git = RecordingBackend::new().fail(REPO, Op::CheckoutNewBranch);
    let err = run_pipeline(&git, Path::new(REPO), &patch_request(ApplyFlags::PUSH)).unwrap_err();

    assert_eq!(err.step, Step::BranchCheckout);
    assert_eq!(err.to_string(), "branch checkout failed");
    assert_eq!(err.source.output(), Some("simulated CheckoutNewBranch failure"));
    assert_eq!(git.ops_for(Path::new(REPO)), [Op::CheckoutNewBranch]);
}

#[test]
fn test_commit_failure_skips_push() {
    let git = RecordingBackend::new().fail(REPO, Op::Commit);
    let err = run_pipeline(&git, Path::new(REPO), &patch_request(ApplyFlags::PUSH)).unwrap_err();

    assert_eq!(err.step, Step::Commit);
    assert!(!git.ops_for(Path::new(REPO)).contains(&Op::Push));
}

#[test]
fn test_stash_outcome_is_reported() {
    let clean = RecordingBackend::new();
    let report = run_pipeline(&clean, Path::new(REPO), &patch_request(ApplyFlags::STASH))
        .expect("pipeline");
    assert_eq!(report.stash, Some(StashOutcome::Clean));
    assert_eq!(clean.ops_for(Path::new(REPO)).len(), 4);

    let dirty = RecordingBackend::new().dirty(REPO);
    let report = run_pipeline(&dirty, Path::new(REPO), &patch_request(ApplyFlags::STASH))
        .expect("pipeline");
    assert_eq!(report.stash, Some(StashOutcome::Stashed));
}

#[test]
fn test_pull_failure_reports_pull_step() {
    let git = RecordingBackend::new().fail(REPO, Op::Pull);
    let err = run_pipeline(&git, Path::new(REPO), &patch_request(ApplyFlags::PULL)).unwrap_err();

    assert_eq!(err.step, Step::Pull);
    assert_eq!(err.to_string(), "pull latest failed");
    assert!(!git.ops_for(Path::new(REPO)).contains(&Op::CheckoutNewBranch));
}

#[test]
fn test_push_output_yields_remote_url() {
    let git = RecordingBackend::new().push_output(
        "remote:\nremote: Create a pull request for 'feature/test-patch' on GitHub by visiting:\n\
         remote:      https://github.com/org/repo/pull/new/feature/test-patch\nremote:",
    );
    let report =
        run_pipeline(&git, Path::new(REPO), &patch_request(ApplyFlags::PUSH)).expect("pipeline");

    assert_eq!(
        report.remote_url.as_deref(),
        Some("https://github.com/org/repo/pull/new/feature/test-patch")
    );
}

#[test]
fn test_step_names() {
    let names: Vec<&str> = [
        Step::Stash,
        Step::BaseCheckout,
        Step::Pull,
        Step::BranchCheckout,
        Step::ApplyPatch,
        Step::ExecuteScript,
        Step::Commit,
        Step::Push,
    ]
    .into_iter()
    .map(Step::as_str)
    .collect();
    insta::assert_debug_snapshot!(names, @r#"
    [
        "stash",
        "base branch checkout",
        "pull latest",
        "branch checkout",
        "patch application",
        "script execution",
        "commit",
        "push",
    ]
    "#);
}
