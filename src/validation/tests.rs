// cascade: apply changes across many git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};

use super::{
    HostCapabilities, ensure_git_available, validate_branch_name, validate_file,
    validate_repository, validate_request,
};
use crate::apply::request::{ApplyRequest, ChangeSource};
use crate::error::chain::ErrorTree;
use crate::error::{BranchNameRule, FileKind, ValidationError};
use crate::git::backend::ShellBackend;
use crate::git::backend::recording::{Op, RecordingBackend};
use crate::git::test_utils::{init_repo, temp_dir};

const SCRIPTS: HostCapabilities = HostCapabilities { scripts: true };
const NO_SCRIPTS: HostCapabilities = HostCapabilities { scripts: false };

fn request(source: ChangeSource, branch: &str) -> ApplyRequest {
    ApplyRequest::builder()
        .source(source)
        .branch(branch)
        .message("Change")
        .build()
}

#[test]
fn test_valid_branch_names() {
    for name in ["feature/ok-name", "main", "release-1.2", "user/feature_x", "a.b"] {
        assert_eq!(validate_branch_name(name), Ok(()), "{name}");
    }
}

#[test]
fn test_invalid_branch_names() {
    let cases = [
        ("", BranchNameRule::Empty),
        (".hidden", BranchNameRule::LeadingDot),
        ("feature..x", BranchNameRule::DoubleDot),
        ("feature/", BranchNameRule::TrailingSlash),
        ("feature.lock", BranchNameRule::LockSuffix),
        ("feature branch", BranchNameRule::InvalidCharacter),
        ("feature~1", BranchNameRule::InvalidCharacter),
        ("feature:x", BranchNameRule::InvalidCharacter),
        ("feature^", BranchNameRule::InvalidCharacter),
        ("what?", BranchNameRule::InvalidCharacter),
        ("glob*", BranchNameRule::InvalidCharacter),
        ("ref[0]", BranchNameRule::InvalidCharacter),
        ("back\\slash", BranchNameRule::InvalidCharacter),
        ("tab\there", BranchNameRule::InvalidCharacter),
        ("del\x7F", BranchNameRule::InvalidCharacter),
    ];
    for (name, rule) in cases {
        assert_eq!(validate_branch_name(name), Err(rule), "{name:?}");
    }
}

#[test]
fn test_validate_file_patch() {
    let temp = temp_dir();
    let patch = temp.path().join("change.patch");

    assert!(matches!(
        validate_file(&patch, FileKind::Patch),
        Err(ValidationError::FileNotFound { kind: FileKind::Patch, .. })
    ));

    std::fs::write(&patch, "diff").unwrap();
    assert!(validate_file(&patch, FileKind::Patch).is_ok());

    assert!(matches!(
        validate_file(temp.path(), FileKind::Patch),
        Err(ValidationError::FileIsDirectory { .. })
    ));
}

#[cfg(unix)]
#[test]
fn test_validate_file_script_needs_exec_bit() {
    use std::os::unix::fs::PermissionsExt;

    let temp = temp_dir();
    let script = temp.path().join("script.sh");
    std::fs::write(&script, "#!/bin/sh\n").unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o644)).unwrap();

    let err = validate_file(&script, FileKind::Script).unwrap_err();
    assert!(matches!(err, ValidationError::ScriptNotExecutable { .. }));
    assert!(err.to_string().starts_with("script file is not executable: "));

    // Patches never need the bit
    assert!(validate_file(&script, FileKind::Patch).is_ok());

    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    assert!(validate_file(&script, FileKind::Script).is_ok());
}

#[test]
fn test_validate_repository() {
    let temp = temp_dir();
    let repo = temp.path().join("repo");
    let plain = temp.path().join("plain");
    std::fs::create_dir(&plain).unwrap();
    let file = temp.path().join("file.txt");
    std::fs::write(&file, "x").unwrap();
    init_repo(&repo);

    assert!(validate_repository(&ShellBackend, &repo).is_ok());
    assert!(matches!(
        validate_repository(&ShellBackend, &temp.path().join("missing")),
        Err(ValidationError::RepoNotFound { .. })
    ));
    assert!(matches!(
        validate_repository(&ShellBackend, &file),
        Err(ValidationError::RepoNotDirectory { .. })
    ));
    assert!(matches!(
        validate_repository(&ShellBackend, &plain),
        Err(ValidationError::NotARepository { .. })
    ));
}

#[test]
fn test_validate_repository_skips_git_for_missing_path() {
    let git = RecordingBackend::new();
    let _ = validate_repository(&git, Path::new("/definitely/not/here"));
    assert_eq!(git.total_calls(), 0);
}

#[test]
fn test_request_collects_every_problem() {
    let temp = temp_dir();
    let missing_repo = temp.path().join("nope");
    let request = ApplyRequest::builder()
        .source(ChangeSource::Patch(temp.path().join("missing.patch")))
        .branch("bad branch")
        .base_branch("..")
        .message("  ")
        .build();

    let failure =
        validate_request(&RecordingBackend::new(), SCRIPTS, &request, &[missing_repo]).unwrap_err();

    assert_eq!(failure.problems.len(), 5);
    assert!(matches!(failure.problems[0], ValidationError::FileNotFound { .. }));
    assert!(matches!(failure.problems[3], ValidationError::EmptyMessage));
    assert!(matches!(failure.problems[4], ValidationError::RepoNotFound { .. }));

    let lines = ErrorTree::from(&failure).render();
    assert_eq!(lines[0], "- pre-flight validation failed (5 problems)");
    assert!(lines.contains(&"  - invalid target branch name 'bad branch'".to_string()));
    assert!(lines.contains(&"    - branch name contains invalid characters".to_string()));
    assert!(lines.contains(&"  - invalid base branch name '..'".to_string()));
}

#[test]
fn test_request_without_repositories() {
    let temp = temp_dir();
    let patch = temp.path().join("change.patch");
    std::fs::write(&patch, "diff").unwrap();

    let failure = validate_request(
        &RecordingBackend::new(),
        SCRIPTS,
        &request(ChangeSource::Patch(patch), "feature/x"),
        &[],
    )
    .unwrap_err();
    assert!(matches!(failure.problems[..], [ValidationError::NoRepositories]));
}

#[test]
fn test_script_rejected_without_host_support() {
    let temp = temp_dir();
    let script = temp.path().join("script.sh");
    std::fs::write(&script, "#!/bin/sh\n").unwrap();

    let failure = validate_request(
        &RecordingBackend::new(),
        NO_SCRIPTS,
        &request(ChangeSource::Script(script), "feature/x"),
        &[PathBuf::from(temp.path())],
    )
    .unwrap_err();

    assert!(matches!(failure.problems[..], [ValidationError::ScriptUnsupported]));
}

#[test]
fn test_valid_request_touches_only_repository_check() {
    let temp = temp_dir();
    let patch = temp.path().join("change.patch");
    std::fs::write(&patch, "diff").unwrap();
    let repos = vec![temp.path().to_path_buf()];

    let git = RecordingBackend::new();
    validate_request(&git, SCRIPTS, &request(ChangeSource::Patch(patch), "feature/x"), &repos)
        .expect("valid request");
    assert_eq!(git.ops_for(temp.path()), [Op::IsRepository]);
}

#[test]
fn test_repository_check_failure_is_reported() {
    let temp = temp_dir();
    let patch = temp.path().join("change.patch");
    std::fs::write(&patch, "diff").unwrap();
    let git = RecordingBackend::new().fail(temp.path(), Op::IsRepository);

    let failure = validate_request(
        &git,
        SCRIPTS,
        &request(ChangeSource::Patch(patch), "feature/x"),
        &[temp.path().to_path_buf()],
    )
    .unwrap_err();
    assert!(matches!(
        failure.problems[..],
        [ValidationError::NotARepository { .. }]
    ));
}

#[test]
fn test_git_is_on_path() {
    assert!(ensure_git_available().is_ok());
}

#[test]
fn test_host_detection() {
    assert_eq!(HostCapabilities::detect().scripts, !cfg!(windows));
}
