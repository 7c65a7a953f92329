// cascade: apply changes across many git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shared helpers for tests that drive the real `git` binary.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

pub(crate) const NEW_FILE_PATCH: &str = "\
diff --git a/test.txt b/test.txt
new file mode 100644
index 0000000..9daeafb
--- /dev/null
+++ b/test.txt
@@ -0,0 +1 @@
+test
";

pub(crate) fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

/// Run git in `dir`, panicking with its output on failure.
pub(crate) fn run_git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Initialize a repository on `main` with one committed README.
pub(crate) fn init_repo(path: &Path) {
    std::fs::create_dir_all(path).expect("failed to create repo dir");
    run_git(path, &["init", "-q", "-b", "main"]);
    run_git(path, &["config", "user.email", "test@example.com"]);
    run_git(path, &["config", "user.name", "Test User"]);
    run_git(path, &["config", "commit.gpgsign", "false"]);
    std::fs::write(path.join("README.md"), "# Test Repository").expect("failed to write README");
    run_git(path, &["add", "README.md"]);
    run_git(path, &["commit", "-q", "-m", "Initial commit"]);
}

pub(crate) fn current_branch(repo: &Path) -> String {
    run_git(repo, &["branch", "--show-current"])
}

pub(crate) fn last_commit_message(repo: &Path) -> String {
    run_git(repo, &["log", "-1", "--pretty=%s"])
}
