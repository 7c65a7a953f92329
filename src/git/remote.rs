// cascade: apply changes across many git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! URLs reported by the remote during a push.
//!
//! ```text
//! remote: Create a pull request for 'feature/x' on GitHub by visiting:
//! remote:      https://github.com/org/repo/pull/new/feature/x
//!                  ^ last URL on a `remote:` line wins
//! ```

use std::process::Command;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::{GitError, GitResult};

static REMOTE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("static pattern is valid"));

/// Find the last URL printed on a `remote:` line.
#[must_use]
pub fn last_remote_url(output: &str) -> Option<&str> {
    output
        .lines()
        .map(|line| line.trim_start_matches([' ', '\t']))
        .filter(|line| line.starts_with("remote:"))
        .filter_map(|line| REMOTE_URL.find_iter(line).last())
        .last()
        .map(|m| m.as_str())
}

/// Open `url` with the platform's default handler.
///
/// # Errors
///
/// Returns a `GitError` if the opener cannot be started or exits non-zero.
pub fn open_in_browser(url: &str) -> GitResult<()> {
    let mut command = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(windows) {
        let mut command = Command::new("rundll32");
        command.arg("url.dll,FileProtocolHandler");
        command
    } else {
        Command::new("xdg-open")
    };
    command.arg(url);

    let display = format!("{command:?}");
    debug!(url, "opening remote url");
    let output = command.output().map_err(|source| GitError::Spawn {
        program: display.clone(),
        source,
    })?;
    if !output.status.success() {
        return Err(GitError::CommandFailed {
            command: display,
            status: output.status.to_string(),
            output: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(())
}
