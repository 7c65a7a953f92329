// cascade: apply changes across many git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Apply command arguments.
//!
//! ```text
//! apply --patch FILE  | --script FILE     exactly one
//!       --branch NAME --message TEXT      required
//!       [--base-branch NAME] [--pull] [--push] [--no-verify] [--stash] [--open]
//!       REPO...
//! ```

use std::path::PathBuf;

use clap::{ArgGroup, Args};

use crate::apply::request::ApplyFlags;

/// Arguments for the `apply` command.
#[derive(Debug, Clone, Args)]
#[command(group(ArgGroup::new("change").required(true).multiple(false).args(["patch", "script"])))]
pub struct ApplyArgs {
    /// Patch file to apply with `git apply`.
    #[arg(short = 'p', long = "patch", value_name = "FILE")]
    pub patch: Option<PathBuf>,

    /// Executable run inside each repository.
    #[arg(short = 's', long = "script", value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Branch to create (or reset) in every repository.
    #[arg(short = 'b', long = "branch", value_name = "NAME")]
    pub branch: String,

    /// Commit message.
    #[arg(short = 'm', long = "message", value_name = "TEXT")]
    pub message: String,

    /// Existing branch to start from.
    #[arg(long = "base-branch", value_name = "NAME")]
    pub base_branch: Option<String>,

    /// Fast-forward pull before creating the branch.
    #[arg(long)]
    pub pull: bool,

    /// Push the branch after committing.
    #[arg(long)]
    pub push: bool,

    /// Skip commit and push hooks.
    #[arg(long = "no-verify")]
    pub no_verify: bool,

    /// Stash local changes first.
    #[arg(long)]
    pub stash: bool,

    /// Open the URL the remote prints after a push (usually a pull request link).
    #[arg(long, requires = "push")]
    pub open: bool,

    /// Repositories to process, in order.
    #[arg(value_name = "REPO", required = true, num_args = 1..)]
    pub repos: Vec<PathBuf>,
}

impl ApplyArgs {
    /// Behavior switches selected on the command line.
    #[must_use]
    pub fn flags(&self) -> ApplyFlags {
        let mut flags = ApplyFlags::empty();
        flags.set(ApplyFlags::STASH, self.stash);
        flags.set(ApplyFlags::PULL, self.pull);
        flags.set(ApplyFlags::PUSH, self.push);
        flags.set(ApplyFlags::NO_VERIFY, self.no_verify);
        flags.set(ApplyFlags::OPEN_REMOTE_URL, self.open);
        flags
    }
}
