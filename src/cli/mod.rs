// cascade: apply changes across many git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! cascade [global options] <command>
//! version
//! options
//! apply (--patch P | --script S) --branch B --message M [flags] REPO...
//! ```

pub mod apply;
pub mod global;


use clap::{Parser, Subcommand};

use crate::cli::apply::ApplyArgs;
use crate::cli::global::GlobalOptions;

/// Apply one patch or script across many git repositories.
#[derive(Debug, Parser)]
#[command(
    name = "cascade",
    author,
    version,
    about = "Apply a patch or script across many git repositories",
    long_about = "cascade Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  For every repository, cascade checks out a branch, applies a\n\
                  patch or runs a script, commits the result, and optionally\n\
                  pushes it. Repositories are processed one after another; a\n\
                  failing repository is reported and the rest still run.",
    after_help = "CONFIGURATION:\n\n\
                  cascade reads `cascade.toml` from the current directory if it\n\
                  exists, then every file given with --config (before the\n\
                  command), in order. Any key can also be set through\n\
                  CASCADE_<SECTION>__<KEY> environment variables, e.g.\n\
                  CASCADE_APPLY__REMOTE=upstream. Command-line flags take\n\
                  precedence over all of these."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    Version,

    /// Lists all options and their effective values.
    Options,

    /// Applies a patch or script to each repository and commits the result.
    Apply(ApplyArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
