// cascade: apply changes across many git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Applying one change to many repositories.
//!
//! ```text
//! ApplyRequest (immutable, built once)
//!      |
//!      v
//! batch::run_batch --- for each repo, in order --->  pipeline::run_pipeline
//!      |                                              stash? -> base? -> pull?
//!      |                                              -> checkout -B -> patch|script
//!      |                                              -> commit -> push?
//!      v
//! [RepoOutcome]  --failures-->  ErrorLog (lazy temp file)
//!      |
//!      v
//! report::write_summary  "ok   repo" / "fail repo" + log path
//! ```

pub mod batch;
pub mod error_log;
pub mod pipeline;
pub mod report;
pub mod request;
