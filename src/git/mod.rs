// cascade: apply changes across many git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations module.
//!
//! ```text
//!         apply::pipeline
//!               |
//!               v
//!      ,------------------,
//!      | GitOperations    |  (trait, &self)
//!      '--+-----------+---'
//!         |           |
//!         v           v
//!   ShellBackend   RecordingBackend
//!   git CLI,       in-memory double
//!   user scripts   (tests only)
//!
//!   remote.rs   URLs printed by the remote on push
//! ```
//!
//! Every operation is one blocking attempt: no retries, no timeouts.

pub mod backend;
pub mod remote;

#[cfg(test)]
pub(crate) mod test_utils;
