// cascade: apply changes across many git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Summary table printed after a batch.
//!
//! ```text
//!
//! ok   ./repo1
//! fail ./repo2
//!
//! Error details: /tmp/cascade-apply-1a2b3c.log
//! ```

use std::io::{self, Write};

use super::batch::BatchReport;

/// Fixed-width status token for one outcome.
#[must_use]
pub const fn status_token(success: bool) -> &'static str {
    if success { "ok" } else { "fail" }
}

/// Write one line per repository, then the error log path when there is one.
///
/// # Errors
///
/// Returns an I/O error if writing to `out` fails.
pub fn write_summary(out: &mut impl Write, report: &BatchReport) -> io::Result<()> {
    writeln!(out)?;
    for outcome in &report.outcomes {
        writeln!(
            out,
            "{:<4} {}",
            status_token(outcome.is_success()),
            outcome.repo().display()
        )?;
    }

    if let Some(path) = &report.error_log {
        writeln!(out, "\nError details: {}", path.display())?;
    }
    Ok(())
}
