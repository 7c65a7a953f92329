// cascade: apply changes across many git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-run error log.
//!
//! ```text
//! ErrorLog::new(dir)        nothing on disk yet
//!   .record(repo, err)      first call creates dir/cascade-apply-XXXX.log
//!   .record(repo, err)      appends
//!   .finish()               flush, return Some(path) if created
//! ```
//!
//! Each entry is a local timestamp and the repository path, followed by the
//! indented cause tree:
//!
//! ```text
//! 2026/01/31 14:02:11 repo: ./service-a
//! - commit failed
//!   - 'git commit -m x' exited with exit status: 1
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::debug;

use crate::error::chain::ErrorTree;
use crate::error::ErrorLogError;

const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

struct OpenLog {
    path: PathBuf,
    writer: BufWriter<File>,
}

/// Lazily created, append-only failure log shared by a whole batch.
pub struct ErrorLog {
    dir: PathBuf,
    open: Option<OpenLog>,
}

impl ErrorLog {
    /// A log that will be created in `dir` on the first failure.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            open: None,
        }
    }

    /// Append one repository failure, creating the file if needed.
    ///
    /// # Errors
    ///
    /// Returns an `ErrorLogError` if the file cannot be created or written.
    pub fn record(
        &mut self,
        repo: &Path,
        err: &(dyn std::error::Error + 'static),
    ) -> Result<(), ErrorLogError> {
        let open = self.ensure_open()?;
        let mut lines = vec![format!(
            "{} repo: {}",
            Local::now().format(TIMESTAMP_FORMAT),
            repo.display()
        )];
        lines.extend(ErrorTree::from_error(err).render());
        lines.push(String::new());

        for line in lines {
            writeln!(open.writer, "{line}").map_err(|source| ErrorLogError::Write {
                path: open.path.clone(),
                source,
            })?;
        }
        Ok(())
    }

    /// Flush and close the log. Returns its path if it was ever created.
    ///
    /// # Errors
    ///
    /// Returns an `ErrorLogError` if buffered entries cannot be flushed.
    pub fn finish(self) -> Result<Option<PathBuf>, ErrorLogError> {
        let Some(mut open) = self.open else {
            return Ok(None);
        };
        open.writer.flush().map_err(|source| ErrorLogError::Write {
            path: open.path.clone(),
            source,
        })?;
        Ok(Some(open.path))
    }

    fn ensure_open(&mut self) -> Result<&mut OpenLog, ErrorLogError> {
        let open = match self.open.take() {
            Some(open) => open,
            None => self.create()?,
        };
        Ok(self.open.insert(open))
    }

    fn create(&self) -> Result<OpenLog, ErrorLogError> {
        let create_error = |source| ErrorLogError::Create {
            dir: self.dir.clone(),
            source,
        };
        let (file, path) = tempfile::Builder::new()
            .prefix("cascade-apply-")
            .suffix(".log")
            .tempfile_in(&self.dir)
            .map_err(create_error)?
            .keep()
            .map_err(|e| create_error(e.error))?;
        debug!(path = %path.display(), "created error log");
        Ok(OpenLog {
            path,
            writer: BufWriter::new(file),
        })
    }
}
