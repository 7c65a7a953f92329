// cascade: apply changes across many git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Indented error cause trees.
//!
//! ```text
//! - branch checkout failed               depth 0
//!   - 'git checkout -B x' exited with 128 depth 1
//!     fatal: ...                          (continuation line)
//! ```
//!
//! Single-cause chains come from [`std::error::Error::source`]; aggregates
//! such as [`ValidationFailure`] list their children explicitly.

use std::error::Error;

use super::ValidationFailure;

/// An error message with zero or more nested causes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorTree {
    message: String,
    causes: Vec<Self>,
}

impl ErrorTree {
    /// A node whose causes are given explicitly.
    pub fn aggregate(message: impl Into<String>, causes: Vec<Self>) -> Self {
        Self {
            message: message.into(),
            causes,
        }
    }

    /// Build a tree from an error and its `source()` chain.
    #[must_use]
    pub fn from_error(err: &(dyn Error + 'static)) -> Self {
        let causes = err.source().map(Self::from_error).into_iter().collect();
        Self {
            message: err.to_string(),
            causes,
        }
    }

    /// Render as `- message` lines, two spaces of indent per level.
    #[must_use]
    pub fn render(&self) -> Vec<String> {
        let mut lines = Vec::new();
        self.render_into(0, &mut lines);
        lines
    }

    fn render_into(&self, depth: usize, lines: &mut Vec<String>) {
        let indent = "  ".repeat(depth);
        let mut message_lines = self.message.lines();
        lines.push(format!("{indent}- {}", message_lines.next().unwrap_or_default()));
        for continuation in message_lines {
            lines.push(format!("{indent}  {continuation}"));
        }
        for cause in &self.causes {
            cause.render_into(depth + 1, lines);
        }
    }
}

impl From<&ValidationFailure> for ErrorTree {
    fn from(failure: &ValidationFailure) -> Self {
        let causes = failure
            .problems
            .iter()
            .map(|problem| Self::from_error(problem))
            .collect();
        Self::aggregate(failure.to_string(), causes)
    }
}
