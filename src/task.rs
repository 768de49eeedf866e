//! Filesystem contract inside the task directory.
//!
//! External collaborators write three files the watchdog only ever reads:
//! `pid` (tracked process id), `exit_code` (written strictly before `done`),
//! and `done` (presence alone signals completion).

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Completion status recorded by the external wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionCode {
    Code(i32),
    Unknown,
}

impl fmt::Display for CompletionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionCode::Code(code) => write!(f, "{code}"),
            CompletionCode::Unknown => write!(f, "unknown"),
        }
    }
}

/// Read-only view of a task directory.
#[derive(Debug, Clone)]
pub struct TaskDir {
    root: PathBuf,
}

impl TaskDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Tracked process id, or `None` while the record has not been written
    /// (or is unreadable). Absence is startup evidence, not an error.
    pub fn read_pid(&self) -> Option<u32> {
        let raw = fs::read_to_string(self.root.join("pid")).ok()?;
        raw.trim().parse().ok()
    }

    /// Whether the completion marker is present. Authoritative once observed:
    /// the tracked process may legitimately have exited by then.
    pub fn is_complete(&self) -> bool {
        self.root.join("done").exists()
    }

    /// Completion code recorded alongside the marker. The external wrapper
    /// writes `exit_code` before creating `done`, so this is consistent
    /// whenever [`is_complete`](Self::is_complete) returns true. Absence or
    /// unreadability maps to [`CompletionCode::Unknown`].
    pub fn read_exit_code(&self) -> CompletionCode {
        match fs::read_to_string(self.root.join("exit_code")) {
            Ok(raw) => raw
                .trim()
                .parse()
                .map(CompletionCode::Code)
                .unwrap_or(CompletionCode::Unknown),
            Err(_) => CompletionCode::Unknown,
        }
    }
}
