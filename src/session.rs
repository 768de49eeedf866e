//! Hosting-session adapter.
//!
//! The supervision loop talks to the hosting session through the [`Host`]
//! trait so tests can drive it with a scripted host instead of a live tmux
//! server.

use anyhow::{bail, Context, Result};
use std::process::Command;
use std::time::Duration;

use crate::config::{RESUME_COMMAND, SEND_DEBOUNCE_MS};

/// The external container the monitored agent runs in.
pub trait Host {
    /// Whether the hosting session still exists.
    fn session_exists(&self) -> Result<bool>;

    /// Send the resume instruction that continues the most recent
    /// conversation in place. The watchdog issues this once per detected
    /// crash and does not verify the resumed process beyond the next
    /// liveness check.
    fn send_resume(&self) -> Result<()>;
}

/// Host backed by a local tmux server.
pub struct TmuxHost {
    session_name: String,
}

impl TmuxHost {
    pub fn new(session_name: impl Into<String>) -> Self {
        Self {
            session_name: session_name.into(),
        }
    }
}

impl Host for TmuxHost {
    fn session_exists(&self) -> Result<bool> {
        let output = Command::new("tmux")
            .args(["has-session", "-t", &self.session_name])
            .output()
            .context("Failed to check if tmux session exists")?;

        Ok(output.status.success())
    }

    fn send_resume(&self) -> Result<()> {
        // Paste the command text literally, then send Enter after a short
        // settle delay. A combined send can race a pane still redrawing
        // after the crash.
        let paste = Command::new("tmux")
            .args(["send-keys", "-t", &self.session_name, "-l", RESUME_COMMAND])
            .output()
            .context("Failed to send resume command to tmux session")?;

        if !paste.status.success() {
            let stderr = String::from_utf8_lossy(&paste.stderr);
            bail!("Failed to send resume command: {stderr}");
        }

        std::thread::sleep(Duration::from_millis(SEND_DEBOUNCE_MS));

        let enter = Command::new("tmux")
            .args(["send-keys", "-t", &self.session_name, "Enter"])
            .output()
            .context("Failed to send Enter to tmux session")?;

        if !enter.status.success() {
            let stderr = String::from_utf8_lossy(&enter.stderr);
            bail!("Failed to send Enter: {stderr}");
        }

        Ok(())
    }
}
