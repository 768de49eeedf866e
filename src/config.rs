//! Watchdog policy configuration

use std::time::Duration;

/// Command sent to the hosting session to continue the interrupted
/// conversation in place. A fresh launch would lose prior context.
pub const RESUME_COMMAND: &str = "claude --continue";

/// Settle delay between pasting the resume text and sending Enter.
pub const SEND_DEBOUNCE_MS: u64 = 200;

/// Timing policy for the supervision loop.
#[derive(Debug, Clone)]
pub struct WatchdogConfig {
    /// Poll interval while the agent is healthy; doubles per consecutive crash.
    pub base_interval: Duration,
    /// Total wall-clock budget, measured from watchdog start (not task start).
    pub deadline_window: Duration,
    /// Poll interval while waiting for the pid record to be written.
    pub starting_poll: Duration,
    /// Startup allowance after a resume instruction, before the next sample.
    pub resume_grace: Duration,
}

impl Default for WatchdogConfig {
    fn default() -> Self {
        Self {
            base_interval: Duration::from_secs(180),
            deadline_window: Duration::from_secs(18_000),
            starting_poll: Duration::from_secs(5),
            resume_grace: Duration::from_secs(10),
        }
    }
}
