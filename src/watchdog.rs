//! The supervision loop: sample external evidence, classify it, back off,
//! and recover from crashes by resuming the hosted conversation in place.

use anyhow::Result;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::config::WatchdogConfig;
use crate::process::pid_is_alive;
use crate::session::Host;
use crate::task::{CompletionCode, TaskDir};

/// External evidence gathered on one tick.
#[derive(Debug, Clone, Copy)]
pub struct Evidence {
    /// Tracked process id, if the record has been written.
    pub pid: Option<u32>,
    /// Liveness of the tracked process. Meaningful only when `pid` is set.
    pub pid_alive: bool,
    /// Whether the completion marker is present.
    pub completed: bool,
}

/// Per-tick classification, evaluated in strict priority order.
///
/// Session existence is checked before sampling, so a vanished host never
/// reaches classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickState {
    /// Session exists but the pid record has not been written yet. Startup
    /// race, not a failure.
    Starting,
    /// Completion marker present. Takes priority over liveness so a
    /// just-finished, just-exited process is never classified as a crash.
    Completed,
    /// Tracked process is gone and no completion marker exists.
    Crashed,
    Healthy,
}

/// Terminal result of the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The monitored task finished normally.
    Completed(CompletionCode),
    /// The hosting session disappeared; no further evidence is trustworthy.
    SessionGone,
    /// The wall-clock budget ran out before any other terminal state.
    DeadlineExceeded,
}

/// Classify one tick's evidence.
pub fn classify(evidence: &Evidence) -> TickState {
    if evidence.pid.is_none() {
        return TickState::Starting;
    }
    if evidence.completed {
        return TickState::Completed;
    }
    if !evidence.pid_alive {
        return TickState::Crashed;
    }
    TickState::Healthy
}

/// Exponential backoff: `base * 2^retry_count`, saturating.
///
/// There is no explicit cap; the deadline clamp bounds every sleep.
pub fn backoff_interval(retry_count: u32, base: Duration) -> Duration {
    base.saturating_mul(2u32.saturating_pow(retry_count))
}

/// Clamp a sleep so the loop never overshoots the deadline.
pub fn clamp_to_deadline(interval: Duration, now: Instant, deadline: Instant) -> Duration {
    interval.min(deadline.saturating_duration_since(now))
}

/// Time source for the loop, injected so tests can drive the deadline and
/// observe every sleep deterministically.
pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&self, duration: Duration);
}

/// Wall-clock time and blocking sleep.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Single-threaded watchdog over one hosted agent session.
pub struct Watchdog<H: Host, C: Clock> {
    config: WatchdogConfig,
    host: H,
    clock: C,
    task: TaskDir,
}

impl<H: Host, C: Clock> Watchdog<H, C> {
    pub fn new(config: WatchdogConfig, host: H, clock: C, task: TaskDir) -> Self {
        Self {
            config,
            host,
            clock,
            task,
        }
    }

    /// Sleep at most `interval`, never past the deadline. The clock is
    /// re-read here because the existence check and sample spend real time;
    /// clamping against a stale tick-start instant could overshoot.
    fn sleep_capped(&self, interval: Duration, deadline: Instant) {
        let now = self.clock.now();
        self.clock.sleep(clamp_to_deadline(interval, now, deadline));
    }

    fn sample(&self) -> Evidence {
        let pid = self.task.read_pid();
        Evidence {
            pid,
            pid_alive: pid.map(pid_is_alive).unwrap_or(false),
            completed: self.task.is_complete(),
        }
    }

    /// Run the loop to one of its three terminal outcomes.
    ///
    /// The deadline is measured from this call, not from task start. The
    /// retry counter lives only in this frame; a restarted watchdog begins
    /// from zero.
    pub fn run(&mut self) -> Result<Outcome> {
        let deadline = self.clock.now() + self.config.deadline_window;
        let mut retries: u32 = 0;

        loop {
            if self.clock.now() >= deadline {
                return Ok(Outcome::DeadlineExceeded);
            }

            if !self.host.session_exists()? {
                return Ok(Outcome::SessionGone);
            }

            let interval = backoff_interval(retries, self.config.base_interval);
            let evidence = self.sample();

            match classify(&evidence) {
                TickState::Starting => {
                    debug!("pid record not written yet, waiting for startup");
                    self.sleep_capped(self.config.starting_poll, deadline);
                }
                TickState::Completed => {
                    return Ok(Outcome::Completed(self.task.read_exit_code()));
                }
                TickState::Crashed => {
                    retries += 1;
                    info!(
                        retries,
                        backoff_secs = interval.as_secs(),
                        "tracked process died without completion marker, resuming"
                    );
                    if let Err(e) = self.host.send_resume() {
                        // The next tick's session check decides whether the
                        // host is gone for good.
                        warn!("resume instruction failed: {e:#}");
                    }
                    self.sleep_capped(self.config.resume_grace, deadline);
                }
                TickState::Healthy => {
                    debug!(interval_secs = interval.as_secs(), "agent healthy");
                    self.sleep_capped(interval, deadline);
                    retries = 0;
                }
            }
        }
    }
}
