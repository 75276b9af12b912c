//! Bounded polling for the shell to catch up with the filesystem.
//!
//! The desktop offers no "changes applied" notification, so the engine polls
//! the item count until a condition holds. The clock is injectable so tests
//! can drive the loop without sleeping.

use std::time::{Duration, Instant};

use crate::config::WaitConfig;
use crate::core::{Error, Result};

/// Source of time for wait loops.
pub trait Clock {
    /// Current instant.
    fn now(&self) -> Instant;

    /// Blocks for `duration`.
    fn sleep(&self, duration: Duration);
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant { Instant::now() }

    fn sleep(&self, duration: Duration) { std::thread::sleep(duration); }
}

/// How long and how often to poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    /// Give up after this long. `None` waits forever.
    pub timeout: Option<Duration>,
    /// Delay between two polls.
    pub poll_interval: Duration,
}

impl WaitPolicy {
    /// Polls forever, matching a shell that is trusted to eventually update.
    #[must_use]
    pub const fn unbounded(poll_interval: Duration) -> Self {
        Self { timeout: None, poll_interval }
    }

    /// Polls until `timeout` has elapsed.
    #[must_use]
    pub const fn bounded(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            poll_interval,
        }
    }
}

impl Default for WaitPolicy {
    fn default() -> Self { Self::from(&WaitConfig::default()) }
}

impl From<&WaitConfig> for WaitPolicy {
    fn from(config: &WaitConfig) -> Self {
        let poll_interval = Duration::from_millis(config.poll_interval_ms);
        if config.timeout_ms == 0 {
            Self::unbounded(poll_interval)
        } else {
            Self::bounded(Duration::from_millis(config.timeout_ms), poll_interval)
        }
    }
}

/// Runs polling loops under a [`WaitPolicy`].
#[derive(Debug, Clone)]
pub struct Waiter<C = SystemClock> {
    policy: WaitPolicy,
    clock: C,
}

impl Waiter<SystemClock> {
    /// Creates a waiter on the wall clock.
    #[must_use]
    pub const fn new(policy: WaitPolicy) -> Self { Self { policy, clock: SystemClock } }
}

impl<C: Clock> Waiter<C> {
    /// Creates a waiter on a custom clock.
    pub const fn with_clock(policy: WaitPolicy, clock: C) -> Self { Self { policy, clock } }

    /// Polls `probe` until it returns `true`.
    ///
    /// The probe runs once before any sleep, so an already-satisfied condition
    /// returns immediately. Returns the number of probes made.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WaitTimeout`] once the timeout elapses, or the first
    /// error returned by `probe`.
    pub fn until<F>(&self, what: &str, mut probe: F) -> Result<u32>
    where
        F: FnMut() -> Result<bool>,
    {
        let started = self.clock.now();
        let mut probes = 0u32;

        loop {
            probes = probes.saturating_add(1);
            if probe()? {
                tracing::debug!(what, probes, "wait satisfied");
                return Ok(probes);
            }

            let waited = self.clock.now().saturating_duration_since(started);
            if self.policy.timeout.is_some_and(|timeout| waited >= timeout) {
                tracing::warn!(what, ?waited, probes, "gave up waiting for the desktop");
                return Err(Error::wait_timeout(what, waited));
            }

            self.clock.sleep(self.policy.poll_interval);
        }
    }
}
