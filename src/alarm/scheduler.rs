//! Blocking alarm wait
//!
//! The wait is the whole dialogue turn: nothing else is read until the
//! alarm fires. Only process termination interrupts it.

use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info};

use super::AlarmTarget;

/// Default interval between wall-clock checks
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Wall-clock source the scheduler polls
#[allow(async_fn_in_trait)]
pub trait Clock {
    /// Current local date and time
    fn now(&self) -> NaiveDateTime;

    async fn sleep(&self, duration: Duration);
}

/// The host's local clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Polls the clock until an alarm target is reached
#[derive(Debug, Clone)]
pub struct AlarmScheduler {
    poll_interval: Duration,
}

impl AlarmScheduler {
    pub fn new(poll_interval: Duration) -> Self {
        Self { poll_interval }
    }

    /// Wait until the clock reads the target `HH:MM`.
    ///
    /// A target earlier than the current time is simply reached the next
    /// day. Returns the number of clock checks made.
    pub async fn wait_for<C: Clock>(&self, target: AlarmTarget, clock: &C) -> u64 {
        info!(%target, poll_secs = self.poll_interval.as_secs(), "alarm wait started");

        let mut polls = 0;
        loop {
            polls += 1;
            let now = clock.now();
            if target.matches(now.time()) {
                info!(%target, %now, polls, "alarm reached");
                return polls;
            }

            debug!(%target, %now, "alarm not yet due");
            clock.sleep(self.poll_interval).await;
        }
    }
}

impl Default for AlarmScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}
