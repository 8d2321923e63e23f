//! Frame scheduler.
//!
//! An explicit object with a start/stop lifecycle instead of a timer
//! callback holding a weak reference to the renderer. The host polls
//! [`tick_due`](FrameScheduler::tick_due) from its event loop; the
//! scheduler only keeps the cadence, it never calls anything back.

use std::time::{Duration, Instant};

/// Keeps the render cadence for the single-threaded tick loop.
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    interval: Duration,
    /// Deadline of the next tick; `None` while stopped.
    next_tick: Option<Instant>,
    ticks_issued: u64,
}

impl FrameScheduler {
    /// Creates a stopped scheduler targeting `target_fps` ticks per
    /// second. A zero target is clamped to one.
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        let fps = target_fps.max(1);
        Self {
            interval: Duration::from_secs(1) / fps,
            next_tick: None,
            ticks_issued: 0,
        }
    }

    /// Starts the cadence; the first tick is due immediately.
    pub fn start(&mut self) {
        self.next_tick = Some(Instant::now());
        tracing::info!(interval_us = self.interval.as_micros() as u64, "scheduler started");
    }

    /// Stops the cadence. No ticks are due until the next `start`.
    pub fn stop(&mut self) {
        self.next_tick = None;
        tracing::info!(ticks = self.ticks_issued, "scheduler stopped");
    }

    /// Returns true while started.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.next_tick.is_some()
    }

    /// Reports whether a tick is due at `now`, and if so advances the
    /// deadline.
    ///
    /// Deadlines advance from the previous deadline to keep the cadence
    /// stable; after a long stall the next deadline is rebased on `now`
    /// rather than replaying the missed ticks.
    pub fn tick_due(&mut self, now: Instant) -> bool {
        let Some(deadline) = self.next_tick else {
            return false;
        };
        if now < deadline {
            return false;
        }

        let mut next = deadline + self.interval;
        if next <= now {
            next = now + self.interval;
        }
        self.next_tick = Some(next);
        self.ticks_issued += 1;
        true
    }

    /// Target interval between ticks.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Total ticks issued since construction.
    #[must_use]
    pub const fn ticks_issued(&self) -> u64 {
        self.ticks_issued
    }
}
