//! # Timers
//!
//! - [`Timer`]: simulation time, advanced only by ticks, with a multiplier
//! - [`SystemTimer`]: wall-clock time for profiling
//! - [`ScopedTimer`]: logs how long a scope took when dropped

use std::time::{Duration, Instant};

use super::updater::Updateable;

/// Simulation-time stopwatch.
///
/// Only moves when ticked, so every read within one frame returns the same
/// value. The multiplier scales each tick (0 pauses the timer).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timer {
    elapsed: f32,
    multiplier: f32,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Creates a stopped-at-zero timer running at normal speed.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            elapsed: 0.0,
            multiplier: 1.0,
        }
    }

    /// Resets the elapsed time to zero. The multiplier is kept.
    pub fn restart(&mut self) {
        self.elapsed = 0.0;
    }

    /// Returns the scaled time accumulated since the last restart.
    #[inline]
    #[must_use]
    pub const fn elapsed_seconds(&self) -> f32 {
        self.elapsed
    }

    /// Returns the current time multiplier.
    #[inline]
    #[must_use]
    pub const fn time_multiplier(&self) -> f32 {
        self.multiplier
    }

    /// Sets the time multiplier. Negative values are clamped to 0.
    pub fn set_time_multiplier(&mut self, multiplier: f32) {
        self.multiplier = multiplier.max(0.0);
    }

    /// Advances by `delta_seconds` scaled by the multiplier.
    pub fn tick(&mut self, delta_seconds: f32) {
        self.elapsed += delta_seconds * self.multiplier;
    }
}

impl Updateable for Timer {
    fn on_update(&mut self, delta_seconds: f32) {
        self.tick(delta_seconds);
    }
}

/// Wall-clock stopwatch.
#[derive(Clone, Copy, Debug)]
pub struct SystemTimer {
    start: Instant,
}

impl Default for SystemTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemTimer {
    /// Starts a new stopwatch.
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Restarts from now.
    pub fn restart(&mut self) {
        self.start = Instant::now();
    }

    /// Returns the time since start.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Returns the time since start in milliseconds.
    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed().as_secs_f64() * 1000.0
    }
}

/// Logs the time spent in a scope at `debug` level when dropped.
///
/// ```rust
/// use uzu_core::ScopedTimer;
///
/// {
///     let _timer = ScopedTimer::new("rebuild pools");
///     // ~ code being profiled ~
/// } // logs "rebuild pools: 0.012(ms)"
/// ```
#[derive(Debug)]
pub struct ScopedTimer {
    label: &'static str,
    timer: SystemTimer,
}

impl ScopedTimer {
    /// Starts timing a scope.
    #[must_use]
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            timer: SystemTimer::new(),
        }
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        tracing::debug!("{}: {:.3}(ms)", self.label, self.timer.elapsed_ms());
    }
}
