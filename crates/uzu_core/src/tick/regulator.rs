//! # Regulators
//!
//! Limit how often a piece of code runs, measured in ticked simulation time.
//!
//! ```text
//! ai_think.tick(delta);
//! if ai_think.is_ready() {   // at most N times per second
//!     plan_route();
//! }
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::timer::Timer;
use super::updater::Updateable;

/// Converts a rate into a period. Non-positive or NaN rates give 0, which
/// makes the regulator ready on every check.
fn period_for(updates_per_second: f32) -> f32 {
    if updates_per_second > 0.0 {
        1.0 / updates_per_second
    } else {
        0.0
    }
}

/// Fires at most `updates_per_second` times per second of ticked time.
///
/// # Example
///
/// ```rust
/// use uzu_core::Regulator;
///
/// let mut regulator = Regulator::new(2.0);
/// regulator.tick(0.25);
/// assert!(!regulator.is_ready());
/// regulator.tick(0.25);
/// assert!(regulator.is_ready());
/// assert!(!regulator.is_ready());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Regulator {
    timer: Timer,
    period: f32,
}

impl Regulator {
    /// Creates a regulator whose waiting period starts now.
    #[must_use]
    pub fn new(updates_per_second: f32) -> Self {
        Self {
            timer: Timer::new(),
            period: period_for(updates_per_second),
        }
    }

    /// Changes the rate. The running period is not restarted.
    pub fn set_update_rate(&mut self, updates_per_second: f32) {
        self.period = period_for(updates_per_second);
    }

    /// Returns the waiting period in seconds.
    #[inline]
    #[must_use]
    pub const fn update_period(&self) -> f32 {
        self.period
    }

    /// Returns the multiplier applied to ticked time.
    #[inline]
    #[must_use]
    pub const fn time_multiplier(&self) -> f32 {
        self.timer.time_multiplier()
    }

    /// Sets the multiplier applied to ticked time. Negative values pause.
    pub fn set_time_multiplier(&mut self, multiplier: f32) {
        self.timer.set_time_multiplier(multiplier);
    }

    /// Advances the waiting period.
    pub fn tick(&mut self, delta_seconds: f32) {
        self.timer.tick(delta_seconds);
    }

    /// Returns true if the period has elapsed and starts the next one.
    pub fn is_ready(&mut self) -> bool {
        if self.is_ready_peek() {
            self.restart();
            true
        } else {
            false
        }
    }

    /// Returns true if the period has elapsed, without restarting it.
    #[must_use]
    pub fn is_ready_peek(&self) -> bool {
        self.timer.elapsed_seconds() >= self.period
    }

    /// Starts a new waiting period.
    pub fn restart(&mut self) {
        self.timer.restart();
    }
}

impl Updateable for Regulator {
    fn on_update(&mut self, delta_seconds: f32) {
        self.tick(delta_seconds);
    }
}

/// A [`Regulator`] that picks a new random rate in `[min, max]` every time
/// its period restarts, so many regulated objects do not fire in lockstep.
///
/// The generator is seeded explicitly; the same seed gives the same rates.
pub struct RangedRegulator {
    regulator: Regulator,
    min_rate: f32,
    max_rate: f32,
    rng: ChaCha8Rng,
}

impl RangedRegulator {
    /// Creates a regulator firing between `min_rate` and `max_rate` times
    /// per second. Bounds given in the wrong order are swapped; negative or
    /// non-finite bounds count as 0.
    #[must_use]
    pub fn new(min_rate: f32, max_rate: f32, seed: u64) -> Self {
        let usable = |rate: f32| if rate.is_finite() { rate.max(0.0) } else { 0.0 };
        let (min_rate, max_rate) = (usable(min_rate), usable(max_rate));
        let (min_rate, max_rate) = if min_rate <= max_rate {
            (min_rate, max_rate)
        } else {
            (max_rate, min_rate)
        };

        let mut ranged = Self {
            regulator: Regulator::new(0.0),
            min_rate,
            max_rate,
            rng: ChaCha8Rng::seed_from_u64(seed),
        };
        ranged.pick_rate();
        ranged
    }

    /// Returns the waiting period currently in effect.
    #[inline]
    #[must_use]
    pub const fn update_period(&self) -> f32 {
        self.regulator.update_period()
    }

    /// Sets the multiplier applied to ticked time.
    pub fn set_time_multiplier(&mut self, multiplier: f32) {
        self.regulator.set_time_multiplier(multiplier);
    }

    /// Advances the waiting period.
    pub fn tick(&mut self, delta_seconds: f32) {
        self.regulator.tick(delta_seconds);
    }

    /// Returns true if the period has elapsed, then starts the next one
    /// with a freshly picked rate.
    pub fn is_ready(&mut self) -> bool {
        if self.regulator.is_ready_peek() {
            self.restart();
            true
        } else {
            false
        }
    }

    /// Returns true if the period has elapsed, without restarting it.
    #[must_use]
    pub fn is_ready_peek(&self) -> bool {
        self.regulator.is_ready_peek()
    }

    /// Starts a new waiting period with a freshly picked rate.
    pub fn restart(&mut self) {
        self.regulator.restart();
        self.pick_rate();
    }

    fn pick_rate(&mut self) {
        let rate = self.rng.gen_range(self.min_rate..=self.max_rate);
        self.regulator.set_update_rate(rate);
    }
}

impl Updateable for RangedRegulator {
    fn on_update(&mut self, delta_seconds: f32) {
        self.tick(delta_seconds);
    }
}

impl std::fmt::Debug for RangedRegulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RangedRegulator")
            .field("regulator", &self.regulator)
            .field("min_rate", &self.min_rate)
            .field("max_rate", &self.max_rate)
            .finish_non_exhaustive()
    }
}
