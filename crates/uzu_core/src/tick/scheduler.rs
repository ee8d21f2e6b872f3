//! # Scheduler
//!
//! Runs work once after a delay measured in ticked simulation time.

use super::updater::Updateable;
use crate::error::{UzuError, UzuResult};

struct ScheduledWork {
    delay: f32,
    elapsed: f32,
    work: Box<dyn FnOnce()>,
}

/// Delayed one-shot work, advanced by the host loop.
///
/// # Example
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use uzu_core::Scheduler;
///
/// let fired = Rc::new(Cell::new(false));
/// let mut scheduler = Scheduler::new();
///
/// let flag = Rc::clone(&fired);
/// scheduler.add_work(3.0, move || flag.set(true))?;
///
/// scheduler.tick(2.0);
/// assert!(!fired.get());
/// scheduler.tick(1.0);
/// assert!(fired.get());
/// # Ok::<(), uzu_core::UzuError>(())
/// ```
#[derive(Default)]
pub struct Scheduler {
    /// Pending work in the order it was added.
    pending: Vec<ScheduledWork>,
}

impl Scheduler {
    /// Creates an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `work` to run once `delay_seconds` of ticked time has passed.
    ///
    /// # Errors
    ///
    /// [`UzuError::InvalidDelay`] if the delay is zero, negative or NaN.
    pub fn add_work(
        &mut self,
        delay_seconds: f32,
        work: impl FnOnce() + 'static,
    ) -> UzuResult<()> {
        if delay_seconds.is_nan() || delay_seconds <= 0.0 {
            tracing::warn!("Work must be scheduled for sometime in the future.");
            return Err(UzuError::InvalidDelay);
        }

        self.pending.push(ScheduledWork {
            delay: delay_seconds,
            elapsed: 0.0,
            work: Box::new(work),
        });
        Ok(())
    }

    /// Returns the number of queued, not yet executed work items.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Returns true if nothing is queued.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drops every queued work item without running it.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Advances every queued item and runs the ones that are due, in the
    /// order they were added.
    ///
    /// Returns the number of items executed.
    pub fn tick(&mut self, delta_seconds: f32) -> usize {
        let mut executed = 0;
        let mut i = 0;
        while i < self.pending.len() {
            let entry = &mut self.pending[i];
            entry.elapsed += delta_seconds;

            if entry.elapsed >= entry.delay {
                let entry = self.pending.remove(i);
                (entry.work)();
                executed += 1;
            } else {
                i += 1;
            }
        }
        executed
    }
}

impl Updateable for Scheduler {
    fn on_update(&mut self, delta_seconds: f32) {
        self.tick(delta_seconds);
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("pending", &self.pending.len())
            .finish()
    }
}
