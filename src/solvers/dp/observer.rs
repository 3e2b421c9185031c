//! Solve Observer

use std::time::{Duration, Instant};

/// Units the solution table is indexed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    /// One table slot per minor unit (cent).
    Minor,

    /// One table slot per major unit (dollar), used when every amount is whole.
    Major,
}

/// Observer trait for following a solve as the table is filled.
///
/// Every callback has an empty default, so observers only implement what they
/// need. [`SolveObserver::should_cancel`] is polled once per item and once per
/// total inside the fill loop; returning `true` stops the solve with
/// [`Outcome::Cancelled`](crate::solvers::Outcome::Cancelled).
pub trait SolveObserver {
    /// Called once, before the table is built.
    ///
    /// # Parameters
    ///
    /// - `scale`: Units the table is indexed in
    /// - `scaled_target`: Target expressed in those units
    fn on_scale(&mut self, _scale: Scale, _scaled_target: usize) {}

    /// Called when a total is reached for the first time.
    ///
    /// # Parameters
    ///
    /// - `total`: Newly reached total, in scaled units
    /// - `item_idx`: Index of the item that completed it
    /// - `predecessor`: Total it was reached from
    fn on_entry(&mut self, _total: usize, _item_idx: usize, _predecessor: usize) {}

    /// Cooperative cancellation check.
    fn should_cancel(&mut self) -> bool {
        false
    }
}

/// No-op observer for unobserved solves.
#[derive(Debug, Default)]
pub struct NoopObserver;

impl SolveObserver for NoopObserver {}

/// Cancels a solve once a deadline has passed.
///
/// The clock is only read every `DEADLINE_POLL_INTERVAL` checks to keep the
/// fill loop cheap.
#[derive(Debug)]
pub struct DeadlineObserver {
    deadline: Option<Instant>,
    checks: u32,
    expired: bool,
}

const DEADLINE_POLL_INTERVAL: u32 = 4096;

impl DeadlineObserver {
    /// Stop solving `timeout` from now. A timeout too large to represent never expires.
    pub fn new(timeout: Duration) -> Self {
        Self {
            deadline: Instant::now().checked_add(timeout),
            checks: 0,
            expired: false,
        }
    }

    /// Stop solving at `deadline`.
    pub fn until(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            checks: 0,
            expired: false,
        }
    }

    /// Whether the deadline was hit during a solve.
    pub fn expired(&self) -> bool {
        self.expired
    }
}

impl SolveObserver for DeadlineObserver {
    fn should_cancel(&mut self) -> bool {
        if self.expired {
            return true;
        }

        self.checks = self.checks.wrapping_add(1);

        if self.checks % DEADLINE_POLL_INTERVAL == 1 {
            self.expired = self
                .deadline
                .is_some_and(|deadline| Instant::now() >= deadline);
        }

        self.expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_observer_never_cancels() {
        let mut observer = NoopObserver;

        assert!(!observer.should_cancel());
    }

    #[test]
    fn deadline_in_the_past_cancels_on_first_check() {
        let mut observer = DeadlineObserver::until(Instant::now());

        assert!(observer.should_cancel());
        assert!(observer.expired());
    }

    #[test]
    fn generous_deadline_does_not_cancel() {
        let mut observer = DeadlineObserver::new(Duration::from_secs(3600));

        assert!((0..10_000).all(|_| !observer.should_cancel()));
        assert!(!observer.expired());
    }
}
