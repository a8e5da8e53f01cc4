use std::time::Duration;

/// Elapsed-time accumulator that resets to zero whenever it fires.
///
/// Overshoot is discarded on firing, so a long frame never produces more
/// than one step.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use sparkfall_engine::IntervalTimer;
///
/// let interval = Duration::from_millis(100);
/// let mut timer = IntervalTimer::new();
///
/// timer.accumulate(Duration::from_millis(60));
/// assert!(!timer.fire(interval));
/// timer.accumulate(Duration::from_millis(60));
/// assert!(timer.fire(interval));
/// assert_eq!(timer.elapsed(), Duration::ZERO);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IntervalTimer {
    elapsed: Duration,
}

impl IntervalTimer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            elapsed: Duration::ZERO,
        }
    }

    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn accumulate(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    /// Returns `true` and resets when at least `interval` has accumulated.
    pub fn fire(&mut self, interval: Duration) -> bool {
        if self.elapsed < interval {
            return false;
        }
        self.reset();
        true
    }

    /// Fraction of `interval` accumulated so far, clamped to `[0, 1]`.
    #[must_use]
    pub fn progress(&self, interval: Duration) -> f32 {
        if interval.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / interval.as_secs_f32()).clamp(0.0, 1.0)
    }

    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}
