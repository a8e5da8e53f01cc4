use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event::{self, Event};

use crate::event::ClockEvent;

/// Fixed-rate frame limiter that pumps terminal events while it waits.
///
/// Frames are spaced at least `interval` apart. The elapsed time reported
/// for a frame is the real time since the previous one, so a slow frame
/// shows up as a longer `dt` rather than as extra frames.
#[derive(Debug)]
pub(super) struct FrameClock {
    interval: Duration,
    last_frame: Instant,
    last_elapsed: Duration,
}

impl FrameClock {
    pub(super) fn new(interval: Duration) -> Self {
        Self::starting_at(interval, Instant::now())
    }

    pub(super) fn from_rate(rate: f64) -> Self {
        Self::new(interval_from_rate(rate))
    }

    fn starting_at(interval: Duration, start: Instant) -> Self {
        Self {
            interval,
            last_frame: start,
            last_elapsed: Duration::ZERO,
        }
    }

    pub(super) fn interval(&self) -> Duration {
        self.interval
    }

    pub(super) fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Starts the next frame period at `now` without reporting a frame.
    pub(super) fn restart(&mut self, now: Instant) {
        self.last_frame = now;
    }

    /// Blocks until the next frame, pushing every terminal event that
    /// arrives meanwhile into `sink`. Returns the frame's elapsed time.
    pub(super) fn wait(&mut self, sink: &mut Vec<Event>) -> io::Result<Duration> {
        loop {
            match self.next()? {
                ClockEvent::Frame => return Ok(self.last_elapsed),
                ClockEvent::Crossterm(event) => sink.push(event),
            }
        }
    }

    fn next(&mut self) -> io::Result<ClockEvent> {
        loop {
            let now = Instant::now();
            if let Some(elapsed) = self.try_advance(now) {
                self.last_elapsed = elapsed;
                return Ok(ClockEvent::Frame);
            }
            if event::poll(self.timeout(now))? {
                return Ok(event::read()?.into());
            }
        }
    }

    /// Reports a frame if the deadline has passed at `now`.
    fn try_advance(&mut self, now: Instant) -> Option<Duration> {
        let elapsed = now.saturating_duration_since(self.last_frame);
        if elapsed < self.interval {
            return None;
        }
        self.last_frame = now;
        Some(elapsed)
    }

    /// Time left until the next frame deadline.
    fn timeout(&self, now: Instant) -> Duration {
        (self.last_frame + self.interval).saturating_duration_since(now)
    }
}

/// Converts a rate in frames per second into a frame interval.
///
/// Non-finite or non-positive rates yield a zero interval, which makes the
/// clock run unthrottled.
#[must_use]
pub fn interval_from_rate(rate: f64) -> Duration {
    if rate.is_finite() && rate > 0.0 {
        Duration::try_from_secs_f64(rate.recip()).unwrap_or(Duration::ZERO)
    } else {
        Duration::ZERO
    }
}
