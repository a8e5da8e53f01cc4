use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute, terminal,
};
use ratatui::DefaultTerminal;

use crate::{App, frame_clock::FrameClock};

/// Frame rate used until the application sets its own.
pub const DEFAULT_FRAME_RATE: f64 = 60.0;

/// TUI application runtime.
///
/// Owns the frame clock and executes applications that implement the `App`
/// trait, one `update` and one `draw` per frame.
#[derive(Debug)]
pub struct Runtime {
    clock: FrameClock,
    key_release: bool,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    /// Creates a new Runtime running at [`DEFAULT_FRAME_RATE`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            clock: FrameClock::from_rate(DEFAULT_FRAME_RATE),
            key_release: false,
        }
    }

    /// Sets the frame rate (Hz, frames per second).
    pub fn set_frame_rate(&mut self, rate: f64) {
        self.set_frame_interval(crate::interval_from_rate(rate));
    }

    /// Sets the minimum time between frames.
    pub fn set_frame_interval(&mut self, interval: Duration) {
        self.clock.set_interval(interval);
    }

    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        self.clock.interval()
    }

    /// Whether the terminal reports key releases.
    ///
    /// Only meaningful from `App::init` on. Without release reporting, a held
    /// key arrives as a stream of presses and never as a release.
    #[must_use]
    pub fn supports_key_release(&self) -> bool {
        self.key_release
    }

    /// Runs the application.
    ///
    /// 1. Enters raw mode and the alternate screen, and asks the terminal to
    ///    report key releases when it can
    /// 2. Calls `app.init()`
    /// 3. Until `app.should_exit()` returns true, waits for the next frame
    ///    and calls `app.update()` with the events received meanwhile, then
    ///    `app.draw()`
    ///
    /// The terminal is restored on every exit path.
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        ratatui::run(|terminal| {
            self.key_release = terminal::supports_keyboard_enhancement().unwrap_or(false);
            if self.key_release {
                execute!(
                    io::stdout(),
                    PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
                )?;
            }

            let result = self.frame_loop(terminal, app);

            if self.key_release {
                let popped = execute!(io::stdout(), PopKeyboardEnhancementFlags);
                return result.and(popped);
            }
            result
        })
    }

    fn frame_loop<A>(&mut self, terminal: &mut DefaultTerminal, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init(self);
        terminal.draw(|f| app.draw(f))?;
        self.clock.restart(Instant::now());

        let mut events = Vec::new();
        while !app.should_exit() {
            let dt = self.clock.wait(&mut events)?;
            app.update(self, &events, dt);
            events.clear();
            terminal.draw(|f| app.draw(f))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_frame_rate() {
        let runtime = Runtime::new();
        let expected = Duration::from_secs_f64(1.0 / DEFAULT_FRAME_RATE);
        assert_eq!(runtime.frame_interval(), expected);
        assert!(!runtime.supports_key_release());
    }

    #[test]
    fn test_set_frame_rate() {
        let mut runtime = Runtime::new();
        runtime.set_frame_rate(4.0);
        assert_eq!(runtime.frame_interval(), Duration::from_millis(250));
    }
}
