use std::time::Duration;

use crossterm::event::Event;
use ratatui::Frame;

use crate::Runtime;

/// Trait for frame-driven TUI applications.
///
/// Applications executed by `Runtime::run()` must implement this trait.
pub trait App {
    /// Initializes the application.
    ///
    /// Called once the terminal is set up, before the first frame. Use this
    /// to configure the frame rate and to query
    /// [`Runtime::supports_key_release`].
    fn init(&mut self, runtime: &mut Runtime);

    /// Returns whether the application should exit.
    fn should_exit(&self) -> bool;

    /// Advances the application by one frame.
    ///
    /// `events` holds every terminal event received since the previous
    /// frame, in arrival order, and `dt` is the real time since that frame.
    fn update(&mut self, runtime: &mut Runtime, events: &[Event], dt: Duration);

    /// Draws the screen (called after each `update`).
    fn draw(&self, frame: &mut Frame);
}
