//! Minimal frame-driven runtime for ratatui applications.
//!
//! [`Runtime::run`] sets up the terminal, then drives an [`App`] at a fixed
//! frame rate: every frame the app receives all terminal events that arrived
//! since the previous frame together with the elapsed time, and is drawn once.

pub use self::{app::App, frame_clock::interval_from_rate, runtime::*};

mod app;
mod event;
mod frame_clock;
mod runtime;
