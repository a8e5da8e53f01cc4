//! Frame-driven game logic built on top of [`core`](crate::core).
//!
//! - [`GameConfig`] - board size, timing, particle and color constants
//! - [`IntervalTimer`] - accumulate-and-reset timer used for gravity and
//!   lateral auto-repeat
//! - [`FallingPieceController`] - collision-gated moves of the active piece
//! - [`ParticleSystem`] - bursts spawned on line clears
//! - [`InputEvent`] / [`Key`] - logical input delivered by a front end
//! - [`GameLoop`] - the `Running` / `GameOver` / `Quit` state machine
//!
//! # Frame Flow
//!
//! Each [`GameLoop::tick`] while running:
//!
//! 1. Scans the frame's events for a quit request and stops if one is found
//! 2. Applies presses and releases (rotation happens immediately)
//! 3. Advances particles and both timers by the frame time
//! 4. Repeats held lateral moves when the lateral timer fires
//! 5. Steps gravity when the fall timer fires, using the short interval
//!    while soft-drop is held
//! 6. On landing, locks the piece, clears lines, bursts particles and
//!    either spawns the next piece or enters game over

pub use self::{config::*, controller::*, game_loop::*, input::*, particles::*, timer::*};

mod config;
mod controller;
mod game_loop;
mod input;
mod particles;
mod timer;
