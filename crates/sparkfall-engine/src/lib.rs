//! Falling-block puzzle engine with particle bursts on line clears.
//!
//! The crate is split into three layers:
//!
//! - [`core`] - shapes, pieces, the locked-cell [`Grid`] and [`collides`]
//! - [`engine`] - configuration, timers, the falling-piece controller,
//!   particles and the frame-driven [`GameLoop`]
//! - [`render`] - the [`Surface`](render::Surface) drawing seam and
//!   [`draw_frame`](render::draw_frame)
//!
//! The engine never touches a terminal or window. A front end feeds
//! [`InputEvent`]s and the elapsed frame time into [`GameLoop::tick`] and
//! then paints the result through its own [`Surface`](render::Surface).

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;
pub mod render;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("piece would collide")]
pub struct PieceCollisionError;
