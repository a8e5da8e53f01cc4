//! Board primitives: shapes, pieces, the locked-cell grid and collision.
//!
//! Everything here is plain data with no timing or input concerns. The
//! [`engine`](crate::engine) module drives these types frame by frame.

pub use self::{collision::*, grid::*, piece::*, shape::*};

pub(crate) mod collision;
pub(crate) mod grid;
pub(crate) mod piece;
pub(crate) mod shape;
