use crate::{
    PieceCollisionError,
    core::{FallingPiece, Grid, Shape, collides},
};

/// Largest `f32` below 1.0.
const OFFSET_MAX: f32 = 1.0 - f32::EPSILON / 2.0;

/// Fractional drawing offset of the falling piece, in cells.
///
/// Both components lie in `[0, 1)`. They are read by the renderer only and
/// never take part in movement or collision.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SubCellOffset {
    x: f32,
    y: f32,
}

impl SubCellOffset {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Builds an offset, clamping each component into `[0, 1)`. NaN becomes 0.
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: clamp_fraction(x),
            y: clamp_fraction(y),
        }
    }

    #[must_use]
    pub fn x(self) -> f32 {
        self.x
    }

    #[must_use]
    pub fn y(self) -> f32 {
        self.y
    }
}

fn clamp_fraction(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, OFFSET_MAX)
}

/// Result of a single gravity step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GravityOutcome {
    /// The piece moved down one row.
    Fell,
    /// The row below is blocked; the caller must lock the piece.
    Landed,
}

/// Owns the active piece and applies collision-gated moves to it.
///
/// Every request builds a candidate [`FallingPiece`], tests it with
/// [`collides`], and replaces the current piece only if the candidate is
/// clear. A rejected request leaves the piece exactly as it was.
///
/// # Example
///
/// ```
/// use sparkfall_engine::{FallingPieceController, Grid, Shape, ShapeKind};
///
/// let grid = Grid::new(10, 20);
/// let mut controller = FallingPieceController::spawn(Shape::new(ShapeKind::O), &grid);
///
/// while controller.gravity_step(&grid).is_fell() {}
/// assert_eq!(controller.piece().position().row(), 18);
/// assert!(controller.try_move(0, 1, &grid).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct FallingPieceController {
    piece: FallingPiece,
    offset: SubCellOffset,
}

impl FallingPieceController {
    #[must_use]
    pub fn new(piece: FallingPiece) -> Self {
        Self {
            piece,
            offset: SubCellOffset::ZERO,
        }
    }

    /// Places `shape` at the spawn position of `grid`.
    ///
    /// The spawned piece may already collide; callers check with
    /// [`FallingPieceController::is_blocked`].
    #[must_use]
    pub fn spawn(shape: Shape, grid: &Grid) -> Self {
        Self::new(FallingPiece::spawn(shape, grid.columns()))
    }

    #[must_use]
    pub fn piece(&self) -> &FallingPiece {
        &self.piece
    }

    #[must_use]
    pub fn offset(&self) -> SubCellOffset {
        self.offset
    }

    pub fn set_offset(&mut self, offset: SubCellOffset) {
        self.offset = offset;
    }

    /// Whether the current placement overlaps the grid.
    #[must_use]
    pub fn is_blocked(&self, grid: &Grid) -> bool {
        collides(&self.piece, grid)
    }

    pub fn try_move(&mut self, dx: i32, dy: i32, grid: &Grid) -> Result<(), PieceCollisionError> {
        self.try_replace(self.piece.moved(dx, dy), grid)
    }

    /// Rotates clockwise in place. There is no wall kick: a blocked rotation
    /// is simply rejected.
    pub fn try_rotate(&mut self, grid: &Grid) -> Result<(), PieceCollisionError> {
        self.try_replace(self.piece.rotated_right(), grid)
    }

    pub fn gravity_step(&mut self, grid: &Grid) -> GravityOutcome {
        match self.try_move(0, 1, grid) {
            Ok(()) => GravityOutcome::Fell,
            Err(PieceCollisionError) => GravityOutcome::Landed,
        }
    }

    /// Whether the next gravity step would land the piece.
    #[must_use]
    pub fn is_landed(&self, grid: &Grid) -> bool {
        collides(&self.piece.moved(0, 1), grid)
    }

    fn try_replace(
        &mut self,
        candidate: FallingPiece,
        grid: &Grid,
    ) -> Result<(), PieceCollisionError> {
        if collides(&candidate, grid) {
            return Err(PieceCollisionError);
        }
        self.piece = candidate;
        Ok(())
    }
}
