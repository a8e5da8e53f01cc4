use super::shape::Shape;

/// Grid position of a piece's bounding-box origin.
///
/// `col` grows rightward and `row` grows downward. Both are signed: while
/// probing a move the origin may sit left of column 0, and a piece may start
/// partially above row 0.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PiecePosition {
    col: i32,
    row: i32,
}

impl PiecePosition {
    #[must_use]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    #[must_use]
    pub const fn col(self) -> i32 {
        self.col
    }

    #[must_use]
    pub const fn row(self) -> i32 {
        self.row
    }

    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.col + dx, self.row + dy)
    }
}

/// The active piece: a shape placed at a grid position.
///
/// A `FallingPiece` is a value. Moving or rotating it produces a new piece,
/// which lets the caller probe a candidate placement without touching the
/// current one.
///
/// # Example
///
/// ```
/// use sparkfall_engine::{FallingPiece, Shape, ShapeKind};
///
/// let piece = FallingPiece::spawn(Shape::new(ShapeKind::O), 10);
/// assert_eq!((piece.position().col(), piece.position().row()), (4, 0));
///
/// let candidate = piece.moved(-1, 1);
/// assert_eq!(candidate.position().col(), 3);
/// assert_eq!(piece.position().col(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallingPiece {
    shape: Shape,
    position: PiecePosition,
}

impl FallingPiece {
    #[must_use]
    pub fn new(shape: Shape, position: PiecePosition) -> Self {
        Self { shape, position }
    }

    /// Places `shape` horizontally centered on a board `columns` wide, at row 0.
    #[must_use]
    pub fn spawn(shape: Shape, columns: usize) -> Self {
        let col = (columns / 2).saturating_sub(shape.width() / 2);
        let col = i32::try_from(col).unwrap_or(i32::MAX);
        Self::new(shape, PiecePosition::new(col, 0))
    }

    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub fn position(&self) -> PiecePosition {
        self.position
    }

    #[must_use]
    pub fn moved(&self, dx: i32, dy: i32) -> Self {
        Self {
            shape: self.shape.clone(),
            position: self.position.offset(dx, dy),
        }
    }

    /// Returns the piece with its shape turned clockwise, at the same origin.
    #[must_use]
    pub fn rotated_right(&self) -> Self {
        Self {
            shape: self.shape.rotated_right(),
            position: self.position,
        }
    }

    /// Iterates the absolute `(col, row)` of every filled cell.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let PiecePosition { col, row } = self.position;
        self.shape.occupied_cells().map(move |(dx, dy)| {
            // Shape offsets are at most MAX_SHAPE_SIZE, so the casts are exact.
            #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let (dx, dy) = (dx as i32, dy as i32);
            (col + dx, row + dy)
        })
    }
}
