use super::{grid::Grid, piece::FallingPiece};

/// Tests whether `piece` overlaps a wall, the floor, or a locked cell.
///
/// Cells above row 0 are legal as long as their column is on the board, so a
/// freshly spawned or rotated piece may poke out of the top. Every other cell
/// must be inside the grid and unoccupied.
///
/// # Example
///
/// ```
/// use sparkfall_engine::{FallingPiece, Grid, PiecePosition, Shape, ShapeKind, collides};
///
/// let grid = Grid::new(10, 20);
/// let o = Shape::new(ShapeKind::O);
///
/// assert!(!collides(&FallingPiece::new(o.clone(), PiecePosition::new(8, 18)), &grid));
/// assert!(collides(&FallingPiece::new(o.clone(), PiecePosition::new(9, 0)), &grid));
/// assert!(collides(&FallingPiece::new(o, PiecePosition::new(0, 19)), &grid));
/// ```
#[must_use]
pub fn collides(piece: &FallingPiece, grid: &Grid) -> bool {
    piece.occupied_positions().any(|(col, row)| {
        if row < 0 {
            return !grid.contains_column(col);
        }
        grid.cell(col, row).is_none_or(|occupied| occupied)
    })
}
