use super::{collision::collides, piece::FallingPiece};

/// The board's locked cells.
///
/// A fixed `columns × rows` matrix of occupied flags with row 0 at the top.
/// Dimensions never change after construction, and a cell only becomes
/// occupied by [`Grid::lock`] or moves during [`Grid::clear_completed_lines`];
/// the falling piece is never written here while it is still moving.
///
/// # Example
///
/// ```
/// use sparkfall_engine::{FallingPiece, Grid, PiecePosition, Shape, ShapeKind};
///
/// let mut grid = Grid::new(4, 6);
/// let piece = FallingPiece::new(Shape::new(ShapeKind::I), PiecePosition::new(0, 5));
/// grid.lock(&piece);
///
/// let (grid, cleared) = grid.clear_completed_lines();
/// assert_eq!(cleared, vec![5]);
/// assert_eq!(grid.occupied_count(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    columns: usize,
    rows: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Creates an empty grid.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn new(columns: usize, rows: usize) -> Self {
        assert!(
            columns > 0 && rows > 0,
            "grid dimensions must be non-zero, got {columns}x{rows}"
        );
        Self {
            columns,
            rows,
            cells: vec![false; columns * rows],
        }
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Whether the cell at `(col, row)` is occupied.
    ///
    /// # Panics
    ///
    /// Panics if the position lies outside the grid.
    #[must_use]
    pub fn is_occupied(&self, col: usize, row: usize) -> bool {
        self.cells[self.index(col, row)]
    }

    /// Bounds-checked lookup with signed coordinates.
    ///
    /// Returns `None` for any position outside the grid.
    #[must_use]
    pub fn cell(&self, col: i32, row: i32) -> Option<bool> {
        let col = usize::try_from(col).ok().filter(|&c| c < self.columns)?;
        let row = usize::try_from(row).ok().filter(|&r| r < self.rows)?;
        Some(self.cells[row * self.columns + col])
    }

    #[must_use]
    pub fn contains_column(&self, col: i32) -> bool {
        usize::try_from(col).is_ok_and(|c| c < self.columns)
    }

    #[must_use]
    pub fn contains_row(&self, row: i32) -> bool {
        usize::try_from(row).is_ok_and(|r| r < self.rows)
    }

    /// Iterates rows from top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks_exact(self.columns)
    }

    /// Iterates the `(col, row)` of every occupied cell.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.iter_rows().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter_map(move |(col, &occupied)| occupied.then_some((col, row)))
        })
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    #[must_use]
    pub fn is_row_complete(&self, row: usize) -> bool {
        self.row_cells(row).iter().all(|&c| c)
    }

    /// Writes every filled cell of `piece` into the grid.
    ///
    /// Cells above row 0 are dropped. A lock with such cells always occupies
    /// row 0 as well, so [`Grid::is_game_over`] reports it.
    ///
    /// # Panics
    ///
    /// Panics if a cell lies beside or below the grid. Locking an overlapping
    /// piece is a caller bug caught by a debug assertion.
    pub fn lock(&mut self, piece: &FallingPiece) {
        debug_assert!(
            !collides(piece, self),
            "locking a colliding piece at {:?}",
            piece.position()
        );
        for (col, row) in piece.occupied_positions() {
            if row < 0 {
                continue;
            }
            assert!(
                self.contains_column(col) && self.contains_row(row),
                "locked cell ({col}, {row}) outside {}x{} grid",
                self.columns,
                self.rows
            );
            #[expect(clippy::cast_sign_loss)]
            let index = self.index(col as usize, row as usize);
            self.cells[index] = true;
        }
    }

    /// Removes every completed row at once and compacts the rest downward.
    ///
    /// Remaining rows keep their relative order and the same number of empty
    /// rows is inserted at the top. Returns the new grid together with the
    /// cleared row indices of `self`, ascending, so callers can place effects
    /// at the pre-clear positions.
    #[must_use]
    pub fn clear_completed_lines(&self) -> (Self, Vec<usize>) {
        let completed: Vec<usize> = (0..self.rows)
            .filter(|&row| self.is_row_complete(row))
            .collect();
        if completed.is_empty() {
            return (self.clone(), completed);
        }

        let mut cells = Vec::with_capacity(self.cells.len());
        cells.resize(completed.len() * self.columns, false);
        cells.extend(
            self.iter_rows()
                .filter(|row| !row.iter().all(|&c| c))
                .flatten(),
        );
        debug_assert_eq!(cells.len(), self.cells.len());

        let grid = Self {
            columns: self.columns,
            rows: self.rows,
            cells,
        };
        (grid, completed)
    }

    /// True when any cell of the top row is occupied.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.row_cells(0).iter().any(|&c| c)
    }

    fn row_cells(&self, row: usize) -> &[bool] {
        let start = self.index(0, row);
        &self.cells[start..start + self.columns]
    }

    fn index(&self, col: usize, row: usize) -> usize {
        assert!(
            col < self.columns && row < self.rows,
            "cell ({col}, {row}) outside {}x{} grid",
            self.columns,
            self.rows
        );
        row * self.columns + col
    }

    /// Builds a grid from text rows, `#` for occupied and anything else empty.
    #[cfg(test)]
    pub(crate) fn from_rows(rows: &[&str]) -> Self {
        let columns = rows.first().map_or(0, |row| row.len());
        let mut grid = Self::new(columns, rows.len());
        for (row, line) in rows.iter().enumerate() {
            assert_eq!(line.len(), columns, "ragged test grid at row {row}");
            for (col, ch) in line.chars().enumerate() {
                grid.cells[row * columns + col] = ch == '#';
            }
        }
        grid
    }
}
