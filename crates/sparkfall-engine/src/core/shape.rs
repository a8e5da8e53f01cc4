use arrayvec::ArrayVec;
use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};

/// Largest side of any shape's bounding matrix (the I-piece).
pub const MAX_SHAPE_SIZE: usize = 4;

type ShapeRow = ArrayVec<bool, MAX_SHAPE_SIZE>;

/// One of the seven canonical tetromino forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ShapeKind {
    /// I-piece.
    I = 0,
    /// T-piece.
    T = 1,
    /// O-piece.
    O = 2,
    /// S-piece.
    S = 3,
    /// Z-piece.
    Z = 4,
    /// L-piece.
    L = 5,
    /// J-piece.
    J = 6,
}

impl Distribution<ShapeKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ShapeKind {
        ShapeKind::ALL[rng.random_range(0..ShapeKind::LEN)]
    }
}

impl ShapeKind {
    /// Number of shape kinds (7).
    pub const LEN: usize = 7;

    /// Every kind, in catalog order.
    pub const ALL: [Self; Self::LEN] = [
        ShapeKind::I,
        ShapeKind::T,
        ShapeKind::O,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::L,
        ShapeKind::J,
    ];

    /// Returns the single character name of this kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use sparkfall_engine::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::S.as_char(), 'S');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            ShapeKind::I => 'I',
            ShapeKind::T => 'T',
            ShapeKind::O => 'O',
            ShapeKind::S => 'S',
            ShapeKind::Z => 'Z',
            ShapeKind::L => 'L',
            ShapeKind::J => 'J',
        }
    }

    /// Minimal bounding matrix of the kind in its spawn orientation.
    const fn spawn_matrix(self) -> &'static [&'static [u8]] {
        match self {
            ShapeKind::I => &[&[1, 1, 1, 1]],
            ShapeKind::T => &[&[1, 1, 1], &[0, 1, 0]],
            ShapeKind::O => &[&[1, 1], &[1, 1]],
            ShapeKind::S => &[&[1, 1, 0], &[0, 1, 1]],
            ShapeKind::Z => &[&[0, 1, 1], &[1, 1, 0]],
            ShapeKind::L => &[&[1, 1, 1], &[1, 0, 0]],
            ShapeKind::J => &[&[1, 1, 1], &[0, 0, 1]],
        }
    }
}

/// Footprint of a piece: a small boolean matrix, immutable once built.
///
/// Rotation never mutates a shape; [`Shape::rotated_right`] returns a new
/// value. Rows are indexed top to bottom, columns left to right.
///
/// # Example
///
/// ```
/// use sparkfall_engine::{Shape, ShapeKind};
///
/// let i = Shape::new(ShapeKind::I);
/// assert_eq!((i.width(), i.height()), (4, 1));
///
/// let upright = i.rotated_right();
/// assert_eq!((upright.width(), upright.height()), (1, 4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    kind: ShapeKind,
    rows: ArrayVec<ShapeRow, MAX_SHAPE_SIZE>,
}

impl Shape {
    /// Builds the spawn orientation of `kind`.
    #[must_use]
    pub fn new(kind: ShapeKind) -> Self {
        let rows = kind
            .spawn_matrix()
            .iter()
            .map(|row| row.iter().map(|&cell| cell != 0).collect())
            .collect();
        Self { kind, rows }
    }

    /// Picks a kind uniformly at random and builds its spawn orientation.
    pub fn random<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::new(rng.random())
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, ArrayVec::len)
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Whether the cell at `(x, y)` of the bounding matrix is filled.
    ///
    /// Positions outside the matrix are empty.
    #[must_use]
    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        self.rows
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(false)
    }

    /// Iterates the `(x, y)` offsets of filled cells, row by row.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(x, &filled)| filled.then_some((x, y)))
        })
    }

    /// Returns the shape turned 90° clockwise.
    ///
    /// The result is the transpose of the row-reversed matrix, so a `w × h`
    /// shape becomes `h × w`. Four rotations reproduce the original matrix.
    #[must_use]
    pub fn rotated_right(&self) -> Self {
        let (width, height) = (self.width(), self.height());
        let rows = (0..width)
            .map(|y| (0..height).map(|x| self.rows[height - 1 - x][y]).collect())
            .collect();
        Self {
            kind: self.kind,
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn matrix(shape: &Shape) -> Vec<Vec<u8>> {
        (0..shape.height())
            .map(|y| {
                (0..shape.width())
                    .map(|x| u8::from(shape.is_filled(x, y)))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_catalog_shapes_have_four_cells() {
        for kind in ShapeKind::ALL {
            let shape = Shape::new(kind);
            assert_eq!(
                shape.occupied_cells().count(),
                4,
                "{} should have 4 cells",
                kind.as_char()
            );
        }
    }

    #[test]
    fn test_catalog_matrices_are_minimal() {
        for kind in ShapeKind::ALL {
            let shape = Shape::new(kind);
            for y in 0..shape.height() {
                assert!(
                    (0..shape.width()).any(|x| shape.is_filled(x, y)),
                    "{} has an empty row {y}",
                    kind.as_char()
                );
            }
            for x in 0..shape.width() {
                assert!(
                    (0..shape.height()).any(|y| shape.is_filled(x, y)),
                    "{} has an empty column {x}",
                    kind.as_char()
                );
            }
        }
    }

    #[test]
    fn test_rotate_t_clockwise() {
        let rotated = Shape::new(ShapeKind::T).rotated_right();
        assert_eq!(matrix(&rotated), vec![vec![0, 1], vec![1, 1], vec![0, 1]]);
    }

    #[test]
    fn test_rotate_l_clockwise() {
        let rotated = Shape::new(ShapeKind::L).rotated_right();
        assert_eq!(matrix(&rotated), vec![vec![1, 1], vec![0, 1], vec![0, 1]]);
    }

    #[test]
    fn test_rotate_four_times_is_identity() {
        for kind in ShapeKind::ALL {
            let shape = Shape::new(kind);
            let mut rotated = shape.clone();
            for _ in 0..4 {
                rotated = rotated.rotated_right();
            }
            assert_eq!(rotated, shape, "{} after 4 rotations", kind.as_char());
        }
    }

    #[test]
    fn test_rotate_keeps_cell_count_and_swaps_size() {
        for kind in ShapeKind::ALL {
            let shape = Shape::new(kind);
            let rotated = shape.rotated_right();
            assert_eq!(rotated.width(), shape.height());
            assert_eq!(rotated.height(), shape.width());
            assert_eq!(rotated.occupied_cells().count(), 4);
            assert_eq!(rotated.kind(), kind);
        }
    }

    #[test]
    fn test_o_rotation_is_unchanged() {
        let o = Shape::new(ShapeKind::O);
        assert_eq!(o.rotated_right(), o);
    }

    #[test]
    fn test_is_filled_outside_matrix() {
        let i = Shape::new(ShapeKind::I);
        assert!(i.is_filled(3, 0));
        assert!(!i.is_filled(4, 0));
        assert!(!i.is_filled(0, 1));
    }

    #[test]
    fn test_random_covers_catalog() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = [false; ShapeKind::LEN];
        for _ in 0..500 {
            seen[Shape::random(&mut rng).kind() as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "all kinds should appear: {seen:?}");
    }
}
