//! Box coordinates on the `(n + 1) x (n + 1)` grid of a pattern of length `n`.
//!
//! Box `(x, y)` lies between the vertical lines through columns `x` and
//! `x + 1` and between the horizontal lines through values `y` and `y + 1`,
//! where column `0` and value `0` stand for the left and bottom borders.

/// A box coordinate `(x, y)` with `0 <= x, y <= n`.
pub type Cell = (usize, usize);

/// The side of a newly inserted point whose two adjacent boxes get shaded.
///
/// See [`MeshPattern::add_point`](crate::MeshPattern::add_point).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Right of the point.
    East,
    /// Above the point.
    North,
    /// Left of the point.
    West,
    /// Below the point.
    South,
}

impl Direction {
    /// All four directions, counter-clockwise starting east.
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::North,
        Direction::West,
        Direction::South,
    ];

    /// The two boxes touching the point at `(x + 1, y + 1)` on this side,
    /// given in the grid that already contains the point.
    pub fn adjacent_boxes(self, (x, y): Cell) -> [Cell; 2] {
        match self {
            Direction::East => [(x + 1, y), (x + 1, y + 1)],
            Direction::North => [(x, y + 1), (x + 1, y + 1)],
            Direction::West => [(x, y), (x, y + 1)],
            Direction::South => [(x, y), (x + 1, y)],
        }
    }
}

/// Returns true if `cell` lies on the grid of a pattern of length `n`.
#[inline]
pub fn in_grid(n: usize, (x, y): Cell) -> bool {
    x <= n && y <= n
}

/// Maps a box under a quarter turn clockwise of the grid.
///
/// Four applications give back the original box.
///
/// # Panics
/// Panics if `cell` is outside the grid.
#[inline]
pub fn rotate_box(n: usize, cell: Cell) -> Cell {
    assert!(in_grid(n, cell), "box {cell:?} outside grid of size {n}");
    let (x, y) = cell;
    (y, n - x)
}

/// Mirror across the horizontal axis.
#[inline]
pub fn flip_box_horizontal(n: usize, (x, y): Cell) -> Cell {
    (x, n - y)
}

/// Mirror across the vertical axis.
#[inline]
pub fn flip_box_vertical(n: usize, (x, y): Cell) -> Cell {
    (n - x, y)
}

/// Mirror across the diagonal.
#[inline]
pub fn flip_box_diagonal((x, y): Cell) -> Cell {
    (y, x)
}

/// Mirror across the antidiagonal.
#[inline]
pub fn flip_box_antidiagonal(n: usize, (x, y): Cell) -> Cell {
    (n - y, n - x)
}
