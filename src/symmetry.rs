//! The eight symmetries of the square acting on mesh patterns.
//!
//! Each operation transforms the permutation and moves every shaded box by
//! the matching reflection or rotation, so that `p` occurs in `h` exactly
//! when the transformed `p` occurs in the identically transformed `h`.

use crate::{MeshPattern, Permutation};
use crate::geometry::{
    Cell, flip_box_antidiagonal, flip_box_diagonal, flip_box_horizontal, flip_box_vertical,
    rotate_box,
};

impl MeshPattern {
    fn map_boxes(&self, perm: Permutation, f: impl Fn(Cell) -> Cell) -> MeshPattern {
        let mesh = self.mesh().iter().map(|&c| f(c)).collect();
        MeshPattern::from_parts(perm, mesh)
    }

    /// Quarter turn clockwise.
    pub fn rotate_right(&self) -> MeshPattern {
        let n = self.len();
        self.map_boxes(self.perm().rotate_right(), |c| rotate_box(n, c))
    }

    /// Mirror across the horizontal axis.
    pub fn flip_horizontal(&self) -> MeshPattern {
        let n = self.len();
        self.map_boxes(self.perm().flip_horizontal(), |c| flip_box_horizontal(n, c))
    }

    /// Mirror across the vertical axis.
    pub fn flip_vertical(&self) -> MeshPattern {
        let n = self.len();
        self.map_boxes(self.perm().flip_vertical(), |c| flip_box_vertical(n, c))
    }

    /// Mirror across the diagonal `y = x`.
    pub fn flip_diagonal(&self) -> MeshPattern {
        self.map_boxes(self.perm().flip_diagonal(), flip_box_diagonal)
    }

    /// Mirror across the antidiagonal.
    pub fn flip_antidiagonal(&self) -> MeshPattern {
        let n = self.len();
        self.map_boxes(self.perm().flip_antidiagonal(), |c| {
            flip_box_antidiagonal(n, c)
        })
    }
}
