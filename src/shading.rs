//! Local deductions of boxes that can be shaded without changing which
//! permutations a mesh pattern occurs in.
//!
//! Both checks look at a single point and the boxes around it. A check only
//! has to be written for one orientation: the pattern and the queried boxes
//! are rotated together through all four quarter turns and every orientation
//! in which the check succeeds contributes the point it was anchored at.
//!
//! References:
//! - Hilmarsson, Jónsdóttir, Sigurðardóttir, Viðarsdóttir, Ulfarsson (2015).
//!   "Wilf-classification of mesh patterns of short length." Electronic
//!   Journal of Combinatorics 22(4), #P4.13. The Shading Lemma.

use crate::MeshPattern;
use crate::geometry::{Cell, in_grid, rotate_box};

impl MeshPattern {
    /// Returns the values of the points that justify shading `cell`, one
    /// entry per orientation in which the single-box rule applies.
    ///
    /// A non-empty result means `self.shade(cell)` occurs in exactly the same
    /// permutations as `self`.
    ///
    /// # Panics
    /// Panics if `cell` lies outside the grid.
    pub fn can_shade(&self, cell: Cell) -> Vec<usize> {
        assert!(in_grid(self.len(), cell), "box {cell:?} outside the grid");
        let found = self.deductions(&[cell], |p, cells| p.shade_anchor(cells[0]));
        if !found.is_empty() {
            log::debug!("{:?}: box {:?} can be shaded via {:?}", self, cell, found);
        }
        found
    }

    /// Returns the values of the points that justify shading both `a` and
    /// `b`, one entry per orientation in which the two-box rule applies.
    ///
    /// The rule covers two boxes sharing a side next to a point. A non-empty
    /// result means `self.shade_all([a, b])` occurs in exactly the same
    /// permutations as `self`.
    ///
    /// # Panics
    /// Panics if either box lies outside the grid.
    pub fn can_shade2(&self, a: Cell, b: Cell) -> Vec<usize> {
        let n = self.len();
        assert!(
            in_grid(n, a) && in_grid(n, b),
            "boxes {a:?}, {b:?} outside the grid"
        );
        let found = self.deductions(&[a, b], |p, cells| p.shade_pair_anchor(cells[0], cells[1]));
        if !found.is_empty() {
            log::debug!(
                "{:?}: boxes {:?} and {:?} can be shaded via {:?}",
                self,
                a,
                b,
                found
            );
        }
        found
    }

    /// Every unshaded box for which [`can_shade`](Self::can_shade) finds a
    /// justification, in lexicographic order.
    pub fn shadable_boxes(&self) -> Vec<Cell> {
        let n = self.len();
        (0..=n)
            .flat_map(|x| (0..=n).map(move |y| (x, y)))
            .filter(|&cell| !self.is_shaded(cell) && !self.can_shade(cell).is_empty())
            .collect()
    }

    /// Shades deducible boxes one at a time until none is left.
    ///
    /// Each step keeps the set of permutations the pattern occurs in, so the
    /// result is coincident with `self`.
    pub fn shading_closure(&self) -> MeshPattern {
        let mut pattern = self.clone();
        while let Some(&cell) = pattern.shadable_boxes().first() {
            pattern = pattern.shade(cell);
        }
        pattern
    }

    /// Runs `anchor` on the pattern and `cells` in each of the four
    /// orientations. Anchors are points given as 0-based `(index, value - 1)`
    /// in the rotated pattern; they are turned back before being reported.
    fn deductions(
        &self,
        cells: &[Cell],
        anchor: impl Fn(&MeshPattern, &[Cell]) -> Option<Cell>,
    ) -> Vec<usize> {
        let n = self.len();
        let mut pattern = self.clone();
        let mut cells = cells.to_vec();
        let mut found = Vec::new();
        for turn in 0..4 {
            if let Some(mut point) = anchor(&pattern, &cells) {
                // A point exists, so n >= 1. Points live on an n x n grid.
                for _ in 0..(4 - turn) % 4 {
                    point = rotate_box(n - 1, point);
                }
                found.push(point.1 + 1);
            }
            if turn < 3 {
                pattern = pattern.rotate_right();
                for c in cells.iter_mut() {
                    *c = rotate_box(n, *c);
                }
            }
        }
        found
    }

    /// Single-box rule for the box north-east of the point in column `i`.
    fn shade_anchor(&self, (i, j): Cell) -> Option<Cell> {
        if self.is_shaded((i, j)) {
            return None;
        }
        if i == 0 || self.perm()[i - 1] != j {
            return None;
        }
        if self.is_shaded((i - 1, j - 1)) {
            return None;
        }
        if self.is_shaded((i, j - 1)) && self.is_shaded((i - 1, j)) {
            return None;
        }
        let n = self.len();
        // Shading in the row below the point must continue into the row above.
        let rows_agree = (0..=n)
            .filter(|&l| l != i - 1 && l != i)
            .all(|l| !self.is_shaded((l, j - 1)) || self.is_shaded((l, j)));
        // Shading left of the point must continue to its right.
        let columns_agree = (0..=n)
            .filter(|&l| l != j - 1 && l != j)
            .all(|l| !self.is_shaded((i - 1, l)) || self.is_shaded((i, l)));
        (rows_agree && columns_agree).then_some((i - 1, j - 1))
    }

    /// Two-box rule for the boxes north-east and south-east of the point in
    /// column `hi.0`.
    fn shade_pair_anchor(&self, a: Cell, b: Cell) -> Option<Cell> {
        let (hi, lo) = if a.1 < b.1 { (b, a) } else { (a, b) };
        let (i, j) = hi;
        if i == 0 || self.perm()[i - 1] != j {
            return None;
        }
        if lo != (i, j - 1) {
            return None;
        }
        if [hi, lo, (i - 1, j), (i - 1, j - 1)]
            .iter()
            .any(|&c| self.is_shaded(c))
        {
            return None;
        }
        let n = self.len();
        let columns_agree = (0..=n)
            .filter(|&y| y != j && y != j - 1)
            .all(|y| !self.is_shaded((i - 1, y)) || self.is_shaded((i, y)));
        let rows_match = (0..=n)
            .filter(|&x| x != i && x != i - 1)
            .all(|x| self.is_shaded((x, j)) == self.is_shaded((x, j - 1)));
        (columns_agree && rows_match).then_some((i - 1, j - 1))
    }
}
