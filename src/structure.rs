use std::collections::HashSet;

use crate::geometry::{Cell, Direction};
use crate::{MeshPattern, Permutation};

impl MeshPattern {
    /// Inserts a new point into box `(x, y)`.
    ///
    /// The point becomes the entry at 0-based index `x` with value `y + 1`;
    /// later entries shift right and values `>= y + 1` shift up. A shaded box
    /// cut by the new column or row line is split into the boxes on both
    /// sides. With `shade_dir` the two boxes touching the new point on that
    /// side are shaded too.
    ///
    /// # Panics
    /// Panics if `(x, y)` is shaded or lies outside the grid.
    pub fn add_point(&self, cell: Cell, shade_dir: Option<Direction>) -> MeshPattern {
        assert!(
            !self.is_shaded(cell),
            "cannot add a point to shaded box {cell:?}"
        );
        self.add_point_unchecked(cell, shade_dir)
    }

    /// Like [`add_point`](Self::add_point) but allows inserting into a shaded
    /// box.
    ///
    /// # Panics
    /// Panics if `(x, y)` lies outside the grid.
    pub fn add_point_unchecked(&self, (x, y): Cell, shade_dir: Option<Direction>) -> MeshPattern {
        let n = self.len();
        assert!(x <= n && y <= n, "box {:?} outside the grid", (x, y));

        let mut values: Vec<usize> = self
            .perm()
            .iter()
            .map(|v| if v < y + 1 { v } else { v + 1 })
            .collect();
        values.insert(x, y + 1);

        let mut mesh = HashSet::new();
        for &(a, b) in self.mesh() {
            for na in split(a, x) {
                for nb in split(b, y) {
                    mesh.insert((na, nb));
                }
            }
        }
        if let Some(dir) = shade_dir {
            mesh.extend(dir.adjacent_boxes((x, y)));
        }

        MeshPattern::from_parts(Permutation::from_vec_unchecked(values), mesh)
    }

    /// Returns the pattern induced on the points in the given columns.
    ///
    /// `columns` holds 1-based column indices; duplicates are ignored. A box
    /// of the result is shaded when the region it covers in `self` holds no
    /// other point and every box of `self` inside that region is shaded.
    ///
    /// # Panics
    /// Panics if a column is outside `1..=len()`.
    pub fn sub_mesh(&self, columns: &[usize]) -> MeshPattern {
        let n = self.len();
        assert!(
            columns.iter().all(|&c| (1..=n).contains(&c)),
            "columns {columns:?} are not all in 1..={n}"
        );
        let mut columns = columns.to_vec();
        columns.sort_unstable();
        columns.dedup();

        let perm = self.perm();
        let chosen: Vec<usize> = columns.iter().map(|&c| perm[c - 1]).collect();

        let mut ver_lines = Vec::with_capacity(columns.len() + 2);
        ver_lines.push(0);
        ver_lines.extend(&columns);
        ver_lines.push(n + 1);

        let mut hor_lines = Vec::with_capacity(chosen.len() + 2);
        hor_lines.push(0);
        hor_lines.extend(&chosen);
        hor_lines.push(n + 1);
        hor_lines.sort_unstable();

        let mut mesh = HashSet::new();
        for (i, cols) in ver_lines.windows(2).enumerate() {
            for (j, rows) in hor_lines.windows(2).enumerate() {
                if self.region_is_shaded(cols[0], cols[1], rows[0], rows[1]) {
                    mesh.insert((i, j));
                }
            }
        }

        MeshPattern::from_parts(Permutation::to_standard(&chosen), mesh)
    }

    /// Whether the open region between column lines `left`, `right` and
    /// value lines `lower`, `upper` is empty of points and fully shaded.
    fn region_is_shaded(&self, left: usize, right: usize, lower: usize, upper: usize) -> bool {
        let has_point = (left + 1..right).any(|c| {
            let v = self.perm()[c - 1];
            lower < v && v < upper
        });
        !has_point
            && (left..right).all(|h| (lower..upper).all(|v| self.is_shaded((h, v))))
    }
}

/// The lines a box index maps to once a new line is inserted at `at`.
fn split(index: usize, at: usize) -> Vec<usize> {
    use std::cmp::Ordering;

    match index.cmp(&at) {
        Ordering::Less => vec![index],
        Ordering::Equal => vec![index, index + 1],
        Ordering::Greater => vec![index + 1],
    }
}
