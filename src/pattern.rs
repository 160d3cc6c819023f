use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use num_bigint::BigUint;

use crate::Permutation;
use crate::error::MeshError;
use crate::geometry::{Cell, in_grid};

/// A mesh pattern: a permutation of length `n` together with a set of shaded
/// boxes on its `(n + 1) x (n + 1)` grid.
///
/// Values are immutable. Every transformation returns a new pattern, so a
/// `MeshPattern` can be shared freely between threads.
#[derive(Clone, PartialEq, Eq)]
pub struct MeshPattern {
    perm: Permutation,
    mesh: HashSet<Cell>,
}

impl MeshPattern {
    /// Creates a mesh pattern from a permutation and its shaded boxes.
    ///
    /// Duplicate boxes are collapsed.
    ///
    /// # Panics
    /// Panics if a box lies outside `[0, n] x [0, n]`.
    pub fn new(perm: Permutation, mesh: impl IntoIterator<Item = Cell>) -> Self {
        match Self::try_new(perm, mesh) {
            Ok(pattern) => pattern,
            Err(e) => panic!("{e}"),
        }
    }

    /// Fallible version of [`new`](Self::new).
    pub fn try_new(
        perm: Permutation,
        mesh: impl IntoIterator<Item = Cell>,
    ) -> Result<Self, MeshError> {
        let n = perm.len();
        let mesh = mesh
            .into_iter()
            .map(|cell| {
                if in_grid(n, cell) {
                    Ok(cell)
                } else {
                    Err(MeshError::CellOutOfRange { cell, n })
                }
            })
            .collect::<Result<HashSet<_>, _>>()?;
        Ok(Self { perm, mesh })
    }

    /// A classical pattern: no shading.
    pub fn classical(perm: Permutation) -> Self {
        Self {
            perm,
            mesh: HashSet::new(),
        }
    }

    /// Builds a pattern from boxes already known to fit the grid.
    pub(crate) fn from_parts(perm: Permutation, mesh: HashSet<Cell>) -> Self {
        debug_assert!(
            mesh.iter().all(|&c| in_grid(perm.len(), c)),
            "shading does not fit the grid"
        );
        Self { perm, mesh }
    }

    /// Returns the underlying classical permutation.
    pub fn perm(&self) -> &Permutation {
        &self.perm
    }

    /// Returns the set of shaded boxes.
    pub fn mesh(&self) -> &HashSet<Cell> {
        &self.mesh
    }

    /// Returns the shaded boxes in lexicographic order.
    pub fn sorted_mesh(&self) -> Vec<Cell> {
        let mut cells: Vec<Cell> = self.mesh.iter().copied().collect();
        cells.sort_unstable();
        cells
    }

    /// Returns the length of the underlying permutation.
    pub fn len(&self) -> usize {
        self.perm.len()
    }

    /// Returns true if the underlying permutation is empty.
    pub fn is_empty(&self) -> bool {
        self.perm.is_empty()
    }

    /// Returns true if `cell` is shaded.
    #[inline]
    pub fn is_shaded(&self, cell: Cell) -> bool {
        self.mesh.contains(&cell)
    }

    /// Returns a copy with `cell` shaded as well.
    ///
    /// # Panics
    /// Panics if `cell` lies outside the grid.
    pub fn shade(&self, cell: Cell) -> Self {
        self.shade_all([cell])
    }

    /// Returns a copy with every box in `cells` shaded as well.
    ///
    /// # Panics
    /// Panics if a box lies outside the grid.
    pub fn shade_all(&self, cells: impl IntoIterator<Item = Cell>) -> Self {
        Self::new(
            self.perm.clone(),
            self.mesh.iter().copied().chain(cells),
        )
    }

    /// The boxes that have a point of the permutation at one of their corners.
    pub fn non_pointless_boxes(&self) -> HashSet<Cell> {
        self.perm
            .iter()
            .enumerate()
            .flat_map(|(i, v)| [(i + 1, v), (i, v), (i, v - 1), (i + 1, v - 1)])
            .collect()
    }

    /// Encodes the shading as a bitmask: box `(x, y)` sets bit `x * (n + 1) + y`.
    pub fn rank(&self) -> BigUint {
        let n = self.len();
        let mut bits = BigUint::default();
        for &(x, y) in &self.mesh {
            bits.set_bit(bit_index(n, (x, y)), true);
        }
        bits
    }

    /// Rebuilds a pattern from a permutation and a mask produced by
    /// [`rank`](Self::rank). Bits beyond the grid are ignored.
    pub fn unrank(perm: Permutation, bits: &BigUint) -> Self {
        let n = perm.len();
        let mesh = (0..=n)
            .flat_map(|x| (0..=n).map(move |y| (x, y)))
            .filter(|&cell| bits.bit(bit_index(n, cell)))
            .collect();
        Self { perm, mesh }
    }
}

fn bit_index(n: usize, (x, y): Cell) -> u64 {
    (x * (n + 1) + y) as u64
}

impl Hash for MeshPattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.perm.hash(state);
        self.sorted_mesh().hash(state);
    }
}

impl fmt::Debug for MeshPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MeshPattern({}, {:?})", self.perm, self.sorted_mesh())
    }
}

/// Draws the grid top row first: points as their value (or `o` once values
/// need two digits), empty crossings as `+`, shaded boxes as `#`.
impl fmt::Display for MeshPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.len();
        for i in 0..2 * n + 1 {
            if i > 0 {
                writeln!(f)?;
            }
            for j in 0..2 * n + 1 {
                let c = match (i % 2, j % 2) {
                    (1, 1) => {
                        let value = n - (i - 1) / 2;
                        if self.perm[(j - 1) / 2] != value {
                            '+'
                        } else if n < 10 {
                            char::from_digit(value as u32, 10).unwrap_or('o')
                        } else {
                            'o'
                        }
                    }
                    (0, 1) => '|',
                    (1, 0) => '-',
                    _ if self.is_shaded((j / 2, n - i / 2)) => '#',
                    _ => ' ',
                };
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}
