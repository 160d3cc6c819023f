use std::fmt;
use std::ops::Index;

use crate::error::PermutationError;

/// A permutation of `{1..n}` in one-line notation.
///
/// The entry at 0-based index `i` is the value plotted at column `i + 1`.
/// Every operation returns a new permutation; values are never mutated in
/// place once constructed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Permutation {
    values: Vec<usize>,
}

impl Permutation {
    /// Creates a permutation from its one-line notation.
    ///
    /// # Panics
    /// Panics if `values` is not a permutation of `1..=values.len()`.
    pub fn new(values: Vec<usize>) -> Self {
        match Self::try_from(values) {
            Ok(perm) => perm,
            Err(e) => panic!("{e}"),
        }
    }

    /// Creates the identity permutation `1 2 .. n`.
    pub fn identity(n: usize) -> Self {
        Self {
            values: (1..=n).collect(),
        }
    }

    /// Wraps values already known to form a permutation.
    pub(crate) fn from_vec_unchecked(values: Vec<usize>) -> Self {
        debug_assert!(is_permutation(&values), "{values:?} is not a permutation");
        Self { values }
    }

    /// Maps a sequence of distinct values to the permutation with the same
    /// relative order.
    ///
    /// Equal values are ranked by position, left to right.
    pub fn to_standard<T: Ord>(seq: &[T]) -> Self {
        let mut order: Vec<usize> = (0..seq.len()).collect();
        order.sort_by(|&a, &b| seq[a].cmp(&seq[b]));
        let mut values = vec![0; seq.len()];
        for (rank, &i) in order.iter().enumerate() {
            values[i] = rank + 1;
        }
        Self { values }
    }

    /// Returns the length of the permutation.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true for the empty permutation.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the value at 0-based index `i`.
    ///
    /// # Panics
    /// Panics if `i >= len()`.
    pub fn get(&self, i: usize) -> usize {
        assert!(i < self.len(), "index out of bounds");
        self.values[i]
    }

    /// Returns the one-line notation as a slice.
    pub fn values(&self) -> &[usize] {
        &self.values
    }

    /// Iterates over the values left to right.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.values.iter().copied()
    }

    /// Values read right to left.
    pub fn reverse(&self) -> Self {
        Self {
            values: self.values.iter().rev().copied().collect(),
        }
    }

    /// Every value `v` replaced by `n + 1 - v`.
    pub fn complement(&self) -> Self {
        let n = self.len();
        Self {
            values: self.values.iter().map(|&v| n + 1 - v).collect(),
        }
    }

    /// The inverse permutation.
    pub fn inverse(&self) -> Self {
        let mut values = vec![0; self.len()];
        for (i, &v) in self.values.iter().enumerate() {
            values[v - 1] = i + 1;
        }
        Self { values }
    }

    /// Mirror across the horizontal axis: the complement.
    pub fn flip_horizontal(&self) -> Self {
        self.complement()
    }

    /// Mirror across the vertical axis: the reverse.
    pub fn flip_vertical(&self) -> Self {
        self.reverse()
    }

    /// Mirror across the diagonal `y = x`: the inverse.
    pub fn flip_diagonal(&self) -> Self {
        self.inverse()
    }

    /// Mirror across the antidiagonal: point `(i, v)` moves to
    /// `(n + 1 - v, n + 1 - i)`.
    pub fn flip_antidiagonal(&self) -> Self {
        let n = self.len();
        let mut values = vec![0; n];
        for (i, &v) in self.values.iter().enumerate() {
            values[n - v] = n - i;
        }
        Self { values }
    }

    /// Quarter turn clockwise: point `(i, v)` moves to `(v, n + 1 - i)`.
    pub fn rotate_right(&self) -> Self {
        let n = self.len();
        let mut values = vec![0; n];
        for (i, &v) in self.values.iter().enumerate() {
            values[v - 1] = n - i;
        }
        Self { values }
    }

    /// Iterates over all permutations of length `n` in lexicographic order.
    ///
    /// For `n = 0` this yields the empty permutation once.
    pub fn all(n: usize) -> AllPermutations {
        AllPermutations {
            next: Some((1..=n).collect()),
        }
    }
}

impl TryFrom<Vec<usize>> for Permutation {
    type Error = PermutationError;

    fn try_from(values: Vec<usize>) -> Result<Self, Self::Error> {
        if is_permutation(&values) {
            Ok(Self { values })
        } else {
            Err(PermutationError::NotAPermutation { values })
        }
    }
}

impl Index<usize> for Permutation {
    type Output = usize;

    fn index(&self, i: usize) -> &usize {
        &self.values[i]
    }
}

impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "]")
    }
}

/// Iterator over all permutations of a fixed length.
///
/// Created by [`Permutation::all`].
pub struct AllPermutations {
    next: Option<Vec<usize>>,
}

impl Iterator for AllPermutations {
    type Item = Permutation;

    fn next(&mut self) -> Option<Permutation> {
        let current = self.next.take()?;
        let mut succ = current.clone();
        if next_lexicographic(&mut succ) {
            self.next = Some(succ);
        }
        Some(Permutation { values: current })
    }
}

/// Advances `values` to its lexicographic successor. Returns false at the
/// last permutation.
fn next_lexicographic(values: &mut [usize]) -> bool {
    let Some(pivot) = (1..values.len()).rev().find(|&i| values[i - 1] < values[i]) else {
        return false;
    };
    let pivot = pivot - 1;
    let succ = (pivot + 1..values.len())
        .rev()
        .find(|&j| values[j] > values[pivot])
        .unwrap_or(pivot + 1);
    values.swap(pivot, succ);
    values[pivot + 1..].reverse();
    true
}

fn is_permutation(values: &[usize]) -> bool {
    let n = values.len();
    let mut seen = vec![false; n];
    for &v in values {
        if v == 0 || v > n || seen[v - 1] {
            return false;
        }
        seen[v - 1] = true;
    }
    true
}
