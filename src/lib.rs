#![doc = include_str!("../README.md")]

mod containment;
mod error;
pub mod geometry;
mod pattern;
mod permutation;
pub mod random;
mod shading;
mod structure;
mod symmetry;

pub use containment::SearchParams;
pub use error::{MeshError, PermutationError, SearchError};
pub use geometry::{Cell, Direction};
pub use pattern::MeshPattern;
pub use permutation::{AllPermutations, Permutation};
