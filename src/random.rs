use rand::Rng;
use rand::seq::SliceRandom;

use crate::{MeshPattern, Permutation};

/// Parameters for random mesh pattern generation.
#[derive(Debug, Clone)]
pub struct RandomParams {
    /// Probability that any single box of the grid is shaded.
    pub shade_probability: f64,
}

impl Default for RandomParams {
    fn default() -> Self {
        Self {
            shade_probability: 0.5,
        }
    }
}

/// Draws a uniformly random permutation of length `n`.
pub fn random_permutation<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Permutation {
    let mut values: Vec<usize> = (1..=n).collect();
    values.shuffle(rng);
    Permutation::from_vec_unchecked(values)
}

/// Draws a random mesh pattern of length `n`: a uniform permutation with each
/// box shaded independently with probability `shade_probability`.
///
/// # Panics
/// Panics if `shade_probability` is not in `[0.0, 1.0]`.
pub fn random_mesh_pattern<R: Rng + ?Sized>(
    n: usize,
    rng: &mut R,
    params: &RandomParams,
) -> MeshPattern {
    assert!(
        (0.0..=1.0).contains(&params.shade_probability),
        "shade_probability must be in [0.0, 1.0]"
    );
    let perm = random_permutation(n, rng);
    let mut mesh = Vec::new();
    for x in 0..=n {
        for y in 0..=n {
            if rng.random::<f64>() < params.shade_probability {
                mesh.push((x, y));
            }
        }
    }
    MeshPattern::from_parts(perm, mesh.into_iter().collect())
}

/// An endless stream of random mesh patterns of a fixed length.
///
/// # Example
///
/// ```
/// use mesh_patterns::random::{PatternSampler, RandomParams};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha20Rng;
///
/// let rng = ChaCha20Rng::seed_from_u64(0);
/// let sampler = PatternSampler::new(3, rng, RandomParams::default());
///
/// for p in sampler.take(5) {
///     assert_eq!(p.len(), 3);
/// }
/// ```
pub struct PatternSampler<R> {
    n: usize,
    rng: R,
    params: RandomParams,
}

impl<R: Rng> PatternSampler<R> {
    /// Creates a sampler for patterns of length `n`.
    ///
    /// # Panics
    /// Panics if `shade_probability` is not in `[0.0, 1.0]`.
    pub fn new(n: usize, rng: R, params: RandomParams) -> Self {
        assert!(
            (0.0..=1.0).contains(&params.shade_probability),
            "shade_probability must be in [0.0, 1.0]"
        );
        Self { n, rng, params }
    }
}

impl<R: Rng> Iterator for PatternSampler<R> {
    type Item = MeshPattern;

    fn next(&mut self) -> Option<Self::Item> {
        Some(random_mesh_pattern(self.n, &mut self.rng, &self.params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn reproducibility_same_seed_same_output() {
        let params = RandomParams::default();
        let a: Vec<_> = PatternSampler::new(4, ChaCha20Rng::seed_from_u64(0), params.clone())
            .take(10)
            .collect();
        let b: Vec<_> = PatternSampler::new(4, ChaCha20Rng::seed_from_u64(0), params)
            .take(10)
            .collect();
        assert_eq!(a, b, "Same seed should produce identical patterns");
    }

    #[test]
    fn permutations_are_valid() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        for n in 0..=12 {
            let p = random_permutation(n, &mut rng);
            assert!(Permutation::try_from(p.values().to_vec()).is_ok());
            assert_eq!(p.len(), n);
        }
    }

    #[test]
    fn extreme_probabilities() {
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let empty = RandomParams {
            shade_probability: 0.0,
        };
        let full = RandomParams {
            shade_probability: 1.0,
        };
        for n in 0..=5 {
            assert!(random_mesh_pattern(n, &mut rng, &empty).mesh().is_empty());
            assert_eq!(
                random_mesh_pattern(n, &mut rng, &full).mesh().len(),
                (n + 1) * (n + 1)
            );
        }
    }

    #[test]
    fn reaches_every_permutation_of_small_length() {
        use std::collections::HashSet;

        let mut rng = ChaCha20Rng::seed_from_u64(11);
        let seen: HashSet<Permutation> = (0..500).map(|_| random_permutation(4, &mut rng)).collect();
        assert_eq!(seen.len(), 24);
    }

    #[test]
    #[should_panic(expected = "shade_probability")]
    fn rejects_bad_probability() {
        let rng = ChaCha20Rng::seed_from_u64(0);
        PatternSampler::new(
            2,
            rng,
            RandomParams {
                shade_probability: 1.5,
            },
        );
    }
}
