//! Draw a mesh pattern with random shading and its rotations.
//!
//! Usage: cargo run --example render -- <values> [seed]
//!
//! Example:
//!   cargo run --example render -- 2,4,1,3 42

use mesh_patterns::random::RandomParams;
use mesh_patterns::{MeshPattern, Permutation};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();

    let perm = args
        .get(1)
        .and_then(|s| {
            let values: Option<Vec<usize>> = s.split(',').map(|v| v.trim().parse().ok()).collect();
            Permutation::try_from(values?).ok()
        })
        .unwrap_or_else(|| {
            eprintln!("Usage: {} <comma separated permutation> [seed]", args[0]);
            std::process::exit(1);
        });

    let seed: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(0);
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let params = RandomParams::default();

    let n = perm.len();
    let mesh: Vec<_> = (0..=n)
        .flat_map(|x| (0..=n).map(move |y| (x, y)))
        .filter(|_| rng.random::<f64>() < params.shade_probability)
        .collect();
    let pattern = MeshPattern::new(perm, mesh);

    println!("{:?}", pattern);
    println!("rank = {}", pattern.rank());
    println!();

    let mut current = pattern;
    for turn in 0..4 {
        println!("rotated {} times:", turn);
        println!("{}", current);
        println!();
        current = current.rotate_right();
    }
}
