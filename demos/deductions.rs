//! Find boxes that can be shaded for free in random mesh patterns.
//!
//! Usage: RUST_LOG=debug cargo run --example deductions -- [n] [count] [seed]

use env_logger::Env;
use mesh_patterns::random::{PatternSampler, RandomParams};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::env;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let n: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(3);
    let count: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(5);
    let seed: u64 = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(0);

    let rng = ChaCha20Rng::seed_from_u64(seed);
    let params = RandomParams {
        shade_probability: 0.25,
    };

    for pattern in PatternSampler::new(n, rng, params).take(count) {
        println!("{}", pattern);
        let boxes = pattern.shadable_boxes();
        println!("shadable boxes: {:?}", boxes);
        for &cell in &boxes {
            println!("  {:?} justified by points {:?}", cell, pattern.can_shade(cell));
        }
        let closed = pattern.shading_closure();
        println!("closure adds {} boxes:", closed.mesh().len() - pattern.mesh().len());
        println!("{}", closed);
        println!();
    }
}
