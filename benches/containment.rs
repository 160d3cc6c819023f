//! Benchmarks for containment and shading deductions.
//!
//! - `contained_in`: random patterns of length 3 and 4 against random hosts
//! - `can_shade`: every box of random patterns of length 4
//! - `shading_closure`: random patterns of length 3

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use mesh_patterns::random::{PatternSampler, RandomParams, random_permutation};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn sparse() -> RandomParams {
    RandomParams {
        shade_probability: 0.2,
    }
}

fn bench_contained_in(c: &mut Criterion) {
    for (k, m) in [(3, 8), (4, 10), (4, 14)] {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let patterns: Vec<_> = PatternSampler::new(k, rng.clone(), sparse()).take(16).collect();
        let hosts: Vec<_> = (0..16).map(|_| random_permutation(m, &mut rng)).collect();

        c.bench_function(&format!("contained_in k={k} m={m}"), |b| {
            b.iter(|| {
                let mut count = 0;
                for p in &patterns {
                    for h in &hosts {
                        count += usize::from(p.contained_in(black_box(h)));
                    }
                }
                black_box(count)
            })
        });
    }
}

fn bench_can_shade(c: &mut Criterion) {
    let rng = ChaCha20Rng::seed_from_u64(7);
    let patterns: Vec<_> = PatternSampler::new(4, rng, sparse()).take(32).collect();

    c.bench_function("can_shade n=4", |b| {
        b.iter(|| {
            let mut found = 0;
            for p in &patterns {
                for x in 0..=4 {
                    for y in 0..=4 {
                        found += p.can_shade(black_box((x, y))).len();
                    }
                }
            }
            black_box(found)
        })
    });
}

fn bench_shading_closure(c: &mut Criterion) {
    let rng = ChaCha20Rng::seed_from_u64(11);
    let patterns: Vec<_> = PatternSampler::new(3, rng, sparse()).take(32).collect();

    c.bench_function("shading_closure n=3", |b| {
        b.iter(|| {
            for p in &patterns {
                black_box(p.shading_closure());
            }
        })
    });
}

criterion_group!(
    benches,
    bench_contained_in,
    bench_can_shade,
    bench_shading_closure
);
criterion_main!(benches);
