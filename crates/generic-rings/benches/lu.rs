//! Benchmarks for LU decomposition and pivot search.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use generic_rings::prelude::*;
use generic_rings::find_pivot;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn random_square(n: usize, ctx: &GrCtx, seed: u64) -> GrMat {
    let mut m = GrMat::new(n, n, ctx);
    let _ = m.randtest(&mut StdRng::seed_from_u64(seed), &RandOptions::default(), ctx);
    m
}

fn bench_lu(c: &mut Criterion) {
    let rings = [
        ("nmod", GrCtx::new(Nmod::new(1_000_003).unwrap())),
        ("rational", GrCtx::new(RationalField::new())),
        ("ball", GrCtx::new(BallRing::new())),
    ];

    let mut group = c.benchmark_group("lu_classical");
    for n in [4usize, 16, 32] {
        for (name, ctx) in &rings {
            let a = random_square(n, ctx, 11);
            let mut lu = GrMat::new(n, n, ctx);
            group.bench_with_input(BenchmarkId::new(*name, n), &n, |bench, _| {
                bench.iter(|| black_box(lu_classical(&mut lu, black_box(&a), LuMode::Full, ctx)));
            });
        }
    }
    group.finish();
}

fn bench_pivot_search(c: &mut Criterion) {
    let ctx = GrCtx::new(Nmod::new(1_000_003).unwrap());
    let a = random_square(64, &ctx, 12);
    c.bench_function("find_pivot_64_rows", |bench| {
        bench.iter(|| black_box(find_pivot(black_box(&a), 0..64, 0, &ctx)));
    });
}

criterion_group!(benches, bench_lu, bench_pivot_search);
criterion_main!(benches);
