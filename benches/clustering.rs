use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::prelude::*;
use symnmf::cluster::{similarity, SymNmf};
use symnmf::Matrix;

fn blobs(n: usize, d: usize, k: usize, rng: &mut StdRng) -> Matrix {
    let rows: Vec<Vec<f64>> = (0..n)
        .map(|i| {
            let center = (i % k) as f64 * 4.0;
            (0..d).map(|_| center + rng.random::<f64>()).collect()
        })
        .collect();
    Matrix::from_rows(&rows).unwrap()
}

fn bench_similarity(c: &mut Criterion) {
    let mut group = c.benchmark_group("similarity");

    let mut rng = StdRng::seed_from_u64(42);
    let x = blobs(500, 16, 5, &mut rng);

    group.bench_function("normalized_n500_d16", |b| {
        b.iter(|| similarity::normalized_similarity(black_box(&x)).unwrap())
    });

    group.finish();
}

fn bench_symnmf(c: &mut Criterion) {
    let mut group = c.benchmark_group("symnmf");

    let mut rng = StdRng::seed_from_u64(42);
    let k = 5;
    let x = blobs(500, 16, k, &mut rng);
    let w = similarity::normalized_similarity(&x).unwrap();
    let model = SymNmf::new(k).with_max_iter(20).with_tol(1e-12);
    let h0 = model
        .init_factor(&w, &mut StdRng::seed_from_u64(7))
        .unwrap();

    group.bench_function("fit_n500_k5_20iter", |b| {
        b.iter(|| model.fit(black_box(&w), h0.clone()).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_similarity, bench_symnmf);
criterion_main!(benches);
