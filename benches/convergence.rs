use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kcluster::{ClusterEngine, EngineConfig};
use rand::prelude::*;

fn bench_convergence(c: &mut Criterion) {
    let mut group = c.benchmark_group("converge");

    // Generate synthetic data
    let mut rng = StdRng::seed_from_u64(42);
    let n = 1000;
    let d = 16;
    let k = 10;
    let data: Vec<f64> = (0..n * d).map(|_| rng.gen_range(0.0..1.0)).collect();

    group.bench_function("n1000_d16_k10", |b| {
        b.iter(|| {
            let mut engine = ClusterEngine::new();
            engine.ingest(black_box(&data), d).unwrap();
            engine.set_cluster_count(k).unwrap();
            let config = EngineConfig::build().random_generator(StdRng::seed_from_u64(7)).build();
            engine.initialize_centroids(&config).unwrap();
            engine.converge(25, &config).unwrap();
            engine.moved_count()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_convergence);
criterion_main!(benches);
