use kcluster::*;
use rand::prelude::*;

fn main() -> kcluster::Result<()> {
    env_logger::init();

    let (point_cnt, stride, k, max_rounds) = (1000, 5, 5, 200);

    // Per-dimension value ranges for the synthesized observations.
    let ranges = [30.0..60.0, 50.0..150.0, 100.0..150.0, 25.0..175.0, 10.0..20.0];

    let mut rnd = StdRng::seed_from_u64(0xDEAD_BEEF);
    let mut data = Vec::with_capacity(point_cnt * stride);
    for _ in 0..point_cnt {
        for range in ranges.iter() {
            data.push(rnd.gen_range(range.clone()));
        }
    }

    let config = EngineConfig::build()
        .random_generator(StdRng::seed_from_u64(1))
        .init_done(&|engine: &ClusterEngine<f64>| println!("Seeded {} centroids.", engine.cluster_count()))
        .round_done(&|engine: &ClusterEngine<f64>, round: usize, moved: usize| {
            println!(
                "Round {:3} - moved {:4} points | distortion {:.2}",
                round,
                moved,
                engine.total_distortion().unwrap_or(f64::NAN)
            )
        })
        .build();

    let mut engine = ClusterEngine::new();
    engine.ingest(&data, stride)?;
    engine.set_cluster_count(k)?;
    engine.initialize_centroids(&config)?;
    let outcome = engine.converge(max_rounds, &config)?;

    println!("Finished after {} rounds: {:?}", outcome.rounds, outcome.termination);
    println!("Cluster sizes: {:?}", engine.cluster_sizes());
    Ok(())
}
