use kcluster::*;
use rand::prelude::*;

fn main() -> kcluster::Result<()> {
    env_logger::init();

    let (per_blob, stride, k, max_rounds) = (500, 3, 2, 100);
    let centers = [[0.0f64, 0.0, 0.0], [25.0, 25.0, 25.0]];

    // Synthesize two well-separated blobs.
    let mut rnd = StdRng::seed_from_u64(0xDEAD_BEEF);
    let mut data = Vec::with_capacity(centers.len() * per_blob * stride);
    for center in centers {
        for _ in 0..per_blob {
            for value in center {
                data.push(value + rnd.gen_range(-2.0..2.0));
            }
        }
    }

    let mut engine = ClusterEngine::new();
    engine.ingest(&data, stride)?;
    engine.set_cluster_count(k)?;

    let config = EngineConfig::build().random_generator(StdRng::seed_from_u64(42)).build();
    engine.initialize_centroids(&config)?;
    let outcome = engine.converge(max_rounds, &config)?;

    println!(
        "Converged after {} rounds ({:?}), final moved count: {}",
        outcome.rounds, outcome.termination, outcome.moved
    );
    for ci in 0..k {
        println!(
            "Cluster {}: {} points, centroid {:?}",
            ci,
            engine.cluster_sizes()[ci],
            engine.centroid(ci)
        );
    }
    Ok(())
}
