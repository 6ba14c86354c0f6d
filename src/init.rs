use crate::centroids::CentroidSet;
use crate::config::EngineConfig;
use crate::distance::squared_euclidean;
use crate::points::PointStore;
use crate::primitive::Primitive;
use log::debug;
use rand::{Rng, RngCore};

/// Redraws attempted per centroid before a minimum-separation
/// requirement is given up on and the last candidate is kept.
const SEPARATION_ATTEMPTS: usize = 16;

/// Per-dimension `[lower, upper]` bounds over all stored points.
#[derive(Clone, Debug)]
pub(crate) struct Bounds<T: Primitive> {
    pub lower: Vec<T>,
    pub upper: Vec<T>,
}

impl<T: Primitive> Bounds<T> {
    /// Computes the bounding box in one scan over the store.
    /// Returns `None` for an empty store.
    pub fn compute(points: &PointStore<T>) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let stride = points.stride();
        let mut lower = vec![T::infinity(); stride];
        let mut upper = vec![T::neg_infinity(); stride];
        for row in points.rows() {
            for (d, &v) in row.iter().enumerate() {
                if v < lower[d] {
                    lower[d] = v;
                }
                if v > upper[d] {
                    upper[d] = v;
                }
            }
        }
        Some(Self { lower, upper })
    }

    /// Fills `out` with one value per dimension, drawn uniformly from
    /// `[lower, upper)`. A degenerate dimension (`lower == upper`, e.g.
    /// a constant column or a single-point store) yields the bound
    /// itself.
    pub fn sample_point(&self, rnd: &mut dyn RngCore, out: &mut [T]) {
        out.iter_mut()
            .zip(self.lower.iter().zip(self.upper.iter()))
            .for_each(|(o, (&lb, &ub))| {
                *o = if ub > lb { rnd.gen_range(lb..ub) } else { lb };
            });
    }
}

/// Replaces the centroid collection with `k` fresh centroids drawn
/// uniformly from `bounds`, honoring the configured minimum separation.
pub(crate) fn seed_centroids<T: Primitive>(
    bounds: &Bounds<T>,
    centroids: &mut CentroidSet<T>,
    k: usize,
    config: &EngineConfig<'_, T>,
) {
    let stride = bounds.lower.len();
    centroids.reset(k, stride);

    let mut rnd = config.rnd.borrow_mut();
    let mut candidate = vec![T::zero(); stride];
    for ci in 0..k {
        bounds.sample_point(&mut *rnd, &mut candidate);
        if let Some(min_separation) = config.min_separation {
            let mut attempts = 1;
            while attempts < SEPARATION_ATTEMPTS
                && (0..ci).any(|prev| squared_euclidean(centroids.row(prev), &candidate) < min_separation)
            {
                bounds.sample_point(&mut *rnd, &mut candidate);
                attempts += 1;
            }
        }
        centroids.set_from_iter(ci, candidate.iter().cloned());
    }
    debug!("seeded {} centroids with {} dimensions inside the data bounding box", k, stride);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    fn store(buffer: &[f64], stride: usize) -> PointStore<f64> {
        let mut store = PointStore::new();
        store.ingest(buffer, stride).unwrap();
        store
    }

    #[test]
    fn bounds_track_each_dimension_independently() {
        let store = store(&[1.0, 10.0, 3.0, 5.0, 2.0, 7.0], 2);
        let bounds = Bounds::compute(&store).unwrap();

        assert_eq!(bounds.lower, vec![1.0, 5.0]);
        assert_eq!(bounds.upper, vec![3.0, 10.0]);
    }

    #[test]
    fn bounds_of_empty_store_are_none() {
        let store: PointStore<f64> = PointStore::new();
        assert!(Bounds::compute(&store).is_none());
    }

    #[test]
    fn seeded_centroids_lie_inside_bounds() {
        let mut rnd = StdRng::seed_from_u64(7);
        let mut buffer = vec![0.0f64; 100 * 3];
        buffer.iter_mut().for_each(|v| *v = rnd.gen_range(-50.0..50.0));
        let store = store(&buffer, 3);
        let bounds = Bounds::compute(&store).unwrap();

        let config = EngineConfig::build().random_generator(StdRng::seed_from_u64(1)).build();
        let mut centroids = CentroidSet::new();
        seed_centroids(&bounds, &mut centroids, 8, &config);

        assert_eq!(centroids.len(), 8);
        for row in centroids.rows() {
            for (d, &v) in row.iter().enumerate() {
                assert!(v >= bounds.lower[d] && v <= bounds.upper[d]);
            }
        }
    }

    #[test]
    fn degenerate_dimension_pins_to_bound() {
        // Second dimension is constant across all points.
        let store = store(&[1.0, 4.0, 3.0, 4.0, 2.0, 4.0], 2);
        let bounds = Bounds::compute(&store).unwrap();

        let config = EngineConfig::build().random_generator(StdRng::seed_from_u64(2)).build();
        let mut centroids = CentroidSet::new();
        seed_centroids(&bounds, &mut centroids, 4, &config);

        for row in centroids.rows() {
            assert_eq!(row[1], 4.0);
        }
    }

    #[test]
    fn min_separation_spreads_seeds() {
        let store = store(&[0.0, 0.0, 100.0, 100.0], 2);
        let bounds = Bounds::compute(&store).unwrap();

        let config = EngineConfig::build()
            .random_generator(StdRng::seed_from_u64(3))
            .min_separation(400.0)
            .build();
        let mut centroids = CentroidSet::new();
        seed_centroids(&bounds, &mut centroids, 3, &config);

        for a in 0..3 {
            for b in a + 1..3 {
                assert!(squared_euclidean(centroids.row(a), centroids.row(b)) >= 400.0);
            }
        }
    }
}
