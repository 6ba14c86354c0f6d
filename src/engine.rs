use crate::centroids::CentroidSet;
use crate::config::{EmptyClusterPolicy, EngineConfig};
use crate::distance::squared_euclidean;
use crate::error::{Error, Result};
use crate::init::{self, Bounds};
use crate::points::PointStore;
use crate::primitive::Primitive;
use log::{debug, info};
use rayon::prelude::*;

/// Clustering engine: owns the ingested points and the current
/// centroids, and exposes the individual steps of Lloyd's algorithm.
///
/// The expected call order is [`ingest`](ClusterEngine::ingest) →
/// [`set_cluster_count`](ClusterEngine::set_cluster_count) (optional) →
/// [`initialize_centroids`](ClusterEngine::initialize_centroids) →
/// alternating [`assign_points`](ClusterEngine::assign_points) /
/// [`update_centroids`](ClusterEngine::update_centroids) until
/// [`moved_count`](ClusterEngine::moved_count) reaches zero.
/// [`converge`](ClusterEngine::converge) packages that loop with a
/// round cap.
///
/// All mutating operations take `&mut self`: one engine instance is
/// exclusively owned by its driver, and the borrow checker serializes
/// the steps. Internally the assignment step fans out over points with
/// rayon.
#[derive(Clone, Debug)]
pub struct ClusterEngine<T: Primitive> {
    points: PointStore<T>,
    centroids: CentroidSet<T>,
    cluster_count: usize,
    cluster_sizes: Vec<usize>,
    moved: Option<usize>,
}

impl<T: Primitive> Default for ClusterEngine<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Primitive> ClusterEngine<T> {
    /// Creates an engine with empty point and centroid stores.
    pub fn new() -> Self {
        Self {
            points: PointStore::new(),
            centroids: CentroidSet::new(),
            cluster_count: 0,
            cluster_sizes: Vec::new(),
            moved: None,
        }
    }

    /// Appends `buffer` to the point store as rows of `stride` values.
    ///
    /// The first successful call fixes the engine's stride and, when no
    /// cluster count was set yet, defaults it to the stride. Later calls
    /// must use the same stride. Returns the total number of scalars now
    /// stored (`point_count() * stride()`).
    ///
    /// A failed call leaves the engine untouched.
    pub fn ingest(&mut self, buffer: &[T], stride: usize) -> Result<usize> {
        let stored = self.points.ingest(buffer, stride)?;
        if self.cluster_count == 0 {
            self.cluster_count = self.points.stride();
        }
        Ok(stored)
    }

    /// Sets the number of clusters to search for.
    ///
    /// Takes effect at the next [`initialize_centroids`](ClusterEngine::initialize_centroids)
    /// call; centroids that were already seeded keep their old count
    /// until then.
    pub fn set_cluster_count(&mut self, k: usize) -> Result<()> {
        if k == 0 {
            return Err(Error::InvalidParameter { name: "cluster_count", message: "must be non-zero" });
        }
        self.cluster_count = k;
        Ok(())
    }

    /// Number of stored points.
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Number of dimensions per point; 0 until the first ingestion.
    pub fn stride(&self) -> usize {
        self.points.stride()
    }

    /// Number of clusters the next initialization will seed.
    pub fn cluster_count(&self) -> usize {
        self.cluster_count
    }

    /// Current cluster assignment per point, in ingestion order.
    /// `None` for points no assignment round has touched yet.
    pub fn assignments(&self) -> &[Option<usize>] {
        self.points.assignments()
    }

    /// Squared distance from each point to its assigned centroid, in
    /// ingestion order. Infinity for unassigned points.
    pub fn distances(&self) -> &[T] {
        self.points.distances()
    }

    /// Current centroids as one row-major slice
    /// (`[<centroid0>,<centroid1>,...]`). Empty until initialized.
    pub fn centroids(&self) -> &[T] {
        self.centroids.values()
    }

    /// The values of centroid `idx`. Panics when `idx` is out of range.
    pub fn centroid(&self, idx: usize) -> &[T] {
        self.centroids.row(idx)
    }

    /// Member count per cluster: one entry per centroid once
    /// initialized, current as of the most recent centroid update.
    pub fn cluster_sizes(&self) -> &[usize] {
        &self.cluster_sizes
    }

    /// Number of points whose assignment changed in the most recent
    /// assignment round; `None` before the first round. Zero signals
    /// convergence.
    pub fn moved_count(&self) -> Option<usize> {
        self.moved
    }

    /// Sum of all points' squared distances to their assigned centroids;
    /// `None` before the first assignment round.
    pub fn total_distortion(&self) -> Option<T> {
        self.moved.map(|_| self.points.distances().iter().cloned().sum())
    }

    /// Seeds [`cluster_count`](ClusterEngine::cluster_count) centroids
    /// by drawing uniformly inside the data's per-dimension bounding
    /// box, replacing any previous centroid collection.
    ///
    /// Also forgets all previous assignment state, so the next
    /// assignment round reports every point as moved. Fires the
    /// config's `init_done` callback on success.
    pub fn initialize_centroids(&mut self, config: &EngineConfig<'_, T>) -> Result<()> {
        if self.cluster_count == 0 {
            return Err(Error::NotReady("cluster count is zero"));
        }
        let Some(bounds) = Bounds::compute(&self.points) else {
            return Err(Error::NotReady("no points have been ingested"));
        };

        init::seed_centroids(&bounds, &mut self.centroids, self.cluster_count, config);
        self.points.reset_metadata();
        self.cluster_sizes = vec![0; self.cluster_count];
        self.moved = None;
        (config.init_done)(self);
        Ok(())
    }

    /// Assigns every point to its nearest centroid.
    ///
    /// Updates each point's assignment and squared distance
    /// unconditionally and counts the points whose assignment changed;
    /// the count is readable via [`moved_count`](ClusterEngine::moved_count).
    /// Ties between equally distant centroids resolve to the lowest
    /// centroid index.
    pub fn assign_points(&mut self) -> Result<()> {
        self.run_assignment().map(|_| ())
    }

    pub(crate) fn run_assignment(&mut self) -> Result<usize> {
        if self.centroids.is_empty() {
            return Err(Error::NotReady("centroids have not been initialized"));
        }
        if self.points.is_empty() {
            return Err(Error::NotReady("no points have been ingested"));
        }

        let point_count = self.points.len();
        // rayon splits work dynamically; per-point work is uniform here,
        // so hand it fixed-size packets instead.
        let work_packet_size = (point_count / rayon::current_num_threads()).max(1);

        let centroids = &self.centroids;
        let (values, stride, assignments, distances) = self.points.split_mut();
        let moved = values
            .par_chunks(stride)
            .with_min_len(work_packet_size)
            .zip(assignments.par_iter_mut())
            .zip(distances.par_iter_mut())
            .map(|((row, assignment), dist)| {
                let (best_idx, best_dist) = centroids
                    .rows()
                    .map(|c| squared_euclidean(row, c))
                    .enumerate()
                    .min_by(|(_, d0), (_, d1)| d0.partial_cmp(d1).unwrap())
                    .unwrap();
                let has_moved = *assignment != Some(best_idx);
                *assignment = Some(best_idx);
                *dist = best_dist;
                usize::from(has_moved)
            })
            .sum::<usize>();

        self.moved = Some(moved);
        debug!("assignment round moved {} of {} points", moved, point_count);
        Ok(moved)
    }

    /// Recomputes every centroid as the mean of its currently assigned
    /// points.
    ///
    /// A cluster with no members is handled by the config's
    /// [`EmptyClusterPolicy`] instead of dividing by zero: re-seeded
    /// inside the current bounding box, or left frozen. Member counts
    /// become readable via [`cluster_sizes`](ClusterEngine::cluster_sizes).
    pub fn update_centroids(&mut self, config: &EngineConfig<'_, T>) -> Result<()> {
        if self.centroids.is_empty() {
            return Err(Error::NotReady("centroids have not been initialized"));
        }
        if self.points.is_empty() {
            return Err(Error::NotReady("no points have been ingested"));
        }

        let k = self.centroids.len();
        let stride = self.points.stride();
        let mut sums = vec![T::zero(); k * stride];
        let mut sizes = vec![0usize; k];

        let values = self.points.values();
        let assignments = self.points.assignments();
        rayon::scope(|s| {
            s.spawn(|_| {
                for &ci in assignments.iter().flatten() {
                    sizes[ci] += 1;
                }
            });
            s.spawn(|_| {
                values
                    .chunks_exact(stride)
                    .zip(assignments.iter())
                    .for_each(|(row, assignment)| {
                        if let Some(ci) = assignment {
                            sums[ci * stride..(ci + 1) * stride]
                                .iter_mut()
                                .zip(row.iter())
                                .for_each(|(acc, &v)| *acc += v);
                        }
                    });
            });
        });

        let mut bounds: Option<Bounds<T>> = None;
        let mut reseeded = 0usize;
        let mut scratch = vec![T::zero(); stride];
        for ci in 0..k {
            if sizes[ci] > 0 {
                let count = T::from(sizes[ci]).unwrap();
                self.centroids
                    .set_from_iter(ci, sums[ci * stride..(ci + 1) * stride].iter().map(|&s| s / count));
            } else if config.empty_cluster_policy == EmptyClusterPolicy::Reseed {
                if bounds.is_none() {
                    bounds = Bounds::compute(&self.points);
                }
                if let Some(b) = &bounds {
                    b.sample_point(&mut *config.rnd.borrow_mut(), &mut scratch);
                    self.centroids.set_from_iter(ci, scratch.iter().cloned());
                    reseeded += 1;
                }
            }
            // EmptyClusterPolicy::Freeze keeps the previous position.
        }

        self.cluster_sizes = sizes;
        if reseeded > 0 {
            info!("re-seeded {} empty cluster(s) inside the data bounding box", reseeded);
        }
        Ok(())
    }
}
