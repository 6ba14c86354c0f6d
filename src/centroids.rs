use crate::primitive::Primitive;

/// Current set of cluster centers, stored row-major:
/// `[<centroid0>,<centroid1>,...]`, `k` rows of `dims` values.
///
/// A centroid has no identity beyond its row index. The set is rebuilt
/// by the initializer and mutated in place by the update step.
#[derive(Clone, Debug)]
pub(crate) struct CentroidSet<T: Primitive> {
    values: Vec<T>,
    dims: usize,
}

impl<T: Primitive> CentroidSet<T> {
    pub fn new() -> Self {
        Self { values: Vec::new(), dims: 0 }
    }

    /// Number of centroids.
    pub fn len(&self) -> usize {
        if self.dims == 0 { 0 } else { self.values.len() / self.dims }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn row(&self, idx: usize) -> &[T] {
        &self.values[idx * self.dims..(idx + 1) * self.dims]
    }

    /// Iterator over the centroid rows. Must not be called on an empty set.
    pub fn rows(&self) -> std::slice::ChunksExact<'_, T> {
        debug_assert!(self.dims > 0);
        self.values.chunks_exact(self.dims)
    }

    /// Discards the previous collection and allocates `k` zeroed
    /// centroids of `dims` dimensions.
    pub fn reset(&mut self, k: usize, dims: usize) {
        self.values = vec![T::zero(); k * dims];
        self.dims = dims;
    }

    /// Overwrites centroid `idx` with the first `dims` values of `src`.
    pub fn set_from_iter(&mut self, idx: usize, src: impl Iterator<Item = T>) {
        self.values
            .iter_mut()
            .skip(self.dims * idx)
            .take(self.dims)
            .zip(src)
            .for_each(|(c, s)| *c = s);
    }
}
