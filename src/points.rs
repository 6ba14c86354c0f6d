use crate::error::{Error, Result};
use crate::primitive::Primitive;
use log::debug;

/// Owned store of the ingested observations.
///
/// Point values live in one flat row-major buffer
/// `[<point0>,<point1>,...]`, each row `stride` values long. Per-point
/// cluster metadata is kept in parallel vectors of the same row count:
/// the current assignment (`None` until the first assignment round
/// touches the point) and the squared distance to the assigned centroid
/// (infinity until then).
///
/// The store is append-only: rows are added by [`PointStore::ingest`]
/// and never removed.
#[derive(Clone, Debug)]
pub(crate) struct PointStore<T: Primitive> {
    values: Vec<T>,
    stride: usize,
    assignments: Vec<Option<usize>>,
    distances: Vec<T>,
}

impl<T: Primitive> PointStore<T> {
    pub fn new() -> Self {
        Self { values: Vec::new(), stride: 0, assignments: Vec::new(), distances: Vec::new() }
    }

    /// Number of dimensions per point; 0 until the first ingestion.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Number of stored points.
    pub fn len(&self) -> usize {
        if self.stride == 0 { 0 } else { self.values.len() / self.stride }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Total number of stored scalar values (`len() * stride()`).
    pub fn scalar_count(&self) -> usize {
        self.values.len()
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn assignments(&self) -> &[Option<usize>] {
        &self.assignments
    }

    pub fn distances(&self) -> &[T] {
        &self.distances
    }

    /// Iterator over the stored rows. Must not be called on an empty store.
    pub fn rows(&self) -> std::slice::ChunksExact<'_, T> {
        debug_assert!(self.stride > 0);
        self.values.chunks_exact(self.stride)
    }

    /// Simultaneous access to the immutable rows and the mutable
    /// per-point metadata, for the assignment scan.
    pub fn split_mut(&mut self) -> (&[T], usize, &mut [Option<usize>], &mut [T]) {
        (&self.values, self.stride, &mut self.assignments, &mut self.distances)
    }

    /// Validates `buffer` and appends it as `buffer.len() / stride` rows.
    ///
    /// Nothing is stored unless the whole buffer is accepted, so a failed
    /// call leaves the store exactly as it was. Returns the total number
    /// of scalars now stored.
    pub fn ingest(&mut self, buffer: &[T], stride: usize) -> Result<usize> {
        if stride == 0 {
            return Err(Error::ZeroStride);
        }
        if buffer.is_empty() {
            return Err(Error::EmptyInput);
        }
        if buffer.len() % stride != 0 {
            return Err(Error::RaggedBuffer { len: buffer.len(), stride });
        }
        if self.stride != 0 && stride != self.stride {
            return Err(Error::DimensionMismatch { expected: self.stride, found: stride });
        }

        self.stride = stride;
        let new_rows = buffer.len() / stride;
        self.values.extend_from_slice(buffer);
        self.assignments.extend(std::iter::repeat(None).take(new_rows));
        self.distances.extend(std::iter::repeat(T::infinity()).take(new_rows));

        debug!("ingested {} points with {} dimensions ({} points total)", new_rows, stride, self.len());
        Ok(self.scalar_count())
    }

    /// Forgets all assignment state, as if no assignment round had run.
    pub fn reset_metadata(&mut self) {
        self.assignments.iter_mut().for_each(|a| *a = None);
        self.distances.iter_mut().for_each(|d| *d = T::infinity());
    }
}
