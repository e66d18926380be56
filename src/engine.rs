use crate::{memory::*, Accumulator, Centroids, Convergence, DistanceFunction, Error, Execution, PointStore, Result};
use rayon::prelude::*;

/// One step of Lloyd's algorithm, bound to a read-only [`PointStore`].
///
/// The engine itself is stateless: every operation takes the centroid set it works on by
/// reference and returns a new, independent one. Ownership of the current centroid set stays
/// with the caller.
pub struct ClusterEngine<'p, T: Primitive, D: DistanceFunction<T>> {
    points: &'p PointStore<T>,
    distance: D,
    convergence: Convergence<T>,
    execution: Execution,
}

impl<'p, T: Primitive, D: DistanceFunction<T>> ClusterEngine<'p, T, D> {
    pub fn new(points: &'p PointStore<T>, distance: D, convergence: Convergence<T>, execution: Execution) -> Self {
        Self { points, distance, convergence, execution }
    }

    pub fn points(&self) -> &PointStore<T> { self.points }

    /// Index of the centroid closest to `point`.
    ///
    /// A later centroid only replaces the current best on a strictly smaller distance, so ties
    /// go to the lowest index.
    ///
    /// ## Errors
    /// [`Error::InternalConsistency`] if the centroids and the point differ in dimensionality.
    #[inline(always)]
    pub fn assign(&self, centroids: &Centroids<T>, point: &[T]) -> Result<usize> {
        if centroids.dims() != point.len() {
            return Err(Error::InternalConsistency(format!(
                "centroids have {} coordinates, point has {}", centroids.dims(), point.len())));
        }
        let mut it = centroids.iter().map(|c| self.distance.distance(point, c)).enumerate();
        let (mut best_idx, mut best_dist) = it.next()
            .ok_or_else(|| Error::InternalConsistency("no centroids to assign to".into()))?;
        for (idx, dist) in it {
            if dist < best_dist {
                best_idx = idx;
                best_dist = dist;
            }
        }
        Ok(best_idx)
    }

    /// Assign every point to its nearest centroid of `old` and accumulate the members.
    pub fn accumulate(&self, old: &Centroids<T>) -> Result<Accumulator<T>> {
        if self.points.is_empty() {
            return Err(Error::InternalConsistency("no points to iterate over".into()));
        }
        if old.dims() != self.points.dims() {
            return Err(Error::InternalConsistency(format!(
                "centroids have {} coordinates, points have {}", old.dims(), self.points.dims())));
        }
        match self.execution {
            Execution::Sequential => self.accumulate_block(old, self.points.samples.as_slice()),
            Execution::Parallel { chunk_size } => {
                if chunk_size == 0 {
                    return Err(Error::InvalidParameter { name: "chunk_size", message: "must be at least 1" });
                }
                // a block never needs to be longer than the whole buffer
                let block_len = chunk_size.saturating_mul(self.points.dims()).min(self.points.samples.len());
                // Fixed block boundaries + ordered merge keep the summation order independent of scheduling
                let blocks = self.points.samples
                    .par_chunks(block_len)
                    .map(|block| self.accumulate_block(old, block))
                    .collect::<Result<Vec<_>>>()?;
                let mut blocks = blocks.into_iter();
                let first = blocks.next()
                    .ok_or_else(|| Error::InternalConsistency("no blocks were accumulated".into()))?;
                Ok(blocks.fold(first, |acc, b| acc.merge(&b)))
            }
        }
    }

    fn accumulate_block(&self, old: &Centroids<T>, block: &[T]) -> Result<Accumulator<T>> {
        let mut acc = Accumulator::new(old.k(), old.dims())?;
        for point in block.chunks_exact(self.points.dims()) {
            let centroid_id = self.assign(old, point)?;
            acc.add(centroid_id, point);
        }
        Ok(acc)
    }

    /// One full iteration: assign all points against `old` and return the new centroid means.
    ///
    /// Centroids without members keep their previous coordinates. `old` is left untouched.
    pub fn iterate(&self, old: &Centroids<T>) -> Result<Centroids<T>> {
        let acc = self.accumulate(old)?;
        debug_assert_eq!(acc.total(), self.points.len());
        let empty = acc.empty_clusters();
        if empty > 0 {
            log::warn!("{} of {} clusters received no points, keeping their previous centroids", empty, old.k());
        }
        acc.into_centroids(old)
    }

    /// See [`Convergence::converged`].
    pub fn converged(&self, old: &Centroids<T>, new: &Centroids<T>) -> bool {
        self.convergence.converged(old, new)
    }
}
