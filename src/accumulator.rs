use crate::{memory::*, Centroids, Error, Result};

/// Per-iteration running sums and member counts, one slot per centroid.
///
/// Sums are stored row-major with the same layout as [`Centroids`].
#[derive(Clone, Debug)]
pub struct Accumulator<T: Primitive> {
    dims: usize,
    sums: Vec<T>,
    counts: Vec<usize>,
}

impl<T: Primitive> Accumulator<T> {
    pub(crate) fn new(k: usize, dims: usize) -> Result<Self> {
        let sums = zeroed_vec(k * dims)?;
        let mut counts = Vec::new();
        counts.try_reserve_exact(k)?;
        counts.resize(k, 0usize);
        Ok(Self { dims, sums, counts })
    }

    /// Add `point` to the slot of centroid `centroid_id`.
    #[inline(always)]
    pub(crate) fn add(&mut self, centroid_id: usize, point: &[T]) {
        self.sums.chunks_exact_mut(self.dims).nth(centroid_id)
            .into_iter()
            .flat_map(|s| s.iter_mut())
            .zip(point.iter())
            .for_each(|(s, p)| *s += p);
        self.counts[centroid_id] += 1;
    }

    /// Fold another accumulator (same shape) into this one, slot by slot.
    pub(crate) fn merge(mut self, other: &Accumulator<T>) -> Self {
        self.sums.iter_mut().zip(other.sums.iter()).for_each(|(s, o)| *s += o);
        self.counts.iter_mut().zip(other.counts.iter()).for_each(|(c, o)| *c += o);
        self
    }

    /// Member count of each centroid.
    pub fn counts(&self) -> &[usize] { &self.counts }

    /// Total amount of points accumulated.
    pub fn total(&self) -> usize { self.counts.iter().sum() }

    /// Amount of centroids that received no points.
    pub fn empty_clusters(&self) -> usize { self.counts.iter().filter(|&&c| c == 0).count() }

    /// Turn the sums into means. Slots without members copy the matching centroid of `old`.
    pub(crate) fn into_centroids(mut self, old: &Centroids<T>) -> Result<Centroids<T>> {
        if old.k() != self.counts.len() || old.dims() != self.dims {
            return Err(Error::InternalConsistency(format!(
                "accumulator shape {}x{} does not match centroid shape {}x{}",
                self.counts.len(), self.dims, old.k(), old.dims())));
        }
        let k = self.counts.len();
        for ((sum, cnt), prev) in self.sums.chunks_exact_mut(self.dims)
                .zip(self.counts.iter().cloned())
                .zip(old.iter()) {
            if cnt == 0 {
                sum.copy_from_slice(prev);
                continue;
            }
            let cnt = T::from(cnt).ok_or_else(|| Error::InternalConsistency(
                format!("member count {} not representable", cnt)))?;
            sum.iter_mut().for_each(|v| *v = *v / cnt);
        }
        Centroids::from_flat(self.sums, k, self.dims)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_members() {
        let old = Centroids::from_flat(vec![0.0f64, 0.0, 100.0, 100.0], 2, 2).unwrap();
        let mut acc = Accumulator::new(2, 2).unwrap();
        acc.add(0, &[1.0, 2.0]);
        acc.add(0, &[3.0, 4.0]);
        acc.add(1, &[10.0, 10.0]);
        assert_eq!(acc.counts(), &[2, 1]);
        assert_eq!(acc.total(), 3);
        let new = acc.into_centroids(&old).unwrap();
        assert_eq!(new.as_slice(), &[2.0, 3.0, 10.0, 10.0]);
    }

    #[test]
    fn empty_slot_keeps_previous_centroid() {
        let old = Centroids::from_flat(vec![0.1f64, 0.2, 1337.000001, -0.3], 2, 2).unwrap();
        let mut acc = Accumulator::new(2, 2).unwrap();
        acc.add(0, &[5.0, 5.0]);
        assert_eq!(acc.empty_clusters(), 1);
        let new = acc.into_centroids(&old).unwrap();
        assert_eq!(new.centroid(1), old.centroid(1));
        assert_eq!(new.centroid(0), &[5.0, 5.0]);
    }

    #[test]
    fn merge_adds_slots() {
        let mut a = Accumulator::new(2, 1).unwrap();
        let mut b = Accumulator::new(2, 1).unwrap();
        a.add(0, &[1.0f32]);
        b.add(0, &[2.0]);
        b.add(1, &[4.0]);
        let m = a.merge(&b);
        assert_eq!(m.counts(), &[2, 1]);
        assert_eq!(m.sums, vec![3.0, 4.0]);
    }

    #[test]
    fn shape_mismatch_is_internal_error() {
        let old = Centroids::from_flat(vec![0.0f64; 6], 3, 2).unwrap();
        let acc = Accumulator::<f64>::new(2, 2).unwrap();
        assert!(matches!(acc.into_centroids(&old), Err(Error::InternalConsistency(_))));
    }
}
