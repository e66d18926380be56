use crate::{DistanceFunction, Primitive};

/// Plain (non-squared) euclidean distance: `sqrt(sum((a[i] - b[i])^2))`.
///
/// Coordinates are summed in dimension order, so the result is bit-reproducible.
pub struct EuclideanDistance;

impl<T: Primitive> DistanceFunction<T> for EuclideanDistance {
    #[inline(always)]
    fn distance(&self, a: &[T], b: &[T]) -> T {
        a.iter().cloned()
            .zip(b.iter().cloned())
            .map(|(ap, bp)| ap - bp)        // <a> - <b>
            .map(|v| v * v)                 // <vec_components> ^2
            .fold(T::zero(), |acc, v| acc + v)
            .sqrt()
    }
}
