use crate::{memory::*, Error, Result};
use std::slice::ChunksExact;

/// A set of `k` centroids, stored row-major in one contiguous buffer:
/// `[<centroid0>,<centroid1>,<centroid2>,...]`.
///
/// A centroid set never aliases the point storage it was derived from. Each iteration of the
/// clustering produces a new, independent set.
#[derive(Clone, Debug, PartialEq)]
pub struct Centroids<T: Primitive> {
    k: usize,
    dims: usize,
    coords: Vec<T>,
}

impl<T: Primitive> Centroids<T> {
    /// Build a centroid set from a row-major buffer holding `k * dims` coordinates.
    pub fn from_flat(coords: Vec<T>, k: usize, dims: usize) -> Result<Self> {
        if k == 0 || dims == 0 {
            return Err(Error::EmptyInput);
        }
        if k.checked_mul(dims) != Some(coords.len()) {
            return Err(Error::InternalConsistency(format!(
                "centroid buffer holds {} coordinates, expected {} x {}", coords.len(), k, dims)));
        }
        Ok(Self { k, dims, coords })
    }

    /// Amount of centroids in this set.
    pub fn k(&self) -> usize { self.k }

    /// Dimensionality shared by all centroids.
    pub fn dims(&self) -> usize { self.dims }

    /// Coordinates of the centroid with index `idx`.
    ///
    /// ## Panics
    /// If `idx >= k`.
    pub fn centroid(&self, idx: usize) -> &[T] {
        &self.coords[idx * self.dims..(idx + 1) * self.dims]
    }

    /// Iterate the centroids in index order.
    pub fn iter(&self) -> ChunksExact<'_, T> {
        self.coords.chunks_exact(self.dims)
    }

    pub fn as_slice(&self) -> &[T] { &self.coords }

    pub fn into_inner(self) -> Vec<T> { self.coords }

    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.iter().map(|c| c.to_vec()).collect()
    }

    /// Same amount of centroids with the same dimensionality.
    pub fn same_shape(&self, other: &Centroids<T>) -> bool {
        self.k == other.k && self.dims == other.dims
    }

    /// Largest absolute per-coordinate difference between two centroid sets.
    /// Sets of different shape are infinitely far apart.
    pub(crate) fn max_shift(&self, other: &Centroids<T>) -> T {
        if !self.same_shape(other) {
            return T::infinity();
        }
        self.coords.iter().zip(other.coords.iter())
            .map(|(&a, &b)| (a - b).abs())
            .fold(T::zero(), |acc, d| if d > acc { d } else { acc })
    }
}

impl<'a, T: Primitive> IntoIterator for &'a Centroids<T> {
    type Item = &'a [T];
    type IntoIter = ChunksExact<'a, T>;
    fn into_iter(self) -> Self::IntoIter { self.iter() }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_access() {
        let c = Centroids::from_flat(vec![1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0], 3, 2).unwrap();
        assert_eq!(c.k(), 3);
        assert_eq!(c.dims(), 2);
        assert_eq!(c.centroid(1), &[3.0, 4.0]);
        assert_eq!(c.iter().count(), 3);
        assert_eq!(c.to_rows(), vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]);
    }

    #[test]
    fn shape_is_checked() {
        assert!(matches!(Centroids::from_flat(vec![1.0f32, 2.0, 3.0], 2, 2), Err(Error::InternalConsistency(_))));
        assert!(matches!(Centroids::<f32>::from_flat(vec![], 0, 2), Err(Error::EmptyInput)));
        assert!(matches!(Centroids::<f32>::from_flat(vec![], 2, 0), Err(Error::EmptyInput)));
        assert!(matches!(Centroids::from_flat(vec![1.0f32], usize::MAX, 2), Err(Error::InternalConsistency(_))));
    }

    #[test]
    fn max_shift_is_largest_coordinate_delta() {
        let a = Centroids::from_flat(vec![0.0f64, 0.0, 1.0, 1.0], 2, 2).unwrap();
        let b = Centroids::from_flat(vec![0.5f64, -0.25, 1.0, 3.0], 2, 2).unwrap();
        assert_eq!(a.max_shift(&b), 2.0);
        assert_eq!(a.max_shift(&a), 0.0);
        let c = Centroids::from_flat(vec![0.0f64, 0.0], 1, 2).unwrap();
        assert_eq!(a.same_shape(&c), false);
        assert_eq!(a.max_shift(&c), f64::INFINITY);
    }
}
