use crate::{memory::*, Centroids, KMeansConfig, PointStore, Result};

/// Seed the centroids with copies of the first `k` points, in input order.
///
/// The copies are independent of the point storage, so the centroids can be replaced freely
/// without ever touching a point.
#[inline(always)]
pub fn calculate<T: Primitive>(points: &PointStore<T>, k: usize, config: &KMeansConfig<'_, T>) -> Result<Centroids<T>> {
    points.validate_k(k)?;
    let seed = copied_vec(&points.samples[..k * points.sample_dims])?;
    let centroids = Centroids::from_flat(seed, k, points.sample_dims)?;
    (config.init_done)(&centroids);
    Ok(centroids)
}
