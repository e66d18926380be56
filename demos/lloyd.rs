use kmeans_lloyd::*;

fn main() -> Result<()> {
    let (sample_cnt, sample_dims, k, max_iter) = (20000, 200, 4, 100);

    // Generate some random data
    let mut samples = vec![0.0f64;sample_cnt * sample_dims];
    samples.iter_mut().for_each(|v| *v = rand::random());

    // Calculate kmeans, seeded with the first k samples
    let points = PointStore::new(samples, sample_cnt, sample_dims)?;
    let result = points.kmeans_lloyd(k, max_iter, &KMeansConfig::default())?;

    println!("Centroids: {:?}", result.centroids.to_rows());
    println!("Iterations: {} ({:?})", result.iterations, result.termination);
    Ok(())
}
