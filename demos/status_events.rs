use kmeans_lloyd::*;

fn main() -> Result<()> {
    let (sample_cnt, sample_dims, k, max_iter) = (20000, 200, 4, 999);

    // Generate some random data
    let mut samples = vec![0.0f64;sample_cnt * sample_dims];
    samples.iter_mut().for_each(|v| *v = rand::random());

	let conf = KMeansConfig::build()
		.init_done(&|c| println!("Initialization completed: {} centroids.", c.k()))
		.iteration_done(&|_, nr, shift|
			println!("Iteration {} - largest centroid shift: {:.6}", nr, shift))
		.epsilon(1e-4)
		.execution(Execution::Parallel { chunk_size: DEFAULT_CHUNK_SIZE })
		.build();

    let points = PointStore::new(samples, sample_cnt, sample_dims)?;
    let result = points.kmeans_lloyd(k, max_iter, &conf)?;

    let mut out = std::io::stdout().lock();
    io::write_centroids(&mut out, &result.centroids)?;
    println!("{:?} after {} iterations", result.termination, result.iterations);
    Ok(())
}
