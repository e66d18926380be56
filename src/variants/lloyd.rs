use crate::{memory::*, ClusterEngine, Error, EuclideanDistance, KMeansConfig, KMeansState, PointStore, Result, Termination};

pub(crate) struct Lloyd<T: Primitive> {
	_p: std::marker::PhantomData<T>
}
impl<T: Primitive> Lloyd<T> {
    pub fn calculate(data: &PointStore<T>, k: usize, max_iter: usize, config: &KMeansConfig<'_, T>) -> Result<KMeansState<T>> {
        if max_iter == 0 {
            return Err(Error::InvalidIterationBound { max_iter: max_iter.to_string() });
        }
        let convergence = config.validate()?;
        log::info!("lloyd: {} points, {} dims, k={}, max_iter={}, epsilon={}, {:?}",
            data.len(), data.dims(), k, max_iter, convergence.epsilon(), config.execution());

        let engine = ClusterEngine::new(data, EuclideanDistance, convergence, config.execution());
        // INIT: initialize clusters and notify subscriber
        let mut centroids = crate::inits::firstk::calculate(data, k, config)?;

        let mut iterations = 0;
        let termination = loop {
            let new_centroids = engine.iterate(&centroids)?;
            iterations += 1;

            // Notify subscriber about finished iteration
            let shift = centroids.max_shift(&new_centroids);
            (config.iteration_done)(&new_centroids, iterations, shift);
            log::debug!("iteration {:>4} | max shift {:e}", iterations, shift);

            let converged = engine.converged(&centroids, &new_centroids);
            // the previous set is dropped here, only the new one stays alive
            centroids = new_centroids;
            if converged {
                break Termination::Converged;
            }
            if iterations >= max_iter {
                break Termination::MaxIterReached;
            }
        };
        log::info!("lloyd: {:?} after {} iterations", termination, iterations);

        Ok(KMeansState { k, centroids, iterations, termination })
    }
}
