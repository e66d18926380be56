use crate::{memory::*, Centroids, Convergence, Error, Result};

pub type InitDoneCallbackFn<'a, T> = &'a dyn Fn(&Centroids<T>);
pub type IterationDoneCallbackFn<'a, T> = &'a dyn Fn(&Centroids<T>, usize, T);

/// Default block size for [`Execution::Parallel`].
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Distance between a point and a centroid, used for the nearest-centroid assignment.
pub trait DistanceFunction<T: Primitive>: Sync {
    fn distance(&self, a: &[T], b: &[T]) -> T;
}

/// How the assignment step of each iteration is executed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Execution {
    /// All points are assigned and summed on the calling thread, in input order.
    Sequential,
    /// Points are split into blocks of **chunk_size**. Each block is assigned and summed on its own
    /// (in input order), and the per-block sums are merged in block order afterwards.
    /// Results are bit-identical across runs with the same **chunk_size**, independent of the
    /// amount of threads, but may differ from [`Execution::Sequential`] in the last bits.
    Parallel { chunk_size: usize },
}
impl Default for Execution {
    fn default() -> Self { Execution::Sequential }
}

/// This is a structure holding the configuration options of a k-means calculation: the
/// convergence threshold, the execution mode, and a couple of callbacks, that can be set to get
/// status information from a running calculation.
///
/// For a more detailed information about all possible options, have a look at [`KMeansConfigBuilder`].
pub struct KMeansConfig<'a, T: Primitive> {
    /// Callback that is called, when the initial centroids were selected
    /// ## Arguments
    /// - **centroids**: The initial centroid set
    pub(crate) init_done: InitDoneCallbackFn<'a, T>,
    /// Callback that is called after each iteration
    /// ## Arguments
    /// - **centroids**: Centroid set computed by the iteration
    /// - **iteration_id**: Number of the current iteration (starting at 1)
    /// - **shift**: Largest absolute coordinate movement compared to the previous centroid set
    pub(crate) iteration_done: IterationDoneCallbackFn<'a, T>,
    /// Convergence threshold (`|old - new| < epsilon` for every coordinate)
    pub(crate) epsilon: T,
    pub(crate) execution: Execution,
}
impl<'a, T: Primitive> Default for KMeansConfig<'a, T> {
    fn default() -> Self {
        Self {
            init_done: &|_| {},
            iteration_done: &|_,_,_| {},
            epsilon: Convergence::<T>::default().epsilon(),
            execution: Execution::default(),
        }
    }
}
impl<'a, T: Primitive> KMeansConfig<'a, T> {
    /// Use the [`KMeansConfigBuilder`] to build a [`KMeansConfig`] instance.
    pub fn build() -> KMeansConfigBuilder<'a, T> {
        KMeansConfigBuilder { config: KMeansConfig::default() }
    }

    pub fn epsilon(&self) -> T { self.epsilon }

    pub fn execution(&self) -> Execution { self.execution }

    /// Check the configured values, returning the convergence test they describe.
    pub fn validate(&self) -> Result<Convergence<T>> {
        if let Execution::Parallel { chunk_size: 0 } = self.execution {
            return Err(Error::InvalidParameter { name: "chunk_size", message: "must be at least 1" });
        }
        Convergence::new(self.epsilon)
    }
}
impl<'a, T: Primitive> std::fmt::Debug for KMeansConfig<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KMeansConfig")
            .field("epsilon", &self.epsilon)
            .field("execution", &self.execution)
            .finish()
    }
}

pub struct KMeansConfigBuilder<'a, T: Primitive> {
    config: KMeansConfig<'a, T>
}
impl<'a, T: Primitive> KMeansConfigBuilder<'a, T> {
    /// Set the callback that should be called after the centroid initialization, before the iteration starts.
    pub fn init_done(mut self, init_done: InitDoneCallbackFn<'a, T>) -> Self {
        self.config.init_done = init_done; self
    }
    /// Set the callback that should be called after each iteration during a running k-means calculation.
    pub fn iteration_done(mut self, iteration_done: IterationDoneCallbackFn<'a, T>) -> Self {
        self.config.iteration_done = iteration_done; self
    }
    /// Set the convergence threshold.
    /// ## Default
    /// `0.001`
    pub fn epsilon(mut self, epsilon: T) -> Self {
        self.config.epsilon = epsilon; self
    }
    /// Set how the assignment step is executed.
    /// ## Default
    /// [`Execution::Sequential`]
    pub fn execution(mut self, execution: Execution) -> Self {
        self.config.execution = execution; self
    }
    /// Return the internally built configuration structure.
    pub fn build(self) -> KMeansConfig<'a, T> { self.config }
}


/// Terminal state of a finished calculation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// The last iteration moved no coordinate by epsilon or more.
    Converged,
    /// The iteration cap was hit before convergence.
    MaxIterReached,
}

/// Result of a k-means calculation.
///
/// ## Fields
/// - **k**: The amount of clusters that were requested
/// - **centroids**: Final cluster centers, in initialization order
/// - **iterations**: Amount of update iterations that were run
/// - **termination**: Whether the run converged or hit the iteration cap
#[derive(Clone, Debug)]
pub struct KMeansState<T: Primitive> {
    pub k: usize,
    pub centroids: Centroids<T>,
    pub iterations: usize,
    pub termination: Termination,
}


/// Entrypoint of this crate's API-Surface: the immutable set of points to cluster.
///
/// Points are stored row-major in one contiguous buffer `[<point0>,<point1>,<point2>,...]`,
/// in input order. A [`PointStore`] is never mutated by a calculation, so multiple runs can be
/// done on the same instance.
#[derive(Clone, Debug)]
pub struct PointStore<T: Primitive> {
    pub(crate) sample_cnt: usize,
    pub(crate) sample_dims: usize,
    pub(crate) samples: Vec<T>,
}
impl<T: Primitive> PointStore<T> {
    /// Create a new instance of the [`PointStore`] structure.
    ///
    /// ## Arguments
    /// - **samples**: Vector of samples [row-major] = [<sample0>,<sample1>,<sample2>,...]
    /// - **sample_cnt**: Amount of samples, contained in the passed **samples** vector
    /// - **sample_dims**: Amount of dimensions each sample from the **sample** vector has
    ///
    /// ## Errors
    /// - [`Error::EmptyInput`] when there are no samples, or they have no dimensions
    /// - [`Error::DimensionMismatch`] when **samples** does not hold `sample_cnt * sample_dims` values
    /// - [`Error::NonFiniteCoordinate`] when a coordinate is NaN or infinite
    pub fn new(samples: Vec<T>, sample_cnt: usize, sample_dims: usize) -> Result<Self> {
        if sample_cnt == 0 || sample_dims == 0 {
            return Err(Error::EmptyInput);
        }
        if sample_cnt.checked_mul(sample_dims) != Some(samples.len()) {
            let index = samples.len() / sample_dims;
            return Err(Error::DimensionMismatch {
                index: index.min(sample_cnt - 1),
                expected: sample_dims,
                found: samples.len() % sample_dims,
            });
        }
        check_finite(&samples, sample_dims, 0)?;
        Ok(Self { sample_cnt, sample_dims, samples })
    }

    /// Create a [`PointStore`] from one vector per point. The first point determines the dimensionality.
    ///
    /// ## Errors
    /// - [`Error::EmptyInput`] when there are no rows, or the first row is empty
    /// - [`Error::DimensionMismatch`] when a later row has a different length than the first
    /// - [`Error::NonFiniteCoordinate`] when a coordinate is NaN or infinite
    /// - [`Error::ResourceExhausted`] when the point buffer can not be allocated
    pub fn from_rows<I, R>(rows: I) -> Result<Self>
            where I: IntoIterator<Item = R>, R: AsRef<[T]> {
        let mut samples: Vec<T> = Vec::new();
        let (mut sample_cnt, mut sample_dims) = (0usize, 0usize);
        for row in rows {
            let row = row.as_ref();
            if sample_cnt == 0 {
                sample_dims = row.len();
                if sample_dims == 0 {
                    return Err(Error::EmptyInput);
                }
            } else if row.len() != sample_dims {
                return Err(Error::DimensionMismatch { index: sample_cnt, expected: sample_dims, found: row.len() });
            }
            check_finite(row, sample_dims, sample_cnt)?;
            samples.try_reserve(sample_dims)?;
            samples.extend_from_slice(row);
            sample_cnt += 1;
        }
        if sample_cnt == 0 {
            return Err(Error::EmptyInput);
        }
        Ok(Self { sample_cnt, sample_dims, samples })
    }

    /// Amount of points.
    pub fn len(&self) -> usize { self.sample_cnt }

    /// Always false, a store holds at least one point.
    pub fn is_empty(&self) -> bool { self.sample_cnt == 0 }

    /// Dimensionality shared by all points.
    pub fn dims(&self) -> usize { self.sample_dims }

    /// Coordinates of point `idx`, or `None` if out of range.
    pub fn point(&self, idx: usize) -> Option<&[T]> {
        self.samples.chunks_exact(self.sample_dims).nth(idx)
    }

    /// Iterate all points in input order.
    pub fn points(&self) -> std::slice::ChunksExact<'_, T> {
        self.samples.chunks_exact(self.sample_dims)
    }

    /// Check that `k` clusters can be computed from this store (`1 < k < len`).
    pub fn validate_k(&self, k: usize) -> Result<()> {
        if k <= 1 || k >= self.sample_cnt {
            return Err(Error::InvalidClusterCount { k, num_points: self.sample_cnt });
        }
        Ok(())
    }

    /// Lloyd's k-means, seeded with the first **k** points.
    ///
    /// ## Arguments
    /// - **k**: Amount of clusters to search for, `1 < k < len()`
    /// - **max_iter**: Maximum amount of update iterations, at least 1
    /// - **config**: [`KMeansConfig`] instance, containing several configuration options for the calculation.
    ///
    /// ## Returns
    /// Instance of [`KMeansState`], containing the final centroids.
    ///
    /// ## Example
    /// ```rust
    /// use kmeans_lloyd::*;
    ///
    /// let points = PointStore::from_rows(vec![
    ///     vec![0.0f64, 0.0], vec![0.0, 1.0], vec![10.0, 10.0], vec![10.0, 11.0],
    /// ]).unwrap();
    /// let result = points.kmeans_lloyd(2, 200, &KMeansConfig::default()).unwrap();
    /// assert_eq!(result.centroids.to_rows(), vec![vec![0.0, 0.5], vec![10.0, 10.5]]);
    /// ```
    pub fn kmeans_lloyd(&self, k: usize, max_iter: usize, config: &KMeansConfig<'_, T>) -> Result<KMeansState<T>> {
        crate::variants::Lloyd::calculate(self, k, max_iter, config)
    }
}

fn check_finite<T: Primitive>(coords: &[T], dims: usize, first_index: usize) -> Result<()> {
    match coords.iter().position(|c| !c.is_finite()) {
        Some(pos) => Err(Error::NonFiniteCoordinate { index: first_index + pos / dims, dimension: pos % dims }),
        None => Ok(()),
    }
}
