//! # kmeans-lloyd - API documentation
//!
//! A small, deterministic implementation of Lloyd's k-means clustering.
//!
//! ## Design target
//! Given the same points, cluster count, threshold and iteration cap, every run produces bit-identical
//! centroids. The centroids are seeded with the first `k` points (in input order), ties in the
//! nearest-centroid search go to the lowest centroid index, and all sums are computed in a fixed order.
//! Points and centroids are stored in flat, row-major buffers, instead of any high-level arithmetics /
//! matrix crate such as nalgebra or ndarray.
//!
//! ## Algorithm
//! Each iteration assigns every point to its nearest centroid (euclidean distance), and replaces every
//! centroid by the mean of its assigned points. A centroid that received no points keeps its previous
//! coordinates. The calculation stops, when no coordinate of any centroid moved by `epsilon` (default
//! `0.001`) or more, or when the iteration cap is reached. Both ways yield the last computed centroids.
//!
//! ## Supported primitive types
//! - [`f32`]
//! - [`f64`]
//!
//! ## Example
//! ```rust
//! use kmeans_lloyd::*;
//!
//! let points = PointStore::from_rows(vec![
//!     vec![0.0f64, 0.0],
//!     vec![0.0, 1.0],
//!     vec![10.0, 10.0],
//!     vec![10.0, 11.0],
//! ]).unwrap();
//! let result = points.kmeans_lloyd(2, 200, &KMeansConfig::default()).unwrap();
//!
//! assert_eq!(result.centroids.centroid(0), &[0.0, 0.5]);
//! assert_eq!(result.centroids.centroid(1), &[10.0, 10.5]);
//! ```
//!
//! ## Example (using the status event callbacks and parallel assignment)
//! ```rust
//! use kmeans_lloyd::*;
//!
//! let (sample_cnt, sample_dims, k, max_iter) = (2000, 8, 4, 100);
//! let samples: Vec<f64> = (0..sample_cnt * sample_dims).map(|i| ((i * 7919) % 1000) as f64 / 1000.0).collect();
//!
//! let conf = KMeansConfig::build()
//!     .init_done(&|_| println!("Initialization completed."))
//!     .iteration_done(&|_, nr, shift| println!("Iteration {} - largest shift: {:.5}", nr, shift))
//!     .execution(Execution::Parallel { chunk_size: 256 })
//!     .build();
//!
//! let points = PointStore::new(samples, sample_cnt, sample_dims).unwrap();
//! let result = points.kmeans_lloyd(k, max_iter, &conf).unwrap();
//! println!("Centroids: {:?}", result.centroids.to_rows());
//! ```
//!
//! ## Short API-Overview / Description
//! Entry-point of the library is the [`PointStore`] struct, holding the immutable input points. Calling
//! [`PointStore::kmeans_lloyd`] runs the whole calculation and returns a [`KMeansState`]. The single steps
//! are exposed through [`ClusterEngine`] (assignment, one full update iteration, convergence test).
//! The [`io`] and [`cli`] modules contain the text input / output and argument validation used by the
//! `kmeans` binary.

#[macro_use] mod helpers;
mod memory;
mod error;
mod api;
mod centroids;
mod accumulator;
mod convergence;
mod distances;
mod engine;
mod inits;
mod variants;
pub mod io;
pub mod cli;

pub use api::{DistanceFunction, Execution, KMeansConfig, KMeansConfigBuilder, KMeansState, PointStore, Termination, DEFAULT_CHUNK_SIZE};
pub use accumulator::Accumulator;
pub use centroids::Centroids;
pub use convergence::{Convergence, DEFAULT_EPSILON};
pub use distances::EuclideanDistance;
pub use engine::ClusterEngine;
pub use error::{Error, Result};
pub use memory::Primitive;
