use crate::{memory::*, Centroids, Error, Result};

/// Threshold used when none is configured.
pub const DEFAULT_EPSILON: f64 = 0.001;

/// Convergence test between two consecutive centroid sets.
///
/// The calculation is considered converged once no coordinate of any centroid moved by
/// `epsilon` or more (`|old - new| < epsilon` for every coordinate).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Convergence<T: Primitive> {
	epsilon: T
}
impl<T: Primitive> Convergence<T> {
	/// ## Errors
	/// [`Error::InvalidEpsilon`] if **epsilon** is not finite and strictly positive.
	pub fn new(epsilon: T) -> Result<Self> {
		if !epsilon.is_finite() || epsilon <= T::zero() {
			return Err(Error::InvalidEpsilon(epsilon.to_string()));
		}
		Ok(Self { epsilon })
	}

	pub fn epsilon(&self) -> T { self.epsilon }

	/// ## Returns
	/// - **true** if every coordinate moved strictly less than epsilon (stop iterating)
	/// - **false** as soon as one coordinate moved by epsilon or more, or if the sets differ in shape
	pub fn converged(&self, old: &Centroids<T>, new: &Centroids<T>) -> bool {
		old.same_shape(new) && old.as_slice().iter().zip(new.as_slice().iter())
			.all(|(&o, &n)| (o - n).abs() < self.epsilon)
	}
}
impl<T: Primitive> Default for Convergence<T> {
	fn default() -> Self {
		Self { epsilon: T::from(DEFAULT_EPSILON).unwrap_or_else(T::epsilon) }
	}
}
