#[cfg(test)]
macro_rules! assert_approx_eq {
	($left: expr, $right: expr, $tol: expr) => ({
		match ($left, $right, $tol) {
			(left_val , right_val, tol_val) => {
				let delta = (left_val - right_val).abs();
				if !(delta < tol_val) {
					panic!(
						"assertion failed: `(left ≈ right)` \
						(left: `{}`, right: `{}`) \
						with ∆={:1.1e} (allowed ∆={:e})",
						left_val , right_val, delta, tol_val
					)
				}
			}
		}
	});
	($left: expr, $right: expr) => (assert_approx_eq!(($left), ($right), 1e-15))
}


#[cfg(test)]
mod tests {
	use super::testing::*;
	use crate::Centroids;

	#[test]
	fn approx_eq_accepts_close_values() {
		assert_approx_eq!(1.0f64, 1.0 + 1e-12, 1e-10);
	}

	#[test]
	#[should_panic]
	fn approx_eq_rejects_distant_values() {
		assert_approx_eq!(1.0f64, 1.1, 1e-10);
	}

	#[test]
	fn flatten_keeps_row_order() {
		let (samples, cnt, dims) = flatten(&[[1.0f64, 2.0], [3.0, 4.0], [5.0, 6.0]]);
		assert_eq!((cnt, dims), (3, 2));
		assert_eq!(samples, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
	}

	#[test]
	fn centroid_comparison() {
		let c = Centroids::from_flat(vec![0.0f64, 0.5, 10.0, 10.5], 2, 2).unwrap();
		assert_centroids_approx_eq(&[[0.0, 0.5], [10.0, 10.5]], &c, 1e-12);
	}
}
