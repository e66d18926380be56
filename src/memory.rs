use num::{Float, NumCast, Zero};
use std::{
    fmt::{Debug, Display, LowerExp},
    iter::Sum,
    ops::{AddAssign, Sub, SubAssign},
    str::FromStr,
};

/// Floating point types the clustering can be calculated with.
pub trait Primitive: AddAssign + Sum + Sub<Output = Self> + SubAssign + Zero + Float + NumCast + FromStr
                + PartialOrd + Copy + Default + Display + Debug + Sync + Send + LowerExp + 'static
                + for<'a> AddAssign<&'a Self> {}
impl Primitive for f32 {}
impl Primitive for f64 {}

/// Allocate a zeroed buffer of `size` elements, reporting allocation failure instead of aborting.
pub(crate) fn zeroed_vec<T: Primitive>(size: usize) -> crate::Result<Vec<T>> {
    let mut buffer = Vec::new();
    buffer.try_reserve_exact(size)?;
    buffer.resize(size, T::zero());
    Ok(buffer)
}

/// Copy `src` into a freshly (fallibly) allocated buffer.
pub(crate) fn copied_vec<T: Primitive>(src: &[T]) -> crate::Result<Vec<T>> {
    let mut buffer = Vec::new();
    buffer.try_reserve_exact(src.len())?;
    buffer.extend_from_slice(src);
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_vec_has_requested_size() {
        let v: Vec<f64> = zeroed_vec(12).unwrap();
        assert_eq!(v.len(), 12);
        assert!(v.iter().all(|&c| c == 0.0));
    }

    #[test]
    fn copied_vec_does_not_alias() {
        let src = [1.0f32, 2.0, 3.0];
        let mut copy = copied_vec(&src).unwrap();
        copy[0] = 42.0;
        assert_eq!(src, [1.0, 2.0, 3.0]);
        assert_eq!(copy, vec![42.0, 2.0, 3.0]);
    }

    #[test]
    fn huge_allocation_reports_resource_exhaustion() {
        let res = zeroed_vec::<f64>(usize::MAX / 2);
        assert!(matches!(res, Err(crate::Error::ResourceExhausted(_))));
    }
}
