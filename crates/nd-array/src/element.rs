use std::fmt;

use half::f16;
use num_traits::{Float, NumCast};

/// Element types a tensor buffer can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    /// 16-bit floating point (IEEE 754 half-precision, via the `half` crate).
    F16,
    /// 32-bit floating point.
    F32,
    /// 64-bit floating point.
    F64,
}

impl DType {
    /// Returns the size in bytes of a single element.
    pub fn size_in_bytes(&self) -> usize {
        match self {
            DType::F16 => 2,
            DType::F32 => 4,
            DType::F64 => 8,
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DType::F16 => write!(f, "f16"),
            DType::F32 => write!(f, "f32"),
            DType::F64 => write!(f, "f64"),
        }
    }
}

/// Numeric element of a tensor.
///
/// The element type is fixed per tensor at compile time; mixed-type operations
/// are not supported.
pub trait Element:
    Float + Default + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Runtime tag for this element type.
    const DTYPE: DType;

    /// Converts an `f64` constant into this element type, saturating to
    /// infinity when it is not representable.
    fn from_f64(v: f64) -> Self {
        <Self as NumCast>::from(v).unwrap_or_else(Self::infinity)
    }

    /// Converts an element count into this element type.
    fn from_count(n: usize) -> Self {
        <Self as NumCast>::from(n).unwrap_or_else(Self::infinity)
    }

    /// Tolerance used by tensor equality when none is given.
    fn default_eps() -> Self {
        Self::from_f64(1e-5)
    }
}

impl Element for f16 {
    const DTYPE: DType = DType::F16;
}

impl Element for f32 {
    const DTYPE: DType = DType::F32;
}

impl Element for f64 {
    const DTYPE: DType = DType::F64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_in_bytes() {
        assert_eq!(DType::F16.size_in_bytes(), 2);
        assert_eq!(DType::F32.size_in_bytes(), 4);
        assert_eq!(DType::F64.size_in_bytes(), 8);
    }

    #[test]
    fn test_dtype_tags() {
        assert_eq!(<f16 as Element>::DTYPE, DType::F16);
        assert_eq!(<f32 as Element>::DTYPE, DType::F32);
        assert_eq!(<f64 as Element>::DTYPE, DType::F64);
        assert_eq!(DType::F32.size_in_bytes(), std::mem::size_of::<f32>());
    }

    #[test]
    fn test_conversions() {
        assert_eq!(<f32 as Element>::from_count(4), 4.0);
        assert_eq!(<f64 as Element>::from_f64(2.5), 2.5);
        assert_eq!(<f16 as Element>::from_count(100_000), f16::INFINITY);
        assert!(<f32 as Element>::default_eps() > 0.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(DType::F16.to_string(), "f16");
        assert_eq!(DType::F64.to_string(), "f64");
    }
}
