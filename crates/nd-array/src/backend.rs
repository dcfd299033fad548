use std::fmt::Debug;

use crate::element::Element;
use crate::error::{Result, TensorError};
use crate::ops::{BinaryOp, Reduce3Op, ReduceOp, UnaryOp};
use crate::shape::ShapeDescriptor;
use crate::tad::TadPack;

/// A read-only `(buffer, shape)` operand. The buffer always covers the
/// descriptor.
#[derive(Debug, Clone, Copy)]
pub struct RawView<'a, T> {
    pub(crate) data: &'a [T],
    pub(crate) shape: &'a ShapeDescriptor,
}

/// A writable `(buffer, shape)` operand. The buffer always covers the
/// descriptor.
#[derive(Debug)]
pub struct RawViewMut<'a, T> {
    pub(crate) data: &'a mut [T],
    pub(crate) shape: &'a ShapeDescriptor,
}

impl<'a, T> RawView<'a, T> {
    /// Pairs a buffer with its descriptor.
    ///
    /// # Errors
    /// `LengthMismatch` if the buffer is too short to back `shape`.
    pub fn new(data: &'a [T], shape: &'a ShapeDescriptor) -> Result<Self> {
        check_covers(data.len(), shape)?;
        Ok(RawView { data, shape })
    }

    pub fn data(&self) -> &'a [T] {
        self.data
    }

    pub fn shape(&self) -> &'a ShapeDescriptor {
        self.shape
    }
}

impl<'a, T> RawViewMut<'a, T> {
    /// Pairs a mutable buffer with its descriptor.
    ///
    /// # Errors
    /// `LengthMismatch` if the buffer is too short to back `shape`.
    pub fn new(data: &'a mut [T], shape: &'a ShapeDescriptor) -> Result<Self> {
        check_covers(data.len(), shape)?;
        Ok(RawViewMut { data, shape })
    }

    pub fn data(&self) -> &[T] {
        &*self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut *self.data
    }

    pub fn shape(&self) -> &'a ShapeDescriptor {
        self.shape
    }

    /// Reborrows as a read-only view.
    pub fn as_view(&self) -> RawView<'_, T> {
        RawView {
            data: &*self.data,
            shape: self.shape,
        }
    }
}

fn check_covers(len: usize, shape: &ShapeDescriptor) -> Result<()> {
    let required = shape.required_buffer_len();
    if len < required {
        return Err(TensorError::LengthMismatch {
            expected: required,
            got: len,
        });
    }
    Ok(())
}

/// Execution contract for the generic op families.
///
/// Operands are raw `(buffer, shape)` pairs so the same entry points serve
/// tensor-owned and externally supplied buffers. Elementwise operands are
/// paired by logical position, so operands may differ in memory order.
/// Buffer coverage is checked when an operand is built; the remaining shape
/// and length checks happen before any output element is written.
/// The `*_in_place` forms are the aliasing variants, where the output is also
/// the first input.
pub trait OpExecutor<T: Element>: Send + Sync + Debug {
    /// Returns the name of this executor (e.g., "cpu").
    fn name(&self) -> &str;

    /// `z[i] = Op(x[i])`. Lengths must match.
    fn transform<Op: UnaryOp<T>>(
        &self,
        x: RawView<'_, T>,
        z: RawViewMut<'_, T>,
        extra: &[T],
    ) -> Result<()>;

    /// `z[i] = Op(z[i])`.
    fn transform_in_place<Op: UnaryOp<T>>(&self, z: RawViewMut<'_, T>, extra: &[T]) -> Result<()>;

    /// `z[i] = Op(x[i], y[i])`. All three lengths must match.
    fn pairwise<Op: BinaryOp<T>>(
        &self,
        x: RawView<'_, T>,
        y: RawView<'_, T>,
        z: RawViewMut<'_, T>,
        extra: &[T],
    ) -> Result<()>;

    /// `z[i] = Op(z[i], y[i])`.
    fn pairwise_in_place<Op: BinaryOp<T>>(
        &self,
        z: RawViewMut<'_, T>,
        y: RawView<'_, T>,
        extra: &[T],
    ) -> Result<()>;

    /// `z[i] = Op(x[i], scalar)`.
    fn scalar<Op: BinaryOp<T>>(
        &self,
        x: RawView<'_, T>,
        scalar: T,
        z: RawViewMut<'_, T>,
        extra: &[T],
    ) -> Result<()>;

    /// `z[i] = Op(z[i], scalar)`.
    fn scalar_in_place<Op: BinaryOp<T>>(
        &self,
        z: RawViewMut<'_, T>,
        scalar: T,
        extra: &[T],
    ) -> Result<()>;

    /// Reduces every element of `x` to one value.
    fn reduce_scalar<Op: ReduceOp<T>>(&self, x: RawView<'_, T>, extra: &[T]) -> Result<T>;

    /// Reduces each slice of `tad` (built for `x`'s shape) to one value,
    /// writing slice `t` to logical position `t` of `z`.
    fn reduce_along<Op: ReduceOp<T>>(
        &self,
        x: RawView<'_, T>,
        tad: &TadPack,
        z: RawViewMut<'_, T>,
        extra: &[T],
    ) -> Result<()>;

    /// Reduces two operands of the same shape to one value.
    fn reduce3_scalar<Op: Reduce3Op<T>>(
        &self,
        x: RawView<'_, T>,
        y: RawView<'_, T>,
        extra: &[T],
    ) -> Result<T>;

    /// Applies `Op(x, y)` with `y` replicated across every slice of `tad`
    /// (built for `x`'s shape). `z` has `x`'s shape.
    fn broadcast<Op: BinaryOp<T>>(
        &self,
        x: RawView<'_, T>,
        y: RawView<'_, T>,
        tad: &TadPack,
        z: RawViewMut<'_, T>,
        extra: &[T],
    ) -> Result<()>;

    /// Broadcast with the output aliasing `x`; `tad` is built for `z`.
    fn broadcast_in_place<Op: BinaryOp<T>>(
        &self,
        z: RawViewMut<'_, T>,
        y: RawView<'_, T>,
        tad: &TadPack,
        extra: &[T],
    ) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_view_checks_coverage() {
        let shape = ShapeDescriptor::c(&[2, 3]).unwrap();
        let data = [0.0f32; 6];
        assert!(RawView::new(&data, &shape).is_ok());
        assert_eq!(
            RawView::new(&data[..5], &shape).unwrap_err(),
            TensorError::LengthMismatch {
                expected: 6,
                got: 5
            }
        );
    }

    #[test]
    fn test_raw_view_mut_allows_larger_buffers() {
        let shape = ShapeDescriptor::with_strides(&[2], &[3], crate::shape::Order::C).unwrap();
        let mut data = [0.0f64; 4];
        let mut view = RawViewMut::new(&mut data, &shape).unwrap();
        assert_eq!(view.as_view().data().len(), 4);
        view.data_mut()[3] = 1.0;
        assert_eq!(view.data(), &[0.0, 0.0, 0.0, 1.0]);
        assert_eq!(view.shape().extents(), &[2]);
    }

    #[test]
    fn test_raw_view_mut_checks_coverage() {
        let shape = ShapeDescriptor::c(&[4]).unwrap();
        let mut data = [0.0f32; 2];
        assert_eq!(
            RawViewMut::new(&mut data, &shape).unwrap_err(),
            TensorError::LengthMismatch {
                expected: 4,
                got: 2
            }
        );
    }
}
