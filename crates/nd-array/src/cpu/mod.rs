pub mod broadcast;
pub mod elementwise;
pub mod reduce;

use crate::backend::{OpExecutor, RawView, RawViewMut};
use crate::config::ExecConfig;
use crate::element::Element;
use crate::error::{Result, TensorError};
use crate::ops::{BinaryOp, Reduce3Op, ReduceOp, UnaryOp};
use crate::shape::{Order, ShapeDescriptor};
use crate::tad::TadPack;

/// Pure-Rust CPU executor.
///
/// Loops over contiguous operands run directly on the buffers and are split
/// across the rayon pool above [`ExecConfig::parallel_threshold`]; strided
/// operands are walked in logical order.
#[derive(Debug, Clone)]
pub struct CpuExecutor {
    config: ExecConfig,
}

impl CpuExecutor {
    pub fn new() -> Self {
        CpuExecutor {
            config: ExecConfig::default(),
        }
    }

    pub fn with_config(config: ExecConfig) -> Self {
        CpuExecutor { config }
    }

    pub fn config(&self) -> &ExecConfig {
        &self.config
    }
}

impl Default for CpuExecutor {
    fn default() -> Self {
        Self::new()
    }
}

/// True when buffer position `i` of both operands holds the element at the
/// same logical position, for every `i < length`.
pub(crate) fn linear_compatible(a: &ShapeDescriptor, b: &ShapeDescriptor) -> bool {
    a.is_contiguous()
        && b.is_contiguous()
        && a.order() == b.order()
        && (a.order() == Order::C || a.extents() == b.extents())
}

/// Returns the shared length, or `LengthMismatch` with `expected` taken from
/// the first descriptor.
pub(crate) fn check_same_length(expected: &ShapeDescriptor, got: &ShapeDescriptor) -> Result<usize> {
    if expected.length() != got.length() {
        return Err(TensorError::LengthMismatch {
            expected: expected.length(),
            got: got.length(),
        });
    }
    Ok(expected.length())
}

pub(crate) fn check_tad_source(tad: &TadPack, shape: &ShapeDescriptor) -> Result<()> {
    if !tad.source().equals_strict(shape) {
        return Err(TensorError::ShapeMismatch {
            expected: tad.source().extents().to_vec(),
            got: shape.extents().to_vec(),
        });
    }
    Ok(())
}

impl<T: Element> OpExecutor<T> for CpuExecutor {
    fn name(&self) -> &str {
        "cpu"
    }

    fn transform<Op: UnaryOp<T>>(
        &self,
        x: RawView<'_, T>,
        z: RawViewMut<'_, T>,
        extra: &[T],
    ) -> Result<()> {
        elementwise::transform::<T, Op>(&self.config, x, z, extra)
    }

    fn transform_in_place<Op: UnaryOp<T>>(&self, z: RawViewMut<'_, T>, extra: &[T]) -> Result<()> {
        elementwise::transform_in_place::<T, Op>(&self.config, z, extra)
    }

    fn pairwise<Op: BinaryOp<T>>(
        &self,
        x: RawView<'_, T>,
        y: RawView<'_, T>,
        z: RawViewMut<'_, T>,
        extra: &[T],
    ) -> Result<()> {
        elementwise::pairwise::<T, Op>(&self.config, x, y, z, extra)
    }

    fn pairwise_in_place<Op: BinaryOp<T>>(
        &self,
        z: RawViewMut<'_, T>,
        y: RawView<'_, T>,
        extra: &[T],
    ) -> Result<()> {
        elementwise::pairwise_in_place::<T, Op>(&self.config, z, y, extra)
    }

    fn scalar<Op: BinaryOp<T>>(
        &self,
        x: RawView<'_, T>,
        scalar: T,
        z: RawViewMut<'_, T>,
        extra: &[T],
    ) -> Result<()> {
        elementwise::scalar::<T, Op>(&self.config, x, scalar, z, extra)
    }

    fn scalar_in_place<Op: BinaryOp<T>>(
        &self,
        z: RawViewMut<'_, T>,
        scalar: T,
        extra: &[T],
    ) -> Result<()> {
        elementwise::scalar_in_place::<T, Op>(&self.config, z, scalar, extra)
    }

    fn reduce_scalar<Op: ReduceOp<T>>(&self, x: RawView<'_, T>, extra: &[T]) -> Result<T> {
        reduce::reduce_scalar::<T, Op>(&self.config, x, extra)
    }

    fn reduce_along<Op: ReduceOp<T>>(
        &self,
        x: RawView<'_, T>,
        tad: &TadPack,
        z: RawViewMut<'_, T>,
        extra: &[T],
    ) -> Result<()> {
        reduce::reduce_along::<T, Op>(&self.config, x, tad, z, extra)
    }

    fn reduce3_scalar<Op: Reduce3Op<T>>(
        &self,
        x: RawView<'_, T>,
        y: RawView<'_, T>,
        extra: &[T],
    ) -> Result<T> {
        reduce::reduce3_scalar::<T, Op>(&self.config, x, y, extra)
    }

    fn broadcast<Op: BinaryOp<T>>(
        &self,
        x: RawView<'_, T>,
        y: RawView<'_, T>,
        tad: &TadPack,
        z: RawViewMut<'_, T>,
        extra: &[T],
    ) -> Result<()> {
        broadcast::broadcast::<T, Op>(&self.config, x, y, tad, z, extra)
    }

    fn broadcast_in_place<Op: BinaryOp<T>>(
        &self,
        z: RawViewMut<'_, T>,
        y: RawView<'_, T>,
        tad: &TadPack,
        extra: &[T],
    ) -> Result<()> {
        broadcast::broadcast_in_place::<T, Op>(&self.config, z, y, tad, extra)
    }
}
