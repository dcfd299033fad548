//! Operation interfaces and the standard kernels.
//!
//! Ops are zero-sized marker types selected as generic parameters, so the
//! executor's element loops are monomorphised per op with no dynamic
//! dispatch. Each op is a pure function over element values plus a small
//! `extra` parameter slice whose meaning is op-specific.

pub mod pairwise;
pub mod reduce;
pub mod reduce3;
pub mod transform;

use crate::element::Element;

/// Elementwise unary op: `z = op(x)`.
pub trait UnaryOp<T: Element> {
    fn op(x: T, extra: &[T]) -> T;
}

/// Elementwise binary op: `z = op(x, y)`. Scalar ops use the same interface
/// with `y` fixed to the scalar operand.
pub trait BinaryOp<T: Element> {
    fn op(x: T, y: T, extra: &[T]) -> T;
}

/// Reduction of one operand to a single value.
///
/// `merge` must be associative and commutative: the executor may visit
/// elements in any order and combine partial results from several threads.
pub trait ReduceOp<T: Element> {
    /// Identity value the accumulation starts from.
    fn start(extra: &[T]) -> T;

    /// Per-element contribution.
    fn map(x: T, _extra: &[T]) -> T {
        x
    }

    fn merge(a: T, b: T, extra: &[T]) -> T;

    /// Post-processing of the accumulated value over `n` elements.
    fn finish(acc: T, _n: usize, _extra: &[T]) -> T {
        acc
    }
}

/// Reduction of two equally shaped operands to a single value, such as a
/// distance or a mismatch count.
pub trait Reduce3Op<T: Element> {
    fn start(extra: &[T]) -> T;

    /// Contribution of one pair of elements.
    fn pair(x: T, y: T, extra: &[T]) -> T;

    fn merge(a: T, b: T, extra: &[T]) -> T;

    fn finish(acc: T, _n: usize, _extra: &[T]) -> T {
        acc
    }
}
