//! Full, per-slice and two-operand reductions.

use rayon::prelude::*;

use super::linear_compatible;
use crate::backend::{RawView, RawViewMut};
use crate::config::ExecConfig;
use crate::element::Element;
use crate::error::{Result, TensorError};
use crate::ops::{Reduce3Op, ReduceOp};
use crate::tad::TadPack;

fn fold_values<T: Element, Op: ReduceOp<T>>(values: impl Iterator<Item = T>, extra: &[T]) -> T {
    values.fold(Op::start(extra), |acc, v| {
        Op::merge(acc, Op::map(v, extra), extra)
    })
}

pub(crate) fn reduce_scalar<T: Element, Op: ReduceOp<T>>(
    config: &ExecConfig,
    x: RawView<'_, T>,
    extra: &[T],
) -> Result<T> {
    let n = x.shape.length();
    let parallel = n >= config.parallel_threshold;
    let acc = if x.shape.is_contiguous() {
        let data = &x.data[..n];
        if parallel {
            tracing::trace!(n, "parallel contiguous reduce");
            data.par_iter()
                .map(|&v| Op::map(v, extra))
                .reduce(|| Op::start(extra), |a, b| Op::merge(a, b, extra))
        } else {
            fold_values::<T, Op>(data.iter().copied(), extra)
        }
    } else if parallel {
        tracing::trace!(n, "parallel strided reduce");
        (0..n)
            .into_par_iter()
            .map(|i| Op::map(x.data[x.shape.offset_of_logical(i)], extra))
            .reduce(|| Op::start(extra), |a, b| Op::merge(a, b, extra))
    } else {
        fold_values::<T, Op>(x.shape.logical_offsets().map(|o| x.data[o]), extra)
    };
    Ok(Op::finish(acc, n, extra))
}

pub(crate) fn reduce_along<T: Element, Op: ReduceOp<T>>(
    config: &ExecConfig,
    x: RawView<'_, T>,
    tad: &TadPack,
    mut z: RawViewMut<'_, T>,
    extra: &[T],
) -> Result<()> {
    super::check_tad_source(tad, x.shape)?;
    let num_tads = tad.num_tads();
    if z.shape.length() != num_tads {
        return Err(TensorError::LengthMismatch {
            expected: num_tads,
            got: z.shape.length(),
        });
    }

    let tad_length = tad.tad_length();
    let reduce_slice = |t: usize| {
        let acc = fold_values::<T, Op>(tad.slice_offsets(t).map(|o| x.data[o]), extra);
        Op::finish(acc, tad_length, extra)
    };
    let values: Vec<T> = if num_tads > 1 && num_tads * tad_length >= config.parallel_threshold {
        tracing::trace!(num_tads, tad_length, "parallel per-slice reduce");
        (0..num_tads).into_par_iter().map(&reduce_slice).collect()
    } else {
        (0..num_tads).map(&reduce_slice).collect()
    };

    let shape = z.shape;
    for (zo, v) in shape.logical_offsets().zip(values) {
        z.data[zo] = v;
    }
    Ok(())
}

pub(crate) fn reduce3_scalar<T: Element, Op: Reduce3Op<T>>(
    config: &ExecConfig,
    x: RawView<'_, T>,
    y: RawView<'_, T>,
    extra: &[T],
) -> Result<T> {
    if !x.shape.is_same_shape(y.shape) {
        return Err(TensorError::ShapeMismatch {
            expected: x.shape.extents().to_vec(),
            got: y.shape.extents().to_vec(),
        });
    }
    let n = x.shape.length();
    let merge = |a: T, b: T| -> T { Op::merge(a, b, extra) };
    let acc = if linear_compatible(x.shape, y.shape) {
        let (xs, ys) = (&x.data[..n], &y.data[..n]);
        if n >= config.parallel_threshold {
            tracing::trace!(n, "parallel reduce3");
            xs.par_iter()
                .zip(ys.par_iter())
                .map(|(&a, &b)| Op::pair(a, b, extra))
                .reduce(|| Op::start(extra), merge)
        } else {
            xs.iter()
                .zip(ys)
                .fold(Op::start(extra), |acc, (&a, &b)| merge(acc, Op::pair(a, b, extra)))
        }
    } else {
        x.shape
            .logical_offsets()
            .zip(y.shape.logical_offsets())
            .fold(Op::start(extra), |acc, (xo, yo)| {
                merge(acc, Op::pair(x.data[xo], y.data[yo], extra))
            })
    };
    Ok(Op::finish(acc, n, extra))
}
