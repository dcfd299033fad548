//! Transform, pairwise and scalar loops.

use rayon::prelude::*;

use super::{check_same_length, linear_compatible};
use crate::backend::{RawView, RawViewMut};
use crate::config::ExecConfig;
use crate::element::Element;
use crate::error::Result;
use crate::ops::{BinaryOp, UnaryOp};

pub(crate) fn transform<T: Element, Op: UnaryOp<T>>(
    config: &ExecConfig,
    x: RawView<'_, T>,
    mut z: RawViewMut<'_, T>,
    extra: &[T],
) -> Result<()> {
    let n = check_same_length(z.shape, x.shape)?;
    if linear_compatible(x.shape, z.shape) {
        let (xs, zs) = (&x.data[..n], &mut z.data[..n]);
        if n >= config.parallel_threshold {
            zs.par_iter_mut()
                .zip(xs.par_iter())
                .for_each(|(z, &x)| *z = Op::op(x, extra));
        } else {
            for (z, &x) in zs.iter_mut().zip(xs) {
                *z = Op::op(x, extra);
            }
        }
    } else {
        let shape = z.shape;
        for (zo, xo) in shape.logical_offsets().zip(x.shape.logical_offsets()) {
            z.data[zo] = Op::op(x.data[xo], extra);
        }
    }
    Ok(())
}

pub(crate) fn transform_in_place<T: Element, Op: UnaryOp<T>>(
    config: &ExecConfig,
    mut z: RawViewMut<'_, T>,
    extra: &[T],
) -> Result<()> {
    let shape = z.shape;
    let n = shape.length();
    if shape.is_contiguous() {
        let zs = &mut z.data[..n];
        if n >= config.parallel_threshold {
            zs.par_iter_mut().for_each(|v| *v = Op::op(*v, extra));
        } else {
            for v in zs.iter_mut() {
                *v = Op::op(*v, extra);
            }
        }
    } else {
        for zo in shape.logical_offsets() {
            z.data[zo] = Op::op(z.data[zo], extra);
        }
    }
    Ok(())
}

pub(crate) fn pairwise<T: Element, Op: BinaryOp<T>>(
    config: &ExecConfig,
    x: RawView<'_, T>,
    y: RawView<'_, T>,
    mut z: RawViewMut<'_, T>,
    extra: &[T],
) -> Result<()> {
    check_same_length(x.shape, y.shape)?;
    let n = check_same_length(z.shape, x.shape)?;
    if linear_compatible(x.shape, z.shape) && linear_compatible(y.shape, z.shape) {
        let (xs, ys, zs) = (&x.data[..n], &y.data[..n], &mut z.data[..n]);
        if n >= config.parallel_threshold {
            zs.par_iter_mut()
                .zip(xs.par_iter().zip(ys.par_iter()))
                .for_each(|(z, (&a, &b))| *z = Op::op(a, b, extra));
        } else {
            for (z, (&a, &b)) in zs.iter_mut().zip(xs.iter().zip(ys)) {
                *z = Op::op(a, b, extra);
            }
        }
    } else {
        let shape = z.shape;
        let pairs = x.shape.logical_offsets().zip(y.shape.logical_offsets());
        for (zo, (xo, yo)) in shape.logical_offsets().zip(pairs) {
            z.data[zo] = Op::op(x.data[xo], y.data[yo], extra);
        }
    }
    Ok(())
}

pub(crate) fn pairwise_in_place<T: Element, Op: BinaryOp<T>>(
    config: &ExecConfig,
    mut z: RawViewMut<'_, T>,
    y: RawView<'_, T>,
    extra: &[T],
) -> Result<()> {
    let n = check_same_length(z.shape, y.shape)?;
    if linear_compatible(y.shape, z.shape) {
        let (ys, zs) = (&y.data[..n], &mut z.data[..n]);
        if n >= config.parallel_threshold {
            zs.par_iter_mut()
                .zip(ys.par_iter())
                .for_each(|(z, &b)| *z = Op::op(*z, b, extra));
        } else {
            for (z, &b) in zs.iter_mut().zip(ys) {
                *z = Op::op(*z, b, extra);
            }
        }
    } else {
        let shape = z.shape;
        for (zo, yo) in shape.logical_offsets().zip(y.shape.logical_offsets()) {
            z.data[zo] = Op::op(z.data[zo], y.data[yo], extra);
        }
    }
    Ok(())
}

pub(crate) fn scalar<T: Element, Op: BinaryOp<T>>(
    config: &ExecConfig,
    x: RawView<'_, T>,
    scalar: T,
    mut z: RawViewMut<'_, T>,
    extra: &[T],
) -> Result<()> {
    let n = check_same_length(z.shape, x.shape)?;
    if linear_compatible(x.shape, z.shape) {
        let (xs, zs) = (&x.data[..n], &mut z.data[..n]);
        if n >= config.parallel_threshold {
            zs.par_iter_mut()
                .zip(xs.par_iter())
                .for_each(|(z, &a)| *z = Op::op(a, scalar, extra));
        } else {
            for (z, &a) in zs.iter_mut().zip(xs) {
                *z = Op::op(a, scalar, extra);
            }
        }
    } else {
        let shape = z.shape;
        for (zo, xo) in shape.logical_offsets().zip(x.shape.logical_offsets()) {
            z.data[zo] = Op::op(x.data[xo], scalar, extra);
        }
    }
    Ok(())
}

pub(crate) fn scalar_in_place<T: Element, Op: BinaryOp<T>>(
    config: &ExecConfig,
    mut z: RawViewMut<'_, T>,
    scalar: T,
    extra: &[T],
) -> Result<()> {
    let shape = z.shape;
    let n = shape.length();
    if shape.is_contiguous() {
        let zs = &mut z.data[..n];
        if n >= config.parallel_threshold {
            zs.par_iter_mut().for_each(|v| *v = Op::op(*v, scalar, extra));
        } else {
            for v in zs.iter_mut() {
                *v = Op::op(*v, scalar, extra);
            }
        }
    } else {
        for zo in shape.logical_offsets() {
            z.data[zo] = Op::op(z.data[zo], scalar, extra);
        }
    }
    Ok(())
}
