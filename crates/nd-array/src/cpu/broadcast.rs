//! Broadcast of a lower-rank operand across TAD slices.

use rayon::prelude::*;

use crate::backend::{RawView, RawViewMut};
use crate::config::ExecConfig;
use crate::element::Element;
use crate::error::{Result, TensorError};
use crate::ops::BinaryOp;
use crate::shape::{contiguous_strides, Order};
use crate::tad::TadPack;

fn check_operand(y: &RawView<'_, impl Element>, tad: &TadPack) -> Result<()> {
    if y.shape.length() != tad.tad_length() {
        return Err(TensorError::LengthMismatch {
            expected: tad.tad_length(),
            got: y.shape.length(),
        });
    }
    Ok(())
}

/// Returns the slice length when slice `t` occupies exactly
/// `[t * len, (t + 1) * len)` of the buffer in logical order, so the buffer
/// can be split into independent chunks.
fn chunk_length(tad: &TadPack) -> Option<usize> {
    let len = tad.tad_length();
    let sub = tad.sub_shape();
    let row_major = contiguous_strides(sub.extents(), Order::C);
    let sequential = tad
        .offsets()
        .iter()
        .enumerate()
        .all(|(t, &offset)| offset == t * len);
    (sub.strides() == row_major.as_slice() && sequential).then_some(len)
}

pub(crate) fn broadcast<T: Element, Op: BinaryOp<T>>(
    config: &ExecConfig,
    x: RawView<'_, T>,
    y: RawView<'_, T>,
    tad: &TadPack,
    mut z: RawViewMut<'_, T>,
    extra: &[T],
) -> Result<()> {
    super::check_tad_source(tad, x.shape)?;
    if !z.shape.is_same_shape(x.shape) {
        return Err(TensorError::ShapeMismatch {
            expected: x.shape.extents().to_vec(),
            got: z.shape.extents().to_vec(),
        });
    }
    check_operand(&y, tad)?;

    let z_tad_owned;
    let z_tad = if z.shape.equals_strict(x.shape) {
        tad
    } else {
        z_tad_owned = TadPack::new(z.shape, tad.axes())?;
        &z_tad_owned
    };
    let y_values: Vec<T> = y.shape.logical_offsets().map(|o| y.data[o]).collect();
    let n = x.shape.length();

    let chunked = if std::ptr::eq(z_tad, tad) && n >= config.parallel_threshold {
        chunk_length(tad)
    } else {
        None
    };
    if let Some(len) = chunked {
        tracing::trace!(num_tads = tad.num_tads(), len, "parallel chunked broadcast");
        z.data[..n]
            .par_chunks_mut(len)
            .zip(x.data[..n].par_chunks(len))
            .for_each(|(zc, xc)| {
                for ((zv, &xv), &yv) in zc.iter_mut().zip(xc).zip(&y_values) {
                    *zv = Op::op(xv, yv, extra);
                }
            });
        return Ok(());
    }

    for t in 0..tad.num_tads() {
        let pairs = tad.slice_offsets(t).zip(z_tad.slice_offsets(t));
        for ((xo, zo), &yv) in pairs.zip(&y_values) {
            z.data[zo] = Op::op(x.data[xo], yv, extra);
        }
    }
    Ok(())
}

pub(crate) fn broadcast_in_place<T: Element, Op: BinaryOp<T>>(
    config: &ExecConfig,
    mut z: RawViewMut<'_, T>,
    y: RawView<'_, T>,
    tad: &TadPack,
    extra: &[T],
) -> Result<()> {
    super::check_tad_source(tad, z.shape)?;
    check_operand(&y, tad)?;

    let y_values: Vec<T> = y.shape.logical_offsets().map(|o| y.data[o]).collect();
    let n = z.shape.length();

    let chunked = if n >= config.parallel_threshold {
        chunk_length(tad)
    } else {
        None
    };
    if let Some(len) = chunked {
        tracing::trace!(num_tads = tad.num_tads(), len, "parallel chunked broadcast");
        z.data[..n].par_chunks_mut(len).for_each(|zc| {
            for (zv, &yv) in zc.iter_mut().zip(&y_values) {
                *zv = Op::op(*zv, yv, extra);
            }
        });
        return Ok(());
    }

    for t in 0..tad.num_tads() {
        for (zo, &yv) in tad.slice_offsets(t).zip(&y_values) {
            z.data[zo] = Op::op(z.data[zo], yv, extra);
        }
    }
    Ok(())
}
