//! Tensor-along-dimension (TAD) decomposition.
//!
//! A TAD pack splits a tensor into independent slices spanning a chosen set
//! of axes. Every combination of indices over the remaining ("batch") axes
//! selects one slice, so an axis-restricted reduction or broadcast becomes a
//! batch of flat operations, one per slice.

use smallvec::SmallVec;

use crate::error::{Result, TensorError};
use crate::index::LogicalOffsets;
use crate::shape::{Dims, ShapeDescriptor};

/// Slices of a tensor along a set of axes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TadPack {
    source: ShapeDescriptor,
    axes: Dims,
    sub_shape: ShapeDescriptor,
    complement: Dims,
    offsets: Vec<usize>,
}

impl TadPack {
    /// Decomposes `shape` into slices spanning `axes`.
    ///
    /// The axes may be given in any order and may repeat; they are sorted and
    /// deduplicated before offsets are computed.
    ///
    /// # Errors
    /// `EmptyAxes` for an empty axis set, `InvalidAxis` for an axis outside
    /// `0..rank`.
    pub fn new(shape: &ShapeDescriptor, axes: &[usize]) -> Result<Self> {
        if axes.is_empty() {
            return Err(TensorError::EmptyAxes);
        }
        let rank = shape.rank();
        if let Some(&axis) = axes.iter().find(|&&a| a >= rank) {
            return Err(TensorError::InvalidAxis { axis, rank });
        }
        let mut sorted: Dims = SmallVec::from_slice(axes);
        sorted.sort_unstable();
        sorted.dedup();

        let extents = shape.extents();
        let strides = shape.strides();

        let sub_extents: Dims = sorted.iter().map(|&a| extents[a]).collect();
        let sub_strides: Dims = sorted.iter().map(|&a| strides[a]).collect();
        let sub_shape = ShapeDescriptor::with_strides(&sub_extents, &sub_strides, shape.order())?;

        let (complement, complement_strides): (Dims, Dims) = (0..rank)
            .filter(|a| !sorted.contains(a))
            .map(|a| (extents[a], strides[a]))
            .unzip();
        let offsets: Vec<usize> = LogicalOffsets::new(&complement, &complement_strides, 0).collect();

        tracing::trace!(
            axes = ?sorted.as_slice(),
            num_tads = offsets.len(),
            tad_length = sub_shape.length(),
            "built tad pack"
        );

        Ok(TadPack {
            source: shape.clone(),
            axes: sorted,
            sub_shape,
            complement,
            offsets,
        })
    }

    /// Descriptor the pack was computed for.
    pub fn source(&self) -> &ShapeDescriptor {
        &self.source
    }

    /// Sorted, deduplicated axes spanned by each slice.
    pub fn axes(&self) -> &[usize] {
        &self.axes
    }

    /// Shape of a single slice, addressed with the source strides.
    pub fn sub_shape(&self) -> &ShapeDescriptor {
        &self.sub_shape
    }

    pub fn num_tads(&self) -> usize {
        self.offsets.len()
    }

    /// Number of elements in each slice.
    pub fn tad_length(&self) -> usize {
        self.sub_shape.length()
    }

    /// Starting buffer offset of each slice, in row-major order over the
    /// batch axes.
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Extents of the batch axes: the shape of a per-slice result. When the
    /// slices span every axis there is one slice and the result is `[1]`.
    pub fn complement_extents(&self) -> &[usize] {
        if self.complement.is_empty() {
            &[1]
        } else {
            &self.complement
        }
    }

    /// Buffer offsets of the elements of slice `t`, in row-major order over
    /// the slice axes.
    pub fn slice_offsets(&self, t: usize) -> LogicalOffsets<'_> {
        LogicalOffsets::new(
            self.sub_shape.extents(),
            self.sub_shape.strides(),
            self.offsets[t],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_of_matrix() {
        let s = ShapeDescriptor::c(&[2, 3]).unwrap();
        let tad = TadPack::new(&s, &[1]).unwrap();
        assert_eq!(tad.num_tads(), 2);
        assert_eq!(tad.tad_length(), 3);
        assert_eq!(tad.offsets(), &[0, 3]);
        assert_eq!(tad.sub_shape().strides(), &[1]);
        assert!(tad.sub_shape().is_contiguous());
        assert_eq!(tad.complement_extents(), &[2]);
    }

    #[test]
    fn test_columns_of_matrix() {
        let s = ShapeDescriptor::c(&[2, 3]).unwrap();
        let tad = TadPack::new(&s, &[0]).unwrap();
        assert_eq!(tad.num_tads(), 3);
        assert_eq!(tad.offsets(), &[0, 1, 2]);
        assert_eq!(tad.sub_shape().extents(), &[2]);
        assert_eq!(tad.sub_shape().element_wise_stride(), Some(3));
        assert_eq!(tad.slice_offsets(2).collect::<Vec<_>>(), vec![2, 5]);
    }

    #[test]
    fn test_column_major_source() {
        let s = ShapeDescriptor::f(&[2, 3]).unwrap();
        let tad = TadPack::new(&s, &[1]).unwrap();
        assert_eq!(tad.offsets(), &[0, 1]);
        assert_eq!(tad.slice_offsets(1).collect::<Vec<_>>(), vec![1, 3, 5]);
    }

    #[test]
    fn test_unsorted_axes_are_sorted() {
        let s = ShapeDescriptor::c(&[2, 3, 4]).unwrap();
        let sorted = TadPack::new(&s, &[1, 2]).unwrap();
        let unsorted = TadPack::new(&s, &[2, 1, 2]).unwrap();
        assert_eq!(unsorted.axes(), &[1, 2]);
        assert_eq!(sorted, unsorted);
        assert_eq!(sorted.offsets(), &[0, 12]);
        assert_eq!(sorted.sub_shape().extents(), &[3, 4]);
    }

    #[test]
    fn test_middle_axis() {
        let s = ShapeDescriptor::c(&[2, 3, 4]).unwrap();
        let tad = TadPack::new(&s, &[1]).unwrap();
        assert_eq!(tad.num_tads(), 8);
        assert_eq!(tad.complement_extents(), &[2, 4]);
        assert_eq!(tad.offsets(), &[0, 1, 2, 3, 12, 13, 14, 15]);
        assert_eq!(tad.slice_offsets(5).collect::<Vec<_>>(), vec![13, 17, 21]);
    }

    #[test]
    fn test_all_axes_single_tad() {
        let s = ShapeDescriptor::c(&[2, 2]).unwrap();
        let tad = TadPack::new(&s, &[0, 1]).unwrap();
        assert_eq!(tad.num_tads(), 1);
        assert_eq!(tad.offsets(), &[0]);
        assert_eq!(tad.complement_extents(), &[1]);
        assert_eq!(tad.tad_length(), 4);
    }

    #[test]
    fn test_invalid_axes() {
        let s = ShapeDescriptor::c(&[2, 2]).unwrap();
        assert_eq!(TadPack::new(&s, &[]), Err(TensorError::EmptyAxes));
        assert_eq!(
            TadPack::new(&s, &[0, 2]),
            Err(TensorError::InvalidAxis { axis: 2, rank: 2 })
        );
    }
}
