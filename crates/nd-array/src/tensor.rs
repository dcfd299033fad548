use std::fmt;
use std::sync::OnceLock;

use crate::backend::{OpExecutor, RawView, RawViewMut};
use crate::config::ExecConfig;
use crate::cpu::CpuExecutor;
use crate::element::{DType, Element};
use crate::error::{Result, TensorError};
use crate::ops::pairwise::{Add, Assign};
use crate::ops::reduce::{Mean, Sum};
use crate::ops::reduce3::EqualsWithEps;
use crate::ops::{BinaryOp, ReduceOp, UnaryOp};
use crate::shape::{Order, ShapeDescriptor};
use crate::storage::Storage;
use crate::tad::TadPack;

/// Executor behind the high-level `NdArray` methods, configured from the
/// environment on first use.
fn executor() -> &'static CpuExecutor {
    static EXECUTOR: OnceLock<CpuExecutor> = OnceLock::new();
    EXECUTOR.get_or_init(|| CpuExecutor::with_config(ExecConfig::from_env()))
}

/// An N-dimensional array: a flat buffer interpreted through a
/// [`ShapeDescriptor`].
///
/// The buffer is either owned (allocated here and freed on drop) or borrowed
/// from the caller for the lifetime `'a`, in which case it is never freed or
/// reallocated by the array.
#[derive(Debug)]
pub struct NdArray<'a, T: Element> {
    storage: Storage<'a, T>,
    shape: ShapeDescriptor,
}

impl<'a, T: Element> NdArray<'a, T> {
    /// An array with no buffer and the rank-0 descriptor.
    pub fn empty() -> Self {
        NdArray {
            storage: Storage::Empty,
            shape: ShapeDescriptor::empty(),
        }
    }

    /// Zero-filled owning array.
    pub fn zeros(extents: &[usize], order: Order) -> Result<Self> {
        let shape = ShapeDescriptor::new(extents, order)?;
        Ok(Self::with_shape(shape))
    }

    /// Zero-filled owning `rows x columns` matrix.
    pub fn matrix(rows: usize, columns: usize, order: Order) -> Result<Self> {
        Self::zeros(&[rows, columns], order)
    }

    /// Zero-filled owning `1 x len` row vector.
    pub fn row_vector(len: usize, order: Order) -> Result<Self> {
        Self::zeros(&[1, len], order)
    }

    /// Takes ownership of `data`, laid out contiguously in `order`.
    ///
    /// # Errors
    /// `LengthMismatch` if `data.len()` differs from the product of `extents`.
    pub fn from_vec(data: Vec<T>, extents: &[usize], order: Order) -> Result<Self> {
        let shape = ShapeDescriptor::new(extents, order)?;
        if data.len() != shape.length() {
            return Err(TensorError::LengthMismatch {
                expected: shape.length(),
                got: data.len(),
            });
        }
        Ok(NdArray {
            storage: Storage::from_vec(data),
            shape,
        })
    }

    /// Zero-filled owning array large enough for `shape`, which may be
    /// strided.
    pub fn with_shape(shape: ShapeDescriptor) -> Self {
        let storage = if shape.rank() == 0 {
            Storage::Empty
        } else {
            Storage::zeros(shape.required_buffer_len())
        };
        NdArray { storage, shape }
    }

    /// Zero-filled owning array for an encoded descriptor.
    pub fn from_shape_info(info: &[i64]) -> Result<Self> {
        Ok(Self::with_shape(ShapeDescriptor::from_shape_info(info)?))
    }

    /// Wraps caller memory without taking ownership.
    ///
    /// # Errors
    /// `LengthMismatch` if `buffer` is too short to back `shape`.
    pub fn view(buffer: &'a mut [T], shape: ShapeDescriptor) -> Result<Self> {
        RawView::new(&*buffer, &shape)?;
        Ok(NdArray {
            storage: Storage::borrowed(buffer),
            shape,
        })
    }

    pub fn shape(&self) -> &ShapeDescriptor {
        &self.shape
    }

    /// The descriptor in its linear encoding.
    pub fn shape_info(&self) -> Vec<i64> {
        self.shape.to_shape_info()
    }

    pub fn order(&self) -> Order {
        self.shape.order()
    }

    pub fn rank(&self) -> usize {
        self.shape.rank()
    }

    pub fn length(&self) -> usize {
        self.shape.length()
    }

    pub fn rows(&self) -> usize {
        self.shape.rows()
    }

    pub fn columns(&self) -> usize {
        self.shape.columns()
    }

    pub fn dtype(&self) -> DType {
        T::DTYPE
    }

    /// Size of one element in bytes.
    pub fn size_of_element(&self) -> usize {
        T::DTYPE.size_in_bytes()
    }

    /// True if the array releases its buffer on drop.
    pub fn is_owner(&self) -> bool {
        self.storage.is_owned()
    }

    /// True if a buffer is attached.
    pub fn non_null(&self) -> bool {
        !matches!(self.storage, Storage::Empty)
    }

    /// The flat buffer, in storage order.
    pub fn buffer(&self) -> &[T] {
        self.storage.as_slice()
    }

    pub fn buffer_mut(&mut self) -> &mut [T] {
        self.storage.as_mut_slice()
    }

    /// Buffer and descriptor as an executor operand. Every constructor
    /// leaves the buffer covering the descriptor, so no check is repeated.
    pub fn raw(&self) -> RawView<'_, T> {
        RawView {
            data: self.storage.as_slice(),
            shape: &self.shape,
        }
    }

    /// Writable buffer and descriptor as an executor operand.
    pub fn raw_mut(&mut self) -> RawViewMut<'_, T> {
        RawViewMut {
            data: self.storage.as_mut_slice(),
            shape: &self.shape,
        }
    }

    /// Bound for the flat accessors. Views with zero or overlapping strides
    /// can span fewer buffer cells than they have elements.
    fn linear_limit(&self) -> usize {
        self.length().min(self.buffer().len())
    }

    /// Reads the flat buffer at `linear`.
    ///
    /// # Errors
    /// `IndexOutOfRange` if `linear` reaches `length()` or the end of the
    /// buffer.
    pub fn get(&self, linear: usize) -> Result<T> {
        let limit = self.linear_limit();
        if linear >= limit {
            return Err(TensorError::IndexOutOfRange {
                index: linear,
                limit,
            });
        }
        Ok(self.buffer()[linear])
    }

    /// Writes the flat buffer at `linear`. Out-of-range writes are ignored.
    pub fn put(&mut self, linear: usize, value: T) {
        let limit = self.linear_limit();
        if linear >= limit {
            tracing::trace!(linear, limit, "ignoring out-of-range put");
            return;
        }
        self.buffer_mut()[linear] = value;
    }

    /// Reads the element at `indices`, addressed through the strides.
    pub fn get_at(&self, indices: &[usize]) -> Result<T> {
        let offset = self.shape.offset_of(indices)?;
        Ok(self.buffer()[offset])
    }

    pub fn get2(&self, i: usize, j: usize) -> Result<T> {
        self.get_at(&[i, j])
    }

    pub fn get3(&self, i: usize, j: usize, k: usize) -> Result<T> {
        self.get_at(&[i, j, k])
    }

    /// Writes the element at `indices`, addressed through the strides.
    pub fn put_at(&mut self, indices: &[usize], value: T) -> Result<()> {
        let offset = self.shape.offset_of(indices)?;
        self.buffer_mut()[offset] = value;
        Ok(())
    }

    pub fn put2(&mut self, i: usize, j: usize, value: T) -> Result<()> {
        self.put_at(&[i, j], value)
    }

    pub fn put3(&mut self, i: usize, j: usize, k: usize, value: T) -> Result<()> {
        self.put_at(&[i, j, k], value)
    }

    /// Copies `other` into this array, pairing elements by logical position.
    ///
    /// # Errors
    /// `LengthMismatch` if the lengths differ; nothing is written then.
    pub fn assign(&mut self, other: &NdArray<'_, T>) -> Result<()> {
        if self.length() != other.length() {
            return Err(TensorError::LengthMismatch {
                expected: self.length(),
                got: other.length(),
            });
        }
        let same_layout = self.shape.extents() == other.shape.extents()
            && self.shape.strides() == other.shape.strides();
        if same_layout && self.shape.is_contiguous() && other.shape.is_contiguous() {
            let n = self.length();
            self.buffer_mut()[..n].copy_from_slice(&other.buffer()[..n]);
            return Ok(());
        }
        let y = other.raw();
        executor().pairwise_in_place::<Assign>(self.raw_mut(), y, &[])
    }

    /// Sets every element to `value`.
    pub fn assign_scalar(&mut self, value: T) -> Result<()> {
        executor().scalar_in_place::<Assign>(self.raw_mut(), value, &[])
    }

    /// Owning copy with the same logical content laid out contiguously in
    /// `order`.
    pub fn duplicate(&self, order: Order) -> Result<NdArray<'static, T>> {
        if self.rank() == 0 {
            return Ok(NdArray::empty());
        }
        let mut out = NdArray::zeros(self.shape.extents(), order)?;
        executor().pairwise_in_place::<Assign>(out.raw_mut(), self.raw(), &[])?;
        Ok(out)
    }

    /// Owning copy with this array's exact layout.
    pub fn to_owned_array(&self) -> NdArray<'static, T> {
        NdArray {
            storage: self.storage.to_owned_storage(),
            shape: self.shape.clone(),
        }
    }

    pub fn is_same_shape(&self, other: &NdArray<'_, T>) -> bool {
        self.shape.is_same_shape(&other.shape)
    }

    /// True iff both arrays have the same shape and no pair of elements
    /// differs by more than `eps`.
    pub fn equals_to(&self, other: &NdArray<'_, T>, eps: T) -> bool {
        if !self.is_same_shape(other) {
            return false;
        }
        match executor().reduce3_scalar::<EqualsWithEps>(self.raw(), other.raw(), &[eps]) {
            Ok(mismatches) => mismatches <= T::zero(),
            Err(_) => false,
        }
    }

    /// [`NdArray::equals_to`] with [`Element::default_eps`].
    pub fn equals(&self, other: &NdArray<'_, T>) -> bool {
        self.equals_to(other, T::default_eps())
    }

    /// Owning copy of the buffer under the transposed descriptor.
    pub fn transpose(&self) -> NdArray<'static, T> {
        NdArray {
            storage: self.storage.to_owned_storage(),
            shape: self.shape.transposed(),
        }
    }

    /// Transposes by rewriting the descriptor. A borrowed view is copied into
    /// owned storage first so the caller's buffer is left untouched.
    pub fn transpose_in_place(&mut self) {
        if let Storage::Borrowed(_) = self.storage {
            tracing::debug!(len = self.storage.len(), "detaching borrowed view before transpose");
            self.storage = self.storage.to_owned_storage();
        }
        self.shape = self.shape.transposed();
    }

    /// Adds `row` to every row of this matrix.
    ///
    /// # Errors
    /// `RankMismatch` unless this array is rank 2, `ShapeMismatch` unless
    /// `row` is a row vector with one element per column.
    pub fn add_row_vector(&mut self, row: &NdArray<'_, T>) -> Result<()> {
        if self.rank() != 2 {
            return Err(TensorError::RankMismatch {
                expected: 2,
                got: self.rank(),
            });
        }
        if !row.shape.is_row_vector() || row.length() != self.columns() {
            return Err(TensorError::ShapeMismatch {
                expected: vec![1, self.columns()],
                got: row.shape.extents().to_vec(),
            });
        }
        let tad = TadPack::new(&self.shape, &[1])?;
        executor().broadcast_in_place::<Add>(self.raw_mut(), row.raw(), &tad, &[])
    }

    /// Reduces every element to a single value.
    pub fn reduce_number<Op: ReduceOp<T>>(&self, extra: &[T]) -> Result<T> {
        executor().reduce_scalar::<Op>(self.raw(), extra)
    }

    pub fn sum_number(&self) -> Result<T> {
        self.reduce_number::<Sum>(&[])
    }

    /// Arithmetic mean; NaN for an empty array.
    pub fn mean_number(&self) -> Result<T> {
        self.reduce_number::<Mean>(&[])
    }

    /// Reduces along `axes`, one value per slice.
    ///
    /// The result is an owning C-order array shaped like the axes that were
    /// not reduced, or `[1]` when every axis is reduced.
    pub fn reduce_along<Op: ReduceOp<T>>(
        &self,
        axes: &[usize],
        extra: &[T],
    ) -> Result<NdArray<'static, T>> {
        let tad = TadPack::new(&self.shape, axes)?;
        let mut out = NdArray::zeros(tad.complement_extents(), Order::C)?;
        executor().reduce_along::<Op>(self.raw(), &tad, out.raw_mut(), extra)?;
        Ok(out)
    }

    pub fn sum_along(&self, axes: &[usize]) -> Result<NdArray<'static, T>> {
        self.reduce_along::<Sum>(axes, &[])
    }

    /// Applies `Op` to every element in place.
    pub fn apply_transform<Op: UnaryOp<T>>(&mut self, extra: &[T]) -> Result<()> {
        executor().transform_in_place::<Op>(self.raw_mut(), extra)
    }

    /// `self[i] = Op(self[i], scalar)`.
    pub fn apply_scalar<Op: BinaryOp<T>>(&mut self, scalar: T, extra: &[T]) -> Result<()> {
        executor().scalar_in_place::<Op>(self.raw_mut(), scalar, extra)
    }

    /// `self[i] = Op(self[i], other[i])`, pairing by logical position.
    pub fn apply_pairwise<Op: BinaryOp<T>>(
        &mut self,
        other: &NdArray<'_, T>,
        extra: &[T],
    ) -> Result<()> {
        let y = other.raw();
        executor().pairwise_in_place::<Op>(self.raw_mut(), y, extra)
    }

    /// Rebinds the array to caller memory, consuming it.
    ///
    /// If the array owned its buffer, that buffer is freed when
    /// `release_existing` is true and handed back otherwise. On error the
    /// consumed array is dropped normally.
    ///
    /// # Errors
    /// `LengthMismatch` if `buffer` is too short to back `shape`.
    pub fn replace_storage<'b>(
        self,
        buffer: &'b mut [T],
        shape: ShapeDescriptor,
        release_existing: bool,
    ) -> Result<(NdArray<'b, T>, Option<Vec<T>>)> {
        let rebound = NdArray::view(buffer, shape)?;
        let previous = self.storage.into_owned_vec();
        let returned = match previous {
            Some(old) if release_existing => {
                tracing::debug!(len = old.len(), "releasing owned buffer on rebind");
                None
            }
            other => other,
        };
        Ok((rebound, returned))
    }

    /// Reinterprets a contiguous array under new extents, keeping its order.
    ///
    /// # Errors
    /// `UnsupportedLayout` for non-contiguous arrays, `LengthMismatch` when
    /// the element count would change.
    pub fn reshape(self, extents: &[usize]) -> Result<Self> {
        if !self.shape.is_contiguous() {
            return Err(TensorError::UnsupportedLayout(format!(
                "cannot reshape non-contiguous array {}",
                self.shape
            )));
        }
        let shape = ShapeDescriptor::new(extents, self.order())?;
        if shape.length() != self.length() {
            return Err(TensorError::LengthMismatch {
                expected: self.length(),
                got: shape.length(),
            });
        }
        Ok(NdArray {
            storage: self.storage,
            shape,
        })
    }
}

impl<T: Element> Default for NdArray<'_, T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Cloning always produces an owning array with the same layout.
impl<T: Element> Clone for NdArray<'_, T> {
    fn clone(&self) -> Self {
        NdArray {
            storage: self.storage.to_owned_storage(),
            shape: self.shape.clone(),
        }
    }
}

impl<'b, T: Element> PartialEq<NdArray<'b, T>> for NdArray<'_, T> {
    fn eq(&self, other: &NdArray<'b, T>) -> bool {
        self.equals(other)
    }
}

/// Prints the elements in logical row-major order.
impl<T: Element> fmt::Display for NdArray<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.buffer();
        write!(f, "[")?;
        for (i, offset) in self.shape.logical_offsets().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", data[offset])?;
        }
        write!(f, "]")
    }
}
