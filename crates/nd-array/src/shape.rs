use smallvec::SmallVec;
use std::fmt;

use crate::error::{Result, TensorError};
use crate::index::LogicalOffsets;

/// Maximum number of dimensions a shape descriptor can describe.
pub const MAX_RANK: usize = 32;

/// Per-dimension sizes or strides; stack-allocated for up to four dimensions.
pub type Dims = SmallVec<[usize; 4]>;

/// Memory order of a tensor buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    /// Row-major: the last axis varies fastest.
    C,
    /// Column-major: the first axis varies fastest.
    F,
}

impl Order {
    /// Returns the conventional single-character tag (`'c'` or `'f'`).
    pub fn as_char(self) -> char {
        match self {
            Order::C => 'c',
            Order::F => 'f',
        }
    }

    /// Returns the integer code used in the shape info encoding.
    pub fn code(self) -> i64 {
        match self {
            Order::C => 99,
            Order::F => 102,
        }
    }

    /// Decodes an order from its shape info code.
    pub fn from_code(code: i64) -> Option<Order> {
        match code {
            99 => Some(Order::C),
            102 => Some(Order::F),
            _ => None,
        }
    }

    /// Returns the other memory order.
    pub fn opposite(self) -> Order {
        match self {
            Order::C => Order::F,
            Order::F => Order::C,
        }
    }
}

impl TryFrom<char> for Order {
    type Error = TensorError;

    fn try_from(c: char) -> Result<Self> {
        match c {
            'c' | 'C' => Ok(Order::C),
            'f' | 'F' => Ok(Order::F),
            other => Err(TensorError::InvalidOrder(other)),
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Computes contiguous strides for `extents` laid out in `order`.
///
/// For extents [d0, d1, d2] the C-order strides are [d1*d2, d2, 1] and the
/// F-order strides are [1, d0, d0*d1].
pub fn contiguous_strides(extents: &[usize], order: Order) -> Dims {
    let rank = extents.len();
    let mut strides: Dims = SmallVec::from_elem(0usize, rank);
    if rank == 0 {
        return strides;
    }
    match order {
        Order::C => {
            strides[rank - 1] = 1;
            for i in (0..rank - 1).rev() {
                strides[i] = strides[i + 1] * extents[i + 1];
            }
        }
        Order::F => {
            strides[0] = 1;
            for i in 1..rank {
                strides[i] = strides[i - 1] * extents[i - 1];
            }
        }
    }
    strides
}

/// Derives the element-wise stride of a layout: the constant step between
/// consecutive elements when the whole tensor is scanned in `order`, or
/// `None` when no single step exists.
///
/// Unit-extent dimensions never break the scan, so a column sliced out of a
/// C-order matrix has an element-wise stride equal to the row length.
fn infer_element_wise_stride(extents: &[usize], strides: &[usize], order: Order) -> Option<usize> {
    let mut dims: SmallVec<[(usize, usize); 4]> = extents
        .iter()
        .copied()
        .zip(strides.iter().copied())
        .filter(|&(e, _)| e != 1)
        .collect();
    if order == Order::C {
        dims.reverse();
    }
    let Some(&(_, step)) = dims.first() else {
        return Some(1);
    };
    let mut expected = step;
    for (extent, stride) in dims {
        if stride != expected {
            return None;
        }
        expected *= extent;
    }
    Some(step)
}

/// Describes how a flat buffer maps onto an N-dimensional logical array:
/// rank, per-dimension extents and strides, memory order and element-wise
/// stride.
///
/// Strides are counted in elements, not bytes. A descriptor of rank 0 is the
/// empty descriptor and has length 0.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShapeDescriptor {
    extents: Dims,
    strides: Dims,
    order: Order,
    element_wise_stride: Option<usize>,
}

impl ShapeDescriptor {
    /// Creates a contiguous descriptor for `extents` in `order`.
    ///
    /// # Errors
    /// `InvalidRank` when more than [`MAX_RANK`] extents are given and
    /// `ZeroExtent` when any extent is zero.
    pub fn new(extents: &[usize], order: Order) -> Result<Self> {
        validate_extents(extents)?;
        Ok(ShapeDescriptor {
            extents: SmallVec::from_slice(extents),
            strides: contiguous_strides(extents, order),
            order,
            element_wise_stride: Some(1),
        })
    }

    /// Creates a contiguous row-major descriptor.
    pub fn c(extents: &[usize]) -> Result<Self> {
        Self::new(extents, Order::C)
    }

    /// Creates a contiguous column-major descriptor.
    pub fn f(extents: &[usize]) -> Result<Self> {
        Self::new(extents, Order::F)
    }

    /// The rank-0 descriptor of an empty tensor.
    pub fn empty() -> Self {
        ShapeDescriptor {
            extents: SmallVec::new(),
            strides: SmallVec::new(),
            order: Order::C,
            element_wise_stride: Some(1),
        }
    }

    /// Creates a descriptor with explicit strides, e.g. for a view into a
    /// larger buffer. The element-wise stride is derived from the layout.
    pub fn with_strides(extents: &[usize], strides: &[usize], order: Order) -> Result<Self> {
        if extents.len() != strides.len() {
            return Err(TensorError::RankMismatch {
                expected: extents.len(),
                got: strides.len(),
            });
        }
        validate_extents(extents)?;
        validate_span(extents, strides)?;
        Ok(ShapeDescriptor {
            extents: SmallVec::from_slice(extents),
            strides: SmallVec::from_slice(strides),
            order,
            element_wise_stride: infer_element_wise_stride(extents, strides, order),
        })
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.extents.len()
    }

    pub fn extents(&self) -> &[usize] {
        &self.extents
    }

    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    pub fn order(&self) -> Order {
        self.order
    }

    /// `Some(1)` when the buffer is fully contiguous in traversal order,
    /// `None` for layouts without a single scan step.
    pub fn element_wise_stride(&self) -> Option<usize> {
        self.element_wise_stride
    }

    pub fn is_contiguous(&self) -> bool {
        self.element_wise_stride == Some(1)
    }

    /// Total number of elements; 0 for the rank-0 empty descriptor.
    pub fn length(&self) -> usize {
        if self.extents.is_empty() {
            0
        } else {
            self.extents.iter().product()
        }
    }

    /// Number of rows. A rank-1 shape is treated as a single row.
    pub fn rows(&self) -> usize {
        match self.rank() {
            0 => 0,
            1 => 1,
            _ => self.extents[0],
        }
    }

    /// Number of columns. A rank-1 shape is treated as a single row.
    pub fn columns(&self) -> usize {
        match self.rank() {
            0 => 0,
            1 => self.extents[0],
            _ => self.extents[1],
        }
    }

    pub fn is_vector(&self) -> bool {
        match self.rank() {
            1 => true,
            2 => self.extents[0] == 1 || self.extents[1] == 1,
            _ => false,
        }
    }

    /// Rank-1 shapes and `1 x n` matrices are row vectors.
    pub fn is_row_vector(&self) -> bool {
        match self.rank() {
            1 => true,
            2 => self.extents[0] == 1,
            _ => false,
        }
    }

    pub fn is_column_vector(&self) -> bool {
        self.rank() == 2 && self.extents[1] == 1
    }

    /// Minimum buffer length needed to back this descriptor.
    pub fn required_buffer_len(&self) -> usize {
        if self.extents.is_empty() {
            return 0;
        }
        1 + self
            .extents
            .iter()
            .zip(self.strides.iter())
            .map(|(&e, &s)| (e - 1) * s)
            .sum::<usize>()
    }

    /// True iff the ranks and every extent agree. Strides and order are not
    /// compared.
    pub fn is_same_shape(&self, other: &ShapeDescriptor) -> bool {
        self.extents == other.extents
    }

    /// True iff the full metadata agrees, so buffers can be copied in bulk.
    pub fn equals_strict(&self, other: &ShapeDescriptor) -> bool {
        self == other
    }

    /// Flat buffer offset of the element at `indices`.
    ///
    /// # Errors
    /// `RankMismatch` if `indices.len() != rank`, `IndexOutOfRange` if an
    /// index reaches its extent.
    pub fn offset_of(&self, indices: &[usize]) -> Result<usize> {
        if indices.len() != self.rank() {
            return Err(TensorError::RankMismatch {
                expected: self.rank(),
                got: indices.len(),
            });
        }
        let mut offset = 0;
        for ((&i, &extent), &stride) in indices.iter().zip(&self.extents).zip(&self.strides) {
            if i >= extent {
                return Err(TensorError::IndexOutOfRange {
                    index: i,
                    limit: extent,
                });
            }
            offset += i * stride;
        }
        Ok(offset)
    }

    /// Flat buffer offset of the element at row-major logical position
    /// `linear`, which must be below `length()`.
    pub(crate) fn offset_of_logical(&self, mut linear: usize) -> usize {
        let mut offset = 0;
        for (&extent, &stride) in self.extents.iter().zip(&self.strides).rev() {
            offset += (linear % extent) * stride;
            linear /= extent;
        }
        offset
    }

    /// Buffer offsets of every element, in row-major logical order.
    pub fn logical_offsets(&self) -> LogicalOffsets<'_> {
        if self.extents.is_empty() {
            LogicalOffsets::exhausted()
        } else {
            LogicalOffsets::new(&self.extents, &self.strides, 0)
        }
    }

    /// Reorders the axes: axis `i` of the result is axis `perm[i]` of `self`.
    pub fn permuted(&self, perm: &[usize]) -> Result<Self> {
        let rank = self.rank();
        let mut seen: SmallVec<[bool; 8]> = SmallVec::from_elem(false, rank);
        if perm.len() != rank {
            return Err(TensorError::InvalidPermutation(perm.to_vec()));
        }
        for &p in perm {
            if p >= rank || seen[p] {
                return Err(TensorError::InvalidPermutation(perm.to_vec()));
            }
            seen[p] = true;
        }
        let extents: Dims = perm.iter().map(|&p| self.extents[p]).collect();
        let strides: Dims = perm.iter().map(|&p| self.strides[p]).collect();
        let element_wise_stride = infer_element_wise_stride(&extents, &strides, self.order);
        Ok(ShapeDescriptor {
            extents,
            strides,
            order: self.order,
            element_wise_stride,
        })
    }

    /// Reverses the axis order.
    ///
    /// The order tag is flipped and the element-wise stride is set to the
    /// non-contiguous marker. This is an approximation: the true traversal
    /// stride of the permuted layout is not recomputed.
    pub fn transposed(&self) -> Self {
        ShapeDescriptor {
            extents: self.extents.iter().rev().copied().collect(),
            strides: self.strides.iter().rev().copied().collect(),
            order: self.order.opposite(),
            element_wise_stride: None,
        }
    }

    /// Encodes the descriptor as
    /// `[rank, extents.., strides.., offset, ews, order]`, with `-1` for a
    /// non-contiguous element-wise stride and 99/102 for `c`/`f`.
    pub fn to_shape_info(&self) -> Vec<i64> {
        let rank = self.rank();
        let mut info = Vec::with_capacity(2 * rank + 4);
        info.push(rank as i64);
        info.extend(self.extents.iter().map(|&e| e as i64));
        info.extend(self.strides.iter().map(|&s| s as i64));
        info.push(0);
        info.push(self.element_wise_stride.map_or(-1, |s| s as i64));
        info.push(self.order.code());
        info
    }

    /// Decodes a descriptor produced by [`ShapeDescriptor::to_shape_info`].
    pub fn from_shape_info(info: &[i64]) -> Result<Self> {
        let rank = match info.first() {
            Some(&r) if r >= 0 => r as usize,
            Some(&r) => return Err(TensorError::InvalidShapeInfo(format!("negative rank {r}"))),
            None => return Err(TensorError::InvalidShapeInfo("empty buffer".to_string())),
        };
        if rank > MAX_RANK {
            return Err(TensorError::InvalidRank {
                rank,
                max: MAX_RANK,
            });
        }
        if info.len() != 2 * rank + 4 {
            return Err(TensorError::InvalidShapeInfo(format!(
                "rank {} needs {} entries, got {}",
                rank,
                2 * rank + 4,
                info.len()
            )));
        }
        let to_usize = |v: i64, what: &str| -> Result<usize> {
            usize::try_from(v)
                .map_err(|_| TensorError::InvalidShapeInfo(format!("negative {what} {v}")))
        };
        let extents = info[1..=rank]
            .iter()
            .map(|&v| to_usize(v, "extent"))
            .collect::<Result<Dims>>()?;
        let strides = info[rank + 1..=2 * rank]
            .iter()
            .map(|&v| to_usize(v, "stride"))
            .collect::<Result<Dims>>()?;
        if info[2 * rank + 1] != 0 {
            return Err(TensorError::InvalidShapeInfo(format!(
                "unsupported base offset {}",
                info[2 * rank + 1]
            )));
        }
        let code = info[2 * rank + 3];
        let order = Order::from_code(code)
            .ok_or_else(|| TensorError::InvalidShapeInfo(format!("unknown order code {code}")))?;
        validate_extents(&extents)?;
        validate_span(&extents, &strides)?;
        // -1 is always accepted as "not contiguous"; any other value must
        // match the layout the strides describe.
        let element_wise_stride = match info[2 * rank + 2] {
            -1 => None,
            v => {
                let stored = to_usize(v, "element-wise stride")?;
                let inferred = infer_element_wise_stride(&extents, &strides, order);
                if inferred != Some(stored) {
                    return Err(TensorError::InvalidShapeInfo(format!(
                        "element-wise stride {stored} does not match strides {:?}",
                        strides.as_slice()
                    )));
                }
                Some(stored)
            }
        };
        Ok(ShapeDescriptor {
            extents,
            strides,
            order,
            element_wise_stride,
        })
    }
}

fn validate_extents(extents: &[usize]) -> Result<()> {
    if extents.len() > MAX_RANK {
        return Err(TensorError::InvalidRank {
            rank: extents.len(),
            max: MAX_RANK,
        });
    }
    if let Some(axis) = extents.iter().position(|&e| e == 0) {
        return Err(TensorError::ZeroExtent { axis });
    }
    // Also bounds every contiguous stride.
    extents
        .iter()
        .try_fold(1usize, |acc, &e| acc.checked_mul(e))
        .ok_or_else(|| TensorError::ShapeOverflow(extents.to_vec()))?;
    Ok(())
}

/// Rejects explicit strides whose highest reachable offset overflows.
fn validate_span(extents: &[usize], strides: &[usize]) -> Result<()> {
    extents
        .iter()
        .zip(strides)
        .try_fold(1usize, |acc, (&e, &s)| {
            (e - 1).checked_mul(s).and_then(|step| acc.checked_add(step))
        })
        .ok_or_else(|| TensorError::ShapeOverflow(extents.to_vec()))?;
    Ok(())
}

impl fmt::Display for ShapeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.to_shape_info().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_shape() {
        let s = ShapeDescriptor::c(&[2, 3, 4]).unwrap();
        assert_eq!(s.rank(), 3);
        assert_eq!(s.length(), 24);
        assert_eq!(s.extents(), &[2, 3, 4]);
        assert_eq!(s.order(), Order::C);
        assert!(s.is_contiguous());
    }

    #[test]
    fn test_strides() {
        assert_eq!(ShapeDescriptor::c(&[2, 3, 4]).unwrap().strides(), &[12, 4, 1]);
        assert_eq!(ShapeDescriptor::f(&[2, 3, 4]).unwrap().strides(), &[1, 2, 6]);
    }

    #[test]
    fn test_empty_shape() {
        let s = ShapeDescriptor::empty();
        assert_eq!(s.rank(), 0);
        assert_eq!(s.length(), 0);
        assert_eq!(s.required_buffer_len(), 0);
        assert_eq!(s.logical_offsets().count(), 0);
    }

    #[test]
    fn test_rank_limit() {
        let dims = vec![1usize; MAX_RANK + 1];
        assert_eq!(
            ShapeDescriptor::c(&dims),
            Err(TensorError::InvalidRank {
                rank: MAX_RANK + 1,
                max: MAX_RANK
            })
        );
        assert!(ShapeDescriptor::c(&dims[..MAX_RANK]).is_ok());
    }

    #[test]
    fn test_zero_extent_rejected() {
        assert_eq!(
            ShapeDescriptor::c(&[3, 0]),
            Err(TensorError::ZeroExtent { axis: 1 })
        );
    }

    #[test]
    fn test_rows_columns_vectors() {
        let m = ShapeDescriptor::c(&[3, 5]).unwrap();
        assert_eq!((m.rows(), m.columns()), (3, 5));
        assert!(!m.is_vector());

        let row = ShapeDescriptor::c(&[1, 4]).unwrap();
        assert!(row.is_vector() && row.is_row_vector() && !row.is_column_vector());

        let col = ShapeDescriptor::c(&[4, 1]).unwrap();
        assert!(col.is_vector() && col.is_column_vector() && !col.is_row_vector());

        let v = ShapeDescriptor::c(&[7]).unwrap();
        assert!(v.is_row_vector());
        assert_eq!((v.rows(), v.columns()), (1, 7));
    }

    #[test]
    fn test_same_shape_ignores_order() {
        let c = ShapeDescriptor::c(&[2, 3]).unwrap();
        let f = ShapeDescriptor::f(&[2, 3]).unwrap();
        assert!(c.is_same_shape(&f));
        assert!(!c.equals_strict(&f));
        assert!(c.equals_strict(&ShapeDescriptor::c(&[2, 3]).unwrap()));
        assert!(!c.is_same_shape(&ShapeDescriptor::c(&[3, 2]).unwrap()));
        assert!(!c.is_same_shape(&ShapeDescriptor::c(&[1, 2, 3]).unwrap()));
    }

    #[test]
    fn test_offset_of() {
        let s = ShapeDescriptor::c(&[2, 3]).unwrap();
        assert_eq!(s.offset_of(&[1, 2]).unwrap(), 5);
        let f = ShapeDescriptor::f(&[2, 3]).unwrap();
        assert_eq!(f.offset_of(&[1, 2]).unwrap(), 5);
        assert_eq!(f.offset_of(&[1, 0]).unwrap(), 1);

        assert_eq!(
            s.offset_of(&[1]),
            Err(TensorError::RankMismatch {
                expected: 2,
                got: 1
            })
        );
        assert_eq!(
            s.offset_of(&[2, 0]),
            Err(TensorError::IndexOutOfRange { index: 2, limit: 2 })
        );
    }

    #[test]
    fn test_logical_offsets_follow_index_order() {
        let c = ShapeDescriptor::c(&[2, 3]).unwrap();
        assert_eq!(c.logical_offsets().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4, 5]);
        let f = ShapeDescriptor::f(&[2, 3]).unwrap();
        assert_eq!(f.logical_offsets().collect::<Vec<_>>(), vec![0, 2, 4, 1, 3, 5]);
        for i in 0..6 {
            assert_eq!(f.offset_of_logical(i), f.logical_offsets().nth(i).unwrap());
        }
    }

    #[test]
    fn test_element_wise_stride_inference() {
        // Column of a 3x4 C-order matrix.
        let col = ShapeDescriptor::with_strides(&[3, 1], &[4, 1], Order::C).unwrap();
        assert_eq!(col.element_wise_stride(), Some(4));

        let contiguous = ShapeDescriptor::with_strides(&[2, 3], &[3, 1], Order::C).unwrap();
        assert!(contiguous.is_contiguous());

        let gapped = ShapeDescriptor::with_strides(&[2, 3], &[4, 1], Order::C).unwrap();
        assert_eq!(gapped.element_wise_stride(), None);
        assert_eq!(gapped.required_buffer_len(), 7);

        assert!(ShapeDescriptor::with_strides(&[2, 3], &[1], Order::C).is_err());
    }

    #[test]
    fn test_transposed() {
        let s = ShapeDescriptor::c(&[2, 5, 10]).unwrap();
        let t = s.transposed();
        assert_eq!(t.extents(), &[10, 5, 2]);
        assert_eq!(t.strides(), &[1, 10, 50]);
        assert_eq!(t.order(), Order::F);
        assert_eq!(t.element_wise_stride(), None);
    }

    #[test]
    fn test_permuted() {
        let s = ShapeDescriptor::c(&[2, 3, 4]).unwrap();
        let p = s.permuted(&[0, 2, 1]).unwrap();
        assert_eq!(p.extents(), &[2, 4, 3]);
        assert_eq!(p.strides(), &[12, 1, 4]);
        assert!(s.permuted(&[0, 0, 1]).is_err());
        assert!(s.permuted(&[0, 1]).is_err());
    }

    #[test]
    fn test_shape_info_encoding() {
        let c = ShapeDescriptor::c(&[2, 2]).unwrap();
        assert_eq!(c.to_shape_info(), vec![2, 2, 2, 2, 1, 0, 1, 99]);
        let f = ShapeDescriptor::f(&[2, 2]).unwrap();
        assert_eq!(f.to_shape_info(), vec![2, 2, 2, 1, 2, 0, 1, 102]);

        let decoded = ShapeDescriptor::from_shape_info(&f.to_shape_info()).unwrap();
        assert_eq!(decoded, f);

        let t = ShapeDescriptor::c(&[2, 5, 10]).unwrap().transposed();
        assert_eq!(
            t.to_shape_info(),
            vec![3, 10, 5, 2, 1, 10, 50, 0, -1, 102]
        );
        assert_eq!(ShapeDescriptor::from_shape_info(&t.to_shape_info()).unwrap(), t);
    }

    #[test]
    fn test_shape_info_rejects_malformed() {
        assert!(ShapeDescriptor::from_shape_info(&[]).is_err());
        assert!(ShapeDescriptor::from_shape_info(&[2, 2, 2, 2, 1, 0, 1]).is_err());
        assert!(ShapeDescriptor::from_shape_info(&[2, 2, 2, 2, 1, 0, 1, 42]).is_err());
        assert!(ShapeDescriptor::from_shape_info(&[2, 2, -2, 2, 1, 0, 1, 99]).is_err());
        assert!(ShapeDescriptor::from_shape_info(&[2, 2, 2, 2, 1, 3, 1, 99]).is_err());
    }

    #[test]
    fn test_shape_info_rejects_inconsistent_element_wise_stride() {
        // Stride 2 over three elements cannot be contiguous.
        assert!(matches!(
            ShapeDescriptor::from_shape_info(&[1, 3, 2, 0, 1, 99]),
            Err(TensorError::InvalidShapeInfo(_))
        ));
        let strided = ShapeDescriptor::from_shape_info(&[1, 3, 2, 0, 2, 99]).unwrap();
        assert_eq!(strided.element_wise_stride(), Some(2));
        assert!(!strided.is_contiguous());
        let marked = ShapeDescriptor::from_shape_info(&[1, 3, 2, 0, -1, 99]).unwrap();
        assert_eq!(marked.element_wise_stride(), None);
        // The non-contiguous marker is accepted even for a dense layout.
        assert!(ShapeDescriptor::from_shape_info(&[2, 2, 2, 2, 1, 0, -1, 99]).is_ok());
    }

    #[test]
    fn test_overflowing_shapes_rejected() {
        let huge = 1usize << 40;
        assert_eq!(
            ShapeDescriptor::c(&[huge, huge]),
            Err(TensorError::ShapeOverflow(vec![huge, huge]))
        );
        assert!(matches!(
            ShapeDescriptor::with_strides(&[3], &[usize::MAX], Order::C),
            Err(TensorError::ShapeOverflow(_))
        ));
        let info = [2, 1 << 40, 1 << 40, 1 << 40, 1, 0, -1, 99];
        assert!(matches!(
            ShapeDescriptor::from_shape_info(&info),
            Err(TensorError::ShapeOverflow(_))
        ));
        assert!(ShapeDescriptor::c(&[1 << 20, 1 << 20]).is_ok());
    }

    #[test]
    fn test_order_tags() {
        assert_eq!(Order::try_from('c').unwrap(), Order::C);
        assert_eq!(Order::try_from('f').unwrap(), Order::F);
        assert_eq!(Order::try_from('x'), Err(TensorError::InvalidOrder('x')));
        assert_eq!(Order::C.opposite(), Order::F);
        assert_eq!(Order::F.to_string(), "f");
    }

    #[test]
    fn test_display() {
        let s = ShapeDescriptor::c(&[2, 2]).unwrap();
        assert_eq!(s.to_string(), "[2, 2, 2, 2, 1, 0, 1, 99]");
    }
}
