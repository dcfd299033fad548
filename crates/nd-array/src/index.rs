//! Logical traversal of strided layouts.
//!
//! Elementwise operations pair operands by logical position (row-major index
//! order), not by physical buffer position, so that tensors with different
//! memory orders hold and exchange the same logical content.

use smallvec::SmallVec;

/// Iterator over the buffer offsets of a strided layout, visiting indices in
/// row-major order (last axis fastest), starting from `base`.
#[derive(Debug, Clone)]
pub struct LogicalOffsets<'s> {
    extents: &'s [usize],
    strides: &'s [usize],
    index: SmallVec<[usize; 8]>,
    offset: usize,
    remaining: usize,
}

impl<'s> LogicalOffsets<'s> {
    /// Traverses `extents`/`strides` from `base`. With no extents the layout
    /// is a single element at `base`.
    pub fn new(extents: &'s [usize], strides: &'s [usize], base: usize) -> Self {
        debug_assert_eq!(extents.len(), strides.len());
        LogicalOffsets {
            extents,
            strides,
            index: SmallVec::from_elem(0, extents.len()),
            offset: base,
            remaining: extents.iter().product(),
        }
    }

    /// An iterator that yields nothing.
    pub fn exhausted() -> Self {
        LogicalOffsets {
            extents: &[],
            strides: &[],
            index: SmallVec::new(),
            offset: 0,
            remaining: 0,
        }
    }
}

impl Iterator for LogicalOffsets<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.offset;
        self.remaining -= 1;
        if self.remaining > 0 {
            for d in (0..self.extents.len()).rev() {
                self.index[d] += 1;
                self.offset += self.strides[d];
                if self.index[d] < self.extents[d] {
                    break;
                }
                self.offset -= self.strides[d] * self.extents[d];
                self.index[d] = 0;
            }
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for LogicalOffsets<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_walk() {
        let offsets: Vec<usize> = LogicalOffsets::new(&[2, 3], &[3, 1], 0).collect();
        assert_eq!(offsets, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_strided_walk_with_base() {
        // Second column of a 3x4 row-major matrix.
        let offsets: Vec<usize> = LogicalOffsets::new(&[3], &[4], 1).collect();
        assert_eq!(offsets, vec![1, 5, 9]);
    }

    #[test]
    fn test_column_major_walk() {
        let offsets: Vec<usize> = LogicalOffsets::new(&[2, 2, 2], &[1, 2, 4], 0).collect();
        assert_eq!(offsets, vec![0, 4, 2, 6, 1, 5, 3, 7]);
    }

    #[test]
    fn test_scalar_and_exhausted() {
        assert_eq!(LogicalOffsets::new(&[], &[], 7).collect::<Vec<_>>(), vec![7]);
        assert_eq!(LogicalOffsets::exhausted().count(), 0);
    }

    #[test]
    fn test_exact_size() {
        let it = LogicalOffsets::new(&[4, 5], &[5, 1], 0);
        assert_eq!(it.len(), 20);
    }
}
