use crate::element::Element;

/// Backing buffer of a tensor.
///
/// The variant records ownership: an owned buffer is released exactly once,
/// when the storage is dropped; a borrowed buffer belongs to the caller and
/// is never released or reallocated here.
#[derive(Debug)]
pub enum Storage<'a, T> {
    /// No buffer attached.
    Empty,
    /// Buffer allocated by the tensor itself.
    Owned(Vec<T>),
    /// Caller-supplied memory.
    Borrowed(&'a mut [T]),
}

impl<'a, T: Element> Storage<'a, T> {
    /// Create zero-filled owned storage with `n` elements.
    pub fn zeros(n: usize) -> Self {
        Storage::Owned(vec![T::zero(); n])
    }

    /// Take ownership of an existing vector.
    pub fn from_vec(data: Vec<T>) -> Self {
        Storage::Owned(data)
    }

    /// Wrap caller memory without taking ownership.
    pub fn borrowed(data: &'a mut [T]) -> Self {
        Storage::Borrowed(data)
    }

    /// Number of elements in the buffer.
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns true if no buffer is attached or the buffer has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if this storage must release its buffer.
    pub fn is_owned(&self) -> bool {
        matches!(self, Storage::Owned(_))
    }

    pub fn as_slice(&self) -> &[T] {
        match self {
            Storage::Empty => &[],
            Storage::Owned(v) => v.as_slice(),
            Storage::Borrowed(s) => s,
        }
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        match self {
            Storage::Empty => &mut [],
            Storage::Owned(v) => v.as_mut_slice(),
            Storage::Borrowed(s) => s,
        }
    }

    /// Copies the buffer into new owned storage, leaving `self` untouched.
    pub fn to_owned_storage(&self) -> Storage<'static, T> {
        match self {
            Storage::Empty => Storage::Empty,
            _ => Storage::Owned(self.as_slice().to_vec()),
        }
    }

    /// Hands back the owned buffer, if any. Borrowed memory is simply
    /// forgotten since it was never ours.
    pub fn into_owned_vec(self) -> Option<Vec<T>> {
        match self {
            Storage::Owned(v) => Some(v),
            Storage::Empty | Storage::Borrowed(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vec() {
        let s = Storage::from_vec(vec![1.0f32, 2.0, 3.0]);
        assert_eq!(s.len(), 3);
        assert!(!s.is_empty());
        assert!(s.is_owned());
        assert_eq!(s.as_slice(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_zeros() {
        let s = Storage::<f64>::zeros(5);
        assert_eq!(s.as_slice(), &[0.0; 5]);
    }

    #[test]
    fn test_empty() {
        let s = Storage::<f32>::Empty;
        assert!(s.is_empty());
        assert!(!s.is_owned());
        assert!(s.into_owned_vec().is_none());
    }

    #[test]
    fn test_borrowed_writes_reach_caller() {
        let mut data = vec![1.0f32, 2.0];
        {
            let mut s = Storage::borrowed(&mut data);
            assert!(!s.is_owned());
            s.as_mut_slice()[0] = 42.0;
            assert!(s.into_owned_vec().is_none());
        }
        assert_eq!(data, vec![42.0, 2.0]);
    }

    #[test]
    fn test_to_owned_storage_detaches() {
        let mut data = vec![1.0f32, 2.0];
        let s = Storage::borrowed(&mut data);
        let mut copy = s.to_owned_storage();
        copy.as_mut_slice()[1] = 9.0;
        assert!(copy.is_owned());
        assert_eq!(s.as_slice(), &[1.0, 2.0]);
    }
}
