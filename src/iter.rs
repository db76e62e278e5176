use core::{fmt, iter::FusedIterator, ptr, slice};

use crate::raw::RawBuf;

/// Owning iterator over the elements of a [`RefList`](crate::RefList).
///
/// Elements not yet yielded are dropped with the iterator.
pub struct IntoIter<T> {
    buf: RawBuf<T>,
    start: usize,
    end: usize,
}

impl<T> IntoIter<T> {
    /// Takes over a buffer whose slots `[0, len)` are initialized.
    pub(crate) fn new(buf: RawBuf<T>, len: usize) -> Self {
        Self { buf, start: 0, end: len }
    }

    /// The elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots `[start, end)` are initialized and not yet moved out.
        unsafe { slice::from_raw_parts(self.buf.ptr().add(self.start), self.end - self.start) }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: `start < end`, so the slot is initialized; bumping `start`
        // hands ownership to the caller.
        let item = unsafe { ptr::read(self.buf.ptr().add(self.start)) };
        self.start += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.start;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        // SAFETY: the slot at the old `end - 1` is initialized and now outside the live range.
        Some(unsafe { ptr::read(self.buf.ptr().add(self.end)) })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let remaining = self.end - self.start;
        // SAFETY: slots `[start, end)` are still owned by the iterator.
        unsafe {
            let head = self.buf.ptr().add(self.start);
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(head, remaining));
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::String, vec::Vec};

    use crate::RefList;

    #[test]
    fn test_into_iter_both_ends() {
        let list: RefList<u8> = (1..=5).collect();
        let mut iter = list.into_iter();
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.next_back(), Some(5));
        assert_eq!(iter.as_slice(), &[2, 3, 4]);
        assert_eq!(iter.collect::<Vec<_>>(), [2, 3, 4]);
    }

    #[test]
    fn test_into_iter_empty() {
        let mut iter = RefList::<String>::new().into_iter();
        assert_eq!(iter.len(), 0);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn test_into_iter_moves_owned_values() {
        let mut list = RefList::new();
        list.add(String::from("left"));
        list.add(String::from("right"));
        let joined: String = list.into_iter().collect();
        assert_eq!(joined, "leftright");
    }
}
