//! `RefList`: a growable sequence with in-place element handles.

use core::{
    fmt,
    hash::{Hash, Hasher},
    mem::ManuallyDrop,
    ops::{Index, IndexMut},
    ptr, slice,
};

use crate::{
    error::{Error, InsertError},
    iter::IntoIter,
    raw::RawBuf,
};

/// A growable, random-access sequence handing out `&mut T` into its buffer.
///
/// Elements live in a single contiguous buffer. Capacity starts at
/// [`INITIAL_CAPACITY`](crate::INITIAL_CAPACITY) on the first insertion,
/// doubles whenever it runs out, and never shrinks.
///
/// Indexing returns a handle to the stored element, so writes through it
/// mutate the list in place:
///
/// ```
/// use selene_collections::RefList;
///
/// let mut list = RefList::new();
/// list.add(String::from("a"));
/// list[0].push('b');
/// assert_eq!(list[0], "ab");
/// ```
///
/// A handle borrows the list, so it cannot survive a structural mutation
/// that might move the buffer:
///
/// ```compile_fail
/// use selene_collections::RefList;
///
/// let mut list = RefList::new();
/// list.add(1);
/// let handle = &mut list[0];
/// list.add(2);
/// *handle = 3;
/// ```
///
/// The same goes for mutating while iterating:
///
/// ```compile_fail
/// use selene_collections::RefList;
///
/// let mut list = RefList::new();
/// list.add(1);
/// for item in &list {
///     list.add(*item);
/// }
/// ```
pub struct RefList<T> {
    buf: RawBuf<T>,
    len: usize,
}

/// Direction of a [`RefList::reorder`] step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shift {
    /// Open a one-slot gap at the index, growing if needed.
    Open,
    /// Close the one-slot gap at the index.
    Close,
}

impl<T> RefList<T> {
    /// Creates an empty list. Does not allocate.
    pub const fn new() -> Self {
        Self {
            buf: RawBuf::new(),
            len: 0,
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots in the backing buffer.
    ///
    /// Zero-sized element types report `usize::MAX`.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.buf.cap()
    }

    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots `[0, len)` are initialized and the pointer is non-null and aligned.
        unsafe { slice::from_raw_parts(self.buf.ptr(), self.len) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as in `as_slice`, and `&mut self` guarantees exclusive access.
        unsafe { slice::from_raw_parts_mut(self.buf.ptr(), self.len) }
    }

    pub fn get(&self, index: usize) -> Result<&T, Error> {
        let len = self.len;
        self.as_slice()
            .get(index)
            .ok_or(Error::OutOfBounds { index, len })
    }

    /// Returns a handle to the element at `index`.
    ///
    /// Writes through the handle land directly in the list's buffer.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, Error> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(Error::OutOfBounds { index, len })
    }

    pub fn first(&self) -> Option<&T> {
        self.as_slice().first()
    }

    pub fn first_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    pub fn last(&self) -> Option<&T> {
        self.as_slice().last()
    }

    pub fn last_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Appends `item` to the end of the list.
    pub fn add(&mut self, item: T) {
        if self.len == self.buf.cap() {
            self.reserve_one();
        }
        // SAFETY: `len < cap` after the check above, so the slot is in bounds and unused.
        unsafe { ptr::write(self.buf.ptr().add(self.len), item) };
        self.len += 1;
    }

    #[cold]
    fn reserve_one(&mut self) {
        let min = self.len.checked_add(1).expect("capacity overflow");
        // SAFETY: slots `[0, len)` are initialized and `len <= cap`.
        unsafe { self.buf.ensure(self.len, min) };
    }

    /// Inserts `item` at `index`, shifting everything after it to the right.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    #[track_caller]
    pub fn insert(&mut self, index: usize, item: T) {
        if let Err(err) = self.try_insert(index, item) {
            panic!("{}", err.error);
        }
    }

    /// Like [`insert`](Self::insert), but hands the item back instead of panicking.
    pub fn try_insert(&mut self, index: usize, item: T) -> Result<(), InsertError<T>> {
        let len = self.len;
        if index > len {
            return Err(InsertError {
                item,
                error: Error::InsertOutOfBounds { index, len },
            });
        }
        // SAFETY: `index <= len`; `reorder` leaves an unused slot at `index`.
        unsafe {
            self.reorder(index, Shift::Open);
            ptr::write(self.buf.ptr().add(index), item);
        }
        self.len = len + 1;
        Ok(())
    }

    /// Removes and returns the element at `index`, shifting the tail left.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[track_caller]
    pub fn remove_at(&mut self, index: usize) -> T {
        match self.try_remove_at(index) {
            Ok(item) => item,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_remove_at(&mut self, index: usize) -> Result<T, Error> {
        let len = self.len;
        if index >= len {
            return Err(Error::OutOfBounds { index, len });
        }
        // SAFETY: `index < len`, so the slot is initialized. It is read out
        // before `reorder` overwrites it.
        let item = unsafe {
            let item = ptr::read(self.buf.ptr().add(index));
            self.reorder(index, Shift::Close);
            item
        };
        self.len = len - 1;
        Ok(item)
    }

    /// Removes the first element equal to `item`.
    ///
    /// Returns `false`, leaving the list untouched, when there is none.
    pub fn remove(&mut self, item: &T) -> bool
    where
        T: PartialEq,
    {
        match self.index_of(item) {
            Some(index) => {
                drop(self.remove_at(index));
                true
            }
            None => false,
        }
    }

    /// Drops every element right away. Capacity is kept.
    pub fn clear(&mut self) {
        let len = self.len;
        // Zero the length first: a panicking destructor then leaks the rest
        // instead of dropping them twice.
        self.len = 0;
        // SAFETY: slots `[0, len)` were initialized and are no longer reachable.
        unsafe { ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.buf.ptr(), len)) };
        tracing::trace!(released = len, "cleared list");
    }

    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.index_of(item).is_some()
    }

    /// Position of the first element equal to `item`.
    pub fn index_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|candidate| candidate == item)
    }

    /// Clones every element, in order, into `dest[offset..offset + len]`.
    ///
    /// # Panics
    ///
    /// Panics if `dest` is shorter than `offset + len`.
    #[track_caller]
    pub fn copy_to(&self, dest: &mut [T], offset: usize)
    where
        T: Clone,
    {
        if let Err(err) = self.try_copy_to(dest, offset) {
            panic!("{err}");
        }
    }

    pub fn try_copy_to(&self, dest: &mut [T], offset: usize) -> Result<(), Error>
    where
        T: Clone,
    {
        let len = self.len;
        let available = dest.len();
        let target = offset
            .checked_add(len)
            .and_then(|end| dest.get_mut(offset..end))
            .ok_or(Error::DestinationTooSmall {
                offset,
                len,
                available,
            })?;
        target.clone_from_slice(self.as_slice());
        Ok(())
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Opens or closes a one-slot gap at `index`, leaving `len` untouched.
    ///
    /// Opening grows the buffer when it is full. The prefix and suffix are
    /// then copied straight into their final slots of the new buffer.
    /// Otherwise the tail is moved in place with an overlap-safe copy.
    ///
    /// # Safety
    ///
    /// For [`Shift::Open`], `index <= len`; afterwards slot `index` is unused
    /// and must be written before `len` is bumped. For [`Shift::Close`],
    /// `index < len` and the element at `index` must already have been moved out.
    unsafe fn reorder(&mut self, index: usize, shift: Shift) {
        let len = self.len;
        match shift {
            Shift::Open => {
                let min = len.checked_add(1).expect("capacity overflow");
                if self.buf.cap() < min {
                    let new_cap = self.buf.grown_capacity(min);
                    let new_ptr = RawBuf::<T>::allocate(new_cap);
                    let src = self.buf.ptr();
                    let dst = new_ptr.as_ptr();
                    // SAFETY: distinct allocations; the new one holds `len + 1` slots.
                    unsafe {
                        ptr::copy_nonoverlapping(src, dst, index);
                        ptr::copy_nonoverlapping(src.add(index), dst.add(index + 1), len - index);
                        self.buf.replace(new_ptr, new_cap);
                    }
                } else {
                    // SAFETY: `len + 1 <= cap`, so the shifted tail stays in bounds.
                    unsafe {
                        let at = self.buf.ptr().add(index);
                        ptr::copy(at, at.add(1), len - index);
                    }
                }
            }
            Shift::Close => {
                // SAFETY: `index < len`, and the moved tail ends at `len - 1`.
                unsafe {
                    let at = self.buf.ptr().add(index);
                    ptr::copy(at.add(1), at, len - index - 1);
                }
            }
        }
    }
}

impl<T> Drop for RefList<T> {
    fn drop(&mut self) {
        // SAFETY: slots `[0, len)` are initialized; `RawBuf` frees the memory afterwards.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.buf.ptr(), self.len));
        }
    }
}

impl<T> Default for RefList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for RefList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for RefList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for RefList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for RefList<T> {}

impl<T: Hash> Hash for RefList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T> Index<usize> for RefList<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(item) => item,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> IndexMut<usize> for RefList<T> {
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.get_mut(index) {
            Ok(item) => item,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> Extend<T> for RefList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<T> FromIterator<T> for RefList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<'a, T> IntoIterator for &'a RefList<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut RefList<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> IntoIterator for RefList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let list = ManuallyDrop::new(self);
        // SAFETY: `list` is never dropped, so ownership of the buffer and of
        // its `len` live elements moves into the iterator exactly once.
        let buf = unsafe { ptr::read(&list.buf) };
        IntoIter::new(buf, list.len)
    }
}
