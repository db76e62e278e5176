//! Owned, uninitialized element storage with doubling growth.
//!
//! `RawBuf` knows nothing about which slots are initialized; that is tracked
//! by the owning [`RefList`](crate::RefList). It only allocates, grows and
//! frees the backing buffer.

use alloc::alloc::{Layout, alloc, dealloc, handle_alloc_error};
use core::{marker::PhantomData, mem, ptr::NonNull};

/// Capacity of the first allocation.
pub const INITIAL_CAPACITY: usize = 8;

pub(crate) struct RawBuf<T> {
    ptr: NonNull<T>,
    cap: usize,
    _owns: PhantomData<T>,
}

impl<T> RawBuf<T> {
    const IS_ZST: bool = mem::size_of::<T>() == 0;

    pub(crate) const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: if Self::IS_ZST { usize::MAX } else { 0 },
            _owns: PhantomData,
        }
    }

    #[inline(always)]
    pub(crate) fn ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    #[inline(always)]
    pub(crate) fn cap(&self) -> usize {
        self.cap
    }

    /// Capacity after growing to hold at least `min` elements.
    ///
    /// Starts at [`INITIAL_CAPACITY`] and doubles from there.
    pub(crate) fn grown_capacity(&self, min: usize) -> usize {
        let mut new_cap = if self.cap == 0 { INITIAL_CAPACITY } else { self.cap };
        while new_cap < min {
            new_cap = new_cap.checked_mul(2).expect("capacity overflow");
        }
        new_cap
    }

    /// Allocates a fresh buffer for `cap` elements.
    ///
    /// The buffer is returned detached: the caller moves elements into it and
    /// then hands it to [`RawBuf::replace`].
    pub(crate) fn allocate(cap: usize) -> NonNull<T> {
        if Self::IS_ZST || cap == 0 {
            return NonNull::dangling();
        }
        let layout = Self::layout(cap);
        // SAFETY: `layout` has non-zero size since `T` is not zero-sized and `cap > 0`.
        let ptr = unsafe { alloc(layout) }.cast::<T>();
        match NonNull::new(ptr) {
            Some(ptr) => ptr,
            None => handle_alloc_error(layout),
        }
    }

    /// Swaps in a buffer obtained from [`RawBuf::allocate`] and frees the old one.
    ///
    /// # Safety
    ///
    /// `new_ptr` must come from `allocate(new_cap)`, and every live element of
    /// the old buffer must already have been moved out of it.
    pub(crate) unsafe fn replace(&mut self, new_ptr: NonNull<T>, new_cap: usize) {
        tracing::trace!(old_capacity = self.cap, new_capacity = new_cap, "growing buffer");
        // SAFETY: the old buffer holds no live elements per the caller's contract.
        unsafe { self.free() };
        self.ptr = new_ptr;
        self.cap = new_cap;
    }

    /// Grows so that at least `min` elements fit, keeping the first `len`.
    ///
    /// No-op when the current capacity already suffices.
    ///
    /// # Safety
    ///
    /// Slots `[0, len)` must be initialized and `len <= self.cap()`.
    pub(crate) unsafe fn ensure(&mut self, len: usize, min: usize) {
        if self.cap >= min {
            return;
        }
        let new_cap = self.grown_capacity(min);
        let new_ptr = Self::allocate(new_cap);
        // SAFETY: both buffers hold at least `len` slots and are distinct allocations.
        unsafe {
            core::ptr::copy_nonoverlapping(self.ptr(), new_ptr.as_ptr(), len);
            self.replace(new_ptr, new_cap);
        }
    }

    fn layout(cap: usize) -> Layout {
        Layout::array::<T>(cap).expect("capacity overflow")
    }

    /// # Safety
    ///
    /// Must not be called twice on the same allocation.
    unsafe fn free(&mut self) {
        if Self::IS_ZST || self.cap == 0 {
            return;
        }
        // SAFETY: `ptr` was allocated with this exact layout in `allocate`.
        unsafe { dealloc(self.ptr().cast(), Self::layout(self.cap)) };
    }
}

// SAFETY: `RawBuf` uniquely owns its allocation, like `Box<[T]>`.
unsafe impl<T: Send> Send for RawBuf<T> {}
unsafe impl<T: Sync> Sync for RawBuf<T> {}

impl<T> Drop for RawBuf<T> {
    fn drop(&mut self) {
        // SAFETY: the owner has dropped all live elements before this runs.
        unsafe { self.free() };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_does_not_allocate() {
        let buf = RawBuf::<u64>::new();
        assert_eq!(buf.cap(), 0);
    }

    #[test]
    fn test_grown_capacity_doubles() {
        let mut buf = RawBuf::<u64>::new();
        assert_eq!(buf.grown_capacity(1), INITIAL_CAPACITY);
        assert_eq!(buf.grown_capacity(9), 16);
        assert_eq!(buf.grown_capacity(33), 64);

        unsafe { buf.ensure(0, 1) };
        assert_eq!(buf.cap(), 8);
        unsafe { buf.ensure(0, 9) };
        assert_eq!(buf.cap(), 16);
        // Already large enough.
        unsafe { buf.ensure(0, 12) };
        assert_eq!(buf.cap(), 16);
    }

    #[test]
    fn test_zst_never_allocates() {
        let mut buf = RawBuf::<()>::new();
        assert_eq!(buf.cap(), usize::MAX);
        unsafe { buf.ensure(0, 1_000) };
        assert_eq!(buf.cap(), usize::MAX);
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn test_capacity_overflow() {
        let buf = RawBuf::<u64>::new();
        buf.grown_capacity(usize::MAX);
    }
}
