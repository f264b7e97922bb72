//! The allocation seam under every buffer.
//!
//! [`BufferAllocator`] reports failure as `None` instead of aborting via
//! `handle_alloc_error`, which is what lets growth and shrink failures be
//! returned to the caller as [`ArrayError::AllocationFailed`] with the
//! array intact.
//!
//! [`ArrayError::AllocationFailed`]: crate::ArrayError::AllocationFailed

#![allow(unsafe_code)]

use std::alloc::Layout;
use std::ptr::NonNull;

/// A source of raw memory blocks for a buffer.
///
/// # Safety
///
/// Implementors must behave like the global allocator:
///
/// - a pointer returned from `allocate_zeroed` or `reallocate` is valid for
///   reads and writes of the requested size, aligned to the requested
///   alignment, and zero-filled in the `allocate_zeroed` case;
/// - `reallocate` returning `None` leaves the original block valid and
///   unchanged;
/// - `reallocate` returning `Some` preserves the first
///   `min(old.size(), new_size)` bytes and invalidates the old pointer.
pub unsafe trait BufferAllocator {
    /// Allocate a zero-filled block. Returns `None` on failure or when
    /// `layout.size()` is zero.
    fn allocate_zeroed(&self, layout: Layout) -> Option<NonNull<u8>>;

    /// Resize a block to `new_size` bytes, keeping `old.align()`.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by this allocator for `old`, and
    /// `new_size` must be non-zero and form a valid [`Layout`] with
    /// `old.align()`.
    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old: Layout,
        new_size: usize,
    ) -> Option<NonNull<u8>>;

    /// Return a block to the allocator.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by this allocator for `layout` and not
    /// yet deallocated.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}

/// The process-wide allocator (`std::alloc`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Global;

// SAFETY: forwards to std::alloc, which upholds the trait contract.
unsafe impl BufferAllocator for Global {
    fn allocate_zeroed(&self, layout: Layout) -> Option<NonNull<u8>> {
        if layout.size() == 0 {
            return None;
        }
        // SAFETY: layout has non-zero size.
        NonNull::new(unsafe { std::alloc::alloc_zeroed(layout) })
    }

    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old: Layout,
        new_size: usize,
    ) -> Option<NonNull<u8>> {
        // SAFETY: caller guarantees ptr/old came from this allocator and
        // new_size is a valid non-zero size for old.align().
        NonNull::new(unsafe { std::alloc::realloc(ptr.as_ptr(), old, new_size) })
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: caller guarantees ptr/layout came from this allocator.
        unsafe { std::alloc::dealloc(ptr.as_ptr(), layout) }
    }
}
