//! One owned allocation, sized in element slots.
//!
//! [`RawBuffer`] knows its element layout and capacity but not which slots
//! hold meaningful data; that is the slot layer's job. It never exposes
//! its pointer outside this crate.

#![allow(unsafe_code)]

use std::alloc::Layout;
use std::ptr::{self, NonNull};

use dynarr_core::{ArrayError, BufferAllocator};

/// Layout of `count` contiguous elements of `element`.
///
/// `element.size()` is a multiple of `element.align()` for every layout this
/// crate builds, so slot `i` starts at an aligned offset `i * size`.
fn array_layout(element: Layout, count: usize) -> Result<Layout, ArrayError> {
    let overflow = || ArrayError::CapacityOverflow {
        requested_elements: count,
        element_width: element.size(),
    };
    let size = element.size().checked_mul(count).ok_or_else(overflow)?;
    Layout::from_size_align(size, element.align()).map_err(|_| overflow())
}

/// An owned, resizable block of `capacity` element slots.
pub(crate) struct RawBuffer<A: BufferAllocator> {
    /// `None` when capacity is zero: no backing storage is held.
    ptr: Option<NonNull<u8>>,
    capacity: usize,
    element: Layout,
    alloc: A,
}

// SAFETY: RawBuffer exclusively owns its block; moving it to another thread
// moves the block with it. Element types are tracked by the owning wrapper.
unsafe impl<A: BufferAllocator + Send> Send for RawBuffer<A> {}
// SAFETY: &RawBuffer only permits reads of the owned block.
unsafe impl<A: BufferAllocator + Sync> Sync for RawBuffer<A> {}

impl<A: BufferAllocator> RawBuffer<A> {
    /// Allocate `capacity` zeroed slots of `element`.
    ///
    /// On failure nothing is allocated and the allocator is dropped.
    pub(crate) fn with_capacity_in(
        element: Layout,
        capacity: usize,
        alloc: A,
    ) -> Result<Self, ArrayError> {
        if element.size() == 0 {
            return Err(ArrayError::ZeroWidth);
        }
        let layout = array_layout(element, capacity)?;
        let ptr = if capacity == 0 {
            None
        } else {
            let p = alloc
                .allocate_zeroed(layout)
                .ok_or(ArrayError::AllocationFailed {
                    requested_bytes: layout.size(),
                })?;
            Some(p)
        };
        Ok(Self {
            ptr,
            capacity,
            element,
            alloc,
        })
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    pub(crate) fn element_width(&self) -> usize {
        self.element.size()
    }

    /// Bytes currently held by the block.
    pub(crate) fn memory_bytes(&self) -> usize {
        if self.ptr.is_some() {
            self.capacity * self.element.size()
        } else {
            0
        }
    }

    pub(crate) fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Move the block to `new_capacity` slots.
    ///
    /// On error the previous block, its contents and `capacity()` are
    /// untouched. Slots gained by growth are uninitialised.
    pub(crate) fn resize(&mut self, new_capacity: usize) -> Result<(), ArrayError> {
        if new_capacity == self.capacity {
            return Ok(());
        }
        let new_layout = array_layout(self.element, new_capacity)?;
        let old_layout = array_layout(self.element, self.capacity)?;

        let new_ptr = match self.ptr {
            None => self.alloc.allocate_zeroed(new_layout),
            Some(old) if new_capacity == 0 => {
                // SAFETY: `old` was allocated by `self.alloc` with `old_layout`.
                unsafe { self.alloc.deallocate(old, old_layout) };
                self.ptr = None;
                self.capacity = 0;
                return Ok(());
            }
            // SAFETY: `old` was allocated by `self.alloc` with `old_layout`;
            // `new_layout` validated the new size against the same alignment
            // and it is non-zero.
            Some(old) => unsafe {
                self.alloc
                    .reallocate(old, old_layout, new_layout.size())
            },
        };

        match new_ptr {
            Some(p) => {
                self.ptr = Some(p);
                self.capacity = new_capacity;
                Ok(())
            }
            None => Err(ArrayError::AllocationFailed {
                requested_bytes: new_layout.size(),
            }),
        }
    }

    /// Pointer to the first byte of slot `index`, or `None` if the slot is
    /// not backed by storage.
    fn slot(&self, index: usize) -> Option<NonNull<u8>> {
        if index >= self.capacity {
            return None;
        }
        let base = self.ptr?;
        // SAFETY: index < capacity, so the offset stays inside the block.
        Some(unsafe { base.add(index * self.element.size()) })
    }

    /// Copy one element out of slot `index` into `dst`.
    ///
    /// Returns `false` (and copies nothing) if the slot is not backed.
    ///
    /// # Safety
    ///
    /// `dst` must be valid for `element_width()` byte writes and must not
    /// point into this buffer. Slot `index` must have been written.
    pub(crate) unsafe fn copy_out(&self, index: usize, dst: *mut u8) -> bool {
        let Some(src) = self.slot(index) else {
            return false;
        };
        // SAFETY: src is in bounds; dst validity and disjointness are the
        // caller's contract.
        unsafe { ptr::copy_nonoverlapping(src.as_ptr(), dst, self.element.size()) };
        true
    }

    /// Copy one element from `src` into slot `index`.
    ///
    /// `src` may overlap the buffer itself. Returns `false` (and copies
    /// nothing) if the slot is not backed.
    ///
    /// # Safety
    ///
    /// `src` must be valid for `element_width()` byte reads.
    pub(crate) unsafe fn copy_in(&mut self, index: usize, src: *const u8) -> bool {
        let Some(dst) = self.slot(index) else {
            return false;
        };
        // SAFETY: dst is in bounds and uniquely borrowed via &mut self;
        // ptr::copy tolerates overlap with src.
        unsafe { ptr::copy(src, dst.as_ptr(), self.element.size()) };
        true
    }
}

impl<A: BufferAllocator> Drop for RawBuffer<A> {
    fn drop(&mut self) {
        let Some(ptr) = self.ptr.take() else {
            return;
        };
        if let Ok(layout) = array_layout(self.element, self.capacity) {
            // SAFETY: ptr was allocated by self.alloc with this layout (the
            // same computation succeeded when the block was sized).
            unsafe { self.alloc.deallocate(ptr, layout) };
        }
    }
}
