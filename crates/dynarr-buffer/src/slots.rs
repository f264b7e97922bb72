//! Length tracking and the grow/shrink policy over a [`RawBuffer`].
//!
//! Both public array types are thin wrappers around [`SlotVec`]; this is
//! the only place the policy is applied.

#![allow(unsafe_code)]

use std::alloc::Layout;

use dynarr_core::{ArrayConfig, ArrayError, BufferAllocator, CapacityPolicy};

use crate::raw::RawBuffer;

pub(crate) struct SlotVec<A: BufferAllocator> {
    buf: RawBuffer<A>,
    len: usize,
    policy: CapacityPolicy,
}

impl<A: BufferAllocator> SlotVec<A> {
    pub(crate) fn with_config_in(
        element: Layout,
        config: &ArrayConfig,
        alloc: A,
    ) -> Result<Self, ArrayError> {
        let policy = CapacityPolicy::new(config)?;
        let buf = RawBuffer::with_capacity_in(element, policy.initial_capacity(), alloc)?;
        Ok(Self {
            buf,
            len: 0,
            policy,
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    pub(crate) fn element_width(&self) -> usize {
        self.buf.element_width()
    }

    pub(crate) fn memory_bytes(&self) -> usize {
        self.buf.memory_bytes()
    }

    pub(crate) fn allocator(&self) -> &A {
        self.buf.allocator()
    }

    fn out_of_bounds(&self, index: usize) -> ArrayError {
        ArrayError::OutOfBounds {
            index,
            len: self.len,
        }
    }

    /// Copy element `index` into `dst`.
    ///
    /// # Safety
    ///
    /// `dst` must be valid for `element_width()` byte writes and must not
    /// alias this array's storage.
    pub(crate) unsafe fn read(&self, index: usize, dst: *mut u8) -> Result<(), ArrayError> {
        if index >= self.len {
            return Err(self.out_of_bounds(index));
        }
        // SAFETY: index < len, so the slot has been written; dst is the
        // caller's contract.
        if unsafe { self.buf.copy_out(index, dst) } {
            Ok(())
        } else {
            Err(self.out_of_bounds(index))
        }
    }

    /// Overwrite element `index` with the bytes at `src`.
    ///
    /// # Safety
    ///
    /// `src` must be valid for `element_width()` byte reads. It may alias
    /// this array's storage.
    pub(crate) unsafe fn write(&mut self, index: usize, src: *const u8) -> Result<(), ArrayError> {
        if index >= self.len {
            return Err(self.out_of_bounds(index));
        }
        // SAFETY: src is the caller's contract; copy_in tolerates overlap.
        if unsafe { self.buf.copy_in(index, src) } {
            Ok(())
        } else {
            Err(self.out_of_bounds(index))
        }
    }

    /// Append the bytes at `src` as the new last element, doubling the
    /// capacity first if the buffer is full.
    ///
    /// # Safety
    ///
    /// `src` must be valid for `element_width()` byte reads and must not
    /// alias this array's storage (growth may move it).
    pub(crate) unsafe fn append(&mut self, src: *const u8) -> Result<(), ArrayError> {
        let cap = self.buf.capacity();
        if self.policy.needs_growth(self.len, cap) {
            let new_cap = self.growth_target(cap)?;
            if let Err(e) = self.buf.resize(new_cap) {
                tracing::debug!(len = self.len, from = cap, to = new_cap, error = %e, "grow failed");
                return Err(e);
            }
            tracing::trace!(len = self.len, from = cap, to = new_cap, "grew buffer");
        }
        // SAFETY: len < capacity after the growth step; src is the caller's
        // contract.
        let written = unsafe { self.buf.copy_in(self.len, src) };
        debug_assert!(written, "slot {} not backed after growth", self.len);
        self.len += 1;
        Ok(())
    }

    /// Capacity one growth step above `cap`. On overflow the error names
    /// the element count the append needed.
    fn growth_target(&self, cap: usize) -> Result<usize, ArrayError> {
        self.policy
            .grown(cap)
            .ok_or(ArrayError::CapacityOverflow {
                requested_elements: cap.saturating_add(1),
                element_width: self.buf.element_width(),
            })
    }

    /// Remove the last element, shrinking first if occupancy has fallen to
    /// a quarter of capacity. If `dst` is `Some`, the removed element is
    /// copied there.
    ///
    /// # Safety
    ///
    /// If `dst` is `Some`, it must be valid for `element_width()` byte
    /// writes and must not alias this array's storage.
    pub(crate) unsafe fn pop(&mut self, dst: Option<*mut u8>) -> Result<(), ArrayError> {
        if self.len == 0 {
            return Err(ArrayError::Empty);
        }
        let cap = self.buf.capacity();
        if let Some(new_cap) = self.policy.shrink_target(self.len, cap) {
            if let Err(e) = self.buf.resize(new_cap) {
                tracing::debug!(len = self.len, from = cap, to = new_cap, error = %e, "shrink failed");
                return Err(e);
            }
            tracing::trace!(len = self.len, from = cap, to = new_cap, "shrank buffer");
        }
        let last = self.len - 1;
        if let Some(dst) = dst {
            // SAFETY: last < len <= capacity (the shrink target never drops
            // below len), so the slot is written; dst is the caller's contract.
            unsafe { self.buf.copy_out(last, dst) };
        }
        self.len = last;
        Ok(())
    }
}
