//! The byte-width dynamic array.
//!
//! [`ByteArray`] is for callers that only know the element size at run
//! time, such as the C ABI in `dynarr-ffi`. Elements are opaque runs of
//! `element_width` bytes; every slice passed in or out must be exactly
//! that long.

#![allow(unsafe_code)]

use std::alloc::Layout;
use std::fmt;

use dynarr_core::{ArrayConfig, ArrayError, BufferAllocator, Global};

use crate::slots::SlotVec;

/// A resizable array of fixed-width byte elements.
pub struct ByteArray<A: BufferAllocator = Global> {
    slots: SlotVec<A>,
}

impl ByteArray {
    /// Create an empty array of `element_width`-byte elements with the
    /// default initial capacity (2), zero-filled.
    pub fn new(element_width: usize) -> Result<Self, ArrayError> {
        Self::with_config_in(element_width, &ArrayConfig::default(), Global)
    }

    /// Create an empty array with an explicit configuration.
    pub fn with_config(element_width: usize, config: &ArrayConfig) -> Result<Self, ArrayError> {
        Self::with_config_in(element_width, config, Global)
    }
}

impl<A: BufferAllocator> ByteArray<A> {
    /// Create an empty array backed by `alloc`.
    pub fn new_in(element_width: usize, alloc: A) -> Result<Self, ArrayError> {
        Self::with_config_in(element_width, &ArrayConfig::default(), alloc)
    }

    /// Create an empty array backed by `alloc` with an explicit
    /// configuration.
    ///
    /// Fails with [`ArrayError::ZeroWidth`] if `element_width` is zero.
    pub fn with_config_in(
        element_width: usize,
        config: &ArrayConfig,
        alloc: A,
    ) -> Result<Self, ArrayError> {
        let element = Layout::from_size_align(element_width, 1).map_err(|_| {
            ArrayError::CapacityOverflow {
                requested_elements: 1,
                element_width,
            }
        })?;
        Ok(Self {
            slots: SlotVec::with_config_in(element, config, alloc)?,
        })
    }

    fn check_width(&self, actual: usize) -> Result<(), ArrayError> {
        let expected = self.slots.element_width();
        if actual == expected {
            Ok(())
        } else {
            Err(ArrayError::WidthMismatch { expected, actual })
        }
    }

    /// Copy the element at `index` into `dst`.
    ///
    /// `dst` must be exactly `element_width()` bytes.
    pub fn get(&self, index: usize, dst: &mut [u8]) -> Result<(), ArrayError> {
        self.check_width(dst.len())?;
        // SAFETY: dst is a unique borrow of element_width bytes, so it is
        // writable and cannot alias the buffer.
        unsafe { self.slots.read(index, dst.as_mut_ptr()) }
    }

    /// Overwrite the element at `index` with `src`.
    ///
    /// `src` must be exactly `element_width()` bytes.
    pub fn set(&mut self, index: usize, src: &[u8]) -> Result<(), ArrayError> {
        self.check_width(src.len())?;
        // SAFETY: src is readable for element_width bytes.
        unsafe { self.slots.write(index, src.as_ptr()) }
    }

    /// Append `src` as the new last element.
    ///
    /// `src` must be exactly `element_width()` bytes.
    pub fn append(&mut self, src: &[u8]) -> Result<(), ArrayError> {
        self.check_width(src.len())?;
        // SAFETY: src is readable for element_width bytes and, being a
        // shared borrow held alongside &mut self, cannot point into the
        // buffer.
        unsafe { self.slots.append(src.as_ptr()) }
    }

    /// Remove the last element.
    pub fn pop(&mut self) -> Result<(), ArrayError> {
        // SAFETY: no destination is written.
        unsafe { self.slots.pop(None) }
    }

    /// Remove the last element, copying it into `dst`.
    ///
    /// `dst` must be exactly `element_width()` bytes. On error `dst` is
    /// not written.
    pub fn pop_into(&mut self, dst: &mut [u8]) -> Result<(), ArrayError> {
        self.check_width(dst.len())?;
        // SAFETY: dst is a unique borrow of element_width bytes.
        unsafe { self.slots.pop(Some(dst.as_mut_ptr())) }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the array holds no elements.
    pub fn is_empty(&self) -> bool {
        self.slots.len() == 0
    }

    /// Number of element slots currently allocated.
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Byte size of one element, fixed at construction.
    pub fn element_width(&self) -> usize {
        self.slots.element_width()
    }

    /// Bytes held by the backing buffer.
    pub fn memory_bytes(&self) -> usize {
        self.slots.memory_bytes()
    }

    /// The allocator backing this array.
    pub fn allocator(&self) -> &A {
        self.slots.allocator()
    }

    /// Release the backing buffer and end the array.
    pub fn release(self) {
        drop(self);
    }
}

impl<A: BufferAllocator> fmt::Debug for ByteArray<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteArray")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("element_width", &self.element_width())
            .finish()
    }
}
