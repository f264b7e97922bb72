//! The typed dynamic array.
//!
//! [`DynamicArray<T>`] stores `T: Copy` values by value in one contiguous
//! buffer. Reads return copies; there is no way to borrow into the buffer,
//! so reallocation can never invalidate a caller's reference.
//!
//! ```
//! use dynarr_buffer::DynamicArray;
//!
//! let mut a = DynamicArray::<i32>::new().unwrap();
//! for v in [10, 20, 30, 40] {
//!     a.append(v).unwrap();
//! }
//! assert_eq!(a.len(), 4);
//! assert!(a.get(4).is_err());
//! a.set(2, 50).unwrap();
//! assert_eq!(a.pop().unwrap(), 40);
//! assert_eq!(a.get(2).unwrap(), 50);
//! a.release();
//! ```

#![allow(unsafe_code)]

use std::alloc::Layout;
use std::fmt;
use std::marker::PhantomData;
use std::mem::MaybeUninit;

use dynarr_core::{ArrayConfig, ArrayError, BufferAllocator, Global};

use crate::slots::SlotVec;

/// A resizable array of `T` that doubles when full and halves when a
/// quarter full.
///
/// Every fallible operation returns `Result`; a failed `append` or `pop`
/// leaves the array exactly as it was.
pub struct DynamicArray<T: Copy, A: BufferAllocator = Global> {
    slots: SlotVec<A>,
    _marker: PhantomData<T>,
}

impl<T: Copy> DynamicArray<T> {
    /// Create an empty array with the default initial capacity (2).
    pub fn new() -> Result<Self, ArrayError> {
        Self::with_config_in(&ArrayConfig::default(), Global)
    }

    /// Create an empty array with an explicit configuration.
    pub fn with_config(config: &ArrayConfig) -> Result<Self, ArrayError> {
        Self::with_config_in(config, Global)
    }
}

impl<T: Copy, A: BufferAllocator> DynamicArray<T, A> {
    /// Create an empty array backed by `alloc`.
    pub fn new_in(alloc: A) -> Result<Self, ArrayError> {
        Self::with_config_in(&ArrayConfig::default(), alloc)
    }

    /// Create an empty array backed by `alloc` with an explicit
    /// configuration.
    ///
    /// Fails with [`ArrayError::ZeroWidth`] for zero-sized `T`, with
    /// [`ArrayError::Config`] for an invalid config, and with
    /// [`ArrayError::AllocationFailed`] if the initial buffer cannot be
    /// allocated. Nothing is leaked on failure.
    pub fn with_config_in(config: &ArrayConfig, alloc: A) -> Result<Self, ArrayError> {
        Ok(Self {
            slots: SlotVec::with_config_in(Layout::new::<T>(), config, alloc)?,
            _marker: PhantomData,
        })
    }

    /// Copy of the element at `index`.
    pub fn get(&self, index: usize) -> Result<T, ArrayError> {
        let mut out = MaybeUninit::<T>::uninit();
        // SAFETY: `out` is a fresh local of exactly element_width bytes.
        unsafe { self.slots.read(index, out.as_mut_ptr().cast())? };
        // SAFETY: read succeeded, so every byte of a T written earlier by
        // append/set has been copied into `out`.
        Ok(unsafe { out.assume_init() })
    }

    /// Overwrite the element at `index`.
    pub fn set(&mut self, index: usize, value: T) -> Result<(), ArrayError> {
        // SAFETY: `value` is a local T, valid for element_width byte reads.
        unsafe { self.slots.write(index, (&value as *const T).cast()) }
    }

    /// Append `value` as the new last element.
    pub fn append(&mut self, value: T) -> Result<(), ArrayError> {
        // SAFETY: `value` is a local T and cannot alias the buffer.
        unsafe { self.slots.append((&value as *const T).cast()) }
    }

    /// Remove and return the last element.
    ///
    /// Fails with [`ArrayError::Empty`] on an empty array, and with
    /// [`ArrayError::AllocationFailed`] if the shrink step cannot
    /// reallocate; in both cases nothing changes.
    pub fn pop(&mut self) -> Result<T, ArrayError> {
        let mut out = MaybeUninit::<T>::uninit();
        // SAFETY: `out` is a fresh local of exactly element_width bytes.
        unsafe { self.slots.pop(Some(out.as_mut_ptr().cast()))? };
        // SAFETY: pop succeeded and copied the removed element into `out`.
        Ok(unsafe { out.assume_init() })
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

    /// Byte size of one element (`size_of::<T>()`).
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
    ///
    /// Equivalent to dropping it; provided so teardown is explicit at the
    /// call site.
    pub fn release(self) {
        drop(self);
    }
}

impl<T: Copy, A: BufferAllocator> fmt::Debug for DynamicArray<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicArray")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("element_width", &self.element_width())
            .finish()
    }
}
