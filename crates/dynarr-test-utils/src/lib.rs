//! Test utilities for dynarr development.
//!
//! Provides [`TestAllocator`], a [`BufferAllocator`] that forwards to the
//! global allocator while counting live bytes and injecting failures on
//! demand. Use it to exercise the allocation-failure paths of growth,
//! shrink and construction, and to check that teardown returns every
//! byte.

#![deny(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::alloc::Layout;
use std::ptr::NonNull;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use dynarr_core::{BufferAllocator, Global};

#[derive(Default)]
struct Counters {
    /// Requests still to be refused.
    fail_remaining: AtomicUsize,
    /// Bytes currently allocated and not yet returned.
    live_bytes: AtomicUsize,
    /// Successful allocate/reallocate calls.
    allocations: AtomicUsize,
    /// Refused allocate/reallocate calls.
    failures: AtomicUsize,
}

/// A fault-injecting, leak-tracking allocator.
///
/// Clones share counters, so keep one clone in the test and hand another
/// to the array under test.
#[derive(Clone, Default)]
pub struct TestAllocator {
    counters: Arc<Counters>,
}

impl TestAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse the next `n` allocate/reallocate requests. `0` clears any
    /// pending failures.
    pub fn fail_next(&self, n: usize) {
        self.counters.fail_remaining.store(n, Ordering::SeqCst);
    }

    /// Bytes currently allocated through this allocator.
    pub fn live_bytes(&self) -> usize {
        self.counters.live_bytes.load(Ordering::SeqCst)
    }

    /// Number of successful allocate/reallocate calls.
    pub fn allocations(&self) -> usize {
        self.counters.allocations.load(Ordering::SeqCst)
    }

    /// Number of refused allocate/reallocate calls.
    pub fn failures(&self) -> usize {
        self.counters.failures.load(Ordering::SeqCst)
    }

    /// Consume one pending failure, if any.
    fn should_fail(&self) -> bool {
        let refused = self
            .counters
            .fail_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if refused {
            self.counters.failures.fetch_add(1, Ordering::SeqCst);
        }
        refused
    }
}

// SAFETY: every successful request is forwarded to Global unchanged.
#[allow(unsafe_code)]
unsafe impl BufferAllocator for TestAllocator {
    fn allocate_zeroed(&self, layout: Layout) -> Option<NonNull<u8>> {
        if self.should_fail() {
            return None;
        }
        let ptr = Global.allocate_zeroed(layout)?;
        self.counters.allocations.fetch_add(1, Ordering::SeqCst);
        self.counters
            .live_bytes
            .fetch_add(layout.size(), Ordering::SeqCst);
        Some(ptr)
    }

    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old: Layout,
        new_size: usize,
    ) -> Option<NonNull<u8>> {
        if self.should_fail() {
            return None;
        }
        // SAFETY: the caller's contract is forwarded unchanged.
        let new_ptr = unsafe { Global.reallocate(ptr, old, new_size) }?;
        self.counters.allocations.fetch_add(1, Ordering::SeqCst);
        self.counters
            .live_bytes
            .fetch_sub(old.size(), Ordering::SeqCst);
        self.counters
            .live_bytes
            .fetch_add(new_size, Ordering::SeqCst);
        Some(new_ptr)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: the caller's contract is forwarded unchanged.
        unsafe { Global.deallocate(ptr, layout) };
        self.counters
            .live_bytes
            .fetch_sub(layout.size(), Ordering::SeqCst);
    }
}
