//! Owned, resizable element storage for dynarr.
//!
//! This crate is one of two that may contain `unsafe` code (along with
//! `dynarr-ffi`; `dynarr-core` only declares the allocator trait). The
//! unsafe surface is the private `raw` and slot modules plus the typed
//! conversions in [`array`] and [`bytes`].
//!
//! # Architecture
//!
//! ```text
//! DynamicArray<T, A>   ByteArray<A>        (public, typed / runtime width)
//!         └────────┬────────┘
//!               SlotVec<A>                 (length + CapacityPolicy)
//!                  └── RawBuffer<A>        (one owned allocation, realloc)
//!                         └── A: BufferAllocator (dynarr-core, Global by default)
//! ```
//!
//! The growth and shrink rules live once in `SlotVec`, driven by
//! [`CapacityPolicy`](dynarr_core::CapacityPolicy). A failed reallocation
//! never loses the previous allocation: the array keeps its old buffer,
//! capacity and length.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod array;
pub mod bytes;
mod raw;
mod slots;

// Public re-exports for the primary API surface.
pub use array::DynamicArray;
pub use bytes::ByteArray;
pub use dynarr_core::{
    ArrayConfig, ArrayError, BufferAllocator, CapacityPolicy, ConfigError, Global,
};
