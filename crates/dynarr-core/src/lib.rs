//! Core types for the dynarr container family.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the error types, the array configuration, the [`CapacityPolicy`] that
//! decides when a buffer grows or shrinks and to what size, and the
//! [`BufferAllocator`] seam that buffers draw memory from.
//!
//! Only [`alloc`] contains `unsafe` code.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod alloc;
pub mod config;
pub mod error;
pub mod policy;

pub use alloc::{BufferAllocator, Global};
pub use config::{ArrayConfig, ConfigError};
pub use error::ArrayError;
pub use policy::CapacityPolicy;
