//! dynarr: resizable arrays with a doubling/quarter-shrink capacity policy.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the dynarr sub-crates. For most users, adding `dynarr` as a single
//! dependency is sufficient. C callers link `dynarr-ffi` instead.
//!
//! # Quick start
//!
//! ```rust
//! use dynarr::prelude::*;
//!
//! let mut a = DynamicArray::<i32>::new().unwrap();
//! for v in [10, 20, 30, 40] {
//!     a.append(v).unwrap();
//! }
//! assert_eq!(a.get(4), Err(ArrayError::OutOfBounds { index: 4, len: 4 }));
//!
//! a.set(2, 50).unwrap();
//! assert_eq!(a.pop().unwrap(), 40);
//! assert_eq!(a.len(), 3);
//! assert_eq!(a.get(2).unwrap(), 50);
//! a.release();
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `dynarr-core` | Errors, configuration, capacity policy, allocator seam |
//! | [`buffer`] | `dynarr-buffer` | `DynamicArray<T>` and `ByteArray` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Errors, configuration, and the capacity policy (`dynarr-core`).
///
/// Also defines the [`types::BufferAllocator`] trait through which arrays
/// obtain memory, with [`types::Global`] as the default.
pub use dynarr_core as types;

/// Array types (`dynarr-buffer`).
///
/// [`buffer::DynamicArray`] for statically typed `Copy` elements,
/// [`buffer::ByteArray`] when the element width is only known at run time.
pub use dynarr_buffer as buffer;

/// Common imports for typical dynarr usage.
///
/// ```rust
/// use dynarr::prelude::*;
/// ```
pub mod prelude {
    // Arrays
    pub use dynarr_buffer::{ByteArray, DynamicArray};

    // Configuration
    pub use dynarr_core::{ArrayConfig, CapacityPolicy};

    // Errors
    pub use dynarr_core::{ArrayError, ConfigError};

    // Allocation
    pub use dynarr_core::{BufferAllocator, Global};
}
