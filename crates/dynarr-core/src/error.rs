//! Error types for dynarr containers.
//!
//! Two failure families matter to callers: bounds violations, which are
//! logic errors the caller can correct by re-checking `len()`, and
//! allocation failures, which leave the array and its contents exactly as
//! they were before the failed call.

use std::error::Error;
use std::fmt;

use crate::config::ConfigError;

/// Errors returned by array operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArrayError {
    /// `get` or `set` addressed a slot at or beyond the current length.
    OutOfBounds {
        /// The requested index.
        index: usize,
        /// The array length at the time of the call.
        len: usize,
    },
    /// The allocator could not satisfy a (re)allocation request.
    ///
    /// Raised by construction, by growth during `append`, and by the
    /// shrink step of `pop`. The array is unchanged when this is returned
    /// from `append` or `pop`.
    AllocationFailed {
        /// Size of the rejected request in bytes.
        requested_bytes: usize,
    },
    /// The requested capacity cannot be expressed as a valid allocation
    /// size (doubling overflowed, or the byte size exceeds `isize::MAX`).
    CapacityOverflow {
        /// The element count that was requested.
        requested_elements: usize,
        /// Byte width of one element.
        element_width: usize,
    },
    /// `pop` was called on an array with no elements.
    Empty,
    /// The element width is zero. Zero-sized elements are not supported.
    ZeroWidth,
    /// A byte slice passed to a byte-width array does not match the
    /// array's element width.
    WidthMismatch {
        /// The array's element width.
        expected: usize,
        /// The length of the slice that was passed.
        actual: usize,
    },
    /// The [`ArrayConfig`](crate::ArrayConfig) passed at construction is
    /// invalid.
    Config(ConfigError),
}

impl ArrayError {
    /// Whether this error came from the allocator rather than from the
    /// caller's arguments.
    pub fn is_allocation_failure(&self) -> bool {
        matches!(
            self,
            Self::AllocationFailed { .. } | Self::CapacityOverflow { .. }
        )
    }
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for length {len}")
            }
            Self::AllocationFailed { requested_bytes } => {
                write!(f, "allocation of {requested_bytes} bytes failed")
            }
            Self::CapacityOverflow {
                requested_elements,
                element_width,
            } => {
                write!(
                    f,
                    "capacity overflow: {requested_elements} elements of {element_width} bytes"
                )
            }
            Self::Empty => write!(f, "pop on empty array"),
            Self::ZeroWidth => write!(f, "element width must be non-zero"),
            Self::WidthMismatch { expected, actual } => {
                write!(
                    f,
                    "element width mismatch: expected {expected} bytes, got {actual}"
                )
            }
            Self::Config(e) => write!(f, "invalid array config: {e}"),
        }
    }
}

impl Error for ArrayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for ArrayError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
