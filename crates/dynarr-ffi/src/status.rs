//! C-compatible status codes.
//!
//! [`DynarrStatus`] is a `repr(i32)` enum covering every error condition
//! an array operation can report. Conversion from [`ArrayError`] is
//! provided.

use dynarr_core::ArrayError;

/// C-compatible status code returned by all FFI functions.
///
/// `Ok` = 0, all errors are negative. Values are ABI-stable.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DynarrStatus {
    /// Success.
    Ok = 0,
    /// Handle is invalid or was already freed.
    InvalidHandle = -1,
    /// Index is not below the current length.
    OutOfBounds = -2,
    /// The allocator refused a request; the array is unchanged.
    AllocationFailed = -3,
    /// Pop on an empty array.
    Empty = -4,
    /// An argument is null, zero-width, or otherwise invalid.
    InvalidArgument = -5,
    /// Requested capacity overflows the address space.
    CapacityOverflow = -6,
    /// Internal error (e.g. poisoned mutex after a prior panic).
    InternalError = -20,
    /// A Rust panic was caught at the FFI boundary.
    Panicked = -128,
}

impl From<&ArrayError> for DynarrStatus {
    fn from(e: &ArrayError) -> Self {
        match e {
            ArrayError::OutOfBounds { .. } => DynarrStatus::OutOfBounds,
            ArrayError::AllocationFailed { .. } => DynarrStatus::AllocationFailed,
            ArrayError::CapacityOverflow { .. } => DynarrStatus::CapacityOverflow,
            ArrayError::Empty => DynarrStatus::Empty,
            ArrayError::ZeroWidth
            | ArrayError::WidthMismatch { .. }
            | ArrayError::Config(_) => DynarrStatus::InvalidArgument,
        }
    }
}

impl From<ArrayError> for DynarrStatus {
    fn from(e: ArrayError) -> Self {
        DynarrStatus::from(&e)
    }
}

/// Collapse a Rust result into the `i32` status returned across the ABI.
pub(crate) fn status_of(result: Result<(), ArrayError>) -> i32 {
    match result {
        Ok(()) => DynarrStatus::Ok as i32,
        Err(e) => DynarrStatus::from(&e) as i32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynarr_core::ConfigError;

    #[test]
    fn status_values_are_stable() {
        assert_eq!(DynarrStatus::Ok as i32, 0);
        assert_eq!(DynarrStatus::InvalidHandle as i32, -1);
        assert_eq!(DynarrStatus::OutOfBounds as i32, -2);
        assert_eq!(DynarrStatus::AllocationFailed as i32, -3);
        assert_eq!(DynarrStatus::Empty as i32, -4);
        assert_eq!(DynarrStatus::InvalidArgument as i32, -5);
        assert_eq!(DynarrStatus::CapacityOverflow as i32, -6);
        assert_eq!(DynarrStatus::InternalError as i32, -20);
        assert_eq!(DynarrStatus::Panicked as i32, -128);
    }

    #[test]
    fn array_error_mapping() {
        assert_eq!(
            DynarrStatus::from(&ArrayError::OutOfBounds { index: 3, len: 1 }),
            DynarrStatus::OutOfBounds
        );
        assert_eq!(
            DynarrStatus::from(&ArrayError::AllocationFailed { requested_bytes: 8 }),
            DynarrStatus::AllocationFailed
        );
        assert_eq!(
            DynarrStatus::from(&ArrayError::CapacityOverflow {
                requested_elements: usize::MAX,
                element_width: 4
            }),
            DynarrStatus::CapacityOverflow
        );
        assert_eq!(DynarrStatus::from(&ArrayError::Empty), DynarrStatus::Empty);
        assert_eq!(
            DynarrStatus::from(&ArrayError::ZeroWidth),
            DynarrStatus::InvalidArgument
        );
        assert_eq!(
            DynarrStatus::from(ArrayError::WidthMismatch {
                expected: 4,
                actual: 2
            }),
            DynarrStatus::InvalidArgument
        );
        assert_eq!(
            DynarrStatus::from(ArrayError::Config(ConfigError::ZeroMinCapacity)),
            DynarrStatus::InvalidArgument
        );
    }

    #[test]
    fn status_of_collapses_results() {
        assert_eq!(status_of(Ok(())), 0);
        assert_eq!(status_of(Err(ArrayError::Empty)), -4);
    }
}
