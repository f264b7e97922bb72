//! C FFI bindings for dynarr.
//!
//! Exposes [`ByteArray`](dynarr_buffer::ByteArray) through a procedural
//! C API: arrays are addressed by opaque `u64` handles, every fallible
//! call returns a [`DynarrStatus`](status::DynarrStatus) code, and no
//! Rust panic ever crosses the boundary. Every exported function carries
//! `#[allow(unsafe_code)]`; the rest of the crate does not.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

use std::any::Any;
use std::cell::RefCell;
use std::ffi::c_char;

thread_local! {
    /// Message of the most recent panic caught by `ffi_guard!` on this
    /// thread.
    pub(crate) static LAST_PANIC: RefCell<String> = const { RefCell::new(String::new()) };
}

/// Record a caught panic payload in [`LAST_PANIC`].
pub(crate) fn record_panic(payload: &(dyn Any + Send)) {
    let msg = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic with non-string payload".to_string()
    };
    LAST_PANIC.with(|cell| *cell.borrow_mut() = msg);
}

/// Run `$body` under `catch_unwind`, returning `$default` if it panics.
macro_rules! ffi_guard_or {
    ($default:expr, $body:block) => {{
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $body)) {
            Ok(value) => value,
            Err(payload) => {
                $crate::record_panic(payload.as_ref());
                $default
            }
        }
    }};
}

/// Run a status-returning `$body`, mapping a panic to `Panicked`.
macro_rules! ffi_guard {
    ($body:block) => {
        ffi_guard_or!($crate::status::DynarrStatus::Panicked as i32, $body)
    };
}

/// Lock a mutex, returning `InternalError` from the enclosing guarded body
/// if it is poisoned.
macro_rules! ffi_lock {
    ($mutex:expr) => {
        match $mutex.lock() {
            Ok(guard) => guard,
            Err(_) => return $crate::status::DynarrStatus::InternalError as i32,
        }
    };
}

pub mod array;
mod handle;
pub mod status;

pub use status::DynarrStatus;

/// Copy the message of the most recent panic caught on this thread into
/// `buf`.
///
/// Returns the full message length in bytes (excluding the terminator).
/// Writes at most `buf_len - 1` bytes plus a NUL terminator; pass a null
/// `buf` to query the length only. Returns 0 if no panic has been caught.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dynarr_last_panic_message(buf: *mut c_char, buf_len: usize) -> usize {
    LAST_PANIC.with(|cell| {
        let msg = cell.borrow();
        if !buf.is_null() && buf_len > 0 {
            let n = msg.len().min(buf_len - 1);
            // SAFETY: buf is valid for buf_len bytes per caller contract and
            // n + 1 <= buf_len.
            unsafe {
                std::ptr::copy_nonoverlapping(msg.as_ptr(), buf.cast::<u8>(), n);
                *buf.add(n) = 0;
            }
        }
        msg.len()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_panic_means_empty_message() {
        LAST_PANIC.with(|cell| cell.borrow_mut().clear());
        assert_eq!(dynarr_last_panic_message(std::ptr::null_mut(), 0), 0);
    }

    #[test]
    fn guard_catches_panic_and_stores_message() {
        LAST_PANIC.with(|cell| cell.borrow_mut().clear());
        let status: i32 = ffi_guard!({
            panic!("deliberate test panic");
        });
        assert_eq!(status, DynarrStatus::Panicked as i32);

        let len = dynarr_last_panic_message(std::ptr::null_mut(), 0);
        assert!(len > 0);
        let mut buf = vec![0u8; len + 1];
        let len2 = dynarr_last_panic_message(buf.as_mut_ptr().cast(), buf.len());
        assert_eq!(len, len2);
        let msg = std::str::from_utf8(&buf[..len]).unwrap();
        assert!(msg.contains("deliberate test panic"), "got: {msg:?}");
        assert_eq!(buf[len], 0);
    }

    #[test]
    fn short_buffer_is_truncated_and_terminated() {
        LAST_PANIC.with(|cell| *cell.borrow_mut() = "abcdef".to_string());
        let mut buf = [0xFFu8; 4];
        let len = dynarr_last_panic_message(buf.as_mut_ptr().cast(), buf.len());
        assert_eq!(len, 6);
        assert_eq!(&buf, b"abc\0");
    }

    #[test]
    fn guard_or_returns_default_on_panic() {
        let value: usize = ffi_guard_or!(7, {
            panic!("len panic");
        });
        assert_eq!(value, 7);
        let value: usize = ffi_guard_or!(7, { 3 });
        assert_eq!(value, 3);
    }
}
