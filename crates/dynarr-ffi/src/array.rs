//! Array lifecycle FFI: create, get, set, append, pop, length, free.
//!
//! Arrays live in a global handle table behind a `Mutex`, locked for the
//! duration of each call. Element bytes are copied through caller-owned
//! buffers of exactly `element_width` bytes.

use std::ffi::c_void;
use std::sync::Mutex;

use dynarr_buffer::ByteArray;

use crate::handle::HandleTable;
use crate::status::{status_of, DynarrStatus};

static ARRAYS: Mutex<HandleTable<ByteArray>> = Mutex::new(HandleTable::new());

/// Create an empty array of `element_width`-byte elements.
///
/// On success, writes the array handle to `array_out` and returns
/// `DYNARR_STATUS_OK`. A zero `element_width` or a null `array_out` is
/// `DYNARR_STATUS_INVALID_ARGUMENT`; nothing is allocated on failure.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dynarr_create(element_width: usize, array_out: *mut u64) -> i32 {
    ffi_guard!({
        if array_out.is_null() {
            return DynarrStatus::InvalidArgument as i32;
        }
        let array = match ByteArray::new(element_width) {
            Ok(a) => a,
            Err(e) => return DynarrStatus::from(&e) as i32,
        };
        let handle = match ffi_lock!(ARRAYS).insert(array) {
            Some(h) => h,
            None => return DynarrStatus::InternalError as i32,
        };
        // SAFETY: array_out is non-null and points to a writable u64 per
        // caller contract.
        unsafe { *array_out = handle };
        DynarrStatus::Ok as i32
    })
}

/// Copy element `index` of `array` into `destination`.
///
/// `destination` must be writable for the array's element width.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dynarr_get(array: u64, index: usize, destination: *mut c_void) -> i32 {
    ffi_guard!({
        if destination.is_null() {
            return DynarrStatus::InvalidArgument as i32;
        }
        let table = ffi_lock!(ARRAYS);
        let Some(a) = table.get(array) else {
            return DynarrStatus::InvalidHandle as i32;
        };
        // SAFETY: destination is non-null and writable for element_width
        // bytes per caller contract; it is caller memory, not the buffer.
        let dst =
            unsafe { std::slice::from_raw_parts_mut(destination.cast::<u8>(), a.element_width()) };
        status_of(a.get(index, dst))
    })
}

/// Overwrite element `index` of `array` with the bytes at `element`.
///
/// `element` must be readable for the array's element width.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dynarr_set(array: u64, index: usize, element: *const c_void) -> i32 {
    ffi_guard!({
        if element.is_null() {
            return DynarrStatus::InvalidArgument as i32;
        }
        let mut table = ffi_lock!(ARRAYS);
        let Some(a) = table.get_mut(array) else {
            return DynarrStatus::InvalidHandle as i32;
        };
        // SAFETY: element is non-null and readable for element_width bytes
        // per caller contract.
        let src = unsafe { std::slice::from_raw_parts(element.cast::<u8>(), a.element_width()) };
        status_of(a.set(index, src))
    })
}

/// Append the bytes at `element` to `array`, growing it if full.
///
/// On `DYNARR_STATUS_ALLOCATION_FAILED` the array is unchanged.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dynarr_append(array: u64, element: *const c_void) -> i32 {
    ffi_guard!({
        if element.is_null() {
            return DynarrStatus::InvalidArgument as i32;
        }
        let mut table = ffi_lock!(ARRAYS);
        let Some(a) = table.get_mut(array) else {
            return DynarrStatus::InvalidHandle as i32;
        };
        // SAFETY: element is non-null and readable for element_width bytes
        // per caller contract. It must not point into the array's own
        // storage, which the caller can only reach through dynarr_get copies.
        let src = unsafe { std::slice::from_raw_parts(element.cast::<u8>(), a.element_width()) };
        status_of(a.append(src))
    })
}

/// Remove the last element of `array`, discarding it.
///
/// An empty array yields `DYNARR_STATUS_EMPTY`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dynarr_pop(array: u64) -> i32 {
    ffi_guard!({
        let mut table = ffi_lock!(ARRAYS);
        let Some(a) = table.get_mut(array) else {
            return DynarrStatus::InvalidHandle as i32;
        };
        status_of(a.pop())
    })
}

/// Remove the last element of `array`, copying it into `destination`.
///
/// `destination` is not written on failure.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dynarr_pop_into(array: u64, destination: *mut c_void) -> i32 {
    ffi_guard!({
        if destination.is_null() {
            return DynarrStatus::InvalidArgument as i32;
        }
        let mut table = ffi_lock!(ARRAYS);
        let Some(a) = table.get_mut(array) else {
            return DynarrStatus::InvalidHandle as i32;
        };
        // SAFETY: destination is non-null and writable for element_width
        // bytes per caller contract.
        let dst =
            unsafe { std::slice::from_raw_parts_mut(destination.cast::<u8>(), a.element_width()) };
        status_of(a.pop_into(dst))
    })
}

/// Number of elements in `array`. Returns 0 for an invalid handle or on
/// internal error; use [`dynarr_len_get`] to tell those apart.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dynarr_len(array: u64) -> usize {
    ffi_guard_or!(0, {
        match ARRAYS.lock() {
            Ok(table) => table.get(array).map_or(0, |a| a.len()),
            Err(_) => 0,
        }
    })
}

/// Write the element count of `array` to `out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dynarr_len_get(array: u64, out: *mut usize) -> i32 {
    ffi_guard!({
        if out.is_null() {
            return DynarrStatus::InvalidArgument as i32;
        }
        let table = ffi_lock!(ARRAYS);
        let Some(a) = table.get(array) else {
            return DynarrStatus::InvalidHandle as i32;
        };
        // SAFETY: out is non-null and writable per caller contract.
        unsafe { *out = a.len() };
        DynarrStatus::Ok as i32
    })
}

/// Write the allocated slot count of `array` to `out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dynarr_capacity_get(array: u64, out: *mut usize) -> i32 {
    ffi_guard!({
        if out.is_null() {
            return DynarrStatus::InvalidArgument as i32;
        }
        let table = ffi_lock!(ARRAYS);
        let Some(a) = table.get(array) else {
            return DynarrStatus::InvalidHandle as i32;
        };
        // SAFETY: out is non-null and writable per caller contract.
        unsafe { *out = a.capacity() };
        DynarrStatus::Ok as i32
    })
}

/// Release `array` and its buffer. The handle becomes invalid; freeing it
/// again returns `DYNARR_STATUS_INVALID_HANDLE`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dynarr_free(array: u64) -> i32 {
    ffi_guard!({
        let removed = ffi_lock!(ARRAYS).remove(array);
        match removed {
            Some(a) => {
                a.release();
                DynarrStatus::Ok as i32
            }
            None => DynarrStatus::InvalidHandle as i32,
        }
    })
}
