//! C ABI exports
//!
//! Header-compatible entry points returning [`StatusCode`] values as `i32`.
//! `out_length` is in/out: capacity on entry, bytes written on return.
//! A panic inside the codec is reported as `Internal` (-99), which requires
//! the unwinding panic strategy (the release profile does not abort).
//!
//! ```c
//! int32_t cobs_encode(const uint8_t *input, size_t length, uint8_t *output, size_t *out_length);
//! int32_t cobs_decode(const uint8_t *input, size_t length, uint8_t *output, size_t *out_length);
//! int32_t cobs_decode_lenient(const uint8_t *input, size_t length, uint8_t *output, size_t *out_length);
//! int32_t cobs_encode_inplace(uint8_t *buf, unsigned len);
//! ```

use std::os::raw::c_uint;
use std::panic::AssertUnwindSafe;

use crate::codec::{Decoder, Encoder};
use crate::error::StatusCode;

fn ffi_boundary(f: impl FnOnce() -> StatusCode) -> i32 {
    match std::panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(status) => status.as_raw(),
        Err(_) => StatusCode::Internal.as_raw(),
    }
}

/// Build a shared slice, treating null as empty only when `len == 0`
///
/// # Safety
/// A non-null `ptr` must be valid for reads of `len` bytes.
unsafe fn input_slice<'a>(ptr: *const u8, len: usize) -> Option<&'a [u8]> {
    if len == 0 {
        return Some(&[]);
    }
    if ptr.is_null() {
        return None;
    }
    // SAFETY: Pointer validity for `len` bytes is guaranteed by the caller.
    Some(unsafe { std::slice::from_raw_parts(ptr, len) })
}

/// Mutable counterpart of [`input_slice`]
///
/// # Safety
/// A non-null `ptr` must be valid for writes of `len` bytes and not aliased.
unsafe fn output_slice<'a>(ptr: *mut u8, len: usize) -> Option<&'a mut [u8]> {
    if len == 0 {
        return Some(&mut []);
    }
    if ptr.is_null() {
        return None;
    }
    // SAFETY: Pointer validity for `len` bytes is guaranteed by the caller.
    Some(unsafe { std::slice::from_raw_parts_mut(ptr, len) })
}

/// Encode `length` bytes at `input` into `output`, appending the delimiter.
///
/// # Safety
/// `input` must be valid for `length` reads, `output` for `*out_length`
/// writes, and `out_length` must be null or valid for reads and writes.
#[no_mangle]
pub unsafe extern "C" fn cobs_encode(
    input: *const u8,
    length: usize,
    output: *mut u8,
    out_length: *mut usize,
) -> i32 {
    ffi_boundary(|| {
        if out_length.is_null() {
            return StatusCode::OutputBufferNull;
        }
        // SAFETY: Checked non-null above; validity guaranteed by the caller.
        let out_len = unsafe { &mut *out_length };

        // SAFETY: Forwarded caller guarantees.
        let (Some(input), Some(output)) =
            (unsafe { input_slice(input, length) }, unsafe { output_slice(output, *out_len) })
        else {
            return StatusCode::OutputBufferNull;
        };

        match Encoder::delimited().encode(input, output) {
            Ok(written) => {
                *out_len = written;
                StatusCode::Success
            }
            Err(err) => err.into(),
        }
    })
}

unsafe fn decode_with(
    decoder: Decoder,
    input: *const u8,
    length: usize,
    output: *mut u8,
    out_length: *mut usize,
) -> StatusCode {
    if out_length.is_null() {
        return StatusCode::OutputBufferNull;
    }
    // SAFETY: Checked non-null above; validity guaranteed by the caller.
    let out_len = unsafe { &mut *out_length };

    // SAFETY: Forwarded caller guarantees.
    let (Some(input), Some(output)) =
        (unsafe { input_slice(input, length) }, unsafe { output_slice(output, *out_len) })
    else {
        return StatusCode::OutputBufferNull;
    };

    match decoder.decode(input, output) {
        Ok(outcome) => {
            *out_len = outcome.decoded_len();
            outcome.status()
        }
        Err(err) => err.into(),
    }
}

/// Decode `length` bytes at `input` into `output`; any zero byte is an error.
///
/// # Safety
/// Same requirements as [`cobs_encode`].
#[no_mangle]
pub unsafe extern "C" fn cobs_decode(
    input: *const u8,
    length: usize,
    output: *mut u8,
    out_length: *mut usize,
) -> i32 {
    // SAFETY: Forwarded caller guarantees.
    ffi_boundary(|| unsafe { decode_with(Decoder::strict(), input, length, output, out_length) })
}

/// Decode up to the first zero byte. Returns `EofInInput` (-2) with
/// `*out_length` set when one is found.
///
/// # Safety
/// Same requirements as [`cobs_encode`].
#[no_mangle]
pub unsafe extern "C" fn cobs_decode_lenient(
    input: *const u8,
    length: usize,
    output: *mut u8,
    out_length: *mut usize,
) -> i32 {
    // SAFETY: Forwarded caller guarantees.
    ffi_boundary(|| unsafe { decode_with(Decoder::lenient(), input, length, output, out_length) })
}

/// Encode the sentinel-framed payload in `buf` in place.
///
/// # Safety
/// `buf` must be null or valid for reads and writes of `len` bytes.
#[no_mangle]
pub unsafe extern "C" fn cobs_encode_inplace(buf: *mut u8, len: c_uint) -> i32 {
    ffi_boundary(|| {
        if buf.is_null() {
            return StatusCode::OutputBufferNull;
        }
        // SAFETY: Checked non-null above; validity guaranteed by the caller.
        let buf = unsafe { std::slice::from_raw_parts_mut(buf, len as usize) };

        match Encoder::delimited().encode_in_place(buf) {
            Ok(_) => StatusCode::Success,
            Err(err) => err.into(),
        }
    })
}
