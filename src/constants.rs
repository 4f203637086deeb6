//! Crate-wide constants
//!
//! Centralized constants to avoid duplication and ensure consistency.

// =============================================================================
// Framing
// =============================================================================

/// Every COBS frame ends with this value. When scanning a stream for frame
/// boundaries, this byte marks the end of a frame.
pub const FRAME_DELIMITER: u8 = 0x00;

/// Longest run of non-zero bytes a single code group can hold
pub const MAX_RUN: usize = 254;

/// Code value of a full group (254 data bytes, no implied zero)
pub const FULL_GROUP_CODE: u8 = 0xFF;

// =============================================================================
// In-place encoding
// =============================================================================

/// Placeholder value callers write at both ends of an in-place buffer
pub const INPLACE_SENTINEL: u8 = 0x5A;

/// In-place encodings that fit in a buffer of this size always succeed
pub const INPLACE_SAFE_BUFFER_SIZE: usize = 256;

/// Largest payload that fits a safe in-place buffer (two sentinel bytes)
pub const INPLACE_MAX_PAYLOAD: usize = INPLACE_SAFE_BUFFER_SIZE - 2;

// =============================================================================
// Frame layer
// =============================================================================

/// Default maximum encoded frame size for the `Vec`/`BytesMut` helpers
pub const MAX_FRAME_SIZE: usize = 4096;
