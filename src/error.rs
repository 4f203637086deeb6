//! Codec error types
//!
//! - `CobsError` is returned by the codec itself (encoder, decoder, frame layer).
//! - `StatusCode` is its numeric form, shared with C callers.

use std::fmt;

// =============================================================================
// Codec errors
// =============================================================================

/// Errors reported by the COBS codec
///
/// A `BadOutputLength` is always detected before any byte is written.
/// The remaining variants are found mid-scan, so the output (or the in-place
/// buffer) may already be partially written and must be discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CobsError {
    /// The output length handle was not provided (C ABI only)
    OutputBufferNull,
    /// Declared output capacity is smaller than the worst-case requirement
    BadOutputLength { required: usize, available: usize },
    /// In-place buffer is not framed by sentinels, or a run is too long to encode
    BadPayload,
    /// A literal zero was found where a code byte was expected (strict decode)
    ZeroByteInInput { index: usize },
    /// A code byte claims more data than remains in the input
    ZeroBeyondBuffer { index: usize },
    /// Frame exceeds the configured maximum size (frame layer)
    FrameTooLarge { size: usize, max: usize },
}

impl std::error::Error for CobsError {}

impl fmt::Display for CobsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutputBufferNull => write!(f, "Output buffer length pointer is null"),
            Self::BadOutputLength {
                required,
                available,
            } => write!(
                f,
                "Output buffer too small: {} bytes required, {} available",
                required, available
            ),
            Self::BadPayload => {
                write!(f, "Bad in-place payload (missing sentinel or run too long)")
            }
            Self::ZeroByteInInput { index } => {
                write!(f, "Zero byte in encoded input at offset {}", index)
            }
            Self::ZeroBeyondBuffer { index } => write!(
                f,
                "Code byte at offset {} points beyond end of input",
                index
            ),
            Self::FrameTooLarge { size, max } => {
                write!(f, "Frame too large: {} bytes (max {})", size, max)
            }
        }
    }
}

// =============================================================================
// Status codes
// =============================================================================

/// Numeric status values shared with C callers
///
/// `EofInInput` is not a failure: decoding stopped at an embedded delimiter
/// and the bytes before it are valid.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Success = 0,
    BadOutputLength = -1,
    EofInInput = -2,
    ZeroByteInInput = -3,
    OutputBufferNull = -4,
    ZeroBeyondBuffer = -5,
    BadPayload = -6,
    Internal = -99,
}

impl StatusCode {
    /// Raw value as seen across the C ABI
    pub fn as_raw(self) -> i32 {
        self as i32
    }

    /// Short lowercase name, used in reports
    pub fn name(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::BadOutputLength => "bad_output_length",
            Self::EofInInput => "eof_in_input",
            Self::ZeroByteInInput => "zero_byte_in_input",
            Self::OutputBufferNull => "output_buffer_null",
            Self::ZeroBeyondBuffer => "zero_beyond_buffer",
            Self::BadPayload => "bad_payload",
            Self::Internal => "internal",
        }
    }
}

impl From<CobsError> for StatusCode {
    fn from(err: CobsError) -> Self {
        match err {
            CobsError::OutputBufferNull => Self::OutputBufferNull,
            CobsError::BadOutputLength { .. } | CobsError::FrameTooLarge { .. } => {
                Self::BadOutputLength
            }
            CobsError::BadPayload => Self::BadPayload,
            CobsError::ZeroByteInInput { .. } => Self::ZeroByteInInput,
            CobsError::ZeroBeyondBuffer { .. } => Self::ZeroBeyondBuffer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_match_c_values() {
        assert_eq!(StatusCode::Success.as_raw(), 0);
        assert_eq!(StatusCode::BadOutputLength.as_raw(), -1);
        assert_eq!(StatusCode::EofInInput.as_raw(), -2);
        assert_eq!(StatusCode::OutputBufferNull.as_raw(), -4);
        assert_eq!(StatusCode::ZeroBeyondBuffer.as_raw(), -5);
        assert_eq!(StatusCode::BadPayload.as_raw(), -6);
    }

    #[test]
    fn test_status_from_error() {
        assert_eq!(
            StatusCode::from(CobsError::ZeroByteInInput { index: 3 }),
            StatusCode::ZeroByteInInput
        );
        assert_eq!(
            StatusCode::from(CobsError::FrameTooLarge { size: 9, max: 8 }),
            StatusCode::BadOutputLength
        );
    }

    #[test]
    fn test_display() {
        let err = CobsError::BadOutputLength {
            required: 6,
            available: 5,
        };
        assert_eq!(
            err.to_string(),
            "Output buffer too small: 6 bytes required, 5 available"
        );
    }
}
