//! COBS encoder
//!
//! Two entry points on the same value type:
//! - `encode`: stuff `input` into a separate output slice
//! - `encode_in_place`: stuff a payload framed by two sentinel bytes inside
//!   its own buffer

use super::{max_encoded_len, Trailer};
use crate::constants::{FRAME_DELIMITER, FULL_GROUP_CODE, INPLACE_SENTINEL};
use crate::error::CobsError;

/// Stateless COBS encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Encoder {
    trailer: Trailer,
}

impl Encoder {
    /// Create an encoder with the given trailer convention
    pub const fn new(trailer: Trailer) -> Self {
        Self { trailer }
    }

    /// Encoder that appends a `0x00` delimiter to each frame
    pub const fn delimited() -> Self {
        Self::new(Trailer::Delimited)
    }

    /// Encoder that leaves the delimiter to the framing layer
    pub const fn undelimited() -> Self {
        Self::new(Trailer::Bare)
    }

    pub fn trailer(&self) -> Trailer {
        self.trailer
    }

    /// Worst-case output size for `input_len` bytes
    pub fn required_capacity(&self, input_len: usize) -> usize {
        max_encoded_len(input_len, self.trailer)
    }

    /// Encode `input` into `output`
    ///
    /// `output.len()` is the declared capacity and must be at least
    /// [`required_capacity`](Self::required_capacity), otherwise nothing is
    /// written. Returns the number of bytes written.
    pub fn encode(&self, input: &[u8], output: &mut [u8]) -> Result<usize, CobsError> {
        let required = self.required_capacity(input.len());
        if output.len() < required {
            return Err(CobsError::BadOutputLength {
                required,
                available: output.len(),
            });
        }

        let mut code_index = 0;
        let mut write_index = 1;
        let mut code: u8 = 1;

        for &byte in input {
            if byte == FRAME_DELIMITER {
                output[code_index] = code;
                code_index = write_index;
                write_index += 1;
                code = 1;
            } else {
                output[write_index] = byte;
                write_index += 1;
                code += 1;
                if code == FULL_GROUP_CODE {
                    output[code_index] = code;
                    code_index = write_index;
                    write_index += 1;
                    code = 1;
                }
            }
        }

        output[code_index] = code;

        if self.trailer == Trailer::Delimited {
            output[write_index] = FRAME_DELIMITER;
            write_index += 1;
        }

        Ok(write_index)
    }

    /// Encode a sentinel-framed payload inside its own buffer
    ///
    /// On entry `buf[0]` and `buf[len - 1]` must both be
    /// [`INPLACE_SENTINEL`]; the payload sits between them. On success the
    /// buffer holds a complete frame ending with the `0x00` delimiter and
    /// the frame length (`buf.len()`) is returned. The delimiter is always
    /// written, whatever this encoder's trailer setting.
    ///
    /// Length and sentinel checks happen before any byte is changed. A run
    /// too long to represent is only found mid-scan, so on `BadPayload` from
    /// that path the buffer is partially rewritten. Buffers of at most
    /// [`INPLACE_SAFE_BUFFER_SIZE`](crate::constants::INPLACE_SAFE_BUFFER_SIZE)
    /// bytes never hit it.
    pub fn encode_in_place(&self, buf: &mut [u8]) -> Result<usize, CobsError> {
        let len = buf.len();
        if len < 2 {
            return Err(CobsError::BadOutputLength {
                required: 2,
                available: len,
            });
        }
        if buf[0] != INPLACE_SENTINEL || buf[len - 1] != INPLACE_SENTINEL {
            return Err(CobsError::BadPayload);
        }

        let last = len - 1;
        let mut patch = 0;

        for cur in 1..last {
            if buf[cur] == FRAME_DELIMITER {
                backfill(buf, patch, cur)?;
                patch = cur;
            }
        }

        backfill(buf, patch, last)?;
        buf[last] = FRAME_DELIMITER;

        Ok(len)
    }
}

/// Write the distance from `patch` to `cur` into the code slot at `patch`
fn backfill(buf: &mut [u8], patch: usize, cur: usize) -> Result<(), CobsError> {
    let offset = u8::try_from(cur - patch).map_err(|_| CobsError::BadPayload)?;
    buf[patch] = offset;
    Ok(())
}
