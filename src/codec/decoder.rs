//! COBS decoder
//!
//! The policy decides what a `0x00` in a code position means:
//! - `Strict`: corrupt input, `CobsError::ZeroByteInInput`
//! - `Lenient`: end of frame, `DecodeOutcome::EofInInput` with the prefix
//!   decoded so far

use super::max_decoded_len;
use crate::constants::{FRAME_DELIMITER, FULL_GROUP_CODE};
use crate::error::{CobsError, StatusCode};
use serde::{Deserialize, Serialize};

/// How the decoder treats a zero byte where a code byte is expected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodePolicy {
    /// Input must not contain the delimiter at all
    #[default]
    Strict,
    /// The delimiter terminates the frame; anything after it is ignored
    Lenient,
}

/// Result of a successful decode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// Whole input decoded; holds the number of bytes written
    Complete(usize),
    /// Decoding stopped at an embedded delimiter; holds the number of
    /// valid bytes written before it
    EofInInput(usize),
}

impl DecodeOutcome {
    /// Number of decoded bytes in the output
    pub fn decoded_len(self) -> usize {
        match self {
            Self::Complete(n) | Self::EofInInput(n) => n,
        }
    }

    pub fn is_complete(self) -> bool {
        matches!(self, Self::Complete(_))
    }

    pub fn status(self) -> StatusCode {
        match self {
            Self::Complete(_) => StatusCode::Success,
            Self::EofInInput(_) => StatusCode::EofInInput,
        }
    }
}

/// Stateless COBS decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Decoder {
    policy: DecodePolicy,
}

impl Decoder {
    pub const fn new(policy: DecodePolicy) -> Self {
        Self { policy }
    }

    /// Decoder that rejects any zero byte in the input
    pub const fn strict() -> Self {
        Self::new(DecodePolicy::Strict)
    }

    /// Decoder that stops at the first delimiter
    pub const fn lenient() -> Self {
        Self::new(DecodePolicy::Lenient)
    }

    pub fn policy(&self) -> DecodePolicy {
        self.policy
    }

    /// Output capacity needed for `input_len` encoded bytes
    pub fn required_capacity(&self, input_len: usize) -> usize {
        max_decoded_len(input_len)
    }

    /// Decode `input` into `output`
    ///
    /// `output.len()` is the declared capacity and must be at least
    /// `input.len() - 1`, otherwise nothing is written. Data bytes are
    /// copied as-is; only code positions are checked for zeros.
    pub fn decode(&self, input: &[u8], output: &mut [u8]) -> Result<DecodeOutcome, CobsError> {
        let required = self.required_capacity(input.len());
        if output.len() < required {
            return Err(CobsError::BadOutputLength {
                required,
                available: output.len(),
            });
        }

        let length = input.len();
        let mut read_index = 0;
        let mut write_index = 0;
        // Last byte written is a zero reconstructed from a group boundary
        let mut implied_zero = false;

        while read_index < length {
            let code = input[read_index];

            if code == FRAME_DELIMITER {
                return match self.policy {
                    DecodePolicy::Strict => Err(CobsError::ZeroByteInInput { index: read_index }),
                    DecodePolicy::Lenient => {
                        if implied_zero {
                            write_index -= 1;
                        }
                        Ok(DecodeOutcome::EofInInput(write_index))
                    }
                };
            }

            let run = usize::from(code);
            if read_index + run > length && code != 1 {
                return Err(CobsError::ZeroBeyondBuffer { index: read_index });
            }

            read_index += 1;
            let data = &input[read_index..read_index + run - 1];
            output[write_index..write_index + data.len()].copy_from_slice(data);
            read_index += data.len();
            write_index += data.len();

            implied_zero = code != FULL_GROUP_CODE && read_index != length;
            if implied_zero {
                output[write_index] = 0x00;
                write_index += 1;
            }
        }

        Ok(DecodeOutcome::Complete(write_index))
    }
}
