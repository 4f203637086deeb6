//! Frame helpers over growable buffers
//!
//! Wraps the slice codec for callers holding a `Vec<u8>` or `BytesMut`.
//! Output buffers are sized up front and truncated to the written length, so
//! they can be reused across frames without reallocating.

use super::{
    max_decoded_len, max_encoded_len, DecodeOutcome, DecodePolicy, Decoder, Encoder, Trailer,
};
use crate::constants::MAX_FRAME_SIZE;
use crate::error::CobsError;
use bytes::BytesMut;
use tracing::debug;

/// Frame codec with a size limit and a decode policy
#[derive(Debug, Clone, Copy)]
pub struct FrameCodec {
    max_size: usize,
    policy: DecodePolicy,
}

impl FrameCodec {
    /// Create a codec rejecting encoded frames larger than `max_size`
    pub fn new(max_size: usize) -> Self {
        Self {
            max_size,
            policy: DecodePolicy::Strict,
        }
    }

    pub fn with_policy(mut self, policy: DecodePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn policy(&self) -> DecodePolicy {
        self.policy
    }

    /// Encode `data` into `output` with the given trailer
    ///
    /// Clears `output` first. Returns number of bytes written.
    pub fn encode(
        &self,
        data: &[u8],
        trailer: Trailer,
        output: &mut Vec<u8>,
    ) -> Result<usize, CobsError> {
        let required = max_encoded_len(data.len(), trailer);
        if required > self.max_size {
            debug!(size = required, max = self.max_size, "COBS frame too large to encode");
            return Err(CobsError::FrameTooLarge {
                size: required,
                max: self.max_size,
            });
        }

        output.clear();
        output.resize(required, 0);
        let written = Encoder::new(trailer).encode(data, output)?;
        output.truncate(written);
        Ok(written)
    }

    /// Decode `encoded` and append the payload to `output`
    ///
    /// Extends the buffer (does not clear - caller should clear if needed).
    /// On error `output` is restored to its original length.
    pub fn decode(
        &self,
        encoded: &[u8],
        output: &mut BytesMut,
    ) -> Result<DecodeOutcome, CobsError> {
        if encoded.len() > self.max_size {
            debug!(size = encoded.len(), max = self.max_size, "COBS frame too large to decode");
            return Err(CobsError::FrameTooLarge {
                size: encoded.len(),
                max: self.max_size,
            });
        }

        let start_len = output.len();
        output.resize(start_len + max_decoded_len(encoded.len()), 0);

        match Decoder::new(self.policy).decode(encoded, &mut output[start_len..]) {
            Ok(outcome) => {
                output.truncate(start_len + outcome.decoded_len());
                Ok(outcome)
            }
            Err(err) => {
                debug!(error = %err, len = encoded.len(), "Invalid COBS frame");
                output.truncate(start_len);
                Err(err)
            }
        }
    }
}

impl Default for FrameCodec {
    fn default() -> Self {
        Self::new(MAX_FRAME_SIZE)
    }
}

/// Encode data into a delimited frame (clears `output`)
///
/// Returns number of bytes written, including the trailing 0x00.
pub fn encode_frame(data: &[u8], output: &mut Vec<u8>) -> Result<usize, CobsError> {
    FrameCodec::default().encode(data, Trailer::Delimited, output)
}

/// Decode a frame into `output` (strict)
///
/// Input should NOT include trailing delimiter.
/// Returns number of bytes appended.
pub fn decode_frame(encoded: &[u8], output: &mut BytesMut) -> Result<usize, CobsError> {
    FrameCodec::default()
        .decode(encoded, output)
        .map(DecodeOutcome::decoded_len)
}
