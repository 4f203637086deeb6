//! COBS (Consistent Overhead Byte Stuffing) codec
//!
//! Encodes data so 0x00 never appears inside a frame, allowing it as a
//! frame delimiter on byte-oriented transports.
//!
//! - **Encoder**: buffer-to-buffer stuffing, plus an in-place transform
//! - **Decoder**: buffer-to-buffer unstuffing with a strict or lenient policy
//! - **Frame**: `Vec`/`BytesMut` helpers on top of the two above
//!
//! The encoder and decoder never allocate and keep no state between calls.
//! The caller's output slice length is the declared capacity; the returned
//! count is the number of bytes written.
//!
//! # Frame layout
//!
//! ```text
//! [code][code-1 data bytes][code][code-1 data bytes]...[0x00]?
//! ```
//!
//! A code of `0xFF` carries 254 data bytes with no implied zero. Any other
//! code implies a zero after its data, except for the last group.

pub mod decoder;
pub mod encoder;
pub mod frame;

pub use decoder::{DecodeOutcome, DecodePolicy, Decoder};
pub use encoder::Encoder;
pub use frame::{decode_frame, encode_frame, FrameCodec};

use crate::constants::MAX_RUN;
use serde::{Deserialize, Serialize};

/// Whether the encoder appends a `0x00` delimiter after the last code group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trailer {
    /// Frame ends with an explicit delimiter byte
    #[default]
    Delimited,
    /// No delimiter; length is carried out-of-band or added by a framing layer
    Bare,
}

impl Trailer {
    /// Fixed overhead in bytes (the first code byte, plus the delimiter if any)
    pub const fn overhead(self) -> usize {
        match self {
            Self::Delimited => 2,
            Self::Bare => 1,
        }
    }
}

/// Largest possible encoded size for `raw_len` input bytes
///
/// One extra code byte per 254 input bytes, plus the fixed overhead.
/// Encoding a payload with no zero bytes produces exactly this many bytes.
///
/// ```
/// use cobs_codec::codec::{max_encoded_len, Trailer};
///
/// assert_eq!(max_encoded_len(0, Trailer::Delimited), 2);
/// assert_eq!(max_encoded_len(254, Trailer::Bare), 256);
/// ```
pub const fn max_encoded_len(raw_len: usize, trailer: Trailer) -> usize {
    raw_len + raw_len / MAX_RUN + trailer.overhead()
}

/// Capacity a decoder needs for `encoded_len` input bytes
pub const fn max_decoded_len(encoded_len: usize) -> usize {
    encoded_len.saturating_sub(1)
}
