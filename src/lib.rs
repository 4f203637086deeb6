//! Consistent Overhead Byte Stuffing
//!
//! Removes every 0x00 from a payload so a single 0x00 can delimit frames on
//! serial lines, sockets and ring buffers.
//!
//! ```
//! use cobs_codec::codec::{Decoder, Encoder};
//!
//! let payload = [0x11, 0x22, 0x00, 0x33];
//! let mut encoded = [0u8; 8];
//! let n = Encoder::delimited().encode(&payload, &mut encoded).unwrap();
//! assert_eq!(&encoded[..n], &[0x03, 0x11, 0x22, 0x02, 0x33, 0x00]);
//!
//! let mut decoded = [0u8; 8];
//! let outcome = Decoder::strict().decode(&encoded[..n - 1], &mut decoded).unwrap();
//! assert_eq!(&decoded[..outcome.decoded_len()], &payload);
//! ```

pub mod codec;
pub mod constants;
pub mod error;
pub mod ffi;

pub use codec::{
    max_encoded_len, DecodeOutcome, DecodePolicy, Decoder, Encoder, FrameCodec, Trailer,
};
pub use error::{CobsError, StatusCode};
