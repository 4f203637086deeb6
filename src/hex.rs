//! Hex text input/output

use crate::app_error::{AppError, Result};

/// Parse hex text into bytes
///
/// Accepts contiguous pairs (`0311`) or pairs separated by whitespace
/// (`03 11`), with an optional `0x` prefix per token.
pub fn parse(text: &str) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(text.len() / 2);

    for token in text.split_whitespace() {
        let digits = token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))
            .unwrap_or(token);

        let position = bytes.len();
        let decoded = ::hex::decode(digits).map_err(|e| invalid(position, token, e))?;
        bytes.extend_from_slice(&decoded);
    }

    Ok(bytes)
}

fn invalid(position: usize, token: &str, err: ::hex::FromHexError) -> AppError {
    match err {
        ::hex::FromHexError::InvalidHexCharacter { c, index } => AppError::InvalidHex {
            position: position + index / 2,
            reason: format!("'{}' is not a hex digit in '{}'", c, token),
        },
        ::hex::FromHexError::OddLength | ::hex::FromHexError::InvalidStringLength => {
            AppError::InvalidHex {
                position,
                reason: format!("odd number of digits in '{}'", token),
            }
        }
    }
}

/// Format bytes as space separated uppercase hex pairs
pub fn format(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| ::hex::encode_upper([*b]))
        .collect::<Vec<_>>()
        .join(" ")
}
