//! Command execution
//!
//! Reads the input, runs the codec and writes the result in the requested
//! format. The codec calls are kept in small functions returning `Outcome`
//! so they can be tested without touching stdin/stdout.

use crate::app_error::{AppError, Result};
use crate::cli::{Cli, Command};
use crate::config::{Config, InputFormat, OutputFormat};
use crate::hex;
use bytes::BytesMut;
use cobs_codec::constants::{FRAME_DELIMITER, INPLACE_MAX_PAYLOAD, INPLACE_SENTINEL};
use cobs_codec::{CobsError, DecodePolicy, Encoder, FrameCodec, StatusCode, Trailer};
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Result of one codec operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub data: Vec<u8>,
    pub status: StatusCode,
}

/// JSON report written with `--output-format json`
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub operation: &'static str,
    pub input_len: usize,
    pub output_len: usize,
    pub status: &'static str,
    pub data: &'a str,
}

/// Run the selected command
pub fn run(cli: &Cli, config: &Config) -> Result<()> {
    let input_format = cli.input_format.unwrap_or(config.io.input_format);
    let output_format = cli.output_format.unwrap_or(config.io.output_format);
    let codec = FrameCodec::new(config.io.max_frame_size);

    let input = read_input(cli.command.input().map(PathBuf::as_path), input_format)?;

    let (operation, outcome) = match &cli.command {
        Command::Encode { no_delimiter, .. } => {
            let trailer = if *no_delimiter || !config.encode.delimiter {
                Trailer::Bare
            } else {
                Trailer::Delimited
            };
            ("encode", encode(&codec, &input, trailer)?)
        }
        Command::Decode { lenient, .. } => {
            let policy = if *lenient {
                DecodePolicy::Lenient
            } else {
                config.decode.policy
            };
            ("decode", decode(&codec.with_policy(policy), &input)?)
        }
        Command::EncodeInPlace { .. } => ("encode-in-place", encode_in_place(&input)?),
    };

    info!(
        operation,
        input_len = input.len(),
        output_len = outcome.data.len(),
        status = outcome.status.name(),
        "Done"
    );

    write_output(operation, input.len(), &outcome, output_format)
}

/// Encode `input` as one frame
pub fn encode(codec: &FrameCodec, input: &[u8], trailer: Trailer) -> Result<Outcome> {
    let mut data = Vec::new();
    codec.encode(input, trailer, &mut data)?;
    Ok(Outcome {
        data,
        status: StatusCode::Success,
    })
}

/// Decode one frame
///
/// With the strict policy a single trailing delimiter is dropped first, so
/// output of `encode` can be fed back unchanged.
pub fn decode(codec: &FrameCodec, input: &[u8]) -> Result<Outcome> {
    let frame = match (codec.policy(), input.split_last()) {
        (DecodePolicy::Strict, Some((&FRAME_DELIMITER, body))) => {
            debug!("Stripping trailing frame delimiter");
            body
        }
        _ => input,
    };

    let mut decoded = BytesMut::new();
    let outcome = codec.decode(frame, &mut decoded)?;
    Ok(Outcome {
        data: decoded.to_vec(),
        status: outcome.status(),
    })
}

/// Encode `input` with the in-place encoder
///
/// Builds the sentinel-framed buffer the in-place encoder expects.
pub fn encode_in_place(input: &[u8]) -> Result<Outcome> {
    if input.len() > INPLACE_MAX_PAYLOAD {
        return Err(AppError::ConfigValidation {
            field: "input",
            reason: format!(
                "in-place payload must be at most {} bytes, got {}",
                INPLACE_MAX_PAYLOAD,
                input.len()
            ),
        });
    }

    let mut buf = Vec::with_capacity(input.len() + 2);
    buf.push(INPLACE_SENTINEL);
    buf.extend_from_slice(input);
    buf.push(INPLACE_SENTINEL);

    Encoder::delimited().encode_in_place(&mut buf)?;

    Ok(Outcome {
        data: buf,
        status: StatusCode::Success,
    })
}

fn read_input(path: Option<&Path>, format: InputFormat) -> Result<Vec<u8>> {
    let raw = match path {
        Some(path) => fs::read(path).map_err(|e| AppError::Io {
            path: path.to_path_buf(),
            source: e,
        })?,
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .map_err(|e| AppError::Io {
                    path: PathBuf::from("<stdin>"),
                    source: e,
                })?;
            buf
        }
    };

    match format {
        InputFormat::Raw => Ok(raw),
        InputFormat::Hex => {
            let text = String::from_utf8(raw).map_err(|e| AppError::InvalidHex {
                position: e.utf8_error().valid_up_to(),
                reason: "input is not UTF-8 text".into(),
            })?;
            hex::parse(&text)
        }
    }
}

/// Render an outcome in the requested format
pub fn render(
    operation: &'static str,
    input_len: usize,
    outcome: &Outcome,
    format: OutputFormat,
) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Raw => Ok(outcome.data.clone()),
        OutputFormat::Hex => {
            let mut text = hex::format(&outcome.data);
            text.push('\n');
            Ok(text.into_bytes())
        }
        OutputFormat::Json => {
            let data = hex::format(&outcome.data);
            let report = Report {
                operation,
                input_len,
                output_len: outcome.data.len(),
                status: outcome.status.name(),
                data: &data,
            };
            let mut json =
                serde_json::to_vec_pretty(&report).map_err(|e| AppError::Json { source: e })?;
            json.push(b'\n');
            Ok(json)
        }
    }
}

fn write_output(
    operation: &'static str,
    input_len: usize,
    outcome: &Outcome,
    format: OutputFormat,
) -> Result<()> {
    let bytes = render(operation, input_len, outcome, format)?;
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(&bytes)
        .and_then(|()| stdout.flush())
        .map_err(|e| AppError::Io {
            path: PathBuf::from("<stdout>"),
            source: e,
        })
}

/// Map an error to the C status it corresponds to, if any
pub fn status_of(err: &AppError) -> Option<StatusCode> {
    match err {
        AppError::Codec(CobsError::FrameTooLarge { .. }) => None,
        AppError::Codec(e) => Some(StatusCode::from(*e)),
        _ => None,
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_delimited_and_bare() {
        let codec = FrameCodec::default();
        let input = [0x11, 0x22, 0x00, 0x33];

        let out = encode(&codec, &input, Trailer::Delimited).unwrap();
        assert_eq!(out.data, vec![0x03, 0x11, 0x22, 0x02, 0x33, 0x00]);

        let out = encode(&codec, &input, Trailer::Bare).unwrap();
        assert_eq!(out.data, vec![0x03, 0x11, 0x22, 0x02, 0x33]);
    }

    #[test]
    fn test_decode_strict_strips_delimiter() {
        let codec = FrameCodec::default();
        let out = decode(&codec, &[0x03, 0x11, 0x22, 0x02, 0x33, 0x00]).unwrap();
        assert_eq!(out.data, vec![0x11, 0x22, 0x00, 0x33]);
        assert_eq!(out.status, StatusCode::Success);
    }

    #[test]
    fn test_decode_strict_rejects_embedded_zero() {
        let codec = FrameCodec::default();
        let err = decode(&codec, &[0x02, 0x11, 0x00, 0x02, 0x22]).unwrap_err();
        assert_eq!(status_of(&err), Some(StatusCode::ZeroByteInInput));
    }

    #[test]
    fn test_decode_lenient_reports_eof() {
        let codec = FrameCodec::default().with_policy(DecodePolicy::Lenient);
        let out = decode(&codec, &[0x03, 0x11, 0x22, 0x02, 0x33, 0x00]).unwrap();
        assert_eq!(out.data, vec![0x11, 0x22, 0x00, 0x33]);
        assert_eq!(out.status, StatusCode::EofInInput);
    }

    #[test]
    fn test_encode_in_place() {
        let out = encode_in_place(&[0x11, 0x22, 0x00, 0x33]).unwrap();
        assert_eq!(out.data, vec![0x03, 0x11, 0x22, 0x02, 0x33, 0x00]);
    }

    #[test]
    fn test_encode_in_place_too_large() {
        let err = encode_in_place(&[0x01; INPLACE_MAX_PAYLOAD + 1]).unwrap_err();
        assert!(matches!(err, AppError::ConfigValidation { field: "input", .. }));
    }

    #[test]
    fn test_render_json() {
        let outcome = Outcome {
            data: vec![0x01, 0x00],
            status: StatusCode::Success,
        };
        let bytes = render("encode", 0, &outcome, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value["operation"], "encode");
        assert_eq!(value["input_len"], 0);
        assert_eq!(value["output_len"], 2);
        assert_eq!(value["status"], "success");
        assert_eq!(value["data"], "01 00");
    }

    #[test]
    fn test_render_hex_and_raw() {
        let outcome = Outcome {
            data: vec![0x02, 0x11],
            status: StatusCode::Success,
        };
        assert_eq!(
            render("encode", 1, &outcome, OutputFormat::Hex).unwrap(),
            b"02 11\n".to_vec()
        );
        assert_eq!(
            render("encode", 1, &outcome, OutputFormat::Raw).unwrap(),
            vec![0x02, 0x11]
        );
    }
}
