//! Command-line interface definition using clap
//!
//! Provides structured argument parsing with automatic help generation.

use crate::config::{InputFormat, OutputFormat};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

// =============================================================================
// CLI Definition
// =============================================================================

/// Consistent Overhead Byte Stuffing encoder/decoder
#[derive(Parser, Debug)]
#[command(name = "cobs")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (default: ./cobs.toml if present)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// How input bytes are read (overrides config)
    #[arg(long, value_enum, global = true)]
    pub input_format: Option<InputFormat>,

    /// How results are written (overrides config)
    #[arg(long, value_enum, global = true)]
    pub output_format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Command,
}

/// Codec operations
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Stuff a payload into a COBS frame
    Encode {
        /// Do not append the 0x00 frame delimiter
        #[arg(long)]
        no_delimiter: bool,

        /// Input file (stdin if omitted)
        input: Option<PathBuf>,
    },

    /// Recover a payload from a COBS frame
    ///
    /// In strict mode one trailing 0x00 delimiter is removed before decoding.
    Decode {
        /// Stop at the first 0x00 instead of rejecting it
        #[arg(long)]
        lenient: bool,

        /// Input file (stdin if omitted)
        input: Option<PathBuf>,
    },

    /// Stuff a payload using the single-buffer in-place encoder
    ///
    /// The payload is wrapped in sentinel bytes, so it must fit a safe
    /// in-place buffer (at most 254 bytes).
    EncodeInPlace {
        /// Input file (stdin if omitted)
        input: Option<PathBuf>,
    },
}

impl Command {
    /// Input path of the selected command
    pub fn input(&self) -> Option<&PathBuf> {
        match self {
            Self::Encode { input, .. }
            | Self::Decode { input, .. }
            | Self::EncodeInPlace { input } => input.as_ref(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
