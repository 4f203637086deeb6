//! cobs - Consistent Overhead Byte Stuffing from the command line
//!
//! Usage:
//!   cobs encode [--no-delimiter] [INPUT]   Stuff a payload into a frame
//!   cobs decode [--lenient] [INPUT]        Recover a payload from a frame
//!   cobs encode-in-place [INPUT]           Stuff using the in-place encoder
//!
//! Input is hex text by default (`--input-format raw` for binary).

mod app_error;
mod cli;
mod commands;
mod config;
mod hex;
mod logging;

use clap::Parser;
use std::process::ExitCode;
use tracing::debug;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    logging::init_tracing(cli.verbose);

    let result = config::load(cli.config.as_deref()).and_then(|cfg| commands::run(&cli, &cfg));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match commands::status_of(&e) {
                Some(status) => debug!(status = status.as_raw(), "Codec failure"),
                None => debug!("Command failed"),
            }
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
