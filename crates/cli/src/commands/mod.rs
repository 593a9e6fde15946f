//! Command implementations.
//!
//! Every command prints its result to stdout as pretty JSON.

pub mod admin;
pub mod cart;
pub mod session;
pub mod shop;

use std::io::Write;

use serde::Serialize;
use thiserror::Error;

use tienda_storefront::{ApiError, ConfigError};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Client configuration is missing or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The backend rejected the call or could not be reached.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// `--username` was given without a password.
    #[error("Missing environment variable: {0}")]
    MissingPassword(&'static str),

    /// Result could not be serialized.
    #[error("Failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),

    /// Writing to stdout failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Write `value` to stdout as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
