//! File helpers behind the `encode-image` and `decode-image` binaries.

use crate::error::{Result, TryOnError};
use base64::{engine::general_purpose::STANDARD, Engine};
use std::fs;
use std::path::Path;

/// Reads a file and returns its contents as standard base64.
pub fn encode_file(path: impl AsRef<Path>) -> Result<String> {
    let bytes = fs::read(path)?;
    Ok(STANDARD.encode(bytes))
}

/// Decodes a base64 text file and writes the raw bytes to `output`.
/// Returns the number of bytes written.
pub fn decode_file(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<usize> {
    let text = fs::read_to_string(input)?;
    // Tolerate line-wrapped output from other encoders.
    let compact: String = text.split_whitespace().collect();
    let bytes = STANDARD.decode(compact).map_err(|e| TryOnError::Decode {
        field: "input file",
        message: e.to_string(),
    })?;
    fs::write(output, &bytes)?;
    Ok(bytes.len())
}
