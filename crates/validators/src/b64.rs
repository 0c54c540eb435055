//! Base64 decoding the way the emulated service does it.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use thiserror::Error;

/// The input cannot be decoded the way the service decodes base64.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid base64 data")]
pub struct Base64DecodeError;

/// Decode base64 somewhat like the service does.
///
/// The service rejects any character outside the standard alphabet, but is
/// forgiving about padding: a length of 2 or 3 mod 4 gets padded out, and a
/// length of 1 mod 4 has its trailing character dropped.
pub fn decode_base64(encoded_data: &str) -> Result<Vec<u8>, Base64DecodeError> {
    let acceptable = |c: char| c.is_ascii_alphanumeric() || c == '+' || c == '/' || c == '=';
    if !encoded_data.chars().all(acceptable) {
        return Err(Base64DecodeError);
    }

    let modified = match encoded_data.len() % 4 {
        0 => encoded_data.to_owned(),
        1 => encoded_data[..encoded_data.len() - 1].to_owned(),
        2 => format!("{encoded_data}=="),
        _ => format!("{encoded_data}="),
    };
    BASE64.decode(modified).map_err(|_| Base64DecodeError)
}
