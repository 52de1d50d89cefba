use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use std::fmt;

#[derive(Debug, PartialEq)]
pub enum DataUriError {
    /// The string does not start with `data:`.
    MissingScheme,
    /// The URI is not base64-encoded (`;base64,` separator absent).
    NotBase64Encoded,
    /// The payload is not valid base64.
    Decode(base64::DecodeError),
}

impl fmt::Display for DataUriError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataUriError::MissingScheme => write!(f, "not a data: URI"),
            DataUriError::NotBase64Encoded => write!(f, "data URI is not base64-encoded"),
            DataUriError::Decode(err) => write!(f, "base64 decode failed: {err}"),
        }
    }
}

impl std::error::Error for DataUriError {}

impl From<base64::DecodeError> for DataUriError {
    fn from(err: base64::DecodeError) -> Self {
        DataUriError::Decode(err)
    }
}

/// Encode raw bytes as a base64 `data:` URI with the given MIME type.
pub fn encode(mime: &str, data: &[u8]) -> String {
    format!("data:{};base64,{}", mime, BASE64.encode(data))
}

/// Encode JPEG bytes as a `data:image/jpeg;base64,` URI.
pub fn encode_jpeg(data: &[u8]) -> String {
    encode("image/jpeg", data)
}

/// Parse a base64 `data:` URI into its MIME type and decoded bytes.
///
/// # Errors
///
/// Returns `DataUriError::MissingScheme` for non-`data:` strings,
/// `DataUriError::NotBase64Encoded` when the `;base64,` separator is absent,
/// and `DataUriError::Decode` when the payload is not valid base64.
pub fn parse(uri: &str) -> Result<(String, Vec<u8>), DataUriError> {
    let rest = uri.strip_prefix("data:").ok_or(DataUriError::MissingScheme)?;
    let (mime, payload) = rest
        .split_once(";base64,")
        .ok_or(DataUriError::NotBase64Encoded)?;
    let data = BASE64.decode(payload)?;
    Ok((mime.to_string(), data))
}
