//! Error types.

use thiserror::Error;

/// Failure while decoding a share token.
///
/// Every variant is recoverable: a host that receives one falls back to
/// the default session rather than crashing.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The token is not valid URL-safe base64.
    #[error("invalid session payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The compressed payload is truncated or corrupt.
    #[error("invalid session payload: {0}")]
    Decompress(#[from] std::io::Error),

    /// The binary record ended mid-field.
    #[error("invalid session payload: record is truncated")]
    Truncated,

    /// The record was written with a format this build does not know.
    #[error("invalid session payload: unsupported record version {0}")]
    UnsupportedVersion(u8),

    /// A field payload failed validation.
    #[error("invalid session payload: bad value for field `{0}`")]
    InvalidField(&'static str),
}
