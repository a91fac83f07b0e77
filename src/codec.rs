//! Share-token codec.
//!
//! A token is the session's wire record, DEFLATE-compressed, rendered
//! with the URL-safe base64 alphabet and no padding, so it can sit in a
//! query string without percent-encoding. `encode` runs only when the
//! user formats-and-shares; `decode` runs once at startup when a token
//! is present in the URL.

use std::io::{Read, Write};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use flate2::Compression;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;

use crate::error::CodecError;
use crate::session::Session;
use crate::wire;

/// Encode a session as a URL-safe share token.
pub fn encode(session: &Session) -> String {
    let record = wire::encode_session(session);
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    // Writing into a Vec cannot fail.
    encoder.write_all(&record).expect("deflate into Vec");
    let compressed = encoder.finish().expect("deflate into Vec");
    URL_SAFE_NO_PAD.encode(compressed)
}

/// Decode a share token back into a session.
///
/// Fails with a recoverable [`CodecError`] on any malformed input; the
/// caller falls back to [`Session::default`].
pub fn decode(token: &str) -> Result<Session, CodecError> {
    let compressed = URL_SAFE_NO_PAD.decode(token)?;
    let mut record = Vec::new();
    DeflateDecoder::new(compressed.as_slice()).read_to_end(&mut record)?;
    wire::decode_session(&record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::StyleAugmentation;

    #[test]
    fn test_round_trip_default() {
        let session = Session::default();
        assert_eq!(decode(&encode(&session)).unwrap(), session);
    }

    #[test]
    fn test_round_trip_all_modes() {
        for mode in [
            StyleAugmentation::None,
            StyleAugmentation::Tailwind,
            StyleAugmentation::Normalize,
        ] {
            for typed in [false, true] {
                let session = Session {
                    style_augmentation: mode,
                    script_is_typed: typed,
                    ..Session::default()
                };
                assert_eq!(decode(&encode(&session)).unwrap(), session);
            }
        }
    }

    #[test]
    fn test_round_trip_unicode_and_empty_fields() {
        let session = Session {
            markup: "<h1>héllo — 世界 🚀</h1>".to_string(),
            style: String::new(),
            script: "// nothing\n".to_string(),
            style_augmentation: StyleAugmentation::None,
            script_is_typed: false,
        };
        assert_eq!(decode(&encode(&session)).unwrap(), session);
    }

    #[test]
    fn test_token_is_url_safe() {
        let session = Session {
            // Enough varied content that a `+` or `/` would show up in
            // a standard-alphabet encoding.
            script: (0..512).map(|i| (i % 96 + 32) as u8 as char).collect(),
            ..Session::default()
        };
        let token = encode(&session);
        assert!(!token.contains('+'));
        assert!(!token.contains('/'));
        assert!(!token.contains('='));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode("not base64!!").is_err());
    }

    #[test]
    fn test_decode_rejects_valid_base64_bad_deflate() {
        let token = URL_SAFE_NO_PAD.encode(b"plainly not a deflate stream");
        assert!(decode(&token).is_err());
    }

    #[test]
    fn test_decode_rejects_truncated_token() {
        let token = encode(&Session::default());
        assert!(decode(&token[..token.len() / 2]).is_err());
    }
}
