//! Binary wire format for session records.
//!
//! Layout: one format-version byte, then a sequence of fields. Each
//! field is a tag byte, a varint payload length, and that many payload
//! bytes. Field identity is carried by the tag, not the position:
//! readers skip tags they do not know, so a newer writer can add fields
//! without breaking older readers, and fields absent from an older
//! record keep their defaults.

use crate::error::CodecError;
use crate::session::{Session, StyleAugmentation};

/// Current record format version.
pub const WIRE_VERSION: u8 = 1;

const TAG_MARKUP: u8 = 1;
const TAG_STYLE: u8 = 2;
const TAG_SCRIPT: u8 = 3;
const TAG_AUGMENTATION: u8 = 4;
const TAG_TYPED: u8 = 5;

/// Append `value` as a little-endian base-128 varint.
pub fn encode_varint(mut value: u64, out: &mut Vec<u8>) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

/// Read a varint starting at `pos`, advancing it past the last byte.
pub fn decode_varint(bytes: &[u8], pos: &mut usize) -> Result<u64, CodecError> {
    let mut value = 0u64;
    let mut shift = 0u32;
    loop {
        let byte = *bytes.get(*pos).ok_or(CodecError::Truncated)?;
        *pos += 1;
        if shift >= 64 {
            return Err(CodecError::InvalidField("varint"));
        }
        value |= u64::from(byte & 0x7f) << shift;
        if byte & 0x80 == 0 {
            return Ok(value);
        }
        shift += 7;
    }
}

fn push_field(out: &mut Vec<u8>, tag: u8, payload: &[u8]) {
    out.push(tag);
    encode_varint(payload.len() as u64, out);
    out.extend_from_slice(payload);
}

/// Serialize a session to wire bytes.
pub fn encode_session(session: &Session) -> Vec<u8> {
    let mut out = Vec::with_capacity(
        16 + session.markup.len() + session.style.len() + session.script.len(),
    );
    out.push(WIRE_VERSION);
    push_field(&mut out, TAG_MARKUP, session.markup.as_bytes());
    push_field(&mut out, TAG_STYLE, session.style.as_bytes());
    push_field(&mut out, TAG_SCRIPT, session.script.as_bytes());
    push_field(&mut out, TAG_AUGMENTATION, &[session.style_augmentation.code()]);
    push_field(&mut out, TAG_TYPED, &[session.script_is_typed as u8]);
    out
}

fn utf8_field(payload: &[u8], name: &'static str) -> Result<String, CodecError> {
    String::from_utf8(payload.to_vec()).map_err(|_| CodecError::InvalidField(name))
}

fn byte_field(payload: &[u8], name: &'static str) -> Result<u8, CodecError> {
    match payload {
        [value] => Ok(*value),
        _ => Err(CodecError::InvalidField(name)),
    }
}

/// Deserialize wire bytes back into a session.
///
/// Fields missing from the record keep their defaults; unknown tags are
/// skipped over.
pub fn decode_session(bytes: &[u8]) -> Result<Session, CodecError> {
    let mut pos = 0usize;
    let version = *bytes.first().ok_or(CodecError::Truncated)?;
    pos += 1;
    if version != WIRE_VERSION {
        return Err(CodecError::UnsupportedVersion(version));
    }

    let mut session = Session::default();
    while pos < bytes.len() {
        let tag = bytes[pos];
        pos += 1;
        let len = decode_varint(bytes, &mut pos)? as usize;
        let end = pos.checked_add(len).ok_or(CodecError::Truncated)?;
        if end > bytes.len() {
            return Err(CodecError::Truncated);
        }
        let payload = &bytes[pos..end];
        pos = end;

        match tag {
            TAG_MARKUP => session.markup = utf8_field(payload, "markup")?,
            TAG_STYLE => session.style = utf8_field(payload, "style")?,
            TAG_SCRIPT => session.script = utf8_field(payload, "script")?,
            TAG_AUGMENTATION => {
                let code = byte_field(payload, "style_augmentation")?;
                session.style_augmentation = StyleAugmentation::from_code(code)
                    .ok_or(CodecError::InvalidField("style_augmentation"))?;
            }
            TAG_TYPED => {
                session.script_is_typed = match byte_field(payload, "script_is_typed")? {
                    0 => false,
                    1 => true,
                    _ => return Err(CodecError::InvalidField("script_is_typed")),
                };
            }
            // Unknown field from a newer writer.
            _ => {}
        }
    }

    Ok(session)
}
