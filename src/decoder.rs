//! gfwlist payload decoding.
//!
//! The published gfwlist is base64 wrapped at 64 columns. Local copies are
//! often already decoded, so the payload is sniffed first: base64 never
//! contains `.`, while any real rule list does.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::DecodeError;

/// Decode a gfwlist payload, returning the plain-text rule list.
///
/// Content containing `.` is returned unchanged. Otherwise base64 decoding
/// is attempted and, if it fails, the original content is returned.
pub fn decode_gfwlist(content: &str) -> String {
    if content.contains('.') {
        return content.to_string();
    }

    match try_decode_base64(content) {
        Ok(decoded) => decoded,
        Err(e) => {
            log::debug!("gfwlist is not base64, using it as plain text: {}", e);
            content.to_string()
        }
    }
}

/// Decode base64 content into a UTF-8 string.
///
/// ASCII whitespace is ignored, so line-wrapped payloads decode as one blob.
pub fn try_decode_base64(content: &str) -> Result<String, DecodeError> {
    let compact: Vec<u8> = content
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    let bytes = STANDARD.decode(compact)?;
    Ok(String::from_utf8(bytes)?)
}
