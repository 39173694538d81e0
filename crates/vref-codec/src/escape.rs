//! Text escaping for encoded references
//!
//! - plain: `%XX` for the plain grammar's delimiters and `%` itself
//! - url-native: `_XX` for every UTF-8 byte outside `[A-Za-z0-9.]`
//!
//! Hex digits are emitted uppercase and accepted in either case.

use crate::encoding::Encoding;
use crate::error::CodecError;
use std::fmt::Write;

/// Characters with grammar meaning in plain references
pub(crate) const PLAIN_RESERVED: &[char] = &['%', ':', '(', ')', ','];

const PLAIN_ESCAPE: char = '%';
const URL_ESCAPE: u8 = b'_';

/// Escape `text` for the plain encoding
pub(crate) fn escape_plain(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if PLAIN_RESERVED.contains(&c) {
            // reserved chars are ascii
            let _ = write!(out, "{PLAIN_ESCAPE}{:02X}", c as u32);
        } else {
            out.push(c);
        }
    }
    out
}

/// Reverse [`escape_plain`]
pub(crate) fn unescape_plain(text: &str) -> Result<String, CodecError> {
    if !text.contains(PLAIN_ESCAPE) {
        return Ok(text.to_string());
    }
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let byte = hex_pair(bytes, i + 1).ok_or_else(|| CodecError::bad_escape(Encoding::Plain, text))?;
            if !byte.is_ascii() {
                return Err(CodecError::bad_escape(Encoding::Plain, text));
            }
            out.push(byte);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).map_err(|_| CodecError::bad_escape(Encoding::Plain, text))
}

#[inline]
fn is_url_safe(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'.'
}

/// Escape `text` for the url-native encodings
pub(crate) fn escape_url(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for &byte in text.as_bytes() {
        if is_url_safe(byte) {
            out.push(char::from(byte));
        } else {
            let _ = write!(out, "{}{byte:02X}", char::from(URL_ESCAPE));
        }
    }
    out
}

/// Reverse [`escape_url`]
///
/// Rejects any raw character [`escape_url`] would have escaped.
pub(crate) fn unescape_url(encoding: Encoding, text: &str) -> Result<String, CodecError> {
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let byte = bytes[i];
        if byte == URL_ESCAPE {
            let decoded = hex_pair(bytes, i + 1).ok_or_else(|| CodecError::bad_escape(encoding, text))?;
            out.push(decoded);
            i += 3;
        } else if is_url_safe(byte) {
            out.push(byte);
            i += 1;
        } else {
            return Err(CodecError::bad_escape(encoding, text));
        }
    }
    String::from_utf8(out).map_err(|_| CodecError::bad_escape(encoding, text))
}

fn hex_pair(bytes: &[u8], at: usize) -> Option<u8> {
    let hi = char::from(*bytes.get(at)?).to_digit(16)?;
    let lo = char::from(*bytes.get(at + 1)?).to_digit(16)?;
    u8::try_from(hi * 16 + lo).ok()
}
