/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Lenient field tokenizer.
//!
//! Splits a normalized frame into ordered `(tag, value)` pairs. Tokens whose
//! tag prefix does not parse as a positive integer consuming every byte
//! before `=` are silently skipped; this is the decoder-path behavior. The
//! session controller applies its own strict parse where such tokens are
//! fatal.

use crate::frame::SOH;
use ferrofix_core::FieldRef;
use memchr::memchr;
use smallvec::SmallVec;

/// Inline capacity for tokenized frames; typical session messages carry
/// well under 32 fields.
pub type FieldVec<'a> = SmallVec<[FieldRef<'a>; 32]>;

/// Parses a tag number from ASCII bytes.
///
/// # Returns
/// The parsed tag, or `None` when the bytes are empty, contain a non-digit,
/// overflow, or encode zero.
#[inline]
#[must_use]
pub fn parse_tag(bytes: &[u8]) -> Option<u32> {
    if bytes.is_empty() || bytes.len() > 10 {
        return None;
    }

    let mut result: u32 = 0;
    for &b in bytes {
        if !b.is_ascii_digit() {
            return None;
        }
        result = result.checked_mul(10)?.checked_add(u32::from(b - b'0'))?;
    }

    if result == 0 {
        return None;
    }
    Some(result)
}

/// Splits a normalized frame into ordered field references.
///
/// The final token may be unterminated (no trailing SOH); it is still
/// yielded.
#[must_use]
pub fn split_tags(message: &[u8]) -> FieldVec<'_> {
    let mut result = FieldVec::new();

    let mut start = 0;
    while start < message.len() {
        let rest = &message[start..];
        let token_len = memchr(SOH, rest).unwrap_or(rest.len());
        let token = &rest[..token_len];

        if let Some(eq) = memchr(b'=', token)
            && let Some(tag) = parse_tag(&token[..eq])
        {
            result.push(FieldRef::new(tag, &token[eq + 1..]));
        }

        if token_len == rest.len() {
            break;
        }
        start += token_len + 1;
    }

    result
}
