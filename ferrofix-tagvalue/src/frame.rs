/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Frame extraction and frame-level admission checks.
//!
//! [`FrameSplitter`] scans a byte stream for complete FIX frames, from the
//! `8=` BeginString marker through the three-digit `10=NNN` checksum trailer.
//! It recognises frames by trailer shape, not by the declared BodyLength, and
//! recovers from `10=` lookalikes by dropping one field and rescanning.
//!
//! [`validate_body_length`] and [`validate_checksum`] are the admission
//! checks applied to a complete normalized frame before it is parsed.

use crate::checksum::calculate_checksum;
use bytes::{Buf, Bytes, BytesMut};
use memchr::memchr;
use memchr::memmem;

/// SOH (Start of Header) delimiter used in FIX messages.
pub const SOH: u8 = 0x01;

/// Pipe character accepted as a human-readable stand-in for SOH.
pub const PIPE: u8 = b'|';

/// Length of the checksum trailer `<SOH>10=NNN<SOH>`.
const TRAILER_LEN: usize = 8;

/// Replaces every `|` with SOH, returning a normalized copy.
#[must_use]
pub fn normalize(message: &[u8]) -> Vec<u8> {
    message
        .iter()
        .map(|&b| if b == PIPE { SOH } else { b })
        .collect()
}

/// Parses an unsigned decimal integer consuming the entire input.
///
/// Rejects empty input, non-digits, and overflow.
#[must_use]
pub fn parse_uint(bytes: &[u8]) -> Option<u64> {
    if bytes.is_empty() {
        return None;
    }

    let mut result: u64 = 0;
    for &b in bytes {
        if !b.is_ascii_digit() {
            return None;
        }
        result = result
            .checked_mul(10)?
            .checked_add(u64::from(b - b'0'))?;
    }
    Some(result)
}

/// Extracts complete FIX frames from a byte stream.
///
/// Bytes are appended to an internal buffer (normalizing `|` to SOH) and
/// complete frames are split off as they become available. Partial input is
/// retained until completed by a later `consume` call.
#[derive(Debug, Default)]
pub struct FrameSplitter {
    buffer: BytesMut,
}

impl FrameSplitter {
    /// Creates an empty splitter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends bytes to the stream buffer and returns all complete frames.
    ///
    /// Each returned frame spans `8=` through the trailing SOH of its
    /// checksum field. Anything before the earliest `8=` is discarded; a
    /// trailer candidate whose three checksum bytes are not all digits (or
    /// that is not SOH-terminated) is skipped by dropping the stream up to
    /// and past its leading SOH and rescanning.
    pub fn consume(&mut self, bytes: &[u8]) -> Vec<Bytes> {
        self.buffer
            .extend(bytes.iter().map(|&b| if b == PIPE { SOH } else { b }));

        let mut frames = Vec::new();
        loop {
            let Some(begin) = memmem::find(&self.buffer, b"8=") else {
                self.buffer.clear();
                break;
            };
            if begin > 0 {
                self.buffer.advance(begin);
            }

            let Some(trailer) = memmem::find(&self.buffer, b"\x0110=") else {
                break;
            };
            if trailer + TRAILER_LEN > self.buffer.len() {
                break;
            }

            let digits = &self.buffer[trailer + 4..trailer + 7];
            let terminated = self.buffer[trailer + 7] == SOH;
            if !digits.iter().all(u8::is_ascii_digit) || !terminated {
                self.buffer.advance(trailer + 1);
                continue;
            }

            frames.push(self.buffer.split_to(trailer + TRAILER_LEN).freeze());
        }

        frames
    }

    /// Returns the bytes retained while waiting for a complete frame.
    #[must_use]
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }
}

/// Validates the declared BodyLength (tag 9) of a normalized frame.
///
/// BodyLength counts the bytes between the SOH terminating tag 9 and the
/// SOH preceding the checksum field.
#[must_use]
pub fn validate_body_length(frame: &[u8]) -> bool {
    let Some(begin_field_end) = memchr(SOH, frame) else {
        return false;
    };
    let Some(rel) = memchr(SOH, &frame[begin_field_end + 1..]) else {
        return false;
    };
    let body_field_end = begin_field_end + 1 + rel;

    if !frame[begin_field_end + 1..].starts_with(b"9=") {
        return false;
    }
    let Some(declared) = parse_uint(&frame[begin_field_end + 3..body_field_end]) else {
        return false;
    };

    let Some(trailer) = memmem::rfind(frame, b"\x0110=") else {
        return false;
    };
    if trailer < body_field_end {
        return false;
    }

    (trailer - body_field_end) as u64 == declared
}

/// Validates the declared CheckSum (tag 10) of a normalized frame.
///
/// The frame must end in `<SOH>10=NNN<SOH>`; the computed modulo-256 sum of
/// every byte up to the first byte of the checksum field must match the
/// declared three-digit value.
#[must_use]
pub fn validate_checksum(frame: &[u8]) -> bool {
    let Some(trailer) = memmem::rfind(frame, b"\x0110=") else {
        return false;
    };
    if trailer + TRAILER_LEN != frame.len() {
        return false;
    }

    let mut declared: u32 = 0;
    for &b in &frame[trailer + 4..trailer + 7] {
        if !b.is_ascii_digit() {
            return false;
        }
        declared = declared * 10 + u32::from(b - b'0');
    }

    u32::from(calculate_checksum(&frame[..=trailer])) == declared
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::Encoder;

    fn heartbeat_frame() -> Vec<u8> {
        let mut encoder = Encoder::new("FIX.4.4");
        encoder.put_str(35, "0");
        encoder.put_uint(34, 2);
        encoder.put_str(49, "SENDER");
        encoder.put_str(56, "TARGET");
        encoder.finish().to_vec()
    }

    #[test]
    fn test_consume_single_frame() {
        let frame = heartbeat_frame();
        let mut splitter = FrameSplitter::new();

        let frames = splitter.consume(&frame);
        assert_eq!(frames.len(), 1);
        assert_eq!(&frames[0][..], &frame[..]);
        assert!(splitter.pending().is_empty());
    }

    #[test]
    fn test_consume_partial_then_rest() {
        let frame = heartbeat_frame();
        let mut splitter = FrameSplitter::new();

        assert!(splitter.consume(&frame[..10]).is_empty());
        assert!(!splitter.pending().is_empty());

        let frames = splitter.consume(&frame[10..]);
        assert_eq!(frames.len(), 1);
        assert_eq!(&frames[0][..], &frame[..]);
    }

    #[test]
    fn test_consume_multiple_frames_one_chunk() {
        let frame = heartbeat_frame();
        let mut stream = frame.clone();
        stream.extend_from_slice(&frame);

        let mut splitter = FrameSplitter::new();
        let frames = splitter.consume(&stream);
        assert_eq!(frames.len(), 2);
    }

    #[test]
    fn test_consume_discards_leading_garbage() {
        let frame = heartbeat_frame();
        let mut stream = b"noise before".to_vec();
        stream.extend_from_slice(&frame);

        let mut splitter = FrameSplitter::new();
        let frames = splitter.consume(&stream);
        assert_eq!(frames.len(), 1);
        assert_eq!(&frames[0][..], &frame[..]);
    }

    #[test]
    fn test_consume_clears_buffer_without_begin_marker() {
        let mut splitter = FrameSplitter::new();
        assert!(splitter.consume(b"no begin string here").is_empty());
        assert!(splitter.pending().is_empty());
    }

    #[test]
    fn test_consume_normalizes_pipes() {
        let mut splitter = FrameSplitter::new();
        let frames = splitter.consume(b"8=FIX.4.4|9=5|35=0|10=123|");
        assert_eq!(frames.len(), 1);
        assert!(frames[0].contains(&SOH));
        assert!(!frames[0].contains(&PIPE));
    }

    #[test]
    fn test_consume_recovers_after_trailer_lookalike() {
        // A trailer whose checksum bytes are not three digits poisons its
        // own frame, but the following frame must still be extracted.
        let mut stream = b"8=FIX.4.4|9=5|35=X|10=ab!|".to_vec();
        let frame = heartbeat_frame();
        stream.extend_from_slice(&frame);

        let mut splitter = FrameSplitter::new();
        let frames = splitter.consume(&stream);
        assert_eq!(frames.len(), 1);
        assert_eq!(&frames[0][..], &frame[..]);
    }

    #[test]
    fn test_consume_holds_incomplete_trailer() {
        let mut splitter = FrameSplitter::new();
        assert!(splitter.consume(b"8=FIX.4.4|9=5|35=0|10=12").is_empty());
        let frames = splitter.consume(b"3|");
        assert_eq!(frames.len(), 1);
    }

    #[test]
    fn test_validate_round_trip() {
        let frame = heartbeat_frame();
        assert!(validate_body_length(&frame));
        assert!(validate_checksum(&frame));
    }

    #[test]
    fn test_validate_body_length_mismatch() {
        let frame = normalize(b"8=FIX.4.4|9=10|35=0|34=2|10=000|");
        assert!(!validate_body_length(&frame));
    }

    #[test]
    fn test_validate_checksum_mismatch() {
        let mut frame = heartbeat_frame();
        let len = frame.len();
        // Corrupt one checksum digit.
        frame[len - 2] = if frame[len - 2] == b'0' { b'1' } else { b'0' };
        assert!(!validate_checksum(&frame));
    }

    #[test]
    fn test_validate_rejects_missing_body_length_tag() {
        let frame = normalize(b"8=FIX.4.4|35=0|10=000|");
        assert!(!validate_body_length(&frame));
    }

    #[test]
    fn test_validate_rejects_truncated_frame() {
        let frame = heartbeat_frame();
        assert!(!validate_checksum(&frame[..frame.len() - 1]));
    }

    #[test]
    fn test_parse_uint() {
        assert_eq!(parse_uint(b"0"), Some(0));
        assert_eq!(parse_uint(b"12345"), Some(12345));
        assert_eq!(parse_uint(b""), None);
        assert_eq!(parse_uint(b"12x"), None);
        assert_eq!(parse_uint(b"-1"), None);
        assert_eq!(parse_uint(b"99999999999999999999999"), None);
    }
}
