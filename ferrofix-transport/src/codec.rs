/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Tokio codec for FIX message framing over TCP.
//!
//! Unlike the session controller's trailer-guided splitter, this codec
//! trusts the declared BodyLength (tag 9) to locate the frame end; DATA
//! fields may legally contain SOH bytes, which defeats trailer scanning on
//! a real wire. Writes are all-or-nothing per frame.

use bytes::{BufMut, BytesMut};
use ferrofix_tagvalue::{SOH, calculate_checksum, parse_checksum};
use memchr::memchr;
use thiserror::Error;
use tokio_util::codec::{Decoder, Encoder};

/// Length of the checksum trailer `10=NNN<SOH>`.
const TRAILER_LEN: usize = 7;

/// Errors that can occur during codec operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Invalid BeginString field.
    #[error("invalid begin string: message must start with 8=")]
    InvalidBeginString,

    /// Missing BodyLength field.
    #[error("missing body length field (tag 9)")]
    MissingBodyLength,

    /// Invalid BodyLength value.
    #[error("invalid body length value")]
    InvalidBodyLength,

    /// Invalid checksum trailer format.
    #[error("invalid checksum trailer")]
    InvalidChecksum,

    /// Checksum mismatch.
    #[error("checksum mismatch: calculated {calculated}, declared {declared}")]
    ChecksumMismatch {
        /// Calculated checksum.
        calculated: u8,
        /// Declared checksum in message.
        declared: u8,
    },

    /// Message exceeds maximum size.
    #[error("message too large: {size} bytes exceeds maximum {max_size}")]
    MessageTooLarge {
        /// Actual message size.
        size: usize,
        /// Maximum allowed size.
        max_size: usize,
    },

    /// I/O error.
    #[error("io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Tokio codec for FIX message framing.
///
/// Locates frames via BeginString and BodyLength and optionally validates
/// the checksum before yielding the frame.
#[derive(Debug, Clone)]
pub struct FixCodec {
    /// Maximum message size in bytes.
    max_message_size: usize,
    /// Whether to validate checksums.
    validate_checksum: bool,
}

impl FixCodec {
    /// Creates a codec with a 1 MiB frame cap and checksum validation on.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_message_size: 1024 * 1024,
            validate_checksum: true,
        }
    }

    /// Sets the maximum message size.
    #[must_use]
    pub const fn with_max_message_size(mut self, size: usize) -> Self {
        self.max_message_size = size;
        self
    }

    /// Sets whether to validate checksums.
    #[must_use]
    pub const fn with_checksum_validation(mut self, validate: bool) -> Self {
        self.validate_checksum = validate;
        self
    }
}

impl Default for FixCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for FixCodec {
    type Item = BytesMut;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        // Shortest well-formed frame: 8=F|9=1|X|10=NNN| and change.
        if src.len() < 16 {
            return Ok(None);
        }

        if &src[0..2] != b"8=" {
            return Err(CodecError::InvalidBeginString);
        }

        let Some(first_soh) = memchr(SOH, src) else {
            return Ok(None);
        };

        let body_len_start = first_soh + 1;
        if src.len() < body_len_start + 3 {
            return Ok(None);
        }
        if &src[body_len_start..body_len_start + 2] != b"9=" {
            return Err(CodecError::MissingBodyLength);
        }

        let Some(rel_soh) = memchr(SOH, &src[body_len_start..]) else {
            return Ok(None);
        };
        let body_len_soh = body_len_start + rel_soh;

        let body_length: usize = std::str::from_utf8(&src[body_len_start + 2..body_len_soh])
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or(CodecError::InvalidBodyLength)?;

        // Header through BodyLength, declared body, then 10=NNN|.
        let total_length = body_len_soh + 1 + body_length + TRAILER_LEN;
        if total_length > self.max_message_size {
            return Err(CodecError::MessageTooLarge {
                size: total_length,
                max_size: self.max_message_size,
            });
        }

        if src.len() < total_length {
            src.reserve(total_length - src.len());
            return Ok(None);
        }

        if self.validate_checksum {
            let trailer_start = total_length - TRAILER_LEN;
            if &src[trailer_start..trailer_start + 3] != b"10=" {
                return Err(CodecError::InvalidChecksum);
            }
            let declared = parse_checksum(&src[trailer_start + 3..trailer_start + 6])
                .ok_or(CodecError::InvalidChecksum)?;
            let calculated = calculate_checksum(&src[..trailer_start]);

            if calculated != declared {
                return Err(CodecError::ChecksumMismatch {
                    calculated,
                    declared,
                });
            }
        }

        Ok(Some(src.split_to(total_length)))
    }
}

impl Encoder<&[u8]> for FixCodec {
    type Error = CodecError;

    fn encode(&mut self, item: &[u8], dst: &mut BytesMut) -> Result<(), Self::Error> {
        dst.reserve(item.len());
        dst.put_slice(item);
        Ok(())
    }
}

impl Encoder<bytes::Bytes> for FixCodec {
    type Error = CodecError;

    fn encode(&mut self, item: bytes::Bytes, dst: &mut BytesMut) -> Result<(), Self::Error> {
        dst.reserve(item.len());
        dst.put_slice(&item);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrofix_tagvalue::Encoder as FrameEncoder;

    fn make_frame(msg_type: &str) -> Vec<u8> {
        let mut encoder = FrameEncoder::new("FIX.4.4");
        encoder.put_str(35, msg_type);
        encoder.put_uint(34, 1);
        encoder.put_str(49, "SENDER");
        encoder.put_str(56, "TARGET");
        encoder.finish().to_vec()
    }

    #[test]
    fn test_decode_complete_frame() {
        let mut codec = FixCodec::new();
        let frame = make_frame("0");
        let mut buf = BytesMut::from(&frame[..]);

        let decoded = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(&decoded[..], &frame[..]);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_decode_incomplete_returns_none() {
        let mut codec = FixCodec::new();
        let frame = make_frame("0");
        let mut buf = BytesMut::from(&frame[..frame.len() - 5]);

        assert!(codec.decode(&mut buf).unwrap().is_none());
        assert_eq!(buf.len(), frame.len() - 5);
    }

    #[test]
    fn test_decode_two_frames_back_to_back() {
        let mut codec = FixCodec::new();
        let frame = make_frame("0");
        let mut buf = BytesMut::new();
        buf.extend_from_slice(&frame);
        buf.extend_from_slice(&frame);

        assert!(codec.decode(&mut buf).unwrap().is_some());
        assert!(codec.decode(&mut buf).unwrap().is_some());
        assert!(buf.is_empty());
    }

    #[test]
    fn test_decode_invalid_begin_string() {
        let mut codec = FixCodec::new();
        let mut buf = BytesMut::from(&b"9=FIX.4.4\x019=5\x0135=0\x0110=000\x01"[..]);

        assert!(matches!(
            codec.decode(&mut buf),
            Err(CodecError::InvalidBeginString)
        ));
    }

    #[test]
    fn test_decode_checksum_mismatch() {
        let mut codec = FixCodec::new();
        let mut frame = make_frame("0");
        let len = frame.len();
        frame[len - 2] = if frame[len - 2] == b'0' { b'1' } else { b'0' };
        let mut buf = BytesMut::from(&frame[..]);

        assert!(matches!(
            codec.decode(&mut buf),
            Err(CodecError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_decode_without_checksum_validation() {
        let mut codec = FixCodec::new().with_checksum_validation(false);
        let mut frame = make_frame("0");
        let len = frame.len();
        frame[len - 2] = if frame[len - 2] == b'0' { b'1' } else { b'0' };
        let mut buf = BytesMut::from(&frame[..]);

        assert!(codec.decode(&mut buf).unwrap().is_some());
    }

    #[test]
    fn test_decode_message_too_large() {
        let mut codec = FixCodec::new().with_max_message_size(32);
        let mut buf = BytesMut::from(&b"8=FIX.4.4\x019=4096\x0135=0\x01"[..]);

        assert!(matches!(
            codec.decode(&mut buf),
            Err(CodecError::MessageTooLarge { .. })
        ));
    }

    #[test]
    fn test_encode_appends_frame() {
        let mut codec = FixCodec::new();
        let frame = make_frame("0");
        let mut dst = BytesMut::new();

        codec.encode(&frame[..], &mut dst).unwrap();
        assert_eq!(&dst[..], &frame[..]);
    }
}
