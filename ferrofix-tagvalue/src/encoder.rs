/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! FIX message encoder.
//!
//! This module provides an encoder for building FIX messages in the
//! standard tag=value format. Callers append body fields in order; the
//! encoder supplies BeginString (8), BodyLength (9), and CheckSum (10).

use crate::checksum::{calculate_checksum, format_checksum};
use crate::frame::SOH;
use bytes::{BufMut, BytesMut};

/// FIX message encoder.
///
/// The encoder builds FIX messages by appending fields in tag=value format.
/// BodyLength counts every byte between the SOH terminating tag 9 and the
/// first byte of tag 10; the checksum covers everything before tag 10.
#[derive(Debug)]
pub struct Encoder {
    /// Buffer for the message body (between BodyLength and Checksum).
    body: BytesMut,
    /// The BeginString value (e.g., "FIX.4.4").
    begin_string: String,
}

impl Encoder {
    /// Creates a new encoder with the specified BeginString.
    ///
    /// # Arguments
    /// * `begin_string` - The FIX version string (e.g., "FIX.4.4")
    #[must_use]
    pub fn new(begin_string: impl Into<String>) -> Self {
        Self {
            body: BytesMut::with_capacity(256),
            begin_string: begin_string.into(),
        }
    }

    /// Appends a field with a string value.
    ///
    /// # Arguments
    /// * `tag` - The field tag number
    /// * `value` - The field value
    #[inline]
    pub fn put_str(&mut self, tag: u32, value: &str) {
        self.put_raw(tag, value.as_bytes());
    }

    /// Appends a field with an integer value.
    #[inline]
    pub fn put_int(&mut self, tag: u32, value: i64) {
        let mut buf = itoa::Buffer::new();
        self.put_raw(tag, buf.format(value).as_bytes());
    }

    /// Appends a field with an unsigned integer value.
    #[inline]
    pub fn put_uint(&mut self, tag: u32, value: u64) {
        let mut buf = itoa::Buffer::new();
        self.put_raw(tag, buf.format(value).as_bytes());
    }

    /// Appends a field with a boolean value (Y/N).
    #[inline]
    pub fn put_bool(&mut self, tag: u32, value: bool) {
        self.put_raw(tag, if value { b"Y" } else { b"N" });
    }

    /// Appends a field with raw bytes.
    #[inline]
    pub fn put_raw(&mut self, tag: u32, value: &[u8]) {
        let mut tag_buf = itoa::Buffer::new();
        self.body.put_slice(tag_buf.format(tag).as_bytes());
        self.body.put_u8(b'=');
        self.body.put_slice(value);
        self.body.put_u8(SOH);
    }

    /// Finalizes the message and returns the complete encoded bytes.
    ///
    /// Prepends BeginString (8) and BodyLength (9) and appends CheckSum (10).
    #[must_use]
    pub fn finish(self) -> BytesMut {
        let body_len = self.body.len();

        let mut message = BytesMut::with_capacity(self.begin_string.len() + body_len + 32);
        message.put_slice(b"8=");
        message.put_slice(self.begin_string.as_bytes());
        message.put_u8(SOH);
        message.put_slice(b"9=");

        let mut len_buf = itoa::Buffer::new();
        message.put_slice(len_buf.format(body_len).as_bytes());
        message.put_u8(SOH);

        message.put_slice(&self.body);

        let checksum = calculate_checksum(&message);
        message.put_slice(b"10=");
        message.put_slice(&format_checksum(checksum));
        message.put_u8(SOH);

        message
    }

    /// Returns the current body length.
    #[inline]
    #[must_use]
    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    /// Clears the encoder body for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.body.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{validate_body_length, validate_checksum};
    use crate::tokenizer::split_tags;

    #[test]
    fn test_encoder_basic() {
        let mut encoder = Encoder::new("FIX.4.4");
        encoder.put_str(35, "0");

        let message = encoder.finish();
        let msg_str = String::from_utf8_lossy(&message);

        assert!(msg_str.starts_with("8=FIX.4.4\x01"));
        assert!(msg_str.contains("35=0\x01"));
        assert!(msg_str.contains("10="));
    }

    #[test]
    fn test_encoder_multiple_fields() {
        let mut encoder = Encoder::new("FIX.4.4");
        encoder.put_str(35, "D");
        encoder.put_str(49, "SENDER");
        encoder.put_str(56, "TARGET");
        encoder.put_uint(34, 1);
        encoder.put_int(52, -3);
        encoder.put_bool(141, true);

        let message = encoder.finish();
        let msg_str = String::from_utf8_lossy(&message);

        assert!(msg_str.contains("35=D\x01"));
        assert!(msg_str.contains("49=SENDER\x01"));
        assert!(msg_str.contains("56=TARGET\x01"));
        assert!(msg_str.contains("34=1\x01"));
        assert!(msg_str.contains("52=-3\x01"));
        assert!(msg_str.contains("141=Y\x01"));
    }

    #[test]
    fn test_encoder_output_passes_admission_checks() {
        let mut encoder = Encoder::new("FIX.4.2");
        encoder.put_str(35, "A");
        encoder.put_uint(34, 1);
        encoder.put_str(49, "INITIATOR");
        encoder.put_str(56, "ACCEPTOR");

        let message = encoder.finish();
        assert!(validate_body_length(&message));
        assert!(validate_checksum(&message));
    }

    #[test]
    fn test_encoder_tag_order_preserved() {
        let mut encoder = Encoder::new("FIX.4.4");
        encoder.put_str(35, "A");
        encoder.put_uint(34, 1);
        encoder.put_str(49, "S");
        encoder.put_str(56, "T");

        let message = encoder.finish();
        let tags: Vec<u32> = split_tags(&message).iter().map(|f| f.tag).collect();
        assert_eq!(tags, vec![8, 9, 35, 34, 49, 56, 10]);
    }

    #[test]
    fn test_encoder_body_length_counts_from_msg_type() {
        let mut encoder = Encoder::new("FIX.4.4");
        encoder.put_str(35, "0");

        let message = encoder.finish();
        // Body is exactly "35=0<SOH>".
        let msg_str = String::from_utf8_lossy(&message);
        assert!(msg_str.contains("9=5\x01"));
    }

    #[test]
    fn test_encoder_clear() {
        let mut encoder = Encoder::new("FIX.4.4");
        encoder.put_str(35, "0");
        assert!(encoder.body_len() > 0);

        encoder.clear();
        assert_eq!(encoder.body_len(), 0);
    }
}
