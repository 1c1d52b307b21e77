/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Field types for FIX protocol messages.
//!
//! This module provides:
//! - [`FieldRef`]: Zero-copy reference to a field within a message buffer
//! - [`TypedValue`]: Result of typed value decoding, borrowing from the
//!   owning message buffer via cheap [`Bytes`] sub-slices

use crate::error::DecodeError;
use bytes::Bytes;
use std::fmt;
use std::str::FromStr;

/// Zero-copy reference to a field within a FIX message buffer.
///
/// This struct holds references to the original message buffer,
/// avoiding allocation during parsing.
#[derive(Debug, Clone, Copy)]
pub struct FieldRef<'a> {
    /// The field tag number.
    pub tag: u32,
    /// Reference to the field value bytes (without delimiters).
    pub value: &'a [u8],
}

impl<'a> FieldRef<'a> {
    /// Creates a new field reference.
    ///
    /// # Arguments
    /// * `tag` - The field tag number
    /// * `value` - Reference to the value bytes
    #[inline]
    #[must_use]
    pub const fn new(tag: u32, value: &'a [u8]) -> Self {
        Self { tag, value }
    }

    /// Returns the value as a string slice.
    ///
    /// # Errors
    /// Returns `DecodeError::InvalidUtf8` if the value is not valid UTF-8.
    pub fn as_str(&self) -> Result<&'a str, DecodeError> {
        std::str::from_utf8(self.value).map_err(DecodeError::from)
    }

    /// Parses the value as the specified type.
    ///
    /// # Errors
    /// Returns `DecodeError::InvalidFieldValue` if parsing fails.
    pub fn parse<T: FromStr>(&self) -> Result<T, DecodeError> {
        let s = self.as_str()?;
        s.parse().map_err(|_| DecodeError::InvalidFieldValue {
            tag: self.tag,
            reason: format!("failed to parse '{}' as {}", s, std::any::type_name::<T>()),
        })
    }

    /// Returns the value as a u64.
    ///
    /// # Errors
    /// Returns `DecodeError::InvalidFieldValue` if the value is not a valid integer.
    pub fn as_u64(&self) -> Result<u64, DecodeError> {
        self.parse()
    }

    /// Returns the raw bytes of the value.
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &'a [u8] {
        self.value
    }

    /// Returns the length of the value in bytes.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.value.len()
    }

    /// Returns true if the value is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// Result of decoding a FIX field value against its dictionary type.
///
/// The string variant holds a [`Bytes`] sub-slice of the decoded message's
/// normalized buffer, so string values stay valid exactly as long as the
/// decoded output that produced them.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TypedValue {
    /// No value could be decoded for the declared type.
    #[default]
    Absent,
    /// Boolean value (Y/N style fields).
    Bool(bool),
    /// Signed integer value (INT, SEQNUM, LENGTH, NUMINGROUP).
    Int(i64),
    /// Single-precision float (FLOAT).
    Float(f32),
    /// Double-precision float (PRICE, QTY, AMT and friends).
    Double(f64),
    /// String value backed by the message buffer.
    Str(Bytes),
}

impl TypedValue {
    /// Returns true if no value was decoded.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns the value as a bool, if it is a Bool variant.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as an i64, if it is an Int variant.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as an f32, if it is a Float variant.
    #[must_use]
    pub const fn as_f32(&self) -> Option<f32> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as an f64, if it is a Double variant.
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as a string slice, if it is a valid UTF-8 Str variant.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(b) => std::str::from_utf8(b).ok(),
            _ => None,
        }
    }

    /// Returns the raw bytes, if it is a Str variant.
    #[must_use]
    pub fn as_raw(&self) -> Option<&[u8]> {
        match self {
            Self::Str(b) => Some(b),
            _ => None,
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => write!(f, "<absent>"),
            Self::Bool(v) => write!(f, "{}", if *v { "Y" } else { "N" }),
            Self::Int(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Double(v) => write!(f, "{}", v),
            Self::Str(b) => write!(f, "{}", String::from_utf8_lossy(b)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_ref_as_str() {
        let field = FieldRef::new(11, b"ORDER123");
        assert_eq!(field.as_str().unwrap(), "ORDER123");
    }

    #[test]
    fn test_field_ref_as_u64() {
        let field = FieldRef::new(34, b"12345");
        assert_eq!(field.as_u64().unwrap(), 12345);
    }

    #[test]
    fn test_field_ref_invalid_utf8() {
        let field = FieldRef::new(1, &[0xFF, 0xFE]);
        assert!(field.as_str().is_err());
    }

    #[test]
    fn test_field_ref_parse_failure() {
        let field = FieldRef::new(34, b"12x");
        assert!(matches!(
            field.as_u64(),
            Err(DecodeError::InvalidFieldValue { tag: 34, .. })
        ));
    }

    #[test]
    fn test_typed_value_accessors() {
        assert_eq!(TypedValue::Int(42).as_i64(), Some(42));
        assert_eq!(TypedValue::Double(1.5).as_f64(), Some(1.5));
        assert_eq!(TypedValue::Bool(true).as_bool(), Some(true));
        assert_eq!(TypedValue::Str(Bytes::from_static(b"IBM")).as_str(), Some("IBM"));
        assert!(TypedValue::Absent.is_absent());
        assert_eq!(TypedValue::Absent.as_i64(), None);
    }

    #[test]
    fn test_typed_value_display() {
        assert_eq!(TypedValue::Bool(true).to_string(), "Y");
        assert_eq!(TypedValue::Bool(false).to_string(), "N");
        assert_eq!(TypedValue::Int(7).to_string(), "7");
        assert_eq!(TypedValue::Absent.to_string(), "<absent>");
        assert_eq!(
            TypedValue::Str(Bytes::from_static(b"FIX.4.4")).to_string(),
            "FIX.4.4"
        );
    }
}
