/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Error types for the FerroFix FIX protocol engine.
//!
//! This module provides a unified error hierarchy using `thiserror` for typed,
//! domain-specific errors across all FerroFix operations.
//!
//! Note that most protocol-level conditions are deliberately *not* errors:
//! the decoder reports structural problems inside its decoded output, and the
//! session controller reports admission failures through its `Action` value.
//! The types here cover the genuinely fallible seams (dictionary loading,
//! UTF-8 and value conversion, I/O).

use thiserror::Error;

/// Result type alias using [`FixError`] as the error type.
pub type Result<T> = std::result::Result<T, FixError>;

/// Top-level error type for all FerroFix operations.
#[derive(Debug, Error)]
pub enum FixError {
    /// Error during field or message decoding.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Error while loading or querying a dictionary.
    #[error("dictionary error: {0}")]
    Dictionary(#[from] DictionaryError),

    /// I/O error from underlying transport or filesystem.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that occur during FIX field decoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Invalid UTF-8 in string field.
    #[error("invalid utf-8 in field: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// Invalid field value for the expected type.
    #[error("invalid field value for tag {tag}: {reason}")]
    InvalidFieldValue {
        /// The tag number of the field.
        tag: u32,
        /// Description of why the value is invalid.
        reason: String,
    },

    /// Missing required field.
    #[error("missing required field: tag {tag}")]
    MissingRequiredField {
        /// The tag number of the missing field.
        tag: u32,
    },
}

/// Errors while loading FIX dictionaries from QuickFIX-style XML.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DictionaryError {
    /// Failed to read a dictionary file.
    #[error("failed to read dictionary file {path}: {reason}")]
    Read {
        /// Path of the file that could not be read.
        path: String,
        /// Underlying I/O reason.
        reason: String,
    },

    /// Failed to parse dictionary XML.
    #[error("failed to parse XML in {path}: {reason}")]
    Xml {
        /// Path (or label) of the offending document.
        path: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// The document lacks the `<fix>` root element.
    #[error("missing <fix> root element in {path}")]
    MissingRoot {
        /// Path (or label) of the offending document.
        path: String,
    },

    /// No dictionary in a directory could be loaded.
    #[error("no dictionaries loaded from {path}{detail}")]
    NoDictionaries {
        /// The directory that was scanned.
        path: String,
        /// Aggregated per-file failure messages, pre-formatted.
        detail: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::InvalidFieldValue {
            tag: 44,
            reason: "not a number".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid field value for tag 44: not a number"
        );
    }

    #[test]
    fn test_fix_error_from_decode() {
        let decode_err = DecodeError::MissingRequiredField { tag: 35 };
        let fix_err: FixError = decode_err.into();
        assert!(matches!(
            fix_err,
            FixError::Decode(DecodeError::MissingRequiredField { tag: 35 })
        ));
    }

    #[test]
    fn test_dictionary_error_display() {
        let err = DictionaryError::MissingRoot {
            path: "FIX42.xml".to_string(),
        };
        assert_eq!(err.to_string(), "missing <fix> root element in FIX42.xml");
    }

    #[test]
    fn test_no_dictionaries_detail() {
        let err = DictionaryError::NoDictionaries {
            path: "/tmp/specs".to_string(),
            detail: ". Errors: bad file".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "no dictionaries loaded from /tmp/specs. Errors: bad file"
        );
    }
}
