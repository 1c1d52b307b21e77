/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Typed value decoding.
//!
//! A [`TypeRegistry`] maps dictionary type names (case-insensitive) to decode
//! functions producing [`TypedValue`]s. A parallel, fixed dispatch keyed by
//! [`TypeCode`] serves the generated per-version tables. A decode never
//! fails: values that do not parse for their declared type come back as
//! [`TypedValue::Absent`].

use bytes::Bytes;
use ferrofix_core::TypedValue;
use std::collections::HashMap;
use std::sync::Arc;

/// Compact type code used by the generated per-version tag tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCode {
    /// Y/N style boolean.
    Bool,
    /// Integer (INT, SEQNUM, LENGTH, NUMINGROUP).
    Int64,
    /// Single-precision float.
    Float,
    /// Double-precision float (PRICE, QTY, AMT and friends).
    Double,
    /// Plain string.
    String,
    /// Repeating-group entry count.
    GroupCount,
    /// Raw data field.
    RawData,
}

/// Decode function for one dictionary type.
pub type ValueDecoder = Arc<dyn Fn(&Bytes) -> TypedValue + Send + Sync>;

fn decode_boolean(value: &Bytes) -> TypedValue {
    match value.as_ref() {
        b"Y" | b"y" | b"1" | b"TRUE" | b"true" => TypedValue::Bool(true),
        b"N" | b"n" | b"0" | b"FALSE" | b"false" => TypedValue::Bool(false),
        _ => TypedValue::Absent,
    }
}

fn decode_int(value: &Bytes) -> TypedValue {
    std::str::from_utf8(value)
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .map_or(TypedValue::Absent, TypedValue::Int)
}

fn decode_float(value: &Bytes) -> TypedValue {
    std::str::from_utf8(value)
        .ok()
        .and_then(|s| s.parse::<f32>().ok())
        .map_or(TypedValue::Absent, TypedValue::Float)
}

fn decode_double(value: &Bytes) -> TypedValue {
    std::str::from_utf8(value)
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .map_or(TypedValue::Absent, TypedValue::Double)
}

fn decode_string(value: &Bytes) -> TypedValue {
    TypedValue::Str(value.clone())
}

/// Registry of type-name keyed value decoders.
///
/// Pre-populated with the built-in FIX types; user code may register or
/// override decoders by type name. Names are normalized to upper case at
/// registration and at lookup. The [`TypeCode`] dispatch always uses the
/// built-in primitives and is not affected by overrides.
pub struct TypeRegistry {
    decoders: HashMap<String, ValueDecoder>,
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.decoders.len())
            .finish()
    }
}

impl TypeRegistry {
    /// Creates a registry with the built-in decoders installed.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            decoders: HashMap::new(),
        };

        registry.register("BOOLEAN", Arc::new(decode_boolean));

        let int_decoder: ValueDecoder = Arc::new(decode_int);
        for name in ["INT", "NUMINGROUP", "SEQNUM", "LENGTH"] {
            registry.register(name, Arc::clone(&int_decoder));
        }

        registry.register("FLOAT", Arc::new(decode_float));

        let double_decoder: ValueDecoder = Arc::new(decode_double);
        for name in ["DOUBLE", "AMT", "PRICE", "PRICEOFFSET", "PERCENTAGE", "QTY"] {
            registry.register(name, Arc::clone(&double_decoder));
        }

        let string_decoder: ValueDecoder = Arc::new(decode_string);
        for name in [
            "STRING",
            "CHAR",
            "MULTIPLECHARVALUE",
            "MULTIPLESTRINGVALUE",
            "EXCHANGE",
            "CURRENCY",
            "UTCTIMESTAMP",
            "UTCTIMEONLY",
            "UTCDATEONLY",
            "LOCALMKTDATE",
            "MONTHYEAR",
            "DAYOFMONTH",
            "DATA",
            "COUNTRY",
            "LANGUAGE",
        ] {
            registry.register(name, Arc::clone(&string_decoder));
        }

        registry
    }

    /// Registers or overrides a decoder for a dictionary type name.
    ///
    /// # Arguments
    /// * `type_name` - Dictionary field type (for example `INT`, `PRICE`)
    /// * `decoder` - Decode function receiving the raw value bytes
    pub fn register(&mut self, type_name: impl Into<String>, decoder: ValueDecoder) {
        let normalized = type_name.into().to_uppercase();
        self.decoders.insert(normalized, decoder);
    }

    /// Decodes a value against a dictionary type name.
    ///
    /// Unknown type names fall back to the STRING decoder.
    #[must_use]
    pub fn decode(&self, type_name: &str, value: &Bytes) -> TypedValue {
        let key = type_name.to_uppercase();
        if let Some(decoder) = self.decoders.get(&key) {
            return decoder(value);
        }
        if let Some(decoder) = self.decoders.get("STRING") {
            return decoder(value);
        }
        TypedValue::Absent
    }

    /// Decodes a value against a generated [`TypeCode`].
    #[must_use]
    pub fn decode_code(&self, code: TypeCode, value: &Bytes) -> TypedValue {
        match code {
            TypeCode::Bool => decode_boolean(value),
            TypeCode::Int64 | TypeCode::GroupCount => decode_int(value),
            TypeCode::Float => decode_float(value),
            TypeCode::Double => decode_double(value),
            TypeCode::String | TypeCode::RawData => decode_string(value),
        }
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(bytes: &'static [u8]) -> Bytes {
        Bytes::from_static(bytes)
    }

    #[test]
    fn test_boolean_decoding() {
        let registry = TypeRegistry::new();
        for truthy in [b"Y" as &[u8], b"y", b"1", b"TRUE", b"true"] {
            assert_eq!(
                registry.decode("BOOLEAN", &Bytes::copy_from_slice(truthy)),
                TypedValue::Bool(true)
            );
        }
        for falsy in [b"N" as &[u8], b"n", b"0", b"FALSE", b"false"] {
            assert_eq!(
                registry.decode("BOOLEAN", &Bytes::copy_from_slice(falsy)),
                TypedValue::Bool(false)
            );
        }
        assert!(registry.decode("BOOLEAN", &value(b"maybe")).is_absent());
    }

    #[test]
    fn test_int_aliases() {
        let registry = TypeRegistry::new();
        for name in ["INT", "NUMINGROUP", "SEQNUM", "LENGTH"] {
            assert_eq!(registry.decode(name, &value(b"42")), TypedValue::Int(42));
        }
        assert_eq!(registry.decode("INT", &value(b"-7")), TypedValue::Int(-7));
        assert!(registry.decode("INT", &value(b"4.2")).is_absent());
        assert!(registry.decode("INT", &value(b"42x")).is_absent());
    }

    #[test]
    fn test_float_and_double() {
        let registry = TypeRegistry::new();
        assert_eq!(
            registry.decode("FLOAT", &value(b"1.5")),
            TypedValue::Float(1.5)
        );
        assert_eq!(
            registry.decode("PRICE", &value(b"123.45")),
            TypedValue::Double(123.45)
        );
        assert_eq!(
            registry.decode("QTY", &value(b"100")),
            TypedValue::Double(100.0)
        );
        assert!(registry.decode("PRICE", &value(b"12,5")).is_absent());
    }

    #[test]
    fn test_string_family() {
        let registry = TypeRegistry::new();
        for name in ["STRING", "CHAR", "CURRENCY", "UTCTIMESTAMP", "DATA"] {
            assert_eq!(
                registry.decode(name, &value(b"IBM")).as_str(),
                Some("IBM")
            );
        }
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let registry = TypeRegistry::new();
        assert_eq!(registry.decode("price", &value(b"1.5")), TypedValue::Double(1.5));
        assert_eq!(registry.decode("Int", &value(b"3")), TypedValue::Int(3));
    }

    #[test]
    fn test_unknown_type_falls_back_to_string() {
        let registry = TypeRegistry::new();
        assert_eq!(
            registry.decode("TENOR", &value(b"3M")).as_str(),
            Some("3M")
        );
    }

    #[test]
    fn test_user_override() {
        let mut registry = TypeRegistry::new();
        registry.register("price", Arc::new(|_: &Bytes| TypedValue::Int(-1)));
        assert_eq!(registry.decode("PRICE", &value(b"123.45")), TypedValue::Int(-1));
    }

    #[test]
    fn test_type_code_dispatch() {
        let registry = TypeRegistry::new();
        assert_eq!(
            registry.decode_code(TypeCode::Int64, &value(b"9")),
            TypedValue::Int(9)
        );
        assert_eq!(
            registry.decode_code(TypeCode::GroupCount, &value(b"2")),
            TypedValue::Int(2)
        );
        assert_eq!(
            registry.decode_code(TypeCode::Double, &value(b"0.5")),
            TypedValue::Double(0.5)
        );
        assert_eq!(
            registry.decode_code(TypeCode::RawData, &value(b"blob")).as_str(),
            Some("blob")
        );
    }

    #[test]
    fn test_type_code_ignores_overrides() {
        let mut registry = TypeRegistry::new();
        registry.register("INT", Arc::new(|_: &Bytes| TypedValue::Absent));
        assert_eq!(
            registry.decode_code(TypeCode::Int64, &value(b"9")),
            TypedValue::Int(9)
        );
    }
}
