/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Dictionary-driven FIX message decoding.
//!
//! [`FixDecoder`] composes the tokenizer, version selector, typed value
//! registry, and structural validator into two output shapes:
//!
//! - [`decode`](FixDecoder::decode) produces a [`DecodedMessage`]: the
//!   ordered field list with dictionary names, types, and typed values.
//! - [`decode_object`](FixDecoder::decode_object) produces a
//!   [`DecodedObject`]: a tag-indexed map with chained lookup, where the
//!   first occurrence of a duplicate tag wins.
//!
//! Both shapes own their normalized bytes; raw values and string-typed
//! values are [`Bytes`] sub-slices of that buffer. Decoding never fails:
//! structural findings surface in the output's error list, and a value that
//! does not parse for its type becomes [`TypedValue::Absent`].

use crate::typed::{TypeRegistry, ValueDecoder};
use crate::validate::validate_structure;
use crate::version::{appl_ver_id_to_begin_string, select_version};
use bytes::Bytes;
use ferrofix_core::{DictionaryError, FieldRef, TypedValue};
use ferrofix_dictionary::{Dictionary, DictionarySet};
use ferrofix_tagvalue::{SOH, split_tags};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::Path;

/// A single decoded FIX field.
#[derive(Debug, Clone)]
pub struct DecodedField {
    /// Numeric FIX tag (for example 35 for MsgType).
    pub tag: u32,
    /// Dictionary field name if known, otherwise empty.
    pub name: String,
    /// Dictionary type name (for example STRING, INT, PRICE), if known.
    pub type_name: String,
    /// Raw value bytes, sliced from the owning message's normalized buffer.
    pub raw: Bytes,
    /// Typed value decoded from `raw` using the version table or the
    /// dictionary-declared type.
    pub typed: TypedValue,
}

impl DecodedField {
    /// Returns the raw value as a string, lossily for non-UTF-8 bytes.
    #[must_use]
    pub fn raw_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.raw)
    }
}

/// A decoded FIX message as an ordered, named, typed field list.
#[derive(Debug, Clone, Default)]
pub struct DecodedMessage {
    /// Value of tag 8 (BeginString), if present.
    pub begin_string: String,
    /// Value of tag 35 (MsgType), if present.
    pub msg_type: String,
    /// Normalized message storage backing all field values.
    pub normalized: Bytes,
    /// All parsed fields in message order.
    pub fields: Vec<DecodedField>,
    /// Structural validation status; true when not validated.
    pub structurally_valid: bool,
    /// Human-readable validation errors when `structurally_valid` is false.
    pub validation_errors: Vec<String>,
}

impl DecodedMessage {
    /// Returns the first field carrying the given tag.
    #[must_use]
    pub fn field(&self, tag: u32) -> Option<&DecodedField> {
        self.fields.iter().find(|f| f.tag == tag)
    }
}

/// A node in a decoded FIX object graph.
#[derive(Debug, Clone, Default)]
pub struct ObjectNode {
    /// Typed field value.
    pub value: TypedValue,
    /// Nested children for hierarchical decoding extensions.
    pub children: HashMap<u32, ObjectNode>,
}

/// A decoded FIX message as a tag-indexed object.
///
/// Duplicate tags keep the first occurrence; group entries past the first
/// are reachable only through the ordered [`DecodedMessage`] shape.
#[derive(Debug, Clone, Default)]
pub struct DecodedObject {
    /// Effective BeginString (ApplVerID-mapped when present), else tag 8.
    pub begin_string: String,
    /// Value of tag 35 (MsgType), if present.
    pub msg_type: String,
    /// Normalized message storage backing all string values.
    pub normalized: Bytes,
    /// Root field map indexed by numeric FIX tag.
    pub fields: HashMap<u32, ObjectNode>,
    /// Structural validation status; true when not validated.
    pub structurally_valid: bool,
    /// Human-readable validation errors when `structurally_valid` is false.
    pub validation_errors: Vec<String>,
}

impl DecodedObject {
    /// Looks up a root field by tag, returning a chainable handle.
    #[must_use]
    pub fn get(&self, tag: u32) -> ObjectLookup<'_> {
        ObjectLookup {
            root: &self.fields,
            node: self.fields.get(&tag),
        }
    }
}

static ABSENT: TypedValue = TypedValue::Absent;

/// Lightweight lookup handle over a [`DecodedObject`].
///
/// `obj.get(a).get(b)` first tries `a`'s child `b` and falls back to the
/// root map, so session code can chain lookups without checking each hop.
/// Absent lookups resolve to [`TypedValue::Absent`] rather than an error.
#[derive(Debug, Clone, Copy)]
pub struct ObjectLookup<'a> {
    root: &'a HashMap<u32, ObjectNode>,
    node: Option<&'a ObjectNode>,
}

impl<'a> ObjectLookup<'a> {
    /// Returns the child lookup if present, else the root-level lookup.
    #[must_use]
    pub fn get(&self, tag: u32) -> ObjectLookup<'a> {
        if let Some(node) = self.node
            && let Some(child) = node.children.get(&tag)
        {
            return ObjectLookup {
                root: self.root,
                node: Some(child),
            };
        }
        ObjectLookup {
            root: self.root,
            node: self.root.get(&tag),
        }
    }

    /// Indicates whether this lookup resolves to an existing node.
    #[must_use]
    pub const fn exists(&self) -> bool {
        self.node.is_some()
    }

    /// Returns the node value, or [`TypedValue::Absent`] if missing.
    #[must_use]
    pub fn value(&self) -> &'a TypedValue {
        self.node.map_or(&ABSENT, |node| &node.value)
    }

    /// Returns the value as a string slice, if present and string-typed.
    #[must_use]
    pub fn as_str(&self) -> Option<&'a str> {
        match self.value() {
            TypedValue::Str(b) => std::str::from_utf8(b).ok(),
            _ => None,
        }
    }

    /// Returns the value as an i64, if present and integer-typed.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.value().as_i64()
    }

    /// Returns the value as an f64, if present and double-typed.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.value().as_f64()
    }

    /// Returns the value as a bool, if present and boolean-typed.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        self.value().as_bool()
    }
}

/// Decodes raw FIX messages using QuickFIX XML dictionaries.
#[derive(Debug, Default)]
pub struct FixDecoder {
    dictionaries: DictionarySet,
    registry: TypeRegistry,
}

impl FixDecoder {
    /// Creates a decoder with no dictionaries loaded.
    ///
    /// Without a dictionary, frames still decode: fields carry empty
    /// name/type, typed values fall back to string, and structural
    /// validation is skipped.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a decoder over an already-loaded dictionary set.
    #[must_use]
    pub fn with_dictionaries(dictionaries: DictionarySet) -> Self {
        Self {
            dictionaries,
            registry: TypeRegistry::new(),
        }
    }

    /// Loads all dictionary XML files from a directory.
    ///
    /// # Errors
    /// Returns [`DictionaryError`] when the directory cannot be read or no
    /// dictionary in it loads.
    pub fn load_dictionaries_from_directory(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<(), DictionaryError> {
        self.dictionaries.load_from_directory(path)
    }

    /// Returns the loaded dictionary set.
    #[must_use]
    pub fn dictionaries(&self) -> &DictionarySet {
        &self.dictionaries
    }

    /// Registers or overrides a value decoder for a dictionary type name.
    pub fn register_type_decoder(&mut self, type_name: impl Into<String>, decoder: ValueDecoder) {
        self.registry.register(type_name, decoder);
    }

    /// Normalizes `|` separators to SOH, copying only when needed.
    fn normalize_message(raw: &[u8]) -> Bytes {
        if !raw.contains(&SOH) && raw.contains(&b'|') {
            Bytes::from(ferrofix_tagvalue::normalize(raw))
        } else {
            Bytes::copy_from_slice(raw)
        }
    }

    /// Selects the dictionary for a frame: ApplVerID-mapped BeginString
    /// first, then the literal tag 8 value.
    fn select_dictionary(&self, fields: &[FieldRef<'_>]) -> Option<&Dictionary> {
        let tag_value = |tag: u32| {
            fields
                .iter()
                .find(|f| f.tag == tag)
                .and_then(|f| f.as_str().ok())
        };

        if let Some(appl_ver_id) = tag_value(1128)
            && !appl_ver_id.is_empty()
            && let Some(dict) = self
                .dictionaries
                .find_by_begin_string(appl_ver_id_to_begin_string(appl_ver_id))
        {
            return Some(dict);
        }

        tag_value(8)
            .and_then(|begin| self.dictionaries.find_by_begin_string(begin))
    }

    /// Decodes a raw FIX message into an ordered, named, typed field list.
    ///
    /// # Arguments
    /// * `raw` - Raw FIX frame using SOH (0x01) or `|` as separators
    #[must_use]
    pub fn decode(&self, raw: &[u8]) -> DecodedMessage {
        let normalized = Self::normalize_message(raw);
        let fields = split_tags(&normalized);
        let version = select_version(&fields);
        let dict = self.select_dictionary(&fields);

        let mut decoded = DecodedMessage {
            normalized: normalized.clone(),
            structurally_valid: true,
            fields: Vec::with_capacity(fields.len()),
            ..DecodedMessage::default()
        };

        for field in &fields {
            let raw_value = normalized.slice_ref(field.value);

            if field.tag == 8 {
                decoded.begin_string = String::from_utf8_lossy(field.value).into_owned();
            }
            if field.tag == 35 {
                decoded.msg_type = String::from_utf8_lossy(field.value).into_owned();
            }

            let (name, type_name) = dict
                .and_then(|d| d.field_by_number(field.tag))
                .map_or_else(Default::default, |def| {
                    (def.name.clone(), def.type_name.clone())
                });

            let typed = match version.resolver {
                Some(resolver) => self.registry.decode_code(resolver(field.tag), &raw_value),
                None => self.registry.decode(&type_name, &raw_value),
            };

            decoded.fields.push(DecodedField {
                tag: field.tag,
                name,
                type_name,
                raw: raw_value,
                typed,
            });
        }

        if let Some(dict) = dict {
            decoded.validation_errors = validate_structure(dict, &decoded.msg_type, &fields);
            decoded.structurally_valid = decoded.validation_errors.is_empty();
        }

        decoded
    }

    /// Decodes a raw FIX message into a tag-indexed object.
    ///
    /// On duplicate tags the first occurrence wins. The object's
    /// `begin_string` is the effective version (ApplVerID-mapped when
    /// present).
    ///
    /// # Arguments
    /// * `raw` - Raw FIX frame using SOH (0x01) or `|` as separators
    #[must_use]
    pub fn decode_object(&self, raw: &[u8]) -> DecodedObject {
        let normalized = Self::normalize_message(raw);
        let fields = split_tags(&normalized);
        let version = select_version(&fields);
        let dict = self.select_dictionary(&fields);

        let mut decoded = DecodedObject {
            begin_string: version.begin_string.clone(),
            normalized: normalized.clone(),
            structurally_valid: true,
            ..DecodedObject::default()
        };

        for field in &fields {
            let raw_value = normalized.slice_ref(field.value);

            if field.tag == 8 && decoded.begin_string.is_empty() {
                decoded.begin_string = String::from_utf8_lossy(field.value).into_owned();
            }
            if field.tag == 35 && decoded.msg_type.is_empty() {
                decoded.msg_type = String::from_utf8_lossy(field.value).into_owned();
            }

            let typed = match version.resolver {
                Some(resolver) => self.registry.decode_code(resolver(field.tag), &raw_value),
                None => self.registry.decode("STRING", &raw_value),
            };

            if let Entry::Vacant(entry) = decoded.fields.entry(field.tag) {
                entry.insert(ObjectNode {
                    value: typed,
                    children: HashMap::new(),
                });
            }
        }

        if let Some(dict) = dict {
            decoded.validation_errors = validate_structure(dict, &decoded.msg_type, &fields);
            decoded.structurally_valid = decoded.validation_errors.is_empty();
        }

        decoded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARTIES_FIX42: &str = r#"<?xml version="1.0"?>
<fix type="FIX" major="4" minor="2">
  <fields>
    <field number="8" name="BeginString" type="STRING"/>
    <field number="35" name="MsgType" type="STRING"/>
    <field number="55" name="Symbol" type="STRING"/>
    <field number="38" name="OrderQty" type="QTY"/>
    <field number="44" name="Price" type="PRICE"/>
    <field number="453" name="NoPartyIDs" type="NUMINGROUP"/>
    <field number="448" name="PartyID" type="STRING"/>
    <field number="447" name="PartyIDSource" type="CHAR"/>
    <field number="452" name="PartyRole" type="INT"/>
  </fields>
  <components>
    <component name="Parties">
      <group name="NoPartyIDs" required="N">
        <field name="PartyID" required="Y"/>
        <field name="PartyIDSource" required="Y"/>
        <field name="PartyRole" required="Y"/>
      </group>
    </component>
  </components>
  <messages>
    <message name="TestMsg" msgtype="T" msgcat="app">
      <field name="Symbol" required="Y"/>
    </message>
    <message name="NewOrderSingle" msgtype="D" msgcat="app">
      <field name="Symbol" required="Y"/>
      <component name="Parties" required="Y"/>
    </message>
  </messages>
</fix>
"#;

    fn decoder_with_fix42() -> FixDecoder {
        let mut set = DictionarySet::new();
        set.add(Dictionary::load_from_str(PARTIES_FIX42, "FIX42.xml").unwrap());
        FixDecoder::with_dictionaries(set)
    }

    #[test]
    fn test_decode_typed_fields() {
        let decoder = decoder_with_fix42();
        let decoded = decoder.decode(b"8=FIX.4.2|35=T|55=IBM|38=100|44=123.45|");

        assert_eq!(decoded.begin_string, "FIX.4.2");
        assert_eq!(decoded.msg_type, "T");
        assert!(decoded.structurally_valid);

        let symbol = decoded.field(55).unwrap();
        assert_eq!(symbol.name, "Symbol");
        assert_eq!(symbol.raw_str(), "IBM");
        assert_eq!(symbol.typed.as_str(), Some("IBM"));

        assert_eq!(decoded.field(38).unwrap().typed.as_f64(), Some(100.0));
        assert_eq!(decoded.field(44).unwrap().typed.as_f64(), Some(123.45));
    }

    #[test]
    fn test_decode_without_dictionary() {
        let decoder = FixDecoder::new();
        let decoded = decoder.decode(b"8=FIX.9.9|35=T|55=IBM|38=100|");

        assert_eq!(decoded.begin_string, "FIX.9.9");
        assert!(decoded.structurally_valid);
        assert!(decoded.field(8).is_some());
        assert!(decoded.field(35).is_some());

        // No schema: empty metadata, raw string typed values.
        let qty = decoded.field(38).unwrap();
        assert!(qty.name.is_empty());
        assert!(qty.type_name.is_empty());
        assert_eq!(qty.typed.as_str(), Some("100"));
    }

    #[test]
    fn test_decode_accepts_soh_frames() {
        let decoder = decoder_with_fix42();
        let decoded = decoder.decode(b"8=FIX.4.2\x0135=T\x0155=IBM\x01");
        assert_eq!(decoded.msg_type, "T");
        assert_eq!(decoded.field(55).unwrap().raw_str(), "IBM");
    }

    #[test]
    fn test_decode_validation_errors_do_not_stop_decode() {
        let decoder = decoder_with_fix42();
        let decoded =
            decoder.decode(b"8=FIX.4.2|35=D|55=IBM|453=2|448=PARTY1|447=D|452=1|");

        assert!(!decoded.structurally_valid);
        assert!(
            decoded
                .validation_errors
                .iter()
                .any(|e| e.contains("count mismatch"))
        );
        assert_eq!(decoded.field(55).unwrap().typed.as_str(), Some("IBM"));
    }

    #[test]
    fn test_decode_object_lookup() {
        let decoder = decoder_with_fix42();
        let decoded = decoder.decode_object(b"8=FIX.4.2|35=T|55=IBM|38=100|44=123.45|");

        assert_eq!(decoded.begin_string, "FIX.4.2");
        assert_eq!(decoded.msg_type, "T");

        let symbol = decoded.get(55);
        assert!(symbol.exists());
        assert_eq!(symbol.as_str(), Some("IBM"));

        assert_eq!(decoded.get(38).as_f64(), Some(100.0));
        assert_eq!(decoded.get(44).as_f64(), Some(123.45));
        assert!(!decoded.get(999).exists());
        assert!(decoded.get(999).value().is_absent());
    }

    #[test]
    fn test_decode_object_chained_lookup_falls_back_to_root() {
        let decoder = decoder_with_fix42();
        let decoded = decoder.decode_object(b"8=FIX.4.2|35=T|55=IBM|");

        let chained = decoded.get(35).get(55);
        assert!(chained.exists());
        assert_eq!(chained.as_str(), Some("IBM"));
    }

    #[test]
    fn test_decode_object_first_occurrence_wins() {
        let decoder = decoder_with_fix42();
        let decoded =
            decoder.decode_object(b"8=FIX.4.2|35=D|55=IBM|453=2|448=FIRST|447=D|452=1|448=SECOND|447=D|452=3|");

        assert_eq!(decoded.get(448).as_str(), Some("FIRST"));
    }

    #[test]
    fn test_appl_ver_id_routes_typing_and_dictionary() {
        let decoder = decoder_with_fix42();
        let decoded = decoder.decode_object(b"8=FIXT.1.1|35=T|1128=4|55=IBM|44=123.45|");

        // Effective version is FIX.4.2 even though tag 8 says FIXT.1.1.
        assert_eq!(decoded.begin_string, "FIX.4.2");
        assert_eq!(decoded.get(44).as_f64(), Some(123.45));
    }

    #[test]
    fn test_appl_ver_id_in_message_shape_keeps_raw_begin_string() {
        let decoder = decoder_with_fix42();
        let decoded = decoder.decode(b"8=FIXT.1.1|35=T|1128=4|55=IBM|44=123.45|");

        // The ordered shape reports tag 8 verbatim but types via FIX.4.2.
        assert_eq!(decoded.begin_string, "FIXT.1.1");
        assert_eq!(decoded.field(44).unwrap().typed.as_f64(), Some(123.45));
    }

    #[test]
    fn test_register_type_decoder_override() {
        // A version without a generated table exercises the
        // dictionary-declared type-name path, where overrides apply.
        let custom = r#"<fix type="FIX" major="6" minor="0">
  <fields>
    <field number="44" name="Price" type="PRICE"/>
  </fields>
  <messages/>
</fix>"#;
        let mut set = DictionarySet::new();
        set.add(Dictionary::load_from_str(custom, "FIX60.xml").unwrap());
        let mut decoder = FixDecoder::with_dictionaries(set);

        decoder.register_type_decoder(
            "price",
            std::sync::Arc::new(|value: &Bytes| {
                std::str::from_utf8(value)
                    .ok()
                    .and_then(|s| s.parse::<f64>().ok())
                    .map_or(TypedValue::Absent, |p| TypedValue::Double(p * 100.0))
            }),
        );

        let decoded = decoder.decode(b"8=FIX.6.0|35=T|44=2|");
        assert_eq!(decoded.field(44).unwrap().typed.as_f64(), Some(200.0));
    }
}
