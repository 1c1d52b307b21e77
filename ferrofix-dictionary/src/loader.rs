/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! QuickFIX XML dictionary loading.
//!
//! Dictionaries are described by XML documents with a
//! `<fix type major minor servicepack>` root and `<fields>`, `<messages>`,
//! `<components>` children. [`DictionarySet`] loads a directory of such
//! files and indexes the resulting dictionaries by BeginString.

use crate::schema::{Dictionary, FieldDef, FieldEnum, Member, MemberKind, MessageDef, MsgCat};
use ferrofix_core::DictionaryError;
use std::collections::HashMap;
use std::path::Path;
use xmltree::{Element, XMLNode};

fn child_elements(parent: &Element) -> impl Iterator<Item = &Element> {
    parent.children.iter().filter_map(XMLNode::as_element)
}

fn attribute<'a>(element: &'a Element, name: &str) -> Option<&'a str> {
    element.attributes.get(name).map(String::as_str)
}

fn uint_attribute(element: &Element, name: &str) -> u32 {
    attribute(element, name)
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

fn parse_members(parent: &Element, out: &mut Vec<Member>) {
    for child in child_elements(parent) {
        let kind = match child.name.as_str() {
            "field" => MemberKind::Field,
            "component" => MemberKind::Component,
            "group" => MemberKind::Group,
            _ => continue,
        };

        let mut member = Member {
            kind,
            name: attribute(child, "name").unwrap_or_default().to_string(),
            required: Dictionary::is_required_attr(attribute(child, "required")),
            children: Vec::new(),
        };
        if kind == MemberKind::Group {
            parse_members(child, &mut member.children);
        }
        out.push(member);
    }
}

fn parse_fields(dict: &mut Dictionary, fields: &Element) {
    for field in child_elements(fields).filter(|e| e.name == "field") {
        let number = uint_attribute(field, "number");
        if number == 0 {
            continue;
        }

        let mut def = FieldDef::new(
            number,
            attribute(field, "name").unwrap_or_default(),
            attribute(field, "type").unwrap_or_default(),
        );
        for value in child_elements(field).filter(|e| e.name == "value") {
            def.enums.push(FieldEnum {
                value: attribute(value, "enum").unwrap_or_default().to_string(),
                description: attribute(value, "description")
                    .unwrap_or_default()
                    .to_string(),
            });
        }
        dict.add_field(def);
    }
}

fn parse_messages(dict: &mut Dictionary, messages: &Element) {
    for msg in child_elements(messages).filter(|e| e.name == "message") {
        let msg_type = attribute(msg, "msgtype").unwrap_or_default().to_string();
        if msg_type.is_empty() {
            continue;
        }

        let mut members = Vec::new();
        parse_members(msg, &mut members);

        let msg_cat: MsgCat = attribute(msg, "msgcat")
            .unwrap_or_default()
            .parse()
            .unwrap_or(MsgCat::App);

        dict.add_message(MessageDef {
            name: attribute(msg, "name").unwrap_or_default().to_string(),
            msg_type,
            msg_cat,
            members,
        });
    }
}

fn parse_components(dict: &mut Dictionary, components: &Element) {
    for component in child_elements(components).filter(|e| e.name == "component") {
        let name = attribute(component, "name").unwrap_or_default().to_string();
        if name.is_empty() {
            continue;
        }
        let mut members = Vec::new();
        parse_members(component, &mut members);
        dict.add_component(name, members);
    }
}

impl Dictionary {
    /// Parses one QuickFIX-compatible XML dictionary from a string.
    ///
    /// # Arguments
    /// * `xml` - The XML document text
    /// * `label` - Source label used in error messages (usually the file path)
    ///
    /// # Errors
    /// Returns [`DictionaryError`] when the document does not parse or lacks
    /// the `<fix>` root element.
    pub fn load_from_str(xml: &str, label: &str) -> Result<Self, DictionaryError> {
        let root = Element::parse(xml.as_bytes()).map_err(|e| DictionaryError::Xml {
            path: label.to_string(),
            reason: e.to_string(),
        })?;
        if root.name != "fix" {
            return Err(DictionaryError::MissingRoot {
                path: label.to_string(),
            });
        }

        let mut dict = Self::new(
            attribute(&root, "type").unwrap_or_default(),
            uint_attribute(&root, "major"),
            uint_attribute(&root, "minor"),
            uint_attribute(&root, "servicepack"),
        );

        if let Some(fields) = root.get_child("fields") {
            parse_fields(&mut dict, fields);
        }
        if let Some(messages) = root.get_child("messages") {
            parse_messages(&mut dict, messages);
        }
        if let Some(components) = root.get_child("components") {
            parse_components(&mut dict, components);
        }

        Ok(dict)
    }

    /// Loads one QuickFIX-compatible XML dictionary file.
    ///
    /// # Errors
    /// Returns [`DictionaryError`] when the file cannot be read or parsed.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, DictionaryError> {
        let path = path.as_ref();
        let label = path.display().to_string();
        let xml = std::fs::read_to_string(path).map_err(|e| DictionaryError::Read {
            path: label.clone(),
            reason: e.to_string(),
        })?;
        Self::load_from_str(&xml, &label)
    }
}

/// Collection of dictionaries indexed by BeginString.
#[derive(Debug, Clone, Default)]
pub struct DictionarySet {
    dictionaries: Vec<Dictionary>,
    begin_index: HashMap<String, usize>,
}

impl DictionarySet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a dictionary to the set.
    ///
    /// When two dictionaries advertise the same BeginString, the one added
    /// last wins lookups.
    pub fn add(&mut self, dictionary: Dictionary) {
        let idx = self.dictionaries.len();
        self.begin_index
            .insert(dictionary.begin_string().to_string(), idx);
        self.dictionaries.push(dictionary);
    }

    /// Loads every `.xml` file in a directory as a dictionary.
    ///
    /// Per-file failures do not abort sibling loads; they are collected and
    /// reported only if nothing loads at all.
    ///
    /// # Errors
    /// Returns [`DictionaryError`] when the directory cannot be read or no
    /// file in it loads as a dictionary; the latter enumerates the per-file
    /// failure messages.
    pub fn load_from_directory(&mut self, path: impl AsRef<Path>) -> Result<(), DictionaryError> {
        let path = path.as_ref();
        let label = path.display().to_string();

        self.dictionaries.clear();
        self.begin_index.clear();

        let entries = std::fs::read_dir(path).map_err(|e| DictionaryError::Read {
            path: label.clone(),
            reason: e.to_string(),
        })?;

        let mut failures = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    failures.push(e.to_string());
                    continue;
                }
            };
            let file_path = entry.path();
            if !file_path.is_file() || file_path.extension().is_none_or(|ext| ext != "xml") {
                continue;
            }

            match Dictionary::load_from_file(&file_path) {
                Ok(dict) => self.add(dict),
                Err(e) => failures.push(e.to_string()),
            }
        }

        if self.dictionaries.is_empty() {
            let detail = if failures.is_empty() {
                String::new()
            } else {
                format!(". Errors: {}", failures.join("; "))
            };
            return Err(DictionaryError::NoDictionaries {
                path: label,
                detail,
            });
        }

        Ok(())
    }

    /// Finds a dictionary by BeginString (for example `FIX.4.2` or `FIXT.1.1`).
    #[must_use]
    pub fn find_by_begin_string(&self, begin_string: &str) -> Option<&Dictionary> {
        self.begin_index
            .get(begin_string)
            .map(|&idx| &self.dictionaries[idx])
    }

    /// Returns the number of loaded dictionaries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dictionaries.len()
    }

    /// Returns true if no dictionary is loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dictionaries.is_empty()
    }

    /// Returns an iterator over the loaded dictionaries.
    pub fn iter(&self) -> impl Iterator<Item = &Dictionary> {
        self.dictionaries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_FIX42: &str = r#"<?xml version="1.0"?>
<fix type="FIX" major="4" minor="2">
  <fields>
    <field number="8" name="BeginString" type="STRING"/>
    <field number="35" name="MsgType" type="STRING"/>
    <field number="55" name="Symbol" type="STRING"/>
    <field number="54" name="Side" type="CHAR">
      <value enum="1" description="BUY"/>
      <value enum="2" description="SELL"/>
    </field>
  </fields>
  <messages>
    <message name="TestMsg" msgtype="T" msgcat="app">
      <field name="Symbol" required="Y"/>
    </message>
  </messages>
</fix>
"#;

    const FIX42_WITH_COMPONENT_AND_GROUP: &str = r#"<?xml version="1.0"?>
<fix type="FIX" major="4" minor="2">
  <fields>
    <field number="55" name="Symbol" type="STRING"/>
    <field number="453" name="NoPartyIDs" type="NUMINGROUP"/>
    <field number="448" name="PartyID" type="STRING"/>
  </fields>
  <components>
    <component name="Parties">
      <group name="NoPartyIDs" required="N">
        <field name="PartyID" required="Y"/>
      </group>
    </component>
  </components>
  <messages>
    <message name="NewOrderSingle" msgtype="D" msgcat="app">
      <field name="Symbol" required="Y"/>
      <component name="Parties" required="Y"/>
    </message>
  </messages>
</fix>
"#;

    #[test]
    fn test_load_minimal_dictionary() {
        let dict = Dictionary::load_from_str(MINIMAL_FIX42, "FIX42.xml").unwrap();

        assert_eq!(dict.begin_string(), "FIX.4.2");
        assert_eq!(dict.fix_type(), "FIX");
        assert_eq!(dict.version(), (4, 2, 0));

        let symbol = dict.field_by_number(55).unwrap();
        assert_eq!(symbol.name, "Symbol");
        assert_eq!(symbol.type_name, "STRING");

        let message = dict.message_by_type("T").unwrap();
        assert_eq!(message.name, "TestMsg");
        assert_eq!(message.msg_cat, MsgCat::App);
        assert_eq!(message.members.len(), 1);
        assert!(message.members[0].required);
    }

    #[test]
    fn test_load_enum_values() {
        let dict = Dictionary::load_from_str(MINIMAL_FIX42, "FIX42.xml").unwrap();
        let side = dict.field_by_number(54).unwrap();
        assert_eq!(side.enums.len(), 2);
        assert_eq!(side.enums[0].value, "1");
        assert_eq!(side.enums[0].description, "BUY");
    }

    #[test]
    fn test_load_component_and_group() {
        let dict =
            Dictionary::load_from_str(FIX42_WITH_COMPONENT_AND_GROUP, "FIX42.xml").unwrap();

        let parties = dict.component_by_name("Parties").unwrap();
        assert_eq!(parties.len(), 1);
        assert_eq!(parties[0].kind, MemberKind::Group);
        assert_eq!(parties[0].name, "NoPartyIDs");
        assert_eq!(parties[0].children.len(), 1);
        assert_eq!(parties[0].children[0].name, "PartyID");

        let message = dict.message_by_type("D").unwrap();
        assert_eq!(message.members[1].kind, MemberKind::Component);
        assert_eq!(message.members[1].name, "Parties");
    }

    #[test]
    fn test_load_fixt_begin_string() {
        let xml = r#"<fix type="FIXT" major="1" minor="1"><fields/><messages/></fix>"#;
        let dict = Dictionary::load_from_str(xml, "FIXT11.xml").unwrap();
        assert_eq!(dict.begin_string(), "FIXT.1.1");
    }

    #[test]
    fn test_load_rejects_wrong_root() {
        let err = Dictionary::load_from_str("<spec/>", "bad.xml").unwrap_err();
        assert!(matches!(err, DictionaryError::MissingRoot { .. }));
    }

    #[test]
    fn test_load_rejects_malformed_xml() {
        let err = Dictionary::load_from_str("<fix", "bad.xml").unwrap_err();
        assert!(matches!(err, DictionaryError::Xml { .. }));
    }

    #[test]
    fn test_directory_load() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("FIX42.xml"), MINIMAL_FIX42).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a dictionary").unwrap();

        let mut set = DictionarySet::new();
        set.load_from_directory(dir.path()).unwrap();

        assert_eq!(set.len(), 1);
        assert!(set.find_by_begin_string("FIX.4.2").is_some());
        assert!(set.find_by_begin_string("FIX.4.4").is_none());
    }

    #[test]
    fn test_directory_load_collects_failures() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.xml"), "<fix").unwrap();

        let mut set = DictionarySet::new();
        let err = set.load_from_directory(dir.path()).unwrap_err();
        let text = err.to_string();
        assert!(text.starts_with("no dictionaries loaded from"));
        assert!(text.contains("broken.xml"));
    }

    #[test]
    fn test_directory_load_failure_does_not_abort_siblings() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.xml"), "<fix").unwrap();
        std::fs::write(dir.path().join("FIX42.xml"), MINIMAL_FIX42).unwrap();

        let mut set = DictionarySet::new();
        set.load_from_directory(dir.path()).unwrap();
        assert!(set.find_by_begin_string("FIX.4.2").is_some());
    }

    #[test]
    fn test_duplicate_begin_string_last_wins() {
        let mut set = DictionarySet::new();

        let first = Dictionary::load_from_str(MINIMAL_FIX42, "a.xml").unwrap();
        let mut second = Dictionary::new("FIX", 4, 2, 0);
        second.add_field(FieldDef::new(1, "Account", "STRING"));

        set.add(first);
        set.add(second);

        let found = set.find_by_begin_string("FIX.4.2").unwrap();
        assert!(found.field_by_number(1).is_some());
        assert!(found.field_by_number(55).is_none());
    }

    #[test]
    fn test_missing_directory() {
        let mut set = DictionarySet::new();
        let err = set
            .load_from_directory("/definitely/not/here")
            .unwrap_err();
        assert!(matches!(err, DictionaryError::Read { .. }));
    }
}
