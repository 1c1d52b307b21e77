/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Schema definitions for FIX dictionaries.
//!
//! This module defines the structures that represent FIX protocol
//! specifications loaded from QuickFIX-style XML:
//! - [`FieldDef`]: Field definitions with tag, name, type, and enum values
//! - [`Member`]: One entry of a message/component member tree
//! - [`MessageDef`]: Message definitions with ordered members
//! - [`Dictionary`]: Complete dictionary for one FIX version
//!
//! Members form a tagged tree: only group members carry children.
//! Component members are resolved by name through the dictionary's
//! component table at validation time, never inline-expanded at load
//! time, because component definitions may reference each other within
//! a single version.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// Enumerated value metadata for a FIX field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEnum {
    /// Raw enum value as stored in FIX messages.
    pub value: String,
    /// Human-readable description from dictionary metadata.
    pub description: String,
}

/// Definition of a FIX field from dictionary XML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Numeric field tag.
    pub number: u32,
    /// Field name (for example `MsgType`).
    pub name: String,
    /// Field type string from the dictionary (for example `STRING`, `INT`).
    pub type_name: String,
    /// Enum values defined for the field, empty for non-enumerated fields.
    pub enums: Vec<FieldEnum>,
}

impl FieldDef {
    /// Creates a new field definition without enum values.
    ///
    /// # Arguments
    /// * `number` - The field tag number
    /// * `name` - The field name
    /// * `type_name` - The dictionary type name
    #[must_use]
    pub fn new(number: u32, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            number,
            name: name.into(),
            type_name: type_name.into(),
            enums: Vec::new(),
        }
    }
}

/// Type of member in a FIX message or component definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberKind {
    /// Simple field reference.
    Field,
    /// Reusable component reference.
    Component,
    /// Repeating group definition.
    Group,
}

/// A member entry in a message or component definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Member kind (field, component, or group).
    pub kind: MemberKind,
    /// Member name as defined in dictionary XML.
    pub name: String,
    /// Indicates whether the member is required.
    pub required: bool,
    /// Nested group members (populated only when kind is [`MemberKind::Group`]).
    pub children: Vec<Member>,
}

impl Member {
    /// Creates a field member.
    #[must_use]
    pub fn field(name: impl Into<String>, required: bool) -> Self {
        Self {
            kind: MemberKind::Field,
            name: name.into(),
            required,
            children: Vec::new(),
        }
    }

    /// Creates a component member.
    #[must_use]
    pub fn component(name: impl Into<String>, required: bool) -> Self {
        Self {
            kind: MemberKind::Component,
            name: name.into(),
            required,
            children: Vec::new(),
        }
    }

    /// Creates a group member with its entry members.
    #[must_use]
    pub fn group(name: impl Into<String>, required: bool, children: Vec<Member>) -> Self {
        Self {
            kind: MemberKind::Group,
            name: name.into(),
            required,
            children,
        }
    }
}

/// Message category (tag 35 admin/application split).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MsgCat {
    /// Administrative message (session level).
    Admin,
    /// Application message.
    App,
}

impl FromStr for MsgCat {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "admin" => Self::Admin,
            _ => Self::App,
        })
    }
}

/// Definition of a FIX message type from dictionary XML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDef {
    /// Human-readable message name.
    pub name: String,
    /// Message type code (tag 35 value).
    pub msg_type: String,
    /// Message category.
    pub msg_cat: MsgCat,
    /// Ordered members defined for this message.
    pub members: Vec<Member>,
}

/// Complete FIX dictionary loaded from one XML file.
///
/// Immutable after loading; lookups are O(1) average.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dictionary {
    begin_string: String,
    fix_type: String,
    major: u32,
    minor: u32,
    service_pack: u32,
    fields: HashMap<u32, FieldDef>,
    fields_by_name: HashMap<String, u32>,
    messages: HashMap<String, MessageDef>,
    components: HashMap<String, Vec<Member>>,
}

impl Dictionary {
    /// Creates an empty dictionary for the given transport type and version.
    ///
    /// The BeginString is synthesized as `FIXT.major.minor` when the type is
    /// `FIXT`, otherwise `FIX.major.minor`. The service pack is recorded but
    /// never part of the BeginString.
    #[must_use]
    pub fn new(fix_type: impl Into<String>, major: u32, minor: u32, service_pack: u32) -> Self {
        let fix_type = fix_type.into();
        let begin_string = Self::build_begin_string(&fix_type, major, minor);
        Self {
            begin_string,
            fix_type,
            major,
            minor,
            service_pack,
            fields: HashMap::new(),
            fields_by_name: HashMap::new(),
            messages: HashMap::new(),
            components: HashMap::new(),
        }
    }

    fn build_begin_string(fix_type: &str, major: u32, minor: u32) -> String {
        if fix_type == "FIXT" {
            format!("FIXT.{}.{}", major, minor)
        } else {
            format!("FIX.{}.{}", major, minor)
        }
    }

    /// Converts a QuickFIX `required` attribute value to a boolean.
    ///
    /// Truthy iff the value's first character is `Y` or `y`.
    #[must_use]
    pub fn is_required_attr(value: Option<&str>) -> bool {
        matches!(value.and_then(|v| v.chars().next()), Some('Y' | 'y'))
    }

    /// Returns the dictionary BeginString (for example `FIX.4.4`).
    #[must_use]
    pub fn begin_string(&self) -> &str {
        &self.begin_string
    }

    /// Returns the dictionary transport type (`FIX` or `FIXT`).
    #[must_use]
    pub fn fix_type(&self) -> &str {
        &self.fix_type
    }

    /// Returns the (major, minor, servicepack) version triple.
    #[must_use]
    pub const fn version(&self) -> (u32, u32, u32) {
        (self.major, self.minor, self.service_pack)
    }

    /// Registers a field definition. The tag must be unique within the
    /// dictionary; a repeated tag replaces the earlier definition.
    pub fn add_field(&mut self, field: FieldDef) {
        self.fields_by_name.insert(field.name.clone(), field.number);
        self.fields.insert(field.number, field);
    }

    /// Registers a message definition keyed by its msg_type.
    pub fn add_message(&mut self, message: MessageDef) {
        self.messages.insert(message.msg_type.clone(), message);
    }

    /// Registers a component's member list keyed by component name.
    pub fn add_component(&mut self, name: impl Into<String>, members: Vec<Member>) {
        self.components.insert(name.into(), members);
    }

    /// Finds a field definition by numeric tag.
    #[must_use]
    pub fn field_by_number(&self, number: u32) -> Option<&FieldDef> {
        self.fields.get(&number)
    }

    /// Finds a field definition by name.
    #[must_use]
    pub fn field_by_name(&self, name: &str) -> Option<&FieldDef> {
        self.fields_by_name
            .get(name)
            .and_then(|number| self.fields.get(number))
    }

    /// Finds a message definition by message type code.
    #[must_use]
    pub fn message_by_type(&self, msg_type: &str) -> Option<&MessageDef> {
        self.messages.get(msg_type)
    }

    /// Finds a component's member list by component name.
    #[must_use]
    pub fn component_by_name(&self, name: &str) -> Option<&[Member]> {
        self.components.get(name).map(Vec::as_slice)
    }

    /// Returns an iterator over all field definitions.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.values()
    }

    /// Returns an iterator over all message definitions.
    pub fn messages(&self) -> impl Iterator<Item = &MessageDef> {
        self.messages.values()
    }
}
