/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Structural validation against a dictionary's message definitions.
//!
//! The validator walks a message definition's member list (fields,
//! components, repeating groups) against the ordered tag stream, enforcing
//! required-ness and group-count consistency. It is deliberately lenient
//! otherwise: unknown message types and unknown tags are not errors, and a
//! validation finding never stops the decode.

use ferrofix_core::FieldRef;
use ferrofix_dictionary::{Dictionary, Member, MemberKind};

/// Resolves the first concrete tag a member can start with.
///
/// Fields and groups resolve through the field table; components recurse
/// into their member list.
fn first_member_tag(dict: &Dictionary, member: &Member) -> Option<u32> {
    match member.kind {
        MemberKind::Field | MemberKind::Group => {
            dict.field_by_name(&member.name).map(|def| def.number)
        }
        MemberKind::Component => dict
            .component_by_name(&member.name)
            .and_then(|members| first_tag_of(dict, members)),
    }
}

fn first_tag_of(dict: &Dictionary, members: &[Member]) -> Option<u32> {
    members.iter().find_map(|m| first_member_tag(dict, m))
}

/// Parses a group-count value as a non-negative integer consuming all input.
fn parse_group_count(value: &[u8]) -> Option<usize> {
    let text = std::str::from_utf8(value).ok()?;
    if text.is_empty() {
        return None;
    }
    text.parse::<usize>().ok()
}

fn consume_members(
    dict: &Dictionary,
    members: &[Member],
    fields: &[FieldRef<'_>],
    index: &mut usize,
    errors: &mut Vec<String>,
    enforce_presence: bool,
) -> bool {
    let mut consumed_any = false;
    for member in members {
        let before = *index;
        consume_member(dict, member, fields, index, errors, enforce_presence);
        if *index > before {
            consumed_any = true;
        }
    }
    consumed_any
}

fn consume_member(
    dict: &Dictionary,
    member: &Member,
    fields: &[FieldRef<'_>],
    index: &mut usize,
    errors: &mut Vec<String>,
    enforce_presence: bool,
) -> bool {
    match member.kind {
        MemberKind::Field => {
            let Some(def) = dict.field_by_name(&member.name) else {
                return false;
            };

            if *index < fields.len() && fields[*index].tag == def.number {
                *index += 1;
                return true;
            }

            if member.required && enforce_presence {
                errors.push(format!("Missing required field '{}'", member.name));
            }
            false
        }

        MemberKind::Component => {
            let Some(component_members) = dict.component_by_name(&member.name) else {
                if member.required && enforce_presence {
                    errors.push(format!("Missing required component '{}'", member.name));
                }
                return false;
            };

            let expected_tag = first_tag_of(dict, component_members);
            if let Some(tag) = expected_tag
                && (*index >= fields.len() || fields[*index].tag != tag)
            {
                if member.required && enforce_presence {
                    errors.push(format!("Missing required component '{}'", member.name));
                }
                return false;
            }

            let start_index = *index;
            consume_members(dict, component_members, fields, index, errors, true);
            let consumed = *index > start_index;

            if member.required && enforce_presence && !consumed {
                errors.push(format!("Missing required component '{}'", member.name));
            }
            consumed
        }

        MemberKind::Group => {
            let Some(count_def) = dict.field_by_name(&member.name) else {
                return false;
            };

            if *index >= fields.len() || fields[*index].tag != count_def.number {
                if member.required && enforce_presence {
                    errors.push(format!(
                        "Missing required group-count field '{}'",
                        member.name
                    ));
                }
                return false;
            }

            let Some(declared) = parse_group_count(fields[*index].value) else {
                errors.push(format!("Invalid group-count value for '{}'", member.name));
                *index += 1;
                return true;
            };

            *index += 1;
            let mut actual = 0usize;
            for _ in 0..declared {
                let entry_start = *index;
                consume_members(dict, &member.children, fields, index, errors, true);
                if *index == entry_start {
                    break;
                }
                actual += 1;
            }

            if actual != declared {
                errors.push(format!(
                    "Group '{}' count mismatch: declared {}, actual {}",
                    member.name, declared, actual
                ));
            }

            true
        }
    }
}

/// Validates the ordered field stream of a message against its definition.
///
/// Returns a list of human-readable error strings; an empty list means the
/// message is structurally valid. A message whose type is empty or unknown
/// in the dictionary is not validated and yields no errors.
#[must_use]
pub fn validate_structure(
    dict: &Dictionary,
    msg_type: &str,
    fields: &[FieldRef<'_>],
) -> Vec<String> {
    let mut errors = Vec::new();
    if msg_type.is_empty() {
        return errors;
    }
    let Some(message_def) = dict.message_by_type(msg_type) else {
        return errors;
    };

    // Skip header fields: position at the first field the message body can
    // start with, falling back to the first field matching any top-level
    // member, else the frame start.
    let mut index = 0;
    let mut positioned = false;
    if let Some(start_tag) = first_tag_of(dict, &message_def.members) {
        while index < fields.len() {
            if fields[index].tag == start_tag {
                positioned = true;
                break;
            }
            index += 1;
        }
    }

    if !positioned {
        index = 0;
        let mut fallback = None;
        while index < fields.len() {
            let matches_member = message_def
                .members
                .iter()
                .any(|m| first_member_tag(dict, m) == Some(fields[index].tag));
            if matches_member {
                fallback = Some(index);
                break;
            }
            index += 1;
        }
        index = fallback.unwrap_or(0);
    }

    consume_members(dict, &message_def.members, fields, &mut index, &mut errors, true);
    errors
}
