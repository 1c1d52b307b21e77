/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Version selection.
//!
//! A frame's effective version comes from BeginString (tag 8), overridden by
//! ApplVerID (tag 1128) when present: FIXT transports advertise `FIXT.1.1`
//! on tag 8 while the application payload is typed by the ApplVerID-selected
//! dictionary. Unknown ApplVerID values are used verbatim.

use crate::generated::{self, TypeCodeResolver};
use ferrofix_core::FieldRef;

/// Maps an ApplVerID (tag 1128) value to its BeginString.
///
/// Unknown values are returned unchanged.
#[must_use]
pub fn appl_ver_id_to_begin_string(value: &str) -> &str {
    match value {
        "2" => "FIX.4.0",
        "3" => "FIX.4.1",
        "4" => "FIX.4.2",
        "5" => "FIX.4.3",
        "6" => "FIX.4.4",
        "7" | "8" | "9" => "FIX.5.0",
        other => other,
    }
}

/// The effective version of a frame plus its generated type table, if any.
#[derive(Debug, Clone)]
pub struct VersionSelection {
    /// Effective BeginString after ApplVerID mapping.
    pub begin_string: String,
    /// Generated tag → type-code resolver for the effective version.
    pub resolver: Option<TypeCodeResolver>,
}

/// Selects the effective version from a frame's tokenized fields.
///
/// Uses the first occurrence of tags 8 and 1128.
#[must_use]
pub fn select_version(fields: &[FieldRef<'_>]) -> VersionSelection {
    let tag_value = |tag: u32| {
        fields
            .iter()
            .find(|f| f.tag == tag)
            .and_then(|f| f.as_str().ok())
    };

    let begin_string = tag_value(8).unwrap_or_default();
    let effective = match tag_value(1128) {
        Some(appl_ver_id) if !appl_ver_id.is_empty() => appl_ver_id_to_begin_string(appl_ver_id),
        _ => begin_string,
    };

    VersionSelection {
        begin_string: effective.to_string(),
        resolver: generated::resolver_for(effective),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typed::TypeCode;
    use ferrofix_tagvalue::{normalize, split_tags};

    #[test]
    fn test_appl_ver_id_mapping() {
        assert_eq!(appl_ver_id_to_begin_string("2"), "FIX.4.0");
        assert_eq!(appl_ver_id_to_begin_string("3"), "FIX.4.1");
        assert_eq!(appl_ver_id_to_begin_string("4"), "FIX.4.2");
        assert_eq!(appl_ver_id_to_begin_string("5"), "FIX.4.3");
        assert_eq!(appl_ver_id_to_begin_string("6"), "FIX.4.4");
        assert_eq!(appl_ver_id_to_begin_string("7"), "FIX.5.0");
        assert_eq!(appl_ver_id_to_begin_string("8"), "FIX.5.0");
        assert_eq!(appl_ver_id_to_begin_string("9"), "FIX.5.0");
        assert_eq!(appl_ver_id_to_begin_string("FIX.4.1"), "FIX.4.1");
    }

    #[test]
    fn test_select_from_begin_string() {
        let frame = normalize(b"8=FIX.4.2|35=0|");
        let fields = split_tags(&frame);
        let selection = select_version(&fields);

        assert_eq!(selection.begin_string, "FIX.4.2");
        let resolver = selection.resolver.unwrap();
        assert_eq!(resolver(44), TypeCode::Double);
    }

    #[test]
    fn test_appl_ver_id_overrides_begin_string() {
        let frame = normalize(b"8=FIXT.1.1|35=0|1128=4|");
        let fields = split_tags(&frame);
        let selection = select_version(&fields);

        assert_eq!(selection.begin_string, "FIX.4.2");
        assert!(selection.resolver.is_some());
    }

    #[test]
    fn test_unknown_version_has_no_resolver() {
        let frame = normalize(b"8=FIX.9.9|35=0|");
        let fields = split_tags(&frame);
        let selection = select_version(&fields);

        assert_eq!(selection.begin_string, "FIX.9.9");
        assert!(selection.resolver.is_none());
    }

    #[test]
    fn test_unknown_appl_ver_id_used_verbatim() {
        let frame = normalize(b"8=FIXT.1.1|35=0|1128=banana|");
        let fields = split_tags(&frame);
        let selection = select_version(&fields);
        assert_eq!(selection.begin_string, "banana");
        assert!(selection.resolver.is_none());
    }
}
