use crate::{
    MAX_FIELD_NAME_LEN, MAX_TYPE_NAME_LEN, err, error::ErrorTree, node::TypeDescriptor,
    types::Primitive, validate::reserved::WORDS,
};
use std::collections::{BTreeMap, BTreeSet};

/// Check one type's own name, version and fields.
pub(crate) fn validate_type(desc: &TypeDescriptor) -> ErrorTree {
    let mut errs = ErrorTree::new();

    // '_' separates the parts of a generated function name
    if let Err(msg) = validate_ident(desc.version(), MAX_TYPE_NAME_LEN) {
        err!(errs, "version {msg}");
    } else if desc.version().contains('_') {
        err!(errs, "version '{}' cannot contain '_'", desc.version());
    }
    if let Err(msg) = validate_type_name(desc.name()) {
        errs.add(msg);
    }

    let mut seen = BTreeSet::new();
    for field in desc.fields().iter() {
        if let Err(msg) = validate_ident(&field.name, MAX_FIELD_NAME_LEN) {
            errs.add_for(&field.name, msg);
        }
        if !seen.insert(field.name.as_str()) {
            errs.add_for(&field.name, "duplicate field name");
        }
    }

    errs
}

/// A type name must be a non-reserved identifier that does not shadow a
/// primitive.
pub fn validate_type_name(name: &str) -> Result<(), String> {
    validate_ident(name, MAX_TYPE_NAME_LEN)?;

    if Primitive::from_name(name).is_some() {
        return Err(format!("type name '{name}' shadows a primitive"));
    }

    Ok(())
}

/// Ensure an identifier is non-empty, ASCII, within `max_len` and not a
/// reserved keyword.
pub fn validate_ident(ident: &str, max_len: usize) -> Result<(), String> {
    let mut chars = ident.chars();
    let Some(first) = chars.next() else {
        return Err("ident is empty".to_string());
    };

    if !(first.is_ascii_alphabetic() || first == '_')
        || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(format!("'{ident}' is not a valid identifier"));
    }
    if ident.len() > max_len {
        return Err(format!("'{ident}' exceeds max length {max_len}"));
    }
    if WORDS.contains(ident) {
        return Err(format!("the word '{ident}' is reserved"));
    }

    Ok(())
}

/// Ensure a function path (`a::b::c`) is made of valid identifiers.
pub fn validate_path(path: &str) -> Result<(), String> {
    for segment in path.split("::") {
        validate_ident(segment, usize::MAX).map_err(|msg| format!("path '{path}': {msg}"))?;
    }

    Ok(())
}

/// Each (version, name) pair may be registered once.
pub(crate) fn validate_unique_types(types: &[TypeDescriptor], errs: &mut ErrorTree) {
    let mut counts: BTreeMap<_, usize> = BTreeMap::new();
    for desc in types {
        *counts.entry(desc.key()).or_default() += 1;
    }

    for (key, count) in counts {
        if count > 1 {
            errs.add_for(
                key.to_string(),
                format!("duplicate type '{}' registered {count} times", key.name),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_reserved_words() {
        assert!(validate_ident("", 8).is_err(), "empty identifiers should fail");
        assert!(
            validate_ident("type", 8).is_err(),
            "reserved keywords should be rejected"
        );
        assert!(validate_ident("dash-ed", 8).is_err());
        assert!(validate_ident("toolong", 3).is_err());
    }

    #[test]
    fn accepts_non_reserved_identifier() {
        assert!(validate_ident("custom_ident", 64).is_ok());
        assert!(validate_path("crate::conversions::quantity_v1_to_api").is_ok());
        assert!(validate_path("crate::").is_err());
    }

    #[test]
    fn type_names_cannot_shadow_primitives() {
        assert!(validate_type_name("Text").is_err());
        assert!(validate_type_name("Vec").is_err());
        assert!(validate_type_name("PodSpec").is_ok());
    }

    #[test]
    fn versions_cannot_contain_underscores() {
        let desc = TypeDescriptor::new("v1_A", "B").with_field("n", Primitive::Text);

        let errs = validate_type(&desc);

        assert!(errs.to_string().contains("version 'v1_A' cannot contain '_'"));
        assert!(validate_type(&TypeDescriptor::new("v1beta3", "B_C")).is_empty());
    }
}
