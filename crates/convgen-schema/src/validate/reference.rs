use crate::{error::ErrorTree, node::TypeDescriptor, types::TypeKey};
use std::collections::BTreeSet;

/// Every composite a field names must itself be registered.
pub(crate) fn validate_references(types: &[TypeDescriptor], errs: &mut ErrorTree) {
    let known: BTreeSet<&TypeKey> = types.iter().map(TypeDescriptor::key).collect();

    for desc in types {
        for field in desc.fields().iter() {
            for key in field.ty.named_keys() {
                if !known.contains(key) {
                    errs.add_for(
                        desc.key().to_string(),
                        format!("field '{}' references unknown type '{key}'", field.name),
                    );
                }
            }
        }
    }
}
