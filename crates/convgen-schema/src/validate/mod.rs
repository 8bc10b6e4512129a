//! Registry validation orchestration.

pub mod naming;
pub mod reference;
mod reserved;

use crate::{error::ErrorTree, node::TypeDescriptor};

/// Run full registry validation in a staged, deterministic order.
pub(crate) fn validate_types(types: &[TypeDescriptor]) -> Result<(), ErrorTree> {
    let mut errs = ErrorTree::new();

    // Phase 1: per-type structural checks.
    for desc in types {
        errs.merge_for(desc.key().to_string(), naming::validate_type(desc));
    }

    // Phase 2: registry-wide invariants.
    naming::validate_unique_types(types, &mut errs);
    reference::validate_references(types, &mut errs);

    errs.result()
}
