use crate::{build::TypeRegistryBuilder, node::TypeDescriptor, types::TypeKey};
use std::collections::BTreeMap;

///
/// TypeRegistry
///
/// Validated per-version type tables. Types within a version are keyed by
/// name, so iteration order never depends on registration order.
///

#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    versions: BTreeMap<String, BTreeMap<String, TypeDescriptor>>,
}

impl TypeRegistry {
    #[must_use]
    pub fn builder() -> TypeRegistryBuilder {
        TypeRegistryBuilder::new()
    }

    // only reachable through the builder, after validation
    pub(crate) fn from_descriptors(types: Vec<TypeDescriptor>) -> Self {
        let mut versions: BTreeMap<String, BTreeMap<String, TypeDescriptor>> = BTreeMap::new();

        for desc in types {
            versions
                .entry(desc.version().to_string())
                .or_default()
                .insert(desc.name().to_string(), desc);
        }

        Self { versions }
    }

    /// Every version with at least one registered type, sorted.
    pub fn versions(&self) -> impl Iterator<Item = &str> {
        self.versions.keys().map(String::as_str)
    }

    #[must_use]
    pub fn has_version(&self, version: &str) -> bool {
        self.versions.contains_key(version)
    }

    /// Known composites of one version, sorted by name. Empty for an
    /// unknown version.
    pub fn known_types(&self, version: &str) -> impl Iterator<Item = &TypeDescriptor> {
        self.versions
            .get(version)
            .into_iter()
            .flat_map(BTreeMap::values)
    }

    #[must_use]
    pub fn get(&self, key: &TypeKey) -> Option<&TypeDescriptor> {
        self.lookup(&key.version, &key.name)
    }

    #[must_use]
    pub fn lookup(&self, version: &str, name: &str) -> Option<&TypeDescriptor> {
        self.versions.get(version)?.get(name)
    }

    #[must_use]
    pub fn contains(&self, key: &TypeKey) -> bool {
        self.get(key).is_some()
    }

    /// Total number of registered types across all versions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.versions.values().map(BTreeMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}
