use crate::{
    node::{FieldDescriptor, FieldList},
    types::{TypeKey, TypeRef},
};

///
/// TypeDescriptor
///
/// One registered composite: its identity and ordered fields. Immutable once
/// the registry is built.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TypeDescriptor {
    key: TypeKey,
    fields: FieldList,
}

impl TypeDescriptor {
    pub fn new(version: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: TypeKey::new(version, name),
            fields: FieldList::default(),
        }
    }

    /// Append a field; declaration order is kept.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        self.fields.push(FieldDescriptor::new(name, ty));
        self
    }

    #[must_use]
    pub const fn key(&self) -> &TypeKey {
        &self.key
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.key.version
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.key.name
    }

    #[must_use]
    pub const fn fields(&self) -> &FieldList {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(name)
    }
}
