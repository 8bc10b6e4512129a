use crate::types::TypeRef;
use derive_more::Deref;

///
/// FieldList
/// Fields of one composite, in declared order.
///

#[derive(Clone, Debug, Default, Deref, Eq, PartialEq)]
pub struct FieldList {
    fields: Vec<FieldDescriptor>,
}

impl FieldList {
    // get
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub(crate) fn push(&mut self, field: FieldDescriptor) {
        self.fields.push(field);
    }
}

///
/// FieldDescriptor
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub ty: TypeRef,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}
