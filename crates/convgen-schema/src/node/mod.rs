mod field;
mod type_descriptor;

pub use field::{FieldDescriptor, FieldList};
pub use type_descriptor::TypeDescriptor;
