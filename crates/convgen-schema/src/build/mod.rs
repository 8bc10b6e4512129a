use crate::{Error, node::TypeDescriptor, registry::TypeRegistry, validate::validate_types};

///
/// TypeRegistryBuilder
///
/// Explicit registration step: every known type is added here once, then
/// `build` validates the whole set before any generator can see it.
///

#[derive(Debug, Default)]
pub struct TypeRegistryBuilder {
    types: Vec<TypeDescriptor>,
}

impl TypeRegistryBuilder {
    #[must_use]
    pub const fn new() -> Self {
        Self { types: Vec::new() }
    }

    pub fn register(&mut self, desc: TypeDescriptor) -> &mut Self {
        self.types.push(desc);
        self
    }

    #[must_use]
    pub fn with(mut self, desc: TypeDescriptor) -> Self {
        self.types.push(desc);
        self
    }

    /// Validate and freeze. Reports every problem found, not just the first.
    pub fn build(self) -> Result<TypeRegistry, Error> {
        validate_types(&self.types).map_err(Error::Validation)?;

        Ok(TypeRegistry::from_descriptors(self.types))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Primitive, TypeKey, TypeRef};

    fn pod(version: &str) -> TypeDescriptor {
        TypeDescriptor::new(version, "Pod")
            .with_field("name", Primitive::Text)
            .with_field("spec", TypeRef::named(version, "PodSpec"))
    }

    fn pod_spec(version: &str) -> TypeDescriptor {
        TypeDescriptor::new(version, "PodSpec").with_field("replicas", Primitive::Int32)
    }

    #[test]
    fn known_types_are_sorted_by_name() {
        let registry = TypeRegistryBuilder::new()
            .with(pod_spec("v1"))
            .with(pod("v1"))
            .with(pod("api"))
            .with(pod_spec("api"))
            .build()
            .unwrap();

        let names: Vec<_> = registry.known_types("v1").map(TypeDescriptor::name).collect();
        assert_eq!(names, vec!["Pod", "PodSpec"]);
        assert_eq!(registry.versions().collect::<Vec<_>>(), vec!["api", "v1"]);
        assert_eq!(registry.len(), 4);
        assert!(registry.contains(&TypeKey::new("api", "PodSpec")));
        assert_eq!(registry.known_types("v2").count(), 0);
    }

    #[test]
    fn fields_keep_declared_order() {
        let registry = TypeRegistryBuilder::new()
            .with(pod("v1"))
            .with(pod_spec("v1"))
            .build()
            .unwrap();

        let desc = registry.lookup("v1", "Pod").unwrap();
        let fields: Vec<_> = desc.fields().iter().map(|f| f.name.as_str()).collect();

        assert_eq!(fields, vec!["name", "spec"]);
    }

    #[test]
    fn build_reports_every_problem() {
        let err = TypeRegistryBuilder::new()
            .with(pod("v1"))
            .with(pod("v1"))
            .with(TypeDescriptor::new("v1", "Bad").with_field("type", Primitive::Bool))
            .build()
            .unwrap_err();

        let Error::Validation(tree) = err else {
            panic!("expected validation error");
        };
        let text = tree.to_string();

        assert!(text.contains("duplicate type 'Pod'"), "{text}");
        assert!(text.contains("unknown type 'v1::PodSpec'"), "{text}");
        assert!(text.contains("'type' is reserved"), "{text}");
    }
}
