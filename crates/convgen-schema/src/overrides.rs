use crate::types::TypeRef;
use std::collections::BTreeMap;

///
/// OverrideRegistry
///
/// Hand-written conversion functions keyed by the exact
/// (source type, destination type) pair they convert. An entry here always
/// wins over a generated conversion for the same pair.
///

#[derive(Clone, Debug, Default)]
pub struct OverrideRegistry {
    entries: BTreeMap<(TypeRef, TypeRef), String>,
}

impl OverrideRegistry {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Register a hand-written function, returning the one it replaced.
    pub fn register(
        &mut self,
        source: TypeRef,
        destination: TypeRef,
        function: impl Into<String>,
    ) -> Option<String> {
        self.entries.insert((source, destination), function.into())
    }

    #[must_use]
    pub fn with(mut self, source: TypeRef, destination: TypeRef, function: &str) -> Self {
        self.register(source, destination, function);
        self
    }

    /// Callable name of the override for this exact pair, if any.
    #[must_use]
    pub fn lookup(&self, source: &TypeRef, destination: &TypeRef) -> Option<&str> {
        // tuple keys need owned halves; the pair is small
        self.entries
            .get(&(source.clone(), destination.clone()))
            .map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TypeRef, &TypeRef, &str)> {
        self.entries
            .iter()
            .map(|((source, destination), function)| (source, destination, function.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Primitive;

    #[test]
    fn lookup_is_directional() {
        let overrides = OverrideRegistry::new().with(
            TypeRef::named("v1", "Quantity"),
            TypeRef::named("api", "Quantity"),
            "convert_quantity",
        );

        assert_eq!(
            overrides.lookup(
                &TypeRef::named("v1", "Quantity"),
                &TypeRef::named("api", "Quantity")
            ),
            Some("convert_quantity")
        );
        assert_eq!(
            overrides.lookup(
                &TypeRef::named("api", "Quantity"),
                &TypeRef::named("v1", "Quantity")
            ),
            None
        );
    }

    #[test]
    fn last_registration_wins() {
        let mut overrides = OverrideRegistry::new();
        let int32 = TypeRef::Primitive(Primitive::Int32);
        let int64 = TypeRef::Primitive(Primitive::Int64);

        assert_eq!(overrides.register(int32.clone(), int64.clone(), "widen"), None);
        assert_eq!(
            overrides.register(int32.clone(), int64.clone(), "widen_checked"),
            Some("widen".to_string())
        );
        assert_eq!(overrides.lookup(&int32, &int64), Some("widen_checked"));
        assert_eq!(overrides.len(), 1);
    }
}
