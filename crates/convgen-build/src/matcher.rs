use crate::{
    error::FailureCause,
    names::conversion_function_name,
    plan::{Conversion, FieldOperation},
};
use convgen_schema::{overrides::OverrideRegistry, registry::TypeRegistry, types::TypeRef};

///
/// FieldMatcher
///
/// Decides how one same-named field pair is converted. Manual overrides are
/// consulted first at every level, then identity, then structural shape.
///

#[derive(Clone, Copy, Debug)]
pub struct FieldMatcher<'a> {
    registry: &'a TypeRegistry,
    overrides: &'a OverrideRegistry,
}

impl<'a> FieldMatcher<'a> {
    #[must_use]
    pub const fn new(registry: &'a TypeRegistry, overrides: &'a OverrideRegistry) -> Self {
        Self {
            registry,
            overrides,
        }
    }

    /// Match a field present on both sides.
    #[must_use]
    pub fn match_field(&self, field: &str, from: &TypeRef, to: &TypeRef) -> FieldOperation {
        let field = field.to_string();

        if let Some(function) = self.overrides.lookup(from, to) {
            return FieldOperation::ManualDelegate {
                field,
                function: function.to_string(),
            };
        }

        if from == to {
            return FieldOperation::DirectAssign {
                field,
                copy: from.is_copy(),
            };
        }

        match self.conversion(from, to) {
            Ok(conversion) => FieldOperation::RecursiveCall {
                field,
                function: conversion.function().to_string(),
                conversion,
            },
            Err(cause) => FieldOperation::Skip { field, cause },
        }
    }

    // Peel wrappers in lockstep until a composite or overridden pair is hit.
    fn conversion(&self, from: &TypeRef, to: &TypeRef) -> Result<Conversion, FailureCause> {
        if let Some(function) = self.overrides.lookup(from, to) {
            return Ok(Conversion::Call {
                function: function.to_string(),
                from: from.clone(),
                to: to.clone(),
                manual: true,
            });
        }

        match (from, to) {
            (TypeRef::Named(a), TypeRef::Named(b)) => {
                for key in [a, b] {
                    if !self.registry.contains(key) {
                        return Err(FailureCause::UnknownType(key.clone()));
                    }
                }

                Ok(Conversion::Call {
                    function: conversion_function_name(a, b),
                    from: from.clone(),
                    to: to.clone(),
                    manual: false,
                })
            }
            (TypeRef::Pointer(a), TypeRef::Pointer(b)) => {
                Ok(Conversion::Option(Box::new(self.conversion(a, b)?)))
            }
            (TypeRef::Slice(a), TypeRef::Slice(b)) => {
                Ok(Conversion::List(Box::new(self.conversion(a, b)?)))
            }
            (
                TypeRef::Map {
                    key: key_a,
                    value: value_a,
                },
                TypeRef::Map {
                    key: key_b,
                    value: value_b,
                },
            ) if key_a == key_b && !key_a.contains_named() => {
                // identical values would have made the whole map identical
                Ok(Conversion::Map(Box::new(self.conversion(value_a, value_b)?)))
            }
            _ => Err(FailureCause::IncompatibleTypes {
                from: from.clone(),
                to: to.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use convgen_schema::{
        node::TypeDescriptor,
        types::{Primitive, TypeKey},
    };

    fn registry() -> TypeRegistry {
        TypeRegistry::builder()
            .with(TypeDescriptor::new("v1", "PodSpec").with_field("replicas", Primitive::Int32))
            .with(TypeDescriptor::new("api", "PodSpec").with_field("replicas", Primitive::Int32))
            .with(TypeDescriptor::new("v1", "Quantity").with_field("value", Primitive::Text))
            .with(TypeDescriptor::new("api", "Quantity").with_field("value", Primitive::Text))
            .build()
            .unwrap()
    }

    fn text() -> TypeRef {
        TypeRef::Primitive(Primitive::Text)
    }

    #[test]
    fn identical_primitives_assign_directly() {
        let registry = registry();
        let overrides = OverrideRegistry::new();
        let matcher = FieldMatcher::new(&registry, &overrides);

        assert_eq!(
            matcher.match_field("name", &text(), &text()),
            FieldOperation::DirectAssign {
                field: "name".to_string(),
                copy: false,
            }
        );
        assert_eq!(
            matcher.match_field(
                "replicas",
                &Primitive::Int32.into(),
                &Primitive::Int32.into()
            ),
            FieldOperation::DirectAssign {
                field: "replicas".to_string(),
                copy: true,
            }
        );
    }

    #[test]
    fn composites_recurse_through_wrappers() {
        let registry = registry();
        let overrides = OverrideRegistry::new();
        let matcher = FieldMatcher::new(&registry, &overrides);

        let op = matcher.match_field(
            "specs",
            &TypeRef::map(text(), TypeRef::slice(TypeRef::named("v1", "PodSpec"))),
            &TypeRef::map(text(), TypeRef::slice(TypeRef::named("api", "PodSpec"))),
        );

        let FieldOperation::RecursiveCall {
            function,
            conversion,
            ..
        } = op
        else {
            panic!("expected recursive call, got {op:?}");
        };
        assert_eq!(function, "Convert_v1_PodSpec_To_api_PodSpec");
        assert!(matches!(&conversion, Conversion::Map(inner) if matches!(**inner, Conversion::List(_))));
    }

    #[test]
    fn overrides_win_over_structural_match() {
        let registry = registry();
        let overrides = OverrideRegistry::new().with(
            TypeRef::named("v1", "PodSpec"),
            TypeRef::named("api", "PodSpec"),
            "manual_pod_spec",
        );
        let matcher = FieldMatcher::new(&registry, &overrides);

        assert_eq!(
            matcher.match_field(
                "spec",
                &TypeRef::named("v1", "PodSpec"),
                &TypeRef::named("api", "PodSpec")
            ),
            FieldOperation::ManualDelegate {
                field: "spec".to_string(),
                function: "manual_pod_spec".to_string(),
            }
        );

        // inside a container the override becomes the leaf call
        let op = matcher.match_field(
            "specs",
            &TypeRef::slice(TypeRef::named("v1", "PodSpec")),
            &TypeRef::slice(TypeRef::named("api", "PodSpec")),
        );
        let FieldOperation::RecursiveCall { conversion, .. } = op else {
            panic!("expected recursive call");
        };
        assert_eq!(conversion.function(), "manual_pod_spec");
    }

    #[test]
    fn differing_widths_need_an_override() {
        let registry = registry();
        let overrides = OverrideRegistry::new();
        let matcher = FieldMatcher::new(&registry, &overrides);

        let op = matcher.match_field(
            "replicas",
            &Primitive::Int32.into(),
            &Primitive::Int64.into(),
        );
        let FieldOperation::Skip { cause, .. } = op else {
            panic!("expected skip");
        };
        assert!(cause.to_string().contains("manual override"));

        let overrides = OverrideRegistry::new().with(
            Primitive::Int32.into(),
            Primitive::Int64.into(),
            "i64::from",
        );
        let matcher = FieldMatcher::new(&registry, &overrides);
        assert!(matches!(
            matcher.match_field(
                "replicas",
                &Primitive::Int32.into(),
                &Primitive::Int64.into()
            ),
            FieldOperation::ManualDelegate { .. }
        ));
    }

    #[test]
    fn mismatched_shapes_fail() {
        let registry = registry();
        let overrides = OverrideRegistry::new();
        let matcher = FieldMatcher::new(&registry, &overrides);

        for (from, to) in [
            (
                TypeRef::slice(TypeRef::named("v1", "PodSpec")),
                TypeRef::pointer(TypeRef::named("api", "PodSpec")),
            ),
            (TypeRef::named("v1", "PodSpec"), text()),
            (
                TypeRef::map(Primitive::Int32.into(), TypeRef::named("v1", "PodSpec")),
                TypeRef::map(text(), TypeRef::named("api", "PodSpec")),
            ),
        ] {
            assert!(
                matches!(
                    matcher.match_field("f", &from, &to),
                    FieldOperation::Skip {
                        cause: FailureCause::IncompatibleTypes { .. },
                        ..
                    }
                ),
                "{from} vs {to}"
            );
        }
    }

    #[test]
    fn unregistered_composites_fail() {
        let registry = registry();
        let overrides = OverrideRegistry::new();
        let matcher = FieldMatcher::new(&registry, &overrides);

        let op = matcher.match_field(
            "owner",
            &TypeRef::named("v1", "Quantity"),
            &TypeRef::named("api", "Owner"),
        );

        assert_eq!(
            op,
            FieldOperation::Skip {
                field: "owner".to_string(),
                cause: FailureCause::UnknownType(TypeKey::new("api", "Owner")),
            }
        );
    }
}
