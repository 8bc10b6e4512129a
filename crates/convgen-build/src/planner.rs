use crate::{
    error::{FailureCause, FieldFailure},
    matcher::FieldMatcher,
    plan::{ConversionPlan, FieldOperation, TypePair},
};
use convgen_schema::{
    node::TypeDescriptor, overrides::OverrideRegistry, registry::TypeRegistry, types::TypeRef,
};
use std::collections::{BTreeSet, VecDeque};
use tracing::debug;

///
/// ConversionPlanner
///
/// Builds plans for type pairs and follows the nested pairs they call into.
/// Holds no state between calls; the caller passes in what is already done.
///

#[derive(Clone, Copy, Debug)]
pub struct ConversionPlanner<'a> {
    registry: &'a TypeRegistry,
    overrides: &'a OverrideRegistry,
}

impl<'a> ConversionPlanner<'a> {
    #[must_use]
    pub const fn new(registry: &'a TypeRegistry, overrides: &'a OverrideRegistry) -> Self {
        Self {
            registry,
            overrides,
        }
    }

    /// Plan one function body. Statements follow the destination's field
    /// order; source-only fields are appended as skips.
    #[must_use]
    pub fn plan_pair(&self, source: &TypeDescriptor, destination: &TypeDescriptor) -> ConversionPlan {
        let matcher = FieldMatcher::new(self.registry, self.overrides);
        let mut operations = Vec::with_capacity(destination.fields().len());

        for field in destination.fields().iter() {
            let op = match source.field(&field.name) {
                Some(src) => matcher.match_field(&field.name, &src.ty, &field.ty),
                None => FieldOperation::Skip {
                    field: field.name.clone(),
                    cause: FailureCause::NoMatchingSourceField,
                },
            };
            operations.push(op);
        }

        for field in source.fields().iter() {
            if destination.field(&field.name).is_none() {
                operations.push(FieldOperation::Skip {
                    field: field.name.clone(),
                    cause: FailureCause::NoMatchingDestinationField,
                });
            }
        }

        ConversionPlan::new(
            source.key().clone(),
            destination.key().clone(),
            operations,
        )
    }

    /// Plan a pair by key, turning skipped fields into failures.
    pub fn plan_type(&self, pair: &TypePair) -> Result<ConversionPlan, Vec<FieldFailure>> {
        let plan = self.resolve(pair)?;
        let failures = plan_failures(&plan);

        if failures.is_empty() {
            Ok(plan)
        } else {
            Err(failures)
        }
    }

    /// Plan `roots` and every nested pair they reach, FIFO in discovery
    /// order. Pairs in `done` or covered by an override are not planned.
    /// Every failure is collected before returning.
    pub fn plan_closure(
        &self,
        roots: &[TypePair],
        done: &BTreeSet<TypePair>,
    ) -> Result<Vec<ConversionPlan>, Vec<FieldFailure>> {
        let mut queue = VecDeque::new();
        let mut seen = BTreeSet::new();
        let mut plans = Vec::new();
        let mut failures = Vec::new();

        for pair in roots {
            if self.is_overridden(pair) {
                debug!(from = %pair.0, to = %pair.1, "top-level pair covered by override");
                continue;
            }
            if !done.contains(pair) && seen.insert(pair.clone()) {
                queue.push_back(pair.clone());
            }
        }

        while let Some(pair) = queue.pop_front() {
            let plan = match self.resolve(&pair) {
                Ok(plan) => plan,
                Err(mut missing) => {
                    failures.append(&mut missing);
                    continue;
                }
            };
            debug!(function = %plan.function_name(), ops = plan.operations().len(), "planned");

            // follow nested pairs even from a failing plan so every problem
            // is reported in one pass
            for nested in plan.nested_pairs() {
                if !done.contains(&nested) && seen.insert(nested.clone()) {
                    queue.push_back(nested);
                }
            }

            failures.extend(plan_failures(&plan));
            plans.push(plan);
        }

        if failures.is_empty() {
            Ok(plans)
        } else {
            Err(failures)
        }
    }

    fn resolve(&self, pair: &TypePair) -> Result<ConversionPlan, Vec<FieldFailure>> {
        let (from, to) = pair;
        let mut failures = Vec::new();

        for key in [from, to] {
            if !self.registry.contains(key) {
                failures.push(FieldFailure {
                    from: from.clone(),
                    to: to.clone(),
                    field: None,
                    cause: FailureCause::UnknownType(key.clone()),
                });
            }
        }

        match (self.registry.get(from), self.registry.get(to)) {
            (Some(source), Some(destination)) => Ok(self.plan_pair(source, destination)),
            _ => Err(failures),
        }
    }

    fn is_overridden(&self, (from, to): &TypePair) -> bool {
        self.overrides
            .lookup(&TypeRef::Named(from.clone()), &TypeRef::Named(to.clone()))
            .is_some()
    }
}

fn plan_failures(plan: &ConversionPlan) -> Vec<FieldFailure> {
    plan.skipped()
        .map(|(field, cause)| FieldFailure {
            from: plan.source().clone(),
            to: plan.destination().clone(),
            field: Some(field.to_string()),
            cause: cause.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use convgen_schema::types::{Primitive, TypeKey};

    fn key(version: &str, name: &str) -> TypeKey {
        TypeKey::new(version, name)
    }

    fn pair(from: (&str, &str), to: (&str, &str)) -> TypePair {
        (key(from.0, from.1), key(to.0, to.1))
    }

    fn registry() -> TypeRegistry {
        let pod = |version: &str| {
            TypeDescriptor::new(version, "Pod")
                .with_field("name", Primitive::Text)
                .with_field("spec", TypeRef::named(version, "PodSpec"))
                .with_field(
                    "volumes",
                    TypeRef::slice(TypeRef::named(version, "Volume")),
                )
        };
        let spec = |version: &str| {
            TypeDescriptor::new(version, "PodSpec")
                .with_field("replicas", Primitive::Int32)
                .with_field("volume", TypeRef::pointer(TypeRef::named(version, "Volume")))
        };
        let volume = |version: &str| TypeDescriptor::new(version, "Volume").with_field("path", Primitive::Text);

        TypeRegistry::builder()
            .with(pod("v1"))
            .with(pod("api"))
            .with(spec("v1"))
            .with(spec("api"))
            .with(volume("v1"))
            .with(volume("api"))
            .build()
            .unwrap()
    }

    #[test]
    fn plan_follows_destination_field_order() {
        let registry = TypeRegistry::builder()
            .with(
                TypeDescriptor::new("v1", "Volume")
                    .with_field("b", Primitive::Text)
                    .with_field("a", Primitive::Bool),
            )
            .with(
                TypeDescriptor::new("api", "Volume")
                    .with_field("a", Primitive::Bool)
                    .with_field("b", Primitive::Text),
            )
            .build()
            .unwrap();
        let overrides = OverrideRegistry::new();
        let planner = ConversionPlanner::new(&registry, &overrides);

        let plan = planner
            .plan_type(&pair(("v1", "Volume"), ("api", "Volume")))
            .unwrap();
        let fields: Vec<_> = plan.operations().iter().map(FieldOperation::field).collect();

        assert_eq!(fields, vec!["a", "b"]);
    }

    #[test]
    fn unmatched_fields_are_reported_on_both_sides() {
        let registry = TypeRegistry::builder()
            .with(
                TypeDescriptor::new("v1", "Volume")
                    .with_field("path", Primitive::Text)
                    .with_field("Foo", Primitive::Text),
            )
            .with(
                TypeDescriptor::new("api", "Volume")
                    .with_field("path", Primitive::Text)
                    .with_field("readOnly", Primitive::Bool),
            )
            .build()
            .unwrap();
        let overrides = OverrideRegistry::new();
        let planner = ConversionPlanner::new(&registry, &overrides);

        let failures = planner
            .plan_type(&pair(("v1", "Volume"), ("api", "Volume")))
            .unwrap_err();

        let causes: Vec<_> = failures
            .iter()
            .map(|f| (f.field.as_deref().unwrap(), f.cause.clone()))
            .collect();
        assert_eq!(
            causes,
            vec![
                ("readOnly", FailureCause::NoMatchingSourceField),
                ("Foo", FailureCause::NoMatchingDestinationField),
            ]
        );
    }

    #[test]
    fn closure_is_fifo_and_deduplicated() {
        let registry = registry();
        let overrides = OverrideRegistry::new();
        let planner = ConversionPlanner::new(&registry, &overrides);

        let plans = planner
            .plan_closure(
                &[
                    pair(("v1", "Pod"), ("api", "Pod")),
                    pair(("api", "Pod"), ("v1", "Pod")),
                ],
                &BTreeSet::new(),
            )
            .unwrap();

        let names: Vec<_> = plans.iter().map(ConversionPlan::function_name).collect();
        assert_eq!(
            names,
            vec![
                "Convert_v1_Pod_To_api_Pod",
                "Convert_api_Pod_To_v1_Pod",
                "Convert_v1_PodSpec_To_api_PodSpec",
                "Convert_v1_Volume_To_api_Volume",
                "Convert_api_PodSpec_To_v1_PodSpec",
                "Convert_api_Volume_To_v1_Volume",
            ]
        );
    }

    #[test]
    fn done_and_overridden_pairs_are_not_replanned() {
        let registry = registry();
        let overrides = OverrideRegistry::new()
            .with(
                TypeRef::named("v1", "PodSpec"),
                TypeRef::named("api", "PodSpec"),
                "manual_spec",
            )
            .with(
                TypeRef::named("api", "Pod"),
                TypeRef::named("v1", "Pod"),
                "manual_pod",
            );
        let planner = ConversionPlanner::new(&registry, &overrides);
        let done = BTreeSet::from([pair(("v1", "Volume"), ("api", "Volume"))]);

        let plans = planner
            .plan_closure(
                &[
                    pair(("v1", "Pod"), ("api", "Pod")),
                    pair(("api", "Pod"), ("v1", "Pod")),
                ],
                &done,
            )
            .unwrap();

        let names: Vec<_> = plans.iter().map(ConversionPlan::function_name).collect();
        assert_eq!(names, vec!["Convert_v1_Pod_To_api_Pod"]);
        assert!(matches!(
            &plans[0].operations()[1],
            FieldOperation::ManualDelegate { function, .. } if function == "manual_spec"
        ));
    }

    #[test]
    fn nested_failures_fail_the_whole_closure() {
        let registry = TypeRegistry::builder()
            .with(TypeDescriptor::new("v1", "Pod").with_field("spec", TypeRef::named("v1", "PodSpec")))
            .with(TypeDescriptor::new("api", "Pod").with_field("spec", TypeRef::named("api", "PodSpec")))
            .with(TypeDescriptor::new("v1", "PodSpec").with_field("replicas", Primitive::Int32))
            .with(TypeDescriptor::new("api", "PodSpec").with_field("replicas", Primitive::Int64))
            .build()
            .unwrap();
        let overrides = OverrideRegistry::new();
        let planner = ConversionPlanner::new(&registry, &overrides);

        let failures = planner
            .plan_closure(
                &[
                    pair(("v1", "Pod"), ("api", "Pod")),
                    pair(("api", "Pod"), ("v1", "Pod")),
                ],
                &BTreeSet::new(),
            )
            .unwrap_err();

        // one per direction
        assert_eq!(failures.len(), 2);
        assert!(failures.iter().all(|f| f.field.as_deref() == Some("replicas")));
        assert_eq!(failures[0].from, key("v1", "PodSpec"));
        assert_eq!(failures[1].from, key("api", "PodSpec"));
    }

    #[test]
    fn missing_counterpart_is_unknown_type() {
        let registry = registry();
        let overrides = OverrideRegistry::new();
        let planner = ConversionPlanner::new(&registry, &overrides);

        let failures = planner
            .plan_type(&pair(("v1", "Pod"), ("api", "Service")))
            .unwrap_err();

        assert_eq!(
            failures[0].cause,
            FailureCause::UnknownType(key("api", "Service"))
        );
        assert_eq!(failures[0].field, None);
    }
}
