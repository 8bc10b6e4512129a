use crate::{error::FailureCause, names::conversion_function_name};
use convgen_schema::types::{TypeKey, TypeRef};

/// A (source, destination) composite pair; the unit of deduplication.
pub type TypePair = (TypeKey, TypeKey);

///
/// ConversionPlan
///
/// Ordered field operations for one function body. Built once, never
/// mutated; regeneration builds a new plan.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConversionPlan {
    source: TypeKey,
    destination: TypeKey,
    operations: Vec<FieldOperation>,
}

impl ConversionPlan {
    pub(crate) const fn new(
        source: TypeKey,
        destination: TypeKey,
        operations: Vec<FieldOperation>,
    ) -> Self {
        Self {
            source,
            destination,
            operations,
        }
    }

    #[must_use]
    pub const fn source(&self) -> &TypeKey {
        &self.source
    }

    #[must_use]
    pub const fn destination(&self) -> &TypeKey {
        &self.destination
    }

    #[must_use]
    pub fn operations(&self) -> &[FieldOperation] {
        &self.operations
    }

    #[must_use]
    pub fn function_name(&self) -> String {
        conversion_function_name(&self.source, &self.destination)
    }

    /// No field was skipped; the plan can be emitted.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped().next().is_none()
    }

    /// Skipped fields with their causes, in plan order.
    pub fn skipped(&self) -> impl Iterator<Item = (&str, &FailureCause)> {
        self.operations.iter().filter_map(|op| match op {
            FieldOperation::Skip { field, cause } => Some((field.as_str(), cause)),
            _ => None,
        })
    }

    /// Generated pairs this plan calls into, in field order.
    #[must_use]
    pub fn nested_pairs(&self) -> Vec<TypePair> {
        let mut pairs = Vec::new();
        for op in &self.operations {
            if let FieldOperation::RecursiveCall { conversion, .. } = op {
                conversion.collect_pairs(&mut pairs);
            }
        }

        pairs
    }
}

///
/// FieldOperation
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FieldOperation {
    /// Identical types on both sides; `copy` when a plain assignment will do.
    DirectAssign { field: String, copy: bool },

    /// Composite conversion, possibly through `Option`/`Vec`/`Map` wrappers.
    /// `function` is the innermost function called.
    RecursiveCall {
        field: String,
        function: String,
        conversion: Conversion,
    },

    /// A hand-written function covers the field's exact type pair.
    ManualDelegate { field: String, function: String },

    /// The field could not be matched; the plan is unusable.
    Skip { field: String, cause: FailureCause },
}

impl FieldOperation {
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::DirectAssign { field, .. }
            | Self::RecursiveCall { field, .. }
            | Self::ManualDelegate { field, .. }
            | Self::Skip { field, .. } => field,
        }
    }
}

///
/// Conversion
///
/// Shape of a recursive field conversion. Wrappers are peeled in lockstep on
/// both sides until a composite pair (or an overridden pair) is reached.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Conversion {
    Call {
        function: String,
        from: TypeRef,
        to: TypeRef,
        manual: bool,
    },
    Option(Box<Self>),
    List(Box<Self>),
    /// Keys are identical and cloned; values are converted.
    Map(Box<Self>),
}

impl Conversion {
    /// Name of the innermost function this conversion calls.
    #[must_use]
    pub fn function(&self) -> &str {
        match self {
            Self::Call { function, .. } => function,
            Self::Option(inner) | Self::List(inner) | Self::Map(inner) => inner.function(),
        }
    }

    fn collect_pairs(&self, pairs: &mut Vec<TypePair>) {
        match self {
            Self::Call {
                from: TypeRef::Named(from),
                to: TypeRef::Named(to),
                manual: false,
                ..
            } => pairs.push((from.clone(), to.clone())),
            Self::Call { .. } => {}
            Self::Option(inner) | Self::List(inner) | Self::Map(inner) => {
                inner.collect_pairs(pairs);
            }
        }
    }
}
