use convgen_schema::types::{Primitive, TypeKey, TypeRef};
use std::fmt;
use thiserror::Error as ThisError;

///
/// GenerateError
/// Returned by `Generator::generate_conversions_for_type`. None of these
/// touch the generator's accumulated output.
///

#[derive(Debug, ThisError)]
pub enum GenerateError {
    #[error("type '{name}' is not registered for version '{version}'")]
    UnknownType { version: String, name: String },

    #[error("type '{name}' has no counterpart in internal version '{internal_version}'")]
    MissingInternalType {
        name: String,
        internal_version: String,
    },

    #[error("'{version}' is the internal version; request the versioned side instead")]
    InternalVersion { version: String },

    #[error("function name '{name}' for {from} -> {to} is already used by another conversion")]
    NameClash {
        name: String,
        from: TypeKey,
        to: TypeKey,
    },

    #[error(transparent)]
    Type(#[from] GenerationError),

    #[error(transparent)]
    Emit(#[from] EmitError),
}

///
/// GenerationError
///
/// Every field problem found while planning one requested type, including
/// problems in nested types it pulled in. The type produced no output.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("cannot generate conversions for {ty}: {}", join_failures(.failures))]
pub struct GenerationError {
    pub ty: TypeKey,
    pub failures: Vec<FieldFailure>,
}

impl GenerationError {
    /// True when some failure names this field.
    #[must_use]
    pub fn mentions_field(&self, field: &str) -> bool {
        self.failures
            .iter()
            .any(|f| f.field.as_deref() == Some(field))
    }
}

fn join_failures(failures: &[FieldFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

///
/// FieldFailure
/// One unmatched or incompatible field of a (from, to) pair.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldFailure {
    pub from: TypeKey,
    pub to: TypeKey,
    pub field: Option<String>,
    pub cause: FailureCause,
}

impl fmt::Display for FieldFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(
                f,
                "{} -> {}: field '{field}': {}",
                self.from, self.to, self.cause
            ),
            None => write!(f, "{} -> {}: {}", self.from, self.to, self.cause),
        }
    }
}

///
/// FailureCause
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum FailureCause {
    #[error("no matching destination field")]
    NoMatchingDestinationField,

    #[error("no matching source field")]
    NoMatchingSourceField,

    #[error("incompatible types {from} and {to}{}", numeric_hint(.from, .to))]
    IncompatibleTypes { from: TypeRef, to: TypeRef },

    #[error("type {0} is not registered")]
    UnknownType(TypeKey),
}

fn numeric_hint(from: &TypeRef, to: &TypeRef) -> &'static str {
    match (from, to) {
        (TypeRef::Primitive(a), TypeRef::Primitive(b))
            if Primitive::is_numeric(*a) && Primitive::is_numeric(*b) =>
        {
            " (numeric conversions need a manual override)"
        }
        _ => "",
    }
}

///
/// EmitError
/// A plan could not be rendered, usually because a configured alias or
/// override name is not a valid Rust path.
///

#[derive(Debug, ThisError)]
pub enum EmitError {
    #[error("'{path}' is not a valid Rust path: {error}")]
    InvalidPath { path: String, error: syn::Error },

    #[error("'{ty}' is not a valid Rust type: {error}")]
    InvalidType { ty: String, error: syn::Error },

    #[error("generated tokens for '{function}' did not parse: {error}")]
    Tokens { function: String, error: syn::Error },

    #[error("'{function}' cannot be emitted: field '{field}' was skipped")]
    Incomplete { function: String, field: String },
}
