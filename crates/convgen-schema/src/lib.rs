//! Type registry for the conversion generator.
//!
//! Holds the per-version composite type tables the generator walks, the
//! manual-override table that takes precedence over generated code, and the
//! TOML loader that builds both from a schema file.

pub mod build;
pub mod error;
pub mod load;
pub mod node;
pub mod overrides;
pub mod parse;
pub mod registry;
pub mod types;
pub mod validate;

/// Maximum length for type identifiers.
pub const MAX_TYPE_NAME_LEN: usize = 64;

/// Maximum length for field identifiers.
pub const MAX_FIELD_NAME_LEN: usize = 64;

use crate::{error::ErrorTree, parse::TypeParseError};
use std::path::PathBuf;
use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        build::TypeRegistryBuilder,
        err,
        error::ErrorTree,
        node::{FieldDescriptor, FieldList, TypeDescriptor},
        overrides::OverrideRegistry,
        registry::TypeRegistry,
        types::{Primitive, TypeKey, TypeRef},
    };
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] TypeParseError),

    #[error("schema validation failed:\n{0}")]
    Validation(ErrorTree),

    #[error("failed to parse schema file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to read schema file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
