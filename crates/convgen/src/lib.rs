//! Conversion-function generator.
//!
//! Ties the schema registry, the generator and the run configuration
//! together: load a project, generate a version's functions, splice them
//! into the committed file, or verify that file has not been edited by hand.

pub mod driver;
pub mod splice;
pub mod verify;

pub use convgen_build as build;
pub use convgen_config as config;
pub use convgen_schema as schema;

pub use driver::{GeneratedOutput, Project, TypeFailure, generate_version};
pub use verify::{LineDiff, Section, Sections, VerifyError, VerifyReport};

use convgen_build::GenerateError;
use convgen_config::ConfigError;
use std::path::PathBuf;
use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        Error, Project,
        build::{EmitOptions, Generator, PackageAliasTable},
        config::Config,
        schema::prelude::*,
    };
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] convgen_schema::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    Verify(#[from] VerifyError),

    #[error("failed to serialize generated code: {0}")]
    Serialize(std::io::Error),

    #[error("failed to access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();

        move |source| Self::Io { path, source }
    }
}
