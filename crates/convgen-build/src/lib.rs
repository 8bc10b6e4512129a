//! Conversion-function generator.
//!
//! Walks a versioned type family and its internal counterpart, plans a
//! field-by-field conversion for every matching pair, and renders each plan
//! as a Rust function. Output depends only on the registries, the alias
//! table and the order generation is requested in.

pub mod alias;
pub mod emit;
pub mod error;
pub mod generator;
pub mod matcher;
pub mod names;
pub mod plan;
pub mod planner;

pub use alias::PackageAliasTable;
pub use emit::{CodeEmitter, EmitOptions, GeneratedFunction};
pub use error::{EmitError, FailureCause, FieldFailure, GenerateError, GenerationError};
pub use generator::Generator;
pub use matcher::FieldMatcher;
pub use names::{NameRegistry, conversion_function_name};
pub use plan::{Conversion, ConversionPlan, FieldOperation, TypePair};
pub use planner::ConversionPlanner;
