use crate::Error;
use convgen_build::{EmitOptions, GenerateError, Generator};
use convgen_config::{Config, Target};
use convgen_schema::{
    load::{Schema, load_file},
    overrides::OverrideRegistry,
    registry::TypeRegistry,
};
use std::path::Path;
use tracing::{debug, info, warn};

///
/// Project
/// A loaded config together with the schema it points at.
///

#[derive(Debug)]
pub struct Project {
    pub config: Config,
    pub schema: Schema,
}

impl Project {
    pub fn load(config_path: &Path) -> Result<Self, Error> {
        let config = Config::load(config_path)?;
        let schema = load_file(&config.schema_path())?;
        config.check_versions(|version| schema.registry.has_version(version))?;
        info!(
            types = schema.registry.len(),
            overrides = schema.overrides.len(),
            "loaded schema"
        );

        Ok(Self { config, schema })
    }

    /// Generate the functions of one configured target version.
    pub fn generate(&self, version: &str) -> Result<GeneratedOutput, Error> {
        let target = self.config.target(version)?;

        generate_version(
            &self.schema.registry,
            &self.schema.overrides,
            &self.config,
            target,
        )
    }
}

///
/// GeneratedOutput
///

#[derive(Debug)]
pub struct GeneratedOutput {
    pub version: String,
    pub functions: String,
    pub names: String,

    /// Types that produced nothing, in the order they were requested.
    pub failures: Vec<TypeFailure>,
}

impl GeneratedOutput {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

///
/// TypeFailure
///

#[derive(Debug)]
pub struct TypeFailure {
    pub name: String,
    pub error: GenerateError,
}

/// Request every known type of the target's version, in name order, and
/// serialize what succeeded. Failed types are logged and collected; they
/// never stop the run.
pub fn generate_version(
    registry: &TypeRegistry,
    overrides: &OverrideRegistry,
    config: &Config,
    target: &Target,
) -> Result<GeneratedOutput, Error> {
    let options = EmitOptions {
        scope_type: config.emit.scope_type.clone(),
        error_type: config.emit.error_type.clone(),
    };
    let mut generator =
        Generator::new(registry, overrides, &config.internal_version).with_options(options);

    for (version, alias) in &config.aliases {
        generator.overwrite_package(version, alias);
    }
    generator.overwrite_package(&target.version, &target.alias);

    let mut failures = Vec::new();
    for desc in registry.known_types(&target.version) {
        if let Err(error) = generator.generate_conversions_for_type(&target.version, desc.name()) {
            warn!(
                version = %target.version,
                name = desc.name(),
                %error,
                "error while generating conversion functions"
            );
            failures.push(TypeFailure {
                name: desc.name().to_string(),
                error,
            });
        }
    }

    let mut functions = Vec::new();
    let mut names = Vec::new();
    generator
        .write_conversion_functions(&mut functions)
        .map_err(Error::Serialize)?;
    generator
        .write_conversion_function_names(&mut names)
        .map_err(Error::Serialize)?;
    debug!(
        version = %target.version,
        functions = generator.functions().len(),
        failed = failures.len(),
        "generated version"
    );

    Ok(GeneratedOutput {
        version: target.version.clone(),
        functions: String::from_utf8_lossy(&functions).into_owned(),
        names: String::from_utf8_lossy(&names).into_owned(),
        failures,
    })
}
