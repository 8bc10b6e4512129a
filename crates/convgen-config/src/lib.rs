//! Run configuration for the conversion generator.
//!
//! A `convgen.toml` names the schema file, the internal version, the alias
//! table and one target file per versioned package. Relative paths resolve
//! against the directory the config was loaded from.

use serde::Deserialize;
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;

/// Conventional config file name.
pub const CONFIG_FILE: &str = "convgen.toml";

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config '{}': {source}", path.display())]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("version '{version}' is not registered in the schema")]
    UnknownVersion { version: String },

    #[error("no target configured for version '{version}'")]
    MissingTarget { version: String },

    #[error("target '{version}' is the internal version")]
    InternalTarget { version: String },
}

///
/// Config
///

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_schema")]
    pub schema: PathBuf,

    pub internal_version: String,

    /// Applied to the generator before any target-specific alias.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,

    pub targets: Vec<Target>,

    #[serde(default)]
    pub emit: EmitConfig,

    #[serde(default)]
    pub markers: Markers,

    #[serde(skip)]
    root: PathBuf,
}

fn default_schema() -> PathBuf {
    PathBuf::from("schema.toml")
}

impl Config {
    /// Load a config file; its directory becomes the root for relative paths.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let root = path.parent().unwrap_or_else(|| Path::new("."));

        Self::parse(&text, root).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse config text with an explicit root directory.
    pub fn parse(text: &str, root: &Path) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(text)?;
        config.root = root.to_path_buf();

        Ok(config)
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn schema_path(&self) -> PathBuf {
        self.resolve(&self.schema)
    }

    #[must_use]
    pub fn output_path(&self, target: &Target) -> PathBuf {
        self.resolve(&target.output)
    }

    pub fn target(&self, version: &str) -> Result<&Target, ConfigError> {
        self.targets
            .iter()
            .find(|t| t.version == version)
            .ok_or_else(|| ConfigError::MissingTarget {
                version: version.to_string(),
            })
    }

    /// One target when `version` is given, otherwise all of them in file
    /// order.
    pub fn select(&self, version: Option<&str>) -> Result<Vec<&Target>, ConfigError> {
        match version {
            Some(version) => Ok(vec![self.target(version)?]),
            None => Ok(self.targets.iter().collect()),
        }
    }

    /// Every version the config names must exist in the schema, and no
    /// target may name the internal version.
    pub fn check_versions(&self, is_known: impl Fn(&str) -> bool) -> Result<(), ConfigError> {
        if let Some(target) = self
            .targets
            .iter()
            .find(|t| t.version == self.internal_version)
        {
            return Err(ConfigError::InternalTarget {
                version: target.version.clone(),
            });
        }

        let named = std::iter::once(self.internal_version.as_str())
            .chain(self.targets.iter().map(|t| t.version.as_str()));

        for version in named {
            if !is_known(version) {
                return Err(ConfigError::UnknownVersion {
                    version: version.to_string(),
                });
            }
        }

        Ok(())
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

///
/// Target
/// One versioned package and the committed file holding its generated code.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Target {
    pub version: String,
    pub output: PathBuf,

    /// Alias for this version while its file is generated; empty means the
    /// versioned types are in scope unqualified.
    #[serde(default)]
    pub alias: String,
}

///
/// EmitConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct EmitConfig {
    pub scope_type: String,
    pub error_type: String,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            scope_type: "Scope".to_string(),
            error_type: "ConversionError".to_string(),
        }
    }
}

///
/// Markers
/// Literal lines delimiting the generated sections of a target file.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Markers {
    pub functions_start: String,
    pub functions_end: String,
    pub names_start: String,
    pub names_end: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            functions_start: "// AUTO-GENERATED FUNCTIONS START HERE".to_string(),
            functions_end: "// AUTO-GENERATED FUNCTIONS END HERE".to_string(),
            names_start: "\tscheme.add_generated_conversion_funcs(".to_string(),
            names_end: "\t)".to_string(),
        }
    }
}
