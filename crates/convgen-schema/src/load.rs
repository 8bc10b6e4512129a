//! TOML schema files.
//!
//! A schema file lists every known type per version plus the manual
//! overrides. Loading parses each type expression, validates the resulting
//! registry and reports all problems together.

use crate::{
    Error,
    build::TypeRegistryBuilder,
    error::ErrorTree,
    node::TypeDescriptor,
    overrides::OverrideRegistry,
    parse::parse_type,
    registry::TypeRegistry,
    validate::naming::validate_path,
};
use serde::Deserialize;
use std::{fs, path::Path};

///
/// SchemaFile
///

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaFile {
    #[serde(default)]
    pub types: Vec<TypeEntry>,

    #[serde(default)]
    pub overrides: Vec<OverrideEntry>,
}

///
/// TypeEntry
///

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeEntry {
    pub version: String,
    pub name: String,

    #[serde(default)]
    pub fields: Vec<FieldEntry>,
}

///
/// FieldEntry
///

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldEntry {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: String,
}

///
/// OverrideEntry
///

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OverrideEntry {
    pub source: String,
    pub destination: String,
    pub function: String,
}

///
/// Schema
/// The two registries a generator reads.
///

#[derive(Clone, Debug)]
pub struct Schema {
    pub registry: TypeRegistry,
    pub overrides: OverrideRegistry,
}

/// Parse a schema from TOML text.
pub fn load_str(text: &str) -> Result<Schema, Error> {
    let file: SchemaFile = toml::from_str(text)?;

    file.into_schema()
}

/// Read and parse a schema file.
pub fn load_file(path: &Path) -> Result<Schema, Error> {
    let text = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    load_str(&text)
}

impl SchemaFile {
    pub fn into_schema(self) -> Result<Schema, Error> {
        let mut errs = ErrorTree::new();
        let mut builder = TypeRegistryBuilder::new();

        for entry in self.types {
            let route = format!("{}::{}", entry.version, entry.name);
            let mut desc = TypeDescriptor::new(&entry.version, &entry.name);

            for field in entry.fields {
                match parse_type(&field.ty, Some(&entry.version)) {
                    Ok(ty) => desc = desc.with_field(field.name, ty),
                    Err(e) => errs.add_for(format!("{route}.{}", field.name), e),
                }
            }

            builder.register(desc);
        }

        let mut overrides = OverrideRegistry::new();
        for (i, entry) in self.overrides.into_iter().enumerate() {
            let route = format!("overrides[{i}]");
            let source = parse_type(&entry.source, None);
            let destination = parse_type(&entry.destination, None);

            if let Err(msg) = validate_path(&entry.function) {
                errs.add_for(route.clone(), msg);
            }

            match (source, destination) {
                (Ok(source), Ok(destination)) => {
                    if let Some(prev) = overrides.register(source, destination, &entry.function) {
                        errs.add_for(route, format!("pair already overridden by '{prev}'"));
                    }
                }
                (source, destination) => {
                    for e in [source.err(), destination.err()].into_iter().flatten() {
                        errs.add_for(route.clone(), e);
                    }
                }
            }
        }

        // field parse errors first; registry validation would only repeat them
        errs.result().map_err(Error::Validation)?;
        let registry = builder.build()?;

        let mut errs = ErrorTree::new();
        for (source, destination, function) in overrides.iter() {
            for key in source.named_keys().into_iter().chain(destination.named_keys()) {
                if !registry.contains(key) {
                    errs.add(format!("override '{function}' references unknown type '{key}'"));
                }
            }
        }
        errs.result().map_err(Error::Validation)?;

        Ok(Schema {
            registry,
            overrides,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Primitive, TypeRef};

    const SCHEMA: &str = r#"
[[types]]
version = "v1"
name = "Pod"
fields = [
    { name = "name", type = "Text" },
    { name = "spec", type = "PodSpec" },
]

[[types]]
version = "v1"
name = "PodSpec"
fields = [{ name = "replicas", type = "Int32" }]

[[types]]
version = "api"
name = "PodSpec"
fields = [{ name = "replicas", type = "Int64" }]

[[overrides]]
source = "v1::PodSpec"
destination = "api::PodSpec"
function = "crate::manual::pod_spec_to_api"
"#;

    #[test]
    fn loads_types_and_overrides() {
        let schema = load_str(SCHEMA).unwrap();

        let pod = schema.registry.lookup("v1", "Pod").unwrap();
        assert_eq!(pod.field("spec").unwrap().ty, TypeRef::named("v1", "PodSpec"));
        assert_eq!(
            pod.field("name").unwrap().ty,
            TypeRef::Primitive(Primitive::Text)
        );
        assert_eq!(
            schema.overrides.lookup(
                &TypeRef::named("v1", "PodSpec"),
                &TypeRef::named("api", "PodSpec")
            ),
            Some("crate::manual::pod_spec_to_api")
        );
    }

    #[test]
    fn reports_bad_field_types_by_route() {
        let text = r#"
[[types]]
version = "v1"
name = "Pod"
fields = [{ name = "spec", type = "Vec<" }]
"#;
        let Err(Error::Validation(tree)) = load_str(text) else {
            panic!("expected validation error");
        };

        assert!(tree.to_string().starts_with("v1::Pod.spec: unexpected end"));
    }

    #[test]
    fn overrides_must_reference_known_types() {
        let text = r#"
[[overrides]]
source = "v1::Missing"
destination = "Text"
function = "convert_missing"
"#;
        let Err(Error::Validation(tree)) = load_str(text) else {
            panic!("expected validation error");
        };

        assert!(tree.to_string().contains("unknown type 'v1::Missing'"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            load_str("[[types]]\nversion = \"v1\"\nname = \"Pod\"\nkind = \"struct\"\n"),
            Err(Error::Toml(_))
        ));
    }
}
