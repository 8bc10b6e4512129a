
use crate::{
    alias::PackageAliasTable,
    emit::{CodeEmitter, EmitOptions, GeneratedFunction},
    error::{GenerateError, GenerationError},
    names::NameRegistry,
    plan::TypePair,
    planner::ConversionPlanner,
};
use convgen_schema::{overrides::OverrideRegistry, registry::TypeRegistry};
use std::{
    collections::BTreeSet,
    io::{self, Write},
};
use tracing::debug;

///
/// Generator
///
/// One generation session. Borrows the registries, owns the alias table and
/// everything generated so far. A request either commits all of its
/// functions or none of them.
///

#[derive(Debug)]
pub struct Generator<'a> {
    registry: &'a TypeRegistry,
    overrides: &'a OverrideRegistry,
    internal_version: String,
    aliases: PackageAliasTable,
    options: EmitOptions,
    generated: BTreeSet<TypePair>,
    functions: Vec<GeneratedFunction>,
    names: NameRegistry,
}

impl<'a> Generator<'a> {
    pub fn new(
        registry: &'a TypeRegistry,
        overrides: &'a OverrideRegistry,
        internal_version: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            overrides,
            internal_version: internal_version.into(),
            aliases: PackageAliasTable::new(),
            options: EmitOptions::default(),
            generated: BTreeSet::new(),
            functions: Vec::new(),
            names: NameRegistry::new(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: EmitOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the module identifier `version` is emitted under. Affects only
    /// functions generated after the call.
    pub fn overwrite_package(&mut self, version: impl Into<String>, alias: impl Into<String>) {
        self.aliases.set_alias(version, alias);
    }

    #[must_use]
    pub const fn aliases(&self) -> &PackageAliasTable {
        &self.aliases
    }

    #[must_use]
    pub fn internal_version(&self) -> &str {
        &self.internal_version
    }

    /// Generate both directions between `version::name` and its internal
    /// counterpart, plus every nested conversion they need.
    pub fn generate_conversions_for_type(
        &mut self,
        version: &str,
        name: &str,
    ) -> Result<(), GenerateError> {
        if version == self.internal_version {
            return Err(GenerateError::InternalVersion {
                version: version.to_string(),
            });
        }

        let versioned =
            self.registry
                .lookup(version, name)
                .ok_or_else(|| GenerateError::UnknownType {
                    version: version.to_string(),
                    name: name.to_string(),
                })?;
        let internal = self
            .registry
            .lookup(&self.internal_version, name)
            .ok_or_else(|| GenerateError::MissingInternalType {
                name: name.to_string(),
                internal_version: self.internal_version.clone(),
            })?;

        let roots = [
            (versioned.key().clone(), internal.key().clone()),
            (internal.key().clone(), versioned.key().clone()),
        ];
        if roots.iter().all(|pair| self.generated.contains(pair)) {
            debug!(%version, %name, "already generated");
            return Ok(());
        }

        let planner = ConversionPlanner::new(self.registry, self.overrides);
        let plans = planner
            .plan_closure(&roots, &self.generated)
            .map_err(|failures| GenerationError {
                ty: versioned.key().clone(),
                failures,
            })?;

        // render everything before touching accumulated state
        let emitter = CodeEmitter::new(&self.aliases, &self.options);
        let start = self.functions.len();
        let staged = plans
            .iter()
            .enumerate()
            .map(|(i, plan)| emitter.emit(plan, start + i))
            .collect::<Result<Vec<_>, _>>()?;

        let mut staged_names = BTreeSet::new();
        for (plan, function) in plans.iter().zip(&staged) {
            if self.names.contains(&function.name) || !staged_names.insert(function.name.as_str())
            {
                return Err(GenerateError::NameClash {
                    name: function.name.clone(),
                    from: plan.source().clone(),
                    to: plan.destination().clone(),
                });
            }
        }

        for (plan, function) in plans.into_iter().zip(staged) {
            self.generated
                .insert((plan.source().clone(), plan.destination().clone()));
            let fresh = self.names.push(function.name.clone());
            debug_assert!(fresh, "name '{}' was checked above", function.name);
            self.functions.push(function);
        }
        debug!(
            %version,
            %name,
            functions = self.functions.len() - start,
            "generated conversions"
        );

        Ok(())
    }

    /// Write every accumulated function, in generation order, separated by
    /// a blank line.
    pub fn write_conversion_functions<W: Write + ?Sized>(&self, sink: &mut W) -> io::Result<()> {
        for (i, function) in self.functions.iter().enumerate() {
            if i > 0 {
                writeln!(sink)?;
            }
            sink.write_all(function.source.as_bytes())?;
        }

        Ok(())
    }

    /// Write the registration list, one `\t\tName,` line per function.
    pub fn write_conversion_function_names<W: Write + ?Sized>(
        &self,
        sink: &mut W,
    ) -> io::Result<()> {
        self.names.write_to(sink)
    }

    #[must_use]
    pub fn functions(&self) -> &[GeneratedFunction] {
        &self.functions
    }

    #[must_use]
    pub const fn names(&self) -> &NameRegistry {
        &self.names
    }

    /// True once the pair has been committed by an earlier request.
    #[must_use]
    pub fn is_generated(&self, pair: &TypePair) -> bool {
        self.generated.contains(pair)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
