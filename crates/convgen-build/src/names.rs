use convgen_schema::types::TypeKey;
use std::{
    collections::BTreeSet,
    io::{self, Write},
};

/// Canonical function name for converting `from` into `to`.
///
/// Built from version identifiers, not aliases, so renaming a module import
/// never renames a generated function.
#[must_use]
pub fn conversion_function_name(from: &TypeKey, to: &TypeKey) -> String {
    format!(
        "Convert_{}_{}_To_{}_{}",
        from.version, from.name, to.version, to.name
    )
}

///
/// NameRegistry
/// Generated function names in the order they were committed.
///

#[derive(Clone, Debug, Default)]
pub struct NameRegistry {
    names: Vec<String>,
    seen: BTreeSet<String>,
}

impl NameRegistry {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            names: Vec::new(),
            seen: BTreeSet::new(),
        }
    }

    /// Append a name; returns false (and keeps the first position) if it
    /// was already registered.
    pub fn push(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if !self.seen.insert(name.clone()) {
            return false;
        }
        self.names.push(name);

        true
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Write the registration list body, one `\t\tName,` line per function.
    pub fn write_to<W: Write + ?Sized>(&self, sink: &mut W) -> io::Result<()> {
        for name in &self.names {
            writeln!(sink, "\t\t{name},")?;
        }

        Ok(())
    }
}
