use std::collections::BTreeMap;

///
/// PackageAliasTable
///
/// Module identifier each version is referred to by in emitted code. An
/// empty alias means the version's types are in scope unqualified; a version
/// with no entry is qualified by its own identifier. Alias syntax is the
/// caller's responsibility.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PackageAliasTable {
    aliases: BTreeMap<String, String>,
}

impl PackageAliasTable {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            aliases: BTreeMap::new(),
        }
    }

    /// Overwrite the alias for `version`; the last write wins.
    pub fn set_alias(&mut self, version: impl Into<String>, alias: impl Into<String>) {
        self.aliases.insert(version.into(), alias.into());
    }

    /// Drop any alias so `version` is qualified by its own identifier again.
    pub fn remove(&mut self, version: &str) -> Option<String> {
        self.aliases.remove(version)
    }

    #[must_use]
    pub fn alias(&self, version: &str) -> Option<&str> {
        self.aliases.get(version).map(String::as_str)
    }

    /// Module path prefix for `version`, or `None` when unqualified.
    #[must_use]
    pub fn qualifier<'a>(&'a self, version: &'a str) -> Option<&'a str> {
        match self.alias(version) {
            Some("") => None,
            Some(alias) => Some(alias),
            None => Some(version),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_versions_qualify_with_themselves() {
        let table = PackageAliasTable::new();

        assert_eq!(table.qualifier("api"), Some("api"));
    }

    #[test]
    fn empty_alias_means_unqualified() {
        let mut table = PackageAliasTable::new();
        table.set_alias("v1", "");

        assert_eq!(table.qualifier("v1"), None);
        assert_eq!(table.alias("v1"), Some(""));
    }

    #[test]
    fn last_write_wins_and_remove_restores_default() {
        let mut table = PackageAliasTable::new();
        table.set_alias("api", "older");
        table.set_alias("api", "newer");
        assert_eq!(table.qualifier("api"), Some("newer"));

        assert_eq!(table.remove("api"), Some("newer".to_string()));
        assert_eq!(table.qualifier("api"), Some("api"));
    }
}
