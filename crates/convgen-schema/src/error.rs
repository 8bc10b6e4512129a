use std::{collections::BTreeMap, fmt};

///
/// ErrorTree
///
/// Route-aware error accumulator. Validation keeps going after the first
/// problem so one pass reports everything; routes are kept sorted so the
/// rendered report is stable.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ErrorTree {
    messages: Vec<String>,
    children: BTreeMap<String, Self>,
}

impl ErrorTree {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            messages: Vec::new(),
            children: BTreeMap::new(),
        }
    }

    /// Record a message at the current level.
    pub fn add(&mut self, message: impl ToString) {
        self.messages.push(message.to_string());
    }

    /// Record a message under a child route.
    pub fn add_for(&mut self, route: impl Into<String>, message: impl ToString) {
        self.children
            .entry(route.into())
            .or_default()
            .add(message);
    }

    /// Fold another tree in under a child route; empty trees are dropped.
    pub fn merge_for(&mut self, route: impl Into<String>, other: Self) {
        if other.is_empty() {
            return;
        }

        let child = self.children.entry(route.into()).or_default();
        child.messages.extend(other.messages);
        for (route, tree) in other.children {
            child.merge_for(route, tree);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.children.values().all(Self::is_empty)
    }

    /// Total number of messages across every route.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len() + self.children.values().map(Self::len).sum::<usize>()
    }

    /// Flatten into `route: message` lines, parents before children.
    #[must_use]
    pub fn flatten(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.flatten_into(None, &mut out);

        out
    }

    fn flatten_into(&self, prefix: Option<&str>, out: &mut Vec<String>) {
        for message in &self.messages {
            match prefix {
                Some(route) => out.push(format!("{route}: {message}")),
                None => out.push(message.clone()),
            }
        }

        for (route, child) in &self.children {
            let route = match prefix {
                Some(parent) => format!("{parent}.{route}"),
                None => route.clone(),
            };
            child.flatten_into(Some(&route), out);
        }
    }

    /// Convert into a `Result`, succeeding only when nothing was recorded.
    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.flatten() {
            writeln!(f, "{line}")?;
        }

        Ok(())
    }
}

/// Format a message straight into an [`ErrorTree`].
#[macro_export]
macro_rules! err {
    ($errs:expr, $($arg:tt)*) => {
        $errs.add(format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tree_is_ok() {
        assert!(ErrorTree::new().result().is_ok());
    }

    #[test]
    fn routes_flatten_in_sorted_order() {
        let mut errs = ErrorTree::new();
        errs.add_for("v1::Pod", "second");
        errs.add_for("api::Pod", "first");
        err!(errs, "top {}", 1);

        assert_eq!(
            errs.flatten(),
            vec![
                "top 1".to_string(),
                "api::Pod: first".to_string(),
                "v1::Pod: second".to_string(),
            ]
        );
        assert_eq!(errs.len(), 3);
    }

    #[test]
    fn merge_skips_empty_children() {
        let mut errs = ErrorTree::new();
        errs.merge_for("v1::Pod", ErrorTree::new());
        assert!(errs.is_empty());

        let mut child = ErrorTree::new();
        child.add_for("name", "bad");
        errs.merge_for("v1::Pod", child);

        assert_eq!(errs.flatten(), vec!["v1::Pod.name: bad".to_string()]);
    }
}
