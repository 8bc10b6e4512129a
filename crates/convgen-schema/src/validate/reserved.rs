use std::{collections::BTreeSet, sync::LazyLock};

// Rust keywords plus every name the type-expression grammar already claims.
pub(crate) static WORDS: LazyLock<BTreeSet<&'static str>> = LazyLock::new(|| {
    [
        "Box", "Map", "Option", "Self", "String", "Vec", "abstract", "as", "async", "await",
        "become", "box", "break", "const", "continue", "crate", "do", "dyn", "else", "enum",
        "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in", "let", "loop",
        "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref", "return",
        "self", "static", "struct", "super", "trait", "true", "try", "type", "typeof",
        "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
    ]
    .into_iter()
    .collect()
});
