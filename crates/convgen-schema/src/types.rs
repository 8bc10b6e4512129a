use derive_more::Display;
use proc_macro2::TokenStream;
use quote::quote;
use std::fmt;

///
/// Primitive
///
/// Leaf field types. Two primitives only match when they are the same
/// variant; width changes need a manual override.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[remain::sorted]
pub enum Primitive {
    Blob,
    Bool,
    Float32,
    Float64,
    Int8,
    Int16,
    Int32,
    Int64,
    Nat8,
    Nat16,
    Nat32,
    Nat64,
    Text,
}

impl Primitive {
    pub const ALL: [Self; 13] = [
        Self::Blob,
        Self::Bool,
        Self::Float32,
        Self::Float64,
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::Nat8,
        Self::Nat16,
        Self::Nat32,
        Self::Nat64,
        Self::Text,
    ];

    /// Look a primitive up by its exact schema spelling.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.to_string() == name)
    }

    #[must_use]
    pub const fn supports_copy(self) -> bool {
        !matches!(self, Self::Blob | Self::Text)
    }

    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Float32
                | Self::Float64
                | Self::Int8
                | Self::Int16
                | Self::Int32
                | Self::Int64
                | Self::Nat8
                | Self::Nat16
                | Self::Nat32
                | Self::Nat64
        )
    }

    /// Rust type this primitive is emitted as.
    #[must_use]
    pub fn as_type(self) -> TokenStream {
        match self {
            Self::Blob => quote!(Vec<u8>),
            Self::Bool => quote!(bool),
            Self::Float32 => quote!(f32),
            Self::Float64 => quote!(f64),
            Self::Int8 => quote!(i8),
            Self::Int16 => quote!(i16),
            Self::Int32 => quote!(i32),
            Self::Int64 => quote!(i64),
            Self::Nat8 => quote!(u8),
            Self::Nat16 => quote!(u16),
            Self::Nat32 => quote!(u32),
            Self::Nat64 => quote!(u64),
            Self::Text => quote!(String),
        }
    }
}

///
/// TypeKey
/// Identity of one composite type: the version it belongs to plus its name.
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TypeKey {
    pub version: String,
    pub name: String,
}

impl TypeKey {
    pub fn new(version: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.version, self.name)
    }
}

///
/// TypeRef
///
/// Declared type of a field. `Pointer` is emitted as `Option<Box<T>>`,
/// `Slice` as `Vec<T>` and `Map` as `BTreeMap<K, V>`.
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum TypeRef {
    Primitive(Primitive),
    Named(TypeKey),
    Pointer(Box<Self>),
    Slice(Box<Self>),
    Map { key: Box<Self>, value: Box<Self> },
}

impl TypeRef {
    pub fn named(version: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Named(TypeKey::new(version, name))
    }

    #[must_use]
    pub fn pointer(inner: Self) -> Self {
        Self::Pointer(Box::new(inner))
    }

    #[must_use]
    pub fn slice(inner: Self) -> Self {
        Self::Slice(Box::new(inner))
    }

    #[must_use]
    pub fn map(key: Self, value: Self) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// True when a composite appears anywhere inside this type.
    #[must_use]
    pub fn contains_named(&self) -> bool {
        match self {
            Self::Primitive(_) => false,
            Self::Named(_) => true,
            Self::Pointer(inner) | Self::Slice(inner) => inner.contains_named(),
            Self::Map { key, value } => key.contains_named() || value.contains_named(),
        }
    }

    /// Every composite referenced by this type, outermost first.
    #[must_use]
    pub fn named_keys(&self) -> Vec<&TypeKey> {
        let mut keys = Vec::new();
        self.collect_named(&mut keys);

        keys
    }

    fn collect_named<'a>(&'a self, keys: &mut Vec<&'a TypeKey>) {
        match self {
            Self::Primitive(_) => {}
            Self::Named(key) => keys.push(key),
            Self::Pointer(inner) | Self::Slice(inner) => inner.collect_named(keys),
            Self::Map { key, value } => {
                key.collect_named(keys);
                value.collect_named(keys);
            }
        }
    }

    /// A value of this type can be duplicated with a plain assignment.
    #[must_use]
    pub const fn is_copy(&self) -> bool {
        match self {
            Self::Primitive(p) => p.supports_copy(),
            _ => false,
        }
    }
}

impl From<Primitive> for TypeRef {
    fn from(p: Primitive) -> Self {
        Self::Primitive(p)
    }
}

// renders the same syntax `parse` accepts, always fully qualified
impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(p) => write!(f, "{p}"),
            Self::Named(key) => write!(f, "{key}"),
            Self::Pointer(inner) => write!(f, "Option<{inner}>"),
            Self::Slice(inner) => write!(f, "Vec<{inner}>"),
            Self::Map { key, value } => write!(f, "Map<{key}, {value}>"),
        }
    }
}
