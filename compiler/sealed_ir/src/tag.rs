//! Runtime tags: what `TypeTest` patterns compare against.

use std::fmt;

use crate::{Name, StringLookup};

/// Kind of a primitive scalar.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum PrimKind {
    Int,
    Float,
    Bool,
    Char,
    Str,
    Unit,
}

impl PrimKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PrimKind::Int => "int",
            PrimKind::Float => "float",
            PrimKind::Bool => "bool",
            PrimKind::Char => "char",
            PrimKind::Str => "str",
            PrimKind::Unit => "unit",
        }
    }
}

impl fmt::Display for PrimKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The runtime tag of a value, or the expected tag of a type test.
///
/// `Named` covers both record tags and sum type names; which one it is
/// depends on the [`TypeRegistry`](crate::TypeRegistry) it was declared in.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeTag {
    Prim(PrimKind),
    Named(Name),
}

impl TypeTag {
    /// Render for diagnostics.
    pub fn describe(self, names: &impl StringLookup) -> String {
        match self {
            TypeTag::Prim(kind) => kind.as_str().to_string(),
            TypeTag::Named(name) => names.lookup(name).to_string(),
        }
    }
}

impl From<PrimKind> for TypeTag {
    fn from(kind: PrimKind) -> Self {
        TypeTag::Prim(kind)
    }
}

impl From<Name> for TypeTag {
    fn from(name: Name) -> Self {
        TypeTag::Named(name)
    }
}
