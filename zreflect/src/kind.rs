//! Coarse structural categories of reflected types.

use core::fmt;

use serde::Serialize;

/// The structural category of a type, distinct from its exact name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Kind {
    /// The unit type.
    Unit,
    /// Booleans.
    Bool,
    /// Signed integers.
    Int,
    /// Unsigned integers.
    Uint,
    /// Floating point numbers.
    Float,
    /// A single character.
    Char,
    /// Text.
    String,
    /// Variable-length sequences.
    Sequence,
    /// Key-value mappings.
    Map,
    /// An optional value.
    Option,
    /// A pointer-like handle owning another value.
    Pointer,
    /// A record (struct with named fields).
    Record,
    /// A type-erased value that may hold any reflected type.
    Dynamic,
    /// A function or method.
    Function,
    /// A foreign type with no finer structure exposed.
    Opaque,
}

impl Kind {
    /// The lowercase name of the kind.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Kind::Unit => "unit",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Uint => "uint",
            Kind::Float => "float",
            Kind::Char => "char",
            Kind::String => "string",
            Kind::Sequence => "sequence",
            Kind::Map => "map",
            Kind::Option => "option",
            Kind::Pointer => "pointer",
            Kind::Record => "record",
            Kind::Dynamic => "dynamic",
            Kind::Function => "function",
            Kind::Opaque => "opaque",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Kind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
