//! The fixed catalog of CQL type codes and their symbolic names.
//!
//! The table is a `static` built at compile time and never mutated, so it can
//! be shared freely across threads without synchronisation.

use core::fmt;

use crate::errors::Error;

/// Canonical CQL type codes, with the numeric identifiers used on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[cfg_attr(feature = "testing", derive(arbitrary::Arbitrary))]
#[repr(u16)]
pub enum TypeCode {
    /// Server-side custom type, carried as raw bytes.
    Custom = 0x0000,
    /// US-ASCII string.
    Ascii = 0x0001,
    /// 64-bit signed integer.
    Bigint = 0x0002,
    /// Arbitrary bytes.
    Blob = 0x0003,
    /// Single byte boolean.
    Boolean = 0x0004,
    /// 64-bit distributed counter.
    Counter = 0x0005,
    /// Arbitrary-precision decimal, carried as raw bytes.
    Decimal = 0x0006,
    /// 64-bit IEEE 754 float.
    Double = 0x0007,
    /// 32-bit IEEE 754 float.
    Float = 0x0008,
    /// 32-bit signed integer.
    Int = 0x0009,
    /// UTF-8 string.
    Text = 0x000A,
    /// Milliseconds since the Unix epoch.
    Timestamp = 0x000B,
    /// Any UUID.
    Uuid = 0x000C,
    /// UTF-8 string, alias of `text`.
    Varchar = 0x000D,
    /// Arbitrary-precision integer.
    Varint = 0x000E,
    /// Version 1 UUID.
    Timeuuid = 0x000F,
    /// IP address, carried as raw bytes.
    Inet = 0x0010,
    /// Ordered collection.
    List = 0x0020,
    /// Key/value collection.
    Map = 0x0021,
    /// Unordered collection of unique elements.
    Set = 0x0022,
}

/// Every catalog entry, in code order.
static CATALOG: [(TypeCode, &str); 20] = [
    (TypeCode::Custom, "custom"),
    (TypeCode::Ascii, "ascii"),
    (TypeCode::Bigint, "bigint"),
    (TypeCode::Blob, "blob"),
    (TypeCode::Boolean, "boolean"),
    (TypeCode::Counter, "counter"),
    (TypeCode::Decimal, "decimal"),
    (TypeCode::Double, "double"),
    (TypeCode::Float, "float"),
    (TypeCode::Int, "int"),
    (TypeCode::Text, "text"),
    (TypeCode::Timestamp, "timestamp"),
    (TypeCode::Uuid, "uuid"),
    (TypeCode::Varchar, "varchar"),
    (TypeCode::Varint, "varint"),
    (TypeCode::Timeuuid, "timeuuid"),
    (TypeCode::Inet, "inet"),
    (TypeCode::List, "list"),
    (TypeCode::Map, "map"),
    (TypeCode::Set, "set"),
];

impl TypeCode {
    /// Returns the lowercase symbolic name of the code.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            TypeCode::Custom => "custom",
            TypeCode::Ascii => "ascii",
            TypeCode::Bigint => "bigint",
            TypeCode::Blob => "blob",
            TypeCode::Boolean => "boolean",
            TypeCode::Counter => "counter",
            TypeCode::Decimal => "decimal",
            TypeCode::Double => "double",
            TypeCode::Float => "float",
            TypeCode::Int => "int",
            TypeCode::Text => "text",
            TypeCode::Timestamp => "timestamp",
            TypeCode::Uuid => "uuid",
            TypeCode::Varchar => "varchar",
            TypeCode::Varint => "varint",
            TypeCode::Timeuuid => "timeuuid",
            TypeCode::Inet => "inet",
            TypeCode::List => "list",
            TypeCode::Map => "map",
            TypeCode::Set => "set",
        }
    }

    /// Returns the numeric wire identifier.
    #[inline]
    #[must_use]
    pub fn id(self) -> u16 {
        self as u16
    }

    /// Returns whether values of this type are collections of other values.
    #[inline]
    #[must_use]
    pub fn is_collection(self) -> bool {
        matches!(self, TypeCode::List | TypeCode::Set | TypeCode::Map)
    }

    /// Number of subtypes a fully specified descriptor of this type carries.
    #[must_use]
    pub fn arity(self) -> usize {
        match self {
            TypeCode::List | TypeCode::Set => 1,
            TypeCode::Map => 2,
            _ => 0,
        }
    }
}

impl TryFrom<u16> for TypeCode {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        CATALOG
            .iter()
            .map(|(code, _)| *code)
            .find(|code| code.id() == value)
            .ok_or(Error::UnknownTypeCode(value))
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Looks up the code for a symbolic name, ignoring ASCII case.
///
/// # Errors
///
/// * `InvalidTypeName` - If the name is not in the catalog.
pub fn code_for(name: &str) -> Result<TypeCode, Error> {
    let trimmed = name.trim();
    CATALOG
        .iter()
        .find(|(_, candidate)| candidate.eq_ignore_ascii_case(trimmed))
        .map(|(code, _)| *code)
        .ok_or_else(|| Error::InvalidTypeName {
            name: name.into(),
            reason: "unknown type name",
        })
}

/// Looks up the symbolic name for a numeric wire identifier.
///
/// # Errors
///
/// * `UnknownTypeCode` - If the identifier is not in the catalog.
pub fn name_for(id: u16) -> Result<&'static str, Error> {
    TypeCode::try_from(id).map(TypeCode::name)
}
