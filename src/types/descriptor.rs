//! Type descriptor trees and the hints callers use to select them.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use super::catalog::TypeCode;
use super::grammar::parse_type_name;
use crate::errors::Error;

/// A canonical type code plus, for collections, the descriptors of its elements.
///
/// Lists and sets carry one subtype, maps carry two (key, value). A collection
/// descriptor may also carry no subtypes at all, in which case each element is
/// typed by inference when encoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeDescriptor {
    /// The canonical type code.
    pub code: TypeCode,
    /// Element descriptors, empty for scalars.
    pub subtypes: Vec<TypeDescriptor>,
}

impl From<TypeCode> for TypeDescriptor {
    #[inline]
    fn from(code: TypeCode) -> Self {
        Self {
            code,
            subtypes: Vec::new(),
        }
    }
}

impl TypeDescriptor {
    /// Creates a descriptor for a scalar, or a collection of inferred elements.
    #[inline]
    #[must_use]
    pub fn new(code: TypeCode) -> Self {
        Self::from(code)
    }

    /// Creates a `list<element>` descriptor.
    #[must_use]
    pub fn list(element: impl Into<TypeDescriptor>) -> Self {
        Self {
            code: TypeCode::List,
            subtypes: vec![element.into()],
        }
    }

    /// Creates a `set<element>` descriptor.
    #[must_use]
    pub fn set(element: impl Into<TypeDescriptor>) -> Self {
        Self {
            code: TypeCode::Set,
            subtypes: vec![element.into()],
        }
    }

    /// Creates a `map<key, value>` descriptor.
    #[must_use]
    pub fn map(key: impl Into<TypeDescriptor>, value: impl Into<TypeDescriptor>) -> Self {
        Self {
            code: TypeCode::Map,
            subtypes: vec![key.into(), value.into()],
        }
    }

    /// Parses a type name such as `map<text, list<int>>`.
    ///
    /// # Errors
    ///
    /// * `InvalidTypeName` - If the name is malformed or names an unknown type.
    pub fn parse(name: &str) -> Result<Self, Error> {
        parse_type_name(name)
    }

    /// Returns the single element subtype of a list or set, if declared.
    #[must_use]
    pub fn element(&self) -> Option<&TypeDescriptor> {
        match self.subtypes.as_slice() {
            [element] => Some(element),
            _ => None,
        }
    }

    /// Returns the key and value subtypes of a map, if declared.
    #[must_use]
    pub fn key_value(&self) -> Option<(&TypeDescriptor, &TypeDescriptor)> {
        match self.subtypes.as_slice() {
            [key, value] => Some((key, value)),
            _ => None,
        }
    }

    /// Checks that every node of the tree carries either no subtypes or
    /// exactly as many as its code requires.
    ///
    /// # Errors
    ///
    /// * `InvalidTypeName` - If some node has the wrong number of subtypes.
    pub fn validate(&self) -> Result<(), Error> {
        let arity = self.code.arity();
        let valid = self.subtypes.len() == arity || (arity > 0 && self.subtypes.is_empty());
        if !valid {
            return Err(Error::InvalidTypeName {
                name: alloc::string::ToString::to_string(self),
                reason: "wrong number of subtypes",
            });
        }
        self.subtypes.iter().try_for_each(TypeDescriptor::validate)
    }
}

impl fmt::Display for TypeDescriptor {
    /// Renders the descriptor in the `name<sub, ...>` grammar.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code.name())?;
        if self.subtypes.is_empty() {
            return Ok(());
        }
        f.write_str("<")?;
        for (i, subtype) in self.subtypes.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{subtype}")?;
        }
        f.write_str(">")
    }
}

/// A caller-supplied type hint for a single value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeHint {
    /// A numeric wire identifier, e.g. `0x0009` for `int`.
    Code(u16),
    /// A symbolic, possibly generic, type name, e.g. `"list<text>"`.
    Name(String),
    /// A fully built descriptor tree.
    Descriptor(TypeDescriptor),
}

impl TypeHint {
    /// Resolves the hint into a descriptor tree.
    ///
    /// # Errors
    ///
    /// * `UnknownTypeCode` - If a numeric code is not in the catalog.
    /// * `InvalidTypeName` - If a name is malformed or a descriptor has the wrong arity.
    pub fn resolve(&self) -> Result<TypeDescriptor, Error> {
        match self {
            TypeHint::Code(id) => TypeCode::try_from(*id).map(TypeDescriptor::from),
            TypeHint::Name(name) => parse_type_name(name),
            TypeHint::Descriptor(descriptor) => {
                descriptor.validate()?;
                Ok(descriptor.clone())
            }
        }
    }
}

impl fmt::Display for TypeHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeHint::Code(id) => write!(f, "0x{id:04x}"),
            TypeHint::Name(name) => f.write_str(name),
            TypeHint::Descriptor(descriptor) => write!(f, "{descriptor}"),
        }
    }
}

impl From<u16> for TypeHint {
    #[inline]
    fn from(id: u16) -> Self {
        TypeHint::Code(id)
    }
}

impl From<&str> for TypeHint {
    #[inline]
    fn from(name: &str) -> Self {
        TypeHint::Name(name.into())
    }
}

impl From<String> for TypeHint {
    #[inline]
    fn from(name: String) -> Self {
        TypeHint::Name(name)
    }
}

impl From<TypeCode> for TypeHint {
    #[inline]
    fn from(code: TypeCode) -> Self {
        TypeHint::Descriptor(code.into())
    }
}

impl From<TypeDescriptor> for TypeHint {
    #[inline]
    fn from(descriptor: TypeDescriptor) -> Self {
        TypeHint::Descriptor(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_display_renders_grammar() {
        let descriptor = TypeDescriptor::map(TypeCode::Text, TypeDescriptor::list(TypeCode::Int));
        assert_eq!(descriptor.to_string(), "map<text, list<int>>");
        assert_eq!(TypeDescriptor::new(TypeCode::Set).to_string(), "set");
    }

    #[test]
    fn test_resolve_each_hint_form() {
        let expected = TypeDescriptor::new(TypeCode::Int);
        assert_eq!(TypeHint::from(0x0009).resolve().unwrap(), expected);
        assert_eq!(TypeHint::from("INT").resolve().unwrap(), expected);
        assert_eq!(TypeHint::from(TypeCode::Int).resolve().unwrap(), expected);
        assert_eq!(
            TypeHint::from(0x0030).resolve(),
            Err(Error::UnknownTypeCode(0x0030))
        );
    }

    #[test]
    fn test_validate_rejects_bad_arity() {
        let bad = TypeDescriptor {
            code: TypeCode::Map,
            subtypes: vec![TypeCode::Text.into()],
        };
        assert!(TypeHint::from(bad).resolve().is_err());

        let scalar_with_child = TypeDescriptor {
            code: TypeCode::Int,
            subtypes: vec![TypeCode::Int.into()],
        };
        assert!(scalar_with_child.validate().is_err());

        let nested = TypeDescriptor::list(TypeDescriptor::set(TypeCode::Uuid));
        assert!(nested.validate().is_ok());
    }

    #[test]
    fn test_accessors() {
        let map = TypeDescriptor::map(TypeCode::Ascii, TypeCode::Blob);
        let (key, value) = map.key_value().unwrap();
        assert_eq!(key.code, TypeCode::Ascii);
        assert_eq!(value.code, TypeCode::Blob);
        assert!(map.element().is_none());
        assert_eq!(
            TypeDescriptor::list(TypeCode::Int).element().unwrap().code,
            TypeCode::Int
        );
    }
}
