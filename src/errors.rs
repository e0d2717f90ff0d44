//! Submodule defining the errors used across the crate.

use alloc::string::String;

/// Errors that can occur while encoding, decoding or composing routing keys.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// No type hint was given and the value shape maps to no CQL type.
    #[error("Cannot guess the CQL type of {0}, a type hint is required")]
    UnguessableType(String),

    /// The value cannot be represented by the requested type.
    #[error("Cannot encode {value} as {hint}")]
    TypeMismatch {
        /// Printable form of the offending value.
        value: String,
        /// Rendering of the conflicting hint.
        hint: String,
    },

    /// A type name did not follow the `name<sub,...>` grammar or named no known type.
    #[error("Invalid type name {name:?}: {reason}")]
    InvalidTypeName {
        /// The name as given by the caller.
        name: String,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// The type code is not part of the catalog supported by this codec.
    #[error("Unknown CQL type code 0x{0:04x}, the client and protocol versions do not match")]
    UnknownTypeCode(u16),

    /// A date string or millisecond count does not denote a representable instant.
    #[error("Invalid date value {0}")]
    InvalidDate(String),

    /// A numeric input was NaN, out of range for the target width, or not numeric.
    #[error("Invalid numeric value {value} for {hint}")]
    InvalidNumber {
        /// Printable form of the offending value.
        value: String,
        /// Name of the target type.
        hint: &'static str,
    },

    /// A collection count, element or routing fragment does not fit a 2-byte prefix.
    #[error("{what} of size {size} exceeds the 2-byte length prefix")]
    TooLarge {
        /// What overflowed.
        what: &'static str,
        /// The offending size.
        size: usize,
    },

    /// A fixed-width scalar was decoded from a slice of the wrong length.
    #[error("Expected {expected} bytes to decode {type_name}, found {found}")]
    InvalidLength {
        /// Name of the scalar type.
        type_name: &'static str,
        /// The width of the type on the wire.
        expected: usize,
        /// The width actually provided.
        found: usize,
    },

    /// A collection body ended before all announced elements were read.
    #[error("Unexpected end of input at position {0}")]
    UnexpectedEof(usize),

    /// A collection body carried bytes past its last announced element.
    #[error("Unexpected trailing bytes at position {0}")]
    TrailingBytes(usize),

    /// Text bytes were not valid for the declared character set.
    #[error("Invalid {0} text")]
    InvalidText(&'static str),

    /// A routing index points past the bound parameters.
    #[error("Routing index {index} out of bounds for {len} parameters")]
    RoutingIndexOutOfBounds {
        /// The offending routing index.
        index: usize,
        /// Number of bound parameters.
        len: usize,
    },

    /// A partition key component encoded to null and cannot route the request.
    #[error("Routing key component at parameter {0} is null")]
    NullRoutingComponent(usize),
}

impl Error {
    /// Builds a [`Error::TypeMismatch`] from anything printable.
    pub(crate) fn mismatch(value: impl core::fmt::Display, hint: impl core::fmt::Display) -> Self {
        use alloc::string::ToString;
        Error::TypeMismatch {
            value: value.to_string(),
            hint: hint.to_string(),
        }
    }
}
