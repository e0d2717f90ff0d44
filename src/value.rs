//! Host-side values that can be bound to a CQL type.
//!
//! A [`Value`] is only tied to a [`TypeDescriptor`](crate::TypeDescriptor) at
//! the moment it is encoded or decoded; the codec never retains one.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use chrono::{DateTime, Utc};
use num_bigint::BigInt;

mod display;

/// A value shape the codec knows how to encode, infer or produce.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Absent value, always encoded as a null buffer.
    #[default]
    Null,
    /// Boolean.
    Boolean(bool),
    /// Double precision number, the host's generic numeric shape.
    Number(f64),
    /// 64-bit integer.
    Int64(i64),
    /// Arbitrary-precision integer.
    BigInt(BigInt),
    /// UTF-8 string.
    Text(String),
    /// Raw byte buffer.
    Blob(Vec<u8>),
    /// Instant in time, millisecond precision on the wire.
    Timestamp(DateTime<Utc>),
    /// Ordered sequence, used for both lists and sets.
    List(Vec<Value>),
    /// Key/value entries, in iteration order.
    Map(Vec<(Value, Value)>),
}

impl Value {
    /// Check if the value is Null.
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short name of the value's shape, used in logs.
    #[must_use]
    pub fn shape(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::Int64(_) => "int64",
            Value::BigInt(_) => "bigint",
            Value::Text(_) => "text",
            Value::Blob(_) => "blob",
            Value::Timestamp(_) => "timestamp",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// The natural representation of the value when used as a map key.
    ///
    /// Text is used verbatim and everything else by its printable form, so
    /// two decoded keys that render the same collapse into one entry.
    #[must_use]
    pub fn map_key(&self) -> String {
        match self {
            Value::Text(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a.to_bits() == b.to_bits(),
            (Value::Int64(a), Value::Int64(b)) => a == b,
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Blob(a), Value::Blob(b)) => a == b,
            (Value::Timestamp(a), Value::Timestamp(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

// From implementations for common types
impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Number(f64::from(v))
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Number(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<BigInt> for Value {
    fn from(v: BigInt) -> Self {
        Value::BigInt(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Blob(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Blob(v.to_vec())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v)
    }
}

impl From<uuid::Uuid> for Value {
    /// UUIDs travel as their canonical hyphenated text.
    fn from(v: uuid::Uuid) -> Self {
        Value::Text(v.hyphenated().to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl From<Vec<(Value, Value)>> for Value {
    fn from(v: Vec<(Value, Value)>) -> Self {
        Value::Map(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_number_equality_is_bitwise() {
        assert_eq!(Value::Number(f64::NAN), Value::Number(f64::NAN));
        assert_ne!(Value::Number(0.0), Value::Number(-0.0));
        assert_ne!(Value::Number(1.0), Value::Int64(1));
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Value::from(7), Value::Number(7.0));
        assert_eq!(Value::from(7i64), Value::Int64(7));
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(&[1u8, 2][..]), Value::Blob(vec![1, 2]));
        assert_eq!(
            Value::from(uuid::Uuid::nil()),
            Value::Text("00000000-0000-0000-0000-000000000000".to_string())
        );
    }

    #[test]
    fn test_map_key_uses_raw_text() {
        assert_eq!(Value::from("a").map_key(), "a");
        assert_eq!(Value::from(1.5).map_key(), "1.5");
        assert_eq!(Value::from(true).map_key(), "true");
    }
}
