//! Type inference for values bound without a hint.
//!
//! The rules are tried in a fixed order and the first match wins:
//!
//! 1. number → `double`
//! 2. timestamp → `timestamp`
//! 3. 64-bit integer → `bigint`
//! 4. arbitrary-precision integer → `varint`
//! 5. text → `uuid` when it is a canonical UUID string, `text` otherwise
//! 6. byte buffer → `blob`
//! 7. ordered sequence → `list`
//! 8. boolean → `boolean`
//!
//! Anything else (maps, null) has no inferred type.

use crate::types::TypeCode;
use crate::value::Value;

/// Guesses the CQL type of a value from its shape.
///
/// Returns `None` when no rule applies; the caller must then report the
/// value as un-guessable.
#[must_use]
pub fn infer(value: &Value) -> Option<TypeCode> {
    let code = match value {
        Value::Number(_) => TypeCode::Double,
        Value::Timestamp(_) => TypeCode::Timestamp,
        Value::Int64(_) => TypeCode::Bigint,
        Value::BigInt(_) => TypeCode::Varint,
        Value::Text(text) if is_canonical_uuid(text) => TypeCode::Uuid,
        Value::Text(_) => TypeCode::Text,
        Value::Blob(_) => TypeCode::Blob,
        Value::List(_) => TypeCode::List,
        Value::Boolean(_) => TypeCode::Boolean,
        Value::Map(_) | Value::Null => return None,
    };
    tracing::trace!(shape = value.shape(), inferred = %code, "inferred type");
    Some(code)
}

/// Returns whether `text` is a UUID in 8-4-4-4-12 hex form, in either case.
#[must_use]
pub fn is_canonical_uuid(text: &str) -> bool {
    const HYPHENS: [usize; 4] = [8, 13, 18, 23];

    let bytes = text.as_bytes();
    bytes.len() == 36
        && bytes.iter().enumerate().all(|(i, byte)| {
            if HYPHENS.contains(&i) {
                *byte == b'-'
            } else {
                byte.is_ascii_hexdigit()
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use chrono::DateTime;
    use num_bigint::BigInt;

    #[test]
    fn test_inference_table() {
        assert_eq!(infer(&Value::from(1)), Some(TypeCode::Double));
        assert_eq!(infer(&Value::from(1.5)), Some(TypeCode::Double));
        assert_eq!(infer(&Value::from(true)), Some(TypeCode::Boolean));
        assert_eq!(
            infer(&Value::from(vec![Value::from(1), Value::from(2), Value::from(3)])),
            Some(TypeCode::List)
        );
        assert_eq!(infer(&Value::from("a string")), Some(TypeCode::Text));
        assert_eq!(
            infer(&Value::from("ffffffff-ffff-ffff-ffff-ffffffffffff")),
            Some(TypeCode::Uuid)
        );
        assert_eq!(infer(&Value::from(10i64)), Some(TypeCode::Bigint));
        assert_eq!(infer(&Value::from(BigInt::from(10))), Some(TypeCode::Varint));
        assert_eq!(infer(&Value::from(vec![1u8])), Some(TypeCode::Blob));
        assert_eq!(
            infer(&Value::from(DateTime::from_timestamp_millis(5).unwrap())),
            Some(TypeCode::Timestamp)
        );
    }

    #[test]
    fn test_no_match() {
        assert_eq!(infer(&Value::Map(vec![])), None);
        assert_eq!(infer(&Value::Null), None);
    }

    #[test]
    fn test_uuid_grammar() {
        assert!(is_canonical_uuid("A0b1C2d3-0000-4000-8000-00000000000F"));
        assert!(!is_canonical_uuid("a0b1c2d3000040008000000000000000"));
        assert!(!is_canonical_uuid("a0b1c2d3-0000-4000-8000-00000000000g"));
        assert!(!is_canonical_uuid("{a0b1c2d3-0000-4000-8000-000000000000}"));
        assert!(!is_canonical_uuid("a0b1c2d3-00004-000-8000-000000000000"));
    }
}
