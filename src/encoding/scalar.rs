//! Scalar layouts of the CQL value format.
//!
//! | Type                        | Layout                                   |
//! |-----------------------------|------------------------------------------|
//! | `int`                       | 4 bytes, big-endian signed               |
//! | `float`                     | 4 bytes, big-endian IEEE 754             |
//! | `double`                    | 8 bytes, big-endian IEEE 754             |
//! | `boolean`                   | 1 byte, 0 or 1                           |
//! | `text`, `varchar`, `ascii`  | raw character bytes                      |
//! | `uuid`, `timeuuid`          | 16 raw bytes                             |
//! | `blob`, `custom`, `decimal`, `inet` | raw bytes, passed through        |
//! | `bigint`, `counter`         | 8 bytes, big-endian two's complement     |
//! | `timestamp`                 | `bigint` layout, milliseconds since epoch |
//! | `varint`                    | minimal big-endian two's complement      |

use alloc::string::ToString;
use alloc::vec;
use alloc::vec::Vec;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use num_bigint::BigInt;
use num_traits::FromPrimitive;
use uuid::Uuid;

use super::constants::widths;
use crate::errors::Error;
use crate::inference::is_canonical_uuid;
use crate::types::TypeCode;
use crate::value::Value;

/// Lower bound of the `f64` values that truncate into an `i64`.
const I64_MIN_F64: f64 = -9_223_372_036_854_775_808.0;
/// Exclusive upper bound of the `f64` values that truncate into an `i64`.
const I64_END_F64: f64 = 9_223_372_036_854_775_808.0;

/// Naive layouts accepted for date strings, read as UTC.
const NAIVE_DATE_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Encodes a non-null value with a scalar type.
///
/// # Errors
///
/// Fails when the value shape is not accepted by the type, or when a numeric
/// or date input cannot be converted.
pub(crate) fn encode_scalar(code: TypeCode, value: &Value) -> Result<Vec<u8>, Error> {
    match code {
        TypeCode::Int => Ok(to_i32(value)?.to_be_bytes().to_vec()),
        TypeCode::Float => match value {
            #[allow(clippy::cast_possible_truncation)]
            Value::Number(n) => Ok((*n as f32).to_be_bytes().to_vec()),
            _ => Err(Error::mismatch(value, code)),
        },
        TypeCode::Double => match value {
            Value::Number(n) => Ok(n.to_be_bytes().to_vec()),
            _ => Err(Error::mismatch(value, code)),
        },
        TypeCode::Boolean => match value {
            Value::Boolean(b) => Ok(vec![u8::from(*b)]),
            _ => Err(Error::mismatch(value, code)),
        },
        TypeCode::Text | TypeCode::Varchar => match value {
            Value::Text(s) => Ok(s.as_bytes().to_vec()),
            _ => Err(Error::mismatch(value, code)),
        },
        TypeCode::Ascii => match value {
            Value::Text(s) if s.is_ascii() => Ok(s.as_bytes().to_vec()),
            Value::Text(_) => Err(Error::InvalidText("ascii")),
            _ => Err(Error::mismatch(value, code)),
        },
        TypeCode::Uuid | TypeCode::Timeuuid => uuid_bytes(value, code),
        TypeCode::Blob | TypeCode::Custom | TypeCode::Decimal | TypeCode::Inet => match value {
            Value::Blob(b) => Ok(b.clone()),
            _ => Err(Error::mismatch(value, code)),
        },
        TypeCode::Bigint | TypeCode::Counter => Ok(to_i64(value, code)?.to_be_bytes().to_vec()),
        TypeCode::Timestamp => Ok(to_millis(value)?.to_be_bytes().to_vec()),
        TypeCode::Varint => Ok(to_bigint(value)?.to_signed_bytes_be()),
        TypeCode::List | TypeCode::Set | TypeCode::Map => Err(Error::mismatch(value, code)),
    }
}

/// Decodes the full slice of a non-null scalar.
///
/// An empty slice for a fixed-width or `varint` type decodes to [`Value::Null`],
/// which is how a null element inside a collection comes back.
///
/// # Errors
///
/// Fails when a fixed-width slice has the wrong length, or when text is not
/// valid for its character set. A timestamp outside the calendar range decodes
/// to its raw [`Value::Int64`] millisecond count.
pub(crate) fn decode_scalar(code: TypeCode, bytes: &[u8]) -> Result<Value, Error> {
    if bytes.is_empty() && is_empty_null(code) {
        return Ok(Value::Null);
    }
    match code {
        TypeCode::Int => {
            let raw = fixed::<{ widths::FOUR }>(code, bytes)?;
            Ok(Value::Number(f64::from(i32::from_be_bytes(raw))))
        }
        TypeCode::Float => {
            let raw = fixed::<{ widths::FOUR }>(code, bytes)?;
            Ok(Value::Number(f64::from(f32::from_be_bytes(raw))))
        }
        TypeCode::Double => {
            let raw = fixed::<{ widths::EIGHT }>(code, bytes)?;
            Ok(Value::Number(f64::from_be_bytes(raw)))
        }
        TypeCode::Boolean => {
            let [byte] = fixed::<{ widths::BOOLEAN }>(code, bytes)?;
            Ok(Value::Boolean(byte != 0))
        }
        TypeCode::Bigint | TypeCode::Counter => {
            let raw = fixed::<{ widths::EIGHT }>(code, bytes)?;
            Ok(Value::Int64(i64::from_be_bytes(raw)))
        }
        TypeCode::Timestamp => {
            let millis = i64::from_be_bytes(fixed::<{ widths::EIGHT }>(code, bytes)?);
            // Instants past the calendar range come back as their raw millisecond count.
            Ok(DateTime::from_timestamp_millis(millis)
                .map_or(Value::Int64(millis), Value::Timestamp))
        }
        TypeCode::Uuid | TypeCode::Timeuuid => {
            let uuid = Uuid::from_bytes(fixed::<{ widths::UUID }>(code, bytes)?);
            Ok(Value::Text(uuid.hyphenated().to_string()))
        }
        TypeCode::Text | TypeCode::Varchar => core::str::from_utf8(bytes)
            .map(|s| Value::Text(s.into()))
            .map_err(|_| Error::InvalidText("utf-8")),
        TypeCode::Ascii => {
            if bytes.is_ascii() {
                Ok(Value::Text(bytes.iter().copied().map(char::from).collect()))
            } else {
                Err(Error::InvalidText("ascii"))
            }
        }
        TypeCode::Blob | TypeCode::Custom | TypeCode::Decimal | TypeCode::Inet => {
            Ok(Value::Blob(bytes.to_vec()))
        }
        TypeCode::Varint => Ok(Value::BigInt(BigInt::from_signed_bytes_be(bytes))),
        TypeCode::List | TypeCode::Set | TypeCode::Map => {
            Err(Error::mismatch(Value::Blob(bytes.to_vec()), code))
        }
    }
}

/// Types whose zero-length encoding stands for a missing value.
fn is_empty_null(code: TypeCode) -> bool {
    matches!(
        code,
        TypeCode::Int
            | TypeCode::Float
            | TypeCode::Double
            | TypeCode::Boolean
            | TypeCode::Bigint
            | TypeCode::Counter
            | TypeCode::Timestamp
            | TypeCode::Uuid
            | TypeCode::Timeuuid
            | TypeCode::Varint
    )
}

/// Reads a fixed-width slice into an array of exactly `N` bytes.
fn fixed<const N: usize>(code: TypeCode, bytes: &[u8]) -> Result<[u8; N], Error> {
    bytes.try_into().map_err(|_| Error::InvalidLength {
        type_name: code.name(),
        expected: N,
        found: bytes.len(),
    })
}

/// Parses a decimal or `0x`-prefixed hexadecimal integer, with optional sign.
fn parse_integer_text(text: &str) -> Option<i64> {
    let text = text.trim();
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let (digits, radix) = match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        Some(hex) => (hex, 16),
        None => (unsigned, 10),
    };
    if !digits.bytes().next().is_some_and(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let magnitude = i128::from(u64::from_str_radix(digits, radix).ok()?);
    i64::try_from(if negative { -magnitude } else { magnitude }).ok()
}

/// Truncates a finite number into an `i64`, failing on NaN and out-of-range input.
#[allow(clippy::cast_possible_truncation)]
fn number_to_i64(n: f64, hint: &'static str) -> Result<i64, Error> {
    if n.is_nan() || !(I64_MIN_F64..I64_END_F64).contains(&n) {
        return Err(Error::InvalidNumber {
            value: n.to_string(),
            hint,
        });
    }
    Ok(n as i64)
}

fn to_i32(value: &Value) -> Result<i32, Error> {
    let wide = match value {
        Value::Number(n) => number_to_i64(*n, "int")?,
        Value::Text(s) => {
            parse_integer_text(s).ok_or_else(|| Error::mismatch(value, TypeCode::Int))?
        }
        _ => return Err(Error::mismatch(value, TypeCode::Int)),
    };
    i32::try_from(wide).map_err(|_| Error::InvalidNumber {
        value: value.to_string(),
        hint: "int",
    })
}

fn to_i64(value: &Value, code: TypeCode) -> Result<i64, Error> {
    match value {
        Value::Int64(v) => Ok(*v),
        Value::Number(n) => number_to_i64(*n, code.name()),
        Value::Text(s) => parse_integer_text(s).ok_or_else(|| Error::mismatch(value, code)),
        _ => Err(Error::mismatch(value, code)),
    }
}

fn to_millis(value: &Value) -> Result<i64, Error> {
    match value {
        Value::Timestamp(instant) => Ok(instant.timestamp_millis()),
        Value::Int64(millis) => Ok(*millis),
        Value::Number(n) if n.is_nan() => Err(Error::InvalidDate(value.to_string())),
        Value::Number(n) => number_to_i64(*n, "timestamp"),
        Value::Text(s) => parse_date(s)
            .map(|instant| instant.timestamp_millis())
            .ok_or_else(|| Error::InvalidDate(value.to_string())),
        _ => Err(Error::mismatch(value, TypeCode::Timestamp)),
    }
}

/// Parses RFC 3339 timestamps, naive date-times (as UTC) and plain dates (as UTC midnight).
fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.with_timezone(&Utc));
    }
    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
}

fn uuid_bytes(value: &Value, code: TypeCode) -> Result<Vec<u8>, Error> {
    match value {
        Value::Text(s) if is_canonical_uuid(s) => Uuid::parse_str(s)
            .map(|uuid| uuid.as_bytes().to_vec())
            .map_err(|_| Error::mismatch(value, code)),
        Value::Blob(b) if b.len() == widths::UUID => Ok(b.clone()),
        _ => Err(Error::mismatch(value, code)),
    }
}

fn to_bigint(value: &Value) -> Result<BigInt, Error> {
    match value {
        Value::BigInt(v) => Ok(v.clone()),
        Value::Number(n) => BigInt::from_f64(*n).ok_or_else(|| Error::InvalidNumber {
            value: n.to_string(),
            hint: "varint",
        }),
        Value::Text(s) => s
            .trim()
            .parse::<BigInt>()
            .map_err(|_| Error::mismatch(value, TypeCode::Varint)),
        _ => Err(Error::mismatch(value, TypeCode::Varint)),
    }
}
