//! Encoding and decoding of values against CQL type descriptors.
//!
//! ```text
//! list / set:
//! ├── Count (2 bytes)
//! └── Element (repeated)
//!     ├── Length (2 bytes, 0 for null)
//!     └── Bytes
//!
//! map:
//! ├── Count (2 bytes)
//! └── Entry (repeated)
//!     ├── Key length (2 bytes) + key bytes
//!     └── Value length (2 bytes) + value bytes
//! ```
//!
//! A null value always encodes to `None`, and so does an empty list or set.
//! A null element inside a non-empty collection is framed as a zero length.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use hashbrown::DefaultHashBuilder;
use indexmap::IndexMap;

use crate::encoding::frame::{Reader, write_count, write_prefixed};
use crate::encoding::scalar::{decode_scalar, encode_scalar};
use crate::errors::Error;
use crate::inference::infer;
use crate::types::{TypeCode, TypeDescriptor, TypeHint};
use crate::value::Value;

/// Decoded map entries, keyed by the natural representation of each key.
type DecodedEntries = IndexMap<String, (Value, Value), DefaultHashBuilder>;

/// Encodes a value, resolving the hint or inferring the type when there is none.
///
/// Returns `Ok(None)` for [`Value::Null`] whatever the hint, and for an empty
/// list or set.
///
/// # Errors
///
/// * `UnguessableType` - If no hint is given and the value shape has no inferred type.
/// * `InvalidTypeName`, `UnknownTypeCode` - If the hint does not resolve.
/// * `TypeMismatch`, `InvalidNumber`, `InvalidDate`, `InvalidText`, `TooLarge` -
///   If the value cannot be represented by the type.
///
/// # Example
///
/// ```
/// use cql_value_codec::{Value, encode};
///
/// let bytes = encode(&Value::from(-1), Some(&"int".into())).unwrap();
/// assert_eq!(bytes, Some(vec![0xff, 0xff, 0xff, 0xff]));
///
/// assert_eq!(encode(&Value::Null, Some(&"int".into())).unwrap(), None);
/// ```
pub fn encode(value: &Value, hint: Option<&TypeHint>) -> Result<Option<Vec<u8>>, Error> {
    if value.is_null() {
        return Ok(None);
    }
    match hint {
        Some(hint) => encode_tree(value, &hint.resolve()?),
        None => encode_inferred(value),
    }
}

/// Encodes a value against an already built descriptor tree.
///
/// # Errors
///
/// Same as [`encode`], plus `InvalidTypeName` when some node of the tree has
/// the wrong number of subtypes.
pub fn encode_as(value: &Value, descriptor: &TypeDescriptor) -> Result<Option<Vec<u8>>, Error> {
    if value.is_null() {
        return Ok(None);
    }
    descriptor.validate()?;
    encode_tree(value, descriptor)
}

fn encode_inferred(value: &Value) -> Result<Option<Vec<u8>>, Error> {
    if value.is_null() {
        return Ok(None);
    }
    let code = infer(value).ok_or_else(|| Error::UnguessableType(value.to_string()))?;
    encode_tree(value, &TypeDescriptor::new(code))
}

/// Encodes an element against its declared subtype, or by inference when undeclared.
fn encode_element(
    value: &Value,
    subtype: Option<&TypeDescriptor>,
) -> Result<Option<Vec<u8>>, Error> {
    match subtype {
        Some(descriptor) => encode_tree(value, descriptor),
        None => encode_inferred(value),
    }
}

fn encode_tree(value: &Value, descriptor: &TypeDescriptor) -> Result<Option<Vec<u8>>, Error> {
    if value.is_null() {
        return Ok(None);
    }
    tracing::trace!(shape = value.shape(), code = %descriptor.code, "encoding value");
    match descriptor.code {
        TypeCode::List | TypeCode::Set => encode_list(value, descriptor),
        TypeCode::Map => encode_map(value, descriptor).map(Some),
        code => encode_scalar(code, value).map(Some),
    }
}

fn encode_list(value: &Value, descriptor: &TypeDescriptor) -> Result<Option<Vec<u8>>, Error> {
    let Value::List(items) = value else {
        return Err(Error::mismatch(value, descriptor));
    };
    if items.is_empty() {
        return Ok(None);
    }

    let mut out = Vec::new();
    write_count(&mut out, items.len(), descriptor.code.name())?;
    for item in items {
        let bytes = encode_element(item, descriptor.element())?;
        write_prefixed(&mut out, bytes.as_deref())?;
    }
    Ok(Some(out))
}

fn encode_map(value: &Value, descriptor: &TypeDescriptor) -> Result<Vec<u8>, Error> {
    let Value::Map(entries) = value else {
        return Err(Error::mismatch(value, descriptor));
    };
    let (key_type, value_type) = descriptor.key_value().unzip();

    let mut out = Vec::new();
    write_count(&mut out, entries.len(), "map")?;
    for (key, entry_value) in entries {
        let key_bytes = encode_element(key, key_type)?;
        write_prefixed(&mut out, key_bytes.as_deref())?;
        let value_bytes = encode_element(entry_value, value_type)?;
        write_prefixed(&mut out, value_bytes.as_deref())?;
    }
    Ok(out)
}

/// Decodes a value of the given type; `None` bytes decode to [`Value::Null`].
///
/// Collections must declare their subtypes, since the wire format does not
/// carry them. Decoded map keys that share a natural representation (see
/// [`Value::map_key`]) collapse into one entry, the last one read winning.
/// A `timestamp` outside the calendar range decodes to its raw millisecond
/// count as [`Value::Int64`].
///
/// # Errors
///
/// * `InvalidLength` - If a fixed-width scalar has the wrong number of bytes.
/// * `UnexpectedEof`, `TrailingBytes` - If a collection body is malformed.
/// * `InvalidText` - If text bytes do not match their character set.
/// * `InvalidTypeName` - If a collection descriptor lacks its subtypes.
///
/// # Example
///
/// ```
/// use cql_value_codec::{TypeDescriptor, Value, decode};
///
/// let descriptor = TypeDescriptor::parse("list<int>").unwrap();
/// let bytes = [0x00, 0x01, 0x00, 0x04, 0x00, 0x00, 0x00, 0x2a];
/// assert_eq!(
///     decode(Some(&bytes[..]), &descriptor).unwrap(),
///     Value::List(vec![Value::from(42)])
/// );
/// ```
pub fn decode(bytes: Option<&[u8]>, descriptor: &TypeDescriptor) -> Result<Value, Error> {
    let Some(bytes) = bytes else {
        return Ok(Value::Null);
    };
    tracing::trace!(len = bytes.len(), code = %descriptor.code, "decoding value");
    match descriptor.code {
        TypeCode::List | TypeCode::Set if bytes.is_empty() => Ok(Value::Null),
        TypeCode::Map if bytes.is_empty() => Ok(Value::Null),
        TypeCode::List | TypeCode::Set => decode_list(bytes, descriptor),
        TypeCode::Map => decode_map(bytes, descriptor),
        code => decode_scalar(code, bytes),
    }
}

fn untyped_collection(descriptor: &TypeDescriptor) -> Error {
    Error::InvalidTypeName {
        name: descriptor.to_string(),
        reason: "collection subtypes are required to decode",
    }
}

fn decode_list(bytes: &[u8], descriptor: &TypeDescriptor) -> Result<Value, Error> {
    let element = descriptor
        .element()
        .ok_or_else(|| untyped_collection(descriptor))?;
    let mut reader = Reader::new(bytes);
    let count = reader.read_u16()?;

    // Each element takes at least its 2-byte prefix; do not trust the count further.
    let mut items = Vec::with_capacity(count.min(reader.remaining() / 2));
    for _ in 0..count {
        items.push(decode(Some(reader.read_prefixed()?), element)?);
    }
    reader.finish()?;
    Ok(Value::List(items))
}

fn decode_map(bytes: &[u8], descriptor: &TypeDescriptor) -> Result<Value, Error> {
    let (key_type, value_type) = descriptor
        .key_value()
        .ok_or_else(|| untyped_collection(descriptor))?;
    let mut reader = Reader::new(bytes);
    let count = reader.read_u16()?;

    let capacity = count.min(reader.remaining() / 4);
    let mut entries =
        DecodedEntries::with_capacity_and_hasher(capacity, DefaultHashBuilder::default());
    for _ in 0..count {
        let key = decode(Some(reader.read_prefixed()?), key_type)?;
        let value = decode(Some(reader.read_prefixed()?), value_type)?;
        entries.insert(key.map_key(), (key, value));
    }
    reader.finish()?;
    Ok(Value::Map(entries.into_values().collect()))
}
