//! Testing utilities shared by the integration tests, fuzz targets and benches.
//!
//! This module is gated behind the `testing` feature.
//!
//! # Provided helpers
//!
//! - [`assert_encodes_to`]: assert the exact wire bytes of a value, as hex
//! - [`assert_round_trip`]: assert that decode(encode(v)) gives back `v`
//! - [`byte_diff_report`]: pretty-print a byte-level diff between two buffers
//! - [`test_decode_normalizes`]: fuzz body checking decode/encode stability
//! - [`test_type_name_round_trip`]: fuzz body checking the type-name grammar

use core::fmt::Write;

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use arbitrary::Arbitrary;

use crate::{TypeCode, TypeDescriptor, TypeHint, Value, decode, encode, encode_as};

/// Pretty-print a byte-level diff between two encoded buffers.
///
/// Returns a human-readable string describing where they differ.
#[must_use]
pub fn byte_diff_report(label: &str, expected: &[u8], actual: &[u8]) -> String {
    if expected == actual {
        return format!("{label}: MATCH ({} bytes)", expected.len());
    }

    let mut report = format!(
        "{label}: MISMATCH\n  expected: {}\n  actual:   {}\n",
        hex::encode(expected),
        hex::encode(actual)
    );

    let min_len = expected.len().min(actual.len());
    if let Some(pos) = (0..min_len).find(|&i| expected[i] != actual[i]) {
        let _ = writeln!(
            report,
            "  first diff at byte {pos}: expected 0x{:02x}, actual 0x{:02x}",
            expected[pos], actual[pos]
        );
    } else {
        report.push_str("  common prefix matches, difference is in length only\n");
    }

    report
}

/// Asserts that `value` encodes under `hint` to the bytes spelled by `expected_hex`.
///
/// # Panics
///
/// Panics if encoding fails, yields null, or yields different bytes.
pub fn assert_encodes_to(value: &Value, hint: Option<&TypeHint>, expected_hex: &str) {
    let expected = hex::decode(expected_hex).expect("expected bytes must be valid hex");
    let actual = encode(value, hint)
        .unwrap_or_else(|err| panic!("encoding {value} failed: {err}"))
        .unwrap_or_else(|| panic!("encoding {value} yielded null"));
    assert!(
        expected == actual,
        "{}",
        byte_diff_report(&value.to_string(), &expected, &actual)
    );
}

/// Asserts that encoding `value` under `hint` and decoding it back is lossless.
///
/// # Panics
///
/// Panics if the hint does not resolve, if either direction fails, or if the
/// decoded value differs.
pub fn assert_round_trip(value: &Value, hint: impl Into<TypeHint>) {
    let hint = hint.into();
    let descriptor = hint
        .resolve()
        .unwrap_or_else(|err| panic!("hint {hint} does not resolve: {err}"));
    let bytes = encode_as(value, &descriptor)
        .unwrap_or_else(|err| panic!("encoding {value} as {descriptor} failed: {err}"));
    let decoded = decode(bytes.as_deref(), &descriptor)
        .unwrap_or_else(|err| panic!("decoding {value} as {descriptor} failed: {err}"));
    assert_eq!(&decoded, value, "round trip through {descriptor}");
}

/// Structured fuzz input: a descriptor of depth at most two plus raw bytes.
#[derive(Debug, Clone, Arbitrary)]
pub struct DecodeInput {
    /// Outer type of the value.
    pub outer: TypeCode,
    /// Map key type, used when `outer` is a map.
    pub key: TypeCode,
    /// Element or map value type, used when `outer` is a collection.
    pub element: TypeCode,
    /// The bytes to decode.
    pub bytes: Vec<u8>,
}

impl DecodeInput {
    /// Builds the descriptor the bytes are decoded against.
    #[must_use]
    pub fn descriptor(&self) -> TypeDescriptor {
        match self.outer {
            TypeCode::List => TypeDescriptor::list(self.element),
            TypeCode::Set => TypeDescriptor::set(self.element),
            TypeCode::Map => TypeDescriptor::map(self.key, self.element),
            scalar => TypeDescriptor::new(scalar),
        }
    }
}

/// Decodes arbitrary bytes and checks that one encode/decode pass reaches a
/// fixed point.
///
/// The first decode may normalise (empty collections become null, colliding
/// map keys collapse); after that, encoding and decoding must be stable.
///
/// # Panics
///
/// Panics if a decoded value fails to re-encode or does not stabilise.
pub fn test_decode_normalizes(input: &DecodeInput) {
    let descriptor = input.descriptor();
    let Ok(first) = decode(Some(input.bytes.as_slice()), &descriptor) else {
        return;
    };
    let once = encode_as(&first, &descriptor)
        .unwrap_or_else(|err| panic!("decoded {first} does not re-encode: {err}"));
    let second = decode(once.as_deref(), &descriptor)
        .unwrap_or_else(|err| panic!("re-encoded {first} does not decode: {err}"));
    let twice = encode_as(&second, &descriptor)
        .unwrap_or_else(|err| panic!("normalised {second} does not re-encode: {err}"));
    let third = decode(twice.as_deref(), &descriptor)
        .unwrap_or_else(|err| panic!("normalised {second} does not decode: {err}"));
    assert_eq!(second, third, "decode/encode is not stable for {descriptor}");
}

/// Parses a type name and checks that its rendering parses back to the same tree.
///
/// # Panics
///
/// Panics if a successfully parsed name renders to something that parses differently.
pub fn test_type_name_round_trip(name: &str) {
    let Ok(parsed) = TypeDescriptor::parse(name) else {
        return;
    };
    let rendered = parsed.to_string();
    let reparsed = TypeDescriptor::parse(&rendered)
        .unwrap_or_else(|err| panic!("rendered {rendered:?} does not parse: {err}"));
    assert_eq!(parsed, reparsed);
}
