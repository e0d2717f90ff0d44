//! Decode fuzzer for arbitrary bytes against arbitrary descriptors.
//!
//! Tests that decoding either fails cleanly or reaches a fixed point after
//! one encode/decode pass.

use cql_value_codec::testing::{DecodeInput, test_decode_normalizes};
use honggfuzz::fuzz;

fn main() {
    loop {
        fuzz!(|input: DecodeInput| {
            test_decode_normalizes(&input);
        });
    }
}
