//! Type-name grammar fuzzer.

use cql_value_codec::testing::test_type_name_round_trip;
use honggfuzz::fuzz;

fn main() {
    loop {
        fuzz!(|name: String| {
            test_type_name_round_trip(&name);
        });
    }
}
