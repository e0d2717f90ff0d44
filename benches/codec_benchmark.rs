//! Benchmark for value encoding, decoding and routing key composition.
//!
//! Measures the performance of:
//! 1. Encoding scalars with a hint and by inference
//! 2. Encoding and decoding collections of growing size
//! 3. Composing single and composite routing keys

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use cql_value_codec::num_bigint::BigInt;
use cql_value_codec::{
    QueryOptions, TypeDescriptor, TypeHint, Value, compute_routing_key, decode, encode, encode_as,
};
use std::hint::black_box;

/// A list of `len` numbers.
fn number_list(len: u16) -> Value {
    Value::List((0..len).map(|i| Value::from(f64::from(i))).collect())
}

/// A map of `len` text keys to bigint values.
fn text_map(len: u16) -> Value {
    Value::Map(
        (0..len)
            .map(|i| (Value::from(format!("key-{i}")), Value::from(i64::from(i))))
            .collect(),
    )
}

fn benchmark_scalar_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalar_encoding");

    let int_hint = TypeHint::from("int");
    let timestamp_hint = TypeHint::from("timestamp");
    let varint_hint = TypeHint::from("varint");
    let uuid = Value::from("550e8400-e29b-41d4-a716-446655440000");
    let big = Value::from(BigInt::from(i64::MAX) * BigInt::from(i64::MAX));

    group.bench_function("int_hinted", |b| {
        b.iter(|| black_box(encode(black_box(&Value::from(-1)), Some(&int_hint)).unwrap()));
    });

    group.bench_function("double_inferred", |b| {
        b.iter(|| black_box(encode(black_box(&Value::from(1.5)), None).unwrap()));
    });

    group.bench_function("timestamp_from_string", |b| {
        let date = Value::from("2015-01-20T11:58:50.012Z");
        b.iter(|| black_box(encode(black_box(&date), Some(&timestamp_hint)).unwrap()));
    });

    group.bench_function("uuid_inferred", |b| {
        b.iter(|| black_box(encode(black_box(&uuid), None).unwrap()));
    });

    group.bench_function("varint_128_bit", |b| {
        b.iter(|| black_box(encode(black_box(&big), Some(&varint_hint)).unwrap()));
    });

    group.finish();
}

fn benchmark_collections(c: &mut Criterion) {
    let mut group = c.benchmark_group("collections");

    let list_type = TypeDescriptor::list(cql_value_codec::TypeCode::Double);
    let map_type = TypeDescriptor::parse("map<text, bigint>").unwrap();

    for len in [10u16, 100, 1000] {
        let list = number_list(len);
        let map = text_map(len);
        let list_bytes = encode_as(&list, &list_type).unwrap();
        let map_bytes = encode_as(&map, &map_type).unwrap();

        group.throughput(Throughput::Elements(u64::from(len)));

        group.bench_with_input(BenchmarkId::new("encode_list", len), &list, |b, list| {
            b.iter(|| black_box(encode_as(black_box(list), &list_type).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("decode_list", len), &list_bytes, |b, bytes| {
            b.iter(|| black_box(decode(black_box(bytes.as_deref()), &list_type).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("encode_map", len), &map, |b, map| {
            b.iter(|| black_box(encode_as(black_box(map), &map_type).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("decode_map", len), &map_bytes, |b, bytes| {
            b.iter(|| black_box(decode(black_box(bytes.as_deref()), &map_type).unwrap()));
        });
    }

    group.finish();
}

fn benchmark_routing_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("routing_key");

    let params = [
        Value::from(1),
        Value::from("yeah"),
        Value::from(2),
        Value::from("550e8400-e29b-41d4-a716-446655440000"),
    ];
    let single = QueryOptions::new().hints([Some("int")]).routing_indexes([0]);
    let composite = QueryOptions::new()
        .hints([Some("int"), Some("text"), Some("int"), Some("uuid")])
        .routing_indexes([0, 1, 2, 3]);

    group.bench_function("single_component", |b| {
        b.iter(|| black_box(compute_routing_key(black_box(&params), &single).unwrap()));
    });

    group.bench_function("four_components", |b| {
        b.iter(|| black_box(compute_routing_key(black_box(&params), &composite).unwrap()));
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_scalar_encoding,
    benchmark_collections,
    benchmark_routing_key,
);
criterion_main!(benches);
