// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codec Benchmark
//!
//! Measures encode/decode latency for:
//! - A flat record message
//! - A homogeneous collection (single shared type id)
//! - A heterogeneous collection (per-element tags)
//! - A compressed envelope
//!
//! No network I/O; one pre-allocated cursor per iteration batch.

#![allow(clippy::uninlined_format_args)]

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box as bb;
use tagwire::{
    decode_message, encode_message, Codec, Cursor, CursorMut, PrimitiveKind, RecordSpecBuilder,
    RecordValue, Registry, TypeKey, Value,
};

fn bench_registry() -> Registry {
    let mut registry = Registry::with_defaults();
    registry
        .register(
            TypeKey::record("Sample"),
            Codec::Record(
                RecordSpecBuilder::new("Sample")
                    .field("seq", TypeKey::Primitive(PrimitiveKind::I64))
                    .field("label", TypeKey::Str)
                    .field("value", TypeKey::Primitive(PrimitiveKind::F64))
                    .build(),
            ),
        )
        .expect("register Sample");
    registry.freeze();
    registry
}

fn sample(seq: i64) -> Value {
    Value::Record(
        RecordValue::new("Sample")
            .with("seq", seq)
            .with("label", "bench")
            .with("value", 0.25f64),
    )
}

fn bench_record(c: &mut Criterion) {
    let registry = bench_registry();
    let message = sample(7);
    let mut buffer = vec![0u8; 4096];

    c.bench_function("encode_record", |b| {
        b.iter(|| {
            let mut out = CursorMut::new(&mut buffer);
            encode_message(&registry, bb(&message), &mut out).expect("encode");
            bb(out.offset())
        })
    });

    let mut out = CursorMut::new(&mut buffer);
    encode_message(&registry, &message, &mut out).expect("encode");
    let written = out.offset();
    let frame = buffer[..written].to_vec();

    c.bench_function("decode_record", |b| {
        b.iter(|| {
            let mut cursor = Cursor::new(bb(&frame));
            bb(decode_message(&registry, &mut cursor).expect("decode"))
        })
    });
}

fn bench_collections(c: &mut Criterion) {
    let registry = bench_registry();
    let mut group = c.benchmark_group("collection_by_shape");
    let mut buffer = vec![0u8; 64 * 1024];

    for count in [16usize, 256] {
        let homogeneous = Value::list((0..count as i32).map(Value::I32).collect());
        group.bench_with_input(
            BenchmarkId::new("homogeneous", count),
            &homogeneous,
            |b, message| {
                b.iter(|| {
                    let mut out = CursorMut::new(&mut buffer);
                    encode_message(&registry, bb(message), &mut out).expect("encode");
                    bb(out.offset())
                })
            },
        );

        let heterogeneous = Value::list(
            (0..count as i32)
                .map(|i| {
                    if i % 2 == 0 {
                        Value::I32(i)
                    } else {
                        Value::Str(i.to_string())
                    }
                })
                .collect(),
        );
        group.bench_with_input(
            BenchmarkId::new("heterogeneous", count),
            &heterogeneous,
            |b, message| {
                b.iter(|| {
                    let mut out = CursorMut::new(&mut buffer);
                    encode_message(&registry, bb(message), &mut out).expect("encode");
                    bb(out.offset())
                })
            },
        );
    }
    group.finish();
}

fn bench_envelope(c: &mut Criterion) {
    let registry = bench_registry();
    let inner = Value::list((0..64).map(|i| sample(i)).collect());
    let envelope = Value::Compressed(Box::new(inner));
    let mut buffer = vec![0u8; 64 * 1024];

    c.bench_function("encode_compressed_envelope", |b| {
        b.iter(|| {
            let mut out = CursorMut::new(&mut buffer);
            encode_message(&registry, bb(&envelope), &mut out).expect("encode");
            bb(out.offset())
        })
    });
}

criterion_group!(benches, bench_record, bench_collections, bench_envelope);
criterion_main!(benches);
