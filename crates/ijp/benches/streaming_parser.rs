//! Benchmark – `ijp::StreamingParser`
#![allow(missing_docs)]

use std::{fmt::Write, hint::black_box, time::Duration};

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use ijp::{ParserOptions, StreamingParser, chunk_utils::produce_chunks};

/// A document of exactly `target_len` bytes holding one long string.
fn make_string_payload(target_len: usize) -> String {
    let overhead = "{\"data\":\"\"}".len();
    assert!(target_len >= overhead, "target_len must be >= {overhead}");

    let mut s = String::with_capacity(target_len);
    s.push_str("{\"data\":\"");
    s.extend(std::iter::repeat_n('a', target_len - overhead));
    s.push_str("\"}");
    debug_assert_eq!(s.len(), target_len);
    s
}

/// An array of small records, dominated by keys, numbers and literals.
fn make_records_payload(records: usize) -> String {
    let mut s = String::from("[");
    for i in 0..records {
        if i > 0 {
            s.push(',');
        }
        write!(
            s,
            r#"{{"id":{i},"price":{}.25,"tags":["a","b\n"],"ok":true,"note":null}}"#,
            i * 3
        )
        .unwrap();
    }
    s.push(']');
    s
}

/// Feeds `chunks` and returns the number of events produced.
fn run_streaming_parser(chunks: &[&str], emit_string_parts: bool) -> usize {
    let mut parser = StreamingParser::new(ParserOptions {
        emit_string_parts,
        ..Default::default()
    });
    let mut produced = 0usize;

    for chunk in chunks {
        parser.feed(chunk).unwrap();
        produced += parser.by_ref().count();
    }
    parser.close().unwrap();
    produced + parser.count()
}

fn bench_string_payload(c: &mut Criterion) {
    let payload = make_string_payload(10_000);

    let mut group = c.benchmark_group("streaming_parser_string");
    group.throughput(Throughput::Bytes(payload.len() as u64));

    for &parts in &[1usize, 100, 1_000, 5_000] {
        let chunks = produce_chunks(&payload, parts);
        for string_parts in [true, false] {
            let name = if string_parts { "string_parts" } else { "whole_strings" };
            group.bench_with_input(BenchmarkId::new(name, parts), &chunks, |b, chunks| {
                b.iter(|| black_box(run_streaming_parser(black_box(chunks), string_parts)));
            });
        }
    }
    group.finish();
}

fn bench_records_payload(c: &mut Criterion) {
    let payload = make_records_payload(500);

    let mut group = c.benchmark_group("streaming_parser_records");
    group.throughput(Throughput::Bytes(payload.len() as u64));

    for &parts in &[1usize, 64, 4_096] {
        let chunks = produce_chunks(&payload, parts);
        group.bench_with_input(BenchmarkId::new("ijp", parts), &chunks, |b, chunks| {
            b.iter(|| black_box(run_streaming_parser(black_box(chunks), true)));
        });
    }
    group.bench_function("serde_json_whole", |b| {
        b.iter(|| {
            let value: serde_json::Value = serde_json::from_str(black_box(&payload)).unwrap();
            black_box(value)
        });
    });
    group.finish();
}

fn criterion() -> Criterion {
    let mut c = Criterion::default();
    if cfg!(feature = "bench-fast") {
        c = c
            .warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10);
    } else {
        c = c
            .warm_up_time(Duration::from_secs(3))
            .measurement_time(Duration::from_secs(5));
    }
    c
}

criterion_group! {
    name = benches;
    config = criterion();
    targets = bench_string_payload, bench_records_payload
}
criterion_main!(benches);
