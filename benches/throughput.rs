//! Throughput Benchmark for respkv
//!
//! Measures the store, command dispatch and the RESP decoder in isolation.

use bytes::Bytes;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use respkv::commands::CommandHandler;
use respkv::protocol::{RespDecoder, RespValue};
use respkv::storage::StorageEngine;
use std::sync::Arc;
use std::time::Duration;

/// Benchmark SET operations
fn bench_set(c: &mut Criterion) {
    let engine = Arc::new(StorageEngine::new());

    let mut group = c.benchmark_group("set");
    group.throughput(Throughput::Elements(1));

    group.bench_function("set_small", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let key = Bytes::from(format!("key:{}", i));
            engine.set(key, Bytes::from("small_value"));
            i += 1;
        });
    });

    group.bench_function("set_overwrite", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let key = Bytes::from(format!("key:{}", i % 1_000));
            engine.set(key, Bytes::from("value"));
            i += 1;
        });
    });

    group.finish();
}

/// Benchmark GET operations
fn bench_get(c: &mut Criterion) {
    let engine = Arc::new(StorageEngine::new());

    for i in 0..100_000 {
        let key = Bytes::from(format!("key:{}", i));
        let value = Bytes::from(format!("value:{}", i));
        engine.set(key, value);
    }

    let mut group = c.benchmark_group("get");
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_existing", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let key = format!("key:{}", i % 100_000);
            black_box(engine.get(key.as_bytes()));
            i += 1;
        });
    });

    group.bench_function("get_missing", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let key = format!("missing:{}", i);
            black_box(engine.get(key.as_bytes()));
            i += 1;
        });
    });

    group.finish();
}

/// Benchmark concurrent access
fn bench_concurrent(c: &mut Criterion) {
    use std::thread;

    let mut group = c.benchmark_group("concurrent");
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("4_threads_mixed", |b| {
        b.iter(|| {
            let engine = Arc::new(StorageEngine::new());
            let handles: Vec<_> = (0..4)
                .map(|t| {
                    let engine = Arc::clone(&engine);
                    thread::spawn(move || {
                        for i in 0..10_000 {
                            let key = Bytes::from(format!("key:{}:{}", t, i));
                            engine.set(key.clone(), Bytes::from("value"));
                            engine.get(&key);
                        }
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }

            black_box(engine.len());
        });
    });

    group.finish();
}

/// Benchmark command parsing and dispatch
fn bench_dispatch(c: &mut Criterion) {
    let handler = CommandHandler::new(Arc::new(StorageEngine::new()));
    handler.execute(&RespValue::simple_string("SET name Ariz"));

    let mut group = c.benchmark_group("dispatch");
    group.throughput(Throughput::Elements(1));

    let ping = RespValue::simple_string("PING");
    group.bench_function("ping", |b| {
        b.iter(|| black_box(handler.execute(&ping).serialize()));
    });

    let get = RespValue::bulk_string("GET name");
    group.bench_function("get", |b| {
        b.iter(|| black_box(handler.execute(&get).serialize()));
    });

    group.finish();
}

/// Benchmark the RESP decoder on in-memory input
fn bench_decode(c: &mut Criterion) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();

    let simple = b"+SET user:101 Ariz\r\n".to_vec();
    let bulk = RespValue::bulk_string(Bytes::from("x".repeat(16 * 1024))).serialize();

    let mut group = c.benchmark_group("decode");

    group.throughput(Throughput::Bytes(simple.len() as u64));
    group.bench_function("simple_string", |b| {
        b.to_async(&rt).iter(|| async {
            let mut decoder = RespDecoder::new(&simple[..]);
            black_box(decoder.decode().await.unwrap());
        });
    });

    group.throughput(Throughput::Bytes(bulk.len() as u64));
    group.bench_function("bulk_string_16k", |b| {
        b.to_async(&rt).iter(|| async {
            let mut decoder = RespDecoder::new(&bulk[..]);
            black_box(decoder.decode().await.unwrap());
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_set,
    bench_get,
    bench_concurrent,
    bench_dispatch,
    bench_decode,
);

criterion_main!(benches);
