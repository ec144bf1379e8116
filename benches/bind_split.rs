//! Bind, split, and wire throughput over flat and nested columns.
//!
//! Run with: `cargo bench --bench bind_split`

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use minframe::{Array, Builder, Dict, List, Table, bind, split};

const ROWS: usize = 100_000;

fn strings() -> Array {
    let mut b = Builder::<String>::with_capacity(ROWS).unwrap();
    for i in 0..ROWS {
        if i % 11 == 0 {
            b.append_null().unwrap();
        } else {
            b.append(format!("value-{i}")).unwrap();
        }
    }
    b.finish().unwrap()
}

fn lists() -> Array {
    let mut b = Builder::<List<i64>>::with_capacity(ROWS).unwrap();
    for i in 0..ROWS {
        b.append((0..(i % 5) as i64).map(Some).collect::<Vec<_>>())
            .unwrap();
    }
    b.finish().unwrap()
}

fn dictionary() -> Array {
    let mut b = Builder::<Dict<String, u16>>::with_capacity(ROWS).unwrap();
    for i in 0..ROWS {
        b.append(format!("k{}", i % 500)).unwrap();
    }
    b.finish().unwrap()
}

fn bench_bind_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("bind_split");
    for (name, array) in [
        ("utf8", strings()),
        ("list_i64", lists()),
        ("dict_u16", dictionary()),
    ] {
        for k in [1_024, 16_384] {
            let chunks = split(&array, k).unwrap();
            group.bench_with_input(BenchmarkId::new(format!("split/{name}"), k), &k, |b, &k| {
                b.iter(|| black_box(split(black_box(&array), k).unwrap()))
            });
            group.bench_with_input(BenchmarkId::new(format!("bind/{name}"), k), &chunks, |b, chunks| {
                b.iter(|| black_box(bind(black_box(chunks)).unwrap()))
            });
        }
    }
    group.finish();
}

fn bench_wire(c: &mut Criterion) {
    use minframe::wire::{WriterOptions, read_table, write_table};

    let table = Table::from_arrays(
        "bench",
        vec![("s", strings()), ("l", lists()), ("d", dictionary())],
    )
    .unwrap();
    let opts = WriterOptions::with_max_chunk_len(8_192);
    let bytes = write_table(&table, &opts).unwrap();
    c.bench_function("wire/write", |b| {
        b.iter(|| black_box(write_table(black_box(&table), &opts).unwrap()))
    });
    c.bench_function("wire/read", |b| {
        b.iter(|| black_box(read_table(black_box(&bytes)).unwrap()))
    });
}

criterion_group!(benches, bench_bind_split, bench_wire);
criterion_main!(benches);
