//! Parser benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use vtstate::decoder::Runes;
use vtstate::parser::Parser;

fn bench_parse_plain_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser");

    let plain_text = "Hello, World! ".repeat(1000);
    group.throughput(Throughput::Bytes(plain_text.len() as u64));

    group.bench_function("plain_text", |b| {
        b.iter(|| {
            let mut parser = Parser::new();
            black_box(parser.parse(black_box(&plain_text)))
        })
    });

    group.finish();
}

fn bench_parse_csi_sequences(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser");

    let csi_heavy = "\x1b[1;31mRed\x1b[0m \x1b[5;10H\x1b[2J".repeat(100);
    group.throughput(Throughput::Bytes(csi_heavy.len() as u64));

    group.bench_function("csi_sequences", |b| {
        b.iter(|| {
            let mut parser = Parser::new();
            black_box(parser.parse(black_box(&csi_heavy)))
        })
    });

    group.finish();
}

fn bench_parse_osc(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser");

    let osc = "\x1b]0;a window title\x07text".repeat(200);
    group.throughput(Throughput::Bytes(osc.len() as u64));

    group.bench_function("osc_titles", |b| {
        b.iter(|| {
            let mut parser = Parser::new();
            black_box(parser.parse(black_box(&osc)))
        })
    });

    group.finish();
}

fn bench_decode_utf8(c: &mut Criterion) {
    let mut group = c.benchmark_group("decoder");

    let utf8 = "Hello 世界 🎉 Привет ".repeat(500);
    group.throughput(Throughput::Bytes(utf8.len() as u64));

    group.bench_function("runes", |b| {
        b.iter(|| black_box(Runes::new(black_box(utf8.as_bytes())).flatten().count()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_parse_plain_text,
    bench_parse_csi_sequences,
    bench_parse_osc,
    bench_decode_utf8
);
criterion_main!(benches);
