//! Engine benchmarks: bytes in, screen state out

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use vtstate::Terminal;

fn bench_write_lines(c: &mut Criterion) {
    let mut group = c.benchmark_group("terminal");

    let lines = "Line: \x1b[32mOK\x1b[0m some ordinary output\r\n".repeat(500);
    group.throughput(Throughput::Bytes(lines.len() as u64));

    group.bench_function("scrolling_output", |b| {
        let term = Terminal::new(80, 24);
        b.iter(|| black_box(term.write(black_box(lines.as_bytes()))))
    });

    group.finish();
}

fn bench_full_screen_redraw(c: &mut Criterion) {
    let mut group = c.benchmark_group("terminal");

    let mut frame = String::from("\x1b[H\x1b[2J");
    for row in 1..=24 {
        frame.push_str(&format!("\x1b[{};1H\x1b[4{}m{}", row, row % 8, "x".repeat(80)));
    }
    group.throughput(Throughput::Bytes(frame.len() as u64));

    group.bench_function("full_redraw", |b| {
        let term = Terminal::new(80, 24);
        b.iter(|| black_box(term.write(black_box(frame.as_bytes()))))
    });

    group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("terminal");

    let term = Terminal::new(200, 60);
    term.write("\x1b[1;31mred text\x1b[0m and plain ".repeat(400).as_bytes());

    group.bench_function("snapshot_200x60", |b| b.iter(|| black_box(term.snapshot())));

    group.bench_function("tracking_changes", |b| {
        b.iter(|| black_box(term.write_tracking_changes(black_box(b"abc\r\ndef\r\n"))))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_write_lines,
    bench_full_screen_redraw,
    bench_snapshot
);
criterion_main!(benches);
