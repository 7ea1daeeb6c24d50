//! Benchmarks for program execution.
//!
//! Tests interpreter throughput and cloning cost:
//! - Self-reproducing program (relative mode, self-modification)
//! - Tight countdown loop (arithmetic and branching dominated)
//! - Program parsing
//! - Cloning a machine with grown memory

extern crate intcode;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use intcode::{Machine, Program};
use std::hint::black_box;

const QUINE: [i64; 16] = [
    109, 1, 204, -1, 1001, 100, 1, 100, 1008, 100, 16, 101, 1006, 101, 0, 99,
];

/// Counts its input down to zero, then outputs the final counter.
const COUNTDOWN: [i64; 12] = [3, 100, 1001, 100, -1, 100, 1005, 100, 2, 4, 100, 99];

/// Benchmark a full run of the self-reproducing program.
fn bench_quine(c: &mut Criterion) {
    let mut machine = Machine::new();

    c.bench_function("run_quine", |b| {
        b.iter(|| {
            machine.load(black_box(&QUINE));
            machine.run();
            black_box(machine.drain_outputs())
        });
    });
}

/// Benchmark the countdown loop at several iteration counts.
fn bench_countdown(c: &mut Criterion) {
    let mut group = c.benchmark_group("countdown");
    for count in [1_000i64, 100_000] {
        // INPUT, count x (ADD + JNZ), OUTPUT, HALT
        group.throughput(Throughput::Elements(2 * count as u64 + 3));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut machine = Machine::new();
            b.iter(|| {
                machine.load(&COUNTDOWN);
                machine.push_input(black_box(count));
                machine.run();
                black_box(machine.pop_output())
            });
        });
    }
    group.finish();
}

/// Benchmark parsing comma-separated program text.
fn bench_parse(c: &mut Criterion) {
    let text = (0..10_000)
        .map(|i| (i * 7 - 35_000).to_string())
        .collect::<Vec<_>>()
        .join(",");

    c.bench_function("parse_10k_cells", |b| {
        b.iter(|| {
            let program = Program::parse(black_box(&text)).unwrap();
            black_box(program)
        });
    });
}

/// Benchmark cloning a machine whose memory has grown to 64Ki cells.
fn bench_clone(c: &mut Criterion) {
    let mut machine = Machine::with_program(&QUINE);
    machine.patch(65_535, 1).unwrap();

    c.bench_function("clone_64k_machine", |b| {
        b.iter(|| black_box(machine.clone()));
    });
}

criterion_group!(benches, bench_quine, bench_countdown, bench_parse, bench_clone);
criterion_main!(benches);
