//! Criterion benchmarks for the row kernel.
//!
//! The serial baseline is the kernel over all N rows; the per-worker cost
//! of the distributed compute phase is the same kernel over N / P rows, so
//! benchmarking row-block slices of decreasing height shows how the
//! compute phase scales with the group size.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use matmul_mpi::matrix::generate::generate_inputs;
use matmul_mpi::matrix::multiply::{multiply_rows, multiply_serial};
use matmul_mpi::partition::Partition;

fn bench_serial(c: &mut Criterion) {
    let mut group = c.benchmark_group("serial");
    for n in [64, 128, 256] {
        let (a, b) = generate_inputs(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |bench, &n| {
            bench.iter(|| multiply_serial(black_box(&a), black_box(&b), n));
        });
    }
    group.finish();
}

fn bench_worker_block(c: &mut Criterion) {
    let n = 256;
    let (a, b) = generate_inputs(n);

    let mut group = c.benchmark_group("worker_block");
    for workers in [1, 2, 4, 8] {
        let partition = Partition::new(n, workers).unwrap();
        let cells = partition.cells_per_worker();
        let a_block = &a[..cells];
        let mut c_block = vec![0.0f32; cells];

        group.bench_with_input(
            BenchmarkId::from_parameter(workers),
            &workers,
            |bench, _| {
                bench.iter(|| {
                    multiply_rows(black_box(a_block), black_box(&b), &mut c_block, n);
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_serial, bench_worker_block);
criterion_main!(benches);
