use std::fs;

use matmul_mpi::clock::{FakeClock, MonotonicClock};
use matmul_mpi::comm::Communicator;
use matmul_mpi::comm::local::run_group;
use matmul_mpi::config::{RunConfig, parse_dimension};
use matmul_mpi::error::Error;
use matmul_mpi::matrix::generate::generate_inputs;
use matmul_mpi::matrix::multiply::multiply_serial;
use matmul_mpi::partition::Partition;
use matmul_mpi::run::run;
use matmul_mpi::timing::{PhaseReport, TimingSample};

fn assert_matrices_identical(expected: &[f32], actual: &[f32], name: &str) {
    assert_eq!(expected.len(), actual.len(), "{}: length mismatch", name);
    for i in 0..expected.len() {
        assert!(
            expected[i].to_bits() == actual[i].to_bits(),
            "{}: mismatch at index {}: expected {}, got {}",
            name,
            i,
            expected[i],
            actual[i]
        );
    }
}

fn quiet_config() -> RunConfig {
    RunConfig {
        display_matrices: false,
        write_artifact: false,
        ..RunConfig::default()
    }
}

/// Run the distributed pipeline on an in-process group and return the
/// product gathered at the root.
fn distributed_product(n: usize, workers: usize, config: &RunConfig) -> Vec<f32> {
    let outcomes = run_group(workers, |comm| {
        let clock = MonotonicClock::new();
        run(&comm, &clock, n, config).unwrap()
    });
    outcomes
        .into_iter()
        .flatten()
        .next()
        .expect("root produced no outcome")
        .product
}

// ============================================================
// Input generation
// ============================================================

#[test]
fn test_interleaved_fill_order() {
    let (a, b) = generate_inputs(2);
    assert_eq!(a, vec![0.0, 2.0, 4.0, 6.0]);
    assert_eq!(b, vec![1.0, 3.0, 5.0, 7.0]);

    let (a, b) = generate_inputs(3);
    assert_eq!(a[0], 0.0);
    assert_eq!(b[0], 1.0);
    assert_eq!(a[8], 16.0);
    assert_eq!(b[8], 17.0);
}

// ============================================================
// Serial baseline
// ============================================================

#[test]
fn test_serial_2x2() {
    let (a, b) = generate_inputs(2);
    let c = multiply_serial(&a, &b, 2);
    assert_eq!(c, vec![10.0, 14.0, 34.0, 54.0]);
}

#[test]
fn test_serial_identity() {
    // A × I = A for a hand-built identity.
    let n = 4;
    let (a, _) = generate_inputs(n);
    let mut identity = vec![0.0f32; n * n];
    for i in 0..n {
        identity[i * n + i] = 1.0;
    }
    let c = multiply_serial(&a, &identity, n);
    assert_matrices_identical(&a, &c, "a_times_identity");
}

// ============================================================
// Partition
// ============================================================

#[test]
fn test_partition_covers_all_rows_exactly_once() {
    for (n, workers) in [(4, 1), (4, 2), (4, 4), (12, 3), (16, 8)] {
        let partition = Partition::new(n, workers).unwrap();
        let mut covered = vec![false; n];
        for rank in 0..workers {
            for row in partition.row_range(rank) {
                assert!(
                    !covered[row],
                    "row {} covered twice for n={} workers={}",
                    row, n, workers
                );
                covered[row] = true;
            }
        }
        assert!(
            covered.iter().all(|&seen| seen),
            "rows left uncovered for n={} workers={}",
            n,
            workers
        );
    }
}

#[test]
fn test_partition_byte_offsets_match_row_order() {
    let partition = Partition::new(8, 4).unwrap();
    assert_eq!(partition.rows_per_worker(), 2);
    assert_eq!(partition.cells_per_worker(), 16);
    for rank in 0..4 {
        assert_eq!(partition.byte_offset(rank), (rank * 16 * 4) as u64);
    }
}

#[test]
fn test_partition_rejects_uneven_split() {
    assert!(matches!(
        Partition::new(3, 2),
        Err(Error::InvalidConfiguration(_))
    ));
    assert!(matches!(
        Partition::new(5, 4),
        Err(Error::InvalidConfiguration(_))
    ));
    assert!(matches!(
        Partition::new(0, 2),
        Err(Error::InvalidConfiguration(_))
    ));
    assert!(matches!(
        Partition::new(4, 0),
        Err(Error::InvalidConfiguration(_))
    ));
}

// ============================================================
// Command line contract
// ============================================================

#[test]
fn test_parse_dimension_accepts_one_numeral() {
    assert_eq!(parse_dimension(vec!["16".to_string()]).unwrap(), 16);
}

#[test]
fn test_parse_dimension_rejects_bad_input() {
    let cases: Vec<Vec<String>> = vec![
        vec![],
        vec!["4".to_string(), "4".to_string()],
        vec!["four".to_string()],
        vec!["0".to_string()],
        vec!["-2".to_string()],
    ];
    for args in cases {
        assert!(
            matches!(parse_dimension(args.clone()), Err(Error::InvalidConfiguration(_))),
            "args {:?} should be rejected",
            args
        );
    }
}

// ============================================================
// Local collectives
// ============================================================

#[test]
fn test_scatter_gather_roundtrip() {
    let outputs = run_group(4, |comm| {
        let root_data: Vec<f32> = (0..8).map(|v| v as f32).collect();
        let mut block = vec![0.0f32; 2];
        comm.scatter(comm.is_root().then_some(root_data.as_slice()), &mut block)
            .unwrap();

        let mut gathered = vec![0.0f32; 8];
        comm.gather(&block, comm.is_root().then_some(&mut gathered[..]))
            .unwrap();

        (comm.rank(), block, gathered)
    });

    for (rank, block, _) in &outputs {
        assert_eq!(block, &vec![(2 * rank) as f32, (2 * rank + 1) as f32]);
    }
    let (_, _, gathered) = &outputs[0];
    assert_eq!(gathered, &(0..8).map(|v| v as f32).collect::<Vec<_>>());
}

#[test]
fn test_broadcast_replicates_root_buffer() {
    let outputs = run_group(3, |comm| {
        let mut buf = if comm.is_root() {
            vec![1.0f32, 2.0, 3.0, 4.0]
        } else {
            vec![0.0f32; 4]
        };
        comm.broadcast(&mut buf).unwrap();
        buf
    });
    for buf in outputs {
        assert_eq!(buf, vec![1.0, 2.0, 3.0, 4.0]);
    }
}

// ============================================================
// Distributed vs serial
// ============================================================

#[test]
fn test_distributed_2x2_concrete_product() {
    let expected = vec![10.0f32, 14.0, 34.0, 54.0];
    let config = quiet_config();
    for workers in [1, 2] {
        let product = distributed_product(2, workers, &config);
        assert_matrices_identical(&expected, &product, &format!("n=2 workers={}", workers));
    }
}

#[test]
fn test_distributed_matches_serial_bit_for_bit() {
    let config = quiet_config();
    for (n, workers) in [(2, 1), (2, 2), (4, 2), (4, 4), (6, 3), (8, 4), (16, 8)] {
        let (a, b) = generate_inputs(n);
        let expected = multiply_serial(&a, &b, n);
        let product = distributed_product(n, workers, &config);
        assert_matrices_identical(
            &expected,
            &product,
            &format!("n={} workers={}", n, workers),
        );
    }
}

#[test]
fn test_single_worker_group_is_same_code_path() {
    let config = quiet_config();
    let (a, b) = generate_inputs(6);
    let expected = multiply_serial(&a, &b, 6);
    let product = distributed_product(6, 1, &config);
    assert_matrices_identical(&expected, &product, "single_worker");
}

#[test]
fn test_one_row_per_worker_boundary() {
    let config = quiet_config();
    let (a, b) = generate_inputs(8);
    let expected = multiply_serial(&a, &b, 8);
    let product = distributed_product(8, 8, &config);
    assert_matrices_identical(&expected, &product, "one_row_per_worker");
}

#[test]
fn test_uneven_split_fails_on_every_rank_before_any_collective() {
    let dir = tempfile::tempdir().unwrap();
    let config = RunConfig {
        display_matrices: false,
        write_artifact: true,
        artifact_path: dir.path().join("never_written.bin"),
    };

    let results = run_group(2, |comm| {
        let clock = MonotonicClock::new();
        run(&comm, &clock, 3, &config)
    });

    for result in results {
        assert!(matches!(result, Err(Error::InvalidConfiguration(_))));
    }
    assert!(
        !config.artifact_path.exists(),
        "a rejected run must not create the artifact"
    );
}

// ============================================================
// Output artifact
// ============================================================

fn read_artifact_floats(path: &std::path::Path) -> Vec<f32> {
    fs::read(path)
        .unwrap()
        .chunks_exact(4)
        .map(|chunk| f32::from_ne_bytes(chunk.try_into().unwrap()))
        .collect()
}

#[test]
fn test_artifact_is_row_major_product() {
    let n = 4;
    let workers = 2;
    let dir = tempfile::tempdir().unwrap();
    let config = RunConfig {
        display_matrices: false,
        write_artifact: true,
        artifact_path: dir.path().join("result.bin"),
    };

    let product = distributed_product(n, workers, &config);

    let bytes = fs::metadata(&config.artifact_path).unwrap().len();
    assert_eq!(bytes, (n * n * 4) as u64);

    let from_file = read_artifact_floats(&config.artifact_path);
    assert_matrices_identical(&product, &from_file, "artifact");

    let (a, b) = generate_inputs(n);
    let expected = multiply_serial(&a, &b, n);
    assert_matrices_identical(&expected, &from_file, "artifact_vs_serial");
}

#[test]
fn test_artifact_is_idempotent_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let config = RunConfig {
        display_matrices: false,
        write_artifact: true,
        artifact_path: dir.path().join("result.bin"),
    };

    distributed_product(8, 4, &config);
    let first = fs::read(&config.artifact_path).unwrap();

    distributed_product(8, 4, &config);
    let second = fs::read(&config.artifact_path).unwrap();

    assert_eq!(first, second, "rerunning must produce identical bytes");
}

#[test]
fn test_artifact_is_truncated_not_accumulated() {
    let dir = tempfile::tempdir().unwrap();
    let config = RunConfig {
        display_matrices: false,
        write_artifact: true,
        artifact_path: dir.path().join("result.bin"),
    };

    // A big run first, then a small one: the small run's artifact must not
    // carry the big run's tail.
    distributed_product(8, 2, &config);
    distributed_product(4, 2, &config);

    let bytes = fs::metadata(&config.artifact_path).unwrap().len();
    assert_eq!(bytes, (4 * 4 * 4) as u64);
}

// ============================================================
// Phase timing
// ============================================================

#[test]
fn test_timing_sample_derives_seconds_from_frequency() {
    let sample = TimingSample::new(0, 512_000_000, 512_000_000);
    assert!((sample.seconds() - 1.0).abs() < 1e-12);

    let sample = TimingSample::new(100, 356, 512);
    assert!((sample.seconds() - 0.5).abs() < 1e-12);
}

#[test]
fn test_phase_report_overhead() {
    let report = PhaseReport {
        compute_seconds: 0.25,
        total_seconds: 1.0,
        write_seconds: None,
    };
    assert!((report.overhead_seconds() - 0.75).abs() < 1e-12);
    assert!((report.overhead_percent() - 75.0).abs() < 1e-12);
}

#[test]
fn test_run_timings_are_deterministic_with_fake_clock() {
    // Each rank samples its own clock; the root takes four samples on the
    // compute path (total start, compute start, compute end, total end),
    // so with a step of 5 ticks at 1000 ticks per second the durations are
    // exact.
    let config = quiet_config();
    let outcomes = run_group(2, |comm| {
        let clock = FakeClock::new(5, 1000);
        run(&comm, &clock, 4, &config).unwrap()
    });
    let report = outcomes
        .into_iter()
        .flatten()
        .next()
        .expect("root produced no outcome")
        .report;

    assert!((report.compute_seconds - 0.005).abs() < 1e-12);
    assert!((report.total_seconds - 0.015).abs() < 1e-12);
    assert!((report.overhead_seconds() - 0.010).abs() < 1e-12);
    assert!((report.overhead_percent() - 200.0 / 3.0).abs() < 1e-9);
    assert!(report.write_seconds.is_none());
}

#[test]
fn test_write_timing_measured_with_fake_clock() {
    let dir = tempfile::tempdir().unwrap();
    let config = RunConfig {
        display_matrices: false,
        write_artifact: true,
        artifact_path: dir.path().join("result.bin"),
    };
    let outcomes = run_group(2, |comm| {
        let clock = FakeClock::new(5, 1000);
        run(&comm, &clock, 4, &config).unwrap()
    });
    let report = outcomes
        .into_iter()
        .flatten()
        .next()
        .expect("root produced no outcome")
        .report;

    // Samples five and six bracket the root's positioned write.
    assert!((report.write_seconds.unwrap() - 0.005).abs() < 1e-12);
}
