//! The SPMD pipeline: partition, distribute, multiply, gather, report,
//! write.

use crate::clock::Clock;
use crate::comm::Communicator;
use crate::config::RunConfig;
use crate::error::Error;
use crate::matrix::display::format_matrix;
use crate::matrix::generate::generate_inputs;
use crate::matrix::multiply::multiply_rows;
use crate::partition::Partition;
use crate::timing::{PhaseReport, TimingSample};
use crate::writer::write_artifact;

/// What the root rank walks away with.
pub struct RunOutcome {
    /// The gathered product matrix, row-major.
    pub product: Vec<f32>,
    /// Phase timings as measured on the root.
    pub report: PhaseReport,
}

/// Execute one distributed multiplication across the whole group.
///
/// Every rank calls this with the same `n` and `config`; control flow
/// diverges only on rank-dependent branches. The partition check runs on
/// every rank before the first collective, so an invalid `(n, size)` pair
/// fails everywhere at once instead of leaving part of the group parked at
/// a rendezvous. Returns the gathered product and timing report on the
/// root, `None` on every other rank.
pub fn run<C: Communicator>(
    comm: &C,
    clock: &dyn Clock,
    n: usize,
    config: &RunConfig,
) -> Result<Option<RunOutcome>, Error> {
    let partition = Partition::new(n, comm.size())?;
    let cells = partition.cells_per_worker();

    let mut b = vec![0.0f32; n * n];
    let mut a_block = vec![0.0f32; cells];

    // Root-only state: the full inputs and the gathered product.
    let mut a = Vec::new();
    let mut c = Vec::new();

    if comm.is_root() {
        let inputs = generate_inputs(n);
        a = inputs.0;
        b = inputs.1;
        c = vec![0.0f32; n * n];

        if config.display_matrices {
            print!("{}", format_matrix(&a, n));
        }
    }

    let total_start = clock.now_ticks();

    comm.scatter(comm.is_root().then_some(a.as_slice()), &mut a_block)?;
    comm.broadcast(&mut b)?;
    comm.barrier()?;

    let mut result = vec![0.0f32; cells];
    let compute_start = clock.now_ticks();
    multiply_rows(&a_block, &b, &mut result, n);
    let compute_end = clock.now_ticks();

    comm.barrier()?;
    comm.gather(&result, comm.is_root().then_some(c.as_mut_slice()))?;
    let total_end = clock.now_ticks();

    let compute = TimingSample::new(compute_start, compute_end, clock.frequency());
    let total = TimingSample::new(total_start, total_end, clock.frequency());

    if comm.is_root() {
        println!("Parallel multiplication");
        if config.display_matrices {
            print!("{}", format_matrix(&c, n));
        }
        println!(
            "Number of seconds for processes to multiply matrices: {:.6}",
            compute.seconds()
        );
    }

    let write = if config.write_artifact {
        if comm.is_root() {
            println!("\nMPI I/O");
        }
        let sample = write_artifact(comm, clock, &partition, &result, &config.artifact_path)?;
        if comm.is_root() {
            println!("Processes wrote chunks to file.");
            if let Some(sample) = &sample {
                println!(
                    "Number of seconds for processes to write chunks to file: {:.10}",
                    sample.seconds()
                );
            }
        }
        sample
    } else {
        None
    };

    if !comm.is_root() {
        return Ok(None);
    }

    let report = PhaseReport {
        compute_seconds: compute.seconds(),
        total_seconds: total.seconds(),
        write_seconds: write.map(|sample| sample.seconds()),
    };
    println!(
        "\nTotal Time: {:.6} seconds, communication overhead for multiply: {:.6} seconds, \
         percentage of time not multiplying: {:.6}",
        report.total_seconds,
        report.overhead_seconds(),
        report.overhead_percent()
    );

    Ok(Some(RunOutcome { product: c, report }))
}
