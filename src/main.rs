//! SPMD entry point. Launch under `mpirun`, one process per worker:
//!
//! ```text
//! mpirun -n 4 matmul-mpi 512
//! ```
//!
//! The dimension must divide evenly by the process count; anything else is
//! rejected by every rank before the first collective.

use std::env;
use std::process::ExitCode;

use matmul_mpi::clock::MonotonicClock;
use matmul_mpi::comm::mpi::MpiComm;
use matmul_mpi::config::{RunConfig, parse_dimension};
use matmul_mpi::run::run;

fn main() -> ExitCode {
    // The universe lives for all of main so MPI_Finalize runs on the error
    // path too.
    let Some(universe) = mpi::initialize() else {
        eprintln!("failed to initialize the MPI runtime");
        return ExitCode::FAILURE;
    };
    let comm = MpiComm::new(universe.world());
    let clock = MonotonicClock::new();
    let config = RunConfig::default();

    let result =
        parse_dimension(env::args().skip(1)).and_then(|n| run(&comm, &clock, n, &config));

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
