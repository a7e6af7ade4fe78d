//! Distributed row-partitioned matrix multiplication.
//!
//! I built this to see where the time actually goes in a distributed
//! matrix multiply: the product of two dense N×N `f32` matrices is split
//! across a fixed group of SPMD workers, and the root reports how much of
//! the wall clock was computation versus communication and file I/O.
//!
//! One run walks the whole pipeline: scatter contiguous row blocks of A,
//! broadcast B whole, multiply locally, gather the product in rank order,
//! and let every worker write its own block to a disjoint byte range of a
//! shared binary artifact. A serial baseline runs the identical row kernel
//! over all N rows, so the distributed result matches it bit for bit.
//!
//! ## Usage
//!
//! The pipeline runs against any [`comm::Communicator`]. An in-process
//! group is enough to see it work:
//!
//! ```
//! use matmul_mpi::clock::MonotonicClock;
//! use matmul_mpi::comm::local::run_group;
//! use matmul_mpi::config::RunConfig;
//! use matmul_mpi::run::run;
//!
//! let config = RunConfig {
//!     display_matrices: false,
//!     write_artifact: false,
//!     ..RunConfig::default()
//! };
//! let outcomes = run_group(2, |comm| {
//!     let clock = MonotonicClock::new();
//!     run(&comm, &clock, 4, &config).unwrap()
//! });
//! let outcome = outcomes.into_iter().flatten().next().unwrap();
//! assert_eq!(outcome.product.len(), 16);
//! ```
//!
//! The real thing is the `matmul-mpi` binary built with the `mpi` feature,
//! one process per worker:
//!
//! ```text
//! mpirun -n 4 matmul-mpi 512
//! ```
//!
//! ## What's inside
//!
//! - A row [`Partition`] shared by the scatter, the gather, and the file
//!   layout
//! - Collectives behind [`comm::Communicator`]: rsmpi for real runs, an
//!   in-process threaded group for tests
//! - A monotonic [`clock::Clock`] capability so phase timing is testable
//! - A parallel positioned-write of the product, one disjoint range per
//!   worker

pub mod clock;
pub mod comm;
pub mod config;
pub mod error;
pub mod matrix;
pub mod partition;
pub mod run;
pub mod timing;
pub mod writer;

pub use config::RunConfig;
pub use error::Error;
pub use matrix::multiply::{multiply_rows, multiply_serial};
pub use partition::Partition;
pub use run::{RunOutcome, run};
