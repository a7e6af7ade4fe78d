//! Collective communication capability.
//!
//! The pipeline needs a handful of blocking collectives and nothing else,
//! so they sit behind a small trait: the binary plugs in the MPI world and
//! the tests plug in an in-process worker group over ordinary threads.

pub mod local;
#[cfg(feature = "mpi")]
pub mod mpi;

use crate::error::Error;

/// Rank of the worker that generates inputs, gathers the product, and
/// reports timings.
pub const ROOT: usize = 0;

/// One participant's handle onto the worker group.
///
/// Every operation is a blocking rendezvous: a caller does not return until
/// the whole group has made the matching call, and none of them supports
/// partial completion, timeout, or cancellation. Block order is ascending
/// rank everywhere, which keeps the scatter layout, the gather layout, and
/// the artifact layout coincident.
pub trait Communicator {
    /// This worker's zero-based ordinal in the group.
    fn rank(&self) -> usize;

    /// Number of workers in the group.
    fn size(&self) -> usize;

    /// Split `root_buf` into `size()` equal contiguous blocks and deliver
    /// block r to rank r. `root_buf` is read on the root only; every rank,
    /// the root included, receives into `block`.
    fn scatter(&self, root_buf: Option<&[f32]>, block: &mut [f32]) -> Result<(), Error>;

    /// Copy the root's `buf` to every rank byte for byte.
    fn broadcast(&self, buf: &mut [f32]) -> Result<(), Error>;

    /// Concatenate every rank's `block` in ascending rank order into the
    /// root's `root_buf`.
    fn gather(&self, block: &[f32], root_buf: Option<&mut [f32]>) -> Result<(), Error>;

    /// Hold until every rank has arrived.
    fn barrier(&self) -> Result<(), Error>;

    fn is_root(&self) -> bool {
        self.rank() == ROOT
    }
}
