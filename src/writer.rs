//! Parallel write of the product to the shared output artifact.
//!
//! Every rank writes its own locally computed result block, not the
//! gathered product, at a disjoint byte offset. The ranges are disjoint by
//! construction of the partition, and each block goes out in a single
//! positioned write (`pwrite`), so no rank can interleave with or observe
//! another's partial write.

use std::fs::{File, OpenOptions};
use std::os::unix::fs::FileExt;
use std::path::Path;

use crate::clock::Clock;
use crate::comm::Communicator;
use crate::error::Error;
use crate::partition::Partition;
use crate::timing::TimingSample;

/// Write each rank's result block into the artifact at
/// `rank * cells_per_worker * 4` bytes.
///
/// The root truncates the artifact fresh before the group enters, so a run
/// never accumulates onto a prior run's output. A barrier on each side of
/// the write brackets the timed interval: every rank is known to be inside
/// the writer when the root's clock starts, and known to be done before any
/// handle closes. Returns the root's sample of its own write, `None`
/// elsewhere.
pub fn write_artifact<C: Communicator>(
    comm: &C,
    clock: &dyn Clock,
    partition: &Partition,
    block: &[f32],
    path: &Path,
) -> Result<Option<TimingSample>, Error> {
    if comm.is_root() {
        File::create(path)?;
    }
    comm.barrier()?;

    let file = OpenOptions::new().write(true).open(path)?;
    let start = clock.now_ticks();
    file.write_all_at(bytemuck::cast_slice(block), partition.byte_offset(comm.rank()))?;
    let end = clock.now_ticks();
    comm.barrier()?;
    drop(file);

    Ok(comm
        .is_root()
        .then(|| TimingSample::new(start, end, clock.frequency())))
}
