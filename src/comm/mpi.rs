//! MPI-backed worker group over rsmpi.
//!
//! The binary runs one process per rank under `mpirun`; this adapter maps
//! the [`Communicator`](super::Communicator) capability onto the world
//! communicator's collectives. rsmpi's default error handler aborts the
//! whole group when a collective fails, which matches the run's
//! fail-everything model: there is no partial scatter or gather to recover.

use mpi::topology::SimpleCommunicator;
use mpi::traits::{Communicator as _, CommunicatorCollectives, Root};

use super::{Communicator, ROOT};
use crate::error::Error;

/// Handle onto the MPI world communicator.
pub struct MpiComm {
    world: SimpleCommunicator,
}

impl MpiComm {
    pub fn new(world: SimpleCommunicator) -> Self {
        Self { world }
    }
}

impl Communicator for MpiComm {
    fn rank(&self) -> usize {
        self.world.rank() as usize
    }

    fn size(&self) -> usize {
        self.world.size() as usize
    }

    fn scatter(&self, root_buf: Option<&[f32]>, block: &mut [f32]) -> Result<(), Error> {
        let root = self.world.process_at_rank(ROOT as i32);
        if self.is_root() {
            let src = root_buf.ok_or_else(|| {
                Error::CollectiveFailure("scatter reached the root without a source buffer".into())
            })?;
            root.scatter_into_root(src, block);
        } else {
            root.scatter_into(block);
        }
        Ok(())
    }

    fn broadcast(&self, buf: &mut [f32]) -> Result<(), Error> {
        self.world.process_at_rank(ROOT as i32).broadcast_into(buf);
        Ok(())
    }

    fn gather(&self, block: &[f32], root_buf: Option<&mut [f32]>) -> Result<(), Error> {
        let root = self.world.process_at_rank(ROOT as i32);
        if self.is_root() {
            let dst = root_buf.ok_or_else(|| {
                Error::CollectiveFailure(
                    "gather reached the root without a destination buffer".into(),
                )
            })?;
            root.gather_into_root(block, dst);
        } else {
            root.gather_into(block);
        }
        Ok(())
    }

    fn barrier(&self) -> Result<(), Error> {
        self.world.barrier();
        Ok(())
    }
}
