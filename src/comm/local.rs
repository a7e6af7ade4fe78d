//! In-process worker group over threads and shared memory.
//!
//! Gives the pipeline a real SPMD group without an MPI runtime: one thread
//! per rank, a shared staging buffer standing in for the wire, and a
//! [`Barrier`] providing the rendezvous. Each collective stages through the
//! buffer with a barrier on either side, so no rank reads before the data
//! is complete and no rank restages before everyone has read.

use std::sync::{Arc, Barrier, Mutex, MutexGuard};
use std::thread;

use super::{Communicator, ROOT};
use crate::error::Error;

struct Shared {
    barrier: Barrier,
    stage: Mutex<Vec<f32>>,
}

/// Handle held by one rank of an in-process group.
pub struct LocalComm {
    rank: usize,
    size: usize,
    shared: Arc<Shared>,
}

/// Create the handles for a `size`-rank in-process group.
///
/// The returned handles are in rank order; each must end up on its own
/// thread, since every collective blocks until the whole group arrives.
pub fn local_group(size: usize) -> Vec<LocalComm> {
    assert!(size > 0, "group needs at least one rank");
    let shared = Arc::new(Shared {
        barrier: Barrier::new(size),
        stage: Mutex::new(Vec::new()),
    });
    (0..size)
        .map(|rank| LocalComm {
            rank,
            size,
            shared: Arc::clone(&shared),
        })
        .collect()
}

/// Run one closure per rank on scoped threads and collect the results in
/// rank order.
///
/// This is the test harness entry point: `f` receives each rank's handle
/// the same way the binary's processes receive their MPI world.
pub fn run_group<T, F>(size: usize, f: F) -> Vec<T>
where
    F: Fn(LocalComm) -> T + Sync,
    T: Send,
{
    let comms = local_group(size);
    let f = &f;
    thread::scope(|scope| {
        let handles: Vec<_> = comms
            .into_iter()
            .map(|comm| scope.spawn(move || f(comm)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    })
}

impl LocalComm {
    fn lock_stage(&self) -> Result<MutexGuard<'_, Vec<f32>>, Error> {
        self.shared.stage.lock().map_err(|_| {
            Error::CollectiveFailure("a worker died holding the staging buffer".into())
        })
    }

    fn rendezvous(&self) {
        self.shared.barrier.wait();
    }
}

impl Communicator for LocalComm {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }

    fn scatter(&self, root_buf: Option<&[f32]>, block: &mut [f32]) -> Result<(), Error> {
        if self.rank == ROOT {
            let src = root_buf.ok_or_else(|| {
                Error::CollectiveFailure("scatter reached the root without a source buffer".into())
            })?;
            let mut stage = self.lock_stage()?;
            stage.clear();
            stage.extend_from_slice(src);
        }
        self.rendezvous();
        {
            let stage = self.lock_stage()?;
            let len = block.len();
            block.copy_from_slice(&stage[self.rank * len..(self.rank + 1) * len]);
        }
        self.rendezvous();
        Ok(())
    }

    fn broadcast(&self, buf: &mut [f32]) -> Result<(), Error> {
        if self.rank == ROOT {
            let mut stage = self.lock_stage()?;
            stage.clear();
            stage.extend_from_slice(buf);
        }
        self.rendezvous();
        if self.rank != ROOT {
            let stage = self.lock_stage()?;
            buf.copy_from_slice(&stage[..buf.len()]);
        }
        self.rendezvous();
        Ok(())
    }

    fn gather(&self, block: &[f32], root_buf: Option<&mut [f32]>) -> Result<(), Error> {
        {
            let mut stage = self.lock_stage()?;
            let needed = block.len() * self.size;
            if stage.len() < needed {
                stage.resize(needed, 0.0);
            }
            let start = self.rank * block.len();
            stage[start..start + block.len()].copy_from_slice(block);
        }
        self.rendezvous();
        if self.rank == ROOT {
            let dst = root_buf.ok_or_else(|| {
                Error::CollectiveFailure(
                    "gather reached the root without a destination buffer".into(),
                )
            })?;
            let stage = self.lock_stage()?;
            dst.copy_from_slice(&stage[..dst.len()]);
        }
        self.rendezvous();
        Ok(())
    }

    fn barrier(&self) -> Result<(), Error> {
        self.rendezvous();
        Ok(())
    }
}
