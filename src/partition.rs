//! Row partition of an N×N matrix across the worker group.

use std::ops::Range;

use crate::error::Error;

/// The row assignment derived from a dimension and a worker count.
///
/// Rank r owns rows `[r * rows_per_worker, (r + 1) * rows_per_worker)` of A
/// and of C. The same ascending-rank order fixes the scatter layout, the
/// gather layout, and each worker's byte range in the output artifact; the
/// three must coincide for the artifact to be a valid serialization of the
/// product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    n: usize,
    workers: usize,
    rows_per_worker: usize,
}

impl Partition {
    /// Derive the partition, rejecting dimensions the group cannot split
    /// evenly.
    ///
    /// Every rank runs this check against the same inputs before entering
    /// any collective.
    ///
    /// # Example
    ///
    /// ```
    /// use matmul_mpi::partition::Partition;
    ///
    /// let partition = Partition::new(8, 4).unwrap();
    /// assert_eq!(partition.rows_per_worker(), 2);
    /// assert_eq!(partition.row_range(3), 6..8);
    ///
    /// assert!(Partition::new(3, 2).is_err());
    /// ```
    pub fn new(n: usize, workers: usize) -> Result<Self, Error> {
        if workers == 0 {
            return Err(Error::InvalidConfiguration(
                "worker count must be at least 1".into(),
            ));
        }
        if n == 0 {
            return Err(Error::InvalidConfiguration(
                "matrix dimension must be positive".into(),
            ));
        }
        if n % workers != 0 {
            return Err(Error::InvalidConfiguration(format!(
                "matrix dimension {n} is not divisible by {workers} workers"
            )));
        }
        Ok(Self {
            n,
            workers,
            rows_per_worker: n / workers,
        })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Rows each worker owns.
    pub fn rows_per_worker(&self) -> usize {
        self.rows_per_worker
    }

    /// Elements in one worker's row block.
    pub fn cells_per_worker(&self) -> usize {
        self.rows_per_worker * self.n
    }

    /// Global row range owned by `rank`.
    pub fn row_range(&self, rank: usize) -> Range<usize> {
        rank * self.rows_per_worker..(rank + 1) * self.rows_per_worker
    }

    /// Byte offset of `rank`'s block in the output artifact.
    pub fn byte_offset(&self, rank: usize) -> u64 {
        (rank * self.cells_per_worker() * size_of::<f32>()) as u64
    }
}
