//! Error taxonomy for a distributed run.

use thiserror::Error;

/// Errors that terminate a run.
///
/// Nothing here is recovered: the binary reports the error on stderr and
/// exits non-zero. Configuration errors are detected identically on every
/// rank before the first collective, so a bad configuration never leaves
/// part of the group blocked at a rendezvous the others will not reach.
#[derive(Debug, Error)]
pub enum Error {
    /// Wrong argument count, a non-numeric dimension, or a dimension the
    /// worker group cannot split evenly.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A collective operation could not complete across the group.
    #[error("collective failure: {0}")]
    CollectiveFailure(String),

    /// The shared output artifact could not be created or written.
    #[error("output artifact: {0}")]
    Artifact(#[from] std::io::Error),
}
