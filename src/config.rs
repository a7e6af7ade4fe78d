//! Run configuration and the one-argument command line contract.

use std::path::PathBuf;

use crate::error::Error;

/// Default location of the shared output artifact.
pub const DEFAULT_ARTIFACT_PATH: &str = "matrix_multiply_result.bin";

/// Runtime switches for one run.
///
/// Display of the matrices and the parallel write used to be compile-time
/// toggles; as ordinary data both paths stay testable in the same build.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Pretty-print the input matrix before distribution and the product
    /// after the gather (root only).
    pub display_matrices: bool,
    /// Write the product to the shared artifact in the parallel write
    /// phase.
    pub write_artifact: bool,
    /// Where the artifact lives. Recreated fresh on every run.
    pub artifact_path: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            display_matrices: true,
            write_artifact: true,
            artifact_path: PathBuf::from(DEFAULT_ARTIFACT_PATH),
        }
    }
}

/// Parse the matrix dimension from the command line.
///
/// `args` holds the arguments after the program name. Exactly one
/// positional value is accepted: the dimension N as a base-10 numeral.
/// Anything else is an [`Error::InvalidConfiguration`], and since every
/// rank sees the same argv, every rank rejects it before any collective.
pub fn parse_dimension<I>(args: I) -> Result<usize, Error>
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();
    if args.len() != 1 {
        return Err(Error::InvalidConfiguration(format!(
            "expected exactly one argument (the matrix dimension), got {}",
            args.len()
        )));
    }
    let n: usize = args[0].parse().map_err(|_| {
        Error::InvalidConfiguration(format!(
            "matrix dimension must be a positive base-10 integer, got {:?}",
            args[0]
        ))
    })?;
    if n == 0 {
        return Err(Error::InvalidConfiguration(
            "matrix dimension must be positive".into(),
        ));
    }
    Ok(n)
}
