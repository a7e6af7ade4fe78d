//! The row-block multiply kernel and the serial reference built on it.

/// Multiply a block of rows of A against the full matrix B.
///
/// `a_block` is `rows × n` (any contiguous run of A's rows), `b` is the
/// complete `n × n` matrix, and `c_block` receives the matching `rows × n`
/// slice of the product. Every dot product accumulates in ascending k
/// order, so a row's sum comes out identical no matter which worker
/// computes it.
///
/// # Arguments
///
/// * `a_block` - Rows of A owned by this worker, row-major
/// * `b` - The full matrix B (n × n), row-major
/// * `c_block` - Result rows, same shape as `a_block`
/// * `n` - Matrix dimension
///
/// # Panics
///
/// Panics if the slice lengths are inconsistent with `n`.
pub fn multiply_rows(a_block: &[f32], b: &[f32], c_block: &mut [f32], n: usize) {
    assert_eq!(b.len(), n * n, "B: expected {}x{}={} elements", n, n, n * n);
    assert_eq!(
        a_block.len(),
        c_block.len(),
        "A block and C block must have the same shape"
    );
    assert_eq!(
        a_block.len() % n,
        0,
        "A block must hold whole rows of {} columns",
        n
    );

    let rows = a_block.len() / n;
    for i in 0..rows {
        for j in 0..n {
            let mut sum = 0.0f32;
            for k in 0..n {
                sum += a_block[i * n + k] * b[k * n + j];
            }
            c_block[i * n + j] = sum;
        }
    }
}

/// Serial baseline: the full product C = A × B.
///
/// This is [`multiply_rows`] applied to all n rows at once. The distributed
/// path runs the identical kernel per worker over its own rows, so given
/// identical inputs the two results match bit for bit and a single-worker
/// group is just the degenerate case of the same code path.
///
/// # Example
///
/// ```
/// use matmul_mpi::matrix::multiply::multiply_serial;
///
/// let a = vec![0.0, 2.0, 4.0, 6.0]; // [[0, 2], [4, 6]]
/// let b = vec![1.0, 3.0, 5.0, 7.0]; // [[1, 3], [5, 7]]
///
/// let c = multiply_serial(&a, &b, 2);
///
/// assert_eq!(c, vec![10.0, 14.0, 34.0, 54.0]);
/// ```
pub fn multiply_serial(a: &[f32], b: &[f32], n: usize) -> Vec<f32> {
    let mut c = vec![0.0f32; n * n];
    multiply_rows(a, b, &mut c, n);
    c
}
