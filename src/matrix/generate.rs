/// Fill the two input matrices from a single ascending counter.
///
/// Values are assigned alternately: at flattened index i, `a[i]` takes the
/// counter and `b[i]` takes the next value. The interleaving is a fixed
/// contract, not an accident of the fill loop; for n = 2 it yields
/// A = [[0, 2], [4, 6]] and B = [[1, 3], [5, 7]], which is what lets tests
/// pin exact products.
///
/// # Example
///
/// ```
/// use matmul_mpi::matrix::generate::generate_inputs;
///
/// let (a, b) = generate_inputs(2);
/// assert_eq!(a, vec![0.0, 2.0, 4.0, 6.0]);
/// assert_eq!(b, vec![1.0, 3.0, 5.0, 7.0]);
/// ```
pub fn generate_inputs(n: usize) -> (Vec<f32>, Vec<f32>) {
    let mut a = vec![0.0f32; n * n];
    let mut b = vec![0.0f32; n * n];
    let mut counter = 0.0f32;
    for (ai, bi) in a.iter_mut().zip(b.iter_mut()) {
        *ai = counter;
        counter += 1.0;
        *bi = counter;
        counter += 1.0;
    }
    (a, b)
}
