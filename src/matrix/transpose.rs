//! Row-wise scan baseline and the transpose check.

use super::{Elem, Operands};

/// Description the baseline is registered under.
pub const TRANS_DESC: &str = "Simple row-wise scan transpose";

/// Simple row-wise scan transpose: B = A^T
///
/// Reads A sequentially, but every store lands in a different row of B,
/// so on a small cache almost every store misses. This is the baseline
/// the blocked strategies are scored against.
pub fn trans(io: &mut dyn Operands) {
    let (n, m) = (io.rows(), io.cols());
    for i in 0..n {
        for j in 0..m {
            let tmp = io.load(i, j);
            io.store(j, i, tmp);
        }
    }
}

/// Check whether `b` is the transpose of `a`.
///
/// `a` is `n` rows × `m` columns and `b` is `m` rows × `n` columns, both
/// row-major. Slices shorter than that are never a transpose.
///
/// # Example
///
/// ```
/// use blocktrans::matrix::transpose::is_transpose;
///
/// let a = vec![1, 2, 3,   // 2×3 matrix
///              4, 5, 6];
/// let b = vec![1, 4,      // 3×2 matrix
///              2, 5,
///              3, 6];
///
/// assert!(is_transpose(3, 2, &a, &b));
/// assert!(!is_transpose(3, 2, &a, &a));
/// ```
pub fn is_transpose(m: usize, n: usize, a: &[Elem], b: &[Elem]) -> bool {
    if a.len() < n * m || b.len() < m * n {
        return false;
    }
    for i in 0..n {
        for j in 0..m {
            if a[i * m + j] != b[j * n + i] {
                return false;
            }
        }
    }
    true
}
