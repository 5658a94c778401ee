//! 32×32 transpose with 8×8 blocks.

use super::copy_block;
use crate::matrix::Operands;

/// Block side. One cache line holds 8 `i32`, so a block row of A is one line.
const BLOCK: usize = 8;

/// Blocked transpose for the 32×32 case.
///
/// Each 8×8 block touches 8 lines of A and 8 lines of B, which fit together
/// in the 32-line cache. Off-diagonal blocks never conflict. On diagonal
/// blocks, A row r and B row r share a set, so the diagonal store of each
/// row is deferred until the rest of the row is written.
///
/// Works for any shape whose sides are multiples of 8; only 32×32 is tuned.
///
/// # Panics
///
/// Panics if either side of A is not a multiple of 8.
pub fn transpose_32x32(io: &mut dyn Operands) {
    let (n, m) = (io.rows(), io.cols());
    assert!(
        n % BLOCK == 0 && m % BLOCK == 0,
        "{}x{} is not a multiple of {}",
        m,
        n,
        BLOCK
    );

    for i in (0..n).step_by(BLOCK) {
        for j in (0..m).step_by(BLOCK) {
            copy_block(io, i..i + BLOCK, j..j + BLOCK, i == j);
        }
    }
}
