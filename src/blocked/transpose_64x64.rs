//! 64×64 transpose with 8×8 blocks split into 4×4 sub-blocks.

use super::copy_block;
use crate::matrix::Operands;

const BLOCK: usize = 8;
const HALF: usize = BLOCK / 2;

/// Blocked transpose for the 64×64 case.
///
/// A 64-wide row is 8 lines, so rows r and r+4 of the same column range
/// land in the same set. A full 8×8 block would thrash; instead each block
/// is walked as four 4×4 sub-blocks:
///
/// ```text
///   1 | 4
///   --+--
///   2 | 3
/// ```
///
/// top-left, bottom-left, bottom-right, top-right. Each sub-block keeps at
/// most 4 lines of A and 4 lines of B live. Diagonal deferral applies on
/// diagonal blocks, where it only matters for sub-blocks 1 and 3.
///
/// # Panics
///
/// Panics if either side of A is not a multiple of 8.
pub fn transpose_64x64(io: &mut dyn Operands) {
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
            let diagonal = i == j;
            let (top, bottom) = (i..i + HALF, i + HALF..i + BLOCK);
            let (left, right) = (j..j + HALF, j + HALF..j + BLOCK);

            copy_block(io, top.clone(), left.clone(), diagonal);
            copy_block(io, bottom.clone(), left, diagonal);
            copy_block(io, bottom, right.clone(), diagonal);
            copy_block(io, top, right, diagonal);
        }
    }
}
