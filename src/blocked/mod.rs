//! Cache-blocked transpose strategies.
//!
//! These functions break the transpose into blocks small enough that the
//! rows of A and the rows of B a block touches stay resident in a 1KB
//! direct-mapped cache with 32-byte lines (32 lines total).
//!
//! Available strategies:
//! - `transpose_32x32`: 8×8 blocks, deferred diagonal
//! - `transpose_64x64`: 8×8 blocks walked as four 4×4 sub-blocks in a U shape
//! - `tiled`: clipped rectangular blocks (12×8 by default) for any other shape

pub mod tiled;
pub mod transpose_32x32;
pub mod transpose_64x64;

use crate::matrix::Operands;
use log::debug;
use std::ops::Range;

/// Description the submission is registered under.
pub const SUBMIT_DESC: &str = "Transpose submission";

/// Rows × columns of one block of A for the tiled strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockShape {
    pub rows: usize,
    pub cols: usize,
}

impl BlockShape {
    /// Tuned for 61×67 on the reference cache. Re-derive it for other
    /// shapes or cache geometries, there's no formula behind it.
    pub const FALLBACK: BlockShape = BlockShape::new(12, 8);

    /// # Panics
    ///
    /// Panics if either side is zero.
    pub const fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "block shape must be non-empty");
        Self { rows, cols }
    }
}

/// The closed set of transpose strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// 32×32: 8×8 blocks with deferred diagonal stores.
    Square32,
    /// 64×64: 8×8 blocks walked as 4×4 sub-blocks.
    Square64,
    /// Any other shape: clipped tiles of the given shape.
    Tiled(BlockShape),
}

impl Strategy {
    /// Pick the strategy for A with `m` columns and `n` rows.
    pub fn select(m: usize, n: usize) -> Self {
        match (m, n) {
            (32, 32) => Strategy::Square32,
            (64, 64) => Strategy::Square64,
            _ => Strategy::Tiled(BlockShape::FALLBACK),
        }
    }

    pub fn run(self, io: &mut dyn Operands) {
        debug!("{:?} on {}x{}", self, io.rows(), io.cols());
        match self {
            Strategy::Square32 => transpose_32x32::transpose_32x32(io),
            Strategy::Square64 => transpose_64x64::transpose_64x64(io),
            Strategy::Tiled(shape) => tiled::transpose_tiled(io, shape),
        }
    }
}

/// The tuned transpose: picks a strategy from the shape of A and runs it.
pub fn transpose_submit(io: &mut dyn Operands) {
    Strategy::select(io.cols(), io.rows()).run(io);
}

/// Transpose one block of A (`rows` × `cols`) into B.
///
/// With `defer_diagonal` set, a row segment that crosses the main diagonal
/// holds its diagonal value back and stores it after the rest of the
/// segment. A[r][r] and B[r][r] map to the same line in the reference
/// layout, so storing it in order would evict the A row still being read.
pub(crate) fn copy_block(
    io: &mut dyn Operands,
    rows: Range<usize>,
    cols: Range<usize>,
    defer_diagonal: bool,
) {
    for r in rows {
        let mut pending = None;
        for c in cols.clone() {
            let value = io.load(r, c);
            if defer_diagonal && r == c {
                pending = Some(value);
            } else {
                io.store(c, r, value);
            }
        }
        if let Some(value) = pending {
            io.store(r, r, value);
        }
    }
}
