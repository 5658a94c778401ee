//! Rectangular tiles clipped at the matrix edge.

use super::{BlockShape, copy_block};
use crate::matrix::Operands;

/// Blocked transpose for arbitrary shapes.
///
/// Walks A in `shape.rows` × `shape.cols` tiles. Tiles on the last block
/// row or column overhang the matrix and are clipped to the true bounds.
/// The matrix is not assumed square, so nothing is deferred.
pub fn transpose_tiled(io: &mut dyn Operands, shape: BlockShape) {
    let (n, m) = (io.rows(), io.cols());

    for i in (0..n).step_by(shape.rows) {
        let i_end = (i + shape.rows).min(n);
        for j in (0..m).step_by(shape.cols) {
            let j_end = (j + shape.cols).min(m);
            copy_block(io, i..i_end, j..j_end, false);
        }
    }
}
