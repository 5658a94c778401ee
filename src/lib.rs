//! Cache-blocked matrix transpose, tuned for a tiny direct-mapped cache.
//!
//! The target is a 1KB direct-mapped cache with 32-byte lines, which is
//! only 32 lines. A naive transpose misses on nearly every store there.
//! Blocking the traversal so a block's rows of A and rows of B fit in
//! those 32 lines gets most of the misses back. This crate has one tuned
//! strategy per reference shape (32×32, 64×64, 61×67) plus a small cache
//! simulator to count the misses.
//!
//! ## Usage
//!
//! ```
//! use blocktrans::{is_transpose, transpose};
//!
//! let (m, n) = (61, 67); // A is n×m, B is m×n
//! let a: Vec<i32> = (0..(m * n) as i32).collect();
//! let mut b = vec![0; m * n];
//!
//! transpose(m, n, &a, &mut b);
//! assert!(is_transpose(m, n, &a, &b));
//! ```
//!
//! Scoring strategies on the simulated cache:
//!
//! ```
//! use blocktrans::harness::{Harness, Registry, register_functions};
//!
//! let mut registry = Registry::new();
//! register_functions(&mut registry);
//!
//! for report in Harness::default().evaluate(&registry, 64, 64).unwrap() {
//!     println!("{}: {} misses", report.description, report.stats.misses);
//! }
//! ```
//!
//! ## What's inside
//!
//! - 8×8 blocking with deferred diagonal stores (32×32)
//! - 8×8 blocks walked as 4×4 sub-blocks in a U shape (64×64)
//! - Clipped 12×8 tiles for everything else
//! - Set-associative LRU cache simulator and a registry to compare strategies

pub mod blocked;
pub mod harness;
pub mod matrix;
pub mod sim;

pub use blocked::{BlockShape, Strategy, transpose_submit};
pub use matrix::transpose::{is_transpose, trans};
pub use matrix::{Dense, Elem, Operands};

/// Transpose: B = A^T
///
/// A is `n` rows × `m` columns and B is `m` rows × `n` columns, both
/// row-major. Picks the blocking strategy for the shape.
///
/// # Panics
///
/// Panics if the slice sizes don't match `m` and `n`.
pub fn transpose(m: usize, n: usize, a: &[Elem], b: &mut [Elem]) {
    transpose_submit(&mut Dense::new(m, n, a, b));
}
