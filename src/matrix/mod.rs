//! Matrix access and baseline implementations.
//!
//! Every transpose strategy in this crate is written against [`Operands`],
//! which only lets it read A and write B. The dense slice version lives in
//! [`dense`]; the cache-traced version lives in [`crate::sim`].

pub mod dense;
pub mod transpose;

pub use dense::Dense;

/// Element type of both matrices.
pub type Elem = i32;

/// The two matrices a transpose works on: A (rows × cols) to read from,
/// B (cols × rows) to write into.
///
/// There's no way to read B or write A through this trait, so a strategy
/// can't break that rule even by accident.
pub trait Operands {
    /// Rows of A (N), which is also the column count of B.
    fn rows(&self) -> usize;

    /// Columns of A (M), which is also the row count of B.
    fn cols(&self) -> usize;

    /// Read `A[row][col]`.
    fn load(&mut self, row: usize, col: usize) -> Elem;

    /// Write `B[row][col]`. Note B is cols × rows, so a transpose stores
    /// `A[i][j]` with `store(j, i, ..)`.
    fn store(&mut self, row: usize, col: usize, value: Elem);
}
