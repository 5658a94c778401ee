//! Plain row-major slices as [`Operands`].

use super::{Elem, Operands};

/// A borrowed from `a`, B borrowed mutably from `b`, both row-major.
#[derive(Debug)]
pub struct Dense<'a> {
    a: &'a [Elem],
    b: &'a mut [Elem],
    m: usize,
    n: usize,
}

impl<'a> Dense<'a> {
    /// Wrap A (`n` rows × `m` columns) and B (`m` rows × `n` columns).
    ///
    /// # Panics
    ///
    /// Panics if the slice sizes don't match `m` and `n`.
    pub fn new(m: usize, n: usize, a: &'a [Elem], b: &'a mut [Elem]) -> Self {
        assert_eq!(a.len(), n * m, "A: expected {}x{}={} elements", n, m, n * m);
        assert_eq!(b.len(), m * n, "B: expected {}x{}={} elements", m, n, m * n);
        Self { a, b, m, n }
    }

    /// The destination matrix as written so far.
    pub fn b(&self) -> &[Elem] {
        &*self.b
    }
}

impl Operands for Dense<'_> {
    fn rows(&self) -> usize {
        self.n
    }

    fn cols(&self) -> usize {
        self.m
    }

    #[inline]
    fn load(&mut self, row: usize, col: usize) -> Elem {
        assert!(row < self.n && col < self.m, "A[{}][{}] out of range", row, col);
        self.a[row * self.m + col]
    }

    #[inline]
    fn store(&mut self, row: usize, col: usize, value: Elem) {
        assert!(row < self.m && col < self.n, "B[{}][{}] out of range", row, col);
        self.b[row * self.n + col] = value;
    }
}
