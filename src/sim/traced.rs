//! Operands that feed every access through the cache simulator.

use super::{Cache, Outcome, Stats};
use crate::matrix::{Dense, Elem, Operands};
use std::fmt;

const ELEM_SIZE: u64 = std::mem::size_of::<Elem>() as u64;

/// Side of the static arrays A and B are carved out of.
pub const MAX_DIM: usize = 256;

/// Where A and B live in the simulated address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressLayout {
    pub a_base: u64,
    pub b_base: u64,
}

impl AddressLayout {
    /// Byte address of `A[row][col]`, A having `cols` columns.
    pub fn a_addr(&self, row: usize, col: usize, cols: usize) -> u64 {
        self.a_base + (row * cols + col) as u64 * ELEM_SIZE
    }

    /// Byte address of `B[row][col]`, B having `cols` columns.
    pub fn b_addr(&self, row: usize, col: usize, cols: usize) -> u64 {
        self.b_base + (row * cols + col) as u64 * ELEM_SIZE
    }
}

impl Default for AddressLayout {
    /// A and B back to back, each a 256×256 `i32` array. B starts 256KB
    /// after A, a multiple of any small cache size, so `A[i][i]` and
    /// `B[i][i]` fall in the same set for square shapes.
    fn default() -> Self {
        let a_base = 0x0010_0000;
        Self {
            a_base,
            b_base: a_base + (MAX_DIM * MAX_DIM) as u64 * ELEM_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    Load,
    Store,
}

/// One simulated access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceEntry {
    pub kind: AccessKind,
    pub address: u64,
    pub size: u64,
    pub outcome: Outcome,
}

impl fmt::Display for TraceEntry {
    /// `L 100000,4 miss`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            AccessKind::Load => 'L',
            AccessKind::Store => 'S',
        };
        write!(f, "{} {:x},{} {}", kind, self.address, self.size, self.outcome)
    }
}

/// [`Dense`] operands with every load and store simulated first.
#[derive(Debug)]
pub struct TracedOperands<'a> {
    inner: Dense<'a>,
    layout: AddressLayout,
    cache: Cache,
    trace: Option<Vec<TraceEntry>>,
}

impl<'a> TracedOperands<'a> {
    pub fn new(inner: Dense<'a>, layout: AddressLayout, cache: Cache) -> Self {
        Self {
            inner,
            layout,
            cache,
            trace: None,
        }
    }

    /// Also keep every access, in order.
    pub fn with_trace(mut self) -> Self {
        self.trace = Some(Vec::new());
        self
    }

    /// Final counters and the recorded trace (empty unless enabled).
    pub fn into_parts(self) -> (Stats, Vec<TraceEntry>) {
        (self.cache.stats(), self.trace.unwrap_or_default())
    }

    fn touch(&mut self, kind: AccessKind, address: u64) {
        let outcome = self.cache.access(address);
        if let Some(trace) = &mut self.trace {
            trace.push(TraceEntry {
                kind,
                address,
                size: ELEM_SIZE,
                outcome,
            });
        }
    }
}

impl Operands for TracedOperands<'_> {
    fn rows(&self) -> usize {
        self.inner.rows()
    }

    fn cols(&self) -> usize {
        self.inner.cols()
    }

    fn load(&mut self, row: usize, col: usize) -> Elem {
        let address = self.layout.a_addr(row, col, self.inner.cols());
        self.touch(AccessKind::Load, address);
        self.inner.load(row, col)
    }

    fn store(&mut self, row: usize, col: usize, value: Elem) {
        // B is cols × rows
        let address = self.layout.b_addr(row, col, self.inner.rows());
        self.touch(AccessKind::Store, address);
        self.inner.store(row, col, value);
    }
}
