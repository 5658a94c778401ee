//! Cache simulator used to score transpose strategies.
//!
//! The cache is set-associative with LRU replacement, parameterized the
//! usual way: 2^s sets, E lines per set, 2^b bytes per line. The default
//! geometry is the one the blocked strategies are tuned for: s=5, E=1, b=5,
//! a 1KB direct-mapped cache with 32-byte lines.

pub mod traced;

pub use traced::{AccessKind, AddressLayout, TraceEntry, TracedOperands};

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    #[error("cache needs at least one line per set")]
    NoLines,
    #[error("block bits {0} too small, a line must hold one 4-byte element")]
    BlockTooSmall(u32),
    #[error("set bits {set_bits} + block bits {block_bits} leave no room for a tag")]
    AddressOverflow { set_bits: u32, block_bits: u32 },
    #[error("2^{set_bits} sets of {lines_per_set} lines exceeds the {max} line limit")]
    TooManyLines {
        set_bits: u32,
        lines_per_set: usize,
        max: usize,
    },
}

/// Upper bound on sets × lines per set the simulator will allocate.
pub const MAX_LINES: usize = 1 << 24;

/// Cache geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    set_bits: u32,
    lines_per_set: usize,
    block_bits: u32,
}

impl CacheConfig {
    pub fn new(set_bits: u32, lines_per_set: usize, block_bits: u32) -> Result<Self, SimError> {
        if lines_per_set == 0 {
            return Err(SimError::NoLines);
        }
        if block_bits < 2 {
            return Err(SimError::BlockTooSmall(block_bits));
        }
        let total_lines = 1usize
            .checked_shl(set_bits)
            .and_then(|sets| sets.checked_mul(lines_per_set))
            .filter(|&lines| lines <= MAX_LINES);
        if total_lines.is_none() {
            return Err(SimError::TooManyLines {
                set_bits,
                lines_per_set,
                max: MAX_LINES,
            });
        }
        if set_bits.saturating_add(block_bits) >= 64 {
            return Err(SimError::AddressOverflow {
                set_bits,
                block_bits,
            });
        }
        Ok(Self {
            set_bits,
            lines_per_set,
            block_bits,
        })
    }

    pub fn set_bits(&self) -> u32 {
        self.set_bits
    }

    pub fn lines_per_set(&self) -> usize {
        self.lines_per_set
    }

    pub fn block_bits(&self) -> u32 {
        self.block_bits
    }

    pub fn num_sets(&self) -> usize {
        1 << self.set_bits
    }

    pub fn line_size(&self) -> usize {
        1 << self.block_bits
    }

    /// Total data capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.num_sets()
            .saturating_mul(self.lines_per_set)
            .saturating_mul(self.line_size())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            set_bits: 5,
            lines_per_set: 1,
            block_bits: 5,
        }
    }
}

impl fmt::Display for CacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "s={} E={} b={} ({} bytes)",
            self.set_bits,
            self.lines_per_set,
            self.block_bits,
            self.capacity()
        )
    }
}

/// Result of one access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Hit,
    Miss,
    MissEviction,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Outcome::Hit => "hit",
            Outcome::Miss => "miss",
            Outcome::MissEviction => "miss eviction",
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl Stats {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Hit => self.hits += 1,
            Outcome::Miss => self.misses += 1,
            Outcome::MissEviction => {
                self.misses += 1;
                self.evictions += 1;
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Line {
    tag: u64,
    last_used: u64,
}

#[derive(Debug, Clone)]
pub struct Cache {
    config: CacheConfig,
    // num_sets * lines_per_set slots, set-major
    lines: Vec<Option<Line>>,
    clock: u64,
    stats: Stats,
}

impl Cache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            lines: vec![None; config.num_sets() * config.lines_per_set],
            clock: 0,
            stats: Stats::default(),
        }
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Invalidate every line and zero the counters.
    pub fn reset(&mut self) {
        self.lines.fill(None);
        self.clock = 0;
        self.stats = Stats::default();
    }

    /// Touch the line holding `address`.
    pub fn access(&mut self, address: u64) -> Outcome {
        self.clock += 1;

        let block = address >> self.config.block_bits;
        let set = (block & ((1u64 << self.config.set_bits) - 1)) as usize;
        let tag = block >> self.config.set_bits;

        let e = self.config.lines_per_set;
        let ways = &mut self.lines[set * e..(set + 1) * e];
        let fresh = Line {
            tag,
            last_used: self.clock,
        };

        let hit = ways
            .iter()
            .position(|slot| matches!(slot, Some(line) if line.tag == tag));
        let empty = ways.iter().position(Option::is_none);

        let outcome = match (hit, empty) {
            (Some(way), _) => {
                ways[way] = Some(fresh);
                Outcome::Hit
            }
            (None, Some(way)) => {
                ways[way] = Some(fresh);
                Outcome::Miss
            }
            (None, None) => {
                // every way is valid, replace the least recently used one
                let victim = ways
                    .iter()
                    .enumerate()
                    .min_by_key(|(_, slot)| slot.map_or(0, |line| line.last_used))
                    .map_or(0, |(way, _)| way);
                ways[victim] = Some(fresh);
                Outcome::MissEviction
            }
        };

        self.stats.record(outcome);
        outcome
    }
}
