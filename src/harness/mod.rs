//! Scores registered transpose functions on the simulated cache.
//!
//! ```
//! use blocktrans::harness::{Harness, Registry, Report, register_functions};
//!
//! let mut registry = Registry::new();
//! register_functions(&mut registry);
//!
//! let reports = Harness::default().evaluate(&registry, 32, 32).unwrap();
//! let best = Report::best(&reports).unwrap();
//! assert_eq!(best.description, "Transpose submission");
//! ```

pub mod registry;

pub use registry::{Registered, Registry, TransposeFn, register_functions};

use crate::matrix::transpose::is_transpose;
use crate::matrix::{Dense, Elem};
use crate::sim::traced::MAX_DIM;
use crate::sim::{AddressLayout, Cache, CacheConfig, SimError, Stats, TraceEntry, TracedOperands};
use log::{info, warn};
use thiserror::Error;

/// Written into B before each run, so cells a function skips stand out.
const SENTINEL: Elem = Elem::MIN;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no transpose functions registered")]
    EmptyRegistry,
    #[error("matrix dimensions must be non-zero, got {m}x{n}")]
    ZeroDimension { m: usize, n: usize },
    #[error("{m}x{n} exceeds the {max}x{max} backing arrays")]
    TooLarge { m: usize, n: usize, max: usize },
    #[error("invalid cache configuration: {0}")]
    Config(#[from] SimError),
}

/// Outcome of running one registered function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub description: String,
    /// Columns of A.
    pub m: usize,
    /// Rows of A.
    pub n: usize,
    pub correct: bool,
    pub stats: Stats,
}

impl Report {
    /// Fewest misses among the correct reports. Ties go to whichever was
    /// registered first.
    pub fn best(reports: &[Report]) -> Option<&Report> {
        reports
            .iter()
            .filter(|r| r.correct)
            .reduce(|best, r| if r.stats.misses < best.stats.misses { r } else { best })
    }
}

#[derive(Debug, Clone, Default)]
pub struct Harness {
    config: CacheConfig,
    layout: AddressLayout,
}

impl Harness {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            layout: AddressLayout::default(),
        }
    }

    /// Geometry given as raw s, E, b.
    pub fn from_params(set_bits: u32, lines_per_set: usize, block_bits: u32) -> Result<Self, Error> {
        Ok(Self::new(CacheConfig::new(set_bits, lines_per_set, block_bits)?))
    }

    pub fn with_layout(mut self, layout: AddressLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn config(&self) -> CacheConfig {
        self.config
    }

    /// Run every registered function on an `n` × `m` A, in registration order.
    pub fn evaluate(&self, registry: &Registry, m: usize, n: usize) -> Result<Vec<Report>, Error> {
        if registry.is_empty() {
            return Err(Error::EmptyRegistry);
        }
        registry
            .iter()
            .map(|entry| {
                self.run_one(&entry.description, entry.func, m, n, false)
                    .map(|(report, _)| report)
            })
            .collect()
    }

    /// Run a single function on a cold cache, optionally keeping its trace.
    pub fn run_one(
        &self,
        description: &str,
        func: TransposeFn,
        m: usize,
        n: usize,
        keep_trace: bool,
    ) -> Result<(Report, Vec<TraceEntry>), Error> {
        check_dims(m, n)?;

        let a = fill_source(m, n);
        let mut b = vec![SENTINEL; m * n];

        let mut io = TracedOperands::new(
            Dense::new(m, n, &a, &mut b),
            self.layout,
            Cache::new(self.config),
        );
        if keep_trace {
            io = io.with_trace();
        }
        func(&mut io);
        let (stats, trace) = io.into_parts();

        let correct = is_transpose(m, n, &a, &b);
        if correct {
            info!(
                "{}x{} {:?}: hits {} misses {} evictions {}",
                m, n, description, stats.hits, stats.misses, stats.evictions
            );
        } else {
            warn!("{}x{} {:?}: incorrect transpose", m, n, description);
        }

        let report = Report {
            description: description.to_owned(),
            m,
            n,
            correct,
            stats,
        };
        Ok((report, trace))
    }
}

fn check_dims(m: usize, n: usize) -> Result<(), Error> {
    if m == 0 || n == 0 {
        return Err(Error::ZeroDimension { m, n });
    }
    if m > MAX_DIM || n > MAX_DIM {
        return Err(Error::TooLarge { m, n, max: MAX_DIM });
    }
    Ok(())
}

/// Distinct, mixed-sign values so a misplaced element can't go unnoticed.
fn fill_source(m: usize, n: usize) -> Vec<Elem> {
    (0..n * m)
        .map(|k| {
            let v = k as Elem;
            if k % 2 == 0 { v } else { -v }
        })
        .collect()
}
