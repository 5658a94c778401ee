//! Miss-count runner for the registered transpose functions.

use anyhow::{Context, Result, ensure};
use blocktrans::blocked::SUBMIT_DESC;
use blocktrans::harness::{Harness, Registry, Report, register_functions};
use clap::Parser;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// (M, N) of the shapes the submission is tuned for.
const REFERENCE_SHAPES: [(usize, usize); 3] = [(32, 32), (64, 64), (61, 67)];

#[derive(Debug, Clone, Parser)]
#[clap(about = "Count simulated cache misses of each transpose strategy")]
struct Opts {
    /// columns of A
    #[clap(short = 'M', requires = "n")]
    m: Option<usize>,
    /// rows of A
    #[clap(short = 'N', requires = "m")]
    n: Option<usize>,
    /// number of set index bits (2^s sets)
    #[clap(short = 's', default_value = "5")]
    set_bits: u32,
    /// lines per set
    #[clap(short = 'E', default_value = "1")]
    lines_per_set: usize,
    /// number of block bits (2^b bytes per line)
    #[clap(short = 'b', default_value = "5")]
    block_bits: u32,
    /// write the submission's access trace to this file
    #[clap(long, requires = "m")]
    trace: Option<PathBuf>,
}

fn main() -> Result<()> {
    pretty_env_logger::init();
    let opts = Opts::parse();

    let harness = Harness::from_params(opts.set_bits, opts.lines_per_set, opts.block_bits)?;
    let mut registry = Registry::new();
    register_functions(&mut registry);

    let shapes = match (opts.m, opts.n) {
        (Some(m), Some(n)) => vec![(m, n)],
        _ => REFERENCE_SHAPES.to_vec(),
    };

    println!("=== Transpose Cache Misses ===\n");
    println!("Cache: {}\n", harness.config());

    let mut all_results = Vec::new();
    for &(m, n) in &shapes {
        println!("Matrix: {}×{} (M×N)", m, n);
        println!("{}", "-".repeat(70));

        let reports = harness.evaluate(&registry, m, n)?;
        let baseline_misses = reports.last().map_or(0, |r| r.stats.misses);
        for (i, report) in reports.iter().enumerate() {
            println!(
                "{}. {:32} hits {:6}  misses {:6}  evictions {:6}  {}  ({:.1}×)",
                i + 1,
                report.description,
                report.stats.hits,
                report.stats.misses,
                report.stats.evictions,
                if report.correct { "ok" } else { "WRONG" },
                baseline_misses as f64 / report.stats.misses.max(1) as f64
            );
        }
        if let Some(best) = Report::best(&reports) {
            println!("best: {}", best.description);
        }
        println!();

        all_results.push(reports);
    }

    if let (Some(path), Some(m), Some(n)) = (&opts.trace, opts.m, opts.n) {
        write_trace(&harness, &registry, path, m, n)?;
    }

    print_summary_table(&shapes, &all_results);

    let wrong: Vec<_> = all_results
        .iter()
        .flatten()
        .filter(|r| !r.correct)
        .map(|r| format!("{} ({}x{})", r.description, r.m, r.n))
        .collect();
    ensure!(wrong.is_empty(), "incorrect transpose: {}", wrong.join(", "));

    Ok(())
}

fn write_trace(
    harness: &Harness,
    registry: &Registry,
    path: &Path,
    m: usize,
    n: usize,
) -> Result<()> {
    let submission = registry
        .find(SUBMIT_DESC)
        .with_context(|| format!("{:?} is not registered", SUBMIT_DESC))?;
    let (_, trace) = harness.run_one(&submission.description, submission.func, m, n, true)?;

    let file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for entry in &trace {
        writeln!(writer, "{}", entry)?;
    }
    writer.flush()?;

    info!("wrote {} accesses to {}", trace.len(), path.display());
    Ok(())
}

fn print_summary_table(shapes: &[(usize, usize)], all_results: &[Vec<Report>]) {
    println!("{}", "=".repeat(70));
    println!("SUMMARY (misses)");
    println!("{}", "=".repeat(70));

    print!("\n{:<32}", "Method");
    for (m, n) in shapes {
        print!(" {:>10}", format!("{}×{}", m, n));
    }
    println!();
    println!("{}", "-".repeat(70));

    let Some(first) = all_results.first() else {
        return;
    };
    for (method_idx, report) in first.iter().enumerate() {
        print!("{:<32}", report.description);
        for results in all_results {
            print!(" {:>10}", results[method_idx].stats.misses);
        }
        println!();
    }

    println!("{}", "=".repeat(70));
    println!("\nLower is better. Baseline is the row-wise scan.\n");
}
