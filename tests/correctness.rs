use blocktrans::blocked::tiled::transpose_tiled;
use blocktrans::blocked::transpose_32x32::transpose_32x32;
use blocktrans::blocked::transpose_64x64::transpose_64x64;
use blocktrans::blocked::{BlockShape, SUBMIT_DESC, Strategy, transpose_submit};
use blocktrans::harness::{Harness, Registry, Report, register_functions};
use blocktrans::matrix::transpose::{TRANS_DESC, trans};
use blocktrans::matrix::{Dense, Elem, Operands};
use blocktrans::{is_transpose, transpose};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const REFERENCE_SHAPES: [(usize, usize); 3] = [(32, 32), (64, 64), (61, 67)];

fn random_matrix(m: usize, n: usize, seed: u64) -> Vec<Elem> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..m * n).map(|_| rng.gen_range(-1_000_000..1_000_000)).collect()
}

fn assert_transposed(m: usize, n: usize, a: &[Elem], b: &[Elem], name: &str) {
    for i in 0..n {
        for j in 0..m {
            assert_eq!(
                b[j * n + i],
                a[i * m + j],
                "{}: B[{}][{}] != A[{}][{}]",
                name,
                j,
                i,
                i,
                j
            );
        }
    }
}

/// Counts how often each cell of A is read and each cell of B is written.
struct CountingOperands {
    m: usize,
    n: usize,
    loads: Vec<u32>,
    stores: Vec<u32>,
}

impl CountingOperands {
    fn new(m: usize, n: usize) -> Self {
        Self {
            m,
            n,
            loads: vec![0; m * n],
            stores: vec![0; m * n],
        }
    }
}

impl Operands for CountingOperands {
    fn rows(&self) -> usize {
        self.n
    }

    fn cols(&self) -> usize {
        self.m
    }

    fn load(&mut self, row: usize, col: usize) -> Elem {
        assert!(row < self.n && col < self.m, "load A[{}][{}] out of range", row, col);
        self.loads[row * self.m + col] += 1;
        0
    }

    fn store(&mut self, row: usize, col: usize, _value: Elem) {
        assert!(row < self.m && col < self.n, "store B[{}][{}] out of range", row, col);
        self.stores[row * self.n + col] += 1;
    }
}

// ============================================================
// Reference shapes
// ============================================================

#[test]
fn test_32x32_sequential_values() {
    let (m, n) = (32, 32);
    let a: Vec<Elem> = (0..n)
        .flat_map(|i| (0..m).map(move |j| (i * 32 + j) as Elem))
        .collect();
    let mut b = vec![0; m * n];

    transpose(m, n, &a, &mut b);

    for i in 0..n {
        for j in 0..m {
            assert_eq!(b[j * n + i], (i * 32 + j) as Elem);
        }
        // diagonal entries go through the deferred path
        assert_eq!(b[i * n + i], (i * 33) as Elem);
    }
    assert!(is_transpose(m, n, &a, &b));
}

#[test]
fn test_64x64_negative_values() {
    let (m, n) = (64, 64);
    let a: Vec<Elem> = (0..n)
        .flat_map(|i| (0..m).map(move |j| i as Elem - j as Elem))
        .collect();
    let mut b = vec![0; m * n];

    transpose(m, n, &a, &mut b);

    // one probe in each quadrant of the U walk, inside a diagonal block and off it
    for &(i, j) in &[(8, 9), (13, 9), (13, 14), (10, 15), (0, 63), (63, 0), (40, 40)] {
        assert_eq!(b[j * n + i], i as Elem - j as Elem, "A[{}][{}]", i, j);
    }
    assert_transposed(m, n, &a, &b, "64x64");
}

#[test]
fn test_61x67_clips_edge_blocks() {
    let (m, n) = (61, 67);
    let a: Vec<Elem> = (0..(m * n) as Elem).collect();
    let mut b = vec![Elem::MIN; m * n];

    transpose(m, n, &a, &mut b);

    // last block row starts at i=60 and must stop at 66; last block column at j=56..60
    assert_eq!(b[60 * n + 66], a[66 * m + 60]);
    assert_eq!(b[56 * n + 60], a[60 * m + 56]);
    assert!(!b.contains(&Elem::MIN));
    assert_transposed(m, n, &a, &b, "61x67");
}

#[test]
fn test_random_reference_shapes() {
    for (seed, &(m, n)) in REFERENCE_SHAPES.iter().enumerate() {
        let a = random_matrix(m, n, seed as u64);
        let mut b = vec![0; m * n];

        transpose(m, n, &a, &mut b);

        assert!(is_transpose(m, n, &a, &b), "{}x{}", m, n);
    }
}

#[test]
fn test_double_transpose_restores_input() {
    for (seed, &(m, n)) in REFERENCE_SHAPES.iter().enumerate() {
        let a = random_matrix(m, n, 100 + seed as u64);
        let mut b = vec![0; m * n];
        let mut back = vec![0; m * n];

        transpose(m, n, &a, &mut b);
        // B is m rows × n columns
        transpose(n, m, &b, &mut back);

        assert_eq!(a, back, "{}x{}", m, n);
    }
}

// ============================================================
// Write-once and bounds
// ============================================================

#[test]
fn test_every_cell_written_once() {
    for &(m, n) in &REFERENCE_SHAPES {
        let mut io = CountingOperands::new(m, n);
        transpose_submit(&mut io);

        assert!(io.stores.iter().all(|&c| c == 1), "{}x{}: stores {:?}", m, n, io.stores);
        assert!(io.loads.iter().all(|&c| c == 1), "{}x{}: loads", m, n);
    }
}

#[test]
fn test_square_strategies_write_once() {
    let mut io = CountingOperands::new(32, 32);
    transpose_32x32(&mut io);
    assert!(io.stores.iter().all(|&c| c == 1));

    let mut io = CountingOperands::new(64, 64);
    transpose_64x64(&mut io);
    assert!(io.stores.iter().all(|&c| c == 1));
}

#[test]
#[should_panic(expected = "not a multiple of 8")]
fn test_32x32_strategy_rejects_12x12() {
    let a = vec![0; 144];
    let mut b = vec![0; 144];
    transpose_32x32(&mut Dense::new(12, 12, &a, &mut b));
}

#[test]
#[should_panic(expected = "not a multiple of 8")]
fn test_64x64_strategy_rejects_12x12() {
    let a = vec![0; 144];
    let mut b = vec![0; 144];
    transpose_64x64(&mut Dense::new(12, 12, &a, &mut b));
}

// ============================================================
// Tiled strategy on other shapes
// ============================================================

#[test]
fn test_tiled_odd_shapes() {
    let test_shapes = [(1, 1), (1, 13), (13, 1), (7, 5), (8, 12), (9, 13), (61, 67), (67, 61)];

    for (seed, &(m, n)) in test_shapes.iter().enumerate() {
        let a = random_matrix(m, n, 200 + seed as u64);
        let mut b = vec![0; m * n];

        transpose_tiled(&mut Dense::new(m, n, &a, &mut b), BlockShape::FALLBACK);

        assert_transposed(m, n, &a, &b, &format!("tiled_{}x{}", m, n));
    }
}

#[test]
fn test_tiled_other_block_shapes() {
    let (m, n) = (61, 67);
    let a = random_matrix(m, n, 7);

    for shape in [BlockShape::new(1, 1), BlockShape::new(4, 16), BlockShape::new(100, 100)] {
        let mut b = vec![0; m * n];
        Strategy::Tiled(shape).run(&mut Dense::new(m, n, &a, &mut b));
        assert!(is_transpose(m, n, &a, &b), "{:?}", shape);
    }
}

#[test]
#[should_panic(expected = "A: expected")]
fn test_transpose_rejects_short_source() {
    let a = vec![0; 10];
    let mut b = vec![0; 12];
    transpose(3, 4, &a, &mut b);
}

// ============================================================
// Simulated cache
// ============================================================

#[test]
fn test_blocked_beats_row_wise_scan() {
    let mut registry = Registry::new();
    register_functions(&mut registry);
    let harness = Harness::default();

    for &(m, n) in &REFERENCE_SHAPES {
        let reports = harness.evaluate(&registry, m, n).unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].description, SUBMIT_DESC);
        assert_eq!(reports[1].description, TRANS_DESC);
        assert!(reports.iter().all(|r| r.correct), "{}x{}", m, n);

        let blocked = reports[0].stats.misses;
        let naive = reports[1].stats.misses;
        assert!(blocked < naive, "{}x{}: blocked {} vs naive {}", m, n, blocked, naive);

        assert_eq!(Report::best(&reports).unwrap().description, SUBMIT_DESC);
    }
}

#[test]
fn test_reference_miss_ceilings() {
    let mut registry = Registry::new();
    registry.register(transpose_submit, SUBMIT_DESC);
    let harness = Harness::default();

    for &((m, n), ceiling) in &[((32, 32), 300), ((64, 64), 1600), ((61, 67), 2000)] {
        let reports = harness.evaluate(&registry, m, n).unwrap();
        let misses = reports[0].stats.misses;
        assert!(misses < ceiling, "{}x{}: {} misses", m, n, misses);
    }
}

#[test]
fn test_diagonal_deferral_saves_misses() {
    fn undeferred(io: &mut dyn Operands) {
        for i in (0..32).step_by(8) {
            for j in (0..32).step_by(8) {
                for r in i..i + 8 {
                    for c in j..j + 8 {
                        let v = io.load(r, c);
                        io.store(c, r, v);
                    }
                }
            }
        }
    }

    let mut registry = Registry::new();
    registry.register(transpose_32x32, "deferred");
    registry.register(undeferred, "in order");
    let reports = Harness::default().evaluate(&registry, 32, 32).unwrap();

    assert!(reports.iter().all(|r| r.correct));
    assert!(reports[0].stats.misses < reports[1].stats.misses);
}

#[test]
fn test_baseline_is_correct_everywhere() {
    for &(m, n) in &[(3, 5), (61, 67), (64, 64)] {
        let a = random_matrix(m, n, 42);
        let mut b = vec![0; m * n];
        trans(&mut Dense::new(m, n, &a, &mut b));
        assert!(is_transpose(m, n, &a, &b));
    }
}
