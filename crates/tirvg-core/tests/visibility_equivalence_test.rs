//! Direct O(N^2) visibility versus the divide-and-conquer builder.
//!
//! The fast path must reproduce the reference edge set exactly, for
//! every series shape, length and window.

use tirvg_core::{Edge, FastNaturalVisibility, GraphBuilder, NaturalVisibility, TimeSeries};

#[derive(Clone, Copy, Debug)]
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self {
            state: seed.max(1),
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    /// Uniform double in [0, 1).
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

fn uniform_series(n: usize, seed: u64) -> TimeSeries {
    let mut rng = XorShift64::new(seed);
    TimeSeries::new((0..n).map(|_| rng.next_f64()).collect()).unwrap()
}

fn random_walk_series(n: usize, seed: u64) -> TimeSeries {
    let mut rng = XorShift64::new(seed);
    let mut level = 0.0;
    TimeSeries::new(
        (0..n)
            .map(|_| {
                level += rng.next_f64() - 0.5;
                level
            })
            .collect(),
    )
    .unwrap()
}

/// Random walk with upward drift; its maximum tends to sit near the
/// end, so every split is lopsided.
fn drifting_walk_series(n: usize, seed: u64) -> TimeSeries {
    let mut rng = XorShift64::new(seed);
    let mut level = 0.0;
    TimeSeries::new(
        (0..n)
            .map(|_| {
                level += rng.next_f64() - 0.3;
                level
            })
            .collect(),
    )
    .unwrap()
}

fn assert_equivalent(series: &TimeSeries, window: Option<usize>, label: &str) {
    let mut direct = NaturalVisibility.build_edges(series, window);
    direct.sort_unstable();
    let fast = FastNaturalVisibility.build_edges(series, window);
    assert_eq!(direct, fast, "{label}, window {window:?}");
}

#[test]
fn uniform_noise_small_to_moderate() {
    for &n in &[5usize, 17, 64, 257, 1000] {
        for seed in 1..=3u64 {
            let series = uniform_series(n, seed * 7919);
            for window in [None, Some(2), Some(5), Some(50)] {
                assert_equivalent(&series, window, &format!("uniform n={n} seed={seed}"));
            }
        }
    }
}

#[test]
fn uniform_noise_n_2000() {
    let series = uniform_series(2000, 42);
    assert_equivalent(&series, None, "uniform n=2000");
    assert_equivalent(&series, Some(10), "uniform n=2000");
}

#[test]
fn random_walks() {
    for &n in &[10usize, 100, 500] {
        for seed in 1..=3u64 {
            let series = random_walk_series(n, seed * 104_729);
            for window in [None, Some(5)] {
                assert_equivalent(&series, window, &format!("walk n={n} seed={seed}"));
            }
        }
    }
}

#[test]
fn trending_and_plateaued_shapes() {
    let shapes: &[&[f64]] = &[
        &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0],
        &[7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0],
        &[2.0, 2.0, 2.0, 2.0, 2.0],
        &[1.0, 5.0, 1.0, 5.0, 1.0, 5.0],
        &[1.0, 2.0, 2.0, 3.0, 1.0, 2.0, 2.0],
    ];
    for values in shapes {
        let series = TimeSeries::from_slice(values).unwrap();
        for window in [None, Some(1), Some(3)] {
            assert_equivalent(&series, window, &format!("shape {values:?}"));
        }
    }
}

#[test]
fn drifting_walks() {
    for seed in 1..=3u64 {
        let series = drifting_walk_series(600, seed * 31_337);
        for window in [None, Some(20)] {
            assert_equivalent(&series, window, &format!("drifting walk seed={seed}"));
        }
    }
}

#[test]
fn long_ramps() {
    // An arithmetic ramp is all exact ties; a concave ramp keeps every
    // long pair strictly blocked with room to spare; a convex ramp
    // connects every pair.
    let linear: Vec<f64> = (1..=400).map(|t| t as f64).collect();
    assert_equivalent(&TimeSeries::new(linear).unwrap(), None, "linear ramp");

    let concave: Vec<f64> = (1..=400).map(|t| (t as f64).sqrt()).collect();
    let concave = TimeSeries::new(concave).unwrap();
    assert_equivalent(&concave, None, "concave ramp");
    assert_equivalent(&concave, Some(10), "concave ramp");

    let convex: Vec<f64> = (1..=150).map(|t| (t * t) as f64).collect();
    let convex = TimeSeries::new(convex).unwrap();
    assert_equivalent(&convex, None, "convex ramp");
    let edges = FastNaturalVisibility.build_edges(&convex, None);
    assert_eq!(edges.len(), 150 * 149 / 2);
}

#[test]
fn every_edge_points_forward_and_respects_the_window() {
    let series = uniform_series(300, 9);
    for window in [None, Some(4)] {
        for edge in FastNaturalVisibility.build_edges(&series, window) {
            assert!(edge.source < edge.target);
            if let Some(w) = window {
                assert!(edge.span() <= w);
            }
        }
    }
    // Adjacent pairs are always mutually visible.
    let edges = FastNaturalVisibility.build_edges(&series, Some(1));
    let expected: Vec<Edge> = (1..series.len()).map(|t| Edge::new(t, t + 1)).collect();
    assert_eq!(edges, expected);
}
