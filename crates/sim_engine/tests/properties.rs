//! Property-based tests for the simulation kernels.

use proptest::prelude::*;
use sim_engine::{gbm, pi, stats, PathMatrix, SimRng, SimulationParameters};

fn params_strategy() -> impl Strategy<Value = SimulationParameters> {
    (
        1.0..500.0f64,
        -0.5..0.5f64,
        0.0..1.0f64,
        0.05..5.0f64,
        1..60usize,
        1..40usize,
    )
        .prop_map(|(s0, mu, sigma, t, steps, paths)| {
            SimulationParameters::new(s0, mu, sigma, t, steps, paths).unwrap()
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every estimate lies in [0, 4].
    #[test]
    fn prop_pi_estimate_in_range(seed in any::<u64>(), n in 1..5_000u64) {
        let estimate = pi::estimate_pi(n, SimRng::from_seed(seed)).unwrap();
        prop_assert!((0.0..=4.0).contains(&estimate), "estimate {} for n={}", estimate, n);
    }

    /// Every generated price is finite and positive; column 0 is exact.
    #[test]
    fn prop_paths_positive_with_exact_start(params in params_strategy(), seed in any::<u64>()) {
        let paths = gbm::simulate(&params, SimRng::from_seed(seed)).unwrap();

        prop_assert_eq!(paths.n_paths(), params.path_count());
        prop_assert_eq!(paths.row_len(), params.step_count() + 1);
        for row in paths.rows() {
            prop_assert_eq!(row[0], params.initial_price());
            for &p in row {
                prop_assert!(p.is_finite() && p > 0.0, "price {}", p);
            }
        }
    }

    /// Parallel simulation honours the same invariants.
    #[test]
    fn prop_parallel_paths_positive(params in params_strategy(), seed in any::<u64>()) {
        let paths = gbm::simulate_parallel(&params, seed).unwrap();
        prop_assert!(paths.as_slice().iter().all(|p| p.is_finite() && *p > 0.0));
    }

    /// Constant terminal prices give zero spread.
    #[test]
    fn prop_constant_finals_have_zero_spread(c in 0.01..10_000.0f64, n in 1..50usize) {
        let params = SimulationParameters::builder()
            .path_count(n)
            .step_count(1)
            .build()
            .unwrap();
        let data = (0..n).flat_map(|_| [100.0, c]).collect();
        let matrix = PathMatrix::from_flat(n, 1, data).unwrap();

        let summary = stats::summarize(&matrix, &params).unwrap();
        prop_assert_eq!(summary.mean, c);
        prop_assert_eq!(summary.std_dev, 0.0);
        prop_assert_eq!(summary.min, c);
        prop_assert_eq!(summary.max, c);
    }
}
