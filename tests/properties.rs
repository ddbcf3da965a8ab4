//! Property-based tests for the classifiers and the class lookup

use approx::assert_relative_eq;
use classbreaks::{
    JenksOptions, equal_breaks, jenks_breaks, jenks_breaks_with, max, min, numeric_sort, plot,
    quantile_breaks,
};
use proptest::prelude::*;

fn series() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1000.0f64..1000.0, 1..60)
}

/// Sorted series of distinct values, short enough to enumerate every partition
fn small_distinct_series() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::btree_set(-500i32..500, 2..=8)
        .prop_map(|set| set.into_iter().map(f64::from).collect())
}

fn ssd(class: &[f64]) -> f64 {
    let mean = class.iter().sum::<f64>() / class.len() as f64;
    class.iter().map(|x| (x - mean) * (x - mean)).sum()
}

/// Total within-class sum of squared deviations for classes ending just before each cut
fn partition_ssd(sorted: &[f64], cuts: &[usize]) -> f64 {
    let mut start = 0;
    let mut total = 0.0;
    for &end in cuts.iter().chain(std::iter::once(&sorted.len())) {
        total += ssd(&sorted[start..end]);
        start = end;
    }
    total
}

/// Smallest total SSD over every split of `sorted` into `nclasses` contiguous, non-empty classes
fn best_ssd(sorted: &[f64], nclasses: usize) -> f64 {
    fn search(sorted: &[f64], from: usize, remaining: usize, cuts: &mut Vec<usize>) -> f64 {
        if remaining == 0 {
            return partition_ssd(sorted, cuts);
        }
        let mut best = f64::INFINITY;
        for cut in from..=(sorted.len() - remaining) {
            cuts.push(cut);
            best = best.min(search(sorted, cut + 1, remaining - 1, cuts));
            cuts.pop();
        }
        best
    }
    search(sorted, 1, nclasses - 1, &mut Vec::new())
}

#[test]
fn jenks_optimum_with_low_outlier() {
    let sorted = vec![1.0, 100.0, 101.0, 102.0, 140.0];
    let breaks = jenks_breaks(&sorted, 3).unwrap();
    assert_eq!(breaks, vec![0.0, 1.0, 102.0, 140.0]);
}

proptest! {
    #[test]
    fn prop_equal_breaks_span_the_range(s in series(), n in 1u8..20) {
        let breaks = equal_breaks(&s, n).unwrap();
        prop_assert_eq!(breaks.len(), n as usize + 1);
        prop_assert!(breaks.windows(2).all(|w| w[0] <= w[1]));
        prop_assert_eq!(breaks[0], min(&s).unwrap());
        prop_assert_eq!(breaks[n as usize], max(&s).unwrap());
    }

    #[test]
    fn prop_quantile_breaks_are_observations(s in series(), n in 1u8..20) {
        let breaks = quantile_breaks(&s, n).unwrap();
        prop_assert_eq!(breaks.len(), n as usize + 1);
        prop_assert!(breaks.windows(2).all(|w| w[0] <= w[1]));
        prop_assert!(breaks.iter().all(|b| s.contains(b)));
        prop_assert_eq!(breaks[0], min(&s).unwrap());
        prop_assert_eq!(breaks[n as usize], max(&s).unwrap());
    }

    #[test]
    fn prop_jenks_breaks_shape(s in series(), n in 1u8..8) {
        let breaks = jenks_breaks(&s, n).unwrap();
        if s.len() < n as usize + 1 {
            prop_assert_eq!(breaks, s);
        } else {
            prop_assert_eq!(breaks.len(), n as usize + 1);
            prop_assert_eq!(breaks[n as usize], max(&s).unwrap());
            // a zeroed flat bottom is the only break allowed out of order
            prop_assert!(breaks[1..].windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn prop_jenks_short_series_passthrough(
        s in prop::collection::vec(-1000.0f64..1000.0, 1..6),
        extra in 0u8..4,
    ) {
        let n = s.len() as u8 + extra;
        prop_assert_eq!(jenks_breaks(&s, n).unwrap(), s);
    }

    #[test]
    fn prop_jenks_is_optimal(
        (sorted, n) in small_distinct_series().prop_flat_map(|s| {
            let len = s.len();
            (Just(s), 1..len)
        })
    ) {
        let options = JenksOptions::new().with_zero_flat_bottom(false);
        let breaks = jenks_breaks_with(&sorted, n as u8, options).unwrap();
        // values are distinct, so each inner break pins down where a class ends
        let cuts: Vec<usize> = breaks[1..n]
            .iter()
            .map(|b| sorted.iter().position(|x| x == b).unwrap() + 1)
            .collect();
        let found = partition_ssd(&sorted, &cuts);
        let best = best_ssd(&sorted, n);
        prop_assert!(found <= best + 1e-6 * best.max(1.0), "found {found}, best {best}");
        assert_relative_eq!(found, best, epsilon = 1e-6, max_relative = 1e-9);
    }

    #[test]
    fn prop_classifiers_are_idempotent(s in series(), n in 1u8..10) {
        let copy = s.clone();
        prop_assert_eq!(equal_breaks(&s, n).unwrap(), equal_breaks(&copy, n).unwrap());
        prop_assert_eq!(quantile_breaks(&s, n).unwrap(), quantile_breaks(&copy, n).unwrap());
        prop_assert_eq!(jenks_breaks(&s, n).unwrap(), jenks_breaks(&copy, n).unwrap());
        prop_assert_eq!(s, copy);
    }

    #[test]
    fn prop_plot_agrees_with_breaks(s in series(), n in 2u8..12) {
        let breaks = equal_breaks(&s, n).unwrap();
        for i in 0..(n as usize - 1) {
            let (low, high) = (breaks[i], breaks[i + 1]);
            let mid = low + (high - low) / 2.0;
            if low < mid && mid < high {
                prop_assert_eq!(plot(&breaks, mid, false), Some(i));
            }
        }
    }

    #[test]
    fn prop_plot_descending_finds_last_break_below(s in series(), v in -1500.0f64..1500.0) {
        let breaks = numeric_sort(&s, false);
        match plot(&breaks, v, true) {
            Some(i) => {
                prop_assert!(v >= breaks[i]);
                prop_assert!(breaks[i + 1..].iter().all(|b| v < *b));
            }
            None => prop_assert!(breaks.iter().all(|b| v < *b)),
        }
    }
}
