use itertools::Itertools;
use std::cmp::Ordering;

/// Rescales a price slice to percent-change-from-first-element.
/// A window starting at 100 and ending at 110 ends at 0.10.
#[inline]
pub(crate) fn normalize_from_start(prices: &[f64]) -> Vec<f64> {
    let Some(&first) = prices.first() else {
        return Vec::new();
    };
    if first <= f64::EPSILON {
        return vec![0.0; prices.len()];
    }
    prices.iter().map(|&p| p / first - 1.0).collect()
}

/// Root-mean-square Euclidean distance between two equal-length vectors.
/// Scale-free across lookbacks, so distances from different horizons stay comparable.
#[inline]
pub(crate) fn rms_distance(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    let n = a.len().min(b.len());
    if n == 0 {
        return 0.0;
    }
    let sum_sq: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let diff = x - y;
            diff * diff
        })
        .sum();
    (sum_sq / n as f64).sqrt()
}

/// Weighted order statistics over `(value, weight)` samples.
///
/// Samples are sorted by value and weights accumulated. For each quantile `q` the
/// first value whose cumulative weight reaches `q * total_weight` is selected.
/// Quantiles must be ascending; the result is then ascending too because every
/// quantile walks the same sorted list.
///
/// Returns None when there are no samples or the weights do not sum to anything positive.
pub(crate) fn weighted_percentiles(samples: &[(f64, f64)], quantiles: &[f64]) -> Option<Vec<f64>> {
    debug_assert!(quantiles.iter().tuple_windows().all(|(a, b)| a <= b));

    let total: f64 = samples.iter().map(|(_, w)| w.max(0.0)).sum();
    if samples.is_empty() || total <= f64::EPSILON {
        return None;
    }

    let sorted: Vec<(f64, f64)> = samples
        .iter()
        .copied()
        .sorted_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal))
        .collect();

    let tolerance = total * 1e-12;
    let mut out = Vec::with_capacity(quantiles.len());
    let mut cumulative = 0.0;
    let mut idx = 0;

    for &q in quantiles {
        let target = q.clamp(0.0, 1.0) * total;
        // Cursor only moves forward, so later quantiles never select a smaller value.
        while idx < sorted.len() {
            let weight = sorted[idx].1.max(0.0);
            if cumulative + weight >= target - tolerance {
                break;
            }
            cumulative += weight;
            idx += 1;
        }
        let pick = sorted[idx.min(sorted.len() - 1)].0;
        out.push(pick);
    }

    Some(out)
}

/// Maximum peak-to-trough decline along a price path, as a positive fraction of the peak.
pub(crate) fn max_drawdown(prices: impl IntoIterator<Item = f64>) -> f64 {
    let mut peak = f64::MIN;
    let mut worst = 0.0_f64;
    for price in prices {
        if price > peak {
            peak = price;
        } else if peak > f64::EPSILON {
            worst = worst.max((peak - price) / peak);
        }
    }
    worst
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_relative_to_first_price() {
        let n = normalize_from_start(&[100.0, 110.0, 90.0]);
        assert_eq!(n.len(), 3);
        assert!((n[0]).abs() < 1e-12);
        assert!((n[1] - 0.10).abs() < 1e-12);
        assert!((n[2] + 0.10).abs() < 1e-12);
        assert!(normalize_from_start(&[]).is_empty());
    }

    #[test]
    fn rms_distance_is_zero_for_identical_windows() {
        let a = [0.0, 0.1, 0.2];
        assert_eq!(rms_distance(&a, &a), 0.0);
        let b = [0.0, 0.1, 0.5];
        // sqrt(0.3^2 / 3)
        assert!((rms_distance(&a, &b) - (0.09_f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn equal_weights_match_plain_order_statistics() {
        let samples: Vec<(f64, f64)> = (1..=10).map(|v| (v as f64, 1.0)).collect();
        let p = weighted_percentiles(&samples, &[0.1, 0.5, 0.9]).unwrap();
        assert_eq!(p, vec![1.0, 5.0, 9.0]);
    }

    #[test]
    fn heavy_weight_pulls_every_percentile() {
        let samples = [(10.0, 0.05), (20.0, 0.90), (30.0, 0.05)];
        let p = weighted_percentiles(&samples, &[0.1, 0.5, 0.9]).unwrap();
        assert_eq!(p, vec![20.0, 20.0, 20.0]);
    }

    #[test]
    fn unsorted_input_is_handled_and_result_is_ordered() {
        let samples = [(5.0, 1.0), (1.0, 1.0), (3.0, 1.0), (4.0, 1.0), (2.0, 1.0)];
        let p = weighted_percentiles(&samples, &[0.1, 0.5, 0.9]).unwrap();
        assert_eq!(p, vec![1.0, 3.0, 5.0]);
        assert!(p[0] <= p[1] && p[1] <= p[2]);
    }

    #[test]
    fn empty_or_weightless_samples_yield_none() {
        assert!(weighted_percentiles(&[], &[0.5]).is_none());
        assert!(weighted_percentiles(&[(1.0, 0.0)], &[0.5]).is_none());
    }

    #[test]
    fn drawdown_tracks_worst_decline_from_running_peak() {
        let dd = max_drawdown([100.0, 120.0, 90.0, 130.0, 117.0]);
        assert!((dd - 0.25).abs() < 1e-12);
        assert_eq!(max_drawdown([1.0, 2.0, 3.0]), 0.0);
    }
}
