use rayon::prelude::*;

use crate::config::{DF, ForecastSettings, Weight};
use crate::domain::{HorizonSpec, PriceSeries};
use crate::models::{MatchSet, MatchStats, PatternWindow, WindowMatch};
use crate::utils::{normalize_from_start, rms_distance};

pub struct HistoricalMatcher;

impl HistoricalMatcher {
    /// Scans history for the windows that look most like "now".
    ///
    /// Candidates sit on a grid stepping back from the newest window whose forward
    /// path still fits inside the series, so no candidate ever peeks past the last
    /// candle. Distance is RMS Euclidean over percent-change-from-window-start.
    /// Ties go to the more recent window.
    pub fn find_matches(
        series: &PriceSeries,
        spec: &HorizonSpec,
        settings: &ForecastSettings,
    ) -> MatchSet {
        let candles = series.candles();
        let closes = series.closes();
        let len = closes.len();

        let lookback = spec.lookback.min(len);
        let insufficient_history = len < spec.lookback;

        let query = match len {
            0 => PatternWindow {
                start_idx: 0,
                end_idx: 0,
                start_timestamp_ms: 0,
                end_timestamp_ms: 0,
                normalized: Vec::new(),
            },
            _ => Self::window(series, &closes, len - 1, lookback),
        };

        let (ends, valid_windows) = Self::candidate_window_ends(
            len,
            lookback,
            spec.days,
            spec.scan_stride,
            settings.max_scan_windows,
        );

        let mut candidates: Vec<(usize, f64)> = crate::trace_time!("Matcher scan", 20_000, {
            ends.par_iter()
                .map(|&end| {
                    let start = end + 1 - lookback;
                    let normalized = normalize_from_start(&closes[start..=end]);
                    (end, rms_distance(&query.normalized, &normalized))
                })
                .collect()
        });

        // Lowest distance is best; equal distances prefer the later window.
        candidates.sort_unstable_by(|a, b| a.1.total_cmp(&b.1).then(b.0.cmp(&a.0)));
        candidates.truncate(spec.required_matches);

        let distances: Vec<f64> = candidates.iter().map(|c| c.1).collect();
        let weights = similarity_weights(&distances, settings.distance_epsilon);

        let matches: Vec<WindowMatch> = candidates
            .iter()
            .zip(weights)
            .map(|(&(end, distance), weight)| WindowMatch {
                window: Self::window(series, &closes, end, lookback),
                distance,
                weight,
            })
            .collect();

        let stats = MatchStats {
            required_matches: spec.required_matches,
            effective_lookback: lookback,
            valid_windows,
            scanned_windows: ends.len(),
            scan_capped: valid_windows > ends.len(),
            insufficient_history,
        };

        if DF.log_matcher {
            log::info!(
                "Matcher {}: {} candles, lookback {}, {} valid windows ({} scanned), kept {} (best distance {:.5})",
                spec.horizon,
                candles.len(),
                lookback,
                stats.valid_windows,
                stats.scanned_windows,
                matches.len(),
                matches.first().map_or(f64::NAN, |m| m.distance),
            );
        }

        MatchSet {
            query,
            matches,
            stats,
        }
    }

    /// End indices of candidate windows, newest first, plus the uncapped count.
    ///
    /// The newest candidate ends `days` candles before the last candle, so its
    /// forward path ends exactly on the last candle. Older candidates step back by
    /// `stride` while a full `lookback` still fits before them.
    pub fn candidate_window_ends(
        len: usize,
        lookback: usize,
        days: usize,
        stride: usize,
        max_scan_windows: usize,
    ) -> (Vec<usize>, usize) {
        let stride = stride.max(1);
        if len == 0 || lookback == 0 || len <= days {
            return (Vec::new(), 0);
        }

        let newest_end = len - 1 - days;
        if newest_end + 1 < lookback {
            return (Vec::new(), 0);
        }

        let valid = (newest_end + 1 - lookback) / stride + 1;
        let ends = (0..valid.min(max_scan_windows))
            .map(|j| newest_end - j * stride)
            .collect();

        (ends, valid)
    }

    fn window(series: &PriceSeries, closes: &[f64], end: usize, lookback: usize) -> PatternWindow {
        let start = end + 1 - lookback;
        let candles = series.candles();
        PatternWindow {
            start_idx: start,
            end_idx: end,
            start_timestamp_ms: candles[start].timestamp_ms,
            end_timestamp_ms: candles[end].timestamp_ms,
            normalized: normalize_from_start(&closes[start..=end]),
        }
    }
}

/// Inverse-distance weights normalized to sum to 1.
pub fn similarity_weights(distances: &[f64], epsilon: f64) -> Vec<Weight> {
    let raw: Vec<f64> = distances
        .iter()
        .map(|d| 1.0 / (d.max(0.0) + epsilon.max(f64::MIN_POSITIVE)))
        .collect();
    let total: f64 = raw.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        let even = 1.0 / distances.len().max(1) as f64;
        return distances.iter().map(|_| Weight::new(even)).collect();
    }
    raw.into_iter().map(|w| Weight::new(w / total)).collect()
}
