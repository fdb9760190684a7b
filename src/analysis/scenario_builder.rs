use strum::IntoEnumIterator;

use crate::config::{DrawdownPct, Price, Prob, ReturnPct};
use crate::models::{BandPoint, Match, OutcomeStats, ScenarioCase, ScenarioLabel};
use crate::utils::weighted_percentiles;

pub struct ScenarioBuilder;

impl ScenarioBuilder {
    /// Bear / Base / Bull read straight off the end-of-horizon band.
    ///
    /// Target prices are derived from the return itself, so
    /// `target == current * (1 + return)` holds exactly.
    pub fn build_cases(end: &BandPoint, current_price: f64) -> Vec<ScenarioCase> {
        ScenarioLabel::iter()
            .map(|label| {
                let band_price = match label {
                    ScenarioLabel::Bear => end.p10,
                    ScenarioLabel::Base => end.p50,
                    ScenarioLabel::Bull => end.p90,
                };
                let return_pct = ReturnPct::between(band_price, current_price);
                ScenarioCase {
                    label,
                    return_pct,
                    target_price: Price::new(current_price * (1.0 + return_pct.value())),
                }
            })
            .collect()
    }

    /// Weighted outcome statistics over the matches' realized forward paths.
    pub fn outcome_stats(matches: &[Match], tail_risk_quantile: f64) -> OutcomeStats {
        let total_weight: f64 = matches.iter().map(|m| m.weight.value()).sum();
        if matches.is_empty() || total_weight <= f64::EPSILON {
            return OutcomeStats {
                sample_size: matches.len(),
                ..OutcomeStats::empty()
            };
        }

        let prob_up = weighted_mean(matches, total_weight, |m| {
            if m.replay.end_return().is_positive() { 1.0 } else { 0.0 }
        });
        let avg_max_dd = weighted_mean(matches, total_weight, |m| m.replay.max_drawdown().value());
        let expected_return = weighted_mean(matches, total_weight, |m| m.replay.end_return().value());

        let drawdowns: Vec<(f64, f64)> = matches
            .iter()
            .map(|m| (m.replay.max_drawdown().value(), m.weight.value()))
            .collect();
        let tail_risk = weighted_percentiles(&drawdowns, &[tail_risk_quantile])
            .and_then(|p| p.first().copied())
            .unwrap_or(0.0);

        OutcomeStats {
            prob_up: Prob::new(prob_up),
            avg_max_dd: DrawdownPct::new(avg_max_dd),
            tail_risk_p95: DrawdownPct::new(tail_risk),
            expected_return: ReturnPct::new(expected_return),
            sample_size: matches.len(),
        }
    }
}

fn weighted_mean(matches: &[Match], total_weight: f64, f: impl Fn(&Match) -> f64) -> f64 {
    matches.iter().map(|m| f(m) * m.weight.value()).sum::<f64>() / total_weight
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PriceLike, Weight};
    use crate::models::{PathPoint, PatternWindow, ReplayPath};

    fn analog(weight: f64, entry: f64, closes: &[f64]) -> Match {
        Match {
            rank: 1,
            window: PatternWindow {
                start_idx: 0,
                end_idx: 0,
                start_timestamp_ms: 0,
                end_timestamp_ms: 0,
                normalized: Vec::new(),
            },
            distance: 0.0,
            weight: Weight::new(weight),
            replay: ReplayPath {
                entry_price: entry,
                entry_timestamp_ms: 0,
                points: closes
                    .iter()
                    .enumerate()
                    .map(|(i, &price)| PathPoint {
                        day: i + 1,
                        timestamp_ms: 0,
                        price,
                    })
                    .collect(),
            },
        }
    }

    fn band(p10: f64, p50: f64, p90: f64) -> BandPoint {
        BandPoint { day: 7, p10, p50, p90 }
    }

    #[test]
    fn seven_day_cases_from_band_end() {
        let cases = ScenarioBuilder::build_cases(&band(61_000.0, 68_000.0, 74_000.0), 68_000.0);
        assert_eq!(cases.len(), 3);
        assert_eq!(cases[0].label, ScenarioLabel::Bear);
        assert!((cases[0].return_pct.value() + 0.102_941).abs() < 1e-5);
        assert!(cases[1].return_pct.value().abs() < 1e-12);
        assert!((cases[2].return_pct.value() - 0.088_235).abs() < 1e-5);
        for c in &cases {
            assert_eq!(c.target_price.value(), 68_000.0 * (1.0 + c.return_pct.value()));
        }
    }

    #[test]
    fn wide_year_band_keeps_targets_consistent() {
        let cases = ScenarioBuilder::build_cases(&band(25_000.0, 110_000.0, 595_000.0), 68_000.0);
        assert!((cases[0].return_pct.value() + 0.632_353).abs() < 1e-5);
        assert!((cases[1].return_pct.value() - 0.617_647).abs() < 1e-5);
        assert!((cases[2].return_pct.value() - 7.75).abs() < 1e-9);
        assert!((cases[2].target_price.value() - 595_000.0).abs() < 1e-6);
        assert!(cases[0].return_pct < cases[1].return_pct && cases[1].return_pct < cases[2].return_pct);
    }

    #[test]
    fn probability_up_is_weighted() {
        let matches = vec![
            analog(0.6, 100.0, &[105.0, 110.0]),
            analog(0.3, 100.0, &[95.0, 90.0]),
            analog(0.1, 100.0, &[101.0, 102.0]),
        ];
        let stats = ScenarioBuilder::outcome_stats(&matches, 0.95);
        assert!((stats.prob_up.value() - 0.7).abs() < 1e-12);
        assert_eq!(stats.sample_size, 3);
        // 0.6*0.10 + 0.3*-0.10 + 0.1*0.02
        assert!((stats.expected_return.value() - 0.032).abs() < 1e-12);
    }

    #[test]
    fn flat_outcomes_do_not_count_as_up() {
        let matches = vec![
            analog(0.5, 100.0, &[100.0, 100.000_000_1]),
            analog(0.5, 100.0, &[101.0, 102.0]),
        ];
        let stats = ScenarioBuilder::outcome_stats(&matches, 0.95);
        assert!((stats.prob_up.value() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn drawdown_stats_include_entry_and_tail() {
        let matches = vec![
            analog(0.5, 100.0, &[90.0, 110.0]),
            analog(0.3, 100.0, &[120.0, 60.0]),
            analog(0.2, 100.0, &[101.0, 102.0]),
        ];
        let stats = ScenarioBuilder::outcome_stats(&matches, 0.95);
        // Drawdowns: 0.10, 0.50, 0.00
        assert!((stats.avg_max_dd.value() - 0.20).abs() < 1e-12);
        assert!((stats.tail_risk_p95.value() - 0.50).abs() < 1e-12);
        assert!(stats.tail_risk_p95 >= stats.avg_max_dd);
    }

    #[test]
    fn empty_matches_give_empty_stats() {
        let stats = ScenarioBuilder::outcome_stats(&[], 0.95);
        assert_eq!(stats, OutcomeStats::empty());
    }
}
