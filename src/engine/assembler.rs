use crate::analysis::{
    DataQualityClassifier, DivergenceAnalyzer, HistoricalMatcher, PathReplayer, PathSynthesizer,
    QualityInputs, ScenarioBuilder,
};
use crate::config::{FORECAST, ForecastSettings, Price};
use crate::domain::{Horizon, InvalidInputError, InvalidInputKind, PriceSeries};
use crate::models::{
    Diagnostics, FocusMeta, FocusPack, Forecast, Match, Overlay, OverlayMatch, PrimaryMatch,
    ScenarioBlock,
};
use crate::utils::epoch_ms_to_utc;

/// Turns a validated price series and a horizon into a [`FocusPack`].
///
/// Holds only configuration. The reference time used for the staleness check is
/// supplied by the caller; the assembler never reads a clock.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusPackAssembler {
    pub settings: ForecastSettings,
    pub as_of_ms: Option<i64>,
}

impl Default for FocusPackAssembler {
    fn default() -> Self {
        Self::new(FORECAST)
    }
}

impl FocusPackAssembler {
    pub fn new(settings: ForecastSettings) -> Self {
        Self {
            settings,
            as_of_ms: None,
        }
    }

    /// Reference "now" for the stale-data check.
    pub fn as_of(mut self, as_of_ms: i64) -> Self {
        self.as_of_ms = Some(as_of_ms);
        self
    }

    pub fn assemble(
        &self,
        symbol: &str,
        horizon: Horizon,
        series: &PriceSeries,
    ) -> Result<FocusPack, InvalidInputError> {
        series
            .validate(self.settings.min_lookback)
            .map_err(|e| e.with_symbol(symbol))?;

        let (anchor_price, anchor_timestamp_ms) = match series.last() {
            Some(c) => (c.close_price, c.timestamp_ms),
            None => return Err(InvalidInputError::new(InvalidInputKind::EmptySeries).with_symbol(symbol)),
        };

        let spec = horizon.spec();
        let label = format!("{} {}", symbol, horizon);

        crate::trace_time!(&format!("Total FocusPack [{}]", label), 50_000, {
            // 1. Analog search
            let match_set = HistoricalMatcher::find_matches(series, spec, &self.settings);

            // 2. Realized outcomes
            let matches = PathReplayer::replay_all(series, &match_set.matches, spec.days);

            // 3. Weighted bands
            let synthetic =
                PathSynthesizer::synthesize(&matches, anchor_price, spec.days, &self.settings.bands);

            // 4. Best analog vs centre line
            let primary = matches.first();
            let report =
                DivergenceAnalyzer::analyze(&synthetic, primary, anchor_price, anchor_timestamp_ms);

            // 5. REAL / FALLBACK
            let data_status = DataQualityClassifier::classify(
                &QualityInputs {
                    match_count: matches.len(),
                    required_matches: spec.required_matches,
                    insufficient_history: match_set.stats.insufficient_history,
                    mean_divergence: report.summary.as_ref().map(|s| s.mean_divergence),
                    last_timestamp_ms: anchor_timestamp_ms,
                    as_of_ms: self.as_of_ms,
                },
                &self.settings,
            );

            // 6. Scenarios
            let cases = match synthetic.end() {
                Some(end) => ScenarioBuilder::build_cases(end, anchor_price),
                None => Vec::new(),
            };
            let outcome_stats =
                ScenarioBuilder::outcome_stats(&matches, self.settings.tail_risk_quantile);

            log::debug!(
                "FocusPack {} as of {}: {} matches, status {}",
                label,
                epoch_ms_to_utc(anchor_timestamp_ms),
                matches.len(),
                data_status.value,
            );

            Ok(FocusPack {
                meta: FocusMeta {
                    symbol: symbol.to_string(),
                    horizon,
                    days: spec.days,
                    required_matches: spec.required_matches,
                    lookback: spec.lookback,
                    render_bucket: spec.render_bucket,
                    anchor_price: Price::new(anchor_price),
                    anchor_timestamp_ms,
                    candle_count: series.len(),
                    data_version: series.data_version().to_string(),
                },
                overlay: Overlay {
                    current_window: match_set.query.normalized.clone(),
                    matches: matches.iter().map(overlay_match).collect(),
                },
                forecast: Forecast {
                    bands: synthetic.points.clone(),
                    unified: report.unified,
                },
                diagnostics: Diagnostics {
                    divergence: report.summary,
                    matcher: match_set.stats,
                    primary_match: primary.map(|m| PrimaryMatch {
                        start_timestamp_ms: m.window.start_timestamp_ms,
                        end_timestamp_ms: m.window.end_timestamp_ms,
                        distance: m.distance,
                    }),
                },
                scenario: ScenarioBlock {
                    cases,
                    outcome_stats,
                    data_status,
                },
            })
        })
    }
}

/// Convenience wrapper with default settings and no staleness reference.
pub fn assemble_focus_pack(
    symbol: &str,
    horizon: Horizon,
    series: &PriceSeries,
) -> Result<FocusPack, InvalidInputError> {
    FocusPackAssembler::default().assemble(symbol, horizon, series)
}

fn overlay_match(m: &Match) -> OverlayMatch {
    OverlayMatch {
        rank: m.rank,
        start_timestamp_ms: m.window.start_timestamp_ms,
        end_timestamp_ms: m.window.end_timestamp_ms,
        distance: m.distance,
        weight: m.weight,
        window: m.window.normalized.clone(),
        forward: m.replay.rescaled(1.0).iter().map(|p| p - 1.0).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PriceLike;
    use crate::domain::Candle;
    use crate::models::{DataStatusValue, FallbackReason};
    use crate::utils::TimeUtils;

    fn wave(len: usize) -> PriceSeries {
        (0..len)
            .map(|i| {
                let x = i as f64;
                let close = 100.0 + (x * 0.21).sin() * 8.0 + (x * 0.047).cos() * 5.0 + x * 0.02;
                Candle::from_close(i as i64 * TimeUtils::MS_IN_D, close)
            })
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn empty_series_names_the_symbol() {
        let err = assemble_focus_pack("BTC", Horizon::D7, &PriceSeries::new(vec![])).unwrap_err();
        assert_eq!(err.kind, InvalidInputKind::EmptySeries);
        assert_eq!(err.symbol.as_deref(), Some("BTC"));
    }

    #[test]
    fn pack_sections_line_up() {
        let series = wave(800);
        let pack = assemble_focus_pack("ETH", Horizon::D14, &series).unwrap();

        assert_eq!(pack.meta.days, 14);
        assert_eq!(pack.meta.required_matches, 25);
        assert_eq!(pack.meta.candle_count, 800);
        assert_eq!(pack.forecast.bands.len(), 15);
        assert_eq!(pack.forecast.unified.synthetic_path.len(), 15);
        assert_eq!(pack.forecast.unified.synthetic_path[0], pack.meta.anchor_price.value());
        assert_eq!(pack.overlay.matches.len(), 25);
        assert_eq!(pack.overlay.current_window.len(), 30);
        assert_eq!(pack.overlay.matches[0].forward.len(), 15);
        assert_eq!(pack.scenario.outcome_stats.sample_size, 25);
        assert_eq!(pack.scenario.cases.len(), 3);
        assert!(pack.diagnostics.primary_match.is_some());
        assert!(pack.diagnostics.divergence.is_some());
    }

    #[test]
    fn stale_anchor_is_flagged_only_with_a_reference_time() {
        let series = wave(800);
        let last = series.last().unwrap().timestamp_ms;

        let fresh = FocusPackAssembler::default()
            .assemble("ETH", Horizon::D7, &series)
            .unwrap();
        assert_ne!(fresh.scenario.data_status.reason, Some(FallbackReason::StaleData));

        let stale = FocusPackAssembler::default()
            .as_of(last + 30 * TimeUtils::MS_IN_D)
            .assemble("ETH", Horizon::D7, &series)
            .unwrap();
        if fresh.scenario.data_status.is_real() {
            assert_eq!(stale.scenario.data_status.value, DataStatusValue::Fallback);
            assert_eq!(stale.scenario.data_status.reason, Some(FallbackReason::StaleData));
        }
    }

    #[test]
    fn earliest_representable_timestamps_are_accepted() {
        let series: PriceSeries = wave(800)
            .candles()
            .iter()
            .enumerate()
            .map(|(i, c)| Candle::from_close(i64::MIN + i as i64 * TimeUtils::MS_IN_D, c.close_price))
            .collect::<Vec<_>>()
            .into();

        let pack = FocusPackAssembler::default()
            .as_of(1_700_000_000_000)
            .assemble("X", Horizon::D7, &series)
            .unwrap();
        let fresh = assemble_focus_pack("X", Horizon::D7, &series).unwrap();
        if fresh.scenario.data_status.is_real() {
            assert_eq!(pack.scenario.data_status.reason, Some(FallbackReason::StaleData));
        }
        let last_day = pack.forecast.unified.entry_near_timestamp(i64::MAX).unwrap();
        assert_eq!(last_day.day, 7);
    }

    #[test]
    fn short_history_is_a_fallback_not_an_error() {
        let pack = assemble_focus_pack("SOL", Horizon::D30, &wave(40)).unwrap();
        assert_eq!(
            pack.scenario.data_status.reason,
            Some(FallbackReason::InsufficientHistory)
        );
        assert!(pack.overlay.matches.is_empty());
        assert!(pack.forecast.unified.replay_path.is_none());
        assert!(pack.forecast.bands.iter().all(|b| b.p10 == b.p90));
    }
}
