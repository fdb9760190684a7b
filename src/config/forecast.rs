//! Forecast computation configuration

use serde::{Deserialize, Serialize};

use crate::config::constants::{bands, matcher, quality};

/// Quantiles used for the lower band, the central path and the upper band.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BandQuantiles {
    pub low: f64,
    pub mid: f64,
    pub high: f64,
}

impl BandQuantiles {
    pub fn as_array(&self) -> [f64; 3] {
        [self.low, self.mid, self.high]
    }
}

/// The Master Forecast Configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastSettings {
    /// Series shorter than this (in candles) are rejected as caller bugs.
    pub min_lookback: usize,
    pub max_scan_windows: usize,
    pub distance_epsilon: f64,

    pub bands: BandQuantiles,
    pub tail_risk_quantile: f64,

    pub high_divergence_threshold: f64,
    pub staleness_window_ms: i64,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        FORECAST
    }
}

pub const FORECAST: ForecastSettings = ForecastSettings {
    min_lookback: matcher::MIN_LOOKBACK,
    max_scan_windows: matcher::MAX_SCAN_WINDOWS,
    distance_epsilon: matcher::DISTANCE_EPSILON,

    bands: bands::DEFAULT,
    tail_risk_quantile: bands::TAIL_RISK,

    high_divergence_threshold: quality::HIGH_DIVERGENCE_THRESHOLD,
    staleness_window_ms: quality::STALENESS_WINDOW_MS,
};
