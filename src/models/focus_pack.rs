use serde::{Deserialize, Serialize};

use crate::config::{Price, Weight};
use crate::domain::{Horizon, RenderBucket};
use crate::models::{
    BandPoint, DataStatus, DivergenceSummary, MatchStats, OutcomeStats, ScenarioCase, UnifiedPath,
};

/// The forecast artifact for one `(symbol, horizon)` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusPack {
    pub meta: FocusMeta,
    pub overlay: Overlay,
    pub forecast: Forecast,
    pub diagnostics: Diagnostics,
    pub scenario: ScenarioBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusMeta {
    pub symbol: String,
    pub horizon: Horizon,
    pub days: usize,
    pub required_matches: usize,
    pub lookback: usize,
    pub render_bucket: RenderBucket,
    pub anchor_price: Price,
    pub anchor_timestamp_ms: i64,
    pub candle_count: usize,
    /// Fingerprint of the input candles, for external cache keys.
    pub data_version: String,
}

/// Normalized series for charting the query against its analogs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overlay {
    /// Query window as percent change from its first close.
    pub current_window: Vec<f64>,
    pub matches: Vec<OverlayMatch>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayMatch {
    pub rank: usize,
    pub start_timestamp_ms: i64,
    pub end_timestamp_ms: i64,
    pub distance: f64,
    pub weight: Weight,
    pub window: Vec<f64>,
    /// Return from the window's last close, days 0..=days(h).
    pub forward: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    pub unified: UnifiedPath,
    pub bands: Vec<BandPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    pub divergence: Option<DivergenceSummary>,
    pub matcher: MatchStats,
    pub primary_match: Option<PrimaryMatch>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryMatch {
    pub start_timestamp_ms: i64,
    pub end_timestamp_ms: i64,
    pub distance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioBlock {
    pub cases: Vec<ScenarioCase>,
    pub outcome_stats: OutcomeStats,
    pub data_status: DataStatus,
}
