use serde::{Deserialize, Serialize};

use crate::config::{DrawdownPct, ReturnPct, Weight};
use crate::utils::max_drawdown;

/// A fixed-length slice of history, normalized to percent change from its first close.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternWindow {
    pub start_idx: usize,
    /// Inclusive. The forward path starts on the candle after this one.
    pub end_idx: usize,
    pub start_timestamp_ms: i64,
    pub end_timestamp_ms: i64,
    pub normalized: Vec<f64>,
}

impl PatternWindow {
    pub fn len(&self) -> usize {
        self.normalized.len()
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }
}

/// Matcher output for one historical window: where it is and how close it looked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowMatch {
    pub window: PatternWindow,
    pub distance: f64,
    pub weight: Weight,
}

/// Bookkeeping from one matcher pass. Feeds the classifier and the diagnostics block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchStats {
    pub required_matches: usize,
    /// Lookback actually used for the query window (shorter than the horizon's when history is thin).
    pub effective_lookback: usize,
    /// Every window on the scan grid whose forward path fits inside the history.
    pub valid_windows: usize,
    /// Windows actually scored (valid windows after the scan cap).
    pub scanned_windows: usize,
    pub scan_capped: bool,
    pub insufficient_history: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSet {
    pub query: PatternWindow,
    /// Best first, at most `required_matches` long.
    pub matches: Vec<WindowMatch>,
    pub stats: MatchStats,
}

impl MatchSet {
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathPoint {
    pub day: usize,
    pub timestamp_ms: i64,
    pub price: f64,
}

/// The literal closes that followed a matched window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayPath {
    /// Close of the matched window's last candle (day 0 of the historical outcome).
    pub entry_price: f64,
    pub entry_timestamp_ms: i64,
    /// Days 1..=days(h), unmodified historical closes.
    pub points: Vec<PathPoint>,
}

impl ReplayPath {
    pub fn days(&self) -> usize {
        self.points.len()
    }

    /// Historical price on `day` (day 0 is the entry close).
    pub fn price_on_day(&self, day: usize) -> Option<f64> {
        if day == 0 {
            return Some(self.entry_price);
        }
        self.points.get(day - 1).map(|p| p.price)
    }

    /// Historical move on `day` projected onto `anchor`. Day 0 is exactly `anchor`.
    pub fn implied_price(&self, anchor: f64, day: usize) -> Option<f64> {
        if day == 0 {
            return Some(anchor);
        }
        let price = self.price_on_day(day)?;
        Some(anchor * (price / self.entry_price))
    }

    /// Whole path projected onto `anchor`, days 0..=days().
    pub fn rescaled(&self, anchor: f64) -> Vec<f64> {
        (0..=self.days())
            .filter_map(|day| self.implied_price(anchor, day))
            .collect()
    }

    pub fn end_return(&self) -> ReturnPct {
        let end = self.points.last().map_or(self.entry_price, |p| p.price);
        ReturnPct::between(end, self.entry_price)
    }

    /// Worst peak-to-trough decline from the entry close through the last replayed day.
    pub fn max_drawdown(&self) -> DrawdownPct {
        let path = std::iter::once(self.entry_price).chain(self.points.iter().map(|p| p.price));
        DrawdownPct::new(max_drawdown(path))
    }
}

/// A ranked historical analog together with its realized outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    /// 1-based, 1 = smallest distance.
    pub rank: usize,
    pub window: PatternWindow,
    pub distance: f64,
    pub weight: Weight,
    pub replay: ReplayPath,
}
