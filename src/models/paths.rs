use serde::{Deserialize, Serialize};

use crate::utils::TimeUtils;

/// Band estimate for one forward day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandPoint {
    pub day: usize,
    pub p10: f64,
    pub p50: f64,
    pub p90: f64,
}

impl BandPoint {
    /// Degenerate band where all three estimates sit on `price`.
    pub fn flat(day: usize, price: f64) -> Self {
        Self {
            day,
            p10: price,
            p50: price,
            p90: price,
        }
    }

    /// (p90 - p10) / p50. Zero when the centre is not positive.
    pub fn relative_spread(&self) -> f64 {
        if self.p50 > f64::EPSILON {
            (self.p90 - self.p10) / self.p50
        } else {
            0.0
        }
    }
}

/// Weighted statistical forward path, days 0..=days(h). Day 0 sits on the current price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyntheticPath {
    pub points: Vec<BandPoint>,
}

impl SyntheticPath {
    pub fn days(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// End-of-horizon band.
    pub fn end(&self) -> Option<&BandPoint> {
        self.points.last()
    }

    pub fn p10_path(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.p10).collect()
    }

    pub fn p50_path(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.p50).collect()
    }

    pub fn p90_path(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.p90).collect()
    }
}

/// Rendering-ready "two lines plus a band". Every array is indexed by forward day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedPath {
    pub anchor_price: f64,
    pub anchor_timestamp_ms: i64,
    pub synthetic_path: Vec<f64>,
    /// Best single analog, projected onto the anchor. None when nothing matched.
    pub replay_path: Option<Vec<f64>>,
    pub p10_path: Vec<f64>,
    pub p90_path: Vec<f64>,
}

/// One day of the unified path, as a hover/tooltip layer would read it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedPathEntry {
    pub day: usize,
    pub timestamp_ms: i64,
    pub synthetic: f64,
    pub replay: Option<f64>,
    pub p10: f64,
    pub p90: f64,
}

impl UnifiedPath {
    pub fn days(&self) -> usize {
        self.synthetic_path.len().saturating_sub(1)
    }

    pub fn timestamp_for_day(&self, day: usize) -> i64 {
        let offset = i64::try_from(day)
            .unwrap_or(i64::MAX)
            .saturating_mul(TimeUtils::MS_IN_D);
        self.anchor_timestamp_ms.saturating_add(offset)
    }

    pub fn entry_at(&self, day: usize) -> Option<UnifiedPathEntry> {
        let synthetic = *self.synthetic_path.get(day)?;
        Some(UnifiedPathEntry {
            day,
            timestamp_ms: self.timestamp_for_day(day),
            synthetic,
            replay: self
                .replay_path
                .as_ref()
                .and_then(|path| path.get(day).copied()),
            p10: *self.p10_path.get(day)?,
            p90: *self.p90_path.get(day)?,
        })
    }

    /// Nearest forward day to `timestamp_ms`, clamped to the path.
    pub fn entry_near_timestamp(&self, timestamp_ms: i64) -> Option<UnifiedPathEntry> {
        if self.synthetic_path.is_empty() {
            return None;
        }
        let offset = timestamp_ms.saturating_sub(self.anchor_timestamp_ms).max(0) as f64;
        let day = (offset / TimeUtils::MS_IN_D as f64).round() as usize;
        self.entry_at(day.min(self.days()))
    }
}

/// How far the best single analog strays from the synthetic centre line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DivergenceSummary {
    pub max_divergence: f64,
    pub mean_divergence: f64,
    pub final_day_divergence: f64,
    pub peak_day: usize,
    /// Day-indexed |replay - synthetic| / synthetic, day 0 included (always 0).
    pub per_day: Vec<f64>,
}
