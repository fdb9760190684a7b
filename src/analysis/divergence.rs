use argminmax::ArgMinMax;
use statrs::statistics::Statistics;

use crate::models::{DivergenceSummary, Match, SyntheticPath, UnifiedPath};

/// Unified path plus how far its two lines drift apart.
#[derive(Debug, Clone, PartialEq)]
pub struct DivergenceReport {
    pub unified: UnifiedPath,
    /// None when there is no primary match to compare against.
    pub summary: Option<DivergenceSummary>,
}

pub struct DivergenceAnalyzer;

impl DivergenceAnalyzer {
    /// Projects the best match onto the anchor and measures it against the synthetic p50.
    ///
    /// Divergence on day d is |replay(d) - p50(d)| / p50(d). Summary statistics cover
    /// days 1..=days; day 0 is identical on both lines by construction.
    pub fn analyze(
        synthetic: &SyntheticPath,
        primary: Option<&Match>,
        anchor_price: f64,
        anchor_timestamp_ms: i64,
    ) -> DivergenceReport {
        let synthetic_path = synthetic.p50_path();
        let replay_path = primary.map(|m| m.replay.rescaled(anchor_price));

        let summary = replay_path
            .as_deref()
            .and_then(|replay| summarize(&synthetic_path, replay));

        DivergenceReport {
            unified: UnifiedPath {
                anchor_price,
                anchor_timestamp_ms,
                synthetic_path,
                replay_path,
                p10_path: synthetic.p10_path(),
                p90_path: synthetic.p90_path(),
            },
            summary,
        }
    }
}

fn summarize(synthetic: &[f64], replay: &[f64]) -> Option<DivergenceSummary> {
    let per_day: Vec<f64> = synthetic
        .iter()
        .zip(replay)
        .enumerate()
        .map(|(day, (&s, &r))| {
            if day == 0 || s <= f64::EPSILON {
                0.0
            } else {
                (r - s).abs() / s
            }
        })
        .collect();

    let forward = per_day.get(1..).filter(|days| !days.is_empty())?;

    let max_divergence = Statistics::max(forward.iter());
    let mean_divergence = Statistics::mean(forward.iter());
    let peak_day = forward.argmax() + 1;
    let final_day_divergence = *forward.last()?;

    Some(DivergenceSummary {
        max_divergence,
        mean_divergence,
        final_day_divergence,
        peak_day,
        per_day,
    })
}
