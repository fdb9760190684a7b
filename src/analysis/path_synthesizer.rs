use crate::config::BandQuantiles;
use crate::models::{BandPoint, Match, SyntheticPath};
use crate::utils::weighted_percentiles;

pub struct PathSynthesizer;

impl PathSynthesizer {
    /// Builds the weighted band path for days 0..=days.
    ///
    /// Each match contributes its implied price (its historical move applied to
    /// `current_price`) with its similarity weight. Day 0 is pinned to the current
    /// price. With no matches every day collapses onto the current price.
    pub fn synthesize(
        matches: &[Match],
        current_price: f64,
        days: usize,
        quantiles: &BandQuantiles,
    ) -> SyntheticPath {
        let qs = quantiles.as_array();

        let points = (0..=days)
            .map(|day| {
                if day == 0 {
                    return BandPoint::flat(0, current_price);
                }
                let samples: Vec<(f64, f64)> = matches
                    .iter()
                    .filter_map(|m| {
                        m.replay
                            .implied_price(current_price, day)
                            .map(|price| (price, m.weight.value()))
                    })
                    .collect();

                match weighted_percentiles(&samples, &qs) {
                    Some(p) => BandPoint {
                        day,
                        p10: p[0],
                        p50: p[1],
                        p90: p[2],
                    },
                    None => BandPoint::flat(day, current_price),
                }
            })
            .collect();

        SyntheticPath { points }
    }
}
