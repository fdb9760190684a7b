use crate::domain::PriceSeries;
use crate::models::{Match, PathPoint, ReplayPath, WindowMatch};

pub struct PathReplayer;

impl PathReplayer {
    /// Reads the `days` closes right after the matched window. Literal history, no rescaling.
    pub fn replay(series: &PriceSeries, window_match: &WindowMatch, days: usize) -> ReplayPath {
        let candles = series.candles();
        let end = window_match.window.end_idx;
        let entry = &candles[end];

        let points = candles
            .iter()
            .skip(end + 1)
            .take(days)
            .enumerate()
            .map(|(i, c)| PathPoint {
                day: i + 1,
                timestamp_ms: c.timestamp_ms,
                price: c.close_price,
            })
            .collect();

        ReplayPath {
            entry_price: entry.close_price,
            entry_timestamp_ms: entry.timestamp_ms,
            points,
        }
    }

    /// Attaches realized outcomes to ranked matches, keeping their order.
    pub fn replay_all(series: &PriceSeries, matches: &[WindowMatch], days: usize) -> Vec<Match> {
        matches
            .iter()
            .enumerate()
            .map(|(i, m)| Match {
                rank: i + 1,
                window: m.window.clone(),
                distance: m.distance,
                weight: m.weight,
                replay: Self::replay(series, m, days),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Weight;
    use crate::domain::Candle;
    use crate::models::PatternWindow;

    fn window_match(end_idx: usize) -> WindowMatch {
        WindowMatch {
            window: PatternWindow {
                start_idx: end_idx - 2,
                end_idx,
                start_timestamp_ms: 0,
                end_timestamp_ms: 0,
                normalized: vec![0.0; 3],
            },
            distance: 0.5,
            weight: Weight::new(1.0),
        }
    }

    #[test]
    fn replays_literal_closes_after_the_window() {
        let series = PriceSeries::new(
            (0..10)
                .map(|i| Candle::from_close(i * 100, 10.0 + i as f64))
                .collect(),
        );
        let replay = PathReplayer::replay(&series, &window_match(4), 3);
        assert_eq!(replay.entry_price, 14.0);
        assert_eq!(replay.entry_timestamp_ms, 400);
        let prices: Vec<f64> = replay.points.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![15.0, 16.0, 17.0]);
        assert_eq!(replay.points[0].day, 1);
        assert_eq!(replay.points[2].timestamp_ms, 700);
    }

    #[test]
    fn ranks_follow_input_order() {
        let series = PriceSeries::new((0..10).map(|i| Candle::from_close(i, 1.0)).collect());
        let matches = PathReplayer::replay_all(&series, &[window_match(5), window_match(3)], 2);
        assert_eq!(matches[0].rank, 1);
        assert_eq!(matches[1].rank, 2);
        assert_eq!(matches[1].window.end_idx, 3);
        assert_eq!(matches[1].replay.days(), 2);
    }
}
