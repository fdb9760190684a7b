//! Human-readable rendering of finished packs (the CLI's `--format table`).

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{FocusPack, ScenarioLabel};
use crate::utils::epoch_ms_to_utc;

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Horizon")]
    horizon: String,
    #[tabled(rename = "Matches")]
    matches: String,
    #[tabled(rename = "Bear")]
    bear: String,
    #[tabled(rename = "Base")]
    base: String,
    #[tabled(rename = "Bull")]
    bull: String,
    #[tabled(rename = "P(up)")]
    prob_up: String,
    #[tabled(rename = "Avg DD")]
    avg_dd: String,
    #[tabled(rename = "Tail p95")]
    tail: String,
    #[tabled(rename = "Divergence")]
    divergence: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl SummaryRow {
    fn from_pack(pack: &FocusPack) -> Self {
        let case = |label: ScenarioLabel| {
            pack.scenario
                .cases
                .iter()
                .find(|c| c.label == label)
                .map_or("-".to_string(), |c| format!("{} ({})", c.target_price, c.return_pct))
        };
        let stats = &pack.scenario.outcome_stats;
        let status = &pack.scenario.data_status;

        Self {
            horizon: pack.meta.horizon.to_string(),
            matches: format!("{}/{}", stats.sample_size, pack.meta.required_matches),
            bear: case(ScenarioLabel::Bear),
            base: case(ScenarioLabel::Base),
            bull: case(ScenarioLabel::Bull),
            prob_up: stats.prob_up.to_string(),
            avg_dd: stats.avg_max_dd.to_string(),
            tail: stats.tail_risk_p95.to_string(),
            divergence: pack
                .diagnostics
                .divergence
                .as_ref()
                .map_or("-".to_string(), |d| format!("{:.1}%", d.mean_divergence * 100.0)),
            status: match status.reason {
                Some(reason) => format!("{} ({})", status.value, reason),
                None => status.value.to_string(),
            },
        }
    }
}

/// One row per pack, headed by the symbol and anchor.
pub fn summary_table(packs: &[FocusPack]) -> String {
    let Some(first) = packs.first() else {
        return String::new();
    };

    let header = format!(
        "{} @ {} (anchor {}, {} candles)",
        first.meta.symbol,
        first.meta.anchor_price,
        epoch_ms_to_utc(first.meta.anchor_timestamp_ms),
        first.meta.candle_count,
    );

    let rows: Vec<SummaryRow> = packs.iter().map(SummaryRow::from_pack).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());

    format!("{}\n{}", header, table)
}

/// A single pack serializes as an object, several as an array.
pub fn to_json(packs: &[FocusPack], pretty: bool) -> serde_json::Result<String> {
    match (packs, pretty) {
        ([single], true) => serde_json::to_string_pretty(single),
        ([single], false) => serde_json::to_string(single),
        (many, true) => serde_json::to_string_pretty(many),
        (many, false) => serde_json::to_string(many),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Candle, Horizon, PriceSeries};
    use crate::engine::assemble_focus_pack;
    use crate::utils::TimeUtils;

    fn pack() -> FocusPack {
        let series: PriceSeries = (0..400)
            .map(|i| {
                let x = i as f64;
                Candle::from_close(i as i64 * TimeUtils::MS_IN_D, 68_000.0 + (x * 0.3).sin() * 900.0)
            })
            .collect::<Vec<_>>()
            .into();
        assemble_focus_pack("BTC", Horizon::D7, &series).unwrap()
    }

    #[test]
    fn table_has_header_and_one_row_per_pack() {
        let p = pack();
        let table = summary_table(&[p.clone(), p]);
        assert!(table.starts_with("BTC @ $"));
        assert!(table.contains("Horizon"));
        assert_eq!(table.matches("7d").count(), 2);
        assert!(summary_table(&[]).is_empty());
    }

    #[test]
    fn single_pack_json_is_an_object() {
        let p = pack();
        assert!(to_json(std::slice::from_ref(&p), false).unwrap().starts_with('{'));
        assert!(to_json(&[p.clone(), p], false).unwrap().starts_with('['));
    }
}
