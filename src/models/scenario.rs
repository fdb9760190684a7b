use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::config::{DrawdownPct, Price, Prob, ReturnPct};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, Display)]
pub enum ScenarioLabel {
    Bear,
    Base,
    Bull,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioCase {
    pub label: ScenarioLabel,
    pub return_pct: ReturnPct,
    /// Always `current_price * (1 + return_pct)`.
    pub target_price: Price,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeStats {
    pub prob_up: Prob,
    #[serde(rename = "avgMaxDD")]
    pub avg_max_dd: DrawdownPct,
    pub tail_risk_p95: DrawdownPct,
    pub expected_return: ReturnPct,
    pub sample_size: usize,
}

impl OutcomeStats {
    pub fn empty() -> Self {
        Self {
            prob_up: Prob::new(0.0),
            avg_max_dd: DrawdownPct::new(0.0),
            tail_risk_p95: DrawdownPct::new(0.0),
            expected_return: ReturnPct::new(0.0),
            sample_size: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum DataStatusValue {
    #[serde(rename = "REAL")]
    #[strum(to_string = "REAL")]
    Real,
    #[serde(rename = "FALLBACK")]
    #[strum(to_string = "FALLBACK")]
    Fallback,
}

/// Fixed reason codes. Presentation layers map these to text; they never parse prose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum FallbackReason {
    InsufficientHistory,
    InsufficientMatches,
    HighDivergence,
    StaleData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataStatus {
    pub value: DataStatusValue,
    pub reason: Option<FallbackReason>,
}

impl DataStatus {
    pub fn real() -> Self {
        Self {
            value: DataStatusValue::Real,
            reason: None,
        }
    }

    pub fn fallback(reason: FallbackReason) -> Self {
        Self {
            value: DataStatusValue::Fallback,
            reason: Some(reason),
        }
    }

    pub fn is_real(&self) -> bool {
        self.value == DataStatusValue::Real
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_to_fixed_codes() {
        let json = serde_json::to_string(&DataStatus::fallback(FallbackReason::InsufficientMatches)).unwrap();
        assert_eq!(json, r#"{"value":"FALLBACK","reason":"insufficient-matches"}"#);
        let json = serde_json::to_string(&DataStatus::real()).unwrap();
        assert_eq!(json, r#"{"value":"REAL","reason":null}"#);
        assert_eq!(FallbackReason::StaleData.to_string(), "stale-data");
    }
}
