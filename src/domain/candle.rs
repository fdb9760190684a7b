use serde::{Deserialize, Serialize};

/// One OHLC bar. Serialized with the compact `{t, o, h, l, c}` keys used on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    #[serde(rename = "t")]
    pub timestamp_ms: i64,

    #[serde(rename = "o")]
    pub open_price: f64,
    #[serde(rename = "h")]
    pub high_price: f64,
    #[serde(rename = "l")]
    pub low_price: f64,
    #[serde(rename = "c")]
    pub close_price: f64,
}

impl Candle {
    // A constructor for convenience
    pub fn new(timestamp_ms: i64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Candle {
            timestamp_ms,
            open_price: open,
            high_price: high,
            low_price: low,
            close_price: close,
        }
    }

    /// Daily bar where every price equals `close`. Handy when only closes are known.
    pub fn from_close(timestamp_ms: i64, close: f64) -> Self {
        Self::new(timestamp_ms, close, close, close, close)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_compact_wire_keys() {
        let json = r#"{"t":1700000000000,"o":1.0,"h":2.0,"l":0.5,"c":1.5}"#;
        let candle: Candle = serde_json::from_str(json).unwrap();
        assert_eq!(candle, Candle::new(1_700_000_000_000, 1.0, 2.0, 0.5, 1.5));
        assert_eq!(serde_json::to_string(&candle).unwrap(), json);
    }
}
