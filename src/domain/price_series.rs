use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Candle, InvalidInputError, InvalidInputKind};

/// Ordered candle history supplied by the caller. The engine only ever borrows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceSeries {
    candles: Vec<Candle>,
}

impl PriceSeries {
    pub fn new(candles: Vec<Candle>) -> Self {
        Self { candles }
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    /// Close of the most recent candle: the anchor every forecast is projected from.
    pub fn current_price(&self) -> Option<f64> {
        self.last().map(|c| c.close_price)
    }

    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close_price).collect()
    }

    /// Hard checks run before any forecast work. Soft problems (thin history,
    /// few matches) are left to the data-quality classifier.
    pub fn validate(&self, min_lookback: usize) -> Result<(), InvalidInputError> {
        if self.candles.is_empty() {
            return Err(InvalidInputKind::EmptySeries.into());
        }

        if self.candles.len() < min_lookback {
            return Err(InvalidInputKind::SeriesTooShort {
                len: self.candles.len(),
                min: min_lookback,
            }
            .into());
        }

        if let Some(index) = self
            .candles
            .iter()
            .position(|c| !c.close_price.is_finite() || c.close_price <= 0.0)
        {
            return Err(InvalidInputKind::NonPositivePrice { index }.into());
        }

        if let Some(index) = self
            .candles
            .windows(2)
            .position(|pair| pair[1].timestamp_ms <= pair[0].timestamp_ms)
        {
            return Err(InvalidInputKind::UnorderedTimestamps { index: index + 1 }.into());
        }

        Ok(())
    }

    /// Deterministic fingerprint of the candle contents.
    /// External caches key on `(symbol, horizon, data_version)`.
    pub fn data_version(&self) -> Uuid {
        let mut bytes = Vec::with_capacity(self.candles.len() * 40);
        for c in &self.candles {
            bytes.extend_from_slice(&c.timestamp_ms.to_le_bytes());
            for price in [c.open_price, c.high_price, c.low_price, c.close_price] {
                bytes.extend_from_slice(&price.to_bits().to_le_bytes());
            }
        }
        Uuid::new_v5(&Uuid::NAMESPACE_OID, &bytes)
    }
}

impl From<Vec<Candle>> for PriceSeries {
    fn from(candles: Vec<Candle>) -> Self {
        Self::new(candles)
    }
}
