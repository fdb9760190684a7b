use rayon::prelude::*;
use strum::IntoEnumIterator;

use crate::domain::{Horizon, InvalidInputError, PriceSeries};
use crate::engine::FocusPackAssembler;
use crate::models::FocusPack;
use crate::utils::AppInstant;

/// One FocusPack per horizon, shortest horizon first.
///
/// Horizons are independent, so they run in parallel. The first hard error wins
/// and no partial result is returned.
pub fn assemble_all_horizons(
    assembler: &FocusPackAssembler,
    symbol: &str,
    series: &PriceSeries,
) -> Result<Vec<FocusPack>, InvalidInputError> {
    assemble_horizons(assembler, symbol, series, &Horizon::iter().collect::<Vec<_>>())
}

pub fn assemble_horizons(
    assembler: &FocusPackAssembler,
    symbol: &str,
    series: &PriceSeries,
    horizons: &[Horizon],
) -> Result<Vec<FocusPack>, InvalidInputError> {
    // Fail fast once, instead of once per horizon.
    series
        .validate(assembler.settings.min_lookback)
        .map_err(|e| e.with_symbol(symbol))?;

    let start = AppInstant::now();
    let packs = horizons
        .par_iter()
        .map(|&horizon| assembler.assemble(symbol, horizon, series))
        .collect::<Result<Vec<_>, _>>()?;

    log::info!(
        "{}: {} horizons over {} candles in {}ms",
        symbol,
        packs.len(),
        series.len(),
        start.elapsed().as_millis()
    );

    Ok(packs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Candle, InvalidInputKind};
    use crate::utils::TimeUtils;

    fn series(len: usize) -> PriceSeries {
        (0..len)
            .map(|i| {
                let x = i as f64;
                Candle::from_close(i as i64 * TimeUtils::MS_IN_D, 200.0 + (x * 0.13).sin() * 20.0)
            })
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn one_pack_per_horizon_in_table_order() {
        let packs = assemble_all_horizons(&FocusPackAssembler::default(), "BTC", &series(1_200)).unwrap();
        let horizons: Vec<Horizon> = packs.iter().map(|p| p.meta.horizon).collect();
        assert_eq!(horizons, Horizon::iter().collect::<Vec<_>>());
    }

    #[test]
    fn bad_input_fails_the_whole_batch() {
        let mut candles = series(100).candles().to_vec();
        candles[40].close_price = -1.0;
        let err = assemble_all_horizons(&FocusPackAssembler::default(), "BTC", &PriceSeries::new(candles))
            .unwrap_err();
        assert_eq!(err.kind, InvalidInputKind::NonPositivePrice { index: 40 });
        assert_eq!(err.symbol.as_deref(), Some("BTC"));
    }
}
