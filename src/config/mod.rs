//! Configuration module for the forecast engine.

mod debug;
mod forecast;
mod types;

// Public
pub mod constants;

// Re-export commonly used items
pub use debug::DF;
pub use forecast::{BandQuantiles, FORECAST, ForecastSettings};
pub use types::{DrawdownPct, Price, PriceLike, Prob, ReturnPct, Weight};
