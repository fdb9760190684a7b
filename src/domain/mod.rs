// Domain types and value objects
mod candle;
mod horizon;
mod invalid_input;
mod price_series;

// Re-export commonly used types to the world
pub use candle::Candle;
pub use horizon::{Horizon, HorizonSpec, RenderBucket};
pub use invalid_input::{InvalidInputError, InvalidInputKind};
pub use price_series::PriceSeries;
