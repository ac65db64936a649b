// Domain types and value objects
mod candle;
mod macro_reading;
mod price_series;

// Re-export commonly used types to the world
pub use candle::Bar;
pub use macro_reading::{MacroReading, MacroSnapshot, SeriesTrend};
pub use price_series::PriceSeries;
