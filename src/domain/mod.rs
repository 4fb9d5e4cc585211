// Domain types and value objects
pub mod candle;
pub mod candle_set;
pub mod signal;
pub mod timeframe;

// Re-export commonly used types
pub use candle::Candle;
pub use candle_set::CandleSet;
pub use signal::{Signal, Trend};
pub use timeframe::Timeframe;
