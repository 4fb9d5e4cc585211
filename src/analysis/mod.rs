// Pure signal engine: detectors, indicators, fusion and aggregation
pub mod fakeout;
pub mod indicator_panel;
pub mod indicators;
pub mod market_structure;
pub mod multi_timeframe;
pub mod news_sentiment;
pub mod risk;
pub mod signal_fusion;
pub mod swing_points;
pub mod volume_behavior;

#[cfg(test)]
pub mod fixtures;

// Re-export commonly used types
pub use multi_timeframe::{aggregate_signals, analyze_multi_timeframe};
pub use news_sentiment::summarize_headlines;
pub use risk::{RiskLevels, size_position};
pub use signal_fusion::generate_trading_signal;
