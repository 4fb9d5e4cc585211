// Result models produced by the analysis layer
pub mod indicators;
pub mod news;
pub mod patterns;
pub mod trading_signal;

// Re-export commonly used types
pub use indicators::{IndicatorPanel, IndicatorSnapshot, MacdReading};
pub use news::{Headline, ImpactLevel, NewsItem, NewsSentimentSummary, Sentiment, Tone};
pub use patterns::{
    Absorption, BosPattern, ChochPattern, Divergence, FakeoutKind, FakeoutSignal, VolumeAnalysis,
};
pub use trading_signal::{MultiTimeframeAnalysis, NO_CHART_DATA_REASON, TradingSignal};
