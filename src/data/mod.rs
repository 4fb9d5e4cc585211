// Input loading: candle files and sentiment sources
pub mod candle_file;
pub mod sentiment_source;

// Re-export commonly used types
pub use candle_file::{load_candle_set, load_candle_set_async, save_candle_set};
pub use sentiment_source::{
    HeadlineFileSentiment, SentimentSource, StaticSentiment, SummaryFileSentiment,
    get_sentiment_async,
};
