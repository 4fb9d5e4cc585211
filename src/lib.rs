#![allow(clippy::const_is_empty)]
#![allow(clippy::collapsible_if)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod models;
pub mod utils;

// Re-export commonly used types
pub use analysis::{analyze_multi_timeframe, generate_trading_signal, summarize_headlines};
pub use domain::{Candle, CandleSet, Signal, Timeframe, Trend};
pub use engine::{AnalysisReport, AnalysisRequest, SignalEngine};
pub use models::{MultiTimeframeAnalysis, NewsSentimentSummary, TradingSignal};

use std::path::PathBuf;

// CLI argument parsing
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Candle set file: timeframe label -> candles (.json, .bin or .bincode)
    #[arg(long)]
    pub candles: PathBuf,

    /// Instrument symbol, e.g. TCS.NS
    #[arg(long)]
    pub symbol: String,

    /// Company name, used to judge headline relevance
    #[arg(long)]
    pub name: Option<String>,

    /// Latest price (defaults to the last close of the finest timeframe available)
    #[arg(long)]
    pub price: Option<f64>,

    /// Precomputed news sentiment summary (JSON)
    #[arg(long)]
    pub news: Option<PathBuf>,

    /// Headline list (JSON) to score into a sentiment summary
    #[arg(long)]
    pub headlines: Option<PathBuf>,

    /// Upper bound on the sentiment fetch
    #[arg(long, default_value_t = config::NEWS.fetch_timeout_ms)]
    pub news_timeout_ms: u64,

    /// Pretty-print the JSON output
    #[arg(long, default_value_t = false)]
    pub pretty: bool,
}

impl Cli {
    /// Engine with the sentiment sources the flags ask for: summary file first, then headlines
    pub fn build_engine(&self) -> SignalEngine {
        let mut engine = SignalEngine::new()
            .with_timeout(std::time::Duration::from_millis(self.news_timeout_ms));
        if let Some(path) = &self.news {
            engine = engine.with_source(Box::new(data::SummaryFileSentiment { path: path.clone() }));
        }
        if let Some(path) = &self.headlines {
            engine = engine.with_source(Box::new(data::HeadlineFileSentiment { path: path.clone() }));
        }
        engine
    }

    pub fn request(&self, candles: CandleSet) -> AnalysisRequest {
        AnalysisRequest {
            symbol: self.symbol.clone(),
            company_name: self.name.clone(),
            current_price: self.price,
            candles: std::sync::Arc::new(candles),
        }
    }
}
