use std::sync::Arc;

use crate::domain::CandleSet;
use crate::models::MultiTimeframeAnalysis;

/// A request to analyse one instrument across all timeframes
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub symbol: String,
    pub company_name: Option<String>,
    // Latest known price; the series' last close can be stale
    pub current_price: Option<f64>,
    // Shared immutable candle data
    pub candles: Arc<CandleSet>,
}

impl AnalysisRequest {
    pub fn new(symbol: &str, candles: CandleSet) -> Self {
        Self {
            symbol: symbol.to_string(),
            company_name: None,
            current_price: None,
            candles: Arc::new(candles),
        }
    }

    /// Explicit usable price, else the latest close on the finest timeframe, else 0
    pub fn resolved_price(&self) -> f64 {
        self.current_price
            .filter(|p| p.is_finite() && *p > 0.0)
            .or_else(|| self.candles.latest_close())
            .unwrap_or(0.0)
    }
}

/// The result handed back for a request
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub symbol: String,
    // Which sentiment source answered, None when the analysis ran without news
    pub news_source: Option<&'static str>,
    pub duration_ms: u128,
    pub analysis: MultiTimeframeAnalysis,
}
