use std::sync::Arc;
use std::time::{Duration, Instant};

use strum::IntoEnumIterator;

use crate::analysis::multi_timeframe::{analysis_from_signals, analyze_multi_timeframe};
use crate::config::NEWS;
use crate::data::sentiment_source::{SentimentSource, get_sentiment_async};
use crate::domain::Timeframe;
use crate::models::{MultiTimeframeAnalysis, NewsSentimentSummary, TradingSignal};

use super::messages::{AnalysisRequest, AnalysisReport};

pub struct SignalEngine {
    /// Sentiment sources, tried in order
    sources: Vec<Box<dyn SentimentSource>>,

    /// Upper bound on the whole sentiment fetch
    news_timeout: Duration,
}

impl Default for SignalEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalEngine {
    /// An engine without news: every analysis is technical only
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            news_timeout: Duration::from_millis(NEWS.fetch_timeout_ms),
        }
    }

    pub fn with_source(mut self, source: Box<dyn SentimentSource>) -> Self {
        self.sources.push(source);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.news_timeout = timeout;
        self
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Sentiment for `symbol`, or None. Failures and timeouts are logged and swallowed.
    pub async fn fetch_news(
        &self,
        symbol: &str,
        company_name: Option<&str>,
    ) -> Option<(NewsSentimentSummary, &'static str)> {
        if self.sources.is_empty() {
            return None;
        }
        let fetch = get_sentiment_async(&self.sources, symbol, company_name);
        match tokio::time::timeout(self.news_timeout, fetch).await {
            Ok(Ok(found)) => Some(found),
            Ok(Err(e)) => {
                log::warn!("⚠️  {}: no news ({:#})", symbol, e);
                None
            }
            Err(_) => {
                log::warn!(
                    "⚠️  {}: no news (sentiment fetch timed out after {} ms)",
                    symbol,
                    self.news_timeout.as_millis()
                );
                None
            }
        }
    }

    /// Fetch news once, then run the multi-timeframe analysis off the async threads.
    /// Always produces a report.
    pub async fn analyze(&self, request: AnalysisRequest) -> AnalysisReport {
        let start = Instant::now();
        let price = request.resolved_price();

        let fetched = self
            .fetch_news(&request.symbol, request.company_name.as_deref())
            .await;
        let (news, news_source) = match fetched {
            Some((summary, source)) => (Some(summary), Some(source)),
            None => (None, None),
        };

        let candles = Arc::clone(&request.candles);
        let analysis = match tokio::task::spawn_blocking(move || {
            analyze_multi_timeframe(&candles, price, news.as_ref())
        })
        .await
        {
            Ok(analysis) => analysis,
            Err(e) => {
                log::error!("{}: analysis task failed: {}", request.symbol, e);
                placeholder_analysis(price)
            }
        };

        let duration_ms = start.elapsed().as_millis();
        log::info!(
            "✅ {}: {} ({}%) in {} ms, news from {}",
            request.symbol,
            analysis.overall_signal,
            analysis.confidence,
            duration_ms,
            news_source.unwrap_or("nowhere")
        );

        AnalysisReport {
            symbol: request.symbol,
            news_source,
            duration_ms,
            analysis,
        }
    }
}

fn placeholder_analysis(price: f64) -> MultiTimeframeAnalysis {
    analysis_from_signals(
        Timeframe::iter()
            .map(|tf| TradingSignal::no_data(tf, price))
            .collect(),
    )
}
