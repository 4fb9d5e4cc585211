use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::analysis::news_sentiment::summarize_headlines;
use crate::models::{Headline, NewsSentimentSummary};

#[async_trait]
pub trait SentimentSource: Send + Sync {
    // Either produce a sentiment summary for the instrument OR return an anyhow::error
    async fn fetch_sentiment(
        &self,
        symbol: &str,
        company_name: Option<&str>,
    ) -> Result<NewsSentimentSummary>;

    /// A unique identifier for this source (so that afterwards we know which one was used).
    fn signature(&self) -> &'static str;
}

/// Try each source in order and return the first summary that succeeds
pub async fn get_sentiment_async(
    sources: &[Box<dyn SentimentSource>],
    symbol: &str,
    company_name: Option<&str>,
) -> Result<(NewsSentimentSummary, &'static str)> {
    for source in sources {
        match source.fetch_sentiment(symbol, company_name).await {
            Ok(summary) => {
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_news_scoring {
                    log::debug!(
                        "{}: {} sentiment ({:.1}) from {}",
                        symbol,
                        summary.overall_sentiment,
                        summary.sentiment_score,
                        source.signature()
                    );
                }
                return Ok((summary, source.signature()));
            }
            Err(e) => {
                log::info!("Sentiment source '{}' failed: {:#}", source.signature(), e);
            }
        }
    }
    Err(anyhow!("All sentiment sources failed for {}", symbol))
}

/// A fixed summary, e.g. one computed by the caller
pub struct StaticSentiment {
    pub summary: NewsSentimentSummary,
}

#[async_trait]
impl SentimentSource for StaticSentiment {
    fn signature(&self) -> &'static str {
        "Static Summary"
    }

    async fn fetch_sentiment(
        &self,
        _symbol: &str,
        _company_name: Option<&str>,
    ) -> Result<NewsSentimentSummary> {
        Ok(self.summary.clone())
    }
}

/// A precomputed `NewsSentimentSummary` stored as JSON
pub struct SummaryFileSentiment {
    pub path: PathBuf,
}

#[async_trait]
impl SentimentSource for SummaryFileSentiment {
    fn signature(&self) -> &'static str {
        "Summary File"
    }

    async fn fetch_sentiment(
        &self,
        _symbol: &str,
        _company_name: Option<&str>,
    ) -> Result<NewsSentimentSummary> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .context(format!("Failed to read sentiment file: {:?}", self.path))?;
        serde_json::from_str(&text)
            .context(format!("Failed to parse sentiment summary: {:?}", self.path))
    }
}

/// A JSON list of headlines, keyword-scored for the requested instrument
pub struct HeadlineFileSentiment {
    pub path: PathBuf,
}

#[async_trait]
impl SentimentSource for HeadlineFileSentiment {
    fn signature(&self) -> &'static str {
        "Headline File"
    }

    async fn fetch_sentiment(
        &self,
        symbol: &str,
        company_name: Option<&str>,
    ) -> Result<NewsSentimentSummary> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .context(format!("Failed to read headlines file: {:?}", self.path))?;
        let headlines: Vec<Headline> = serde_json::from_str(&text)
            .context(format!("Failed to parse headlines: {:?}", self.path))?;
        Ok(summarize_headlines(symbol, company_name, &headlines))
    }
}
