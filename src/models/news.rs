use serde::{Deserialize, Serialize};
use strum_macros::Display;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Sentiment {
    Bullish,
    Bearish,
    #[default]
    Neutral,
}

/// Ordered low < medium < high so the strongest present level is a `max`.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ImpactLevel {
    #[default]
    Low,
    Medium,
    High,
}

/// Tone of a single headline, or the directional bias of a summary.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Tone {
    Positive,
    Negative,
    #[default]
    Neutral,
}

/// A headline as handed to us by whatever retrieved it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Headline {
    pub title: String,
    pub description: String,
    pub link: String,
    pub pub_date: String,
    pub source: String,
}

impl Headline {
    pub fn new(title: &str, description: &str, source: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            source: source.to_string(),
            ..Default::default()
        }
    }
}

/// A headline after keyword scoring.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    #[serde(flatten)]
    pub headline: Headline,
    pub sentiment: Tone,
    pub impact: ImpactLevel,
    pub relevance: f64,
    pub keywords: Vec<String>,
}

/// Aggregated sentiment for one instrument. Only the first three fields are
/// required on input; the rest default.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewsSentimentSummary {
    pub overall_sentiment: Sentiment,
    // -100..=100
    pub sentiment_score: f64,
    #[serde(default)]
    pub impact_level: ImpactLevel,
    #[serde(default)]
    pub short_term_bias: Tone,
    #[serde(default)]
    pub long_term_bias: Tone,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub news_items: Vec<NewsItem>,
    #[serde(default)]
    pub reasoning: Vec<String>,
}

impl NewsSentimentSummary {
    pub fn new(overall_sentiment: Sentiment, sentiment_score: f64, impact_level: ImpactLevel) -> Self {
        Self {
            overall_sentiment,
            sentiment_score,
            impact_level,
            ..Default::default()
        }
    }

    pub fn is_neutral(&self) -> bool {
        self.overall_sentiment == Sentiment::Neutral
    }
}
