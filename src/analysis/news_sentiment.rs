//! Keyword scoring of already-retrieved headlines into a `NewsSentimentSummary`.

use itertools::Itertools;

use crate::config::NEWS;
use crate::config::news::{
    BEARISH_KEYWORDS, BULLISH_KEYWORDS, HIGH_IMPACT_KEYWORDS, MEDIUM_IMPACT_KEYWORDS,
    SECTOR_KEYWORDS, SYMBOL_SUFFIXES,
};
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::models::{Headline, ImpactLevel, NewsItem, NewsSentimentSummary, Sentiment, Tone};
use crate::utils::maths_utils::round2;

/// `term` occurs in `text` without a letter or digit glued to either side
fn contains_term(text: &str, term: &str) -> bool {
    text.match_indices(term).any(|(start, _)| {
        let before = text[..start].chars().next_back();
        let after = text[start + term.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

fn matching<'a>(text: &'a str, terms: &'a [&'a str]) -> impl Iterator<Item = &'a str> + 'a {
    terms.iter().copied().filter(move |term| contains_term(text, term))
}

fn impact_weight(impact: ImpactLevel) -> f64 {
    let weights = &NEWS.impact_weights;
    match impact {
        ImpactLevel::High => weights.high,
        ImpactLevel::Medium => weights.medium,
        ImpactLevel::Low => weights.low,
    }
}

fn directional_tone(score: f64, threshold: f64) -> Tone {
    if score.abs() <= threshold {
        Tone::Neutral
    } else if score > 0.0 {
        Tone::Positive
    } else {
        Tone::Negative
    }
}

/// Lower-cased match terms for an instrument: bare symbol, company name and any sector terms
pub fn stock_keywords(symbol: &str, name: Option<&str>) -> Vec<String> {
    let mut bare = symbol.trim().to_lowercase();
    for suffix in SYMBOL_SUFFIXES {
        if let Some(stripped) = bare.strip_suffix(suffix) {
            bare = stripped.to_string();
        }
    }

    let mut keywords = Vec::new();
    if !bare.is_empty() {
        keywords.push(bare.clone());
    }
    if let Some(name) = name.map(|n| n.trim().to_lowercase()).filter(|n| !n.is_empty()) {
        keywords.push(name);
    }
    if let Some((_, sector)) = SECTOR_KEYWORDS.iter().find(|(key, _)| *key == bare) {
        keywords.extend(sector.iter().map(|k| k.to_string()));
    }
    keywords.into_iter().unique().collect()
}

pub fn score_headline(headline: &Headline, stock_keywords: &[String]) -> NewsItem {
    let text = format!("{} {}", headline.title, headline.description).to_lowercase();

    let bullish = matching(&text, BULLISH_KEYWORDS).count() as i64;
    let bearish = matching(&text, BEARISH_KEYWORDS).count() as i64;
    let sentiment = match bullish.cmp(&bearish) {
        std::cmp::Ordering::Greater => Tone::Positive,
        std::cmp::Ordering::Less => Tone::Negative,
        std::cmp::Ordering::Equal => Tone::Neutral,
    };

    let stock_hits = stock_keywords
        .iter()
        .filter(|k| contains_term(&text, k))
        .count() as f64;
    let market_hits = matching(&text, HIGH_IMPACT_KEYWORDS).count() as f64;
    let mut relevance =
        stock_hits * NEWS.symbol_match_relevance + market_hits * NEWS.market_keyword_relevance;
    if relevance == 0.0 {
        relevance = NEWS.base_relevance;
    }
    let relevance = relevance.min(NEWS.max_relevance);

    let impact = if market_hits > 0.0 {
        ImpactLevel::High
    } else if matching(&text, MEDIUM_IMPACT_KEYWORDS).next().is_some() {
        ImpactLevel::Medium
    } else {
        ImpactLevel::Low
    };

    let keywords = matching(&text, BULLISH_KEYWORDS)
        .chain(matching(&text, BEARISH_KEYWORDS))
        .chain(matching(&text, HIGH_IMPACT_KEYWORDS))
        .unique()
        .map(str::to_string)
        .collect();

    NewsItem {
        headline: headline.clone(),
        sentiment,
        impact,
        relevance,
        keywords,
    }
}

/// Score, filter and aggregate headlines for one instrument.
///
/// Only headlines with relevance above the cut-off count. Each one votes +1 / -1 / 0
/// weighted by `relevance / 100 * impact weight`; the weighted mean is scaled to -100..=100.
pub fn summarize_headlines(
    symbol: &str,
    name: Option<&str>,
    headlines: &[Headline],
) -> NewsSentimentSummary {
    let keywords = stock_keywords(symbol, name);
    let relevant: Vec<NewsItem> = headlines
        .iter()
        .map(|h| score_headline(h, &keywords))
        .filter(|item| item.relevance > NEWS.min_relevance)
        .collect();

    let weight = |item: &NewsItem| item.relevance / 100.0 * impact_weight(item.impact);
    let (weighted, total_weight) = relevant.iter().fold((0.0, 0.0), |(sum, total), item| {
        let vote = match item.sentiment {
            Tone::Positive => 1.0,
            Tone::Negative => -1.0,
            Tone::Neutral => 0.0,
        };
        (sum + vote * weight(item), total + weight(item))
    });
    let score = if total_weight > 0.0 {
        weighted / total_weight * 100.0
    } else {
        0.0
    };

    let overall_sentiment = if score > NEWS.bullish_threshold {
        Sentiment::Bullish
    } else if score < NEWS.bearish_threshold {
        Sentiment::Bearish
    } else {
        Sentiment::Neutral
    };
    let impact_level = relevant.iter().map(|i| i.impact).max().unwrap_or_default();
    let short_term_bias = directional_tone(score, NEWS.short_term_bias_threshold);
    let long_term_bias = directional_tone(score, NEWS.long_term_bias_threshold);

    let mut reasoning = Vec::new();
    if relevant.is_empty() {
        reasoning.push(format!(
            "📰 No significant news found for {} in {} headline(s)",
            symbol,
            headlines.len()
        ));
    } else {
        let sources = relevant.iter().map(|i| i.headline.source.as_str()).unique().count();
        reasoning.push(format!(
            "📊 Analyzed {} relevant news items from {} sources",
            relevant.len(),
            sources
        ));
        reasoning.push(match overall_sentiment {
            Sentiment::Bullish => format!("📈 POSITIVE NEWS SENTIMENT: bullish tone in recent coverage ({:.1})", score),
            Sentiment::Bearish => format!("📉 NEGATIVE NEWS SENTIMENT: bearish tone in recent coverage ({:.1})", score),
            Sentiment::Neutral => "⚖️ NEUTRAL NEWS SENTIMENT: mixed or balanced coverage".to_string(),
        });
        if short_term_bias != Tone::Neutral {
            reasoning.push(format!(
                "⚡ SHORT-TERM BIAS: {} - likely to move immediate price action",
                short_term_bias.to_string().to_uppercase()
            ));
        }
        if long_term_bias != Tone::Neutral {
            reasoning.push(format!(
                "🎯 LONG-TERM BIAS: {} - fundamental news behind the longer trend",
                long_term_bias.to_string().to_uppercase()
            ));
        }
        let high_impact = relevant.iter().filter(|i| i.impact == ImpactLevel::High).count();
        if high_impact > 0 {
            reasoning.push(format!("🚨 HIGH IMPACT: {} market-moving news items", high_impact));
        }
        relevant
            .iter()
            .sorted_by(|a, b| weight(*b).total_cmp(&weight(*a)))
            .take(NEWS.top_headlines)
            .for_each(|item| {
                reasoning.push(format!(
                    "📄 \"{}\" - {} from {}",
                    item.headline.title,
                    item.sentiment.to_string().to_uppercase(),
                    item.headline.source
                ))
            });
    }

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_news_scoring {
        log::debug!(
            "News {}: {} of {} headlines relevant, score {:.1} -> {}",
            symbol,
            relevant.len(),
            headlines.len(),
            score,
            overall_sentiment
        );
    }

    NewsSentimentSummary {
        overall_sentiment,
        sentiment_score: round2(score),
        impact_level,
        short_term_bias,
        long_term_bias,
        news_items: relevant,
        reasoning,
    }
}
