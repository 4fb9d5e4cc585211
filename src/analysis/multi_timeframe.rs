//! Runs the fusion engine over every timeframe and weighs the results into one call.

use rayon::prelude::*;
use strum::IntoEnumIterator;

use crate::analysis::signal_fusion::generate_trading_signal;
use crate::config::{ANALYSIS, NEWS};
use crate::domain::{CandleSet, Signal, Timeframe};
use crate::models::{ImpactLevel, MultiTimeframeAnalysis, NewsSentimentSummary, TradingSignal};
use crate::utils::maths_utils::mean;

/// Analyse all five timeframes. Timeframes with fewer than the minimum candle count
/// get a placeholder, so `signals` always holds one entry per timeframe, finest first.
pub fn analyze_multi_timeframe(
    candles: &CandleSet,
    current_price: f64,
    news: Option<&NewsSentimentSummary>,
) -> MultiTimeframeAnalysis {
    let timeframes: Vec<Timeframe> = Timeframe::iter().collect();

    let signals: Vec<TradingSignal> = timeframes
        .par_iter()
        .map(|&timeframe| {
            let series = candles.get(timeframe);
            if series.len() < ANALYSIS.aggregation.min_candles {
                log::info!(
                    "{}: {} candles, not enough chart data",
                    timeframe,
                    series.len()
                );
                TradingSignal::no_data(timeframe, current_price)
            } else {
                generate_trading_signal(timeframe, series, current_price, news)
            }
        })
        .collect();

    analysis_from_signals(signals)
}

/// Wrap already-computed signals with the overall call, summary and news impact
pub fn analysis_from_signals(signals: Vec<TradingSignal>) -> MultiTimeframeAnalysis {
    let (overall_signal, confidence) = aggregate_signals(&signals);
    let summary = summarize(&signals, overall_signal);
    let news_impact = news_impact(&signals);

    MultiTimeframeAnalysis {
        signals,
        overall_signal,
        confidence,
        summary,
        news_impact,
    }
}

/// Weighted vote: each directional timeframe adds `weight * confidence / 100` to its side.
/// Neutral timeframes are left out of both the scores and the normalising weight.
pub fn aggregate_signals(signals: &[TradingSignal]) -> (Signal, u8) {
    let cfg = &ANALYSIS.aggregation;
    let mut buy_score = 0.0;
    let mut sell_score = 0.0;
    let mut total_weight = 0.0;

    for signal in signals.iter().filter(|s| s.signal.is_directional()) {
        let weight = signal.timeframe.weight();
        let score = weight * f64::from(signal.confidence) / 100.0;
        match signal.signal {
            Signal::Buy => buy_score += score,
            Signal::Sell => sell_score += score,
            Signal::Neutral => {}
        }
        total_weight += weight;
    }

    let winner = if buy_score > sell_score && buy_score > cfg.min_winning_score {
        Some((Signal::Buy, buy_score))
    } else if sell_score > buy_score && sell_score > cfg.min_winning_score {
        Some((Signal::Sell, sell_score))
    } else {
        None
    };

    match winner {
        Some((signal, score)) => {
            let confidence = (score / total_weight * 100.0).round().min(f64::from(cfg.max_confidence));
            (signal, confidence as u8)
        }
        None => (Signal::Neutral, cfg.default_confidence),
    }
}

fn summarize(signals: &[TradingSignal], overall: Signal) -> String {
    let count = |wanted: Signal| signals.iter().filter(|s| s.signal == wanted).count();
    let outlook = match overall {
        Signal::Buy => "Bullish momentum across multiple timeframes. Consider long positions with proper risk management.",
        Signal::Sell => "Bearish pressure across multiple timeframes. Consider short positions or exiting longs.",
        Signal::Neutral => "Mixed signals across timeframes. Wait for clearer direction before entering.",
    };
    format!(
        "{} BUY, {} SELL, {} NEUTRAL signals detected. {}",
        count(Signal::Buy),
        count(Signal::Sell),
        count(Signal::Neutral),
        outlook
    )
}

/// One line describing how directional news weighed on the signals that carried it
pub fn news_impact(signals: &[TradingSignal]) -> String {
    let with_news: Vec<&NewsSentimentSummary> = signals
        .iter()
        .filter_map(|s| s.news.as_ref())
        .filter(|n| !n.is_neutral())
        .collect();
    if with_news.is_empty() {
        return "No significant news impact detected".to_string();
    }

    let high_impact: Vec<f64> = with_news
        .iter()
        .filter(|n| n.impact_level == ImpactLevel::High)
        .map(|n| n.sentiment_score)
        .collect();
    if high_impact.is_empty() {
        return format!(
            "MODERATE NEWS IMPACT: {} timeframe(s) adjusted by news sentiment",
            with_news.len()
        );
    }

    let threshold = NEWS.impact_summary_threshold;
    let average = mean(&high_impact);
    if average > threshold {
        format!("POSITIVE NEWS IMPACT: high-impact positive news (avg {:.1}) supporting bullish signals", average)
    } else if average < -threshold {
        format!("NEGATIVE NEWS IMPACT: high-impact negative news (avg {:.1}) weighing on the signals", average)
    } else {
        format!("MIXED NEWS IMPACT: high-impact news without a clear direction (avg {:.1})", average)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures;
    use crate::models::Sentiment;

    fn stub(timeframe: Timeframe, signal: Signal, confidence: u8) -> TradingSignal {
        TradingSignal {
            signal,
            confidence,
            reasons: vec![],
            ..TradingSignal::no_data(timeframe, 100.0)
        }
    }

    #[test]
    fn test_empty_set_yields_five_placeholders() {
        let analysis = analyze_multi_timeframe(&CandleSet::new(), 250.0, None);
        assert_eq!(analysis.signals.len(), 5);
        let order: Vec<Timeframe> = analysis.signals.iter().map(|s| s.timeframe).collect();
        assert_eq!(order, Timeframe::iter().collect::<Vec<_>>(), "stable timeframe order");
        assert!(analysis.signals.iter().all(TradingSignal::is_placeholder));
        assert!(analysis.signals.iter().all(|s| s.entry == 250.0 && s.stop_loss == 250.0));
        assert_eq!(analysis.overall_signal, Signal::Neutral);
        assert_eq!(analysis.confidence, 50);
        assert!(analysis.summary.starts_with("0 BUY, 0 SELL, 5 NEUTRAL"));
        assert_eq!(analysis.news_impact, "No significant news impact detected");
    }

    #[test]
    fn test_short_series_becomes_placeholder() {
        let set = CandleSet::new()
            .with(Timeframe::H1, fixtures::uptrend(19))
            .with(Timeframe::H4, fixtures::uptrend(120));
        let analysis = analyze_multi_timeframe(&set, 124.0, None);
        assert!(analysis.signal_for(Timeframe::H1).is_some_and(TradingSignal::is_placeholder));
        let h4 = analysis.signal_for(Timeframe::H4).unwrap();
        assert!(!h4.is_placeholder());
        assert_eq!(h4.signal, Signal::Buy);
    }

    #[test]
    fn test_all_timeframes_bullish() {
        let mut set = CandleSet::new();
        for timeframe in Timeframe::iter() {
            set.insert(timeframe, fixtures::uptrend(120));
        }
        let analysis = analyze_multi_timeframe(&set, 124.0, None);
        assert_eq!(analysis.overall_signal, Signal::Buy);
        assert_eq!(analysis.confidence, 90);
        assert!(analysis.summary.starts_with("5 BUY, 0 SELL, 0 NEUTRAL"));
        assert!(analysis.summary.contains("Bullish"));
    }

    #[test]
    fn test_single_lower_timeframe_cannot_carry_the_vote() {
        // 0.20 * 0.90 = 0.18, under the 0.4 bar
        let set = CandleSet::new().with(Timeframe::H1, fixtures::uptrend(120));
        let analysis = analyze_multi_timeframe(&set, 124.0, None);
        assert_eq!(analysis.signal_for(Timeframe::H1).unwrap().signal, Signal::Buy);
        assert_eq!(analysis.overall_signal, Signal::Neutral);
        assert_eq!(analysis.confidence, 50);
        assert!(analysis.summary.contains("Mixed"));
    }

    #[test]
    fn test_daily_outweighs_hourly() {
        let set = CandleSet::new()
            .with(Timeframe::H1, fixtures::uptrend(120))
            .with(Timeframe::D1, fixtures::downtrend(120));
        let analysis = analyze_multi_timeframe(&set, 150.0, None);
        assert_eq!(analysis.overall_signal, Signal::Sell);
        // 0.45 / (0.2 + 0.5)
        assert_eq!(analysis.confidence, 64);
        assert!(analysis.summary.starts_with("1 BUY, 1 SELL, 3 NEUTRAL"));
    }

    #[test]
    fn test_aggregate_weights() {
        let signals = vec![
            stub(Timeframe::M15, Signal::Sell, 95),
            stub(Timeframe::M30, Signal::Sell, 95),
            stub(Timeframe::H1, Signal::Neutral, 50),
            stub(Timeframe::H4, Signal::Buy, 80),
            stub(Timeframe::D1, Signal::Buy, 80),
        ];
        // buy 0.6, sell 0.2375, total 1.0
        assert_eq!(aggregate_signals(&signals), (Signal::Buy, 60));

        // A lone confident daily call normalises to its own confidence, capped at 95
        assert_eq!(aggregate_signals(&[stub(Timeframe::D1, Signal::Sell, 95)]), (Signal::Sell, 95));
        assert_eq!(aggregate_signals(&[]), (Signal::Neutral, 50));

        let tied = vec![stub(Timeframe::D1, Signal::Buy, 90), stub(Timeframe::D1, Signal::Sell, 90)];
        assert_eq!(aggregate_signals(&tied), (Signal::Neutral, 50));
    }

    #[test]
    fn test_news_is_attached_and_reported() {
        let mut bullish = NewsSentimentSummary::new(Sentiment::Bullish, 45.0, ImpactLevel::High);
        bullish.reasoning.push("3 positive headlines".to_string());
        let set = CandleSet::new().with(Timeframe::D1, fixtures::flat(60));
        let analysis = analyze_multi_timeframe(&set, 100.0, Some(&bullish));

        let daily = analysis.signal_for(Timeframe::D1).unwrap();
        assert_eq!(daily.signal, Signal::Buy);
        assert_eq!(daily.confidence, 60);
        assert_eq!(daily.news.as_ref(), Some(&bullish));
        assert!(analysis.signal_for(Timeframe::M15).unwrap().news.is_none(), "placeholders carry no news");
        assert!(analysis.news_impact.starts_with("POSITIVE NEWS IMPACT"));
    }

    #[test]
    fn test_news_impact_texts() {
        let mut with_news = stub(Timeframe::H1, Signal::Buy, 60);
        with_news.news = Some(NewsSentimentSummary::new(Sentiment::Bearish, -35.0, ImpactLevel::High));
        assert!(news_impact(std::slice::from_ref(&with_news)).starts_with("NEGATIVE NEWS IMPACT"));

        with_news.news = Some(NewsSentimentSummary::new(Sentiment::Bearish, -35.0, ImpactLevel::Medium));
        assert!(news_impact(std::slice::from_ref(&with_news)).starts_with("MODERATE NEWS IMPACT"));

        let mut other = stub(Timeframe::H4, Signal::Buy, 60);
        other.news = Some(NewsSentimentSummary::new(Sentiment::Bullish, 30.0, ImpactLevel::High));
        with_news.news = Some(NewsSentimentSummary::new(Sentiment::Bearish, -25.0, ImpactLevel::High));
        assert!(news_impact(&[with_news.clone(), other]).starts_with("MIXED NEWS IMPACT"));

        with_news.news = Some(NewsSentimentSummary::new(Sentiment::Neutral, 5.0, ImpactLevel::High));
        assert_eq!(
            news_impact(&[with_news]),
            "No significant news impact detected",
            "neutral news does not count"
        );
    }
}
