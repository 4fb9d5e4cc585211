//! Per-timeframe signal fusion: chart structure, then fakeout override, then
//! indicators, then the optional news overlay, then risk sizing.
//!
//! Every rule that fires appends a reason, so the reason list reads in firing order.

use crate::analysis::fakeout::detect_fakeout;
use crate::analysis::indicator_panel::compute_panel;
use crate::analysis::indicators::analyze_indicators;
use crate::analysis::market_structure::{detect_bos, detect_choch};
use crate::analysis::risk::size_position;
use crate::analysis::volume_behavior::analyze_volume;
use crate::config::ANALYSIS;
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::domain::{Candle, Signal, Timeframe, Trend};
use crate::models::{
    BosPattern, ChochPattern, FakeoutKind, FakeoutSignal, IndicatorSnapshot, NewsSentimentSummary,
    Sentiment, TradingSignal, VolumeAnalysis,
};
use crate::utils::maths_utils::add_capped;

/// Fuse everything known about one timeframe into a signal.
///
/// `news == None` means sentiment was unavailable; a neutral summary means there was
/// nothing to act on. Never fails: short or degenerate input just yields weaker evidence.
pub fn generate_trading_signal(
    timeframe: Timeframe,
    candles: &[Candle],
    current_price: f64,
    news: Option<&NewsSentimentSummary>,
) -> TradingSignal {
    let cfg = &ANALYSIS.fusion;
    let mut reasons = Vec::new();

    let choch = detect_choch(candles);
    let bos = detect_bos(candles, choch.as_ref());
    let volume = analyze_volume(candles);
    let fakeout = detect_fakeout(candles);

    let (mut signal, mut confidence) =
        structural_signal(choch.as_ref(), bos.as_ref(), &volume, &mut reasons);
    let structural = (signal, confidence);
    signal = apply_fakeout_reversal(signal, &fakeout, &mut reasons);

    let (indicators, indicator_reasons) = analyze_indicators(candles);
    reasons.extend(indicator_reasons);
    (signal, confidence) = fuse_with_indicators(signal, confidence, &indicators, &mut reasons);
    let technical = (signal, confidence);

    (signal, confidence) = apply_news(signal, confidence, news, &mut reasons);
    let confidence = confidence.clamp(cfg.min_confidence, cfg.max_confidence);

    let levels = size_position(signal, current_price, timeframe.profile(), candles);

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_fusion
        && (DEBUG_FLAGS.print_fusion_for_timeframe.is_empty()
            || DEBUG_FLAGS.print_fusion_for_timeframe == timeframe.as_ref())
    {
        log::debug!(
            "Fusion {}: structure {:?} -> technical {:?} -> final {} @ {} ({} reasons)",
            timeframe,
            structural,
            technical,
            signal,
            confidence,
            reasons.len()
        );
    }
    #[cfg(not(debug_assertions))]
    let _ = (structural, technical);

    TradingSignal {
        timeframe,
        signal,
        confidence,
        reasons,
        entry: levels.entry,
        target: levels.target,
        stop_loss: levels.stop_loss,
        choch,
        bos,
        volume: Some(volume),
        fakeout: Some(fakeout),
        indicators: Some(indicators),
        panel: Some(compute_panel(candles)),
        news: news.cloned(),
    }
}

/// Step 1: accumulate confidence from CHOCH, BOS, absorption and divergence.
/// Only a CHOCH can promote the call; everything else must agree with its direction.
pub fn structural_signal(
    choch: Option<&ChochPattern>,
    bos: Option<&BosPattern>,
    volume: &VolumeAnalysis,
    reasons: &mut Vec<String>,
) -> (Signal, u8) {
    let cfg = &ANALYSIS.fusion;
    let mut confidence = cfg.base_confidence;
    let Some(choch) = choch else {
        return (Signal::Neutral, confidence);
    };
    let trend = choch.kind;

    let strong = choch.aggressiveness > cfg.strong_choch_aggressiveness;
    reasons.push(match (trend, strong) {
        (Trend::Bullish, true) => format!(
            "🚀 STRONG BULLISH CHOCH: {:.0}% strength - aggressive uptrend",
            choch.strength
        ),
        (Trend::Bullish, false) => format!(
            "🟢 Bullish CHOCH: {:.0}% strength - higher highs confirmed",
            choch.strength
        ),
        (Trend::Bearish, true) => format!(
            "🔴 STRONG BEARISH CHOCH: {:.0}% strength - aggressive downtrend",
            choch.strength
        ),
        (Trend::Bearish, false) => format!(
            "🔻 Bearish CHOCH: {:.0}% strength - lower lows confirmed",
            choch.strength
        ),
    });
    confidence = confidence.saturating_add(if strong { cfg.strong_choch_bonus } else { cfg.choch_bonus });

    if let Some(bos) = bos.filter(|b| b.confirmed && b.kind == trend) {
        reasons.push(match trend {
            Trend::Bullish => format!("✅ BULLISH BOS: resistance broken at {:.2}", bos.level),
            Trend::Bearish => format!("❌ BEARISH BOS: support broken at {:.2}", bos.level),
        });
        confidence = confidence.saturating_add(cfg.bos_bonus);
    }

    if volume.absorption.supports(trend) {
        reasons.push(match trend {
            Trend::Bullish => "📈 BUYING ABSORPTION: smart money accumulating".to_string(),
            Trend::Bearish => "📉 SELLING ABSORPTION: smart money distributing".to_string(),
        });
        confidence = confidence.saturating_add(cfg.absorption_bonus);
    }

    if volume.divergence.supports(trend) {
        reasons.push(match trend {
            Trend::Bullish => "📊 BULLISH DIVERGENCE: new lows on fading volume".to_string(),
            Trend::Bearish => "📊 BEARISH DIVERGENCE: new highs on fading volume".to_string(),
        });
        confidence = confidence.saturating_add(cfg.divergence_bonus);
    }

    let signal = if confidence >= cfg.promote_threshold {
        trend.signal()
    } else {
        Signal::Neutral
    };
    (signal, confidence)
}

/// Step 2: a confident failed breakout flips a directional structural call
pub fn apply_fakeout_reversal(signal: Signal, fakeout: &FakeoutSignal, reasons: &mut Vec<String>) -> Signal {
    let cfg = &ANALYSIS.fusion;
    let reverses = fakeout.detected
        && fakeout.confidence > cfg.reversal_min_fakeout_confidence
        && fakeout.kind == FakeoutKind::BreakoutFailure;
    if !reverses || !signal.is_directional() {
        return signal;
    }

    let flipped = signal.opposite();
    let failed = if signal == Signal::Buy { "Breakout" } else { "Breakdown" };
    reasons.push(format!("🔄 FAKEOUT REVERSAL: {} failed - now {}", failed, flipped));
    flipped
}

/// Step 4: reconcile the chart call with the indicator call
pub fn fuse_with_indicators(
    signal: Signal,
    confidence: u8,
    indicators: &IndicatorSnapshot,
    reasons: &mut Vec<String>,
) -> (Signal, u8) {
    let cfg = &ANALYSIS.fusion;
    let indicator_signal = indicators.combined_signal;

    match (signal, indicator_signal) {
        (chart, ind) if chart == ind && chart.is_directional() => {
            reasons.push(format!("💪 CONFLUENCE: chart + indicators both agree on {}", chart));
            (chart, add_capped(confidence, cfg.confluence_bonus, cfg.max_confidence))
        }
        (Signal::Neutral, ind) if ind.is_directional() => {
            reasons.push(format!("📊 INDICATOR DRIVEN: chart neutral, following {} indicators", ind));
            (ind, indicators.confidence)
        }
        (chart, Signal::Neutral) if chart.is_directional() => {
            reasons.push(format!("⚖️ WEAK SIGNAL: chart {} but indicators neutral", chart));
            (
                chart,
                confidence
                    .saturating_sub(cfg.weak_signal_penalty)
                    .max(cfg.weak_signal_floor),
            )
        }
        (chart, ind) if chart.is_directional() && ind.is_directional() => {
            reasons.push(format!(
                "⚠️ CONFLICT: chart says {}, indicators say {} - staying NEUTRAL",
                chart, ind
            ));
            (Signal::Neutral, cfg.conflict_confidence)
        }
        _ => (signal, confidence),
    }
}

/// Step 5: overlay a directional news summary on the technical call
pub fn apply_news(
    signal: Signal,
    confidence: u8,
    news: Option<&NewsSentimentSummary>,
    reasons: &mut Vec<String>,
) -> (Signal, u8) {
    let cfg = &ANALYSIS.fusion;
    let Some(news) = news else {
        reasons.push("📊 NO NEWS AVAILABLE: using technical analysis (chart + indicators) only".to_string());
        return (signal, confidence);
    };
    if news.is_neutral() {
        reasons.push("📊 NO NEWS: using technical analysis (chart + indicators) only".to_string());
        return (signal, confidence);
    }

    reasons.push(format!(
        "📰 NEWS DETECTED: {} sentiment ({:.1}%)",
        news.overall_sentiment.to_string().to_uppercase(),
        news.sentiment_score
    ));

    let boosted = add_capped(confidence, cfg.news_agree_bonus, cfg.max_confidence);
    let (result, reason) = match (signal, news.overall_sentiment) {
        (Signal::Buy, Sentiment::Bullish) => (
            (Signal::Buy, boosted),
            "🔥 STRONG BUY: technical BUY + positive news",
        ),
        (Signal::Buy, Sentiment::Bearish) => (
            (Signal::Neutral, cfg.news_conflict_confidence),
            "⚠️ NEUTRAL: technical BUY + negative news = avoid",
        ),
        (Signal::Sell, Sentiment::Bearish) => (
            (Signal::Sell, boosted),
            "🔥 STRONG SELL: technical SELL + negative news",
        ),
        (Signal::Sell, Sentiment::Bullish) => (
            (Signal::Neutral, cfg.news_conflict_confidence),
            "⚠️ NEUTRAL: technical SELL + positive news = avoid",
        ),
        (Signal::Neutral, Sentiment::Bullish) => (
            (Signal::Buy, cfg.news_only_confidence),
            "📈 MILD BUY: technical neutral + positive news",
        ),
        (Signal::Neutral, Sentiment::Bearish) => (
            (Signal::Sell, cfg.news_only_confidence),
            "📉 MILD SELL: technical neutral + negative news",
        ),
        (_, Sentiment::Neutral) => return (signal, confidence),
    };
    reasons.push(reason.to_string());
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures;
    use crate::models::ImpactLevel;

    fn news(sentiment: Sentiment, score: f64) -> NewsSentimentSummary {
        NewsSentimentSummary::new(sentiment, score, ImpactLevel::High)
    }

    fn snapshot(combined_signal: Signal, confidence: u8) -> IndicatorSnapshot {
        IndicatorSnapshot {
            rsi: 50.0,
            rsi_signal: Signal::Neutral,
            ema9: 1.0,
            ema21: 1.0,
            ema90: 1.0,
            ema_signal: combined_signal,
            combined_signal,
            confidence,
        }
    }

    fn position_of(reasons: &[String], needle: &str) -> usize {
        reasons
            .iter()
            .position(|r| r.contains(needle))
            .unwrap_or_else(|| panic!("no reason containing {needle:?} in {reasons:#?}"))
    }

    #[test]
    fn test_uptrend_is_confident_buy() {
        let candles = fixtures::uptrend(120);
        let signal = generate_trading_signal(Timeframe::H1, &candles, 124.0, None);
        assert_eq!(signal.signal, Signal::Buy);
        assert_eq!(signal.confidence, 90);
        assert_eq!(signal.choch.map(|c| c.kind), Some(Trend::Bullish));
        assert!(signal.target > signal.entry && signal.stop_loss < signal.entry);

        let reasons = &signal.reasons;
        let choch = position_of(reasons, "STRONG BULLISH CHOCH");
        let rsi = position_of(reasons, "RSI NEUTRAL");
        let confluence = position_of(reasons, "CONFLUENCE");
        let news = position_of(reasons, "NO NEWS AVAILABLE");
        assert!(choch < rsi && rsi < confluence && confluence < news, "{reasons:#?}");
        assert_eq!(news, reasons.len() - 1);
    }

    #[test]
    fn test_short_uptrend_with_bos_and_neutral_indicators() {
        let candles = fixtures::uptrend(40);
        let signal = generate_trading_signal(Timeframe::H4, &candles, 110.0, None);
        assert_eq!(signal.signal, Signal::Buy);
        // 50 + 25 (strong CHOCH) + 15 (BOS) - 10 (indicators neutral)
        assert_eq!(signal.confidence, 80);
        assert!(signal.bos.is_some());
        assert!(position_of(&signal.reasons, "BULLISH BOS") < position_of(&signal.reasons, "WEAK SIGNAL"));
    }

    #[test]
    fn test_downtrend_is_sell() {
        let signal = generate_trading_signal(Timeframe::D1, &fixtures::downtrend(120), 176.0, None);
        assert_eq!(signal.signal, Signal::Sell);
        assert_eq!(signal.confidence, 90);
        assert!(signal.target < signal.entry && signal.stop_loss > signal.entry);

        let signal = generate_trading_signal(Timeframe::D1, &fixtures::downtrend(40), 190.0, None);
        assert_eq!(signal.signal, Signal::Sell);
        assert_eq!(signal.confidence, 80);
    }

    #[test]
    fn test_flat_market_is_neutral() {
        for n in [30, 60] {
            let signal = generate_trading_signal(Timeframe::H1, &fixtures::flat(n), 100.0, None);
            assert_eq!(signal.signal, Signal::Neutral, "{n} flat candles");
            assert_eq!(signal.confidence, 50);
            assert!(signal.choch.is_none());
            assert_eq!(signal.entry, 100.0);
            assert_eq!(signal.target, 100.0);
        }
    }

    #[test]
    fn test_bearish_news_neutralises_buy() {
        let bearish = news(Sentiment::Bearish, -45.0);
        let signal = generate_trading_signal(Timeframe::H1, &fixtures::uptrend(120), 124.0, Some(&bearish));
        assert_eq!(signal.signal, Signal::Neutral);
        assert_eq!(signal.confidence, 50);
        let detected = position_of(&signal.reasons, "NEWS DETECTED: BEARISH");
        let verdict = position_of(&signal.reasons, "technical BUY + negative news");
        assert!(detected < verdict);
        assert_eq!(signal.news.as_ref(), Some(&bearish));
        assert_eq!(signal.entry, signal.target, "NEUTRAL final signal is not sized");
    }

    #[test]
    fn test_news_override_table() {
        let cases = [
            (Signal::Buy, 80, Sentiment::Bullish, Signal::Buy, 95),
            (Signal::Buy, 70, Sentiment::Bullish, Signal::Buy, 85),
            (Signal::Buy, 80, Sentiment::Bearish, Signal::Neutral, 50),
            (Signal::Sell, 80, Sentiment::Bearish, Signal::Sell, 95),
            (Signal::Sell, 80, Sentiment::Bullish, Signal::Neutral, 50),
            (Signal::Neutral, 50, Sentiment::Bullish, Signal::Buy, 60),
            (Signal::Neutral, 50, Sentiment::Bearish, Signal::Sell, 60),
        ];
        for (technical, confidence, sentiment, expected, expected_confidence) in cases {
            let mut reasons = Vec::new();
            let summary = news(sentiment, 30.0);
            let result = apply_news(technical, confidence, Some(&summary), &mut reasons);
            assert_eq!(
                result,
                (expected, expected_confidence),
                "{technical} + {sentiment}"
            );
            assert_eq!(reasons.len(), 2);
        }
    }

    #[test]
    fn test_missing_and_neutral_news_leave_signal() {
        let mut reasons = Vec::new();
        assert_eq!(apply_news(Signal::Buy, 90, None, &mut reasons), (Signal::Buy, 90));
        assert!(reasons[0].contains("NO NEWS AVAILABLE"));

        let mut reasons = Vec::new();
        let neutral = news(Sentiment::Neutral, 5.0);
        assert_eq!(apply_news(Signal::Sell, 75, Some(&neutral), &mut reasons), (Signal::Sell, 75));
        assert!(reasons[0].starts_with("📊 NO NEWS:"));
    }

    #[test]
    fn test_indicator_fusion_rules() {
        let mut reasons = Vec::new();
        assert_eq!(
            fuse_with_indicators(Signal::Buy, 85, &snapshot(Signal::Buy, 65), &mut reasons),
            (Signal::Buy, 95)
        );
        assert_eq!(
            fuse_with_indicators(Signal::Neutral, 50, &snapshot(Signal::Sell, 85), &mut reasons),
            (Signal::Sell, 85)
        );
        assert_eq!(
            fuse_with_indicators(Signal::Sell, 70, &snapshot(Signal::Neutral, 50), &mut reasons),
            (Signal::Sell, 60)
        );
        assert_eq!(
            fuse_with_indicators(Signal::Sell, 45, &snapshot(Signal::Neutral, 50), &mut reasons),
            (Signal::Sell, 40),
            "weak signal floor"
        );
        assert_eq!(
            fuse_with_indicators(Signal::Buy, 90, &snapshot(Signal::Sell, 85), &mut reasons),
            (Signal::Neutral, 45)
        );
        assert_eq!(reasons.len(), 5);

        let mut reasons = Vec::new();
        assert_eq!(
            fuse_with_indicators(Signal::Neutral, 50, &snapshot(Signal::Neutral, 50), &mut reasons),
            (Signal::Neutral, 50),
            "two neutral reads are not confluence"
        );
        assert!(reasons.is_empty());
    }

    #[test]
    fn test_fakeout_reversal_rules() {
        let mut reasons = Vec::new();
        let strong_failure = FakeoutSignal::trap(FakeoutKind::BreakoutFailure, 80);
        assert_eq!(apply_fakeout_reversal(Signal::Buy, &strong_failure, &mut reasons), Signal::Sell);
        assert_eq!(apply_fakeout_reversal(Signal::Sell, &strong_failure, &mut reasons), Signal::Buy);
        assert_eq!(apply_fakeout_reversal(Signal::Neutral, &strong_failure, &mut reasons), Signal::Neutral);
        assert_eq!(reasons.len(), 2);
        assert!(reasons[0].contains("FAKEOUT REVERSAL"));

        let mut reasons = Vec::new();
        let at_threshold = FakeoutSignal::trap(FakeoutKind::BreakoutFailure, 75);
        let spring = FakeoutSignal::trap(FakeoutKind::Spring, 85);
        let continuation = FakeoutSignal::continuation(FakeoutKind::BreakoutFailure, 90);
        for fakeout in [at_threshold, spring, continuation] {
            assert_eq!(apply_fakeout_reversal(Signal::Buy, &fakeout, &mut reasons), Signal::Buy);
        }
        assert!(reasons.is_empty());
    }

    #[test]
    fn test_structural_accumulation() {
        let choch = ChochPattern {
            kind: Trend::Bearish,
            strength: 80.0,
            level: 10.0,
            aggressiveness: 5.0,
        };
        let bos = BosPattern {
            kind: Trend::Bearish,
            confirmed: true,
            level: 9.5,
        };
        let volume = VolumeAnalysis {
            absorption: crate::models::Absorption::Sell,
            divergence: crate::models::Divergence::Bullish,
            climax: false,
            fakeout: false,
        };
        let mut reasons = Vec::new();
        let (signal, confidence) = structural_signal(Some(&choch), Some(&bos), &volume, &mut reasons);
        // 50 + 20 + 15 + 12, bullish divergence does not support a bearish CHOCH
        assert_eq!((signal, confidence), (Signal::Sell, 97));
        assert_eq!(reasons.len(), 3);

        let mut reasons = Vec::new();
        assert_eq!(
            structural_signal(None, Some(&bos), &volume, &mut reasons),
            (Signal::Neutral, 50)
        );
        assert!(reasons.is_empty());
    }

    #[test]
    fn test_confidence_always_clamped() {
        let bullish = news(Sentiment::Bullish, 60.0);
        let series = [
            fixtures::uptrend(120),
            fixtures::uptrend(40),
            fixtures::downtrend(120),
            fixtures::flat(30),
            fixtures::uptrend(5),
            Vec::new(),
        ];
        for candles in &series {
            for news in [None, Some(&bullish)] {
                let signal = generate_trading_signal(Timeframe::M30, candles, 100.0, news);
                assert!(
                    (10..=95).contains(&signal.confidence),
                    "confidence {} out of range",
                    signal.confidence
                );
            }
        }
    }

    #[test]
    fn test_degenerate_input_does_not_panic() {
        let signal = generate_trading_signal(Timeframe::M15, &[], 42.0, None);
        assert_eq!(signal.signal, Signal::Neutral);
        assert_eq!(signal.entry, 42.0);

        let doji: Vec<Candle> = (0..30).map(|i| fixtures::candle(i, 10.0, 10.0, 10.0, 10.0, 0)).collect();
        let signal = generate_trading_signal(Timeframe::M15, &doji, 10.0, None);
        assert!(signal.choch.is_none());
        assert_eq!(signal.entry, 10.0);
    }
}
