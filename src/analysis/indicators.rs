//! RSI / EMA indicator layer and the indicator-only directional call.

use itertools::Itertools;

use crate::config::ANALYSIS;
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::domain::{Candle, Signal};
use crate::models::IndicatorSnapshot;
use crate::utils::maths_utils::{mean, round2};

/// Wilder RSI, rounded to 2 dp. Needs `period + 1` closes, else 50.
/// Returns exactly 100 when the smoothed loss is zero.
pub fn rsi(closes: &[f64], period: usize) -> f64 {
    if period == 0 || closes.len() < period + 1 {
        return 50.0;
    }
    let p = period as f64;

    let (seed_gain, seed_loss) = closes[..=period]
        .iter()
        .tuple_windows()
        .fold((0.0, 0.0), |(gain, loss), (prev, next)| {
            let change = next - prev;
            if change > 0.0 { (gain + change, loss) } else { (gain, loss - change) }
        });
    let mut avg_gain = seed_gain / p;
    let mut avg_loss = seed_loss / p;

    for (prev, next) in closes[period..].iter().tuple_windows() {
        let change = next - prev;
        avg_gain = (avg_gain * (p - 1.0) + change.max(0.0)) / p;
        avg_loss = (avg_loss * (p - 1.0) + (-change).max(0.0)) / p;
    }

    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    round2(100.0 - 100.0 / (1.0 + rs))
}

/// Full EMA series: seeded with the SMA of the first `period` values, one entry per
/// value from index `period - 1` on. Empty when there is not enough data.
pub fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }
    let multiplier = 2.0 / (period as f64 + 1.0);
    let mut series = Vec::with_capacity(values.len() - period + 1);
    let mut ema = mean(&values[..period]);
    series.push(ema);
    for value in &values[period..] {
        ema = value * multiplier + ema * (1.0 - multiplier);
        series.push(ema);
    }
    series
}

/// Latest EMA rounded to 2 dp. Fewer than `period` closes gives the last close (0 when empty).
pub fn ema(closes: &[f64], period: usize) -> f64 {
    match ema_series(closes, period).last() {
        Some(&value) => round2(value),
        None => closes.last().copied().unwrap_or(0.0),
    }
}

/// Rolling simple average, one entry per full window
pub fn sma_series(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }
    values.windows(period).map(mean).collect()
}

/// Mean true range over the last `period` transitions (uses `period + 1` candles when available).
/// 0 with fewer than two candles.
pub fn atr(candles: &[Candle], period: usize) -> f64 {
    let true_ranges: Vec<f64> = candles
        .iter()
        .tuple_windows()
        .map(|(prev, cur)| cur.true_range(prev.close))
        .collect();
    let start = true_ranges.len().saturating_sub(period);
    mean(&true_ranges[start..])
}

pub fn rsi_signal(rsi: f64) -> Signal {
    let cfg = &ANALYSIS.indicators;
    if rsi < cfg.rsi_oversold {
        Signal::Buy
    } else if rsi > cfg.rsi_overbought {
        Signal::Sell
    } else {
        Signal::Neutral
    }
}

pub fn ema_signal(fast: f64, mid: f64, slow: f64) -> Signal {
    if fast > mid && mid > slow {
        Signal::Buy
    } else if fast < mid && mid < slow {
        Signal::Sell
    } else {
        Signal::Neutral
    }
}

/// Combine the RSI and EMA calls into one signal + confidence
pub fn combine_signals(rsi_signal: Signal, ema_signal: Signal) -> (Signal, u8) {
    let cfg = &ANALYSIS.indicators;
    match (rsi_signal, ema_signal) {
        (Signal::Neutral, Signal::Neutral) => (Signal::Neutral, cfg.neutral_confidence),
        (rsi, ema) if rsi == ema => (rsi, cfg.agree_confidence),
        (rsi, Signal::Neutral) => (rsi, cfg.single_confidence),
        (Signal::Neutral, ema) => (ema, cfg.single_confidence),
        _ => (Signal::Neutral, cfg.conflict_confidence),
    }
}

/// RSI(14) + EMA(9/21/90) snapshot and the reasons explaining it
pub fn analyze_indicators(candles: &[Candle]) -> (IndicatorSnapshot, Vec<String>) {
    let cfg = &ANALYSIS.indicators;
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let mut reasons = Vec::new();

    let rsi = rsi(&closes, cfg.rsi_period);
    let rsi_signal = rsi_signal(rsi);
    reasons.push(match rsi_signal {
        Signal::Buy => format!("📉 RSI OVERSOLD: {:.1} - strong BUY signal", rsi),
        Signal::Sell => format!("📈 RSI OVERBOUGHT: {:.1} - strong SELL signal", rsi),
        Signal::Neutral => format!("📊 RSI NEUTRAL: {:.1} - no clear signal", rsi),
    });

    let ema9 = ema(&closes, cfg.ema_fast);
    let ema21 = ema(&closes, cfg.ema_mid);
    let ema90 = ema(&closes, cfg.ema_slow);
    let ema_signal = ema_signal(ema9, ema21, ema90);
    reasons.push(match ema_signal {
        Signal::Buy => format!("🚀 EMA UPTREND: 9({:.2}) > 21({:.2}) > 90({:.2})", ema9, ema21, ema90),
        Signal::Sell => format!("📉 EMA DOWNTREND: 9({:.2}) < 21({:.2}) < 90({:.2})", ema9, ema21, ema90),
        Signal::Neutral => format!("➡️ EMA MIXED: no clear trend - 9({:.2}) 21({:.2}) 90({:.2})", ema9, ema21, ema90),
    });

    let (combined_signal, confidence) = combine_signals(rsi_signal, ema_signal);
    match (rsi_signal, ema_signal) {
        (Signal::Neutral, Signal::Neutral) => {}
        (r, e) if r == e => reasons.push(format!("🔥 STRONG {}: RSI + EMA agree", r)),
        (r, Signal::Neutral) => reasons.push(format!("⚖️ MODERATE {}: RSI signal with neutral EMA", r)),
        (Signal::Neutral, e) => reasons.push(format!("⚖️ MODERATE {}: EMA signal with neutral RSI", e)),
        (r, e) => reasons.push(format!("⚠️ CONFLICTING: RSI says {}, EMA says {}", r, e)),
    }

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_indicators {
        log::debug!(
            "Indicators: rsi {} ({}), ema {}/{}/{} ({}) -> {} @ {}",
            rsi,
            rsi_signal,
            ema9,
            ema21,
            ema90,
            ema_signal,
            combined_signal,
            confidence
        );
    }

    let snapshot = IndicatorSnapshot {
        rsi,
        rsi_signal,
        ema9,
        ema21,
        ema90,
        ema_signal,
        combined_signal,
        confidence,
    };
    (snapshot, reasons)
}
