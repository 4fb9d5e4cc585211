use crate::analysis::indicators::{atr, ema_series, sma_series};
use crate::config::ANALYSIS;
use crate::domain::Candle;
use crate::models::{IndicatorPanel, MacdReading};

const NEUTRAL_OSCILLATOR: f64 = 50.0;

fn last_or_zero(series: &[f64]) -> f64 {
    series.last().copied().unwrap_or(0.0)
}

/// Cutler-style RSI: plain averages of the last `period` gains and losses
pub fn simple_rsi(closes: &[f64], period: usize) -> f64 {
    if period == 0 || closes.len() < period + 1 {
        return NEUTRAL_OSCILLATOR;
    }
    let changes = closes[closes.len() - period - 1..].windows(2).map(|w| w[1] - w[0]);
    let (gain, loss) = changes.fold((0.0, 0.0), |(gain, loss), change| {
        (gain + change.max(0.0), loss + (-change).max(0.0))
    });
    if loss == 0.0 {
        return 100.0;
    }
    let rs = gain / loss;
    100.0 - 100.0 / (1.0 + rs)
}

/// MACD line (fast EMA - slow EMA, aligned on their common tail), its signal EMA
/// and the histogram. Components without enough data read 0.
pub fn macd(closes: &[f64], fast: usize, slow: usize, signal: usize) -> MacdReading {
    let fast_series = ema_series(closes, fast);
    let slow_series = ema_series(closes, slow);
    let common = fast_series.len().min(slow_series.len());

    let line: Vec<f64> = fast_series[fast_series.len() - common..]
        .iter()
        .zip(&slow_series[slow_series.len() - common..])
        .map(|(f, s)| f - s)
        .collect();
    let signal_series = ema_series(&line, signal);
    let histogram = match (line.last(), signal_series.last()) {
        (Some(m), Some(s)) => m - s,
        _ => 0.0,
    };

    MacdReading {
        macd: last_or_zero(&line),
        signal: last_or_zero(&signal_series),
        histogram,
    }
}

/// Money flow index from typical price x volume over the last `period` transitions
pub fn mfi(candles: &[Candle], period: usize) -> f64 {
    if period == 0 || candles.len() < period + 1 {
        return NEUTRAL_OSCILLATOR;
    }
    let recent = &candles[candles.len() - period - 1..];
    let (positive, negative) = recent.windows(2).fold((0.0, 0.0), |(pos, neg), w| {
        let (prev, cur) = (w[0].typical_price(), w[1].typical_price());
        let flow = cur * w[1].volume_f64();
        if cur > prev {
            (pos + flow, neg)
        } else if cur < prev {
            (pos, neg + flow)
        } else {
            (pos, neg)
        }
    });
    if negative == 0.0 {
        return 100.0;
    }
    100.0 - 100.0 / (1.0 + positive / negative)
}

/// The dashboard indicator block for one series
pub fn compute_panel(candles: &[Candle]) -> IndicatorPanel {
    let cfg = &ANALYSIS.panel;
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let [ema_a, ema_b, ema_c] = cfg.ema_periods.map(|p| last_or_zero(&ema_series(&closes, p)));
    let [sma_a, sma_b, sma_c] = cfg.sma_periods.map(|p| last_or_zero(&sma_series(&closes, p)));

    IndicatorPanel {
        ema12: ema_a,
        ema26: ema_b,
        ema50: ema_c,
        sma20: sma_a,
        sma50: sma_b,
        sma200: sma_c,
        rsi: simple_rsi(&closes, cfg.rsi_period),
        macd: macd(&closes, cfg.macd_fast, cfg.macd_slow, cfg.macd_signal),
        mfi: mfi(candles, cfg.mfi_period),
        atr: atr(candles, cfg.atr_period),
    }
}
