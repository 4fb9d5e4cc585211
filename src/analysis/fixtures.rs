//! Deterministic candle series shared by the analysis tests.

use std::collections::HashMap;

use crate::domain::Candle;

const WICK: f64 = 0.3;
const OPEN_LEAD: f64 = 0.3;
const VOLUME: u64 = 1_000;

fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

/// Candles closing on `closes`. Each open sits 30% of the way from the previous close
/// to this close, so neighbouring highs/lows never tie.
pub fn build(closes: &[f64], start: f64) -> Vec<Candle> {
    let mut prev = start;
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = prev + OPEN_LEAD * (close - prev);
            prev = close;
            Candle::new(
                i as i64 * 60,
                open,
                open.max(close) + WICK,
                open.min(close) - WICK,
                close,
                VOLUME,
            )
        })
        .collect()
}

/// `legs_up` steps of `up` then `legs_down` steps of `-down`, repeated, `n` closes in total
pub fn zigzag(n: usize, start: f64, up: f64, down: f64, legs_up: usize, legs_down: usize) -> Vec<f64> {
    let mut closes = Vec::with_capacity(n + legs_up + legs_down);
    let mut x = start;
    while closes.len() < n {
        for _ in 0..legs_up {
            x += up;
            closes.push(round4(x));
        }
        for _ in 0..legs_down {
            x -= down;
            closes.push(round4(x));
        }
    }
    closes.truncate(n);
    closes
}

/// Rising stair-step: higher highs and higher lows throughout
pub fn uptrend(n: usize) -> Vec<Candle> {
    build(&zigzag(n, 100.0, 1.2, 0.8, 3, 3), 100.0)
}

pub fn downtrend(n: usize) -> Vec<Candle> {
    build(&zigzag(n, 200.0, -1.2, -0.8, 3, 3), 200.0)
}

/// Oscillates 100, 101, 100, 99 with no net drift
pub fn flat(n: usize) -> Vec<Candle> {
    let pattern = [100.0, 101.0, 100.0, 99.0];
    let closes: Vec<f64> = (0..n).map(|i| pattern[i % pattern.len()]).collect();
    build(&closes, 100.0)
}

/// 20 identical green candles (open 99.5, close 100.5, high 102, low 98) with
/// selected highs/lows overridden to plant swing points.
pub fn structure_window(highs: &[(usize, f64)], lows: &[(usize, f64)]) -> Vec<Candle> {
    let highs: HashMap<usize, f64> = highs.iter().copied().collect();
    let lows: HashMap<usize, f64> = lows.iter().copied().collect();
    (0..20)
        .map(|i| {
            Candle::new(
                i as i64 * 60,
                99.5,
                highs.get(&i).copied().unwrap_or(102.0),
                lows.get(&i).copied().unwrap_or(98.0),
                100.5,
                VOLUME,
            )
        })
        .collect()
}

/// Plain candle with explicit OHLCV, time derived from position
pub fn candle(i: i64, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Candle {
    Candle::new(i * 60, open, high, low, close, volume)
}
