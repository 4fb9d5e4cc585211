use serde::{Deserialize, Serialize};

use crate::domain::Trend;

// One OHLCV bar. `time` is epoch seconds; series are ascending by time.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Candle {
    // A constructor for convenience
    pub fn new(time: i64, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Self {
        Candle {
            time,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    pub fn is_green(&self) -> bool {
        self.close > self.open
    }

    pub fn is_red(&self) -> bool {
        self.close < self.open
    }

    /// Direction of the body, `None` for a doji
    pub fn direction(&self) -> Option<Trend> {
        if self.is_green() {
            Some(Trend::Bullish)
        } else if self.is_red() {
            Some(Trend::Bearish)
        } else {
            None
        }
    }

    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    pub fn upper_wick(&self) -> f64 {
        self.high - self.open.max(self.close)
    }

    pub fn lower_wick(&self) -> f64 {
        self.open.min(self.close) - self.low
    }

    pub fn volume_f64(&self) -> f64 {
        self.volume as f64
    }

    /// True when this candle's high/low sit within `outer`'s (inclusive)
    pub fn is_inside(&self, outer: &Candle) -> bool {
        self.high <= outer.high && self.low >= outer.low
    }

    /// Largest of the three true-range candidates against the previous close
    pub fn true_range(&self, prev_close: f64) -> f64 {
        self.range()
            .max((self.high - prev_close).abs())
            .max((self.low - prev_close).abs())
    }

    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    pub fn has_finite_prices(&self) -> bool {
        [self.open, self.high, self.low, self.close]
            .iter()
            .all(|p| p.is_finite())
    }
}
