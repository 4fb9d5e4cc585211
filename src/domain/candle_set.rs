use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::{Candle, Timeframe};

/// Candle series keyed by timeframe. Missing timeframes are simply absent.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(transparent)]
pub struct CandleSet {
    series: BTreeMap<Timeframe, Vec<Candle>>,
}

impl CandleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, timeframe: Timeframe, candles: Vec<Candle>) {
        self.series.insert(timeframe, candles);
    }

    pub fn with(mut self, timeframe: Timeframe, candles: Vec<Candle>) -> Self {
        self.insert(timeframe, candles);
        self
    }

    /// Candles for `timeframe`, empty when absent
    pub fn get(&self, timeframe: Timeframe) -> &[Candle] {
        self.series.get(&timeframe).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn timeframes(&self) -> impl Iterator<Item = Timeframe> + '_ {
        self.series.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Close of the newest candle on the finest timeframe that has any data
    pub fn latest_close(&self) -> Option<f64> {
        self.series
            .values()
            .find_map(|candles| candles.last())
            .map(|candle| candle.close)
    }
}
