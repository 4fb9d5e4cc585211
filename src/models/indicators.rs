use serde::{Deserialize, Serialize};

use crate::domain::Signal;

/// RSI + EMA read-out that feeds the fusion engine.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSnapshot {
    pub rsi: f64,
    pub rsi_signal: Signal,
    pub ema9: f64,
    pub ema21: f64,
    pub ema90: f64,
    pub ema_signal: Signal,
    pub combined_signal: Signal,
    pub confidence: u8,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MacdReading {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// The dashboard's indicator block. Averages without enough data read 0,
/// oscillators read 50.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorPanel {
    pub ema12: f64,
    pub ema26: f64,
    pub ema50: f64,
    pub sma20: f64,
    pub sma50: f64,
    pub sma200: f64,
    pub rsi: f64,
    pub macd: MacdReading,
    pub mfi: f64,
    pub atr: f64,
}
