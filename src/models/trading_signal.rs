use serde::{Deserialize, Serialize};

use crate::domain::{Signal, Timeframe};
use crate::models::indicators::{IndicatorPanel, IndicatorSnapshot};
use crate::models::news::NewsSentimentSummary;
use crate::models::patterns::{BosPattern, ChochPattern, FakeoutSignal, VolumeAnalysis};

pub const NO_CHART_DATA_REASON: &str = "No chart data available";

/// Decision for a single timeframe. Built once by the fusion engine, never mutated.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TradingSignal {
    pub timeframe: Timeframe,
    pub signal: Signal,
    pub confidence: u8,
    // In the order the contributing rules fired
    pub reasons: Vec<String>,
    pub entry: f64,
    pub target: f64,
    pub stop_loss: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choch: Option<ChochPattern>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bos: Option<BosPattern>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<VolumeAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fakeout: Option<FakeoutSignal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indicators: Option<IndicatorSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panel: Option<IndicatorPanel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub news: Option<NewsSentimentSummary>,
}

impl TradingSignal {
    /// Placeholder for a timeframe without usable candles
    pub fn no_data(timeframe: Timeframe, current_price: f64) -> Self {
        Self {
            timeframe,
            signal: Signal::Neutral,
            confidence: 0,
            reasons: vec![NO_CHART_DATA_REASON.to_string()],
            entry: current_price,
            target: current_price,
            stop_loss: current_price,
            choch: None,
            bos: None,
            volume: None,
            fakeout: None,
            indicators: None,
            panel: None,
            news: None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.confidence == 0 && self.reasons.iter().any(|r| r == NO_CHART_DATA_REASON)
    }
}

/// One signal per analysed timeframe (stable order) plus the weighted overall call.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MultiTimeframeAnalysis {
    pub signals: Vec<TradingSignal>,
    pub overall_signal: Signal,
    pub confidence: u8,
    pub summary: String,
    pub news_impact: String,
}

impl MultiTimeframeAnalysis {
    pub fn signal_for(&self, timeframe: Timeframe) -> Option<&TradingSignal> {
        self.signals.iter().find(|s| s.timeframe == timeframe)
    }
}
