use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::domain::Trend;

/// Change of character: swing highs and lows started stepping in a new direction.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChochPattern {
    #[serde(rename = "type")]
    pub kind: Trend,
    pub strength: f64,
    // Last relevant swing extreme (high for bullish, low for bearish)
    pub level: f64,
    pub aggressiveness: f64,
}

/// Break of structure following a CHOCH.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BosPattern {
    #[serde(rename = "type")]
    pub kind: Trend,
    pub confirmed: bool,
    pub level: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Absorption {
    Buy,
    Sell,
    #[default]
    None,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Divergence {
    Bullish,
    Bearish,
    #[default]
    None,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VolumeAnalysis {
    pub absorption: Absorption,
    pub divergence: Divergence,
    pub climax: bool,
    pub fakeout: bool,
}

impl Absorption {
    /// Absorption in favour of `trend` (buyers absorbing supports a bullish call)
    pub fn supports(self, trend: Trend) -> bool {
        matches!(
            (self, trend),
            (Absorption::Buy, Trend::Bullish) | (Absorption::Sell, Trend::Bearish)
        )
    }
}

impl Divergence {
    pub fn supports(self, trend: Trend) -> bool {
        matches!(
            (self, trend),
            (Divergence::Bullish, Trend::Bullish) | (Divergence::Bearish, Trend::Bearish)
        )
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FakeoutKind {
    #[default]
    BreakoutFailure,
    InsideCandle,
    Spring,
    VolumeClimax,
}

/// Outcome of the five-candle fakeout detector.
///
/// `detected == false` with a non-zero confidence means a pattern matched but it
/// reads as continuation rather than a trap.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FakeoutSignal {
    pub detected: bool,
    #[serde(rename = "type")]
    pub kind: FakeoutKind,
    pub confidence: u8,
}

impl FakeoutSignal {
    pub fn trap(kind: FakeoutKind, confidence: u8) -> Self {
        Self {
            detected: true,
            kind,
            confidence,
        }
    }

    pub fn continuation(kind: FakeoutKind, confidence: u8) -> Self {
        Self {
            detected: false,
            kind,
            confidence,
        }
    }
}
