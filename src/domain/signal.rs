use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// The call made for a timeframe (or overall).
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, AsRefStr,
)]
pub enum Signal {
    #[serde(rename = "BUY")]
    #[strum(to_string = "BUY")]
    Buy,
    #[serde(rename = "SELL")]
    #[strum(to_string = "SELL")]
    Sell,
    #[default]
    #[serde(rename = "NEUTRAL")]
    #[strum(to_string = "NEUTRAL")]
    Neutral,
}

impl Signal {
    pub fn is_directional(self) -> bool {
        self != Signal::Neutral
    }

    /// BUY <-> SELL, NEUTRAL stays NEUTRAL
    pub fn opposite(self) -> Signal {
        match self {
            Signal::Buy => Signal::Sell,
            Signal::Sell => Signal::Buy,
            Signal::Neutral => Signal::Neutral,
        }
    }
}

/// Direction of a structural pattern.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Trend {
    Bullish,
    Bearish,
}

impl Trend {
    pub fn signal(self) -> Signal {
        match self {
            Trend::Bullish => Signal::Buy,
            Trend::Bearish => Signal::Sell,
        }
    }
}
