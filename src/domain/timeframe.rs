use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::config::{TIMEFRAMES, TimeframeProfile};
use crate::utils::TimeUtils;

/// The chart intervals the engine analyses, finest first.
/// Declaration order is the stable output order.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
pub enum Timeframe {
    #[serde(rename = "15m")]
    #[strum(to_string = "15m")]
    M15,
    #[serde(rename = "30m")]
    #[strum(to_string = "30m")]
    M30,
    #[serde(rename = "1h")]
    #[strum(to_string = "1h")]
    H1,
    #[serde(rename = "4h")]
    #[strum(to_string = "4h")]
    H4,
    #[serde(rename = "1d")]
    #[strum(to_string = "1d")]
    D1,
}

impl Timeframe {
    pub fn profile(self) -> TimeframeProfile {
        match self {
            Timeframe::M15 => TIMEFRAMES.m15,
            Timeframe::M30 => TIMEFRAMES.m30,
            Timeframe::H1 => TIMEFRAMES.h1,
            Timeframe::H4 => TIMEFRAMES.h4,
            Timeframe::D1 => TIMEFRAMES.d1,
        }
    }

    pub fn weight(self) -> f64 {
        self.profile().weight
    }

    pub fn duration_secs(self) -> i64 {
        match self {
            Timeframe::M15 => TimeUtils::S_IN_15_MIN,
            Timeframe::M30 => TimeUtils::S_IN_30_MIN,
            Timeframe::H1 => TimeUtils::S_IN_H,
            Timeframe::H4 => TimeUtils::S_IN_4_H,
            Timeframe::D1 => TimeUtils::S_IN_D,
        }
    }

    /// Risk multipliers for an arbitrary label; unknown labels size like 1h
    pub fn profile_for_label(label: &str) -> TimeframeProfile {
        Timeframe::from_str(label)
            .map(Timeframe::profile)
            .unwrap_or(TIMEFRAMES.h1)
    }

    /// Vote weight for an arbitrary label; unknown labels get the fallback weight
    pub fn weight_for_label(label: &str) -> f64 {
        Timeframe::from_str(label)
            .map(Timeframe::weight)
            .unwrap_or(TIMEFRAMES.fallback_weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_labels_round_trip_through_strum() {
        let labels: Vec<String> = Timeframe::iter().map(|tf| tf.to_string()).collect();
        assert_eq!(labels, vec!["15m", "30m", "1h", "4h", "1d"]);
        assert_eq!(Timeframe::from_str("4h").unwrap(), Timeframe::H4);
        assert!(Timeframe::from_str("2h").is_err());
        assert_eq!(serde_json::to_string(&Timeframe::D1).unwrap(), "\"1d\"");
    }

    #[test]
    fn test_weights_and_multipliers() {
        let weights: Vec<f64> = Timeframe::iter().map(Timeframe::weight).collect();
        assert_eq!(weights, vec![0.10, 0.15, 0.20, 0.25, 0.50]);
        assert_eq!(Timeframe::M15.profile().target_mult, 0.5);
        assert_eq!(Timeframe::D1.profile().stop_mult, 1.0);
    }

    #[test]
    fn test_unknown_labels_fall_back() {
        assert_eq!(Timeframe::profile_for_label("1w"), Timeframe::H1.profile());
        assert_eq!(Timeframe::weight_for_label("1w"), 0.1);
        assert_eq!(Timeframe::weight_for_label("4h"), 0.25);
    }

    #[test]
    fn test_ordering_is_finest_first() {
        assert!(Timeframe::M15 < Timeframe::M30);
        assert!(Timeframe::H4 < Timeframe::D1);
        assert_eq!(Timeframe::H4.duration_secs(), 4 * 3600);
    }
}
