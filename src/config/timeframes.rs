//! Per-timeframe weights and risk multipliers

/// Settings attached to one analysed timeframe
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeframeProfile {
    // Contribution to the overall (multi-timeframe) vote
    pub weight: f64,
    // ATR multiples for the target and the stop-loss distance
    pub target_mult: f64,
    pub stop_mult: f64,
}

pub struct TimeframeConfig {
    pub m15: TimeframeProfile,
    pub m30: TimeframeProfile,
    pub h1: TimeframeProfile,
    pub h4: TimeframeProfile,
    pub d1: TimeframeProfile,
    // Weight used for labels outside the known set
    pub fallback_weight: f64,
}

pub const TIMEFRAMES: TimeframeConfig = TimeframeConfig {
    m15: TimeframeProfile {
        weight: 0.10,
        target_mult: 0.5, // Tight for scalping
        stop_mult: 0.3,
    },
    m30: TimeframeProfile {
        weight: 0.15,
        target_mult: 0.7,
        stop_mult: 0.4,
    },
    h1: TimeframeProfile {
        weight: 0.20,
        target_mult: 1.0,
        stop_mult: 0.5,
    },
    h4: TimeframeProfile {
        weight: 0.25,
        target_mult: 1.5,
        stop_mult: 0.8,
    },
    d1: TimeframeProfile {
        weight: 0.50,
        target_mult: 2.0, // Position trades
        stop_mult: 1.0,
    },
    fallback_weight: 0.1,
};
