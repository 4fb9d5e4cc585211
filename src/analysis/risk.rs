//! Entry / target / stop-loss sizing from ATR, nearby levels and timeframe multipliers.

use serde::{Deserialize, Serialize};

use crate::analysis::indicators::atr;
use crate::config::ANALYSIS;
use crate::config::TimeframeProfile;
use crate::domain::{Candle, Signal};
use crate::utils::maths_utils::{get_max, get_min, round2};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiskLevels {
    pub entry: f64,
    pub target: f64,
    pub stop_loss: f64,
}

impl RiskLevels {
    pub fn flat(price: f64) -> Self {
        Self {
            entry: price,
            target: price,
            stop_loss: price,
        }
    }
}

/// Levels for `signal` at `current_price`. NEUTRAL or a short series leaves all three at the price.
///
/// A BUY always ends with target > entry > stop and a SELL with target < entry < stop,
/// at least one tick apart after rounding.
pub fn size_position(
    signal: Signal,
    current_price: f64,
    profile: TimeframeProfile,
    candles: &[Candle],
) -> RiskLevels {
    let cfg = &ANALYSIS.risk;
    if !signal.is_directional() || candles.len() < cfg.min_candles {
        return RiskLevels::flat(current_price);
    }

    let atr = atr(candles, cfg.atr_period);
    let recent = &candles[candles.len() - cfg.level_window..];
    let resistance = get_max(&recent.iter().map(|c| c.high).collect::<Vec<_>>());
    let support = get_min(&recent.iter().map(|c| c.low).collect::<Vec<_>>());

    let entry = current_price;
    let target_distance = atr * profile.target_mult;
    let stop_distance = atr * profile.stop_mult;

    let levels = match signal {
        Signal::Buy => {
            let mut target = entry + target_distance;
            // Don't reach past nearby resistance
            if target > resistance && resistance > entry {
                let clipped = resistance * (1.0 - cfg.level_buffer);
                if clipped > entry {
                    target = clipped;
                }
            }
            let mut stop_loss = entry - stop_distance;
            if support < entry && entry - support < stop_distance {
                stop_loss = support * (1.0 - cfg.level_buffer);
            }
            RiskLevels { entry, target, stop_loss }
        }
        Signal::Sell => {
            let mut target = entry - target_distance;
            if target < support && support < entry {
                let clipped = support * (1.0 + cfg.level_buffer);
                if clipped < entry {
                    target = clipped;
                }
            }
            let mut stop_loss = entry + stop_distance;
            if resistance > entry && resistance - entry < stop_distance {
                stop_loss = resistance * (1.0 + cfg.level_buffer);
            }
            RiskLevels { entry, target, stop_loss }
        }
        Signal::Neutral => RiskLevels::flat(entry),
    };

    enforce_direction(signal, levels)
}

/// Round to cents and keep target/stop at least one tick on the correct side of entry
fn enforce_direction(signal: Signal, levels: RiskLevels) -> RiskLevels {
    let tick = ANALYSIS.risk.min_tick;
    let entry = round2(levels.entry);
    let target = round2(levels.target);
    let stop_loss = round2(levels.stop_loss);

    match signal {
        Signal::Buy => RiskLevels {
            entry,
            target: if target > entry { target } else { round2(entry + tick) },
            stop_loss: if stop_loss < entry { stop_loss } else { round2(entry - tick) },
        },
        Signal::Sell => RiskLevels {
            entry,
            target: if target < entry { target } else { round2(entry - tick) },
            stop_loss: if stop_loss > entry { stop_loss } else { round2(entry + tick) },
        },
        Signal::Neutral => RiskLevels { entry, target, stop_loss },
    }
}
