//! CHOCH (change of character) and BOS (break of structure) detection.
//!
//! Both work on the trailing structure window. CHOCH first tries the nested
//! ("overlap") reading of the last three swing highs and lows; only when that
//! resolves no direction does it fall back to comparing the last two.

use crate::analysis::swing_points::{SwingKind, SwingPoint, find_swing_points};
use crate::config::ANALYSIS;
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::domain::{Candle, Trend};
use crate::models::{BosPattern, ChochPattern};
use crate::utils::maths_utils::{get_max, get_min, safe_ratio};

pub fn detect_choch(candles: &[Candle]) -> Option<ChochPattern> {
    let window = ANALYSIS.structure.window;
    if candles.len() < window {
        return None;
    }
    let recent = &candles[candles.len() - window..];

    let highs = find_swing_points(recent, SwingKind::High);
    let lows = find_swing_points(recent, SwingKind::Low);

    let pattern = overlap_choch(recent, &highs, &lows).or_else(|| sequential_choch(recent, &highs, &lows));

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_structure {
        log::debug!(
            "Structure: {} swing highs {:?}, {} swing lows {:?} -> {:?}",
            highs.len(),
            highs.iter().map(|p| p.value).collect::<Vec<_>>(),
            lows.len(),
            lows.iter().map(|p| p.value).collect::<Vec<_>>(),
            pattern
        );
    }

    pattern
}

/// Last `N` swing values, oldest first
fn last_values<const N: usize>(points: &[SwingPoint]) -> Option<[f64; N]> {
    if points.len() < N {
        return None;
    }
    let mut out = [0.0; N];
    for (slot, point) in out.iter_mut().zip(&points[points.len() - N..]) {
        *slot = point.value;
    }
    Some(out)
}

fn overlap_choch(recent: &[Candle], highs: &[SwingPoint], lows: &[SwingPoint]) -> Option<ChochPattern> {
    let cfg = &ANALYSIS.structure;
    let [prev_high, mid_high, last_high] = last_values::<3>(highs)?;
    let [prev_low, mid_low, last_low] = last_values::<3>(lows)?;

    let big_bullish = last_high > prev_high && last_low > prev_low;
    let big_bearish = last_high < prev_high && last_low < prev_low;
    let small_bullish = mid_high > prev_high && mid_low > prev_low;
    let small_bearish = mid_high < prev_high && mid_low < prev_low;

    let (dominant, overlap) = if big_bullish && small_bullish {
        (Trend::Bullish, 1.0)
    } else if big_bearish && small_bearish {
        (Trend::Bearish, 1.0)
    } else if big_bullish && small_bearish {
        // Conflict: the side with the larger outer move wins, ties go bearish
        let upper = last_high - prev_high;
        let lower = (last_low - prev_low).abs();
        let trend = if upper > lower { Trend::Bullish } else { Trend::Bearish };
        (trend, 0.5)
    } else if big_bearish && small_bullish {
        let upper = (last_high - prev_high).abs();
        let lower = prev_low - last_low;
        let trend = if lower > upper { Trend::Bearish } else { Trend::Bullish };
        (trend, 0.5)
    } else {
        return None;
    };

    let aggressiveness = calculate_aggressiveness(recent, dominant);
    let strength =
        (cfg.overlap_base_strength + cfg.overlap_strength_bonus * overlap + aggressiveness).min(cfg.max_strength);

    Some(ChochPattern {
        kind: dominant,
        strength,
        level: match dominant {
            Trend::Bullish => last_high,
            Trend::Bearish => last_low,
        },
        aggressiveness: aggressiveness + overlap * cfg.overlap_aggressiveness_bonus,
    })
}

fn sequential_choch(recent: &[Candle], highs: &[SwingPoint], lows: &[SwingPoint]) -> Option<ChochPattern> {
    let cfg = &ANALYSIS.structure;
    let [prev_high, last_high] = last_values::<2>(highs)?;
    let [prev_low, last_low] = last_values::<2>(lows)?;

    let (kind, level) = if last_high > prev_high && last_low > prev_low {
        (Trend::Bullish, last_high)
    } else if last_high < prev_high && last_low < prev_low {
        (Trend::Bearish, last_low)
    } else {
        return None;
    };

    let aggressiveness = calculate_aggressiveness(recent, kind);
    Some(ChochPattern {
        kind,
        strength: (cfg.fallback_base_strength + aggressiveness).min(cfg.max_strength),
        level,
        aggressiveness,
    })
}

/// Sum of body/range x 10 over recent candles moving in `trend`'s direction, capped.
/// Zero-range candles contribute nothing.
pub fn calculate_aggressiveness(candles: &[Candle], trend: Trend) -> f64 {
    let cfg = &ANALYSIS.structure;
    let start = candles.len().saturating_sub(cfg.aggressiveness_window);
    let total: f64 = candles[start..]
        .iter()
        .filter(|c| c.direction() == Some(trend))
        .map(|c| safe_ratio(c.body(), c.range()) * 10.0)
        .sum();
    total.min(cfg.aggressiveness_cap)
}

/// A close beyond the level set by the older part of the BOS window, in the CHOCH's direction
pub fn detect_bos(candles: &[Candle], choch: Option<&ChochPattern>) -> Option<BosPattern> {
    let cfg = &ANALYSIS.structure;
    let choch = choch?;
    if candles.len() < cfg.bos_window {
        return None;
    }

    let recent = &candles[candles.len() - cfg.bos_window..];
    let current_close = recent[recent.len() - 1].close;
    let reference = &recent[..recent.len() - cfg.bos_exclude_recent];

    let broken = match choch.kind {
        Trend::Bullish => {
            let highs: Vec<f64> = reference.iter().map(|c| c.high).collect();
            let resistance = get_max(&highs);
            (current_close > resistance).then_some(resistance)
        }
        Trend::Bearish => {
            let lows: Vec<f64> = reference.iter().map(|c| c.low).collect();
            let support = get_min(&lows);
            (current_close < support).then_some(support)
        }
    };

    broken.map(|level| BosPattern {
        kind: choch.kind,
        confirmed: true,
        level,
    })
}
