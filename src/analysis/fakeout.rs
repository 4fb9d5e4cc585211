//! Five-candle fakeout detector.
//!
//! Rules are checked in priority order and the first match wins. Several rules
//! recognise a pattern that signals continuation; those come back with
//! `detected == false` but keep their kind and confidence.

use crate::config::ANALYSIS;
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::domain::Candle;
use crate::models::{FakeoutKind, FakeoutSignal};
use crate::utils::maths_utils::{get_max, get_min, mean};

pub fn detect_fakeout(candles: &[Candle]) -> FakeoutSignal {
    let cfg = &ANALYSIS.fakeout;
    if candles.len() < cfg.window {
        return FakeoutSignal::default();
    }
    let recent = &candles[candles.len() - cfg.window..];
    let result = match_rules(recent);

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_fakeout {
        log::debug!("Fakeout: {:?}", result);
    }

    result
}

fn match_rules(recent: &[Candle]) -> FakeoutSignal {
    let cfg = &ANALYSIS.fakeout;
    let [c1, c2, c3, c4, c5] = [recent[0], recent[1], recent[2], recent[3], recent[4]];
    let prior = &recent[..4];
    let avg_volume = mean(&prior.iter().map(Candle::volume_f64).collect::<Vec<_>>());
    let vol = Candle::volume_f64;

    // 1. Big red candle, green inside bar on lighter volume, then a breakout on heavier volume
    if c3.is_red()
        && c3.body() > c3.range() * cfg.big_body_ratio
        && c4.is_green()
        && c4.is_inside(&c3)
        && vol(&c4) < vol(&c3) * cfg.inside_volume_ratio
        && c5.high > c4.high
        && vol(&c5) > vol(&c4) * cfg.breakout_volume_ratio
    {
        return FakeoutSignal::continuation(FakeoutKind::InsideCandle, 85);
    }

    // 2. Heavy bearish engulfing confirmed by a second red candle
    if c3.is_green()
        && c4.is_red()
        && c4.open >= c3.high
        && c4.close <= c3.low
        && vol(&c4) > vol(&c3) * cfg.engulfing_volume_ratio
        && c5.is_red()
    {
        return FakeoutSignal::continuation(FakeoutKind::InsideCandle, 90);
    }

    // 3. Volume spike rejected by a long wick
    let rejection = c5.range() * cfg.rejection_wick_ratio;
    if vol(&c5) > avg_volume * cfg.climax_volume_ratio
        && (c5.upper_wick() > rejection || c5.lower_wick() > rejection)
    {
        return FakeoutSignal::trap(FakeoutKind::VolumeClimax, 80);
    }

    // 4. New extreme on thin volume
    let prior_high = get_max(&prior.iter().map(|c| c.high).collect::<Vec<_>>());
    let prior_low = get_min(&prior.iter().map(|c| c.low).collect::<Vec<_>>());
    let thin = vol(&c5) < avg_volume * cfg.failed_breakout_volume_ratio;
    if thin && (c5.high > prior_high || c5.low < prior_low) {
        return FakeoutSignal::trap(FakeoutKind::BreakoutFailure, 75);
    }

    // 5. Inside bar with drying volume: compression before a real move
    if c5.is_inside(&c4) && vol(&c5) < vol(&c4) * cfg.compression_volume_ratio {
        return FakeoutSignal::continuation(FakeoutKind::InsideCandle, 60);
    }

    // 6. Fourth candle extends the extreme on lower volume than the first two
    let fading = vol(&c4) < vol(&c2) && vol(&c4) < vol(&c1);
    let higher_high = c4.high > c2.high && c4.high > c1.high;
    let lower_low = c4.low < c2.low && c4.low < c1.low;
    if fading && (higher_high || lower_low) {
        return FakeoutSignal::trap(FakeoutKind::BreakoutFailure, 70);
    }

    // 7. Spring / upthrust: heavy break beyond the third candle, reversed by the last close
    let heavy_break = vol(&c4) > avg_volume * cfg.spring_volume_ratio;
    let spring = c4.low < c3.low && c5.close > c4.high && c5.close > c3.low;
    let upthrust = c4.high > c3.high && c5.close < c4.low && c5.close < c3.high;
    if heavy_break && (spring || upthrust) {
        return FakeoutSignal::trap(FakeoutKind::Spring, 85);
    }

    FakeoutSignal::default()
}
