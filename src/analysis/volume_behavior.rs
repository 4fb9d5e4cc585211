use crate::config::ANALYSIS;
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::domain::Candle;
use crate::models::{Absorption, Divergence, VolumeAnalysis};
use crate::utils::maths_utils::{get_max, get_min, mean};

fn average_volume(candles: &[Candle]) -> f64 {
    let volumes: Vec<f64> = candles.iter().map(Candle::volume_f64).collect();
    mean(&volumes)
}

/// Absorption, divergence, climax and low-volume fakeout flags over the trailing volume window.
/// Short series read as all-none.
pub fn analyze_volume(candles: &[Candle]) -> VolumeAnalysis {
    let cfg = &ANALYSIS.volume;
    if candles.len() < cfg.window {
        return VolumeAnalysis::default();
    }

    let recent = &candles[candles.len() - cfg.window..];
    let avg_volume = average_volume(recent);
    let last = &recent[recent.len() - 1];
    let volume = last.volume_f64();
    let range = last.range();
    let heavy = volume > avg_volume * cfg.absorption_volume_ratio;

    // Heavy volume that barely moves price: the other side is soaking it up
    let small_move = |moved: f64| moved > 0.0 && moved < range * cfg.absorption_max_body_ratio;
    let absorption = if last.is_red() && heavy && small_move(last.open - last.close) {
        Absorption::Buy
    } else if last.is_green() && heavy && small_move(last.close - last.open) {
        Absorption::Sell
    } else {
        Absorption::None
    };

    let divergence = volume_divergence(recent);

    let climax = volume > avg_volume * cfg.climax_volume_ratio;

    let thin = volume < avg_volume * cfg.fakeout_volume_ratio;
    let big_move = last.body() > range * cfg.fakeout_body_ratio;
    let big_drop = last.is_red() && (last.open - last.close) > range * cfg.fakeout_drop_ratio;
    let fakeout = thin && (big_move || big_drop);

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_volume {
        log::debug!(
            "Volume: avg {:.1}, last {} ({:.2}x) -> absorption {}, divergence {}, climax {}, fakeout {}",
            avg_volume,
            last.volume,
            volume / avg_volume.max(f64::MIN_POSITIVE),
            absorption,
            divergence,
            climax,
            fakeout
        );
    }

    VolumeAnalysis {
        absorption,
        divergence,
        climax,
        fakeout,
    }
}

/// Compare the two halves of the window: new extremes on fading volume.
/// When both fire, bullish (the low side) wins.
fn volume_divergence(recent: &[Candle]) -> Divergence {
    let cfg = &ANALYSIS.volume;
    let (first, second) = recent.split_at(recent.len() / 2);
    let fading = average_volume(second) < average_volume(first) * cfg.divergence_volume_ratio;
    if !fading {
        return Divergence::None;
    }

    let highs = |half: &[Candle]| half.iter().map(|c| c.high).collect::<Vec<f64>>();
    let lows = |half: &[Candle]| half.iter().map(|c| c.low).collect::<Vec<f64>>();

    if get_min(&lows(second)) < get_min(&lows(first)) {
        Divergence::Bullish
    } else if get_max(&highs(second)) > get_max(&highs(first)) {
        Divergence::Bearish
    } else {
        Divergence::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures::{self, candle};

    fn quiet(n: usize, volume: u64) -> Vec<Candle> {
        (0..n as i64)
            .map(|i| candle(i, 100.0, 101.0, 99.0, 100.2, volume))
            .collect()
    }

    #[test]
    fn test_short_series_is_all_none() {
        for n in [0, 1, 19] {
            assert_eq!(analyze_volume(&quiet(n, 1_000)), VolumeAnalysis::default());
        }
    }

    #[test]
    fn test_buy_absorption() {
        let mut candles = quiet(19, 1_000);
        // Red, 3x volume, drop 0.5 on a 3.0 range
        candles.push(candle(19, 100.0, 101.0, 98.0, 99.5, 3_000));
        let volume = analyze_volume(&candles);
        assert_eq!(volume.absorption, Absorption::Buy);
        assert!(!volume.climax, "3000 is under 3x the 1100 average");
        assert!(!volume.fakeout);
    }

    #[test]
    fn test_sell_absorption_and_climax() {
        let mut candles = quiet(19, 1_000);
        candles.push(candle(19, 100.0, 101.5, 98.5, 100.4, 5_000));
        let volume = analyze_volume(&candles);
        assert_eq!(volume.absorption, Absorption::Sell);
        assert!(volume.climax, "5000 > 3 x 1200");
    }

    #[test]
    fn test_wide_body_on_heavy_volume_is_not_absorption() {
        let mut candles = quiet(19, 1_000);
        candles.push(candle(19, 100.0, 102.1, 99.9, 102.0, 3_000));
        assert_eq!(analyze_volume(&candles).absorption, Absorption::None);
    }

    #[test]
    fn test_bearish_divergence() {
        let mut candles: Vec<Candle> = (0..10)
            .map(|i| candle(i, 100.0, 101.0, 99.0, 100.2, 2_000))
            .collect();
        candles.extend((10..20).map(|i| candle(i, 100.0, 101.0 + (i - 9) as f64 * 0.2, 99.0, 100.2, 1_000)));
        assert_eq!(analyze_volume(&candles).divergence, Divergence::Bearish);
    }

    #[test]
    fn test_bullish_divergence() {
        let mut candles: Vec<Candle> = (0..10)
            .map(|i| candle(i, 100.0, 101.0, 99.0, 99.8, 2_000))
            .collect();
        candles.extend((10..20).map(|i| candle(i, 100.0, 101.0, 99.0 - (i - 9) as f64 * 0.2, 99.8, 1_000)));
        assert_eq!(analyze_volume(&candles).divergence, Divergence::Bullish);
    }

    #[test]
    fn test_new_highs_on_steady_volume_is_not_divergence() {
        let candles = fixtures::uptrend(40);
        assert_eq!(analyze_volume(&candles).divergence, Divergence::None);
    }

    #[test]
    fn test_low_volume_big_body_fakeout() {
        let mut candles = quiet(19, 1_000);
        candles.push(candle(19, 100.0, 103.2, 99.9, 103.0, 100));
        let volume = analyze_volume(&candles);
        assert!(volume.fakeout);
        assert_eq!(volume.absorption, Absorption::None);
    }

    #[test]
    fn test_zero_volume_and_zero_range_are_harmless() {
        let candles: Vec<Candle> = (0..25).map(|i| candle(i, 50.0, 50.0, 50.0, 50.0, 0)).collect();
        assert_eq!(analyze_volume(&candles), VolumeAnalysis::default());
    }
}
