use crate::config::ANALYSIS;
use crate::domain::Candle;

/// Which extreme a swing point marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwingKind {
    High,
    Low,
}

impl SwingKind {
    pub fn value(self, candle: &Candle) -> f64 {
        match self {
            SwingKind::High => candle.high,
            SwingKind::Low => candle.low,
        }
    }

    /// `candidate` is strictly more extreme than `other` in this direction. Ties never beat.
    pub fn beats(self, candidate: f64, other: f64) -> bool {
        match self {
            SwingKind::High => candidate > other,
            SwingKind::Low => candidate < other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwingPoint {
    // Position inside the analysed window
    pub index: usize,
    pub value: f64,
    pub kind: SwingKind,
}

/// Swing points using the configured look-around radius
pub fn find_swing_points(candles: &[Candle], kind: SwingKind) -> Vec<SwingPoint> {
    find_swing_points_with_radius(candles, kind, ANALYSIS.swing.radius)
}

/// Index `i` is a swing point when its value strictly beats every other value in
/// `[i - radius, i + radius]`. Returned in index order.
pub fn find_swing_points_with_radius(
    candles: &[Candle],
    kind: SwingKind,
    radius: usize,
) -> Vec<SwingPoint> {
    if candles.len() < 2 * radius + 1 {
        return Vec::new();
    }

    (radius..candles.len() - radius)
        .filter_map(|i| {
            let value = kind.value(&candles[i]);
            let dominates = (i - radius..=i + radius)
                .filter(|&j| j != i)
                .all(|j| kind.beats(value, kind.value(&candles[j])));
            dominates.then_some(SwingPoint { index: i, value, kind })
        })
        .collect()
}
