use argminmax::ArgMinMax;
use statrs::statistics::Statistics;

/// Largest value of a non-empty slice. Empty input gives `f64::NEG_INFINITY`.
pub fn get_max(vec: &[f64]) -> f64 {
    if vec.is_empty() {
        return f64::NEG_INFINITY;
    }
    let max_index: usize = vec.argmax();
    vec[max_index]
}

/// Smallest value of a non-empty slice. Empty input gives `f64::INFINITY`.
pub fn get_min(vec: &[f64]) -> f64 {
    if vec.is_empty() {
        return f64::INFINITY;
    }
    let min_index: usize = vec.argmin();
    vec[min_index]
}

/// Arithmetic mean, 0.0 for an empty slice (statrs would give NaN)
pub fn mean(vec: &[f64]) -> f64 {
    if vec.is_empty() {
        return 0.0;
    }
    Statistics::mean(vec.iter())
}

/// Round to cents (2 decimal places), the precision of every price we report
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `part / whole`, or 0.0 when `whole` is not positive (zero-range candles, zero volume)
pub fn safe_ratio(part: f64, whole: f64) -> f64 {
    if whole > 0.0 { part / whole } else { 0.0 }
}

/// Saturating add that also caps at `ceiling`
pub fn add_capped(value: u8, bonus: u8, ceiling: u8) -> u8 {
    value.saturating_add(bonus).min(ceiling)
}
