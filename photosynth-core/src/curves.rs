//! Normalization curves and averaging helpers
//!
//! Every curve maps `value / max` onto a pacing weight. A zero `max` yields
//! [`NEUTRAL`] instead of a NaN or infinity.

/// Midpoint returned whenever a ratio is undefined
pub const NEUTRAL: f64 = 0.5;

fn progress(value: f64, max: f64) -> Option<f64> {
    if max == 0.0 {
        None
    } else {
        Some(value / max)
    }
}

/// `numerator / (numerator + other)`, 0.5 when both are zero
pub fn ratio_or_neutral(numerator: f64, other: f64) -> f64 {
    let total = numerator + other;
    if total == 0.0 {
        NEUTRAL
    } else {
        numerator / total
    }
}

/// Linear rise; an `a` below 1 steepens the slope and caps the result at 1
pub fn normalized_linear(value: f64, max: f64, a: f64) -> f64 {
    let Some(x) = progress(value, max) else {
        return NEUTRAL;
    };
    if a < 1.0 {
        (x / a).min(1.0)
    } else {
        x / a
    }
}

pub fn normalized_linear_decay(value: f64, max: f64, a: f64) -> f64 {
    let Some(x) = progress(value, max) else {
        return NEUTRAL;
    };
    let x = 1.0 - x;
    if a < 1.0 {
        (x / a).min(1.0)
    } else {
        x / a
    }
}

/// Triangle peaking at half of `max`
pub fn normalized_pyramid(value: f64, max: f64) -> f64 {
    let Some(x) = progress(value, max) else {
        return NEUTRAL;
    };
    if x < 0.5 {
        x
    } else {
        1.0 - x
    }
}

/// Power-law rise. `a` must be at least 1 (checked by `Heuristics::validate`).
pub fn normalized_exponential(value: f64, max: f64, a: f64) -> f64 {
    match progress(value, max) {
        Some(x) => x.powf(a),
        None => NEUTRAL,
    }
}

pub fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

/// Arithmetic mean, 0 for an empty slice
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        sum(values) / values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn test_linear() {
        assert_eq!(normalized_linear(0.0, 1.0, 1.0), 0.0);
        assert_eq!(normalized_linear(0.5, 1.0, 1.0), 0.5);
        assert_eq!(normalized_linear(1.0, 1.0, 1.0), 1.0);
        // steeper slope saturates
        assert_eq!(normalized_linear(12.0, 24.0, 0.5), 1.0);
        assert_eq!(normalized_linear(6.0, 24.0, 0.5), 0.5);
    }

    #[test]
    fn test_linear_decay() {
        assert_eq!(normalized_linear_decay(0.0, 1.0, 1.0), 1.0);
        assert_eq!(normalized_linear_decay(0.5, 1.0, 1.0), 0.5);
        assert_eq!(normalized_linear_decay(1.0, 1.0, 1.0), 0.0);
    }

    #[test]
    fn test_exponential() {
        assert_eq!(normalized_exponential(0.0, 1.0, 2.0), 0.0);
        assert_eq!(normalized_exponential(0.5, 1.0, 2.0), 0.25);
        assert_eq!(normalized_exponential(1.0, 1.0, 2.0), 1.0);
        assert_eq!(normalized_exponential(12.0, 24.0, 3.0), 0.125);
    }

    #[test]
    fn test_pyramid_peaks_mid_game() {
        assert_eq!(normalized_pyramid(0.0, 24.0), 0.0);
        assert_eq!(normalized_pyramid(6.0, 24.0), 0.25);
        assert_eq!(normalized_pyramid(12.0, 24.0), 0.5);
        assert_eq!(normalized_pyramid(18.0, 24.0), 0.25);
        assert_eq!(normalized_pyramid(24.0, 24.0), 0.0);
    }

    #[test]
    fn test_zero_max_is_neutral() {
        assert_eq!(normalized_linear(3.0, 0.0, 1.0), NEUTRAL);
        assert_eq!(normalized_linear_decay(3.0, 0.0, 1.0), NEUTRAL);
        assert_eq!(normalized_pyramid(3.0, 0.0), NEUTRAL);
        assert_eq!(normalized_exponential(3.0, 0.0, 3.0), NEUTRAL);
        assert_eq!(ratio_or_neutral(0.0, 0.0), NEUTRAL);
        assert_eq!(ratio_or_neutral(3.0, 1.0), 0.75);
    }

    #[test]
    fn test_average() {
        assert_eq!(sum(&[1.0, 2.0, 3.5]), 6.5);
        assert!(close(average(&[-5.0, 1.0, 8.0, 7.0, 2.0]), 2.6));
        assert_eq!(average(&[]), 0.0);
    }
}
