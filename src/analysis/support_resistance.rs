//! Swing-based support and resistance.
//!
//! A bar is a swing high when its high is the maximum of the symmetric `±window`
//! neighbourhood (ties count). The first and last `window` bars have no complete
//! neighbourhood and are never evaluated, so the most recent swing is always at
//! least `window` bars old.

use itertools::Itertools;

use crate::config::constants::indicators::{RESISTANCE_FALLBACK, SUPPORT_FALLBACK};
use crate::utils::{get_max, get_min};

#[derive(Debug, Clone, PartialEq)]
pub struct SupportResistance {
    pub support: f64,
    pub resistance: f64,
    /// Nearest first, strictly below price
    pub support_levels: Vec<f64>,
    /// Nearest first, strictly above price
    pub resistance_levels: Vec<f64>,
}

/// Indices of swing highs.
pub fn swing_highs(highs: &[f64], window: usize) -> Vec<usize> {
    swing_points(highs, window, get_max)
}

/// Indices of swing lows.
pub fn swing_lows(lows: &[f64], window: usize) -> Vec<usize> {
    swing_points(lows, window, get_min)
}

fn swing_points(values: &[f64], window: usize, extreme: fn(&[f64]) -> f64) -> Vec<usize> {
    if window == 0 || values.len() <= 2 * window {
        return Vec::new();
    }
    (window..values.len() - window)
        .filter(|&i| extreme(&values[i - window..=i + window]) == values[i])
        .collect()
}

pub fn support_resistance(
    highs: &[f64],
    lows: &[f64],
    price: f64,
    window: usize,
    max_levels: usize,
) -> SupportResistance {
    let resistance_levels: Vec<f64> = swing_highs(highs, window)
        .into_iter()
        .map(|i| highs[i])
        .filter(|&h| h > price)
        .sorted_by(f64::total_cmp)
        .dedup()
        .take(max_levels)
        .collect();

    let support_levels: Vec<f64> = swing_lows(lows, window)
        .into_iter()
        .map(|i| lows[i])
        .filter(|&l| l < price)
        .sorted_by(|a, b| b.total_cmp(a))
        .dedup()
        .take(max_levels)
        .collect();

    SupportResistance {
        support: support_levels
            .first()
            .copied()
            .unwrap_or(price * SUPPORT_FALLBACK),
        resistance: resistance_levels
            .first()
            .copied()
            .unwrap_or(price * RESISTANCE_FALLBACK),
        support_levels,
        resistance_levels,
    }
}
