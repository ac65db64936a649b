//! Forward targets, stop level and a day-by-day path from the current trend state.

use crate::config::ProjectionConfig;
use crate::models::{Projection, ProjectionPoint, TrendDirection};

/// Current market state the projection is built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionInputs {
    pub direction: TrendDirection,
    /// Trend confidence, 0-100
    pub trend_confidence: f64,
    pub current_price: f64,
    pub atr: f64,
    pub support: f64,
    pub resistance: f64,
    pub momentum_strength: f64,
    /// min(1, bars_available / bars_required)
    pub history_ratio: f64,
}

/// Near target, mid target, stop and the value the path walks towards.
fn targets(i: &ProjectionInputs, cfg: &ProjectionConfig) -> (f64, f64, f64, f64) {
    let price = i.current_price;
    match i.direction {
        TrendDirection::Bullish => {
            let push = i.atr * cfg.near_atr_multiple * (i.momentum_strength / cfg.momentum_pivot);
            let near = (price + push).min(i.resistance * cfg.resistance_buffer);
            let mid = (i.resistance + (i.resistance - price) * cfg.mid_extension)
                .min(price * cfg.mid_cap_up);
            let stop = i.support.max(price * cfg.stop_floor);
            (near, mid, stop, mid)
        }
        TrendDirection::Bearish => {
            let push = i.atr
                * cfg.near_atr_multiple
                * ((100.0 - i.momentum_strength) / cfg.momentum_pivot);
            let near = (price - push).max(i.support * cfg.support_buffer);
            let mid = (i.support - (price - i.support) * cfg.mid_extension)
                .max(price * cfg.mid_cap_down);
            let stop = i.resistance.min(price * cfg.stop_ceiling);
            (near, mid, stop, mid)
        }
        TrendDirection::Neutral => {
            let midpoint = (i.support + i.resistance) / 2.0;
            let gap = midpoint - price;
            let near_step = i.atr * cfg.neutral_near_atr;
            let mid_step = i.atr * cfg.neutral_mid_atr;
            let near = price + gap.clamp(-near_step, near_step);
            let mid = price + gap.clamp(-mid_step, mid_step);
            // Drifting up (or flat) is invalidated below support, drifting down above resistance
            let stop = if gap >= 0.0 { i.support } else { i.resistance };
            (near, mid, stop, midpoint)
        }
    }
}

/// Linear interpolation from `start` to `end`, one point per step including both ends.
pub fn interpolate_path(start: f64, end: f64, steps: u32) -> Vec<ProjectionPoint> {
    if steps == 0 {
        return vec![ProjectionPoint {
            day_offset: 0,
            projected_value: start,
        }];
    }
    (0..=steps)
        .map(|day| ProjectionPoint {
            day_offset: day,
            projected_value: start + (end - start) * (day as f64 / steps as f64),
        })
        .collect()
}

pub fn project(inputs: &ProjectionInputs, cfg: &ProjectionConfig) -> Projection {
    let (near, mid, stop, path_target) = targets(inputs, cfg);
    Projection {
        near_term_target: near,
        mid_term_target: mid,
        stop_level: stop,
        confidence: (inputs.trend_confidence * inputs.history_ratio.clamp(0.0, 1.0)).clamp(0.0, 100.0),
        near_term_days: cfg.near_term_days,
        mid_term_days: cfg.mid_term_days,
        path: interpolate_path(inputs.current_price, path_target, cfg.path_steps),
    }
}
