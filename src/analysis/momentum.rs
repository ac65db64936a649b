use crate::config::MomentumBlend;
use crate::models::IndicatorSet;

/// Blended 0-100 momentum strength. 50 is neutral; each input is capped independently
/// so no single indicator can dominate.
pub fn momentum_strength(set: &IndicatorSet, blend: &MomentumBlend) -> f64 {
    let roc = (set.rate_of_change_20 * blend.roc_scale).clamp(-blend.roc_cap, blend.roc_cap);
    let rsi = ((set.rsi14 - 50.0) * blend.rsi_scale).clamp(-blend.rsi_cap, blend.rsi_cap);

    let macd_pct = if set.close > 0.0 {
        set.macd.macd / set.close * 100.0
    } else {
        0.0
    };
    let macd = (macd_pct * blend.macd_scale).clamp(-blend.macd_cap, blend.macd_cap);

    let volume = ((set.volume_trend.value() - 1.0) * blend.volume_scale)
        .clamp(-blend.volume_cap, blend.volume_cap);

    (blend.base + roc + rsi + macd + volume).clamp(0.0, 100.0)
}
