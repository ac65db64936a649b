use crate::config::NormalizeScale;
use crate::utils::remap;

/// Maps `value` onto a signed score: 0 at `neutral`, +1 at `max`, -1 at `min`.
/// Values outside `[min, max]` land outside `[-1, 1]`; callers clamp.
///
/// # Panics
/// If `min == neutral` or `max == neutral`. That is a table bug, not a data condition.
pub fn normalize(value: f64, min: f64, max: f64, neutral: f64) -> f64 {
    assert!(
        min != neutral && max != neutral,
        "normalize: degenerate scale (min {min}, max {max}, neutral {neutral})"
    );
    if value == neutral {
        0.0
    } else if value > neutral {
        remap(value, neutral, max, 0.0, 1.0)
    } else {
        remap(value, min, neutral, -1.0, 0.0)
    }
}

/// Normalizes against a table scale, applies orientation and clamps to `[-1, 1]`.
pub fn oriented_score(value: f64, scale: &NormalizeScale, invert: bool) -> f64 {
    let n = normalize(value, scale.min, scale.max, scale.neutral).clamp(-1.0, 1.0);
    if invert { -n } else { n }
}

/// `[-1, 1]` to `[0, 100]` with 0 mapping to 50.
#[inline]
pub fn to_percent_score(n: f64) -> f64 {
    remap(n, -1.0, 1.0, 0.0, 100.0)
}
