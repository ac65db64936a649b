use argminmax::ArgMinMax;

#[inline]
pub(crate) fn get_max(vec: &[f64]) -> f64 {
    let max_index: usize = vec.argmax();
    vec[max_index]
}

#[inline]
pub(crate) fn get_min(vec: &[f64]) -> f64 {
    let min_index: usize = vec.argmin();
    vec[min_index]
}

/// Arithmetic mean. Empty input yields 0.0.
#[inline]
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Population mean and standard deviation.
#[inline]
pub fn mean_and_stddev(data: &[f64]) -> (f64, f64) {
    let count = data.len();
    if count == 0 {
        return (0.0, 0.0);
    }

    let mean = mean(data);

    let variance: f64 = data
        .iter()
        .map(|value| {
            let diff = mean - *value;
            diff * diff
        })
        .sum::<f64>()
        / count as f64;

    (mean, variance.sqrt())
}

/// Linearly maps a value from one range to another while preserving its relative proportion.
pub fn remap(val: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    let t = (val - in_min) / (in_max - in_min);
    out_min + t * (out_max - out_min)
}

/// Percentage distance of `value` from `reference`. Zero reference yields 0.0.
#[inline]
pub fn pct_diff(value: f64, reference: f64) -> f64 {
    if reference.abs() > f64::EPSILON {
        (value - reference) / reference * 100.0
    } else {
        0.0
    }
}
