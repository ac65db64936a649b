mod maths_utils;
mod perf;

pub use maths_utils::{mean, mean_and_stddev, pct_diff, remap};
pub(crate) use maths_utils::{get_max, get_min};
