//! Configuration module for the scoring engine.

// Can all be private now because we have a public re-export.
mod debug;
mod types;
mod validation;

// Public
pub mod constants;

// Re-export commonly used items
pub use debug::{DF, LogFlags};
pub use types::{
    AmplifierCondition, AmplifierRule, CanaryThresholds, CompositeTable, IndicatorPeriods,
    IndicatorSpec, MacroField, MetricSource, MomentumBlend, MomentumPct, NormalizeScale,
    PillarSpec, ProjectionConfig, RegimeBand, ScoreDomain, TechnicalMetric, TrendVoteConfig,
    VolRatio, Weight,
};
pub use validation::{
    ALL_TABLES, assert_valid_tables, validate_periods, validate_table, validate_tables, validate_trend,
};
