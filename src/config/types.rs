//! Scoring-engine blueprints (immutable tables and small value types)

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Weight(f64);

impl Weight {
    pub const fn new(val: f64) -> Self {
        let v = if val < 0.0 { 0.0 } else { val };
        Self(v)
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Weight expressed on a 0-100 scale (used by canary impact scoring).
    #[inline]
    pub fn as_percent(self) -> f64 {
        self.0 * 100.0
    }
}

impl std::fmt::Display for Weight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}%", self.0 * 100.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct VolRatio(f64);

impl VolRatio {
    pub const NEUTRAL: Self = Self(1.0);

    pub const fn new(val: f64) -> Self {
        let v = if val < 0.0 { 0.0 } else { val };
        Self(v)
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Calculates the ratio between current and average volume.
    /// Handles division by zero by returning 1.0 (neutral).
    pub fn calculate(current_vol: f64, avg_vol: f64) -> Self {
        if avg_vol > f64::EPSILON {
            Self::new(current_vol / avg_vol)
        } else {
            Self::NEUTRAL
        }
    }
}

impl std::fmt::Display for VolRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}x", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct MomentumPct(f64);

impl MomentumPct {
    pub const fn new(val: f64) -> Self {
        Self(val)
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Momentum on a 0-100 percent scale, e.g. 0.05 -> 5.0
    #[inline]
    pub fn as_percent(self) -> f64 {
        self.0 * 100.0
    }

    /// Calculates Momentum %: (Current - Previous) / Previous
    pub fn calculate(current_close: f64, prev_close: f64) -> Self {
        if prev_close > f64::EPSILON {
            Self::new((current_close - prev_close) / prev_close)
        } else {
            Self::new(0.0)
        }
    }
}

/// Closed score range a composite lives in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreDomain {
    pub min: f64,
    pub max: f64,
}

impl ScoreDomain {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn clamp(&self, score: f64) -> f64 {
        score.clamp(self.min, self.max)
    }

    #[inline]
    pub fn contains(&self, score: f64) -> bool {
        score >= self.min && score <= self.max
    }
}

/// Raw-value domain used by the normalizer: `min <-> neutral <-> max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizeScale {
    pub min: f64,
    pub max: f64,
    pub neutral: f64,
}

impl NormalizeScale {
    pub const fn new(min: f64, max: f64, neutral: f64) -> Self {
        Self { min, max, neutral }
    }
}

/// Values derived from the asset's own price series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum TechnicalMetric {
    #[strum(to_string = "RSI")]
    Rsi,
    #[strum(to_string = "Price vs SMA50")]
    PriceVsSma50Pct,
    #[strum(to_string = "Price vs SMA200")]
    PriceVsSma200Pct,
    #[strum(to_string = "Momentum Strength")]
    MomentumStrength,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum MacroField {
    Level,
    Change,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricSource {
    Technical(TechnicalMetric),
    Macro {
        id: &'static str,
        field: MacroField,
    },
}

/// Cut points on the oriented normalized value ([-1, 1]) at which a canary fires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanaryThresholds {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct IndicatorSpec {
    pub name: &'static str,
    /// Warning text emitted when the indicator raises a canary
    pub signal: &'static str,
    pub source: MetricSource,
    /// Share of the owning pillar (pillar indicators sum to 1.0)
    pub weight: Weight,
    pub scale: NormalizeScale,
    /// Flip the sign after normalizing so +1 always means "more of what this composite measures"
    pub invert: bool,
    pub canary: Option<CanaryThresholds>,
}

#[derive(Debug, Clone, Copy)]
pub struct PillarSpec {
    pub name: &'static str,
    pub weight: Weight,
    pub indicators: &'static [IndicatorSpec],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AmplifierCondition {
    /// Every named pillar scores at least `threshold`
    AllAtLeast {
        pillars: &'static [&'static str],
        threshold: f64,
    },
    /// Every pillar of the composite scores at most `threshold`
    EveryAtMost { threshold: f64 },
    /// At least `count` pillars score at least `threshold`
    CountAtLeast { threshold: f64, count: usize },
    HighCanariesAtLeast(usize),
}

#[derive(Debug, Clone, Copy)]
pub struct AmplifierRule {
    pub reason: &'static str,
    pub condition: AmplifierCondition,
    pub points: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct RegimeBand {
    pub level: u8,
    pub name: &'static str,
    /// Inclusive: a score equal to the bound belongs to this band
    pub lower_bound: f64,
    /// Display color / severity tag, opaque to the engine
    pub tag: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct CompositeTable {
    pub name: &'static str,
    pub domain: ScoreDomain,
    pub pillars: &'static [PillarSpec],
    pub amplifiers: &'static [AmplifierRule],
    /// Ascending by `lower_bound`
    pub regimes: &'static [RegimeBand],
}

impl CompositeTable {
    pub fn pillar_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.pillars.iter().map(|p| p.name)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct IndicatorPeriods {
    pub sma_short: usize,
    pub sma_medium: usize,
    pub sma_long: usize,
    pub ema_fast: usize,
    pub ema_slow: usize,
    pub macd_signal: usize,
    pub rsi: usize,
    pub atr: usize,
    pub bollinger: usize,
    pub bollinger_k: f64,
    pub swing_window: usize,
    pub max_levels: usize,
    pub roc_lookback: usize,
    pub volume_ratio_window: usize,
    pub volume_trend_short: usize,
    pub volume_trend_long: usize,
}

/// Contribution bands for the 0-100 momentum strength blend.
#[derive(Debug, Clone, Copy)]
pub struct MomentumBlend {
    pub base: f64,
    pub roc_scale: f64,
    pub roc_cap: f64,
    pub rsi_scale: f64,
    pub rsi_cap: f64,
    pub macd_scale: f64,
    pub macd_cap: f64,
    pub volume_scale: f64,
    pub volume_cap: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct TrendVoteConfig {
    pub ma_alignment_points: f64,
    pub rsi_points: f64,
    pub macd_points: f64,
    pub momentum_points: f64,
    pub volume_points: f64,
    pub rsi_bullish_above: f64,
    pub rsi_bearish_below: f64,
    pub momentum_bullish_above: f64,
    pub momentum_bearish_below: f64,
    pub volume_bullish_above: f64,
    pub volume_bearish_below: f64,
    /// Side confidence (%) needed to declare a trend. Deliberately below a strict majority.
    pub confidence_cutoff: f64,
    pub strong_above: f64,
    pub moderate_above: f64,
}

impl TrendVoteConfig {
    pub fn total_possible_points(&self) -> f64 {
        self.ma_alignment_points
            + self.rsi_points
            + self.macd_points
            + self.momentum_points
            + self.volume_points
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ProjectionConfig {
    pub near_atr_multiple: f64,
    pub momentum_pivot: f64,
    pub resistance_buffer: f64,
    pub support_buffer: f64,
    pub mid_extension: f64,
    pub mid_cap_up: f64,
    pub mid_cap_down: f64,
    pub stop_floor: f64,
    pub stop_ceiling: f64,
    pub neutral_near_atr: f64,
    pub neutral_mid_atr: f64,
    pub near_term_days: u32,
    pub mid_term_days: u32,
    pub path_steps: u32,
}
