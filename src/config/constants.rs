// Top Level Constants
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.001;

/// History needed for every indicator to run without a fallback (SMA200).
pub const BARS_REQUIRED: usize = 200;

pub mod indicators {
    use crate::config::IndicatorPeriods;

    pub const SMA_SHORT: usize = 20;
    pub const SMA_MEDIUM: usize = 50;
    pub const SMA_LONG: usize = 200;

    pub const EMA_FAST: usize = 12;
    pub const EMA_SLOW: usize = 26;
    pub const MACD_SIGNAL: usize = 9;

    pub const RSI_PERIOD: usize = 14;
    pub const ATR_PERIOD: usize = 14;

    pub const BOLLINGER_PERIOD: usize = 20;
    pub const BOLLINGER_K: f64 = 2.0;

    pub const SWING_WINDOW: usize = 5;
    pub const MAX_LEVELS: usize = 3;
    pub const RESISTANCE_FALLBACK: f64 = 1.05;
    pub const SUPPORT_FALLBACK: f64 = 0.95;

    pub const ROC_LOOKBACK: usize = 20;
    pub const VOLUME_RATIO_WINDOW: usize = 10;
    pub const VOLUME_TREND_SHORT: usize = 5;
    pub const VOLUME_TREND_LONG: usize = 20;

    pub const DEFAULT: IndicatorPeriods = IndicatorPeriods {
        sma_short: SMA_SHORT,
        sma_medium: SMA_MEDIUM,
        sma_long: SMA_LONG,
        ema_fast: EMA_FAST,
        ema_slow: EMA_SLOW,
        macd_signal: MACD_SIGNAL,
        rsi: RSI_PERIOD,
        atr: ATR_PERIOD,
        bollinger: BOLLINGER_PERIOD,
        bollinger_k: BOLLINGER_K,
        swing_window: SWING_WINDOW,
        max_levels: MAX_LEVELS,
        roc_lookback: ROC_LOOKBACK,
        volume_ratio_window: VOLUME_RATIO_WINDOW,
        volume_trend_short: VOLUME_TREND_SHORT,
        volume_trend_long: VOLUME_TREND_LONG,
    };
}

pub mod momentum {
    use crate::config::MomentumBlend;

    pub const DEFAULT: MomentumBlend = MomentumBlend {
        base: 50.0,
        roc_scale: 2.0,
        roc_cap: 20.0,
        rsi_scale: 0.5,
        rsi_cap: 15.0,
        macd_scale: 5.0,
        macd_cap: 10.0,
        volume_scale: 10.0,
        volume_cap: 5.0,
    };
}

pub mod trend {
    use crate::config::TrendVoteConfig;

    pub const DEFAULT: TrendVoteConfig = TrendVoteConfig {
        ma_alignment_points: 3.0,
        rsi_points: 1.0,
        macd_points: 2.0,
        momentum_points: 2.0,
        volume_points: 1.0,
        rsi_bullish_above: 55.0,
        rsi_bearish_below: 45.0,
        momentum_bullish_above: 60.0,
        momentum_bearish_below: 40.0,
        volume_bullish_above: 1.2,
        volume_bearish_below: 0.8,
        confidence_cutoff: 55.0,
        strong_above: 77.0,
        moderate_above: 66.0,
    };
}

pub mod projection {
    use crate::config::ProjectionConfig;

    pub const DEFAULT: ProjectionConfig = ProjectionConfig {
        near_atr_multiple: 2.0,
        momentum_pivot: 50.0,
        resistance_buffer: 0.98,
        support_buffer: 1.02,
        mid_extension: 0.5,
        mid_cap_up: 1.15,
        mid_cap_down: 0.85,
        stop_floor: 0.95,
        stop_ceiling: 1.05,
        neutral_near_atr: 1.5,
        neutral_mid_atr: 3.0,
        near_term_days: 5,
        mid_term_days: 30,
        path_steps: 30,
    };
}

/// Macro series identifiers expected in a `MacroSnapshot`.
pub mod macro_ids {
    pub const VIX: &str = "VIX";
    pub const HY_SPREAD: &str = "HY_SPREAD";
    pub const PUT_CALL: &str = "PUT_CALL";
    pub const CAPE: &str = "CAPE";
    pub const BUFFETT_INDICATOR: &str = "BUFFETT_INDICATOR";
    pub const YIELD_CURVE: &str = "YIELD_CURVE";
    pub const CPI_YOY: &str = "CPI_YOY";
    pub const INITIAL_CLAIMS: &str = "INITIAL_CLAIMS";
    pub const UNEMPLOYMENT_RATE: &str = "UNEMPLOYMENT_RATE";
}

pub mod composite_risk {
    use super::macro_ids;
    use crate::config::{
        AmplifierCondition, AmplifierRule, CanaryThresholds, CompositeTable, IndicatorSpec,
        MacroField, MetricSource, NormalizeScale, PillarSpec, RegimeBand, ScoreDomain,
        TechnicalMetric, Weight,
    };

    pub const INFLATION_TARGET: f64 = 2.0;

    pub const MOMENTUM: &str = "Momentum";
    pub const RISK_APPETITE: &str = "Risk Appetite";
    pub const VALUATION: &str = "Valuation";
    pub const MACRO: &str = "Macro";

    const STANDARD_CANARY: Option<CanaryThresholds> = Some(CanaryThresholds {
        low: 0.25,
        medium: 0.5,
        high: 0.75,
    });

    const MOMENTUM_INDICATORS: &[IndicatorSpec] = &[
        IndicatorSpec {
            name: "Price vs 200-day MA",
            signal: "Price breaking below its 200-day average",
            source: MetricSource::Technical(TechnicalMetric::PriceVsSma200Pct),
            weight: Weight::new(0.40),
            scale: NormalizeScale::new(-20.0, 20.0, 0.0),
            invert: true,
            canary: STANDARD_CANARY,
        },
        IndicatorSpec {
            name: "Momentum Strength",
            signal: "Momentum rolling over",
            source: MetricSource::Technical(TechnicalMetric::MomentumStrength),
            weight: Weight::new(0.35),
            scale: NormalizeScale::new(0.0, 100.0, 50.0),
            invert: true,
            canary: STANDARD_CANARY,
        },
        IndicatorSpec {
            name: "RSI",
            signal: "RSI losing strength",
            source: MetricSource::Technical(TechnicalMetric::Rsi),
            weight: Weight::new(0.25),
            scale: NormalizeScale::new(0.0, 100.0, 50.0),
            invert: true,
            canary: STANDARD_CANARY,
        },
    ];

    const RISK_APPETITE_INDICATORS: &[IndicatorSpec] = &[
        IndicatorSpec {
            name: "VIX",
            signal: "Volatility spiking",
            source: MetricSource::Macro {
                id: macro_ids::VIX,
                field: MacroField::Level,
            },
            weight: Weight::new(0.40),
            scale: NormalizeScale::new(10.0, 40.0, 18.0),
            invert: false,
            canary: STANDARD_CANARY,
        },
        IndicatorSpec {
            name: "High-Yield Spread",
            signal: "Credit spreads widening",
            source: MetricSource::Macro {
                id: macro_ids::HY_SPREAD,
                field: MacroField::Level,
            },
            weight: Weight::new(0.35),
            scale: NormalizeScale::new(2.5, 8.0, 4.0),
            invert: false,
            canary: STANDARD_CANARY,
        },
        IndicatorSpec {
            name: "Put/Call Ratio",
            signal: "Hedging demand rising",
            source: MetricSource::Macro {
                id: macro_ids::PUT_CALL,
                field: MacroField::Level,
            },
            weight: Weight::new(0.25),
            scale: NormalizeScale::new(0.5, 1.5, 0.9),
            invert: false,
            canary: STANDARD_CANARY,
        },
    ];

    const VALUATION_INDICATORS: &[IndicatorSpec] = &[
        IndicatorSpec {
            name: "Shiller CAPE",
            signal: "Valuations stretched",
            source: MetricSource::Macro {
                id: macro_ids::CAPE,
                field: MacroField::Level,
            },
            weight: Weight::new(0.50),
            scale: NormalizeScale::new(10.0, 40.0, 20.0),
            invert: false,
            canary: STANDARD_CANARY,
        },
        IndicatorSpec {
            name: "Buffett Indicator",
            signal: "Market cap far ahead of GDP",
            source: MetricSource::Macro {
                id: macro_ids::BUFFETT_INDICATOR,
                field: MacroField::Level,
            },
            weight: Weight::new(0.50),
            scale: NormalizeScale::new(50.0, 200.0, 100.0),
            invert: false,
            canary: STANDARD_CANARY,
        },
    ];

    const MACRO_INDICATORS: &[IndicatorSpec] = &[
        IndicatorSpec {
            name: "Yield Curve (10Y-2Y)",
            signal: "Yield curve inverted",
            source: MetricSource::Macro {
                id: macro_ids::YIELD_CURVE,
                field: MacroField::Level,
            },
            weight: Weight::new(0.30),
            scale: NormalizeScale::new(-1.0, 2.5, 0.5),
            invert: true,
            canary: STANDARD_CANARY,
        },
        IndicatorSpec {
            name: "CPI Inflation",
            signal: "Inflation running above target",
            source: MetricSource::Macro {
                id: macro_ids::CPI_YOY,
                field: MacroField::Level,
            },
            weight: Weight::new(0.25),
            scale: NormalizeScale::new(0.0, 8.0, INFLATION_TARGET),
            invert: false,
            canary: STANDARD_CANARY,
        },
        IndicatorSpec {
            name: "Initial Jobless Claims",
            signal: "Jobless claims climbing",
            source: MetricSource::Macro {
                id: macro_ids::INITIAL_CLAIMS,
                field: MacroField::Level,
            },
            weight: Weight::new(0.25),
            scale: NormalizeScale::new(180_000.0, 400_000.0, 230_000.0),
            invert: false,
            canary: STANDARD_CANARY,
        },
        IndicatorSpec {
            name: "Unemployment Change",
            signal: "Unemployment rate rising",
            source: MetricSource::Macro {
                id: macro_ids::UNEMPLOYMENT_RATE,
                field: MacroField::Change,
            },
            weight: Weight::new(0.20),
            scale: NormalizeScale::new(-0.5, 0.5, 0.0),
            invert: false,
            canary: STANDARD_CANARY,
        },
    ];

    pub const PILLARS: &[PillarSpec] = &[
        PillarSpec {
            name: MOMENTUM,
            weight: Weight::new(0.35),
            indicators: MOMENTUM_INDICATORS,
        },
        PillarSpec {
            name: RISK_APPETITE,
            weight: Weight::new(0.30),
            indicators: RISK_APPETITE_INDICATORS,
        },
        PillarSpec {
            name: VALUATION,
            weight: Weight::new(0.15),
            indicators: VALUATION_INDICATORS,
        },
        PillarSpec {
            name: MACRO,
            weight: Weight::new(0.20),
            indicators: MACRO_INDICATORS,
        },
    ];

    pub const AMPLIFIERS: &[AmplifierRule] = &[
        AmplifierRule {
            reason: "Multiple high-severity canaries active",
            condition: AmplifierCondition::HighCanariesAtLeast(2),
            points: 5.0,
        },
        AmplifierRule {
            reason: "Momentum and risk appetite both stressed",
            condition: AmplifierCondition::AllAtLeast {
                pillars: &[MOMENTUM, RISK_APPETITE],
                threshold: 70.0,
            },
            points: 5.0,
        },
        AmplifierRule {
            reason: "Broad-based stress across pillars",
            condition: AmplifierCondition::CountAtLeast {
                threshold: 60.0,
                count: 3,
            },
            points: 10.0,
        },
        AmplifierRule {
            reason: "All pillars calm",
            condition: AmplifierCondition::EveryAtMost { threshold: 30.0 },
            points: -5.0,
        },
    ];

    pub const REGIMES: &[RegimeBand] = &[
        RegimeBand { level: 0, name: "Low", lower_bound: 0.0, tag: "green" },
        RegimeBand { level: 1, name: "Normal", lower_bound: 20.0, tag: "lime" },
        RegimeBand { level: 2, name: "Elevated", lower_bound: 40.0, tag: "yellow" },
        RegimeBand { level: 3, name: "High", lower_bound: 60.0, tag: "orange" },
        RegimeBand { level: 4, name: "Extreme", lower_bound: 80.0, tag: "red" },
    ];

    pub const TABLE: CompositeTable = CompositeTable {
        name: "Composite Crash Probability",
        domain: ScoreDomain::new(0.0, 100.0),
        pillars: PILLARS,
        amplifiers: AMPLIFIERS,
        regimes: REGIMES,
    };
}

pub mod sentiment {
    use super::macro_ids;
    use crate::config::{
        CompositeTable, IndicatorSpec, MacroField, MetricSource, NormalizeScale, PillarSpec,
        RegimeBand, ScoreDomain, TechnicalMetric, Weight,
    };

    pub const PILLARS: &[PillarSpec] = &[
        PillarSpec {
            name: "RSI",
            weight: Weight::new(0.25),
            indicators: &[IndicatorSpec {
                name: "RSI",
                signal: "RSI",
                source: MetricSource::Technical(TechnicalMetric::Rsi),
                weight: Weight::new(1.0),
                scale: NormalizeScale::new(0.0, 100.0, 50.0),
                invert: false,
                canary: None,
            }],
        },
        PillarSpec {
            name: "Price vs 50-day MA",
            weight: Weight::new(0.20),
            indicators: &[IndicatorSpec {
                name: "Price vs 50-day MA",
                signal: "Price vs 50-day MA",
                source: MetricSource::Technical(TechnicalMetric::PriceVsSma50Pct),
                weight: Weight::new(1.0),
                scale: NormalizeScale::new(-10.0, 10.0, 0.0),
                invert: false,
                canary: None,
            }],
        },
        PillarSpec {
            name: "Volatility",
            weight: Weight::new(0.25),
            indicators: &[IndicatorSpec {
                name: "VIX",
                signal: "VIX",
                source: MetricSource::Macro {
                    id: macro_ids::VIX,
                    field: MacroField::Level,
                },
                weight: Weight::new(1.0),
                scale: NormalizeScale::new(10.0, 40.0, 18.0),
                invert: true,
                canary: None,
            }],
        },
        PillarSpec {
            name: "Options Positioning",
            weight: Weight::new(0.15),
            indicators: &[IndicatorSpec {
                name: "Put/Call Ratio",
                signal: "Put/Call Ratio",
                source: MetricSource::Macro {
                    id: macro_ids::PUT_CALL,
                    field: MacroField::Level,
                },
                weight: Weight::new(1.0),
                scale: NormalizeScale::new(0.5, 1.5, 0.9),
                invert: true,
                canary: None,
            }],
        },
        PillarSpec {
            name: "Momentum",
            weight: Weight::new(0.15),
            indicators: &[IndicatorSpec {
                name: "Momentum Strength",
                signal: "Momentum Strength",
                source: MetricSource::Technical(TechnicalMetric::MomentumStrength),
                weight: Weight::new(1.0),
                scale: NormalizeScale::new(0.0, 100.0, 50.0),
                invert: false,
                canary: None,
            }],
        },
    ];

    pub const REGIMES: &[RegimeBand] = &[
        RegimeBand { level: 0, name: "Extreme Fear", lower_bound: 0.0, tag: "red" },
        RegimeBand { level: 1, name: "Fear", lower_bound: 25.0, tag: "orange" },
        RegimeBand { level: 2, name: "Neutral", lower_bound: 45.0, tag: "gray" },
        RegimeBand { level: 3, name: "Greed", lower_bound: 55.0, tag: "lime" },
        RegimeBand { level: 4, name: "Extreme Greed", lower_bound: 75.0, tag: "green" },
    ];

    pub const TABLE: CompositeTable = CompositeTable {
        name: "Market Sentiment",
        domain: ScoreDomain::new(0.0, 100.0),
        pillars: PILLARS,
        amplifiers: &[],
        regimes: REGIMES,
    };
}
