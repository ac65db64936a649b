use std::sync::Arc;

use itertools::Itertools;
use rayon::prelude::*;

use crate::analysis::{
    ProjectionInputs, ScoringInputs, classify_trend, compute_indicator_set, evaluate_composite,
    momentum_strength, project,
};
use crate::analysis::canary_detector::sort_canaries;
use crate::config::constants::{self, BARS_REQUIRED, composite_risk, sentiment};
use crate::config::{
    CompositeTable, DF, IndicatorPeriods, MomentumBlend, ProjectionConfig, TrendVoteConfig,
    assert_valid_tables, validate_periods, validate_table, validate_trend,
};
use crate::domain::{MacroSnapshot, PriceSeries};
use crate::models::{AssetEvaluation, DataCompleteness};

/// Everything an engine scores with. Start from `default()` (the shipped tables)
/// and override what you need, then hand it to `Engine::with_config`.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    pub periods: IndicatorPeriods,
    pub momentum: MomentumBlend,
    pub trend: TrendVoteConfig,
    pub projection: ProjectionConfig,
    pub composite_risk: CompositeTable,
    pub sentiment: CompositeTable,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            periods: constants::indicators::DEFAULT,
            momentum: constants::momentum::DEFAULT,
            trend: constants::trend::DEFAULT,
            projection: constants::projection::DEFAULT,
            composite_risk: composite_risk::TABLE,
            sentiment: sentiment::TABLE,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        validate_periods(&self.periods)?;
        validate_trend(&self.trend)?;
        validate_table(&self.composite_risk)?;
        validate_table(&self.sentiment)
    }
}

/// Stateless scoring engine. Holds only the read-only tables it was built with,
/// so one instance can be shared across threads freely.
#[derive(Debug, Clone, Copy)]
pub struct Engine {
    config: EngineConfig,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Builds the engine from the shipped tables.
    ///
    /// # Panics
    /// If the tables are inconsistent (weights not summing to 1.0, regime gaps, degenerate scales).
    pub fn new() -> Self {
        assert_valid_tables();
        Self {
            config: EngineConfig::default(),
        }
    }

    /// Builds the engine from custom tables, rejecting any table or period that breaks an invariant.
    pub fn with_config(config: EngineConfig) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Full pipeline for one asset: indicators, trend vote, composites, canaries, projection.
    pub fn evaluate(&self, series: &PriceSeries, macro_data: &MacroSnapshot) -> AssetEvaluation {
        crate::trace_time!(&format!("evaluate [{}]", series.symbol), 2000, {
            let (indicators, fallbacks) = compute_indicator_set(series, &self.config.periods);
            let strength = momentum_strength(&indicators, &self.config.momentum);
            let trend = classify_trend(&indicators, strength, &self.config.trend);

            let inputs = ScoringInputs::new(&indicators, strength, macro_data);
            let risk = evaluate_composite(&self.config.composite_risk, &inputs);
            let mood = evaluate_composite(&self.config.sentiment, &inputs);

            let missing_macro: Vec<String> = risk
                .missing_macro
                .iter()
                .chain(&mood.missing_macro)
                .cloned()
                .sorted()
                .dedup()
                .collect();
            let levels_estimated =
                indicators.support_levels.is_empty() || indicators.resistance_levels.is_empty();
            let data_completeness = DataCompleteness::new(
                series.len(),
                BARS_REQUIRED,
                fallbacks,
                missing_macro,
                levels_estimated,
            );

            let projection = project(
                &ProjectionInputs {
                    direction: trend.direction,
                    trend_confidence: trend.confidence,
                    current_price: indicators.close,
                    atr: indicators.atr14,
                    support: indicators.support,
                    resistance: indicators.resistance,
                    momentum_strength: strength,
                    history_ratio: data_completeness.history_ratio(),
                },
                &self.config.projection,
            );

            let mut canaries = risk.canaries;
            canaries.extend(mood.canaries);
            sort_canaries(&mut canaries);

            if DF.log_engine_core {
                log::info!(
                    "{}: {} {} ({:.0}%), risk {:.1} [{}], sentiment {:.1} [{}], {} canaries",
                    series.symbol,
                    trend.direction,
                    trend.strength,
                    trend.confidence,
                    risk.evaluation.score(),
                    risk.evaluation.regime,
                    mood.evaluation.score(),
                    mood.evaluation.regime,
                    canaries.len()
                );
            }

            AssetEvaluation {
                symbol: series.symbol.clone(),
                indicators,
                momentum_strength: strength,
                trend,
                composite_risk: risk.evaluation,
                sentiment: mood.evaluation,
                canaries,
                projection,
                data_completeness,
            }
        })
    }

    /// Evaluates independent assets in parallel. Output order matches input order.
    pub fn evaluate_batch(&self, series: &[PriceSeries], macro_data: &MacroSnapshot) -> Vec<AssetEvaluation> {
        series
            .par_iter()
            .map(|s| self.evaluate(s, macro_data))
            .collect()
    }
}

/// One-shot evaluation with the shipped tables.
pub fn evaluate_asset(series: &PriceSeries, macro_data: &MacroSnapshot) -> AssetEvaluation {
    Engine::new().evaluate(series, macro_data)
}

/// Parallel batch evaluation with the shipped tables. The macro snapshot is shared read-only.
pub fn evaluate_batch(series: &[PriceSeries], macro_data: Arc<MacroSnapshot>) -> Vec<AssetEvaluation> {
    Engine::new().evaluate_batch(series, &macro_data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{IndicatorSpec, MetricSource, NormalizeScale, PillarSpec, RegimeBand, ScoreDomain, TechnicalMetric, Weight};
    use crate::domain::{Bar, MacroReading};
    use crate::models::TrendDirection;

    fn series(symbol: &str, closes: impl Iterator<Item = f64>) -> PriceSeries {
        let bars = closes
            .enumerate()
            .map(|(i, c)| Bar::new(i as i64 * 86_400_000, Some(c), c * 1.005, c * 0.995, c, 1_000.0))
            .collect();
        PriceSeries::new(symbol, bars).expect("valid test series")
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let s = series("AAA", (0..240).map(|i| 100.0 + (i as f64 * 0.3).sin() * 5.0));
        let engine = Engine::new();
        let macro_data = MacroSnapshot::new();
        assert_eq!(engine.evaluate(&s, &macro_data), engine.evaluate(&s, &macro_data));
    }

    #[test]
    fn test_batch_preserves_order() {
        let a = series("UP", (0..220).map(|i| 100.0 * 1.01f64.powi(i)));
        let b = series("DOWN", (0..220).map(|i| 100.0 * 0.99f64.powi(i)));
        let results = evaluate_batch(&[a, b], Arc::new(MacroSnapshot::new()));
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].symbol, "UP");
        assert_eq!(results[1].symbol, "DOWN");
        assert_eq!(results[0].trend.direction, TrendDirection::Bullish);
        assert_eq!(results[1].trend.direction, TrendDirection::Bearish);
    }

    #[test]
    fn test_missing_macro_listed_once() {
        let s = series("AAA", (0..210).map(|i| 50.0 + i as f64 * 0.1));
        let mut macro_data = MacroSnapshot::new();
        macro_data.insert("CAPE".to_string(), MacroReading::level(25.0));
        let eval = evaluate_asset(&s, &macro_data);
        let missing = &eval.data_completeness.missing_macro;
        assert_eq!(missing.iter().filter(|m| *m == "VIX").count(), 1, "VIX feeds both composites");
        assert!(!missing.contains(&"CAPE".to_string()));
        assert!(!eval.data_completeness.complete);
    }

    #[test]
    fn test_custom_table_weights_checked() {
        const RSI_ONLY: &[IndicatorSpec] = &[IndicatorSpec {
            name: "RSI",
            signal: "RSI",
            source: MetricSource::Technical(TechnicalMetric::Rsi),
            weight: Weight::new(0.7),
            scale: NormalizeScale::new(0.0, 100.0, 50.0),
            invert: false,
            canary: None,
        }];
        const LOPSIDED: CompositeTable = CompositeTable {
            name: "Lopsided",
            domain: ScoreDomain::new(0.0, 100.0),
            pillars: &[PillarSpec { name: "Only", weight: Weight::new(0.7), indicators: RSI_ONLY }],
            amplifiers: &[],
            regimes: &[RegimeBand { level: 0, name: "Only", lower_bound: 30.0, tag: "" }],
        };

        let config = EngineConfig {
            sentiment: LOPSIDED,
            ..EngineConfig::default()
        };
        let err = Engine::with_config(config).expect_err("0.7 weights and a gapped band must be rejected");
        assert!(err.to_string().contains("Lopsided"), "Error should name the table: {err}");
    }

    #[test]
    fn test_custom_periods_checked() {
        let config = EngineConfig {
            periods: IndicatorPeriods {
                ema_fast: 0,
                ..constants::indicators::DEFAULT
            },
            ..EngineConfig::default()
        };
        assert!(Engine::with_config(config).is_err(), "Zero EMA window must fail fast");
    }

    #[test]
    fn test_default_config_accepted() {
        let engine = Engine::with_config(EngineConfig::default()).expect("shipped tables are valid");
        let s = series("AAA", (0..60).map(|i| 100.0 + i as f64));
        assert_eq!(engine.evaluate(&s, &MacroSnapshot::new()), Engine::new().evaluate(&s, &MacroSnapshot::new()));
        assert_eq!(engine.config().periods.ema_slow, 26);
    }
}
