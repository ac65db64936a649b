//! Resolves each table indicator to a raw value and rolls readings up into pillar scores.

use crate::config::{CompositeTable, MacroField, MetricSource, TechnicalMetric};
use crate::domain::MacroSnapshot;
use crate::models::{ComponentScore, IndicatorReading, IndicatorSet};

use super::normalizer::{oriented_score, to_percent_score};

/// Everything a composite table can draw from for one asset.
#[derive(Debug, Clone, Copy)]
pub struct ScoringInputs<'a> {
    pub indicators: &'a IndicatorSet,
    pub momentum_strength: f64,
    pub macro_data: &'a MacroSnapshot,
}

impl<'a> ScoringInputs<'a> {
    pub fn new(indicators: &'a IndicatorSet, momentum_strength: f64, macro_data: &'a MacroSnapshot) -> Self {
        Self {
            indicators,
            momentum_strength,
            macro_data,
        }
    }

    pub fn technical(&self, metric: TechnicalMetric) -> f64 {
        let set = self.indicators;
        match metric {
            TechnicalMetric::Rsi => set.rsi14,
            TechnicalMetric::PriceVsSma50Pct => set.price_vs_sma50_pct(),
            TechnicalMetric::PriceVsSma200Pct => set.price_vs_sma200_pct(),
            TechnicalMetric::MomentumStrength => self.momentum_strength,
        }
    }

    /// `None` when a macro series is absent or non-finite.
    pub fn resolve(&self, source: &MetricSource) -> Option<f64> {
        let value = match *source {
            MetricSource::Technical(metric) => self.technical(metric),
            MetricSource::Macro { id, field } => {
                let reading = self.macro_data.get(id)?;
                match field {
                    MacroField::Level => reading.current,
                    MacroField::Change => reading.change(),
                }
            }
        };
        value.is_finite().then_some(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PillarBreakdown {
    pub components: Vec<ComponentScore>,
    /// Table order: pillar by pillar, indicator by indicator
    pub readings: Vec<IndicatorReading>,
    /// Percent of effective weight backed by real inputs
    pub certainty: f64,
    pub missing_macro: Vec<String>,
}

/// Pillar score = sum(w_i * (n_i + 1) / 2 * 100). Missing inputs score as neutral (n = 0).
pub fn score_pillars(table: &CompositeTable, inputs: &ScoringInputs) -> PillarBreakdown {
    let mut components = Vec::with_capacity(table.pillars.len());
    let mut readings = Vec::new();
    let mut missing_macro = Vec::new();
    let mut backed_weight = 0.0;
    let mut total_weight = 0.0;

    for pillar in table.pillars {
        let mut pillar_raw = 0.0;

        for spec in pillar.indicators {
            let effective = pillar.weight.value() * spec.weight.value();
            total_weight += effective;

            let raw_value = inputs.resolve(&spec.source);
            let normalized_value = match raw_value {
                Some(v) => {
                    backed_weight += effective;
                    oriented_score(v, &spec.scale, spec.invert)
                }
                None => {
                    if let MetricSource::Macro { id, .. } = spec.source {
                        missing_macro.push(id.to_string());
                    }
                    0.0
                }
            };
            pillar_raw += spec.weight.value() * normalized_value;

            readings.push(IndicatorReading {
                name: spec.name.to_string(),
                pillar: pillar.name.to_string(),
                raw_value,
                normalized_value,
                weight: spec.weight,
            });
        }

        components.push(ComponentScore {
            name: pillar.name.to_string(),
            raw_value: pillar_raw,
            normalized_value: table.domain.clamp(to_percent_score(pillar_raw)),
            weight: pillar.weight,
        });
    }

    let certainty = if total_weight > 0.0 {
        backed_weight / total_weight * 100.0
    } else {
        0.0
    };

    PillarBreakdown {
        components,
        readings,
        certainty,
        missing_macro,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VolRatio;
    use crate::config::constants::{composite_risk, macro_ids, sentiment};
    use crate::domain::{MacroReading, SeriesTrend};
    use crate::models::{Bollinger, Macd};

    fn neutral_set() -> IndicatorSet {
        IndicatorSet {
            close: 100.0,
            sma20: 100.0,
            sma50: 100.0,
            sma200: 100.0,
            rsi14: 50.0,
            macd: Macd::default(),
            atr14: 1.0,
            bollinger: Bollinger::flat(100.0),
            support: 95.0,
            resistance: 105.0,
            support_levels: vec![],
            resistance_levels: vec![],
            rate_of_change_20: 0.0,
            volume_ratio: VolRatio::NEUTRAL,
            volume_trend: VolRatio::NEUTRAL,
        }
    }

    #[test]
    fn test_missing_macro_scores_neutral() {
        let set = neutral_set();
        let macro_data = MacroSnapshot::new();
        let inputs = ScoringInputs::new(&set, 50.0, &macro_data);
        let breakdown = score_pillars(&composite_risk::TABLE, &inputs);

        for c in &breakdown.components {
            assert!((c.normalized_value - 50.0).abs() < 1e-9, "{} should be neutral", c.name);
        }
        // Only the momentum pillar (35%) is backed by data
        assert!((breakdown.certainty - 35.0).abs() < 1e-9, "Certainty was {}", breakdown.certainty);
        assert_eq!(breakdown.missing_macro.len(), 9);
        assert!(breakdown.missing_macro.contains(&macro_ids::VIX.to_string()));
    }

    #[test]
    fn test_every_technical_metric_resolves() {
        use strum::IntoEnumIterator;
        let set = neutral_set();
        let macro_data = MacroSnapshot::new();
        let inputs = ScoringInputs::new(&set, 50.0, &macro_data);
        for metric in TechnicalMetric::iter() {
            let value = inputs.resolve(&MetricSource::Technical(metric));
            assert!(value.is_some(), "{} should always resolve", metric);
        }
    }

    #[test]
    fn test_macro_change_field() {
        let set = neutral_set();
        let mut macro_data = MacroSnapshot::new();
        macro_data.insert(
            macro_ids::UNEMPLOYMENT_RATE.to_string(),
            MacroReading::new(4.5, 4.0, SeriesTrend::Rising),
        );
        let inputs = ScoringInputs::new(&set, 50.0, &macro_data);
        let source = MetricSource::Macro {
            id: macro_ids::UNEMPLOYMENT_RATE,
            field: MacroField::Change,
        };
        assert_eq!(inputs.resolve(&source), Some(0.5));
    }

    #[test]
    fn test_inverted_vix_lowers_sentiment() {
        let set = neutral_set();
        let mut macro_data = MacroSnapshot::new();
        macro_data.insert(macro_ids::VIX.to_string(), MacroReading::level(40.0));
        let inputs = ScoringInputs::new(&set, 50.0, &macro_data);
        let breakdown = score_pillars(&sentiment::TABLE, &inputs);
        let vol = breakdown
            .components
            .iter()
            .find(|c| c.name == "Volatility")
            .expect("volatility pillar");
        assert_eq!(vol.normalized_value, 0.0, "Max VIX is maximal fear");
        assert_eq!(vol.raw_value, -1.0);
    }
}
