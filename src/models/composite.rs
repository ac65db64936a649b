use serde::{Deserialize, Serialize};

use crate::config::Weight;

use super::regime::Regime;

/// One indicator's contribution inside a pillar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorReading {
    pub name: String,
    pub pillar: String,
    /// None when the input series was missing (scored as neutral)
    pub raw_value: Option<f64>,
    /// Oriented and clamped to [-1, 1]
    pub normalized_value: f64,
    pub weight: Weight,
}

/// A pillar of a composite: its 0-100 score and fixed weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentScore {
    pub name: String,
    /// Weighted mean of the pillar's oriented readings, in [-1, 1]
    pub raw_value: f64,
    /// Pillar score on the composite's domain
    pub normalized_value: f64,
    pub weight: Weight,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggeredAmplifier {
    pub reason: String,
    pub points: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeResult {
    pub base_score: f64,
    pub amplifiers: Vec<TriggeredAmplifier>,
    /// clamp(base + sum(amplifier points), domain)
    pub final_score: f64,
    /// Percent of effective weight backed by real inputs
    pub certainty: f64,
}

impl CompositeResult {
    pub fn amplifier_total(&self) -> f64 {
        self.amplifiers.iter().map(|a| a.points).sum()
    }
}

/// Everything a caller needs to explain one composite index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeEvaluation {
    pub name: String,
    pub components: Vec<ComponentScore>,
    pub readings: Vec<IndicatorReading>,
    pub result: CompositeResult,
    pub regime: Regime,
}

impl CompositeEvaluation {
    pub fn score(&self) -> f64 {
        self.result.final_score
    }

    pub fn component(&self, name: &str) -> Option<&ComponentScore> {
        self.components.iter().find(|c| c.name == name)
    }
}
