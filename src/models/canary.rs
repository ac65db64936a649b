use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Ordered so that `High > Medium > Low`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Canary {
    pub signal: String,
    pub pillar_name: String,
    pub indicator_name: String,
    pub severity: Severity,
    /// Percent of the pillar (0-100)
    pub indicator_weight: f64,
    /// Percent of the composite (0-100)
    pub pillar_weight: f64,
    /// indicator_weight * pillar_weight / 100
    pub impact_score: f64,
}

impl Canary {
    pub fn new(
        signal: impl Into<String>,
        pillar_name: impl Into<String>,
        indicator_name: impl Into<String>,
        severity: Severity,
        indicator_weight: f64,
        pillar_weight: f64,
    ) -> Self {
        Self {
            signal: signal.into(),
            pillar_name: pillar_name.into(),
            indicator_name: indicator_name.into(),
            severity,
            indicator_weight,
            pillar_weight,
            impact_score: indicator_weight * pillar_weight / 100.0,
        }
    }

    /// Severity descending, then impact descending.
    pub fn display_order(a: &Canary, b: &Canary) -> Ordering {
        b.severity
            .cmp(&a.severity)
            .then_with(|| b.impact_score.total_cmp(&a.impact_score))
    }
}

impl std::fmt::Display for Canary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {} ({})", self.severity, self.signal, self.pillar_name)
    }
}
