use serde::{Deserialize, Serialize};

use super::canary::Canary;
use super::composite::CompositeEvaluation;
use super::indicator_set::IndicatorSet;
use super::projection::Projection;
use super::trend::TrendClassification;

/// Explains why numbers may rest on fallback values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataCompleteness {
    pub bars_available: usize,
    pub bars_required: usize,
    /// Indicators that returned their insufficient-history fallback
    pub fallbacks: Vec<String>,
    /// Macro series ids absent from the snapshot (scored as neutral)
    pub missing_macro: Vec<String>,
    /// Support or resistance came from the fallback multipliers (no swing beyond price).
    /// A clean trend does this with any amount of history, so it does not affect `complete`.
    pub levels_estimated: bool,
    pub complete: bool,
}

impl DataCompleteness {
    pub fn new(
        bars_available: usize,
        bars_required: usize,
        fallbacks: Vec<String>,
        missing_macro: Vec<String>,
        levels_estimated: bool,
    ) -> Self {
        let complete =
            bars_available >= bars_required && fallbacks.is_empty() && missing_macro.is_empty();
        Self {
            bars_available,
            bars_required,
            fallbacks,
            missing_macro,
            levels_estimated,
            complete,
        }
    }

    /// min(1, available / required)
    pub fn history_ratio(&self) -> f64 {
        if self.bars_required == 0 {
            return 1.0;
        }
        (self.bars_available as f64 / self.bars_required as f64).min(1.0)
    }
}

/// The flat per-asset result record handed to presentation layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetEvaluation {
    pub symbol: String,
    pub indicators: IndicatorSet,
    pub momentum_strength: f64,
    pub trend: TrendClassification,
    pub composite_risk: CompositeEvaluation,
    pub sentiment: CompositeEvaluation,
    /// Sorted: severity descending, then impact descending
    pub canaries: Vec<Canary>,
    pub projection: Projection,
    pub data_completeness: DataCompleteness,
}

impl AssetEvaluation {
    pub fn top_canary(&self) -> Option<&Canary> {
        self.canaries.first()
    }
}
