use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, Default)]
pub enum SeriesTrend {
    Rising,
    Falling,
    #[default]
    Flat,
}

/// Latest two observations of one macro series, as reported by the data layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroReading {
    pub current: f64,
    pub previous: f64,
    #[serde(default)]
    pub trend: SeriesTrend,
}

impl MacroReading {
    pub fn new(current: f64, previous: f64, trend: SeriesTrend) -> Self {
        Self {
            current,
            previous,
            trend,
        }
    }

    /// Single observation, no history.
    pub fn level(current: f64) -> Self {
        Self::new(current, current, SeriesTrend::Flat)
    }

    pub fn change(&self) -> f64 {
        self.current - self.previous
    }
}

/// Macro series keyed by identifier (e.g. "VIX", "CPI_YOY").
pub type MacroSnapshot = BTreeMap<String, MacroReading>;
