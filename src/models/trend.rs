use serde::{Deserialize, Serialize};
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum TrendDirection {
    Bullish,
    Bearish,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum TrendStrength {
    Strong,
    Moderate,
    Weak,
}

/// Weighted vote tally across the five trend checks.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrendVote {
    pub bullish_points: f64,
    pub bearish_points: f64,
    pub total_possible_points: f64,
}

impl TrendVote {
    pub fn bullish_confidence(&self) -> f64 {
        Self::pct(self.bullish_points, self.total_possible_points)
    }

    pub fn bearish_confidence(&self) -> f64 {
        Self::pct(self.bearish_points, self.total_possible_points)
    }

    fn pct(points: f64, total: f64) -> f64 {
        if total > 0.0 { points / total * 100.0 } else { 0.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendClassification {
    pub direction: TrendDirection,
    pub strength: TrendStrength,
    /// 0-100
    pub confidence: f64,
    pub vote: TrendVote,
    /// Human-readable reason for every check that voted
    pub signals: Vec<String>,
}
