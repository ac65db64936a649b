use serde::{Deserialize, Serialize};

use crate::config::VolRatio;
use crate::utils::pct_diff;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Macd {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bollinger {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl Bollinger {
    /// Collapsed band at a single price.
    pub fn flat(price: f64) -> Self {
        Self {
            upper: price,
            middle: price,
            lower: price,
        }
    }
}

/// Technical snapshot of one series at its last bar. A fresh set is built on every evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub close: f64,
    pub sma20: f64,
    pub sma50: f64,
    pub sma200: f64,
    pub rsi14: f64,
    pub macd: Macd,
    pub atr14: f64,
    pub bollinger: Bollinger,
    pub support: f64,
    pub resistance: f64,
    /// Nearest first (descending)
    pub support_levels: Vec<f64>,
    /// Nearest first (ascending)
    pub resistance_levels: Vec<f64>,
    /// 20-bar rate of change, in percent
    pub rate_of_change_20: f64,
    pub volume_ratio: VolRatio,
    pub volume_trend: VolRatio,
}

impl IndicatorSet {
    pub fn price_vs_sma50_pct(&self) -> f64 {
        pct_diff(self.close, self.sma50)
    }

    pub fn price_vs_sma200_pct(&self) -> f64 {
        pct_diff(self.close, self.sma200)
    }

    /// price > MA20 > MA50 > MA200
    pub fn is_bullish_aligned(&self) -> bool {
        self.close > self.sma20 && self.sma20 > self.sma50 && self.sma50 > self.sma200
    }

    /// price < MA20 < MA50 < MA200
    pub fn is_bearish_aligned(&self) -> bool {
        self.close < self.sma20 && self.sma20 < self.sma50 && self.sma50 < self.sma200
    }
}
