use anyhow::{Result, bail, ensure};
use serde::{Deserialize, Serialize};

use super::candle::Bar;

/// Ordered daily bars for one asset, ascending by timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSeries")]
pub struct PriceSeries {
    pub symbol: String,
    bars: Vec<Bar>,
}

/// Unvalidated wire shape; deserialization goes through `PriceSeries::new`.
#[derive(Deserialize)]
struct RawSeries {
    symbol: String,
    bars: Vec<Bar>,
}

impl TryFrom<RawSeries> for PriceSeries {
    type Error = anyhow::Error;

    fn try_from(raw: RawSeries) -> Result<Self> {
        PriceSeries::new(raw.symbol, raw.bars)
    }
}

impl PriceSeries {
    /// Validates and wraps a bar vector. Bars must already be sorted ascending.
    pub fn new(symbol: impl Into<String>, bars: Vec<Bar>) -> Result<Self> {
        let symbol = symbol.into();
        ensure!(!bars.is_empty(), "{symbol}: price series is empty");

        for (i, bar) in bars.iter().enumerate() {
            let prices = [bar.high, bar.low, bar.close];
            if prices.iter().any(|p| !p.is_finite() || *p <= 0.0) {
                bail!("{symbol}: bar {i} has a non-finite or non-positive price");
            }
            if let Some(open) = bar.open {
                ensure!(
                    open.is_finite() && open > 0.0,
                    "{symbol}: bar {i} has an invalid open {open}"
                );
            }
            ensure!(
                bar.volume.is_finite() && bar.volume >= 0.0,
                "{symbol}: bar {i} has negative volume {}",
                bar.volume
            );
            ensure!(
                bar.high >= bar.low,
                "{symbol}: bar {i} has high {} below low {}",
                bar.high,
                bar.low
            );
        }

        for (i, pair) in bars.windows(2).enumerate() {
            ensure!(
                pair[1].timestamp_ms > pair[0].timestamp_ms,
                "{symbol}: timestamps not strictly ascending at bar {}",
                i + 1
            );
        }

        Ok(Self { symbol, bars })
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume).collect()
    }

    /// Non-empty by construction.
    pub fn last_close(&self) -> f64 {
        self.bars.last().map(|b| b.close).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bars(closes: &[f64]) -> Vec<Bar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, c)| Bar::flat(i as i64 * 86_400_000, *c, 1000.0))
            .collect()
    }

    #[test]
    fn test_valid_series() {
        let s = PriceSeries::new("SPY", bars(&[1.0, 2.0, 3.0])).expect("valid series");
        assert_eq!(s.len(), 3);
        assert_eq!(s.last_close(), 3.0);
        assert_eq!(s.closes(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_rejects_empty() {
        assert!(PriceSeries::new("SPY", vec![]).is_err());
    }

    #[test]
    fn test_rejects_unordered_timestamps() {
        let mut b = bars(&[1.0, 2.0, 3.0]);
        b.swap(0, 2);
        let err = PriceSeries::new("SPY", b).expect_err("out-of-order bars");
        assert!(err.to_string().contains("ascending"), "Unexpected error: {err}");
    }

    #[test]
    fn test_rejects_bad_prices() {
        let mut b = bars(&[1.0, 2.0]);
        b[1].close = f64::NAN;
        assert!(PriceSeries::new("SPY", b).is_err(), "NaN close must be rejected");

        let mut b = bars(&[1.0, 2.0]);
        b[0].low = 5.0;
        assert!(PriceSeries::new("SPY", b).is_err(), "high < low must be rejected");

        let mut b = bars(&[1.0, 2.0]);
        b[0].volume = -1.0;
        assert!(PriceSeries::new("SPY", b).is_err(), "Negative volume must be rejected");
    }

    #[test]
    fn test_deserialize_validates() {
        let ok = r#"{"symbol":"QQQ","bars":[{"timestamp_ms":1,"high":2.0,"low":1.0,"close":1.5,"volume":10.0}]}"#;
        let series: PriceSeries = serde_json::from_str(ok).expect("valid json series");
        assert_eq!(series.symbol, "QQQ");
        assert_eq!(series.bars()[0].open, None);

        let empty = r#"{"symbol":"QQQ","bars":[]}"#;
        assert!(serde_json::from_str::<PriceSeries>(empty).is_err(), "Empty series must fail to deserialize");
    }
}
