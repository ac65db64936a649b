use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::{MacroSnapshot, PriceSeries};

/// On-disk batch: every asset's bars plus one shared macro snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchInput {
    pub assets: Vec<PriceSeries>,
    #[serde(default, rename = "macro")]
    pub macro_data: MacroSnapshot,
}

impl BatchInput {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to parse batch JSON")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read batch file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Invalid batch file {}", path.display()))
    }

    /// Keeps only the named symbols (case-insensitive). An empty filter keeps everything.
    pub fn retain_symbols(&mut self, symbols: &[String]) {
        if symbols.is_empty() {
            return;
        }
        self.assets
            .retain(|a| symbols.iter().any(|s| s.eq_ignore_ascii_case(&a.symbol)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "assets": [
            {"symbol": "SPY", "bars": [{"timestamp_ms": 1, "high": 2.0, "low": 1.0, "close": 1.5, "volume": 5.0}]},
            {"symbol": "QQQ", "bars": [{"timestamp_ms": 1, "open": 3.0, "high": 4.0, "low": 2.5, "close": 3.5}]}
        ],
        "macro": {"VIX": {"current": 18.5, "previous": 17.0, "trend": "Rising"}}
    }"#;

    #[test]
    fn test_parse_and_filter() {
        let mut batch = BatchInput::from_json(SAMPLE).expect("sample parses");
        assert_eq!(batch.assets.len(), 2);
        assert_eq!(batch.macro_data["VIX"].change(), 1.5);
        assert_eq!(batch.assets[1].bars()[0].volume, 0.0, "Volume defaults to zero");

        batch.retain_symbols(&["qqq".to_string()]);
        assert_eq!(batch.assets.len(), 1);
        assert_eq!(batch.assets[0].symbol, "QQQ");
    }

    #[test]
    fn test_macro_optional() {
        let batch = BatchInput::from_json(r#"{"assets": []}"#).expect("macro may be omitted");
        assert!(batch.macro_data.is_empty());
    }

    #[test]
    fn test_invalid_series_rejected() {
        let bad = r#"{"assets": [{"symbol": "X", "bars": [{"timestamp_ms": 1, "high": 1.0, "low": 2.0, "close": 1.5}]}]}"#;
        assert!(BatchInput::from_json(bad).is_err(), "high < low must fail the whole batch");
    }
}
