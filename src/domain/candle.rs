use serde::{Deserialize, Serialize};

/// One daily bar. `open` is optional because several providers only publish HLC + volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp_ms: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<f64>,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: f64,
}

impl Bar {
    // A constructor for convenience
    pub fn new(timestamp_ms: i64, open: Option<f64>, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Bar {
            timestamp_ms,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Bar where open/high/low all equal close.
    pub fn flat(timestamp_ms: i64, close: f64, volume: f64) -> Self {
        Self::new(timestamp_ms, Some(close), close, close, close, volume)
    }

    /// max(high - low, |high - prev_close|, |low - prev_close|)
    pub fn true_range(&self, prev_close: Option<f64>) -> f64 {
        let range = self.high - self.low;
        match prev_close {
            Some(pc) => range.max((self.high - pc).abs()).max((self.low - pc).abs()),
            None => range,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_true_range_uses_gap() {
        let bar = Bar::new(0, None, 105.0, 102.0, 104.0, 1.0);
        assert_eq!(bar.true_range(None), 3.0, "Without previous close TR is high-low");
        assert_eq!(bar.true_range(Some(100.0)), 5.0, "Gap up should widen TR to high-prev_close");
        assert_eq!(bar.true_range(Some(110.0)), 8.0, "Gap down should widen TR to prev_close-low");
    }

    #[test]
    fn test_flat_bar() {
        let bar = Bar::flat(1, 50.0, 10.0);
        assert_eq!(bar.true_range(Some(50.0)), 0.0);
        assert_eq!(bar.open, Some(50.0));
    }
}
