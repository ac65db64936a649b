//! Pure indicator functions over a price series.
//! Every function is total: short history resolves to a documented fallback, never an error.

use crate::config::{DF, IndicatorPeriods, MomentumPct, VolRatio};
use crate::domain::{Bar, PriceSeries};
use crate::models::{Bollinger, IndicatorSet, Macd};
use crate::utils::{mean, mean_and_stddev};

use super::support_resistance::support_resistance;

/// Simple moving average of the last `period` values.
/// Falls back to the last value when `series.len() < period`.
pub fn sma(series: &[f64], period: usize) -> f64 {
    let Some(&last) = series.last() else {
        return 0.0;
    };
    if period == 0 || series.len() < period {
        return last;
    }
    mean(&series[series.len() - period..])
}

/// EMA seeded with the SMA of the first `period` values.
/// Returns one value per input index from `period - 1` onwards, or nothing if history is too short.
pub fn ema_series(series: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || series.len() < period {
        return Vec::new();
    }
    let k = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(series.len() - period + 1);
    let mut prev = mean(&series[..period]);
    out.push(prev);
    for &value in &series[period..] {
        prev = (value - prev) * k + prev;
        out.push(prev);
    }
    out
}

/// Latest EMA value. Falls back to the last value when `series.len() < period`.
pub fn ema(series: &[f64], period: usize) -> f64 {
    match ema_series(series, period).last() {
        Some(&v) => v,
        None => series.last().copied().unwrap_or(0.0),
    }
}

/// Simple-average RSI over the trailing `period` changes.
pub fn rsi(series: &[f64], period: usize) -> f64 {
    if period == 0 || series.len() < period + 1 {
        return 50.0;
    }

    let window = &series[series.len() - period - 1..];
    let (gains, losses) = window
        .windows(2)
        .map(|w| w[1] - w[0])
        .fold((0.0, 0.0), |(g, l), change| {
            if change > 0.0 {
                (g + change, l)
            } else {
                (g, l - change)
            }
        });

    let avg_gain = gains / period as f64;
    let avg_loss = losses / period as f64;

    if avg_gain == 0.0 && avg_loss == 0.0 {
        return 50.0;
    }
    if avg_loss == 0.0 {
        return 100.0;
    }
    if avg_gain == 0.0 {
        return 0.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}

/// MACD line, its signal EMA and the histogram. All zero below `slow` points.
pub fn macd(series: &[f64], fast: usize, slow: usize, signal: usize) -> Macd {
    if fast == 0 || slow == 0 || fast > slow || series.len() < slow {
        return Macd::default();
    }

    let fast_ema = ema_series(series, fast);
    let slow_ema = ema_series(series, slow);

    // fast starts at index fast-1, slow at slow-1
    let offset = slow - fast;
    let macd_line: Vec<f64> = slow_ema
        .iter()
        .enumerate()
        .map(|(i, s)| fast_ema[i + offset] - s)
        .collect();

    let macd_value = macd_line.last().copied().unwrap_or(0.0);
    let signal_value = ema(&macd_line, signal);

    Macd {
        macd: macd_value,
        signal: signal_value,
        histogram: macd_value - signal_value,
    }
}

/// Average true range over the trailing `period` bars. Zero below `period + 1` bars.
pub fn atr(bars: &[Bar], period: usize) -> f64 {
    if period == 0 || bars.len() < period + 1 {
        return 0.0;
    }
    let ranges: Vec<f64> = bars
        .windows(2)
        .map(|w| w[1].true_range(Some(w[0].close)))
        .collect();
    mean(&ranges[ranges.len() - period..])
}

/// Bollinger bands with population standard deviation. Flat at the last price below `period` points.
pub fn bollinger(series: &[f64], period: usize, k: f64) -> Bollinger {
    let last = series.last().copied().unwrap_or(0.0);
    if period == 0 || series.len() < period {
        return Bollinger::flat(last);
    }
    let (middle, std_dev) = mean_and_stddev(&series[series.len() - period..]);
    Bollinger {
        upper: middle + k * std_dev,
        middle,
        lower: middle - k * std_dev,
    }
}

/// Percent change over `lookback` bars. Zero when history is too short.
pub fn rate_of_change(series: &[f64], lookback: usize) -> MomentumPct {
    if lookback == 0 || series.len() < lookback + 1 {
        return MomentumPct::new(0.0);
    }
    let current = series[series.len() - 1];
    let past = series[series.len() - 1 - lookback];
    MomentumPct::calculate(current, past)
}

/// Last volume over the trailing `window` average (the last bar included).
pub fn volume_ratio(volumes: &[f64], window: usize) -> VolRatio {
    let Some(&last) = volumes.last() else {
        return VolRatio::NEUTRAL;
    };
    let start = volumes.len().saturating_sub(window.max(1));
    VolRatio::calculate(last, mean(&volumes[start..]))
}

/// Short average volume over long average volume. Neutral below `long` bars.
pub fn volume_trend(volumes: &[f64], short: usize, long: usize) -> VolRatio {
    if short == 0 || long == 0 || volumes.len() < long {
        return VolRatio::NEUTRAL;
    }
    let short_avg = mean(&volumes[volumes.len() - short..]);
    let long_avg = mean(&volumes[volumes.len() - long..]);
    VolRatio::calculate(short_avg, long_avg)
}

/// Builds the full indicator snapshot for the last bar, plus the names of indicators that
/// fell back for lack of history. Support/resistance estimated from the fallback multipliers
/// is not a history shortfall and shows up as empty level lists instead.
pub fn compute_indicator_set(series: &PriceSeries, p: &IndicatorPeriods) -> (IndicatorSet, Vec<String>) {
    let closes = series.closes();
    let highs = series.highs();
    let lows = series.lows();
    let volumes = series.volumes();
    let n = closes.len();
    let close = series.last_close();

    let levels = support_resistance(&highs, &lows, close, p.swing_window, p.max_levels);

    let set = IndicatorSet {
        close,
        sma20: sma(&closes, p.sma_short),
        sma50: sma(&closes, p.sma_medium),
        sma200: sma(&closes, p.sma_long),
        rsi14: rsi(&closes, p.rsi),
        macd: macd(&closes, p.ema_fast, p.ema_slow, p.macd_signal),
        atr14: atr(series.bars(), p.atr),
        bollinger: bollinger(&closes, p.bollinger, p.bollinger_k),
        support: levels.support,
        resistance: levels.resistance,
        support_levels: levels.support_levels,
        resistance_levels: levels.resistance_levels,
        rate_of_change_20: rate_of_change(&closes, p.roc_lookback).as_percent(),
        volume_ratio: volume_ratio(&volumes, p.volume_ratio_window),
        volume_trend: volume_trend(&volumes, p.volume_trend_short, p.volume_trend_long),
    };

    let checks: [(bool, String); 10] = [
        (n < p.sma_short, format!("SMA{}", p.sma_short)),
        (n < p.sma_medium, format!("SMA{}", p.sma_medium)),
        (n < p.sma_long, format!("SMA{}", p.sma_long)),
        (n < p.rsi + 1, format!("RSI{}", p.rsi)),
        (n < p.ema_slow, "MACD".to_string()),
        (
            n >= p.ema_slow && n < (p.ema_slow + p.macd_signal).saturating_sub(1),
            "MACD signal".to_string(),
        ),
        (n < p.atr + 1, format!("ATR{}", p.atr)),
        (n < p.bollinger, "Bollinger".to_string()),
        (n < p.roc_lookback + 1, format!("ROC{}", p.roc_lookback)),
        (n < p.volume_trend_long, "Volume trend".to_string()),
    ];
    let fallbacks: Vec<String> = checks
        .into_iter()
        .filter_map(|(fell_back, name)| fell_back.then_some(name))
        .collect();

    if DF.log_indicators && !fallbacks.is_empty() {
        log::info!(
            "{}: {} bars, fallbacks used for [{}]",
            series.symbol,
            n,
            fallbacks.join(", ")
        );
    }

    (set, fallbacks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::constants::indicators;

    fn flat_bars(closes: &[f64]) -> Vec<Bar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, c)| Bar::flat(i as i64, *c, 100.0))
            .collect()
    }

    #[test]
    fn test_sma_basic_and_fallback() {
        assert_eq!(sma(&[1.0, 2.0, 3.0, 4.0], 2), 3.5);
        assert_eq!(sma(&[1.0, 2.0, 3.0], 5), 3.0, "Short series falls back to last value");
        assert_eq!(sma(&[], 5), 0.0);
    }

    #[test]
    fn test_ema_seeded_with_sma() {
        let series = [1.0, 2.0, 3.0, 4.0, 5.0];
        let out = ema_series(&series, 3);
        assert_eq!(out.len(), 3, "One value per index from period-1");
        assert_eq!(out[0], 2.0, "Seed must be SMA of first 3");
        // k = 0.5: (4 - 2) * 0.5 + 2 = 3, (5 - 3) * 0.5 + 3 = 4
        assert_eq!(out[1], 3.0);
        assert_eq!(out[2], 4.0);
        assert_eq!(ema(&series, 3), 4.0);
        assert_eq!(ema(&[7.0, 8.0], 3), 8.0, "Short series falls back to last value");
    }

    #[test]
    fn test_rsi_extremes() {
        let rising: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let falling: Vec<f64> = rising.iter().rev().copied().collect();
        assert_eq!(rsi(&rising, 14), 100.0, "All-gains window must be exactly 100");
        assert_eq!(rsi(&falling, 14), 0.0, "All-losses window must be exactly 0");
        assert_eq!(rsi(&[100.0; 30], 14), 50.0, "Flat window is neutral");
        assert_eq!(rsi(&rising[..10], 14), 50.0, "Insufficient history is neutral");
    }

    #[test]
    fn test_rsi_mixed_window() {
        // 7 gains of 2 and 7 losses of 1 -> RS = 2 -> RSI = 66.67
        let mut series = vec![100.0];
        for i in 0..14 {
            let last = *series.last().unwrap();
            series.push(if i % 2 == 0 { last + 2.0 } else { last - 1.0 });
        }
        let value = rsi(&series, 14);
        assert!((value - 200.0 / 3.0).abs() < 1e-9, "Expected 66.67, got {}", value);
    }

    #[test]
    fn test_macd_short_series_is_zero() {
        let series: Vec<f64> = (0..25).map(|i| i as f64).collect();
        assert_eq!(macd(&series, 12, 26, 9), Macd::default());
    }

    #[test]
    fn test_macd_zero_fast_window_is_zero() {
        let series: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        assert_eq!(macd(&series, 0, 26, 9), Macd::default(), "Zero window must not index out of range");
    }

    #[test]
    fn test_macd_rising_series_positive() {
        let series: Vec<f64> = (0..120).map(|i| 100.0 * 1.01f64.powi(i)).collect();
        let m = macd(&series, 12, 26, 9);
        assert!(m.macd > 0.0, "Fast EMA should lead on a rising series");
        assert!(m.macd > m.signal, "MACD should sit above its signal line");
        assert!((m.histogram - (m.macd - m.signal)).abs() < 1e-12);
    }

    #[test]
    fn test_atr_flat_and_short() {
        assert_eq!(atr(&flat_bars(&[100.0; 30]), 14), 0.0, "Flat bars have no range");
        assert_eq!(atr(&flat_bars(&[100.0; 14]), 14), 0.0, "Needs period+1 bars");
    }

    #[test]
    fn test_atr_constant_range() {
        let bars: Vec<Bar> = (0..20)
            .map(|i| Bar::new(i, None, 102.0, 98.0, 100.0, 1.0))
            .collect();
        assert!((atr(&bars, 14) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_bollinger_flat_and_short() {
        let flat = bollinger(&[50.0; 40], 20, 2.0);
        assert_eq!(flat, Bollinger::flat(50.0), "Constant series collapses the band");
        let short = bollinger(&[1.0, 2.0, 3.0], 20, 2.0);
        assert_eq!(short, Bollinger::flat(3.0), "Short series returns a flat band at last price");
    }

    #[test]
    fn test_bollinger_population_std() {
        let series = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let b = bollinger(&series, 8, 2.0);
        assert_eq!(b.middle, 5.0);
        assert!((b.upper - 9.0).abs() < 1e-12 && (b.lower - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_volume_ratio_and_trend() {
        let mut volumes = vec![100.0; 30];
        *volumes.last_mut().unwrap() = 280.0;
        // avg of last 10 = (900 + 280) / 10 = 118
        let ratio = volume_ratio(&volumes, 10).value();
        assert!((ratio - 280.0 / 118.0).abs() < 1e-12);
        assert_eq!(volume_trend(&volumes[..10], 5, 20), VolRatio::NEUTRAL);
        assert_eq!(volume_ratio(&[0.0; 5], 10), VolRatio::NEUTRAL, "Zero volume is neutral");
    }

    #[test]
    fn test_rate_of_change_percent() {
        let series = [100.0, 105.0, 110.0];
        assert!((rate_of_change(&series, 2).as_percent() - 10.0).abs() < 1e-9);
        assert_eq!(rate_of_change(&series, 5).value(), 0.0);
    }

    #[test]
    fn test_short_series_reports_fallbacks() {
        let series = PriceSeries::new("X", flat_bars(&[10.0; 30])).unwrap();
        let (set, fallbacks) = compute_indicator_set(&series, &indicators::DEFAULT);
        assert_eq!(set.sma200, 10.0, "SMA200 falls back to last close");
        assert!(fallbacks.contains(&"SMA200".to_string()), "Fallbacks: {:?}", fallbacks);
        assert!(fallbacks.contains(&"SMA50".to_string()));
        assert!(!fallbacks.contains(&"SMA20".to_string()));
        assert!(!fallbacks.contains(&"RSI14".to_string()));
    }
}
