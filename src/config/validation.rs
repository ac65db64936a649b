//! Fail-fast checks for the compile-time scoring tables.

use anyhow::{Result, bail, ensure};

use super::constants::{WEIGHT_SUM_TOLERANCE, composite_risk, indicators, sentiment, trend};
use super::types::{AmplifierCondition, CompositeTable, IndicatorPeriods, TrendVoteConfig};

/// Tables the engine ships with.
pub const ALL_TABLES: &[CompositeTable] = &[composite_risk::TABLE, sentiment::TABLE];

/// Returns an error naming the first violated table invariant.
pub fn validate_tables() -> Result<()> {
    for table in ALL_TABLES {
        validate_table(table)?;
    }
    validate_periods(&indicators::DEFAULT)?;
    validate_trend(&trend::DEFAULT)
}

pub fn validate_trend(t: &TrendVoteConfig) -> Result<()> {
    ensure!(
        t.total_possible_points() > 0.0,
        "trend vote table has no points to award"
    );
    ensure!(
        t.moderate_above < t.strong_above,
        "trend strength cuts out of order: moderate {} >= strong {}",
        t.moderate_above,
        t.strong_above
    );
    Ok(())
}

/// Window lengths must be non-zero and the MACD averages ordered fast < slow.
pub fn validate_periods(p: &IndicatorPeriods) -> Result<()> {
    let windows = [
        ("sma_short", p.sma_short),
        ("sma_medium", p.sma_medium),
        ("sma_long", p.sma_long),
        ("ema_fast", p.ema_fast),
        ("ema_slow", p.ema_slow),
        ("macd_signal", p.macd_signal),
        ("rsi", p.rsi),
        ("atr", p.atr),
        ("bollinger", p.bollinger),
        ("swing_window", p.swing_window),
        ("max_levels", p.max_levels),
        ("roc_lookback", p.roc_lookback),
        ("volume_ratio_window", p.volume_ratio_window),
        ("volume_trend_short", p.volume_trend_short),
        ("volume_trend_long", p.volume_trend_long),
    ];
    if let Some((name, _)) = windows.iter().find(|(_, len)| *len == 0) {
        bail!("indicator period '{name}' must be non-zero");
    }
    ensure!(
        p.ema_fast < p.ema_slow,
        "MACD fast EMA ({}) must be shorter than slow EMA ({})",
        p.ema_fast,
        p.ema_slow
    );
    ensure!(
        p.volume_trend_short <= p.volume_trend_long,
        "volume trend short window ({}) exceeds long window ({})",
        p.volume_trend_short,
        p.volume_trend_long
    );
    ensure!(
        p.bollinger_k.is_finite() && p.bollinger_k > 0.0,
        "Bollinger width multiplier must be positive, got {}",
        p.bollinger_k
    );
    Ok(())
}

/// Panics if any table is inconsistent. Called once at engine start-up.
pub fn assert_valid_tables() {
    if let Err(e) = validate_tables() {
        panic!("Invalid scoring configuration: {e:#}");
    }
}

pub fn validate_table(table: &CompositeTable) -> Result<()> {
    let name = table.name;
    ensure!(!table.pillars.is_empty(), "{name}: no pillars");
    ensure!(
        table.domain.min < table.domain.max,
        "{name}: empty score domain"
    );

    let pillar_sum: f64 = table.pillars.iter().map(|p| p.weight.value()).sum();
    ensure!(
        (pillar_sum - 1.0).abs() <= WEIGHT_SUM_TOLERANCE,
        "{name}: pillar weights sum to {pillar_sum:.4}, expected 1.0"
    );

    for pillar in table.pillars {
        ensure!(
            !pillar.indicators.is_empty(),
            "{name}/{}: pillar has no indicators",
            pillar.name
        );
        let sum: f64 = pillar.indicators.iter().map(|i| i.weight.value()).sum();
        ensure!(
            (sum - 1.0).abs() <= WEIGHT_SUM_TOLERANCE,
            "{name}/{}: indicator weights sum to {sum:.4}, expected 1.0",
            pillar.name
        );

        for ind in pillar.indicators {
            let s = ind.scale;
            if !(s.min < s.neutral && s.neutral < s.max) {
                bail!(
                    "{name}/{}: scale for '{}' must satisfy min < neutral < max (got {} / {} / {})",
                    pillar.name,
                    ind.name,
                    s.min,
                    s.neutral,
                    s.max
                );
            }
            if let Some(c) = ind.canary {
                ensure!(
                    c.low < c.medium && c.medium < c.high,
                    "{name}/{}: canary thresholds for '{}' not ascending",
                    pillar.name,
                    ind.name
                );
            }
        }
    }

    validate_regimes(table)?;

    for amp in table.amplifiers {
        if let AmplifierCondition::AllAtLeast { pillars, .. } = amp.condition {
            for p in pillars {
                ensure!(
                    table.pillar_names().any(|n| n == *p),
                    "{name}: amplifier '{}' names unknown pillar '{p}'",
                    amp.reason
                );
            }
        }
    }
    Ok(())
}

fn validate_regimes(table: &CompositeTable) -> Result<()> {
    let name = table.name;
    let Some(first) = table.regimes.first() else {
        bail!("{name}: no regime bands");
    };
    ensure!(
        first.lower_bound == table.domain.min,
        "{name}: lowest regime starts at {} but domain starts at {}",
        first.lower_bound,
        table.domain.min
    );
    for pair in table.regimes.windows(2) {
        ensure!(
            pair[0].lower_bound < pair[1].lower_bound,
            "{name}: regime '{}' does not start above '{}'",
            pair[1].name,
            pair[0].name
        );
        ensure!(
            pair[0].level < pair[1].level,
            "{name}: regime levels not ascending at '{}'",
            pair[1].name
        );
    }
    for band in table.regimes {
        ensure!(
            table.domain.contains(band.lower_bound),
            "{name}: regime '{}' starts outside the score domain",
            band.name
        );
    }
    Ok(())
}
