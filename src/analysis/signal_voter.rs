use crate::config::TrendVoteConfig;
use crate::models::{IndicatorSet, TrendClassification, TrendDirection, TrendStrength, TrendVote};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Bullish,
    Bearish,
}

/// Tallies the five independent trend checks. Each check awards its points to one side at most.
pub fn tally_votes(
    set: &IndicatorSet,
    momentum_strength: f64,
    cfg: &TrendVoteConfig,
) -> (TrendVote, Vec<String>) {
    let mut vote = TrendVote {
        bullish_points: 0.0,
        bearish_points: 0.0,
        total_possible_points: cfg.total_possible_points(),
    };
    let mut signals = Vec::new();

    let mut cast = |side: Option<Side>, points: f64, reason: String| {
        match side {
            Some(Side::Bullish) => vote.bullish_points += points,
            Some(Side::Bearish) => vote.bearish_points += points,
            None => return,
        }
        signals.push(reason);
    };

    let ma_side = if set.is_bullish_aligned() {
        Some(Side::Bullish)
    } else if set.is_bearish_aligned() {
        Some(Side::Bearish)
    } else {
        None
    };
    cast(
        ma_side,
        cfg.ma_alignment_points,
        match ma_side {
            Some(Side::Bullish) => "Price above MA20 > MA50 > MA200".to_string(),
            _ => "Price below MA20 < MA50 < MA200".to_string(),
        },
    );

    let rsi_side = split(set.rsi14, cfg.rsi_bullish_above, cfg.rsi_bearish_below);
    cast(rsi_side, cfg.rsi_points, format!("RSI at {:.1}", set.rsi14));

    let m = set.macd;
    let macd_side = if m.macd > m.signal && m.histogram > 0.0 {
        Some(Side::Bullish)
    } else if m.macd < m.signal && m.histogram < 0.0 {
        Some(Side::Bearish)
    } else {
        None
    };
    cast(
        macd_side,
        cfg.macd_points,
        format!("MACD {:.3} vs signal {:.3}", m.macd, m.signal),
    );

    let momentum_side = split(
        momentum_strength,
        cfg.momentum_bullish_above,
        cfg.momentum_bearish_below,
    );
    cast(
        momentum_side,
        cfg.momentum_points,
        format!("Momentum strength {:.0}", momentum_strength),
    );

    let volume_side = split(
        set.volume_ratio.value(),
        cfg.volume_bullish_above,
        cfg.volume_bearish_below,
    );
    cast(
        volume_side,
        cfg.volume_points,
        format!("Volume at {} of 10-day average", set.volume_ratio),
    );

    (vote, signals)
}

fn split(value: f64, bullish_above: f64, bearish_below: f64) -> Option<Side> {
    if value > bullish_above {
        Some(Side::Bullish)
    } else if value < bearish_below {
        Some(Side::Bearish)
    } else {
        None
    }
}

/// Converts a tally into a label. A side wins once its confidence passes the cutoff,
/// which sits below a strict majority of the available points.
pub fn classify_vote(vote: TrendVote, cfg: &TrendVoteConfig) -> (TrendDirection, TrendStrength, f64) {
    let bull = vote.bullish_confidence();
    let bear = vote.bearish_confidence();

    let strength_of = |confidence: f64| {
        if confidence > cfg.strong_above {
            TrendStrength::Strong
        } else if confidence > cfg.moderate_above {
            TrendStrength::Moderate
        } else {
            TrendStrength::Weak
        }
    };

    if bull > cfg.confidence_cutoff {
        (TrendDirection::Bullish, strength_of(bull), bull)
    } else if bear > cfg.confidence_cutoff {
        (TrendDirection::Bearish, strength_of(bear), bear)
    } else {
        (TrendDirection::Neutral, TrendStrength::Weak, bull.max(bear))
    }
}

pub fn classify_trend(
    set: &IndicatorSet,
    momentum_strength: f64,
    cfg: &TrendVoteConfig,
) -> TrendClassification {
    let (vote, signals) = tally_votes(set, momentum_strength, cfg);
    let (direction, strength, confidence) = classify_vote(vote, cfg);
    TrendClassification {
        direction,
        strength,
        confidence,
        vote,
        signals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VolRatio;
    use crate::config::constants::trend;
    use crate::models::{Bollinger, Macd};

    fn set_with(close: f64, sma20: f64, sma50: f64, sma200: f64, rsi: f64, macd: f64, signal: f64) -> IndicatorSet {
        IndicatorSet {
            close,
            sma20,
            sma50,
            sma200,
            rsi14: rsi,
            macd: Macd {
                macd,
                signal,
                histogram: macd - signal,
            },
            atr14: 1.0,
            bollinger: Bollinger::flat(close),
            support: close * 0.95,
            resistance: close * 1.05,
            support_levels: vec![],
            resistance_levels: vec![],
            rate_of_change_20: 0.0,
            volume_ratio: VolRatio::NEUTRAL,
            volume_trend: VolRatio::NEUTRAL,
        }
    }

    fn vote(bull: f64, bear: f64) -> TrendVote {
        TrendVote {
            bullish_points: bull,
            bearish_points: bear,
            total_possible_points: 9.0,
        }
    }

    #[test]
    fn test_full_bullish_alignment() {
        let mut set = set_with(110.0, 105.0, 100.0, 90.0, 65.0, 2.0, 1.0);
        set.volume_ratio = VolRatio::new(1.5);
        let c = classify_trend(&set, 70.0, &trend::DEFAULT);
        assert_eq!(c.vote.bullish_points, 9.0);
        assert_eq!(c.vote.bearish_points, 0.0);
        assert_eq!(c.direction, TrendDirection::Bullish);
        assert_eq!(c.strength, TrendStrength::Strong);
        assert_eq!(c.confidence, 100.0);
        assert_eq!(c.signals.len(), 5, "Every check voted");
    }

    #[test]
    fn test_full_bearish_alignment() {
        let mut set = set_with(80.0, 85.0, 90.0, 100.0, 30.0, -2.0, -1.0);
        set.volume_ratio = VolRatio::new(0.5);
        let c = classify_trend(&set, 20.0, &trend::DEFAULT);
        assert_eq!(c.vote.bearish_points, 9.0);
        assert_eq!(c.direction, TrendDirection::Bearish);
        assert_eq!(c.strength, TrendStrength::Strong);
    }

    #[test]
    fn test_nothing_votes_is_neutral_weak() {
        let set = set_with(100.0, 100.0, 100.0, 100.0, 50.0, 0.0, 0.0);
        let c = classify_trend(&set, 50.0, &trend::DEFAULT);
        assert_eq!(c.vote.bullish_points + c.vote.bearish_points, 0.0);
        assert_eq!(c.direction, TrendDirection::Neutral);
        assert_eq!(c.strength, TrendStrength::Weak);
        assert_eq!(c.confidence, 0.0);
        assert!(c.signals.is_empty());
    }

    #[test]
    fn test_cutoff_is_strictly_greater() {
        let cfg = TrendVoteConfig {
            confidence_cutoff: 50.0,
            ..trend::DEFAULT
        };
        let exact = TrendVote {
            bullish_points: 5.0,
            bearish_points: 0.0,
            total_possible_points: 10.0,
        };
        let (direction, _, confidence) = classify_vote(exact, &cfg);
        assert_eq!(confidence, 50.0);
        assert_eq!(direction, TrendDirection::Neutral, "Exactly at the cutoff does not win");
    }

    #[test]
    fn test_contested_five_of_nine_still_declares_trend() {
        // 5/9 = 55.6% clears the 55% cutoff even though 4 points went the other way
        let (direction, strength, confidence) = classify_vote(vote(5.0, 4.0), &trend::DEFAULT);
        assert_eq!(direction, TrendDirection::Bullish, "Asymmetric cutoff declares a trend");
        assert_eq!(strength, TrendStrength::Weak);
        assert!((confidence - 500.0 / 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_strength_bands() {
        // 6/9 = 66.67 -> Moderate, 7/9 = 77.78 -> Strong, 4/9 -> Neutral
        assert_eq!(classify_vote(vote(6.0, 0.0), &trend::DEFAULT).1, TrendStrength::Moderate);
        assert_eq!(classify_vote(vote(7.0, 0.0), &trend::DEFAULT).1, TrendStrength::Strong);
        let (direction, strength, confidence) = classify_vote(vote(4.0, 3.0), &trend::DEFAULT);
        assert_eq!(direction, TrendDirection::Neutral);
        assert_eq!(strength, TrendStrength::Weak);
        assert!((confidence - 400.0 / 9.0).abs() < 1e-9, "Neutral reports the larger side");
    }

    #[test]
    fn test_deterministic() {
        let set = set_with(101.0, 100.0, 99.0, 98.0, 57.0, 0.5, 0.2);
        let a = classify_trend(&set, 61.0, &trend::DEFAULT);
        let b = classify_trend(&set, 61.0, &trend::DEFAULT);
        assert_eq!(a, b);
    }
}
