use crate::config::{AmplifierCondition, AmplifierRule, CompositeTable, DF, ScoreDomain};
use crate::models::{
    Canary, ComponentScore, CompositeEvaluation, CompositeResult, Severity, TriggeredAmplifier,
};

use super::canary_detector::{count_at, detect_canaries};
use super::pillar_scoring::{ScoringInputs, score_pillars};
use super::regime_classifier::classify;

/// `sum(score_i * weight_i)`
pub fn weighted_base(components: &[ComponentScore]) -> f64 {
    components
        .iter()
        .map(|c| c.normalized_value * c.weight.value())
        .sum()
}

fn condition_met(condition: &AmplifierCondition, components: &[ComponentScore], high_canaries: usize) -> bool {
    let score_of = |name: &str| {
        components
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.normalized_value)
    };
    match *condition {
        AmplifierCondition::AllAtLeast { pillars, threshold } => pillars
            .iter()
            .all(|p| score_of(*p).is_some_and(|s| s >= threshold)),
        AmplifierCondition::EveryAtMost { threshold } => {
            !components.is_empty() && components.iter().all(|c| c.normalized_value <= threshold)
        }
        AmplifierCondition::CountAtLeast { threshold, count } => {
            components
                .iter()
                .filter(|c| c.normalized_value >= threshold)
                .count()
                >= count
        }
        AmplifierCondition::HighCanariesAtLeast(n) => high_canaries >= n,
    }
}

/// Rules are judged on the unweighted pillar scores; each matched rule counts once.
pub fn triggered_amplifiers(
    rules: &[AmplifierRule],
    components: &[ComponentScore],
    high_canaries: usize,
) -> Vec<TriggeredAmplifier> {
    rules
        .iter()
        .filter(|rule| condition_met(&rule.condition, components, high_canaries))
        .map(|rule| TriggeredAmplifier {
            reason: rule.reason.to_string(),
            points: rule.points,
        })
        .collect()
}

/// `final = clamp(base + sum(amplifier points), domain)`
pub fn combine(
    components: &[ComponentScore],
    amplifiers: Vec<TriggeredAmplifier>,
    domain: ScoreDomain,
    certainty: f64,
) -> CompositeResult {
    let base_score = weighted_base(components);
    let bonus: f64 = amplifiers.iter().map(|a| a.points).sum();
    CompositeResult {
        base_score,
        final_score: domain.clamp(base_score + bonus),
        amplifiers,
        certainty,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompositeOutcome {
    pub evaluation: CompositeEvaluation,
    pub canaries: Vec<Canary>,
    pub missing_macro: Vec<String>,
}

/// Normalize, weight, amplify and classify one composite table.
pub fn evaluate_composite(table: &CompositeTable, inputs: &ScoringInputs) -> CompositeOutcome {
    let breakdown = score_pillars(table, inputs);
    let canaries = detect_canaries(table, &breakdown.readings);
    let amplifiers = triggered_amplifiers(
        table.amplifiers,
        &breakdown.components,
        count_at(&canaries, Severity::High),
    );
    let result = combine(&breakdown.components, amplifiers, table.domain, breakdown.certainty);
    let regime = classify(result.final_score, table.regimes, table.domain);

    if DF.log_composite {
        log::info!(
            "{}: base {:.1} {:+.1} -> {:.1} [{}] certainty {:.0}%",
            table.name,
            result.base_score,
            result.amplifier_total(),
            result.final_score,
            regime.name,
            result.certainty
        );
    }

    CompositeOutcome {
        evaluation: CompositeEvaluation {
            name: table.name.to_string(),
            components: breakdown.components,
            readings: breakdown.readings,
            result,
            regime,
        },
        canaries,
        missing_macro: breakdown.missing_macro,
    }
}
