use itertools::Itertools;

use crate::config::{CanaryThresholds, CompositeTable, DF};
use crate::models::{Canary, IndicatorReading, Severity};

/// Highest tier whose threshold the oriented value reaches.
pub fn severity_for(value: f64, t: &CanaryThresholds) -> Option<Severity> {
    if value >= t.high {
        Some(Severity::High)
    } else if value >= t.medium {
        Some(Severity::Medium)
    } else if value >= t.low {
        Some(Severity::Low)
    } else {
        None
    }
}

/// Scans readings (in table order) against their thresholds. Stateless; missing inputs never fire.
pub fn detect_canaries(table: &CompositeTable, readings: &[IndicatorReading]) -> Vec<Canary> {
    let specs = table
        .pillars
        .iter()
        .flat_map(|pillar| pillar.indicators.iter().map(move |spec| (pillar, spec)));

    let mut canaries: Vec<Canary> = specs
        .zip_eq(readings)
        .filter_map(|((pillar, spec), reading)| {
            let thresholds = spec.canary.as_ref()?;
            reading.raw_value?;
            let severity = severity_for(reading.normalized_value, thresholds)?;
            Some(Canary::new(
                spec.signal,
                pillar.name,
                spec.name,
                severity,
                spec.weight.as_percent(),
                pillar.weight.as_percent(),
            ))
        })
        .collect();

    sort_canaries(&mut canaries);

    if DF.log_canaries {
        for c in &canaries {
            log::info!("{}: {} (impact {:.1})", table.name, c, c.impact_score);
        }
    }
    canaries
}

/// All `high` before `medium` before `low`; ties by impact, largest first.
pub fn sort_canaries(canaries: &mut [Canary]) {
    canaries.sort_by(Canary::display_order);
}

pub fn count_at(canaries: &[Canary], severity: Severity) -> usize {
    canaries.iter().filter(|c| c.severity == severity).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::constants::composite_risk;

    fn canary(severity: Severity, impact: f64) -> Canary {
        // impact = indicator% * pillar% / 100 with pillar fixed at 100%
        Canary::new("sig", "pillar", "ind", severity, impact, 100.0)
    }

    #[test]
    fn test_sort_order() {
        let mut list = vec![
            canary(Severity::High, 2.0),
            canary(Severity::Medium, 9.0),
            canary(Severity::High, 5.0),
        ];
        sort_canaries(&mut list);
        let order: Vec<(Severity, f64)> = list.iter().map(|c| (c.severity, c.impact_score)).collect();
        assert_eq!(
            order,
            vec![(Severity::High, 5.0), (Severity::High, 2.0), (Severity::Medium, 9.0)]
        );
    }

    #[test]
    fn test_low_sorts_last() {
        let mut list = vec![canary(Severity::Low, 50.0), canary(Severity::Medium, 1.0)];
        sort_canaries(&mut list);
        assert_eq!(list[0].severity, Severity::Medium);
    }

    #[test]
    fn test_severity_rank_matches_declaration() {
        use strum::IntoEnumIterator;
        let ranked: Vec<Severity> = Severity::iter().collect();
        assert_eq!(ranked, vec![Severity::Low, Severity::Medium, Severity::High]);
        assert!(ranked.windows(2).all(|w| w[0] < w[1]), "Severity must order low < medium < high");
        assert_eq!(Severity::High.to_string(), "high");
    }

    #[test]
    fn test_severity_tiers() {
        let t = CanaryThresholds { low: 0.25, medium: 0.5, high: 0.75 };
        assert_eq!(severity_for(0.1, &t), None);
        assert_eq!(severity_for(0.25, &t), Some(Severity::Low));
        assert_eq!(severity_for(0.6, &t), Some(Severity::Medium));
        assert_eq!(severity_for(0.75, &t), Some(Severity::High), "Stricter threshold upgrades");
    }

    #[test]
    fn test_impact_score_from_weights() {
        let c = Canary::new("VIX spiking", "Risk Appetite", "VIX", Severity::High, 40.0, 30.0);
        assert_eq!(c.impact_score, 12.0);
    }

    #[test]
    fn test_detect_skips_missing_inputs() {
        let table = composite_risk::TABLE;
        let readings: Vec<IndicatorReading> = table
            .pillars
            .iter()
            .flat_map(|p| {
                p.indicators.iter().map(move |spec| IndicatorReading {
                    name: spec.name.to_string(),
                    pillar: p.name.to_string(),
                    raw_value: if p.name == composite_risk::MOMENTUM { Some(0.0) } else { None },
                    normalized_value: 1.0,
                    weight: spec.weight,
                })
            })
            .collect();

        let canaries = detect_canaries(&table, &readings);
        assert_eq!(canaries.len(), 3, "Only the momentum readings carry data");
        assert!(canaries.iter().all(|c| c.severity == Severity::High));
        // Price vs 200-day MA: 40% * 35% = 14 is the biggest momentum impact
        assert_eq!(canaries[0].indicator_name, "Price vs 200-day MA");
        assert!((canaries[0].impact_score - 14.0).abs() < 1e-9);
    }
}
