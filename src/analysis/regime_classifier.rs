use crate::config::{RegimeBand, ScoreDomain};
use crate::models::Regime;

/// Highest band whose `lower_bound <= score` wins, so a boundary value belongs to the upper band.
/// Scores below every bound (only possible with an unclamped score) map to the lowest band.
pub fn classify(score: f64, bands: &[RegimeBand], domain: ScoreDomain) -> Regime {
    let idx = bands
        .iter()
        .rposition(|band| score >= band.lower_bound)
        .unwrap_or(0);
    to_regime(bands, idx, domain)
}

fn to_regime(bands: &[RegimeBand], idx: usize, domain: ScoreDomain) -> Regime {
    let Some(band) = bands.get(idx) else {
        return Regime {
            level: 0,
            name: "Unclassified".to_string(),
            lower_bound: domain.min,
            upper_bound: domain.max,
            tag: String::new(),
        };
    };
    let upper_bound = bands
        .get(idx + 1)
        .map(|next| next.lower_bound)
        .unwrap_or(domain.max);
    Regime {
        level: band.level,
        name: band.name.to_string(),
        lower_bound: band.lower_bound,
        upper_bound,
        tag: band.tag.to_string(),
    }
}
