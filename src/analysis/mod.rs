// Indicator, scoring and projection algorithms
pub mod canary_detector;
pub mod composite_scorer;
pub mod indicators;
pub mod momentum;
pub mod normalizer;
pub mod pillar_scoring;
pub mod projection;
pub mod regime_classifier;
pub mod signal_voter;
pub mod support_resistance;

pub use composite_scorer::{CompositeOutcome, evaluate_composite};
pub use indicators::compute_indicator_set;
pub use momentum::momentum_strength;
pub use normalizer::normalize;
pub use pillar_scoring::ScoringInputs;
pub use projection::{ProjectionInputs, project};
pub use regime_classifier::classify;
pub use signal_voter::classify_trend;
