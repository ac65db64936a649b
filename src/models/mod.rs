mod canary;
mod composite;
mod evaluation;
mod indicator_set;
mod projection;
mod regime;
mod trend;

pub use canary::{Canary, Severity};
pub use composite::{
    ComponentScore, CompositeEvaluation, CompositeResult, IndicatorReading, TriggeredAmplifier,
};
pub use evaluation::{AssetEvaluation, DataCompleteness};
pub use indicator_set::{Bollinger, IndicatorSet, Macd};
pub use projection::{Projection, ProjectionPoint};
pub use regime::Regime;
pub use trend::{TrendClassification, TrendDirection, TrendStrength, TrendVote};
