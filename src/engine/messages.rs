use std::sync::Arc;

use crate::domain::{Bar, MacroSnapshot};
use crate::models::AssetEvaluation;

/// A request to evaluate one asset
#[derive(Debug, Clone)]
pub struct JobRequest {
    pub symbol: String,
    /// Raw bars, validated by the worker
    pub bars: Vec<Bar>,
    pub macro_data: Arc<MacroSnapshot>,
}

/// The result returned by the worker
#[derive(Debug, Clone)]
pub struct JobResult {
    pub symbol: String,
    pub duration_ms: u128,
    pub result: Result<Arc<AssetEvaluation>, String>,
    pub bar_count: usize,
}
