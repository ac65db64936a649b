use chrono::Local;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::AssetEvaluation;

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Close")]
    close: String,
    #[tabled(rename = "Trend")]
    trend: String,
    #[tabled(rename = "Conf")]
    confidence: String,
    #[tabled(rename = "Mom")]
    strength: String,
    #[tabled(rename = "Risk")]
    risk: String,
    #[tabled(rename = "Sentiment")]
    sentiment: String,
    #[tabled(rename = "Top Canary")]
    top_canary: String,
    #[tabled(rename = "Near")]
    near: String,
    #[tabled(rename = "Mid")]
    mid: String,
    #[tabled(rename = "Stop")]
    stop: String,
    #[tabled(rename = "Data")]
    completeness: String,
}

impl From<&AssetEvaluation> for SummaryRow {
    fn from(e: &AssetEvaluation) -> Self {
        let close = e.indicators.close;
        let dc = &e.data_completeness;
        let completeness = if dc.complete && dc.levels_estimated {
            "complete (levels estimated)".to_string()
        } else if dc.complete {
            "complete".to_string()
        } else {
            format!(
                "partial ({}/{} bars, {} fallbacks, {} macro missing)",
                dc.bars_available,
                dc.bars_required,
                dc.fallbacks.len(),
                dc.missing_macro.len()
            )
        };
        Self {
            symbol: e.symbol.clone(),
            close: format!("{:.2}", close),
            trend: format!("{} {}", e.trend.direction, e.trend.strength),
            confidence: format!("{:.1}%", e.trend.confidence),
            strength: format!("{:.0}", e.momentum_strength),
            risk: format!("{:.1} {}", e.composite_risk.score(), e.composite_risk.regime),
            sentiment: format!("{:.1} {}", e.sentiment.score(), e.sentiment.regime),
            top_canary: e
                .top_canary()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string()),
            near: format!(
                "{:.2} ({:+.1}%)",
                e.projection.near_term_target,
                e.projection.near_term_change_pct(close)
            ),
            mid: format!(
                "{:.2} ({:+.1}%)",
                e.projection.mid_term_target,
                e.projection.mid_term_change_pct(close)
            ),
            stop: format!("{:.2}", e.projection.stop_level),
            completeness,
        }
    }
}

/// Collects evaluation rows and renders them as one summary table.
pub struct SummaryReporter {
    rows: Vec<SummaryRow>,
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl SummaryReporter {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add_row(&mut self, evaluation: &AssetEvaluation) {
        self.rows.push(SummaryRow::from(evaluation));
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let mut table = Table::new(&self.rows);
        table.with(Style::rounded());
        let ts = Local::now().format("%Y-%m-%d %H:%M:%S");
        format!("{}\nEvaluated {} asset(s) at {}", table, self.rows.len(), ts)
    }

    pub fn print_all(&self) {
        println!("{}", self.render());
    }
}

/// Full result records as pretty JSON.
pub fn render_json(evaluations: &[AssetEvaluation]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(evaluations)?)
}
