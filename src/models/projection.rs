use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub day_offset: u32,
    pub projected_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub near_term_target: f64,
    pub mid_term_target: f64,
    pub stop_level: f64,
    /// 0-100
    pub confidence: f64,
    pub near_term_days: u32,
    pub mid_term_days: u32,
    /// Day 0 is the current price
    pub path: Vec<ProjectionPoint>,
}

impl Projection {
    pub fn near_term_change_pct(&self, current_price: f64) -> f64 {
        crate::utils::pct_diff(self.near_term_target, current_price)
    }

    pub fn mid_term_change_pct(&self, current_price: f64) -> f64 {
        crate::utils::pct_diff(self.mid_term_target, current_price)
    }
}
