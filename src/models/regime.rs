use serde::{Deserialize, Serialize};

/// A named band of a composite score: `lower_bound <= score < upper_bound`
/// (the top band includes the domain maximum).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Regime {
    pub level: u8,
    pub name: String,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub tag: String,
}

impl std::fmt::Display for Regime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
