use serde::{Deserialize, Serialize};

/// Backend-computed performance summary. Every field may be missing when the
/// user has no closed trades yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    #[serde(default)]
    pub win_rate: Option<f64>,
    #[serde(default)]
    pub avg_r_win: Option<f64>,
    #[serde(default)]
    pub avg_r_loss: Option<f64>,
    #[serde(default)]
    pub discipline_score: Option<f64>,
    #[serde(default)]
    pub equity_curve: Vec<f64>,
}
