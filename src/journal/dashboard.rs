use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::{ApiError, JournalApi};
use crate::models::AnalyticsSummary;

const EQUITY_TAIL: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisciplineBand {
    Strong,
    Caution,
    Weak,
}

impl DisciplineBand {
    pub fn for_score(score: f64) -> Self {
        if score >= 80.0 {
            DisciplineBand::Strong
        } else if score >= 60.0 {
            DisciplineBand::Caution
        } else {
            DisciplineBand::Weak
        }
    }
}

impl fmt::Display for DisciplineBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisciplineBand::Strong => write!(f, "strong"),
            DisciplineBand::Caution => write!(f, "caution"),
            DisciplineBand::Weak => write!(f, "weak"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KpiTile {
    pub label: &'static str,
    pub value: String,
}

/// KPI row plus equity summary derived from the analytics endpoint.
pub struct Dashboard {
    api: Arc<dyn JournalApi>,
    summary: Option<AnalyticsSummary>,
}

impl Dashboard {
    pub fn new(api: Arc<dyn JournalApi>) -> Self {
        Self {
            api,
            summary: None,
        }
    }

    pub async fn load(&mut self, user_id: &str, period_days: u32) -> Result<(), ApiError> {
        match self.api.fetch_analytics(user_id, period_days).await {
            Ok(summary) => {
                info!(
                    "Analytics for {} over {}d: win_rate={:?} discipline={:?}",
                    user_id, period_days, summary.win_rate, summary.discipline_score
                );
                self.summary = Some(summary);
                Ok(())
            }
            Err(e) => {
                warn!("Analytics fetch failed for {}: {}", user_id, e);
                Err(e)
            }
        }
    }

    pub fn summary(&self) -> Option<&AnalyticsSummary> {
        self.summary.as_ref()
    }

    pub fn tiles(&self) -> Vec<KpiTile> {
        let s = self.summary.as_ref();
        vec![
            KpiTile {
                label: "Win Rate",
                value: format!("{}%", or_dash(s.and_then(|s| s.win_rate))),
            },
            KpiTile {
                label: "Avg R (Win)",
                value: or_dash(s.and_then(|s| s.avg_r_win)),
            },
            KpiTile {
                label: "Avg R (Loss)",
                value: or_dash(s.and_then(|s| s.avg_r_loss)),
            },
            KpiTile {
                label: "Discipline Score",
                value: format!("{}", self.discipline_score()),
            },
        ]
    }

    /// Missing scores display as 0.
    pub fn discipline_score(&self) -> f64 {
        self.summary
            .as_ref()
            .and_then(|s| s.discipline_score)
            .unwrap_or(0.0)
    }

    pub fn discipline_band(&self) -> DisciplineBand {
        DisciplineBand::for_score(self.discipline_score())
    }

    /// Last few equity points, comma separated.
    pub fn equity_summary(&self) -> String {
        let curve = self
            .summary
            .as_ref()
            .map(|s| s.equity_curve.as_slice())
            .unwrap_or_default();
        if curve.is_empty() {
            return "—".to_string();
        }
        let start = curve.len().saturating_sub(EQUITY_TAIL);
        curve[start..]
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn or_dash(v: Option<f64>) -> String {
    v.map(|v| v.to_string()).unwrap_or_else(|| "--".to_string())
}
