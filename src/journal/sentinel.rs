use std::sync::Arc;
use tracing::{info, warn};

use crate::api::{ApiError, JournalApi};
use crate::models::{SentinelReport, SentinelRequest};

pub const DEFAULT_LAST_N: u32 = 10;

/// Requests coaching feedback over the most recent trades.
pub struct SentinelPanel {
    api: Arc<dyn JournalApi>,
    report: Option<SentinelReport>,
}

impl SentinelPanel {
    pub fn new(api: Arc<dyn JournalApi>) -> Self {
        Self {
            api,
            report: None,
        }
    }

    pub async fn analyze(
        &mut self,
        user_id: &str,
        last_n: u32,
    ) -> Result<&SentinelReport, ApiError> {
        let req = SentinelRequest {
            user_id: user_id.to_string(),
            last_n: last_n.max(1),
        };
        match self.api.analyze(&req).await {
            Ok(report) => {
                info!(
                    "Sentinel analysed last {} trade(s): {} finding(s), {} recommendation(s)",
                    req.last_n,
                    report.findings.len(),
                    report.recommendations.len()
                );
                Ok(&*self.report.insert(report))
            }
            Err(e) => {
                warn!("Sentinel analysis failed: {}", e);
                Err(e)
            }
        }
    }

    pub fn report(&self) -> Option<&SentinelReport> {
        self.report.as_ref()
    }

    pub fn render(&self) -> Vec<String> {
        let Some(report) = &self.report else {
            return Vec::new();
        };
        let mut lines = vec![report.summary.clone()];
        lines.extend(report.findings.iter().map(|f| format!("  • {f}")));
        lines.push("Recommendations".to_string());
        lines.extend(report.recommendations.iter().map(|r| format!("  • {r}")));
        lines
    }
}
