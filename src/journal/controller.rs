use std::sync::Arc;
use tracing::{info, warn};

use crate::api::{ApiError, JournalApi};
use crate::config::Config;
use crate::journal::checklist_store::ChecklistStore;
use crate::journal::dashboard::Dashboard;
use crate::journal::draft::{DraftEdit, TradeDraftForm};
use crate::journal::gate::GateStatus;
use crate::journal::open_trades::{CloseError, CloseOutcome, ExitPrompt, OpenTradesView};
use crate::journal::sentinel::SentinelPanel;
use crate::journal::submitter::{SubmitError, TradeSubmitter};
use crate::models::{SentinelReport, Trade};

/// Composes the journal services for a single user session.
pub struct JournalController {
    user_id: String,
    period_days: u32,
    sentinel_last_n: u32,

    checklist: ChecklistStore,
    form: TradeDraftForm,
    submitter: TradeSubmitter,
    trades: OpenTradesView,
    dashboard: Dashboard,
    sentinel: SentinelPanel,
}

impl JournalController {
    pub fn new(api: Arc<dyn JournalApi>, cfg: &Config) -> Self {
        Self {
            user_id: cfg.user_id.clone(),
            period_days: cfg.analytics_period_days,
            sentinel_last_n: cfg.sentinel_last_n,
            checklist: ChecklistStore::new(api.clone()),
            form: TradeDraftForm::new(),
            submitter: TradeSubmitter::new(api.clone()),
            trades: OpenTradesView::new(api.clone()),
            dashboard: Dashboard::new(api.clone()),
            sentinel: SentinelPanel::new(api),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Initial load of checklist, trades and analytics. Each part fails
    /// independently; the failures are returned for display.
    pub async fn bootstrap(&mut self) -> Vec<(&'static str, ApiError)> {
        let mut failures = Vec::new();

        self.checklist.load(&self.user_id).await;
        if let Err(e) = self.trades.load(&self.user_id).await {
            failures.push(("trades", e));
        }
        if let Err(e) = self.dashboard.load(&self.user_id, self.period_days).await {
            failures.push(("analytics", e));
        }

        info!(
            "Session ready for {} ({} failure(s))",
            self.user_id,
            failures.len()
        );
        failures
    }

    /// Open a fresh trade-entry surface, fetching the checklist if needed.
    pub async fn begin_trade(&mut self) -> GateStatus {
        self.form.reset();
        if !self.checklist.is_loaded() {
            self.checklist.load(&self.user_id).await;
        }
        self.gate()
    }

    pub fn edit(&mut self, edit: DraftEdit) -> GateStatus {
        self.form.edit(edit);
        self.gate()
    }

    pub fn toggle(&mut self, item_id: &str, checked: bool) -> GateStatus {
        self.form.toggle(item_id, checked);
        self.gate()
    }

    pub fn gate(&self) -> GateStatus {
        GateStatus::evaluate(self.checklist.checklist(), self.form.checked())
    }

    /// Submit the draft; on success the open-trades list is refetched.
    pub async fn submit_trade(&mut self) -> Result<Trade, SubmitError> {
        let trade = self
            .submitter
            .submit(&self.user_id, self.checklist.checklist(), &mut self.form)
            .await?;

        if let Err(e) = self.trades.load(&self.user_id).await {
            warn!("Trade {} created but refresh failed: {}", trade.id, e);
        }
        Ok(trade)
    }

    pub async fn close_trade(
        &mut self,
        trade_id: &str,
        prompt: &dyn ExitPrompt,
    ) -> Result<CloseOutcome, CloseError> {
        self.trades.close_trade(&self.user_id, trade_id, prompt).await
    }

    pub async fn refresh_trades(&mut self) -> Result<&[Trade], ApiError> {
        self.trades.load(&self.user_id).await
    }

    pub async fn refresh_dashboard(&mut self) -> Result<(), ApiError> {
        self.dashboard.load(&self.user_id, self.period_days).await
    }

    pub async fn run_sentinel(&mut self) -> Result<&SentinelReport, ApiError> {
        self.sentinel.analyze(&self.user_id, self.sentinel_last_n).await
    }

    pub fn checklist(&self) -> &ChecklistStore {
        &self.checklist
    }

    pub fn form(&self) -> &TradeDraftForm {
        &self.form
    }

    pub fn submitter(&self) -> &TradeSubmitter {
        &self.submitter
    }

    pub fn trades(&self) -> &OpenTradesView {
        &self.trades
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn sentinel(&self) -> &SentinelPanel {
        &self.sentinel
    }
}
