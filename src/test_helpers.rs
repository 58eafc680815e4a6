use async_trait::async_trait;
use std::sync::Mutex;

use crate::api::{ApiError, JournalApi};
use crate::journal::draft::{DraftEdit, TradeDraftForm};
use crate::models::{
    AnalyticsSummary, AssetClass, Checklist, ChecklistItem, CloseTradeRequest, NewTradePayload,
    SentinelReport, SentinelRequest, Side, Trade, TradePlan, TradeStatus,
};

/// Two required items and one optional one.
pub fn sample_checklist() -> Checklist {
    Checklist::new(vec![
        ChecklistItem::new("1", "Higher-timeframe trend agrees", true),
        ChecklistItem::new("2", "Stop defined before entry", true),
        ChecklistItem::new("3", "Screenshot saved", false),
    ])
}

/// A draft that converts cleanly: AAPL long, entry 100.5, stop 95, no target.
pub fn filled_form() -> TradeDraftForm {
    let mut form = TradeDraftForm::new();
    form.edit(DraftEdit::TickerPair("AAPL".into()));
    form.edit(DraftEdit::Entry("100.5".into()));
    form.edit(DraftEdit::PlannedStop("95".into()));
    form
}

pub fn make_trade(id: &str, status: TradeStatus) -> Trade {
    Trade {
        id: id.to_string(),
        status,
        user_id: "u".to_string(),
        asset_class: AssetClass::Stock,
        ticker_pair: "AAPL".to_string(),
        side: Side::Long,
        entry: 100.5,
        planned_stop: 95.0,
        planned_target: None,
        timeframe: "1D".to_string(),
        strategy_tags: Vec::new(),
        plan: TradePlan::default(),
        checklist_state: Vec::new(),
        exit_price: None,
        opened_at: None,
        closed_at: None,
    }
}

#[derive(Default)]
struct MockState {
    checklist: Option<Result<Checklist, ApiError>>,
    analytics: Option<Result<AnalyticsSummary, ApiError>>,
    report: SentinelReport,
    trades: Vec<Trade>,
    create_error: Option<ApiError>,
    close_error: Option<ApiError>,
    list_error: Option<ApiError>,

    checklist_requests: Vec<String>,
    analytics_requests: Vec<(String, u32)>,
    created: Vec<NewTradePayload>,
    closes: Vec<(String, CloseTradeRequest)>,
    sentinel_requests: Vec<SentinelRequest>,
}

/// In-memory backend that records every request it receives.
#[derive(Default)]
pub struct MockJournalApi {
    state: Mutex<MockState>,
}

impl MockJournalApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_checklist(self, checklist: Checklist) -> Self {
        self.state.lock().unwrap().checklist = Some(Ok(checklist));
        self
    }

    pub fn with_trades(self, trades: Vec<Trade>) -> Self {
        self.state.lock().unwrap().trades = trades;
        self
    }

    pub fn with_analytics(self, summary: AnalyticsSummary) -> Self {
        self.state.lock().unwrap().analytics = Some(Ok(summary));
        self
    }

    pub fn with_report(self, report: SentinelReport) -> Self {
        self.state.lock().unwrap().report = report;
        self
    }

    pub fn fail_checklist(&self, err: ApiError) {
        self.state.lock().unwrap().checklist = Some(Err(err));
    }

    pub fn fail_analytics(&self, err: ApiError) {
        self.state.lock().unwrap().analytics = Some(Err(err));
    }

    pub fn reject_creates(&self, err: ApiError) {
        self.state.lock().unwrap().create_error = Some(err);
    }

    pub fn reject_closes(&self, err: ApiError) {
        self.state.lock().unwrap().close_error = Some(err);
    }

    pub fn fail_lists(&self, err: ApiError) {
        self.state.lock().unwrap().list_error = Some(err);
    }

    pub fn checklist_requests(&self) -> Vec<String> {
        self.state.lock().unwrap().checklist_requests.clone()
    }

    pub fn analytics_requests(&self) -> Vec<(String, u32)> {
        self.state.lock().unwrap().analytics_requests.clone()
    }

    pub fn created(&self) -> Vec<NewTradePayload> {
        self.state.lock().unwrap().created.clone()
    }

    pub fn closes(&self) -> Vec<(String, CloseTradeRequest)> {
        self.state.lock().unwrap().closes.clone()
    }

    pub fn sentinel_requests(&self) -> Vec<SentinelRequest> {
        self.state.lock().unwrap().sentinel_requests.clone()
    }
}

#[async_trait]
impl JournalApi for MockJournalApi {
    async fn fetch_checklist(&self, user_id: &str) -> Result<Checklist, ApiError> {
        let mut s = self.state.lock().unwrap();
        s.checklist_requests.push(user_id.to_string());
        s.checklist
            .clone()
            .unwrap_or_else(|| Err(ApiError::from_status(404, r#"{"detail":"no checklist"}"#)))
    }

    async fn fetch_analytics(
        &self,
        user_id: &str,
        period_days: u32,
    ) -> Result<AnalyticsSummary, ApiError> {
        let mut s = self.state.lock().unwrap();
        s.analytics_requests.push((user_id.to_string(), period_days));
        s.analytics.clone().unwrap_or_else(|| Ok(AnalyticsSummary::default()))
    }

    async fn create_trade(&self, payload: &NewTradePayload) -> Result<Trade, ApiError> {
        let mut s = self.state.lock().unwrap();
        s.created.push(payload.clone());
        if let Some(err) = &s.create_error {
            return Err(err.clone());
        }
        let trade = Trade {
            id: format!("t{}", s.created.len()),
            status: TradeStatus::Open,
            user_id: payload.user_id.clone(),
            asset_class: payload.asset_class,
            ticker_pair: payload.ticker_pair.clone(),
            side: payload.side,
            entry: payload.entry,
            planned_stop: payload.planned_stop,
            planned_target: payload.planned_target,
            timeframe: payload.timeframe.clone(),
            strategy_tags: payload.strategy_tags.clone(),
            plan: payload.plan.clone(),
            checklist_state: payload.checklist_state.clone(),
            exit_price: None,
            opened_at: None,
            closed_at: None,
        };
        s.trades.push(trade.clone());
        Ok(trade)
    }

    async fn list_trades(&self, _user_id: &str) -> Result<Vec<Trade>, ApiError> {
        let s = self.state.lock().unwrap();
        match &s.list_error {
            Some(err) => Err(err.clone()),
            None => Ok(s.trades.clone()),
        }
    }

    async fn close_trade(
        &self,
        trade_id: &str,
        req: &CloseTradeRequest,
    ) -> Result<Trade, ApiError> {
        let mut s = self.state.lock().unwrap();
        s.closes.push((trade_id.to_string(), req.clone()));
        if let Some(err) = &s.close_error {
            return Err(err.clone());
        }
        let trade = s
            .trades
            .iter_mut()
            .find(|t| t.id == trade_id)
            .ok_or_else(|| ApiError::from_status(404, r#"{"detail":"trade not found"}"#))?;
        trade.status = TradeStatus::Closed;
        trade.exit_price = Some(req.exit_price);
        Ok(trade.clone())
    }

    async fn analyze(&self, req: &SentinelRequest) -> Result<SentinelReport, ApiError> {
        let mut s = self.state.lock().unwrap();
        s.sentinel_requests.push(req.clone());
        Ok(s.report.clone())
    }
}
