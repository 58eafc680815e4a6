use async_trait::async_trait;
use std::sync::Mutex;

use inferno_journal::api::{ApiError, JournalApi};
use inferno_journal::models::{
    AnalyticsSummary, Checklist, ChecklistItem, CloseTradeRequest, NewTradePayload,
    SentinelReport, SentinelRequest, Trade, TradeStatus,
};

/// Build a checklist from `(id, required)` pairs.
pub fn checklist(items: &[(&str, bool)]) -> Checklist {
    Checklist::new(
        items
            .iter()
            .map(|&(id, required)| ChecklistItem::new(id, &format!("rule {id}"), required))
            .collect(),
    )
}

/// A backend double that keeps trades in memory and counts every request.
pub struct InMemoryBackend {
    pub checklist: Mutex<Result<Checklist, ApiError>>,
    pub trades: Mutex<Vec<Trade>>,
    pub reject_create: Mutex<Option<ApiError>>,
    pub create_calls: Mutex<Vec<NewTradePayload>>,
    pub close_calls: Mutex<Vec<(String, CloseTradeRequest)>>,
}

impl InMemoryBackend {
    pub fn new(checklist: Checklist) -> Self {
        Self {
            checklist: Mutex::new(Ok(checklist)),
            trades: Mutex::new(Vec::new()),
            reject_create: Mutex::new(None),
            create_calls: Mutex::new(Vec::new()),
            close_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn create_count(&self) -> usize {
        self.create_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl JournalApi for InMemoryBackend {
    async fn fetch_checklist(&self, _user_id: &str) -> Result<Checklist, ApiError> {
        self.checklist.lock().unwrap().clone()
    }

    async fn fetch_analytics(
        &self,
        _user_id: &str,
        _period_days: u32,
    ) -> Result<AnalyticsSummary, ApiError> {
        Ok(AnalyticsSummary {
            win_rate: Some(50.0),
            avg_r_win: Some(2.0),
            avg_r_loss: Some(-1.0),
            discipline_score: Some(72.0),
            equity_curve: vec![0.0, 2.0, 1.0],
        })
    }

    async fn create_trade(&self, payload: &NewTradePayload) -> Result<Trade, ApiError> {
        self.create_calls.lock().unwrap().push(payload.clone());
        if let Some(err) = self.reject_create.lock().unwrap().clone() {
            return Err(err);
        }
        let mut trades = self.trades.lock().unwrap();
        let raw = serde_json::json!({
            "_id": format!("trade-{}", trades.len() + 1),
            "status": "open",
            "user_id": payload.user_id,
            "asset_class": payload.asset_class,
            "ticker_pair": payload.ticker_pair,
            "side": payload.side,
            "entry": payload.entry,
            "planned_stop": payload.planned_stop,
            "planned_target": payload.planned_target,
            "timeframe": payload.timeframe,
            "strategy_tags": payload.strategy_tags,
            "plan": payload.plan,
            "checklist_state": payload.checklist_state,
        });
        let trade: Trade =
            serde_json::from_value(raw).map_err(|e| ApiError::Decode(e.to_string()))?;
        trades.push(trade.clone());
        Ok(trade)
    }

    async fn list_trades(&self, _user_id: &str) -> Result<Vec<Trade>, ApiError> {
        Ok(self.trades.lock().unwrap().clone())
    }

    async fn close_trade(
        &self,
        trade_id: &str,
        req: &CloseTradeRequest,
    ) -> Result<Trade, ApiError> {
        self.close_calls
            .lock()
            .unwrap()
            .push((trade_id.to_string(), req.clone()));
        let mut trades = self.trades.lock().unwrap();
        let trade = trades
            .iter_mut()
            .find(|t| t.id == trade_id)
            .ok_or_else(|| ApiError::from_status(404, r#"{"detail":"not found"}"#))?;
        trade.status = TradeStatus::Closed;
        trade.exit_price = Some(req.exit_price);
        Ok(trade.clone())
    }

    async fn analyze(&self, req: &SentinelRequest) -> Result<SentinelReport, ApiError> {
        Ok(SentinelReport {
            summary: format!("Reviewed {} trade(s)", req.last_n),
            findings: vec!["Stops respected".into()],
            recommendations: vec!["Size down after two losses".into()],
        })
    }
}
