pub mod error;
pub mod http;

pub use error::ApiError;
pub use http::HttpJournalApi;

use async_trait::async_trait;

use crate::models::{
    AnalyticsSummary, Checklist, CloseTradeRequest, NewTradePayload, SentinelReport,
    SentinelRequest, Trade,
};

/// The journal backend. It owns storage, analytics and validation; clients
/// only read state and request transitions through it.
#[async_trait]
pub trait JournalApi: Send + Sync {
    async fn fetch_checklist(&self, user_id: &str) -> Result<Checklist, ApiError>;
    async fn fetch_analytics(
        &self,
        user_id: &str,
        period_days: u32,
    ) -> Result<AnalyticsSummary, ApiError>;
    async fn create_trade(&self, payload: &NewTradePayload) -> Result<Trade, ApiError>;
    async fn list_trades(&self, user_id: &str) -> Result<Vec<Trade>, ApiError>;
    async fn close_trade(&self, trade_id: &str, req: &CloseTradeRequest)
        -> Result<Trade, ApiError>;
    async fn analyze(&self, req: &SentinelRequest) -> Result<SentinelReport, ApiError>;
}
