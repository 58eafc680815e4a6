use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::api::{ApiError, JournalApi};
use crate::models::{CloseTradeRequest, Trade, TradeRatings};

/// What the user entered when asked to close a trade.
#[derive(Debug, Clone, PartialEq)]
pub struct ExitDetails {
    pub exit_price: f64,
    pub ratings: Option<TradeRatings>,
}

impl ExitDetails {
    pub fn price(exit_price: f64) -> Self {
        Self {
            exit_price,
            ratings: None,
        }
    }
}

/// Asks the user for exit details without blocking the caller's executor.
/// `None` means the user dismissed the prompt.
#[async_trait]
pub trait ExitPrompt: Send + Sync {
    async fn exit_details(&self, trade: &Trade) -> Option<ExitDetails>;
}

/// A prompt that always answers with the same details.
pub struct FixedExit(pub ExitDetails);

#[async_trait]
impl ExitPrompt for FixedExit {
    async fn exit_details(&self, _trade: &Trade) -> Option<ExitDetails> {
        Some(self.0.clone())
    }
}

#[derive(Debug, Clone, Error)]
pub enum CloseError {
    #[error("trade {0} is not an open trade in this view")]
    NotOpen(String),
    #[error("exit price must be a positive number, got {0}")]
    InvalidExitPrice(f64),
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CloseOutcome {
    Closed(Trade),
    Cancelled,
}

/// The user's trades as last fetched, with open ones exposed for display.
pub struct OpenTradesView {
    api: Arc<dyn JournalApi>,
    trades: Vec<Trade>,
}

impl OpenTradesView {
    pub fn new(api: Arc<dyn JournalApi>) -> Self {
        Self {
            api,
            trades: Vec::new(),
        }
    }

    /// Refetch and replace the whole list.
    pub async fn load(&mut self, user_id: &str) -> Result<&[Trade], ApiError> {
        let trades = self.api.list_trades(user_id).await?;
        info!(
            "Loaded {} trade(s) for {}, {} open",
            trades.len(),
            user_id,
            trades.iter().filter(|t| t.is_open()).count()
        );
        self.trades = trades;
        Ok(&self.trades)
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn open_trades(&self) -> impl Iterator<Item = &Trade> {
        self.trades.iter().filter(|t| t.is_open())
    }

    pub fn find_open(&self, trade_id: &str) -> Option<&Trade> {
        self.open_trades().find(|t| t.id == trade_id)
    }

    /// Prompt for exit details, post the close, then reload the list.
    ///
    /// Once the backend accepts the close the outcome is `Closed`, even if
    /// the reload fails; the local copy of the trade is replaced instead.
    pub async fn close_trade(
        &mut self,
        user_id: &str,
        trade_id: &str,
        prompt: &dyn ExitPrompt,
    ) -> Result<CloseOutcome, CloseError> {
        let trade = self
            .find_open(trade_id)
            .cloned()
            .ok_or_else(|| CloseError::NotOpen(trade_id.to_string()))?;

        let Some(details) = prompt.exit_details(&trade).await else {
            info!("Close of {} cancelled", trade_id);
            return Ok(CloseOutcome::Cancelled);
        };
        if !details.exit_price.is_finite() || details.exit_price <= 0.0 {
            return Err(CloseError::InvalidExitPrice(details.exit_price));
        }

        let req = CloseTradeRequest {
            exit_price: details.exit_price,
            ratings: details.ratings.unwrap_or_default(),
        };

        let closed = match self.api.close_trade(&trade.id, &req).await {
            Ok(closed) => closed,
            Err(e) => {
                warn!("Close of {} failed: {}", trade.id, e);
                return Err(CloseError::Api(e));
            }
        };
        info!("Closed {} {} at {}", trade.id, trade.ticker_pair, req.exit_price);

        let reload = self.load(user_id).await.map(|_| ());
        if let Err(e) = reload {
            warn!("Trade list refresh after closing {} failed: {}", trade.id, e);
            if let Some(slot) = self.trades.iter_mut().find(|t| t.id == trade.id) {
                *slot = closed.clone();
            }
        }
        Ok(CloseOutcome::Closed(closed))
    }

    pub fn render(&self) -> Vec<String> {
        let lines: Vec<String> = self.open_trades().map(render_row).collect();
        if lines.is_empty() {
            vec!["No open trades.".to_string()]
        } else {
            lines
        }
    }
}

fn render_row(t: &Trade) -> String {
    format!(
        "{:<6} {:<10} {:<5} Entry {} Stop {}  [{}]",
        t.asset_class.as_str().to_uppercase(),
        t.ticker_pair,
        t.side.as_str().to_uppercase(),
        t.entry,
        t.planned_stop,
        t.id
    )
}
