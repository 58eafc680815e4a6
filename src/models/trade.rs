use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::ChecklistItemState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    #[default]
    Stock,
    Crypto,
    Forex,
}

impl AssetClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetClass::Stock => "stock",
            AssetClass::Crypto => "crypto",
            AssetClass::Forex => "forex",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<AssetClass> {
        match s.trim().to_lowercase().as_str() {
            "stock" | "stocks" | "equity" => Some(AssetClass::Stock),
            "crypto" => Some(AssetClass::Crypto),
            "forex" | "fx" => Some(AssetClass::Forex),
            _ => None,
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Long,
    Short,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Long => "long",
            Side::Short => "short",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<Side> {
        match s.trim().to_lowercase().as_str() {
            "long" | "buy" => Some(Side::Long),
            "short" | "sell" => Some(Side::Short),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle is owned by the backend; the client only reads it.
/// Statuses this client does not know decode as `Other` and are never open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeStatus {
    Open,
    Closed,
    #[serde(other)]
    Other,
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeStatus::Open => write!(f, "open"),
            TradeStatus::Closed => write!(f, "closed"),
            TradeStatus::Other => write!(f, "other"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradePlan {
    #[serde(default)]
    pub thesis: String,
    #[serde(default)]
    pub exit_strategy: String,
}

/// A trade as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    #[serde(rename = "_id")]
    pub id: String,
    pub status: TradeStatus,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub asset_class: AssetClass,
    #[serde(default)]
    pub ticker_pair: String,
    #[serde(default)]
    pub side: Side,
    #[serde(default)]
    pub entry: f64,
    #[serde(default)]
    pub planned_stop: f64,
    #[serde(default)]
    pub planned_target: Option<f64>,
    #[serde(default)]
    pub timeframe: String,
    #[serde(default)]
    pub strategy_tags: Vec<String>,
    #[serde(default)]
    pub plan: TradePlan,
    #[serde(default)]
    pub checklist_state: Vec<ChecklistItemState>,
    #[serde(default)]
    pub exit_price: Option<f64>,
    #[serde(default)]
    pub opened_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
}

impl Trade {
    pub fn is_open(&self) -> bool {
        self.status == TradeStatus::Open
    }
}

/// Body of `POST /api/trades`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTradePayload {
    pub user_id: String,
    pub asset_class: AssetClass,
    pub ticker_pair: String,
    pub side: Side,
    pub entry: f64,
    pub planned_stop: f64,
    /// `null` on the wire means no explicit target was set.
    pub planned_target: Option<f64>,
    pub timeframe: String,
    pub strategy_tags: Vec<String>,
    pub plan: TradePlan,
    pub checklist_state: Vec<ChecklistItemState>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRatings {
    pub execution_rating: u8,
    pub discipline_rating: u8,
    pub learnings: String,
}

impl Default for TradeRatings {
    fn default() -> Self {
        Self {
            execution_rating: 4,
            discipline_rating: 4,
            learnings: "Auto note".to_string(),
        }
    }
}

/// Body of `POST /api/trades/{id}/close`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloseTradeRequest {
    pub exit_price: f64,
    #[serde(flatten)]
    pub ratings: TradeRatings,
}
