use std::collections::BTreeSet;
use thiserror::Error;

use crate::journal::gate::CheckedMap;
use crate::models::{AssetClass, Checklist, ChecklistItemState, NewTradePayload, Side, TradePlan};

pub const DEFAULT_TIMEFRAME: &str = "1D";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("{field} is required")]
    Missing { field: &'static str },
    #[error("{field} is not a number: {value:?}")]
    NotANumber { field: &'static str, value: String },
}

/// A trade being composed. Price fields hold the text exactly as typed and
/// are only converted when the draft is serialized for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeDraft {
    pub asset_class: AssetClass,
    pub side: Side,
    pub ticker_pair: String,
    pub entry: String,
    pub planned_stop: String,
    pub planned_target: String,
    pub timeframe: String,
    pub strategy_tags: BTreeSet<String>,
    pub thesis: String,
    pub exit_strategy: String,
}

impl Default for TradeDraft {
    fn default() -> Self {
        Self {
            asset_class: AssetClass::Stock,
            side: Side::Long,
            ticker_pair: String::new(),
            entry: String::new(),
            planned_stop: String::new(),
            planned_target: String::new(),
            timeframe: DEFAULT_TIMEFRAME.to_string(),
            strategy_tags: BTreeSet::new(),
            thesis: String::new(),
            exit_strategy: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftEdit {
    AssetClass(AssetClass),
    Side(Side),
    TickerPair(String),
    Entry(String),
    PlannedStop(String),
    PlannedTarget(String),
    Timeframe(String),
    AddTag(String),
    RemoveTag(String),
    Thesis(String),
    ExitStrategy(String),
}

impl TradeDraft {
    /// Returns a new draft with one field replaced.
    pub fn apply(&self, edit: DraftEdit) -> TradeDraft {
        let mut next = self.clone();
        match edit {
            DraftEdit::AssetClass(v) => next.asset_class = v,
            DraftEdit::Side(v) => next.side = v,
            DraftEdit::TickerPair(v) => next.ticker_pair = v,
            DraftEdit::Entry(v) => next.entry = v,
            DraftEdit::PlannedStop(v) => next.planned_stop = v,
            DraftEdit::PlannedTarget(v) => next.planned_target = v,
            DraftEdit::Timeframe(v) => next.timeframe = v,
            DraftEdit::AddTag(tag) => {
                let tag = tag.trim();
                if !tag.is_empty() {
                    next.strategy_tags.insert(tag.to_string());
                }
            }
            DraftEdit::RemoveTag(tag) => {
                next.strategy_tags.remove(tag.trim());
            }
            DraftEdit::Thesis(v) => next.thesis = v,
            DraftEdit::ExitStrategy(v) => next.exit_strategy = v,
        }
        next
    }

    /// Serialize for `POST /api/trades`.
    ///
    /// Every known checklist item is reported, unchecked ones as an explicit
    /// `false`. Ticker and stop/entry consistency are left to the backend.
    pub fn to_payload(
        &self,
        user_id: &str,
        checklist: Option<&Checklist>,
        checked: &CheckedMap,
    ) -> Result<NewTradePayload, DraftError> {
        let entry = parse_price("entry", &self.entry)?;
        let planned_stop = parse_price("planned_stop", &self.planned_stop)?;
        let planned_target = if self.planned_target.trim().is_empty() {
            None
        } else {
            Some(parse_price("planned_target", &self.planned_target)?)
        };

        let checklist_state = checklist
            .map(|cl| {
                cl.items
                    .iter()
                    .map(|item| ChecklistItemState {
                        item_id: item.id.clone(),
                        checked: checked.get(&item.id).copied().unwrap_or(false),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(NewTradePayload {
            user_id: user_id.to_string(),
            asset_class: self.asset_class,
            ticker_pair: self.ticker_pair.clone(),
            side: self.side,
            entry,
            planned_stop,
            planned_target,
            timeframe: self.timeframe.clone(),
            strategy_tags: self.strategy_tags.iter().cloned().collect(),
            plan: TradePlan {
                thesis: self.thesis.clone(),
                exit_strategy: self.exit_strategy.clone(),
            },
            checklist_state,
        })
    }
}

fn parse_price(field: &'static str, raw: &str) -> Result<f64, DraftError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DraftError::Missing { field });
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(DraftError::NotANumber {
            field,
            value: raw.to_string(),
        }),
    }
}

/// Draft fields plus checkbox state for the open trade-entry surface.
#[derive(Debug, Clone, Default)]
pub struct TradeDraftForm {
    draft: TradeDraft,
    checked: CheckedMap,
}

impl TradeDraftForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &TradeDraft {
        &self.draft
    }

    pub fn checked(&self) -> &CheckedMap {
        &self.checked
    }

    pub fn edit(&mut self, edit: DraftEdit) {
        self.draft = self.draft.apply(edit);
    }

    pub fn toggle(&mut self, item_id: &str, checked: bool) {
        self.checked.insert(item_id.to_string(), checked);
    }

    pub fn is_checked(&self, item_id: &str) -> bool {
        self.checked.get(item_id).copied().unwrap_or(false)
    }

    /// Discard the draft and every checkbox.
    pub fn reset(&mut self) {
        self.draft = TradeDraft::default();
        self.checked.clear();
    }
}
