use std::sync::Arc;
use tracing::{info, warn};

use crate::api::JournalApi;
use crate::models::Checklist;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChecklistState {
    NotLoaded,
    Loaded(Checklist),
    /// The last fetch failed; the reason is kept for display.
    Failed(String),
}

/// Holds the pre-trade checklist definition for one user.
pub struct ChecklistStore {
    api: Arc<dyn JournalApi>,
    state: ChecklistState,
    user_id: Option<String>,
}

impl ChecklistStore {
    pub fn new(api: Arc<dyn JournalApi>) -> Self {
        Self {
            api,
            state: ChecklistState::NotLoaded,
            user_id: None,
        }
    }

    /// Fetch (or refetch) the checklist. A failed fetch drops any previously
    /// loaded definition so the gate falls back to closed.
    pub async fn load(&mut self, user_id: &str) -> &ChecklistState {
        self.user_id = Some(user_id.to_string());
        self.state = match self.api.fetch_checklist(user_id).await {
            Ok(checklist) => {
                info!(
                    "Checklist loaded for {}: {} item(s), {} required",
                    user_id,
                    checklist.items.len(),
                    checklist.required_ids().count()
                );
                ChecklistState::Loaded(checklist)
            }
            Err(e) => {
                warn!("Checklist fetch failed for {}: {}", user_id, e);
                ChecklistState::Failed(e.to_string())
            }
        };
        &self.state
    }

    /// Refetch for the last user, if any.
    pub async fn reload(&mut self) -> Option<&ChecklistState> {
        let user_id = self.user_id.clone()?;
        Some(self.load(&user_id).await)
    }

    pub fn state(&self) -> &ChecklistState {
        &self.state
    }

    /// `None` while not loaded or after a failure.
    pub fn checklist(&self) -> Option<&Checklist> {
        match &self.state {
            ChecklistState::Loaded(cl) => Some(cl),
            _ => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, ChecklistState::Loaded(_))
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ChecklistState::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}
