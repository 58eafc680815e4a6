use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::api::{ApiError, JournalApi};
use crate::journal::draft::{DraftError, TradeDraftForm};
use crate::journal::gate::GateStatus;
use crate::models::{Checklist, Trade};

#[derive(Debug, Clone, Error)]
pub enum SubmitError {
    #[error("checklist not loaded")]
    ChecklistNotLoaded,
    #[error("required checklist items unchecked: {}", .missing.join(", "))]
    GateClosed { missing: Vec<String> },
    #[error("a submission is already in flight")]
    InFlight,
    #[error(transparent)]
    Draft(#[from] DraftError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Sends drafts to the backend once the checklist gate is open.
pub struct TradeSubmitter {
    api: Arc<dyn JournalApi>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag however the submission ends.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl TradeSubmitter {
    pub fn new(api: Arc<dyn JournalApi>) -> Self {
        Self {
            api,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Validate and create the trade.
    ///
    /// The gate is re-checked here so a caller that skips the disabled
    /// control still cannot open a trade. On success the form is reset; on
    /// any failure it is left exactly as it was.
    pub async fn submit(
        &self,
        user_id: &str,
        checklist: Option<&Checklist>,
        form: &mut TradeDraftForm,
    ) -> Result<Trade, SubmitError> {
        match GateStatus::evaluate(checklist, form.checked()) {
            GateStatus::Open => {}
            GateStatus::AwaitingChecklist => return Err(SubmitError::ChecklistNotLoaded),
            GateStatus::Blocked { missing } => return Err(SubmitError::GateClosed { missing }),
        }

        let payload = form.draft().to_payload(user_id, checklist, form.checked())?;

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(SubmitError::InFlight);
        }
        let _guard = InFlightGuard(&self.in_flight);

        match self.api.create_trade(&payload).await {
            Ok(trade) => {
                info!(
                    "Trade opened: {} {} {} @ {} (stop {})",
                    trade.id, payload.side, payload.ticker_pair, payload.entry, payload.planned_stop
                );
                form.reset();
                Ok(trade)
            }
            Err(e) => {
                warn!("Trade rejected for {}: {}", payload.ticker_pair, e);
                Err(SubmitError::Api(e))
            }
        }
    }
}
