pub mod checklist_store;
pub mod controller;
pub mod dashboard;
pub mod draft;
pub mod gate;
pub mod open_trades;
pub mod sentinel;
pub mod submitter;

pub use checklist_store::{ChecklistState, ChecklistStore};
pub use controller::JournalController;
pub use dashboard::{Dashboard, DisciplineBand, KpiTile};
pub use draft::{DraftEdit, DraftError, TradeDraft, TradeDraftForm};
pub use gate::{all_required_checked, missing_required, CheckedMap, GateStatus};
pub use open_trades::{CloseError, CloseOutcome, ExitDetails, ExitPrompt, FixedExit, OpenTradesView};
pub use sentinel::SentinelPanel;
pub use submitter::{SubmitError, TradeSubmitter};
