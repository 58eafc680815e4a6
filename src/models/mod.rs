pub mod analytics;
pub mod checklist;
pub mod sentinel;
pub mod trade;

pub use analytics::AnalyticsSummary;
pub use checklist::{Checklist, ChecklistItem, ChecklistItemState};
pub use sentinel::{SentinelReport, SentinelRequest};
pub use trade::*;
