use std::collections::HashMap;

use crate::models::Checklist;

/// Check-state keyed by checklist item id. Absent keys count as unchecked.
pub type CheckedMap = HashMap<String, bool>;

/// Whether every required checklist item is checked.
///
/// Fails closed: with no checklist loaded the gate never opens.
pub fn all_required_checked(checklist: Option<&Checklist>, checked: &CheckedMap) -> bool {
    let Some(checklist) = checklist else {
        return false;
    };
    checklist
        .required_ids()
        .all(|id| checked.get(id).copied().unwrap_or(false))
}

/// Required items still unchecked, in checklist order. Empty when no
/// checklist is loaded; pair with `all_required_checked` for the gate itself.
pub fn missing_required(checklist: Option<&Checklist>, checked: &CheckedMap) -> Vec<String> {
    let Some(checklist) = checklist else {
        return Vec::new();
    };
    checklist
        .required_ids()
        .filter(|id| !checked.get(*id).copied().unwrap_or(false))
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateStatus {
    Open,
    /// No checklist to evaluate against yet.
    AwaitingChecklist,
    Blocked { missing: Vec<String> },
}

impl GateStatus {
    pub fn evaluate(checklist: Option<&Checklist>, checked: &CheckedMap) -> Self {
        if checklist.is_none() {
            return GateStatus::AwaitingChecklist;
        }
        if all_required_checked(checklist, checked) {
            GateStatus::Open
        } else {
            GateStatus::Blocked {
                missing: missing_required(checklist, checked),
            }
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, GateStatus::Open)
    }

    pub fn hint(&self) -> Option<&'static str> {
        match self {
            GateStatus::Open => None,
            GateStatus::AwaitingChecklist => Some("Checklist not loaded yet."),
            GateStatus::Blocked { .. } => {
                Some("Complete all required checklist items to submit.")
            }
        }
    }
}
