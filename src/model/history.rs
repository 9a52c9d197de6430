use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Action kinds the backend records in a ticket's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    Requested,
    Approved,
    Rejected,
    // The backend spells these without the past-tense suffix.
    #[serde(alias = "Disapprove")]
    Disapproved,
    #[serde(alias = "Cancel")]
    Cancelled,
    Transferred,
    Closed,
}

impl ActionKind {
    /// Refusals render red in the timeline; everything else completed
    /// renders green.
    pub fn is_refusal(&self) -> bool {
        matches!(
            self,
            ActionKind::Rejected | ActionKind::Disapproved | ActionKind::Cancelled
        )
    }
}

/// A completed step in a ticket's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEvent {
    pub transaction_date: DateTime<Utc>,
    pub transacted_by: String,
    pub request: ActionKind,
    pub status: String,
    pub remarks: Option<String>,
}

/// An approver step that has not happened yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingStep {
    pub transaction_date: DateTime<Utc>,
    pub transacted_by: String,
    pub request: String,
    pub status: String,
    pub remarks: Option<String>,
}

/// The two sub-lists the history endpoint returns for one ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketHistory {
    #[serde(default)]
    pub up_coming_approvers: Vec<UpcomingStep>,
    #[serde(default)]
    pub get_ticket_history_concerns: Vec<HistoryEvent>,
}
