use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::attachment::TicketAttachment;

/// Lifecycle of a concern from intake to archival. The server owns the
/// transitions; the client only ever reads these back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConcernStatus {
    Pending,
    ForApproval,
    Transferred,
    OnHold,
    Closed,
    Rejected,
    Cancelled,
}

impl ConcernStatus {
    /// Terminal states: nothing in the approver or handler queues acts
    /// on these.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ConcernStatus::Closed | ConcernStatus::Rejected | ConcernStatus::Cancelled
        )
    }
}

/// A requester-submitted issue record, pre-assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Concern {
    pub request_concern_id: u64,
    pub concern: String,
    #[serde(default)]
    pub attachments: Vec<TicketAttachment>,
    pub concern_status: ConcernStatus,
    pub requestor_name: String,
    pub created_at: DateTime<Utc>,
}
