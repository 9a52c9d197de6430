//! History timeline assembly.
//!
//! The history endpoint returns two ordered sub-lists: approver steps
//! that have not happened yet, and completed history. Display shows the
//! upcoming steps first with a neutral marker, then the completed steps
//! colored by outcome. The two lists are concatenated, not merged by
//! timestamp. That is the observed contract and is preserved as such.

use chrono::{DateTime, Utc};

use crate::model::history::{ActionKind, TicketHistory};

/// Marker rendered next to a timeline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// Upcoming step, grey.
    Pending,
    /// Completed step, green.
    Done,
    /// Rejected / Disapproved / Cancelled, red.
    Refused,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEntry {
    pub at: DateTime<Utc>,
    pub actor: String,
    pub action: String,
    pub status: String,
    pub remark: Option<String>,
    pub marker: Marker,
}

/// Flatten one ticket's history into display order: upcoming first,
/// completed after.
pub fn assemble(history: &TicketHistory) -> Vec<TimelineEntry> {
    let mut entries = Vec::with_capacity(
        history.up_coming_approvers.len() + history.get_ticket_history_concerns.len(),
    );

    for step in &history.up_coming_approvers {
        entries.push(TimelineEntry {
            at: step.transaction_date,
            actor: step.transacted_by.clone(),
            action: step.request.clone(),
            status: step.status.clone(),
            remark: step.remarks.clone(),
            marker: Marker::Pending,
        });
    }

    for event in &history.get_ticket_history_concerns {
        entries.push(TimelineEntry {
            at: event.transaction_date,
            actor: event.transacted_by.clone(),
            action: action_label(event.request).to_string(),
            status: event.status.clone(),
            remark: event.remarks.clone(),
            marker: if event.request.is_refusal() {
                Marker::Refused
            } else {
                Marker::Done
            },
        });
    }

    entries
}

fn action_label(kind: ActionKind) -> &'static str {
    match kind {
        ActionKind::Requested => "Requested",
        ActionKind::Approved => "Approved",
        ActionKind::Rejected => "Rejected",
        ActionKind::Disapproved => "Disapproved",
        ActionKind::Cancelled => "Cancelled",
        ActionKind::Transferred => "Transferred",
        ActionKind::Closed => "Closed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::history::{HistoryEvent, UpcomingStep};
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 7, 1, hour, 0, 0).unwrap()
    }

    fn upcoming(hour: u32, actor: &str) -> UpcomingStep {
        UpcomingStep {
            transaction_date: at(hour),
            transacted_by: actor.to_string(),
            request: "For Approval".to_string(),
            status: "2nd Approver".to_string(),
            remarks: None,
        }
    }

    fn completed(hour: u32, actor: &str, request: ActionKind) -> HistoryEvent {
        HistoryEvent {
            transaction_date: at(hour),
            transacted_by: actor.to_string(),
            request,
            status: "Done".to_string(),
            remarks: None,
        }
    }

    #[test]
    fn upcoming_steps_render_before_completed_ones() {
        // The upcoming step is newer than the completed ones; it still
        // renders first. Concatenation, not a chronological merge.
        let history = TicketHistory {
            up_coming_approvers: vec![upcoming(15, "J. Reyes")],
            get_ticket_history_concerns: vec![
                completed(9, "R. Cruz", ActionKind::Requested),
                completed(11, "M. Tan", ActionKind::Approved),
            ],
        };

        let entries = assemble(&history);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].marker, Marker::Pending);
        assert_eq!(entries[0].actor, "J. Reyes");
        assert_eq!(entries[1].action, "Requested");
        assert_eq!(entries[2].action, "Approved");
        assert!(entries[0].at > entries[1].at, "deliberately not merged");
    }

    #[test]
    fn refusals_are_marked_red() {
        let history = TicketHistory {
            up_coming_approvers: vec![],
            get_ticket_history_concerns: vec![
                completed(9, "R. Cruz", ActionKind::Approved),
                completed(10, "M. Tan", ActionKind::Rejected),
                completed(11, "A. Lim", ActionKind::Cancelled),
                completed(12, "B. Uy", ActionKind::Disapproved),
                completed(13, "C. Go", ActionKind::Closed),
            ],
        };

        let markers: Vec<Marker> = assemble(&history).iter().map(|e| e.marker).collect();
        assert_eq!(
            markers,
            vec![
                Marker::Done,
                Marker::Refused,
                Marker::Refused,
                Marker::Refused,
                Marker::Done,
            ]
        );
    }

    #[test]
    fn remarks_carry_through() {
        let mut event = completed(9, "M. Tan", ActionKind::Rejected);
        event.remarks = Some("Wrong channel".to_string());
        let history = TicketHistory {
            up_coming_approvers: vec![],
            get_ticket_history_concerns: vec![event],
        };
        let entries = assemble(&history);
        assert_eq!(entries[0].remark.as_deref(), Some("Wrong channel"));
    }
}
