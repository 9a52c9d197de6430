//! Approval action dispatcher.
//!
//! An approver resolves a queued concern with exactly one of Approve,
//! Transfer, or Hold. Every action passes a blocking Yes/No prompt, an
//! in-flight flag blocks duplicate dispatch, and a success triggers one
//! shared cache invalidation that refreshes both the queue list and the
//! notification badge.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use crate::api::ApiClient;
use crate::notify::NotificationHub;
use crate::workflow::{DialogSession, SessionToken};

/// The three mutually exclusive decisions for a queued concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalAction {
    Approve,
    Transfer,
    Hold,
}

impl ApprovalAction {
    pub fn confirm_text(&self) -> &'static str {
        match self {
            ApprovalAction::Approve => "Approve this request?",
            ApprovalAction::Transfer => "Transfer this request?",
            ApprovalAction::Hold => "Hold this request?",
        }
    }

    pub fn success_notice(&self) -> &'static str {
        match self {
            ApprovalAction::Approve => "Approve request successfully!",
            ApprovalAction::Transfer => "Transfer request successfully!",
            ApprovalAction::Hold => "Hold request successfully!",
        }
    }
}

/// Answer to the blocking confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Confirmed,
    Dismissed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Mutation landed: show the transient notice, close the dialog,
    /// and let the shared invalidation refresh list and badge.
    Success { notice: &'static str },
    /// Backend rejected: message verbatim, dialog stays open for retry.
    Failed { message: String },
    /// The prompt was answered No; nothing fired.
    Dismissed,
    /// A dispatch is already in flight; this one was dropped.
    InFlight,
    /// The dialog closed before completion; UI effects discarded.
    Stale,
}

/// Dispatches approver decisions against the backend.
#[derive(Debug)]
pub struct ApprovalDispatcher {
    client: Arc<ApiClient>,
    hub: NotificationHub,
    in_flight: AtomicBool,
}

impl ApprovalDispatcher {
    pub fn new(client: Arc<ApiClient>, hub: NotificationHub) -> Self {
        Self {
            client,
            hub,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Run one confirmed action for one concern. The in-flight flag is
    /// the double-submit guard: a second dispatch while the first is on
    /// the wire is dropped, not queued.
    pub async fn dispatch(
        &self,
        action: ApprovalAction,
        ticket_id: u64,
        decision: Decision,
        session: &DialogSession,
        token: SessionToken,
    ) -> DispatchOutcome {
        if decision == Decision::Dismissed {
            return DispatchOutcome::Dismissed;
        }
        if self.in_flight.swap(true, Ordering::SeqCst) {
            warn!(ticket_id, ?action, "dispatch dropped: another is in flight");
            return DispatchOutcome::InFlight;
        }

        let result = match action {
            ApprovalAction::Approve => self.client.approve_closing(ticket_id).await,
            ApprovalAction::Transfer => self.client.approve_transfer(ticket_id).await,
            ApprovalAction::Hold => self.client.approve_on_hold(ticket_id).await,
        };
        self.in_flight.store(false, Ordering::SeqCst);

        match result {
            Ok(()) => {
                info!(ticket_id, ?action, "approval action landed");
                // Data changed regardless of whether the dialog is
                // still open; the caches must not serve the old queue.
                self.hub.queue_mutated().await;
                if session.is_current(token) {
                    DispatchOutcome::Success {
                        notice: action.success_notice(),
                    }
                } else {
                    DispatchOutcome::Stale
                }
            }
            Err(e) => {
                warn!(ticket_id, ?action, error = %e, "approval action rejected");
                let message = e.to_string();
                if session.is_current(token) {
                    DispatchOutcome::Failed { message }
                } else {
                    DispatchOutcome::Stale
                }
            }
        }
    }
}
