//! Approval dispatch end-to-end against a mocked backend: confirm gate,
//! shared cache invalidation, verbatim server errors, stale sessions.

mod support;

use std::sync::Arc;

use serde_json::json;
use support::BackendMock;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};
use fixdesk::{
    ApprovalAction, ApprovalDispatcher, Decision, DialogSession, DispatchOutcome, ListParams,
    NotificationHub,
};

#[tokio::test]
async fn confirmed_approve_refreshes_queue_and_badge_with_one_invalidation() {
    let mock = BackendMock::new().await;
    // Two backend hits each: the initial read and the one refetch after
    // the shared invalidation. A third would mean a redundant refresh.
    mock.mock_ticket_queue(&[41, 42], 2, 2).await;
    mock.mock_badges(2, 2).await;
    Mock::given(method("POST"))
        .and(path("/closing-ticket/approval"))
        .and(body_json(json!({
            "approveClosingRequests": [{"closingTicketId": 41}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock.server)
        .await;

    let client = Arc::new(mock.client());
    let hub = NotificationHub::new(Arc::clone(&client));
    let dispatcher = ApprovalDispatcher::new(Arc::clone(&client), hub);

    let params = ListParams::new("", 1, 5);
    client.list_ticket_approvals(&params).await.unwrap();
    client.badge_counts().await.unwrap();

    let session = DialogSession::new();
    let token = session.open();
    let outcome = dispatcher
        .dispatch(ApprovalAction::Approve, 41, Decision::Confirmed, &session, token)
        .await;
    assert_eq!(
        outcome,
        DispatchOutcome::Success {
            notice: "Approve request successfully!"
        }
    );

    // Both reads go back to the backend now; no explicit refetch call
    // was made anywhere above.
    client.list_ticket_approvals(&params).await.unwrap();
    client.badge_counts().await.unwrap();
}

#[tokio::test]
async fn dismissed_prompt_fires_nothing() {
    let mock = BackendMock::new().await;
    Mock::given(method("POST"))
        .and(path("/closing-ticket/approval"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&mock.server)
        .await;

    let client = Arc::new(mock.client());
    let hub = NotificationHub::new(Arc::clone(&client));
    let dispatcher = ApprovalDispatcher::new(Arc::clone(&client), hub);

    let session = DialogSession::new();
    let token = session.open();
    let outcome = dispatcher
        .dispatch(ApprovalAction::Approve, 41, Decision::Dismissed, &session, token)
        .await;
    assert_eq!(outcome, DispatchOutcome::Dismissed);
}

#[tokio::test]
async fn rejection_surfaces_message_and_keeps_dialog_open() {
    let mock = BackendMock::new().await;
    Mock::given(method("POST"))
        .and(path("/transfer-ticket/approval"))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(json!({"error": {"message": "Already decided by another approver"}})),
        )
        .expect(1)
        .mount(&mock.server)
        .await;

    let client = Arc::new(mock.client());
    let hub = NotificationHub::new(Arc::clone(&client));
    let dispatcher = ApprovalDispatcher::new(Arc::clone(&client), hub);

    let session = DialogSession::new();
    let token = session.open();
    let outcome = dispatcher
        .dispatch(ApprovalAction::Transfer, 42, Decision::Confirmed, &session, token)
        .await;
    // Failed (not Stale, not Dismissed): the dialog stays open for retry.
    assert_eq!(
        outcome,
        DispatchOutcome::Failed {
            message: "Already decided by another approver".to_string()
        }
    );
}

#[tokio::test]
async fn completion_after_dialog_close_discards_ui_effects() {
    let mock = BackendMock::new().await;
    // The mutation still fires (fire-and-forget), only the UI outcome
    // is discarded.
    Mock::given(method("POST"))
        .and(path("/on-hold-ticket/approval"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock.server)
        .await;

    let client = Arc::new(mock.client());
    let hub = NotificationHub::new(Arc::clone(&client));
    let dispatcher = ApprovalDispatcher::new(Arc::clone(&client), hub);

    let session = DialogSession::new();
    let token = session.open();
    session.close();

    let outcome = dispatcher
        .dispatch(ApprovalAction::Hold, 43, Decision::Confirmed, &session, token)
        .await;
    assert_eq!(outcome, DispatchOutcome::Stale);
}
