//! Closing submission end-to-end against a mocked backend: success
//! resets the form and the notification caches, rejection keeps the
//! entered data, stale dialogs discard UI effects.

mod support;

use std::sync::Arc;

use serde_json::json;
use statig::prelude::*;
use support::BackendMock;
use wiremock::ResponseTemplate;

use fixdesk::{
    ClosingEvent, ClosingForm, ClosingSubmitter, DialogSession, FieldEdit, NotificationHub,
    SubmitOutcome,
};
use fixdesk::workflow::closing::{CategoryRef, SubCategoryRef};

fn ready_machine(ticket: u64) -> statig::blocking::StateMachine<ClosingForm> {
    let mut machine = ClosingForm::new(ticket).state_machine();
    machine.handle(&ClosingEvent::Edit(FieldEdit::Resolution(
        "Fixed cable".to_string(),
    )));
    machine.handle(&ClosingEvent::Edit(FieldEdit::Categories(vec![CategoryRef {
        id: 1,
        description: "Hardware".to_string(),
    }])));
    machine.handle(&ClosingEvent::Edit(FieldEdit::SubCategories(vec![
        SubCategoryRef {
            sub_category_id: 10,
            category_id: 1,
            description: "Cabling".to_string(),
        },
    ])));
    machine
}

#[tokio::test]
async fn successful_close_resets_form_and_notification_caches() {
    let mock = BackendMock::new().await;
    mock.mock_close_ticket(ResponseTemplate::new(200).set_body_json(json!({})), 1)
        .await;
    // Initial read plus the refetch after the submission invalidated
    // the badge cache.
    mock.mock_badges(4, 2).await;

    let client = Arc::new(mock.client());
    let hub = NotificationHub::new(Arc::clone(&client));
    client.badge_counts().await.unwrap();

    let mut machine = ready_machine(4401);
    let session = DialogSession::new();
    let token = session.open();
    let submitter = ClosingSubmitter::new(Arc::clone(&client), hub);

    let outcome = submitter.submit(&mut machine, &session, token).await;
    assert_eq!(
        outcome,
        SubmitOutcome::Submitted {
            notice: "Ticket submitted successfully!"
        }
    );
    assert_eq!(machine.resolution, "");
    assert!(machine.categories.is_empty());

    // Badge read goes back to the backend.
    client.badge_counts().await.unwrap();
}

#[tokio::test]
async fn rejected_close_keeps_entered_data_for_retry() {
    let mock = BackendMock::new().await;
    mock.mock_close_ticket(
        ResponseTemplate::new(400)
            .set_body_json(json!({"error": {"message": "Ticket already closed"}})),
        1,
    )
    .await;

    let client = Arc::new(mock.client());
    let hub = NotificationHub::new(Arc::clone(&client));

    let mut machine = ready_machine(4401);
    let session = DialogSession::new();
    let token = session.open();
    let submitter = ClosingSubmitter::new(Arc::clone(&client), hub);

    let outcome = submitter.submit(&mut machine, &session, token).await;
    assert_eq!(
        outcome,
        SubmitOutcome::Failed {
            message: "Ticket already closed".to_string()
        }
    );
    // Dialog stays open with the entered resolution intact.
    assert_eq!(machine.resolution, "Fixed cable");
    assert_eq!(machine.last_error.as_deref(), Some("Ticket already closed"));
}

#[tokio::test]
async fn incomplete_form_never_reaches_the_network() {
    let mock = BackendMock::new().await;
    mock.mock_close_ticket(ResponseTemplate::new(200).set_body_json(json!({})), 0)
        .await;

    let client = Arc::new(mock.client());
    let hub = NotificationHub::new(Arc::clone(&client));

    let mut machine = ClosingForm::new(4401).state_machine();
    machine.handle(&ClosingEvent::Edit(FieldEdit::Resolution(
        "Fixed cable".to_string(),
    )));

    let session = DialogSession::new();
    let token = session.open();
    let submitter = ClosingSubmitter::new(Arc::clone(&client), hub);

    let outcome = submitter.submit(&mut machine, &session, token).await;
    assert_eq!(outcome, SubmitOutcome::NotReady);
}

#[tokio::test]
async fn close_completing_after_dialog_close_is_stale() {
    let mock = BackendMock::new().await;
    // The mutation still fires; only its UI effects are discarded.
    mock.mock_close_ticket(ResponseTemplate::new(200).set_body_json(json!({})), 1)
        .await;

    let client = Arc::new(mock.client());
    let hub = NotificationHub::new(Arc::clone(&client));

    let mut machine = ready_machine(4401);
    let session = DialogSession::new();
    let token = session.open();
    session.close();

    let submitter = ClosingSubmitter::new(Arc::clone(&client), hub);
    let outcome = submitter.submit(&mut machine, &session, token).await;
    assert_eq!(outcome, SubmitOutcome::Stale);
}
