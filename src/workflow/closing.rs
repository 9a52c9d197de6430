//! Closing-form state machine.
//!
//! An issue handler closes a ticket by filling resolution, categories,
//! sub-categories, optional technicians/notes, and an attachment delta.
//! The machine owns the gate between "filled" and "submittable": the
//! submit control is enabled only in ReadyToSubmit, the confirmation
//! prompt moves it to Submitting, and a rejection keeps every entered
//! field so the user retries without re-typing.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use statig::prelude::*;

use crate::api::multipart::IndexedForm;
use crate::model::masterlist::{Category, SubCategory, Technician};
use crate::model::ticket::TicketCategory;
use crate::model::StagedUpload;

/// Shown under the confirmation prompt when local time is already past
/// the cutoff. Advisory only; the client never blocks on it.
pub const CLOSING_ADVISORY: &str =
    "Please note that closing of tickets are only available until 4:00pm.";

/// Category selected in the closing form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: u64,
    pub description: String,
}

impl From<&Category> for CategoryRef {
    fn from(c: &Category) -> Self {
        Self {
            id: c.id,
            description: c.category_description.clone(),
        }
    }
}

impl From<&TicketCategory> for CategoryRef {
    fn from(c: &TicketCategory) -> Self {
        Self {
            id: c.category_id,
            description: c.category_description.clone(),
        }
    }
}

/// Sub-category selected in the closing form. Carries its parent id so
/// the cross-field check and the cascade prune stay local.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubCategoryRef {
    pub sub_category_id: u64,
    pub category_id: u64,
    pub description: String,
}

impl From<&SubCategory> for SubCategoryRef {
    fn from(s: &SubCategory) -> Self {
        Self {
            sub_category_id: s.sub_category_id,
            category_id: s.category_id,
            description: s.sub_category_description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicianRef {
    pub technician_id: u64,
    pub name: String,
}

impl From<&Technician> for TechnicianRef {
    fn from(t: &Technician) -> Self {
        Self {
            technician_id: t.technician_id,
            name: t.technician_name.clone(),
        }
    }
}

/// One field mutation. Category edits and option-list refreshes carry
/// the cascade prune with them; see `ClosingForm::apply_edit`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    Resolution(String),
    Notes(String),
    Categories(Vec<CategoryRef>),
    SubCategories(Vec<SubCategoryRef>),
    /// The sub-category option list was refetched (after a category
    /// change); selections no longer offered for a selected parent are
    /// pruned.
    SubCategoryOptions(Vec<SubCategory>),
    Technicians(Vec<TechnicianRef>),
    Attachments(Vec<StagedUpload>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClosingEvent {
    Edit(FieldEdit),
    /// The user confirmed the blocking prompt.
    Confirm,
    SubmitSucceeded,
    SubmitFailed { message: String },
    Reset,
}

/// Blocking confirmation prompt, parameterized with the ticket id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: String,
    pub text: String,
    pub advisory: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Readiness {
    Empty,
    Partial,
    Ready,
}

/// Context for the closing state machine.
#[derive(Debug, Default)]
pub struct ClosingForm {
    pub ticket_concern_id: u64,
    pub resolution: String,
    pub notes: String,
    pub categories: Vec<CategoryRef>,
    pub sub_categories: Vec<SubCategoryRef>,
    pub technicians: Vec<TechnicianRef>,
    pub attachments: Vec<StagedUpload>,
    pub last_error: Option<String>,
}

impl ClosingForm {
    pub fn new(ticket_concern_id: u64) -> Self {
        Self {
            ticket_concern_id,
            ..Default::default()
        }
    }

    /// Submittable iff resolution is non-empty, at least one category
    /// and one sub-category are selected, and every sub-category's
    /// parent is among the selected categories.
    pub fn is_submittable(&self) -> bool {
        !self.resolution.trim().is_empty()
            && !self.categories.is_empty()
            && !self.sub_categories.is_empty()
            && self.sub_categories.iter().all(|sc| {
                self.categories.iter().any(|c| c.id == sc.category_id)
            })
    }

    fn readiness(&self) -> Readiness {
        if self.is_submittable() {
            return Readiness::Ready;
        }
        let untouched = self.resolution.is_empty()
            && self.notes.is_empty()
            && self.categories.is_empty()
            && self.sub_categories.is_empty()
            && self.technicians.is_empty()
            && self.attachments.is_empty();
        if untouched {
            Readiness::Empty
        } else {
            Readiness::Partial
        }
    }

    fn apply_edit(&mut self, edit: &FieldEdit) {
        match edit {
            FieldEdit::Resolution(text) => self.resolution = text.clone(),
            FieldEdit::Notes(text) => self.notes = text.clone(),
            FieldEdit::Categories(categories) => {
                self.categories = categories.clone();
                self.prune_sub_categories(None);
            }
            FieldEdit::SubCategories(sub_categories) => {
                self.sub_categories = sub_categories.clone();
            }
            FieldEdit::SubCategoryOptions(options) => {
                self.prune_sub_categories(Some(options));
            }
            FieldEdit::Technicians(technicians) => self.technicians = technicians.clone(),
            FieldEdit::Attachments(attachments) => self.attachments = attachments.clone(),
        }
    }

    /// Derived-state correction: selections whose parent category left
    /// the set are dropped; with an option list given, selections the
    /// list no longer offers for a selected parent are dropped too.
    /// Runs synchronously on every category or option-list change.
    fn prune_sub_categories(&mut self, options: Option<&[SubCategory]>) {
        if self.categories.is_empty() {
            self.sub_categories.clear();
            return;
        }
        self.sub_categories.retain(|sc| {
            let parent_selected = self.categories.iter().any(|c| c.id == sc.category_id);
            match options {
                Some(options) => {
                    parent_selected
                        && options.iter().any(|o| {
                            o.sub_category_id == sc.sub_category_id
                                && o.category_id == sc.category_id
                        })
                }
                None => parent_selected,
            }
        });
    }

    fn clear_fields(&mut self) {
        let ticket = self.ticket_concern_id;
        *self = ClosingForm::new(ticket);
    }

    /// Prompt shown before submission. The 16:00 advisory is informative
    /// only; whether the backend enforces the cutoff is unknown, so the
    /// client must not.
    pub fn confirm_prompt(&self, now: NaiveTime, advisory_hour: u32) -> ConfirmPrompt {
        let cutoff = NaiveTime::from_hms_opt(advisory_hour, 0, 0)
            .unwrap_or_else(|| NaiveTime::from_hms_opt(16, 0, 0).expect("valid"));
        ConfirmPrompt {
            title: "Confirmation".to_string(),
            text: format!(
                "Requesting to close this ticket number {}?",
                self.ticket_concern_id
            ),
            advisory: (now > cutoff).then(|| CLOSING_ADVISORY.to_string()),
        }
    }

    /// Multipart payload in the backend's indexed array-field layout.
    /// Empty repeated collections still send one placeholder row.
    pub fn build_payload(&self) -> IndexedForm {
        IndexedForm::new()
            .text("TicketConcernId", self.ticket_concern_id.to_string())
            .text("Resolution", self.resolution.clone())
            .text("Notes", self.notes.clone())
            .indexed(
                "ClosingTicketCategories",
                &self.categories,
                &["ticketCategoryId", "categoryId"],
                |mut row, _, c| {
                    row.text("ticketCategoryId", "")
                        .text("categoryId", c.id.to_string());
                },
            )
            .indexed(
                "ClosingSubTicketCategories",
                &self.sub_categories,
                &["ticketSubCategoryId", "subCategoryId"],
                |mut row, _, sc| {
                    row.text("ticketSubCategoryId", "")
                        .text("subCategoryId", sc.sub_category_id.to_string());
                },
            )
            .indexed(
                "AddClosingTicketTechnicians",
                &self.technicians,
                &["ticketTechnicianId", "technician_By"],
                |mut row, _, t| {
                    row.text("ticketTechnicianId", "")
                        .text("technician_By", t.technician_id.to_string());
                },
            )
            .indexed(
                "AddClosingAttachments",
                &self.attachments,
                &["ticketAttachmentId", "attachment"],
                |mut row, _, file| {
                    row.text(
                        "ticketAttachmentId",
                        file.attachment_id
                            .map(|id| id.to_string())
                            .unwrap_or_default(),
                    )
                    .file("attachment", file.name.clone(), file.bytes.clone());
                },
            )
    }
}

#[state_machine(initial = "State::empty()", state(derive(Debug, Clone, PartialEq, Eq)))]
impl ClosingForm {
    #[state]
    fn empty(&mut self, event: &ClosingEvent) -> Outcome<State> {
        match event {
            ClosingEvent::Edit(edit) => {
                self.apply_edit(edit);
                self.transition_for_readiness()
            }
            _ => Handled,
        }
    }

    #[state]
    fn partially_filled(&mut self, event: &ClosingEvent) -> Outcome<State> {
        match event {
            ClosingEvent::Edit(edit) => {
                self.apply_edit(edit);
                self.transition_for_readiness()
            }
            ClosingEvent::Reset => {
                self.clear_fields();
                Transition(State::empty())
            }
            // Validation still failing: the confirm action stays
            // disabled, nothing reaches the network.
            _ => Handled,
        }
    }

    #[state]
    fn ready_to_submit(&mut self, event: &ClosingEvent) -> Outcome<State> {
        match event {
            ClosingEvent::Edit(edit) => {
                self.apply_edit(edit);
                self.transition_for_readiness()
            }
            ClosingEvent::Confirm => {
                tracing::info!(
                    ticket = self.ticket_concern_id,
                    categories = self.categories.len(),
                    sub_categories = self.sub_categories.len(),
                    "closing submission confirmed"
                );
                Transition(State::submitting())
            }
            ClosingEvent::Reset => {
                self.clear_fields();
                Transition(State::empty())
            }
            _ => Handled,
        }
    }

    #[state]
    fn submitting(&mut self, event: &ClosingEvent) -> Outcome<State> {
        match event {
            // In-flight: further confirms and edits are ignored, which
            // is the whole double-submit guard.
            ClosingEvent::Confirm | ClosingEvent::Edit(_) => Handled,
            ClosingEvent::SubmitSucceeded => {
                tracing::info!(ticket = self.ticket_concern_id, "closing submitted");
                self.clear_fields();
                Transition(State::submitted())
            }
            ClosingEvent::SubmitFailed { message } => {
                tracing::warn!(
                    ticket = self.ticket_concern_id,
                    error = %message,
                    "closing submission rejected"
                );
                self.last_error = Some(message.clone());
                Transition(State::failed())
            }
            ClosingEvent::Reset => Handled,
        }
    }

    #[state]
    fn submitted(&mut self, event: &ClosingEvent) -> Outcome<State> {
        match event {
            ClosingEvent::Edit(edit) => {
                self.apply_edit(edit);
                self.transition_for_readiness()
            }
            ClosingEvent::Reset => Transition(State::empty()),
            _ => Handled,
        }
    }

    /// Rejection leaves the entered data untouched so the user can
    /// retry immediately; submission-wise this state behaves like
    /// ReadyToSubmit.
    #[state]
    fn failed(&mut self, event: &ClosingEvent) -> Outcome<State> {
        match event {
            ClosingEvent::Confirm => {
                tracing::info!(ticket = self.ticket_concern_id, "retrying closing submission");
                Transition(State::submitting())
            }
            ClosingEvent::Edit(edit) => {
                self.last_error = None;
                self.apply_edit(edit);
                self.transition_for_readiness()
            }
            ClosingEvent::Reset => {
                self.clear_fields();
                Transition(State::empty())
            }
            _ => Handled,
        }
    }
}

impl ClosingForm {
    fn transition_for_readiness(&mut self) -> Outcome<State> {
        match self.readiness() {
            Readiness::Empty => Transition(State::empty()),
            Readiness::Partial => Transition(State::partially_filled()),
            Readiness::Ready => Transition(State::ready_to_submit()),
        }
    }
}

/// Outcome of one confirmed submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Mutation landed; caches invalidated, form reset, dialog closes.
    Submitted { notice: &'static str },
    /// Backend rejected; message verbatim, dialog stays open.
    Failed { message: String },
    /// Validation gate still closed; nothing reached the network.
    NotReady,
    /// The dialog closed while the mutation was in flight. The mutation
    /// itself was not cancelled; only its UI effects are discarded.
    Stale,
}

/// Drives a confirmed closing form through the mutation and the shared
/// cache resets.
#[derive(Debug, Clone)]
pub struct ClosingSubmitter {
    client: std::sync::Arc<crate::api::ApiClient>,
    hub: crate::notify::NotificationHub,
}

impl ClosingSubmitter {
    pub fn new(
        client: std::sync::Arc<crate::api::ApiClient>,
        hub: crate::notify::NotificationHub,
    ) -> Self {
        Self { client, hub }
    }

    /// Submit a confirmed form. The machine must be in ReadyToSubmit or
    /// Failed; anywhere else the validation gate reports NotReady. On
    /// success the notification-count and message caches are
    /// invalidated before the form resets.
    pub async fn submit(
        &self,
        machine: &mut statig::blocking::StateMachine<ClosingForm>,
        session: &crate::workflow::DialogSession,
        token: crate::workflow::SessionToken,
    ) -> SubmitOutcome {
        if !machine.is_submittable() {
            return SubmitOutcome::NotReady;
        }
        let payload = machine.build_payload();
        machine.handle(&ClosingEvent::Confirm);

        match self.client.close_ticket(payload.into_form()).await {
            Ok(()) => {
                self.hub.closing_submitted().await;
                machine.handle(&ClosingEvent::SubmitSucceeded);
                if session.is_current(token) {
                    SubmitOutcome::Submitted {
                        notice: "Ticket submitted successfully!",
                    }
                } else {
                    SubmitOutcome::Stale
                }
            }
            Err(e) => {
                let message = e.to_string();
                machine.handle(&ClosingEvent::SubmitFailed {
                    message: message.clone(),
                });
                if session.is_current(token) {
                    SubmitOutcome::Failed { message }
                } else {
                    SubmitOutcome::Stale
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: u64) -> CategoryRef {
        CategoryRef {
            id,
            description: format!("category {id}"),
        }
    }

    fn sub_category(sub_id: u64, parent: u64) -> SubCategoryRef {
        SubCategoryRef {
            sub_category_id: sub_id,
            category_id: parent,
            description: format!("sub {sub_id}"),
        }
    }

    fn option_row(sub_id: u64, parent: u64) -> SubCategory {
        SubCategory {
            sub_category_id: sub_id,
            category_id: parent,
            sub_category_description: format!("sub {sub_id}"),
        }
    }

    fn ready_machine() -> statig::blocking::StateMachine<ClosingForm> {
        let mut sm = ClosingForm::new(4401).state_machine();
        sm.handle(&ClosingEvent::Edit(FieldEdit::Resolution("Fixed cable".into())));
        sm.handle(&ClosingEvent::Edit(FieldEdit::Categories(vec![category(1)])));
        sm.handle(&ClosingEvent::Edit(FieldEdit::SubCategories(vec![
            sub_category(10, 1),
        ])));
        sm
    }

    #[test]
    fn ready_requires_every_field_group() {
        let mut sm = ClosingForm::new(1).state_machine();
        assert_eq!(sm.state(), &State::empty());

        sm.handle(&ClosingEvent::Edit(FieldEdit::Resolution("done".into())));
        assert_eq!(sm.state(), &State::partially_filled());

        sm.handle(&ClosingEvent::Edit(FieldEdit::Categories(vec![category(1)])));
        assert_eq!(sm.state(), &State::partially_filled());

        sm.handle(&ClosingEvent::Edit(FieldEdit::SubCategories(vec![
            sub_category(10, 1),
        ])));
        assert_eq!(sm.state(), &State::ready_to_submit());
    }

    #[test]
    fn sub_category_with_unselected_parent_blocks_readiness() {
        let mut sm = ClosingForm::new(1).state_machine();
        sm.handle(&ClosingEvent::Edit(FieldEdit::Resolution("done".into())));
        sm.handle(&ClosingEvent::Edit(FieldEdit::Categories(vec![category(1)])));
        sm.handle(&ClosingEvent::Edit(FieldEdit::SubCategories(vec![
            sub_category(10, 1),
            sub_category(20, 2), // parent 2 not selected
        ])));
        assert_eq!(sm.state(), &State::partially_filled());
    }

    #[test]
    fn removing_a_category_prunes_exactly_its_children() {
        let mut sm = ClosingForm::new(1).state_machine();
        sm.handle(&ClosingEvent::Edit(FieldEdit::Resolution("done".into())));
        sm.handle(&ClosingEvent::Edit(FieldEdit::Categories(vec![
            category(1),
            category(2),
        ])));
        sm.handle(&ClosingEvent::Edit(FieldEdit::SubCategories(vec![
            sub_category(10, 1),
            sub_category(20, 2),
            sub_category(21, 2),
        ])));
        assert_eq!(sm.state(), &State::ready_to_submit());

        sm.handle(&ClosingEvent::Edit(FieldEdit::Categories(vec![category(1)])));
        assert_eq!(sm.sub_categories, vec![sub_category(10, 1)]);
        assert_eq!(sm.state(), &State::ready_to_submit());
    }

    #[test]
    fn clearing_categories_clears_all_sub_categories() {
        let mut sm = ready_machine();
        sm.handle(&ClosingEvent::Edit(FieldEdit::Categories(vec![])));
        assert!(sm.sub_categories.is_empty());
        assert_eq!(sm.state(), &State::partially_filled());
    }

    #[test]
    fn option_list_refresh_prunes_withdrawn_selections() {
        let mut sm = ready_machine();
        sm.handle(&ClosingEvent::Edit(FieldEdit::SubCategories(vec![
            sub_category(10, 1),
            sub_category(11, 1),
        ])));
        // New option list no longer offers sub 11 under category 1.
        sm.handle(&ClosingEvent::Edit(FieldEdit::SubCategoryOptions(vec![
            option_row(10, 1),
        ])));
        assert_eq!(sm.sub_categories, vec![sub_category(10, 1)]);
    }

    #[test]
    fn confirm_is_ignored_until_ready() {
        let mut sm = ClosingForm::new(1).state_machine();
        sm.handle(&ClosingEvent::Confirm);
        assert_eq!(sm.state(), &State::empty());

        sm.handle(&ClosingEvent::Edit(FieldEdit::Resolution("half".into())));
        sm.handle(&ClosingEvent::Confirm);
        assert_eq!(sm.state(), &State::partially_filled());
    }

    #[test]
    fn duplicate_confirm_while_submitting_is_ignored() {
        let mut sm = ready_machine();
        sm.handle(&ClosingEvent::Confirm);
        assert_eq!(sm.state(), &State::submitting());

        sm.handle(&ClosingEvent::Confirm);
        assert_eq!(sm.state(), &State::submitting());
    }

    #[test]
    fn success_resets_the_form() {
        let mut sm = ready_machine();
        sm.handle(&ClosingEvent::Confirm);
        sm.handle(&ClosingEvent::SubmitSucceeded);
        assert_eq!(sm.state(), &State::submitted());
        assert_eq!(sm.resolution, "");
        assert!(sm.categories.is_empty());
        assert!(sm.sub_categories.is_empty());
    }

    #[test]
    fn failure_keeps_entered_data_for_retry() {
        let mut sm = ready_machine();
        sm.handle(&ClosingEvent::Confirm);
        sm.handle(&ClosingEvent::SubmitFailed {
            message: "Ticket already closed".into(),
        });
        assert_eq!(sm.state(), &State::failed());
        assert_eq!(sm.resolution, "Fixed cable");
        assert_eq!(sm.last_error.as_deref(), Some("Ticket already closed"));

        // Retry without re-entering anything.
        sm.handle(&ClosingEvent::Confirm);
        assert_eq!(sm.state(), &State::submitting());
    }

    #[test]
    fn advisory_appears_only_after_cutoff() {
        let form = ClosingForm::new(4401);
        let before = NaiveTime::from_hms_opt(15, 59, 0).unwrap();
        let after = NaiveTime::from_hms_opt(16, 30, 0).unwrap();

        let prompt = form.confirm_prompt(before, 16);
        assert_eq!(prompt.text, "Requesting to close this ticket number 4401?");
        assert!(prompt.advisory.is_none());

        let prompt = form.confirm_prompt(after, 16);
        assert_eq!(prompt.advisory.as_deref(), Some(CLOSING_ADVISORY));
    }

    #[test]
    fn payload_matches_backend_field_layout() {
        let mut form = ClosingForm::new(4401);
        form.resolution = "Fixed cable".into();
        form.categories = vec![category(1)];
        form.sub_categories = vec![sub_category(10, 1)];

        let payload = form.build_payload();
        assert_eq!(payload.text_value("TicketConcernId"), Some("4401"));
        assert_eq!(payload.text_value("Resolution"), Some("Fixed cable"));
        assert_eq!(
            payload.text_value("ClosingTicketCategories[0].categoryId"),
            Some("1")
        );
        assert_eq!(
            payload.text_value("ClosingSubTicketCategories[0].subCategoryId"),
            Some("10")
        );
        // Empty collections still send their placeholder row.
        assert_eq!(
            payload.text_value("AddClosingAttachments[0].ticketAttachmentId"),
            Some("")
        );
        assert_eq!(
            payload.text_value("AddClosingAttachments[0].attachment"),
            Some("")
        );
        assert_eq!(
            payload.text_value("AddClosingTicketTechnicians[0].technician_By"),
            Some("")
        );
    }

    #[test]
    fn replacement_attachment_keeps_server_id_in_payload() {
        let mut form = ClosingForm::new(4401);
        form.attachments = vec![StagedUpload {
            attachment_id: Some(77),
            name: "photo-v2.png".into(),
            bytes: vec![1, 2],
        }];
        let payload = form.build_payload();
        assert_eq!(
            payload.text_value("AddClosingAttachments[0].ticketAttachmentId"),
            Some("77")
        );
    }
}
