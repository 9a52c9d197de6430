use serde::Serialize;

use crate::api::client::ApiClient;
use crate::api::error::ApiError;
use crate::api::query::{ListParams, Page};
use crate::model::{Concern, TicketAttachment};
use crate::notify::Tag;

/// Fixed flags the receiver queue bakes into its path: only unapproved,
/// active, unrejected concerns at the approver stage.
const RECEIVER_PAGE: &str =
    "request-concern/page?Approval=false&Status=true&Reject=false&Approver=Approver";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RemoveAttachmentsBody {
    remove_attachments: Vec<RemoveAttachmentRow>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RemoveAttachmentRow {
    ticket_attachment_id: u64,
}

#[derive(Debug, serde::Deserialize)]
struct AttachmentGroup {
    #[serde(default)]
    attachments: Vec<TicketAttachment>,
}

impl ApiClient {
    /// Pending concerns awaiting a receiver decision.
    pub async fn list_receiver_concerns(
        &self,
        params: &ListParams,
    ) -> Result<Page<Concern>, ApiError> {
        let key = format!("{}:receiver:{}", Tag::Concerns.prefix(), params.cache_key());
        self.get_enveloped(RECEIVER_PAGE, Some(params), Some(key))
            .await
    }

    /// Submit a new concern (multipart: description + staged files).
    pub async fn create_concern(&self, form: reqwest::multipart::Form) -> Result<(), ApiError> {
        self.post_multipart("request-concern/add-request-concern", form)
            .await
    }

    /// Persisted attachments for one ticket, fetched when a dialog
    /// opens so the tray can reconcile against them.
    pub async fn ticket_attachments(
        &self,
        ticket_concern_id: u64,
    ) -> Result<Vec<TicketAttachment>, ApiError> {
        let groups: Vec<AttachmentGroup> = self
            .get_enveloped(
                "request-concern/request-attachment",
                Some(&[("Id", ticket_concern_id)]),
                None,
            )
            .await?;
        Ok(groups
            .into_iter()
            .next()
            .map(|g| g.attachments)
            .unwrap_or_default())
    }

    /// Delete one persisted attachment by its server id.
    pub async fn remove_attachment(&self, ticket_attachment_id: u64) -> Result<(), ApiError> {
        let body = RemoveAttachmentsBody {
            remove_attachments: vec![RemoveAttachmentRow {
                ticket_attachment_id,
            }],
        };
        self.post_json("request-concern/remove-attachment", &body)
            .await
    }
}
