//! Concern intake.
//!
//! A requester files a concern with a free-text description and at
//! least one attachment. Both requirements are enforced client-side;
//! an invalid draft never reaches the network.

use std::sync::Arc;

use tracing::info;

use crate::api::multipart::IndexedForm;
use crate::api::{ApiClient, ApiError};
use crate::model::StagedUpload;
use crate::notify::{NotificationHub, Tag};

/// A concern being drafted for submission.
#[derive(Debug, Clone, Default)]
pub struct ConcernDraft {
    pub concern: String,
    pub attachments: Vec<StagedUpload>,
}

impl ConcernDraft {
    pub fn new(concern: impl Into<String>) -> Self {
        Self {
            concern: concern.into(),
            attachments: Vec::new(),
        }
    }

    /// Client-side gate: description non-empty and at least one file.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.concern.trim().is_empty() {
            return Err(ApiError::Validation(
                "Concern details are required".to_string(),
            ));
        }
        if self.attachments.is_empty() {
            return Err(ApiError::Validation(
                "At least one attachment is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Multipart payload: the description plus one indexed row per
    /// staged file.
    pub fn build_payload(&self) -> IndexedForm {
        IndexedForm::new().text("Concern", self.concern.clone()).indexed(
            "RequestAttachmentsFiles",
            &self.attachments,
            &["ticketAttachmentId", "attachment"],
            |mut row, _, file: &StagedUpload| {
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

/// Validate and submit a draft, then drop the receiver-queue and badge
/// caches so the new pending record shows up.
pub async fn submit_concern(
    client: &Arc<ApiClient>,
    hub: &NotificationHub,
    draft: &ConcernDraft,
) -> Result<(), ApiError> {
    draft.validate()?;
    client.create_concern(draft.build_payload().into_form()).await?;
    info!(attachments = draft.attachments.len(), "concern filed");
    hub.invalidate(&[Tag::Concerns, Tag::Badges]).await;
    Ok(())
}
