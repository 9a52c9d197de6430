//! Attachment list reconciliation.
//!
//! A tray holds the union of attachments already persisted server-side
//! and files freshly staged from a picker or drag-drop. Staging dedups
//! by display name (first wins, silently); deleting routes through the
//! server exactly when the entry has a server id; replacing a persisted
//! file keeps its server id so the backend updates in place.

use async_trait::async_trait;
use tracing::debug;

use crate::api::{ApiClient, ApiError};
use crate::model::{AttachmentSlot, StagedUpload, TicketAttachment};

/// Extensions the pickers accept. Drag-drop filters against this list
/// explicitly; picker input goes through the same check again since the
/// `accept` hint on a file input is advisory.
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "docx", "pdf"];

pub fn has_allowed_extension(name: &str) -> bool {
    name.rsplit_once('.')
        .map(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// A file as it arrives from a picker or a drop event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingFile {
    pub name: String,
    pub size_bytes: u64,
}

impl IncomingFile {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
        }
    }
}

/// Server collaborator for persisted-attachment removal.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    async fn remove_attachment(&self, ticket_attachment_id: u64) -> Result<(), ApiError>;
}

#[async_trait]
impl AttachmentStore for ApiClient {
    async fn remove_attachment(&self, ticket_attachment_id: u64) -> Result<(), ApiError> {
        ApiClient::remove_attachment(self, ticket_attachment_id).await
    }
}

#[derive(Debug, Clone)]
struct TrayEntry {
    slot: AttachmentSlot,
    /// Server id a staged entry stands in for (re-upload flow).
    replaces: Option<u64>,
}

/// Reconciled attachment list for one dialog.
#[derive(Debug, Clone, Default)]
pub struct AttachmentTray {
    entries: Vec<TrayEntry>,
}

impl AttachmentTray {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the tray with what the server already has, fetched on
    /// dialog open.
    pub fn from_persisted(attachments: Vec<TicketAttachment>) -> Self {
        Self {
            entries: attachments
                .into_iter()
                .map(|a| TrayEntry {
                    slot: a.into(),
                    replaces: None,
                })
                .collect(),
        }
    }

    pub fn slots(&self) -> Vec<&AttachmentSlot> {
        self.entries.iter().map(|e| &e.slot).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn contains_name(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.slot.name() == name)
    }

    /// Stage incoming files. Disallowed extensions and names already in
    /// the tray (local or persisted) are dropped silently. Returns how
    /// many entries were accepted.
    pub fn stage(&mut self, files: Vec<IncomingFile>) -> usize {
        let mut accepted = 0;
        for file in files {
            if !has_allowed_extension(&file.name) {
                debug!(name = %file.name, "dropped file with disallowed extension");
                continue;
            }
            if self.contains_name(&file.name) {
                debug!(name = %file.name, "dropped duplicate file name");
                continue;
            }
            self.entries.push(TrayEntry {
                slot: AttachmentSlot::Local {
                    name: file.name,
                    size_bytes: file.size_bytes,
                },
                replaces: None,
            });
            accepted += 1;
        }
        accepted
    }

    /// Delete an entry by name. A persisted entry issues exactly one
    /// removal call to the server before local state changes; a local
    /// entry touches nothing remote. Returns whether an entry was
    /// removed.
    pub async fn delete(
        &mut self,
        name: &str,
        store: &dyn AttachmentStore,
    ) -> Result<bool, ApiError> {
        let Some(index) = self.entries.iter().position(|e| e.slot.name() == name) else {
            return Ok(false);
        };
        if let Some(id) = self.entries[index].slot.server_id() {
            store.remove_attachment(id).await?;
        }
        self.entries.remove(index);
        Ok(true)
    }

    /// Replace a persisted entry with a new local file, keeping the
    /// original server id on the staged entry so the server updates the
    /// record in place instead of creating a duplicate.
    pub fn replace(&mut self, name: &str, file: IncomingFile) -> bool {
        if !has_allowed_extension(&file.name) {
            return false;
        }
        let Some(entry) = self.entries.iter_mut().find(|e| e.slot.name() == name) else {
            return false;
        };
        let Some(id) = entry.slot.server_id() else {
            return false;
        };
        entry.replaces = Some(id);
        entry.slot = AttachmentSlot::Local {
            name: file.name,
            size_bytes: file.size_bytes,
        };
        true
    }

    /// Locally staged entries, in tray order, paired with the server id
    /// each one replaces (if any). These become the upload rows of the
    /// next multipart submission.
    pub fn staged(&self) -> Vec<(&str, Option<u64>)> {
        self.entries
            .iter()
            .filter(|e| !e.slot.is_persisted())
            .map(|e| (e.slot.name(), e.replaces))
            .collect()
    }

    /// Resolve staged entries into upload rows via `load` (typically a
    /// filesystem read).
    pub fn upload_rows<F>(&self, mut load: F) -> Result<Vec<StagedUpload>, ApiError>
    where
        F: FnMut(&str) -> std::io::Result<Vec<u8>>,
    {
        self.staged()
            .into_iter()
            .map(|(name, replaces)| {
                let bytes = load(name)
                    .map_err(|e| ApiError::Validation(format!("could not read {name}: {e}")))?;
                Ok(StagedUpload {
                    attachment_id: replaces,
                    name: name.to_string(),
                    bytes,
                })
            })
            .collect()
    }
}
