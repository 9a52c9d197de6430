use serde::{Deserialize, Serialize};

/// A file slot in an attachment list.
///
/// Identity is the display name while the file only exists client-side;
/// once the server confirms the upload the server id is authoritative and
/// every later update or delete must reference it. That transition
/// happens exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentSlot {
    /// Staged locally, not yet uploaded.
    Local { name: String, size_bytes: u64 },
    /// Confirmed by the server.
    Persisted {
        id: u64,
        name: String,
        size_bytes: u64,
        link: Option<String>,
    },
}

impl AttachmentSlot {
    pub fn name(&self) -> &str {
        match self {
            AttachmentSlot::Local { name, .. } => name,
            AttachmentSlot::Persisted { name, .. } => name,
        }
    }

    pub fn size_bytes(&self) -> u64 {
        match self {
            AttachmentSlot::Local { size_bytes, .. } => *size_bytes,
            AttachmentSlot::Persisted { size_bytes, .. } => *size_bytes,
        }
    }

    /// Server id, once assigned.
    pub fn server_id(&self) -> Option<u64> {
        match self {
            AttachmentSlot::Local { .. } => None,
            AttachmentSlot::Persisted { id, .. } => Some(*id),
        }
    }

    pub fn is_persisted(&self) -> bool {
        matches!(self, AttachmentSlot::Persisted { .. })
    }
}

/// One row of a multipart upload. `attachment_id` carries the original
/// server id when a persisted file is being replaced, so the server
/// updates the record in place instead of creating a duplicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedUpload {
    pub attachment_id: Option<u64>,
    pub name: String,
    pub bytes: Vec<u8>,
}

impl StagedUpload {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            attachment_id: None,
            name: name.into(),
            bytes,
        }
    }

    /// A replacement for an already persisted attachment.
    pub fn replacing(id: u64, name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            attachment_id: Some(id),
            name: name.into(),
            bytes,
        }
    }
}

/// Persisted attachment as the backend reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketAttachment {
    pub ticket_attachment_id: u64,
    pub file_name: String,
    pub file_size: u64,
    /// Server-side link used for view/download.
    pub attachment: Option<String>,
}

impl From<TicketAttachment> for AttachmentSlot {
    fn from(a: TicketAttachment) -> Self {
        AttachmentSlot::Persisted {
            id: a.ticket_attachment_id,
            name: a.file_name,
            size_bytes: a.file_size,
            link: a.attachment,
        }
    }
}
