// Fixdesk Library - Ticketing Workflow Client
// This exposes the core components for testing and integration

pub mod api;
pub mod cli;
pub mod config;
pub mod model;
pub mod notify;
pub mod observability;
pub mod telemetry;
pub mod workflow;

// Re-export key types for easy access
pub use api::{ApiClient, ApiError, IndexedForm, ListParams, Page};
pub use config::{config, init_config, FixdeskConfig};
pub use model::{
    AttachmentSlot, BadgeCounts, Concern, ConcernStatus, StagedUpload, TicketAttachment,
};
pub use notify::{NotificationHub, Tag};
pub use observability::ApiMetrics;
pub use telemetry::{create_workflow_span, generate_correlation_id, init_telemetry};
pub use workflow::approval::{ApprovalAction, ApprovalDispatcher, Decision, DispatchOutcome};
pub use workflow::attachments::{AttachmentStore, AttachmentTray, IncomingFile};
pub use workflow::closing::{
    ClosingEvent, ClosingForm, ClosingSubmitter, ConfirmPrompt, FieldEdit, SubmitOutcome,
};
pub use workflow::intake::{submit_concern, ConcernDraft};
pub use workflow::pager::{reduce, Debouncer, PagerAction, PagerState, QueueTab};
pub use workflow::timeline::{assemble, Marker, TimelineEntry};
pub use workflow::{DialogSession, SessionToken};
