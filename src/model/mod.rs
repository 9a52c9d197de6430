pub mod attachment;
pub mod concern;
pub mod history;
pub mod masterlist;
pub mod notification;
pub mod ticket;

pub use attachment::{AttachmentSlot, StagedUpload, TicketAttachment};
pub use concern::{Concern, ConcernStatus};
pub use history::{ActionKind, HistoryEvent, TicketHistory, UpcomingStep};
pub use masterlist::{Category, SubCategory, Technician};
pub use notification::BadgeCounts;
pub use ticket::{OpenTicket, TicketCategory, TicketSubCategory};
