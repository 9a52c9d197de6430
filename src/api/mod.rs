pub mod approvals;
pub mod client;
pub mod closing;
pub mod concerns;
pub mod error;
pub mod masterlist;
pub mod multipart;
pub mod notifications;
pub mod query;

pub use client::ApiClient;
pub use error::ApiError;
pub use multipart::IndexedForm;
pub use query::{Envelope, ListParams, Page};
