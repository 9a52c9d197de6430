//! Shared notification/cache plumbing.
//!
//! Mutations in one feature make lists and badges elsewhere stale. Those
//! cross-feature resets go through this module's named tags instead of
//! ad hoc per-page refetches: a mutation reports what changed, the hub
//! drops every cached response under the affected tags, and the next
//! read anywhere refetches.

use std::sync::Arc;

use tracing::info;

use crate::api::{ApiClient, ApiError};
use crate::model::BadgeCounts;

/// Invalidation tags. Each tag owns a cache-key prefix; everything
/// cached under it is dropped together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// Approver/handler queue lists (all tabs).
    Queues,
    /// Unread badge counts.
    Badges,
    /// Notification message feed.
    Messages,
    /// Receiver concern lists.
    Concerns,
    /// Category/sub-category/technician masterlists.
    Masterlist,
}

impl Tag {
    pub fn prefix(&self) -> &'static str {
        match self {
            Tag::Queues => "queue",
            Tag::Badges => "badge",
            Tag::Messages => "message",
            Tag::Concerns => "concerns",
            Tag::Masterlist => "masterlist",
        }
    }
}

/// Event-bus facade over the client's tag-prefixed response cache.
#[derive(Debug, Clone)]
pub struct NotificationHub {
    client: Arc<ApiClient>,
}

impl NotificationHub {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn invalidate(&self, tags: &[Tag]) {
        for tag in tags {
            self.client.invalidate_tag(tag.prefix()).await;
        }
        info!(?tags, "notification caches invalidated");
    }

    /// A queue mutation (approve/transfer/hold) landed: the queue lists
    /// and the badge counts share one invalidation, so a single refetch
    /// of each is enough; no second explicit refresh call.
    pub async fn queue_mutated(&self) {
        self.invalidate(&[Tag::Queues, Tag::Badges]).await;
    }

    /// A closing submission landed: badge counts and the message feed
    /// both reset.
    pub async fn closing_submitted(&self) {
        self.invalidate(&[Tag::Badges, Tag::Messages]).await;
    }

    /// Force-refresh the badge counts: drop the cached value and read
    /// through to the backend.
    pub async fn refresh_badges(&self) -> Result<BadgeCounts, ApiError> {
        self.invalidate(&[Tag::Badges]).await;
        self.client.badge_counts().await
    }
}
