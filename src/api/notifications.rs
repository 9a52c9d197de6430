use crate::api::client::ApiClient;
use crate::api::error::ApiError;
use crate::model::BadgeCounts;
use crate::notify::Tag;

impl ApiClient {
    /// Current unread counts by category. Cached under the badge tag so
    /// mutations that change a queue can force the next read to hit the
    /// backend.
    pub async fn badge_counts(&self) -> Result<BadgeCounts, ApiError> {
        let key = format!("{}:counts", Tag::Badges.prefix());
        self.get_enveloped("notification", None::<&()>, Some(key))
            .await
    }
}
