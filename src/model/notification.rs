use serde::{Deserialize, Serialize};

/// Unread counts the notification feed exposes. Queue tabs render these
/// as badges; the feed is the single source for all of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeCounts {
    #[serde(default)]
    pub for_approval_closing_notif: u64,
    #[serde(default)]
    pub for_approval_transfer_notif: u64,
    #[serde(default)]
    pub on_hold_notif: u64,
    #[serde(default)]
    pub receiver_concerns_notif: u64,
}

impl BadgeCounts {
    pub fn total(&self) -> u64 {
        self.for_approval_closing_notif
            + self.for_approval_transfer_notif
            + self.on_hold_notif
            + self.receiver_concerns_notif
    }
}
