use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::concern::ConcernStatus;

/// A concern once routed to an issue handler. Category and sub-category
/// stay empty until the closing form assigns them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenTicket {
    pub ticket_concern_id: u64,
    pub concern_description: String,
    pub issue_handler: Option<String>,
    pub channel_id: u64,
    pub channel_name: String,
    #[serde(default)]
    pub get_open_ticket_categories: Vec<TicketCategory>,
    #[serde(default)]
    pub get_open_ticket_sub_categories: Vec<TicketSubCategory>,
    pub target_date: Option<DateTime<Utc>>,
    pub ticket_status: ConcernStatus,
}

/// Category already attached to a ticket on the server side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketCategory {
    pub ticket_category_id: u64,
    pub category_id: u64,
    pub category_description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketSubCategory {
    pub ticket_sub_category_id: u64,
    pub sub_category_id: u64,
    pub sub_category_description: String,
}
