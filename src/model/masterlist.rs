use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: u64,
    pub channel_id: u64,
    pub category_description: String,
}

/// Sub-categories always belong to one parent category; the closing form
/// relies on `category_id` for its cross-field check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategory {
    pub sub_category_id: u64,
    pub category_id: u64,
    pub sub_category_description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Technician {
    pub technician_id: u64,
    pub technician_name: String,
}
