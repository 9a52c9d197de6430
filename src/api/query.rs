use serde::{Deserialize, Serialize};

/// Query parameters every list endpoint accepts. Serialized PascalCase
/// with nulls skipped, matching the backend's query-string contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListParams {
    pub search: String,
    pub page_number: u32,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
}

impl ListParams {
    pub fn new(search: impl Into<String>, page_number: u32, page_size: u32) -> Self {
        Self {
            search: search.into(),
            page_number,
            page_size,
            status: None,
        }
    }

    pub fn with_status(mut self, status: bool) -> Self {
        self.status = Some(status);
        self
    }

    /// Stable cache-key fragment for this request.
    pub fn cache_key(&self) -> String {
        format!(
            "search={}&page={}&size={}&status={}",
            self.search,
            self.page_number,
            self.page_size,
            self.status.map(|s| s.to_string()).unwrap_or_default()
        )
    }
}

/// Every backend response wraps its payload in `value`.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub value: T,
}

/// Paged payload: the entity list plus paging counters. The list field
/// name differs per endpoint, so each endpoint aliases it onto `items`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(
        alias = "requestConcern",
        alias = "closingTicket",
        alias = "transferTicket",
        alias = "onHoldTicket",
        alias = "openTicket"
    )]
    pub items: Vec<T>,
    pub total_count: u64,
    pub current_page: u32,
    pub page_size: u32,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u32 {
        if self.page_size == 0 {
            return 0;
        }
        self.total_count.div_ceil(self.page_size as u64) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_serialize_pascal_case_and_skip_none() {
        let params = ListParams::new("cable", 2, 5);
        let qs = serde_json::to_value(&params).unwrap();
        assert_eq!(qs["Search"], "cable");
        assert_eq!(qs["PageNumber"], 2);
        assert_eq!(qs["PageSize"], 5);
        assert!(qs.get("Status").is_none());

        let qs = serde_json::to_value(ListParams::new("", 1, 5).with_status(true)).unwrap();
        assert_eq!(qs["Status"], true);
    }

    #[test]
    fn page_decodes_aliased_list_field() {
        let json = r#"{
            "closingTicket": [1, 2, 3],
            "totalCount": 11,
            "currentPage": 1,
            "pageSize": 5
        }"#;
        let page: Page<u64> = serde_json::from_str(json).unwrap();
        assert_eq!(page.items, vec![1, 2, 3]);
        assert_eq!(page.total_pages(), 3);
    }
}
