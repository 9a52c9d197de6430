use serde::Deserialize;

use crate::api::client::ApiClient;
use crate::api::error::ApiError;
use crate::model::{Category, SubCategory, Technician};
use crate::notify::Tag;

/// The category endpoint nests its list one level deeper than the other
/// masterlists.
#[derive(Debug, Deserialize)]
struct CategoryList {
    #[serde(default)]
    category: Vec<Category>,
}

impl ApiClient {
    /// Active categories. The closing form filters these by the
    /// ticket's channel.
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let key = format!("{}:categories", Tag::Masterlist.prefix());
        let list: CategoryList = self
            .get_enveloped("category", Some(&[("Status", true)]), Some(key))
            .await?;
        Ok(list.category)
    }

    /// Sub-categories belonging to the given parent categories. The
    /// option list drives the closing form's dependent-field cascade.
    pub async fn list_sub_categories(
        &self,
        category_ids: &[u64],
    ) -> Result<Vec<SubCategory>, ApiError> {
        let query: Vec<(&str, u64)> = category_ids.iter().map(|id| ("CategoryId", *id)).collect();
        let mut key = format!("{}:sub-categories", Tag::Masterlist.prefix());
        for id in category_ids {
            key.push_str(&format!(":{id}"));
        }
        self.get_enveloped("sub-category/sub-category-array", Some(&query), Some(key))
            .await
    }

    pub async fn list_technicians(&self) -> Result<Vec<Technician>, ApiError> {
        let key = format!("{}:technicians", Tag::Masterlist.prefix());
        self.get_enveloped("technician", None::<&()>, Some(key))
            .await
    }
}
