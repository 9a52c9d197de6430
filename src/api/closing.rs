use crate::api::client::ApiClient;
use crate::api::error::ApiError;
use crate::api::query::{ListParams, Page};
use crate::model::history::TicketHistory;
use crate::model::OpenTicket;
use crate::notify::Tag;

impl ApiClient {
    /// Open tickets assigned to the calling issue handler.
    pub async fn list_open_tickets(
        &self,
        params: &ListParams,
    ) -> Result<Page<OpenTicket>, ApiError> {
        let key = format!("{}:open:{}", Tag::Queues.prefix(), params.cache_key());
        self.get_enveloped("open-ticket/page", Some(params), Some(key))
            .await
    }

    /// Submit the closing record (multipart; see `workflow::closing` for
    /// the payload layout).
    pub async fn close_ticket(&self, form: reqwest::multipart::Form) -> Result<(), ApiError> {
        self.post_multipart("closing-ticket/close-ticket", form)
            .await
    }

    /// Upcoming approver steps and completed history for one ticket.
    pub async fn ticket_history(&self, ticket_concern_id: u64) -> Result<TicketHistory, ApiError> {
        let histories: Vec<TicketHistory> = self
            .get_enveloped(
                &format!("ticketing/history/{ticket_concern_id}"),
                None::<&()>,
                None,
            )
            .await?;
        histories
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::Decode {
                url: format!("ticketing/history/{ticket_concern_id}"),
                detail: "history payload was empty".to_string(),
            })
    }
}
