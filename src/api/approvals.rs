use serde::Serialize;

use crate::api::client::ApiClient;
use crate::api::error::ApiError;
use crate::api::query::{ListParams, Page};
use crate::model::OpenTicket;
use crate::notify::Tag;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApproveClosingBody {
    approve_closing_requests: Vec<ClosingTicketRef>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ClosingTicketRef {
    closing_ticket_id: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApproveTransferBody {
    approve_transfer_requests: Vec<TransferTicketRef>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TransferTicketRef {
    transfer_ticket_concern_id: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApproveOnHoldBody {
    approve_on_hold_requests: Vec<OnHoldTicketRef>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OnHoldTicketRef {
    on_hold_ticket_id: u64,
}

impl ApiClient {
    /// Tickets queue: closing requests awaiting approval.
    pub async fn list_ticket_approvals(
        &self,
        params: &ListParams,
    ) -> Result<Page<OpenTicket>, ApiError> {
        let key = format!("{}:tickets:{}", Tag::Queues.prefix(), params.cache_key());
        self.get_enveloped("closing-ticket/page", Some(params), Some(key))
            .await
    }

    /// For Transfer queue.
    pub async fn list_transfer_approvals(
        &self,
        params: &ListParams,
    ) -> Result<Page<OpenTicket>, ApiError> {
        let key = format!("{}:transfer:{}", Tag::Queues.prefix(), params.cache_key());
        self.get_enveloped("transfer-ticket/page", Some(params), Some(key))
            .await
    }

    /// On Hold queue.
    pub async fn list_on_hold_approvals(
        &self,
        params: &ListParams,
    ) -> Result<Page<OpenTicket>, ApiError> {
        let key = format!("{}:on-hold:{}", Tag::Queues.prefix(), params.cache_key());
        self.get_enveloped("on-hold-ticket/page", Some(params), Some(key))
            .await
    }

    pub async fn approve_closing(&self, closing_ticket_id: u64) -> Result<(), ApiError> {
        let body = ApproveClosingBody {
            approve_closing_requests: vec![ClosingTicketRef { closing_ticket_id }],
        };
        self.post_json("closing-ticket/approval", &body).await
    }

    pub async fn approve_transfer(&self, transfer_ticket_concern_id: u64) -> Result<(), ApiError> {
        let body = ApproveTransferBody {
            approve_transfer_requests: vec![TransferTicketRef {
                transfer_ticket_concern_id,
            }],
        };
        self.post_json("transfer-ticket/approval", &body).await
    }

    pub async fn approve_on_hold(&self, on_hold_ticket_id: u64) -> Result<(), ApiError> {
        let body = ApproveOnHoldBody {
            approve_on_hold_requests: vec![OnHoldTicketRef { on_hold_ticket_id }],
        };
        self.post_json("on-hold-ticket/approval", &body).await
    }
}
