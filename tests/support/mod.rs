//! Shared mock-backend harness for the integration tests.
//!
//! Wiremock stands in for the ticketing backend so workflow paths run
//! deterministically with no network dependency.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fixdesk::config::{BackendConfig, CacheConfig, RateLimitConfig};
use fixdesk::ApiClient;

pub struct BackendMock {
    pub server: MockServer,
}

#[allow(dead_code)] // Each test binary uses the slice of the harness it needs
impl BackendMock {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.config()).expect("token is set")
    }

    pub fn config(&self) -> BackendConfig {
        BackendConfig {
            base_url: self.server.uri(),
            token: Some("mock-token".to_string()),
            rate_limit: RateLimitConfig {
                requests_per_minute: 6000,
                burst_capacity: 100,
            },
            cache: CacheConfig {
                max_entries: 100,
                ttl_seconds: 300,
            },
        }
    }

    /// Mock one approval-queue page with the given ticket ids.
    pub async fn mock_ticket_queue(&self, ids: &[u64], total: u64, expect: u64) {
        let items: Vec<serde_json::Value> = ids
            .iter()
            .map(|id| {
                json!({
                    "ticketConcernId": id,
                    "concernDescription": format!("Concern for ticket {id}"),
                    "issueHandler": "H. Cruz",
                    "channelId": 1,
                    "channelName": "MIS",
                    "getOpenTicketCategories": [],
                    "getOpenTicketSubCategories": [],
                    "targetDate": null,
                    "ticketStatus": "ForApproval"
                })
            })
            .collect();
        let body = json!({
            "value": {
                "closingTicket": items,
                "totalCount": total,
                "currentPage": 1,
                "pageSize": 5
            }
        });
        Mock::given(method("GET"))
            .and(path("/closing-ticket/page"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(expect)
            .mount(&self.server)
            .await;
    }

    /// Mock the notification badge feed.
    pub async fn mock_badges(&self, closing: u64, expect: u64) {
        let body = json!({
            "value": {
                "forApprovalClosingNotif": closing,
                "forApprovalTransferNotif": 2,
                "onHoldNotif": 0,
                "receiverConcernsNotif": 1
            }
        });
        Mock::given(method("GET"))
            .and(path("/notification"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(expect)
            .mount(&self.server)
            .await;
    }

    /// Mock the closing mutation endpoint.
    pub async fn mock_close_ticket(&self, response: ResponseTemplate, expect: u64) {
        Mock::given(method("POST"))
            .and(path("/closing-ticket/close-ticket"))
            .respond_with(response)
            .expect(expect)
            .mount(&self.server)
            .await;
    }
}
