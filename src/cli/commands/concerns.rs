use anyhow::Result;

use crate::api::ListParams;
use crate::workflow::pager::{reduce, Debouncer, PagerAction, PagerState};

pub struct ConcernsCommand {
    pub search: String,
    pub page: u32,
    pub page_size: Option<u32>,
}

impl ConcernsCommand {
    pub async fn execute(&self) -> Result<()> {
        let (client, hub) = super::connect()?;
        let config = crate::config::config()?;

        let mut state = PagerState::new(config.workflow.default_page_size);
        if !self.search.is_empty() {
            state = reduce(&state, PagerAction::SearchChanged(self.search.clone()));
            let debouncer = Debouncer::new(std::time::Duration::from_millis(
                config.workflow.search_debounce_ms,
            ));
            if let Some(settled) = debouncer.push(self.search.clone()).await {
                state = reduce(&state, PagerAction::SearchSettled(settled));
            }
        }
        if let Some(size) = self.page_size {
            state = reduce(&state, PagerAction::PageSizeChanged(size));
        }
        state = reduce(&state, PagerAction::PageChanged(self.page));

        let params: ListParams = state.request();
        let badges = hub.refresh_badges().await?;
        let page = client.list_receiver_concerns(&params).await?;

        println!(
            "📥 Receiver concerns ({} unread)",
            badges.receiver_concerns_notif
        );
        println!("==========================================");
        if page.items.is_empty() {
            println!("   No pending concerns.");
        }
        for concern in &page.items {
            let description: String = concern.concern.chars().take(60).collect();
            println!(
                "   #{:<6} {:<12} {:<16} {}",
                concern.request_concern_id,
                format!("{:?}", concern.concern_status),
                concern.requestor_name,
                description
            );
        }
        println!();
        println!(
            "   page {}/{} · {} total · page size {}",
            page.current_page,
            page.total_pages().max(1),
            page.total_count,
            page.page_size
        );
        Ok(())
    }
}
