use anyhow::Result;

use crate::workflow::pager::{reduce, Debouncer, PagerAction, PagerState, QueueTab};

pub struct QueuesCommand {
    pub tab: String,
    pub search: String,
    pub page: u32,
    pub page_size: Option<u32>,
}

impl QueuesCommand {
    pub async fn execute(&self) -> Result<()> {
        let (client, hub) = super::connect()?;
        let config = crate::config::config()?;

        let tab: QueueTab = self.tab.parse().map_err(|e: String| anyhow::anyhow!(e))?;

        // Same reduction path the list pages use: tab first (resets
        // everything), then search through the debouncer, then paging.
        let mut state = PagerState::new(config.workflow.default_page_size);
        state = reduce(&state, PagerAction::TabChanged(tab));
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

        let params = state.request();
        let badges = hub.refresh_badges().await?;
        let (label, badge, page) = match tab {
            QueueTab::Tickets => (
                "Tickets",
                badges.for_approval_closing_notif,
                client.list_ticket_approvals(&params).await?,
            ),
            QueueTab::ForTransfer => (
                "For Transfer",
                badges.for_approval_transfer_notif,
                client.list_transfer_approvals(&params).await?,
            ),
            QueueTab::OnHold => (
                "On Hold",
                badges.on_hold_notif,
                client.list_on_hold_approvals(&params).await?,
            ),
        };

        println!("📋 {label} ({badge} unread)");
        println!("==========================================");
        if page.items.is_empty() {
            println!("   Nothing waiting on this queue.");
        }
        for ticket in &page.items {
            let description: String = ticket.concern_description.chars().take(60).collect();
            println!(
                "   #{:<6} {:<12} {}",
                ticket.ticket_concern_id,
                format!("{:?}", ticket.ticket_status),
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
        client.metrics().log_stats();
        Ok(())
    }
}
