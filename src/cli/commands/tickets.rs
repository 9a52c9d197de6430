use anyhow::Result;

use crate::workflow::closing::CategoryRef;
use crate::workflow::pager::{reduce, Debouncer, PagerAction, PagerState};

pub struct TicketsCommand {
    pub search: String,
    pub page: u32,
    pub page_size: Option<u32>,
}

impl TicketsCommand {
    pub async fn execute(&self) -> Result<()> {
        let (client, _hub) = super::connect()?;
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

        let page = client.list_open_tickets(&state.request()).await?;

        println!("🔧 Open tickets");
        println!("==========================================");
        if page.items.is_empty() {
            println!("   Nothing assigned to you right now.");
        }
        for ticket in &page.items {
            let description: String = ticket.concern_description.chars().take(48).collect();
            let categories: Vec<String> = ticket
                .get_open_ticket_categories
                .iter()
                .map(|c| CategoryRef::from(c).description)
                .collect();
            println!(
                "   #{:<6} {:<10} {:<28} {}",
                ticket.ticket_concern_id,
                ticket.channel_name,
                if categories.is_empty() {
                    "(no category yet)".to_string()
                } else {
                    categories.join(", ")
                },
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
