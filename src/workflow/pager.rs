//! Paginated query controller shared by every list page.
//!
//! A pure reducer owns {search, page, size, tab}; the debouncer holds
//! fast typing back for one interval before the search term enters the
//! request. No network code lives here; the fetch collaborator only
//! ever sees the `ListParams` this module produces.

use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::api::query::ListParams;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Approver queue tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueueTab {
    #[default]
    Tickets,
    ForTransfer,
    OnHold,
}

impl FromStr for QueueTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tickets" => Ok(QueueTab::Tickets),
            "transfer" | "for-transfer" => Ok(QueueTab::ForTransfer),
            "on-hold" | "hold" => Ok(QueueTab::OnHold),
            other => Err(format!(
                "unknown tab '{other}' (expected tickets, transfer, or on-hold)"
            )),
        }
    }
}

/// Controller state. `search_input` is what the user typed;
/// `debounced_search` is what the request carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerState {
    pub tab: QueueTab,
    pub search_input: String,
    pub debounced_search: String,
    pub page_number: u32,
    pub page_size: u32,
    pub default_page_size: u32,
}

impl PagerState {
    pub fn new(default_page_size: u32) -> Self {
        Self {
            tab: QueueTab::default(),
            search_input: String::new(),
            debounced_search: String::new(),
            page_number: 1,
            page_size: default_page_size,
            default_page_size,
        }
    }

    /// Request description for the fetch collaborator.
    pub fn request(&self) -> ListParams {
        ListParams::new(
            self.debounced_search.clone(),
            self.page_number,
            self.page_size,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagerAction {
    /// A keystroke changed the search box.
    SearchChanged(String),
    /// The debounce interval elapsed for this value.
    SearchSettled(String),
    TabChanged(QueueTab),
    PageChanged(u32),
    PageSizeChanged(u32),
}

/// `(state, action) -> state'`. Every rule that resets the page number
/// lives here and nowhere else.
pub fn reduce(state: &PagerState, action: PagerAction) -> PagerState {
    let mut next = state.clone();
    match action {
        PagerAction::SearchChanged(text) => {
            next.search_input = text;
            next.page_number = 1;
        }
        PagerAction::SearchSettled(text) => {
            // A settled value for stale input is dropped, not applied.
            if text == next.search_input {
                next.debounced_search = text;
            }
        }
        PagerAction::TabChanged(tab) => {
            next.tab = tab;
            next.page_number = 1;
            next.page_size = next.default_page_size;
            next.search_input.clear();
            next.debounced_search.clear();
        }
        PagerAction::PageChanged(page) => {
            next.page_number = page.max(1);
        }
        PagerAction::PageSizeChanged(size) => {
            next.page_size = size.max(1);
            next.page_number = 1;
        }
    }
    next
}

/// Debounces search input. Each `push` supersedes the previous one; the
/// returned future resolves to the value only if no newer push arrived
/// during the delay.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn push(&self, value: String) -> impl std::future::Future<Output = Option<String>> {
        let mine = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let generation = Arc::clone(&self.generation);
        let delay = self.delay;
        async move {
            tokio::time::sleep(delay).await;
            if generation.load(Ordering::SeqCst) == mine {
                Some(value)
            } else {
                None
            }
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> PagerState {
        PagerState::new(5)
    }

    #[test]
    fn search_change_resets_page() {
        let paged = reduce(&state(), PagerAction::PageChanged(4));
        assert_eq!(paged.page_number, 4);

        let searched = reduce(&paged, PagerAction::SearchChanged("cable".into()));
        assert_eq!(searched.page_number, 1);
        assert_eq!(searched.search_input, "cable");
        // Not in the request until the debounce settles.
        assert_eq!(searched.request().search, "");

        let settled = reduce(&searched, PagerAction::SearchSettled("cable".into()));
        assert_eq!(settled.request().search, "cable");
    }

    #[test]
    fn stale_settle_is_dropped() {
        let s = reduce(&state(), PagerAction::SearchChanged("ca".into()));
        let s = reduce(&s, PagerAction::SearchChanged("cable".into()));
        let s = reduce(&s, PagerAction::SearchSettled("ca".into()));
        assert_eq!(s.debounced_search, "");

        let s = reduce(&s, PagerAction::SearchSettled("cable".into()));
        assert_eq!(s.debounced_search, "cable");
    }

    #[test]
    fn tab_change_resets_everything() {
        let s = reduce(&state(), PagerAction::SearchChanged("printer".into()));
        let s = reduce(&s, PagerAction::SearchSettled("printer".into()));
        let s = reduce(&s, PagerAction::PageSizeChanged(25));
        let s = reduce(&s, PagerAction::PageChanged(3));

        let s = reduce(&s, PagerAction::TabChanged(QueueTab::OnHold));
        assert_eq!(s.tab, QueueTab::OnHold);
        assert_eq!(s.page_number, 1);
        assert_eq!(s.page_size, 5);
        assert_eq!(s.search_input, "");
        assert_eq!(s.debounced_search, "");
    }

    #[test]
    fn page_size_change_resets_page_number() {
        let s = reduce(&state(), PagerAction::PageChanged(7));
        let s = reduce(&s, PagerAction::PageSizeChanged(10));
        assert_eq!(s.page_number, 1);
        assert_eq!(s.page_size, 10);
    }

    #[tokio::test(start_paused = true)]
    async fn debouncer_keeps_only_the_latest_value() {
        let debouncer = Debouncer::new(Duration::from_millis(500));

        let first = debouncer.push("ca".into());
        let second = debouncer.push("cable".into());

        let (first, second) = tokio::join!(first, second);
        assert_eq!(first, None);
        assert_eq!(second, Some("cable".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn search_settles_within_one_interval() {
        let debouncer = Debouncer::default();
        let mut s = reduce(&state(), PagerAction::SearchChanged("cable".into()));

        let settled = debouncer.push(s.search_input.clone()).await;
        if let Some(value) = settled {
            s = reduce(&s, PagerAction::SearchSettled(value));
        }
        assert_eq!(s.request().search, "cable");
        assert_eq!(s.request().page_number, 1);
    }

    #[test]
    fn tab_labels_parse() {
        assert_eq!("tickets".parse::<QueueTab>().unwrap(), QueueTab::Tickets);
        assert_eq!(
            "for-transfer".parse::<QueueTab>().unwrap(),
            QueueTab::ForTransfer
        );
        assert_eq!("hold".parse::<QueueTab>().unwrap(), QueueTab::OnHold);
        assert!("closed".parse::<QueueTab>().is_err());
    }
}
