//! Property tests for the paginated query controller reducer.

use proptest::prelude::*;

use fixdesk::workflow::pager::{reduce, PagerAction, PagerState, QueueTab};

fn arb_tab() -> impl Strategy<Value = QueueTab> {
    prop_oneof![
        Just(QueueTab::Tickets),
        Just(QueueTab::ForTransfer),
        Just(QueueTab::OnHold),
    ]
}

fn arb_action() -> impl Strategy<Value = PagerAction> {
    prop_oneof![
        "[a-z ]{0,12}".prop_map(PagerAction::SearchChanged),
        "[a-z ]{0,12}".prop_map(PagerAction::SearchSettled),
        arb_tab().prop_map(PagerAction::TabChanged),
        (0u32..50).prop_map(PagerAction::PageChanged),
        (0u32..100).prop_map(PagerAction::PageSizeChanged),
    ]
}

proptest! {
    /// Page number and size stay positive under any action sequence.
    #[test]
    fn paging_counters_stay_positive(actions in prop::collection::vec(arb_action(), 0..40)) {
        let mut state = PagerState::new(5);
        for action in actions {
            state = reduce(&state, action);
            prop_assert!(state.page_number >= 1);
            prop_assert!(state.page_size >= 1);
        }
    }

    /// Any search-text change lands the controller on page 1.
    #[test]
    fn search_change_always_resets_to_page_one(
        actions in prop::collection::vec(arb_action(), 0..20),
        text in "[a-z]{1,8}",
    ) {
        let mut state = PagerState::new(5);
        for action in actions {
            state = reduce(&state, action);
        }
        let state = reduce(&state, PagerAction::SearchChanged(text));
        prop_assert_eq!(state.page_number, 1);
    }

    /// Tab changes reset page, size, and search regardless of history.
    #[test]
    fn tab_change_restores_defaults(
        actions in prop::collection::vec(arb_action(), 0..20),
        tab in arb_tab(),
    ) {
        let mut state = PagerState::new(5);
        for action in actions {
            state = reduce(&state, action);
        }
        let state = reduce(&state, PagerAction::TabChanged(tab));
        prop_assert_eq!(state.page_number, 1);
        prop_assert_eq!(state.page_size, 5);
        prop_assert_eq!(state.request().search, "");
    }

    /// The debounced request never carries text the user has already
    /// replaced: a settle only applies when it matches the live input.
    #[test]
    fn request_search_matches_input_after_settle(
        first in "[a-z]{1,8}",
        second in "[a-z]{1,8}",
    ) {
        let state = PagerState::new(5);
        let state = reduce(&state, PagerAction::SearchChanged(first.clone()));
        let state = reduce(&state, PagerAction::SearchChanged(second.clone()));
        let state = reduce(&state, PagerAction::SearchSettled(first.clone()));
        if first != second {
            prop_assert_eq!(state.request().search, "");
        }
        let state = reduce(&state, PagerAction::SearchSettled(second.clone()));
        prop_assert_eq!(state.request().search, second);
    }
}
