use std::sync::Once;

use catalog_core::{update, CycleStatus, Effect, Msg, OrderPolicy, Record, StoreState};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(catalog_logging::initialize_for_tests);
}

fn records() -> Vec<Record> {
    vec![
        Record::new(1, 2, Some("Item 3".to_string()), 1.0, 1),
        Record::new(2, 1, Some("Item 1".to_string()), 2.0, 2),
        Record::new(3, 1, None, 3.0, 3),
        Record::new(4, 2, Some("Item 1".to_string()), 0.5, 1),
    ]
}

fn ids(state: &StoreState) -> Vec<i64> {
    state.items().iter().map(Record::id).collect()
}

fn started() -> StoreState {
    let (state, _) = update(StoreState::new(OrderPolicy::ByNameRank), Msg::RefreshRequested);
    state
}

#[test]
fn new_state_is_idle_and_empty() {
    let state = StoreState::new(OrderPolicy::ByPrice);
    assert_eq!(state.status(), CycleStatus::Idle);
    assert!(state.items().is_empty());
    assert_eq!(state.error(), None);
    assert_eq!(state.policy(), OrderPolicy::ByPrice);
    assert_eq!(state.cycle(), 0);
}

#[test]
fn refresh_starts_fetching_and_emits_start_fetch() {
    init_logging();
    let (mut state, effects) =
        update(StoreState::new(OrderPolicy::ByNameRank), Msg::RefreshRequested);

    assert_eq!(state.status(), CycleStatus::Fetching);
    assert_eq!(effects, vec![Effect::StartFetch { cycle: 1 }]);
    assert!(state.consume_dirty());
    assert!(state.snapshot().is_loading());
}

#[test]
fn refresh_while_fetching_cancels_and_replaces() {
    let state = started();
    let (state, effects) = update(state, Msg::RefreshRequested);

    assert_eq!(state.cycle(), 2);
    assert_eq!(
        effects,
        vec![Effect::CancelInFlight, Effect::StartFetch { cycle: 2 }]
    );
}

#[test]
fn success_publishes_ordered_items() {
    init_logging();
    let mut state = started();
    state.consume_dirty();

    let (mut state, effects) = update(
        state,
        Msg::FetchSucceeded {
            cycle: 1,
            records: records(),
        },
    );

    assert_eq!(state.status(), CycleStatus::Published);
    assert_eq!(ids(&state), vec![2, 4, 1]);
    assert_eq!(state.error(), None);
    assert!(effects.is_empty());
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
}

#[test]
fn empty_success_publishes_empty_items_without_error() {
    let (state, _) = update(
        started(),
        Msg::FetchSucceeded {
            cycle: 1,
            records: Vec::new(),
        },
    );

    let snapshot = state.snapshot();
    assert_eq!(snapshot.status, CycleStatus::Published);
    assert!(snapshot.items.is_empty());
    assert_eq!(snapshot.error, None);
    assert!(!snapshot.is_loading());
}

#[test]
fn failure_sets_error_and_keeps_items() {
    let (state, _) = update(
        started(),
        Msg::FetchSucceeded {
            cycle: 1,
            records: records(),
        },
    );
    let (state, _) = update(state, Msg::RefreshRequested);
    let (state, effects) = update(
        state,
        Msg::FetchFailed {
            cycle: 2,
            message: "Failed to load data: network error".to_string(),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.status(), CycleStatus::Failed);
    assert_eq!(state.error(), Some("Failed to load data: network error"));
    assert_eq!(ids(&state), vec![2, 4, 1]);
}

#[test]
fn first_cycle_failure_leaves_items_empty() {
    let (state, _) = update(
        started(),
        Msg::FetchFailed {
            cycle: 1,
            message: "boom".to_string(),
        },
    );

    assert!(state.items().is_empty());
    assert_eq!(state.error(), Some("boom"));
    assert!(!state.snapshot().is_loading());
}

#[test]
fn success_clears_previous_error() {
    let (state, _) = update(
        started(),
        Msg::FetchFailed {
            cycle: 1,
            message: "boom".to_string(),
        },
    );
    let (state, _) = update(state, Msg::RefreshRequested);
    assert_eq!(state.error(), Some("boom"));

    let (state, _) = update(
        state,
        Msg::FetchSucceeded {
            cycle: 2,
            records: records(),
        },
    );
    assert_eq!(state.error(), None);
    assert_eq!(state.status(), CycleStatus::Published);
}

#[test]
fn stale_results_are_ignored() {
    let state = started();
    let (mut state, _) = update(state, Msg::RefreshRequested);
    state.consume_dirty();

    let (mut state, effects) = update(
        state,
        Msg::FetchSucceeded {
            cycle: 1,
            records: records(),
        },
    );
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
    assert_eq!(state.status(), CycleStatus::Fetching);
    assert!(state.items().is_empty());

    let (mut state, _) = update(
        state,
        Msg::FetchFailed {
            cycle: 1,
            message: "late".to_string(),
        },
    );
    assert!(!state.consume_dirty());
    assert_eq!(state.error(), None);
}

#[test]
fn duplicate_completion_for_a_settled_cycle_is_ignored() {
    let (state, _) = update(
        started(),
        Msg::FetchSucceeded {
            cycle: 1,
            records: records(),
        },
    );
    let (state, _) = update(
        state,
        Msg::FetchFailed {
            cycle: 1,
            message: "late".to_string(),
        },
    );

    assert_eq!(state.status(), CycleStatus::Published);
    assert_eq!(state.error(), None);
}

#[test]
fn policy_change_reorders_without_refetch() {
    let input = vec![
        Record::new(1, 1, Some("Item 1".to_string()), 9.0, 0),
        Record::new(2, 1, Some("Item 2".to_string()), 1.0, 0),
    ];
    let (state, _) = update(
        started(),
        Msg::FetchSucceeded {
            cycle: 1,
            records: input,
        },
    );
    assert_eq!(ids(&state), vec![1, 2]);

    let (mut state, effects) = update(state, Msg::PolicyChanged(OrderPolicy::ByPrice));
    assert!(effects.is_empty());
    assert_eq!(state.policy(), OrderPolicy::ByPrice);
    assert_eq!(ids(&state), vec![2, 1]);
    assert!(state.consume_dirty());

    let (mut state, effects) = update(state, Msg::PolicyChanged(OrderPolicy::ByPrice));
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
}

#[test]
fn unranked_names_are_reported_as_effect() {
    let input = vec![
        Record::new(1, 1, Some("Widget".to_string()), 1.0, 0),
        Record::new(2, 1, Some("Item 2".to_string()), 1.0, 0),
    ];
    let (state, effects) = update(
        started(),
        Msg::FetchSucceeded {
            cycle: 1,
            records: input,
        },
    );

    assert_eq!(ids(&state), vec![2, 1]);
    match effects.as_slice() {
        [Effect::ReportRankFailures(failures)] => {
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].id, 1);
            assert_eq!(failures[0].name, "Widget");
        }
        other => panic!("unexpected effects: {other:?}"),
    }
}

#[test]
fn view_groups_consecutive_items() {
    let (state, _) = update(
        started(),
        Msg::FetchSucceeded {
            cycle: 1,
            records: records(),
        },
    );
    let view = state.view();

    assert_eq!(view.status, CycleStatus::Published);
    assert_eq!(view.item_count, 3);
    let groups: Vec<(i64, Vec<i64>)> = view
        .groups
        .iter()
        .map(|group| (group.group_id, group.rows.iter().map(|row| row.id).collect()))
        .collect();
    assert_eq!(groups, vec![(1, vec![2]), (2, vec![4, 1])]);
    assert_eq!(view.groups[1].rows[0].name, "Item 1");
    assert_eq!(view.groups[1].rows[0].price, 0.5);
}
