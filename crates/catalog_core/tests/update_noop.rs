use catalog_core::{update, Msg, OrderPolicy, StoreState};

#[test]
fn update_is_noop() {
    let state = StoreState::new(OrderPolicy::default());
    let (mut next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
}
