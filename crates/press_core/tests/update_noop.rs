use press_core::{update, EngageFeatures, EngageState, LikeBook, Msg};

#[test]
fn update_is_noop() {
    let state = EngageState::new("post", EngageFeatures::all_enabled(), LikeBook::new());
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
