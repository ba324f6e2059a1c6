use crate::{EngineState, InputAuthority, Key, KeyAction};

pub(super) fn reduce(action: &KeyAction, state: &mut EngineState) {
    let key = match *action {
        KeyAction::SetRoot(root) => Key::new(root, state.key.mode),
        KeyAction::SetMode(mode) => Key::new(state.key.root, mode),
        KeyAction::Set(key) => key,
    };
    if key == state.key {
        return;
    }
    // Hole bindings and any preset were computed against the old key.
    state.key = key;
    state.clear_pitches();
    state.authority = InputAuthority::Manual;
}
