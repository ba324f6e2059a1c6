//! Pure state reducers for the khaen engine.
//!
//! These functions are the single source of truth for action → state changes.
//! A reduction takes a published snapshot and returns the next one; the input
//! is never touched, so a reader holding the old snapshot never sees a
//! half-applied update.
//!
//! Every path that writes the active set first claims it through
//! [`enter`]: manual clicks and MIDI drop the preset selection before they
//! touch the set, and only the preset path writes a selection.

mod hole;
mod key;
mod midi;
mod preset;

use crate::{Action, EngineState, InputAuthority};

/// The authority an action claims over the active set, if it writes it.
pub fn claimed_authority(action: &Action, state: &EngineState) -> Option<InputAuthority> {
    match action {
        Action::Hole(a) => hole::claims(a).then_some(InputAuthority::Manual),
        Action::Preset(a) => preset::claims(a, state).then_some(InputAuthority::Preset),
        Action::Midi(a) => midi::claims(a).then_some(InputAuthority::External),
        Action::None | Action::Key(_) | Action::ClearAll => None,
    }
}

/// Reduce `action` against `state`. The result carries `revision + 1` when
/// anything changed and is equal to `state` otherwise.
pub fn reduce_action(action: &Action, state: &EngineState) -> EngineState {
    let mut next = state.clone();

    if let Some(authority) = claimed_authority(action, state) {
        enter(&mut next, authority);
    }

    match action {
        Action::None => {}
        Action::Key(a) => key::reduce(a, &mut next),
        Action::Hole(a) => hole::reduce(a, &mut next),
        Action::Preset(a) => preset::reduce(a, &mut next),
        Action::Midi(a) => midi::reduce(a, &mut next),
        Action::ClearAll => {
            next.clear_pitches();
            next.authority = InputAuthority::Manual;
        }
    }

    if next != *state {
        next.revision = state.revision + 1;
    }
    next
}

/// Hand the active set to `authority`. Only the preset path keeps a selection.
fn enter(state: &mut EngineState, authority: InputAuthority) {
    state.authority = authority;
    if authority != InputAuthority::Preset {
        state.selection = crate::ChordSelection::none();
    }
}
