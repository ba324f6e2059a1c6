use crate::state::layout;
use crate::{EngineState, HoleAction};

pub(super) fn claims(action: &HoleAction) -> bool {
    match action {
        HoleAction::Toggle(id) => layout::hole(*id).is_some(),
    }
}

pub(super) fn reduce(action: &HoleAction, state: &mut EngineState) {
    match action {
        HoleAction::Toggle(id) => {
            let Some(hole) = layout::hole(*id) else {
                return;
            };
            let pc = hole.sounding_pitch(&state.scale());
            if state.active.contains(pc) {
                state.deactivate(pc);
            } else {
                state.activate(pc);
            }
        }
    }
}
