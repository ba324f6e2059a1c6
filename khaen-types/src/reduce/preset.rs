use crate::{ChordSelection, EngineState, InputAuthority, PresetAction};

/// Selecting writes the active set. Extent and modifier edits only do so
/// while a preset is already selected.
pub(super) fn claims(action: &PresetAction, state: &EngineState) -> bool {
    match action {
        PresetAction::SelectDegree(degree) => *degree < 7,
        PresetAction::SelectChord { .. } | PresetAction::Clear => true,
        PresetAction::SetExtent(_) | PresetAction::ToggleModifier(_) => {
            state.selection.is_active()
        }
    }
}

pub(super) fn reduce(action: &PresetAction, state: &mut EngineState) {
    match *action {
        PresetAction::SelectDegree(degree) => {
            if degree >= 7 {
                return;
            }
            let scale = state.scale();
            select(state, scale.pitch(degree), scale.qualities[degree]);
        }
        PresetAction::SelectChord { root, quality } => select(state, root, quality),
        PresetAction::SetExtent(extent) => {
            state.extent = extent;
            if state.selection.is_active() {
                state.selection.extent = Some(extent);
                recompute(state);
            }
        }
        PresetAction::ToggleModifier(modifier) => {
            if state.selection.is_active() {
                state.selection.modifiers.toggle(modifier);
                recompute(state);
            }
        }
        PresetAction::Clear => release(state),
    }
}

fn select(state: &mut EngineState, root: crate::PitchClass, quality: crate::TriadQuality) {
    let same = state.selection.root == Some(root) && state.selection.quality == Some(quality);
    if same {
        release(state);
        return;
    }
    state.selection = ChordSelection::preset(root, quality, state.extent);
    recompute(state);
}

/// Replace the active set wholesale from the selection.
fn recompute(state: &mut EngineState) {
    let scale = state.scale();
    match state.selection.pitches(&scale) {
        Some(pitches) => {
            state.active = pitches;
            state.hint_root = state.selection.root;
        }
        None => release(state),
    }
}

/// Drop the preset and hand the empty set back to manual input.
fn release(state: &mut EngineState) {
    state.clear_pitches();
    state.authority = InputAuthority::Manual;
}
