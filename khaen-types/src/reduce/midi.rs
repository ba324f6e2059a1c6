use crate::{EngineState, MidiAction};

pub(super) fn claims(action: &MidiAction) -> bool {
    matches!(action, MidiAction::Note(_))
}

pub(super) fn reduce(action: &MidiAction, state: &mut EngineState) {
    match action {
        MidiAction::Note(event) => {
            if event.is_on {
                state.activate(event.pitch_class);
            } else {
                state.deactivate(event.pitch_class);
            }
        }
        MidiAction::DeviceAvailability(present) => {
            state.midi_connected = *present;
        }
    }
}
