pub mod layout;
pub mod music;
pub mod selection;

pub use layout::*;
pub use music::*;
pub use selection::*;

use serde::{Deserialize, Serialize};

use crate::chord::Extent;
use crate::pitch::{PitchClass, PitchSet};

/// Which input path currently owns the active pitch set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InputAuthority {
    /// Hole clicks
    #[default]
    Manual,
    /// A selected preset chord
    Preset,
    /// MIDI controller
    External,
}

impl InputAuthority {
    pub fn name(&self) -> &'static str {
        match self {
            InputAuthority::Manual => "Manual",
            InputAuthority::Preset => "Preset",
            InputAuthority::External => "MIDI",
        }
    }
}

/// One revision of the whole engine state.
///
/// Reducers never mutate a published snapshot; they build the next one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineState {
    pub key: Key,
    pub active: PitchSet,
    pub selection: ChordSelection,
    /// Preferred root for analysis
    pub hint_root: Option<PitchClass>,
    pub authority: InputAuthority,
    /// Extent used for the next preset pick
    pub extent: Extent,
    pub midi_connected: bool,
    /// Bumped by every reduction that changes anything
    pub revision: u64,
}

impl EngineState {
    pub fn new(key: Key, extent: Extent) -> Self {
        Self {
            key,
            active: PitchSet::new(),
            selection: ChordSelection::none(),
            hint_root: None,
            authority: InputAuthority::default(),
            extent,
            midi_connected: false,
            revision: 0,
        }
    }

    pub fn scale(&self) -> Scale {
        build_scale(self.key)
    }

    /// Empty the active set along with everything derived from it.
    pub fn clear_pitches(&mut self) {
        self.active = PitchSet::new();
        self.hint_root = None;
        self.selection = ChordSelection::none();
    }

    /// Add a pitch; the first pitch into an empty set becomes the hint root.
    pub fn activate(&mut self, pc: PitchClass) {
        if self.active.is_empty() {
            self.hint_root = Some(pc);
        }
        self.active.insert(pc);
    }

    pub fn deactivate(&mut self, pc: PitchClass) {
        self.active.remove(pc);
        if self.active.is_empty() {
            self.hint_root = None;
        }
    }

    pub fn is_hole_active(&self, hole: &Hole) -> bool {
        is_hole_active(hole, self.active, &self.scale())
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::new(Key::default(), Extent::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_activation_sets_hint() {
        let mut state = EngineState::default();
        state.activate(PitchClass::new(4));
        state.activate(PitchClass::new(7));
        assert_eq!(state.hint_root, Some(PitchClass::new(4)));
        assert_eq!(state.active.len(), 2);
    }

    #[test]
    fn hint_survives_until_empty() {
        let mut state = EngineState::default();
        state.activate(PitchClass::new(4));
        state.activate(PitchClass::new(7));
        state.deactivate(PitchClass::new(4));
        assert_eq!(state.hint_root, Some(PitchClass::new(4)));
        state.deactivate(PitchClass::new(7));
        assert_eq!(state.hint_root, None);
    }

    #[test]
    fn clear_resets_selection() {
        let mut state = EngineState::default();
        state.selection = ChordSelection::preset(PitchClass::C, TriadQuality::Major, Extent::Triad);
        state.activate(PitchClass::C);
        state.clear_pitches();
        assert!(state.active.is_empty());
        assert!(!state.selection.is_active());
        assert_eq!(state.hint_root, None);
    }
}
