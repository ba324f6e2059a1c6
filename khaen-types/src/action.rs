//! Action types for the dispatch system.
//!
//! Actions represent user intents that flow through the dispatch system.
//! Each input path (hole clicks, preset chords, MIDI) has its own enum.

use serde::{Deserialize, Serialize};

use crate::chord::{Extent, Modifier};
use crate::pitch::PitchClass;
use crate::state::{HoleId, Key, Mode, TriadQuality};

/// Key selection. Any real change drops the active pitches and the preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyAction {
    SetRoot(PitchClass),
    SetMode(Mode),
    Set(Key),
}

/// Manual hole clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoleAction {
    Toggle(HoleId),
}

/// Preset chord palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresetAction {
    /// Pick the diatonic chord on a scale degree (0-6). Picking the
    /// currently selected chord again deselects it.
    SelectDegree(usize),
    /// Pick an arbitrary root and quality
    SelectChord {
        root: PitchClass,
        quality: TriadQuality,
    },
    SetExtent(Extent),
    ToggleModifier(Modifier),
    Clear,
}

/// Note event reduced to what the engine consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteEvent {
    pub is_on: bool,
    pub pitch_class: PitchClass,
}

impl NoteEvent {
    pub fn on(pitch_class: PitchClass) -> Self {
        Self {
            is_on: true,
            pitch_class,
        }
    }

    pub fn off(pitch_class: PitchClass) -> Self {
        Self {
            is_on: false,
            pitch_class,
        }
    }
}

/// External controller input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MidiAction {
    Note(NoteEvent),
    /// At least one input device present
    DeviceAvailability(bool),
}

/// Top-level action enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    None,
    Key(KeyAction),
    Hole(HoleAction),
    Preset(PresetAction),
    Midi(MidiAction),
    /// Release everything regardless of input path
    ClearAll,
}

/// What a dispatch did, for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchResult {
    /// A new snapshot was published
    pub changed: bool,
    /// Hole pitch bindings changed (key or mode)
    pub rebound: bool,
    /// The active set changed, so the chord name must be recomputed
    pub reanalyze: bool,
}

impl DispatchResult {
    pub fn none() -> Self {
        Self::default()
    }
}
