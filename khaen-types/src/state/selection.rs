//! Preset chord selection.

use serde::{Deserialize, Serialize};

use crate::chord::{synthesize, Extent, Modifiers};
use crate::pitch::{PitchClass, PitchSet};
use crate::state::music::{Scale, TriadQuality};

/// The preset chord driving the active set. All `None` means no preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChordSelection {
    pub root: Option<PitchClass>,
    pub quality: Option<TriadQuality>,
    pub extent: Option<Extent>,
    pub modifiers: Modifiers,
}

impl ChordSelection {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn preset(root: PitchClass, quality: TriadQuality, extent: Extent) -> Self {
        Self {
            root: Some(root),
            quality: Some(quality),
            extent: Some(extent),
            modifiers: Modifiers::none(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.root.is_some()
    }

    /// Pitches this selection produces in `scale`, if a preset is set.
    pub fn pitches(&self, scale: &Scale) -> Option<PitchSet> {
        let root = self.root?;
        let quality = self.quality?;
        Some(synthesize(
            root,
            quality,
            self.extent.unwrap_or_default(),
            self.modifiers,
            scale,
        ))
    }
}

/// One entry of the diatonic chord palette shown for the current key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetChord {
    pub degree: usize,
    pub numeral: String,
    pub root: PitchClass,
    pub quality: TriadQuality,
}

pub fn diatonic_presets(scale: &Scale) -> Vec<PresetChord> {
    (0..7)
        .map(|degree| PresetChord {
            degree,
            numeral: scale.numeral(degree),
            root: scale.pitch(degree),
            quality: scale.qualities[degree],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord::Modifier;
    use crate::state::music::{build_scale, Key, Mode};

    #[test]
    fn none_has_no_pitches() {
        let scale = build_scale(Key::default());
        assert_eq!(ChordSelection::none().pitches(&scale), None);
    }

    #[test]
    fn preset_pitches_are_idempotent() {
        let scale = build_scale(Key::default());
        let mut sel = ChordSelection::preset(PitchClass::new(7), TriadQuality::Major, Extent::Seventh);
        sel.modifiers = sel.modifiers.with(Modifier::AddNine);
        let a = sel.pitches(&scale).unwrap();
        assert_eq!(a, sel.pitches(&scale).unwrap());
        assert_eq!(a.len(), 5);
    }

    #[test]
    fn palette_for_minor_key() {
        let scale = build_scale(Key::new(PitchClass::new(9), Mode::Minor));
        let presets = diatonic_presets(&scale);
        assert_eq!(presets.len(), 7);
        assert_eq!(presets[0].numeral, "i");
        assert_eq!(presets[0].root, PitchClass::new(9));
        assert_eq!(presets[1].quality, TriadQuality::Diminished);
        assert_eq!(presets[2].root, PitchClass::C);
    }
}
