//! Projection of a snapshot into what the presentation layer draws.

use serde::Serialize;

use khaen_types::{
    diatonic_presets, Analysis, EngineState, HoleId, PitchClass, Register, TriadQuality, HOLES,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoleView {
    pub id: HoleId,
    pub label: &'static str,
    pub register: Register,
    pub pitch: PitchClass,
    pub name: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresetView {
    pub degree: usize,
    pub numeral: String,
    pub name: String,
    pub quality: TriadQuality,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineView {
    pub revision: u64,
    pub key: String,
    pub scale: Vec<&'static str>,
    pub input: &'static str,
    pub holes: Vec<HoleView>,
    pub presets: Vec<PresetView>,
    pub extent: &'static str,
    pub modifiers: Vec<&'static str>,
    pub chord: String,
    pub alternates: Vec<String>,
    pub notes: String,
    pub midi_connected: bool,
}

impl EngineView {
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| e.to_string())
    }

    pub fn hole(&self, id: HoleId) -> Option<&HoleView> {
        self.holes.iter().find(|h| h.id == id)
    }
}

pub fn project(state: &EngineState, analysis: &Analysis) -> EngineView {
    let scale = state.scale();
    let spelling = state.key.spelling();

    let holes = HOLES
        .iter()
        .map(|hole| {
            let pitch = hole.sounding_pitch(&scale);
            HoleView {
                id: hole.id,
                label: hole.label,
                register: hole.register,
                pitch,
                name: pitch.name(spelling),
                active: state.is_hole_active(hole),
            }
        })
        .collect();

    let presets = diatonic_presets(&scale)
        .into_iter()
        .map(|p| {
            let chord = khaen_types::ChordName::triad(p.root, shape_of(p.quality));
            PresetView {
                degree: p.degree,
                numeral: p.numeral,
                name: chord.render(spelling),
                quality: p.quality,
                selected: state.selection.root == Some(p.root)
                    && state.selection.quality == Some(p.quality),
            }
        })
        .collect();

    EngineView {
        revision: state.revision,
        key: state.key.name(),
        scale: scale.names(),
        input: state.authority.name(),
        holes,
        presets,
        extent: state.selection.extent.unwrap_or(state.extent).name(),
        modifiers: state.selection.modifiers.iter().map(|m| m.name()).collect(),
        chord: analysis.primary.clone(),
        alternates: analysis.alternates.clone(),
        notes: analysis.display_notes(),
        midi_connected: state.midi_connected,
    }
}

fn shape_of(quality: TriadQuality) -> khaen_types::Shape {
    match quality {
        TriadQuality::Major => khaen_types::Shape::Major,
        TriadQuality::Minor => khaen_types::Shape::Minor,
        TriadQuality::Diminished => khaen_types::Shape::Diminished,
        TriadQuality::Augmented => khaen_types::Shape::Augmented,
    }
}
