//! Chord detection from a set of sounding pitch classes.

use serde::{Deserialize, Serialize};

use super::name::{ChordName, Extension, Seventh, Shape};
use crate::pitch::{PitchClass, PitchSet};
use crate::state::music::Key;

/// Outcome of analysing the active pitches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    /// Ranked candidates, best first. Empty for both sentinels.
    pub candidates: Vec<ChordName>,
    pub primary: String,
    pub alternates: Vec<String>,
    /// Spelled, ascending from C
    pub notes: Vec<String>,
}

impl Analysis {
    pub const READY: &'static str = "Ready";
    pub const UNKNOWN_SHAPE: &'static str = "Unknown Shape";

    pub fn ready() -> Self {
        Self {
            candidates: Vec::new(),
            primary: Self::READY.to_string(),
            alternates: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn is_unknown(&self) -> bool {
        !self.notes.is_empty() && self.candidates.is_empty()
    }

    pub fn display_notes(&self) -> String {
        self.notes.join(", ")
    }
}

/// Name the chord formed by `active`.
///
/// Every member is tried as a root. Ranking: the hint root, then the key
/// root, then diatonic roots, then the shorter name, then the lower pitch class.
pub fn analyze(active: PitchSet, hint_root: Option<PitchClass>, key: Key) -> Analysis {
    if active.is_empty() {
        return Analysis::ready();
    }

    let spelling = key.spelling();
    let scale = key.scale();
    let notes: Vec<String> = active.names(spelling).into_iter().map(String::from).collect();

    let mut ranked: Vec<(ChordName, String)> = active
        .iter()
        .filter_map(|root| detect_from_root(active, root))
        .map(|chord| {
            let text = chord.render(spelling);
            (chord, text)
        })
        .collect();

    ranked.sort_by_key(|(chord, text)| {
        (
            Some(chord.root) != hint_root,
            chord.root != key.root,
            !scale.contains(chord.root),
            text.len(),
            chord.root,
        )
    });

    let mut names = ranked.iter().map(|(_, text)| text.clone());
    let primary = names
        .next()
        .unwrap_or_else(|| Analysis::UNKNOWN_SHAPE.to_string());
    let alternates = names.collect();

    Analysis {
        candidates: ranked.into_iter().map(|(chord, _)| chord).collect(),
        primary,
        alternates,
        notes,
    }
}

/// Read the set with `root` as the chord root, or None if no shape fits.
pub fn detect_from_root(active: PitchSet, root: PitchClass) -> Option<ChordName> {
    let intervals = active.intervals_from(root);
    let has = |semis: u8| intervals.contains(PitchClass::new(semis));

    let shape = match_shape(&has, active.len())?;
    let seventh = match_seventh(&has, shape);

    let extensions = Extension::ALL
        .into_iter()
        .filter(|ext| has(ext.interval()))
        .filter(|ext| match ext {
            Extension::Ninth => shape != Shape::Sus2,
            Extension::Eleventh => shape != Shape::Sus4,
            Extension::Thirteenth => seventh != Some(Seventh::Diminished),
        })
        .collect();

    Some(ChordName {
        root,
        shape,
        seventh,
        extensions,
    })
}

// First match wins; the order settles overlapping interval sets.
fn match_shape(has: &impl Fn(u8) -> bool, note_count: usize) -> Option<Shape> {
    let third = has(3) || has(4);
    let fifth = has(6) || has(7) || has(8);

    if has(3) && has(6) && !has(7) {
        Some(Shape::Diminished)
    } else if has(3) && has(7) {
        Some(Shape::Minor)
    } else if has(4) && has(8) {
        Some(Shape::Augmented)
    } else if has(4) && has(7) {
        Some(Shape::Major)
    } else if has(5) && has(7) && !third {
        Some(Shape::Sus4)
    } else if has(2) && has(7) && !third {
        Some(Shape::Sus2)
    } else if third && !fifth && note_count >= 3 {
        if has(4) {
            Some(Shape::MajorNoFifth)
        } else {
            Some(Shape::MinorNoFifth)
        }
    } else if has(7) && note_count == 2 {
        Some(Shape::Power)
    } else {
        None
    }
}

fn match_seventh(has: &impl Fn(u8) -> bool, shape: Shape) -> Option<Seventh> {
    if shape == Shape::Power {
        None
    } else if has(10) {
        Some(Seventh::Minor)
    } else if shape == Shape::Diminished && has(9) {
        Some(Seventh::Diminished)
    } else if has(11) {
        Some(Seventh::Major)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord::synth::{synthesize, Extent, Modifier, Modifiers};
    use crate::state::music::{Mode, TriadQuality};

    fn pcs(values: &[u8]) -> PitchSet {
        values.iter().map(|&v| PitchClass::new(v)).collect()
    }

    fn c_major() -> Key {
        Key::default()
    }

    #[test]
    fn empty_is_ready() {
        let result = analyze(PitchSet::new(), None, c_major());
        assert_eq!(result.primary, Analysis::READY);
        assert!(result.alternates.is_empty());
        assert!(result.is_ready());
    }

    #[test]
    fn a_minor_with_hint() {
        let result = analyze(pcs(&[9, 0, 4]), Some(PitchClass::new(9)), c_major());
        assert_eq!(result.primary, "Am");
        assert_eq!(result.display_notes(), "C, E, A");
    }

    #[test]
    fn cmaj9() {
        let result = analyze(pcs(&[0, 2, 4, 7, 11]), Some(PitchClass::C), c_major());
        assert_eq!(result.primary, "Cmaj9");
        assert!(result.alternates.contains(&"Em7".to_string()));
    }

    #[test]
    fn diminished_resolves_deterministically() {
        let set = pcs(&[0, 3, 6]);
        let plain = analyze(set, None, c_major());
        assert_eq!(plain.primary, "Cdim");
        let hinted = analyze(set, Some(PitchClass::new(6)), c_major());
        assert_eq!(hinted.primary, "Cdim");
        assert_eq!(plain, analyze(set, None, c_major()));
    }

    #[test]
    fn bare_major_third_is_unknown() {
        let result = analyze(pcs(&[0, 4]), Some(PitchClass::C), c_major());
        assert_eq!(result.primary, Analysis::UNKNOWN_SHAPE);
        assert!(result.is_unknown());
        assert_eq!(result.notes, vec!["C", "E"]);
    }

    #[test]
    fn single_note_is_unknown() {
        let result = analyze(pcs(&[5]), Some(PitchClass::new(5)), c_major());
        assert_eq!(result.primary, Analysis::UNKNOWN_SHAPE);
    }

    #[test]
    fn power_chord_needs_exactly_two_notes() {
        assert_eq!(analyze(pcs(&[7, 2]), None, c_major()).primary, "G5");
        assert_eq!(analyze(pcs(&[0, 7, 10]), Some(PitchClass::C), c_major()).primary, Analysis::UNKNOWN_SHAPE);
    }

    #[test]
    fn inversions_prefer_key_root() {
        // E G C with no hint, C major key
        let result = analyze(pcs(&[4, 7, 0]), None, c_major());
        assert_eq!(result.primary, "C");
    }

    #[test]
    fn hint_beats_key_root() {
        // C E G A: C6 or Am7
        let set = pcs(&[0, 4, 7, 9]);
        assert_eq!(analyze(set, Some(PitchClass::new(9)), c_major()).primary, "Am7");
        assert_eq!(analyze(set, None, c_major()).primary, "C(add6)");
    }

    #[test]
    fn diatonic_roots_rank_before_chromatic() {
        // Eb G Bb C: Cm7 or Eb6. Key G major: neither root is the key root,
        // C is diatonic, Eb is not.
        let set = pcs(&[3, 7, 10, 0]);
        let key = Key::new(PitchClass::new(7), Mode::Major);
        let result = analyze(set, None, key);
        assert_eq!(result.primary, "Cm7");
        assert_eq!(result.alternates, vec!["D#(add6)"]);
    }

    #[test]
    fn flat_key_spelling() {
        let key = Key::new(PitchClass::new(5), Mode::Major);
        let result = analyze(pcs(&[10, 2, 5]), Some(PitchClass::new(10)), key);
        assert_eq!(result.primary, "Bb");
        assert_eq!(result.notes, vec!["D", "F", "Bb"]);
    }

    #[test]
    fn seventh_shapes() {
        let key = c_major();
        let g = Some(PitchClass::new(7));
        assert_eq!(analyze(pcs(&[7, 11, 2, 5]), g, key).primary, "G7");
        let b = Some(PitchClass::new(11));
        assert_eq!(analyze(pcs(&[11, 2, 5, 9]), b, key).primary, "Bm7b5");
        assert_eq!(analyze(pcs(&[11, 2, 5, 8]), b, key).primary, "Bdim7");
        assert_eq!(analyze(pcs(&[0, 4, 10]), Some(PitchClass::C), key).primary, "C7(no5)");
        assert_eq!(analyze(pcs(&[7, 0, 2, 5]), g, key).primary, "G7sus4");
        assert_eq!(analyze(pcs(&[7, 11, 2, 5, 4]), g, key).primary, "G13");
    }

    #[test]
    fn augmented_checked_before_major() {
        let result = analyze(pcs(&[0, 4, 8]), Some(PitchClass::C), c_major());
        assert_eq!(result.primary, "Caug");
        assert_eq!(result.alternates.len(), 2);
    }

    #[test]
    fn sus_tones_are_not_extensions() {
        let set = pcs(&[0, 5, 7]);
        assert_eq!(analyze(set, Some(PitchClass::C), c_major()).primary, "Csus4");
        let set = pcs(&[0, 2, 7]);
        assert_eq!(analyze(set, Some(PitchClass::C), c_major()).primary, "Csus2");
    }

    /// Modifier combinations that leave nothing any shape can read from
    /// the synthesized root.
    fn unreadable(
        quality: TriadQuality,
        extent: Extent,
        mods: &[Modifier],
        chord: PitchSet,
        root: PitchClass,
    ) -> bool {
        use Modifier::*;
        let has = |m: Modifier| mods.contains(&m);
        let power_dyad = chord.len() == 2 && chord.contains(root.transpose(7));
        let clashing_alteration = (quality == TriadQuality::Major && has(Diminish))
            || (quality != TriadQuality::Major && has(Augment));
        let thirdless_diminished =
            quality == TriadQuality::Diminished && (has(Sus2) || has(Sus4) || has(OmitThird));
        (chord.len() < 3 && !power_dyad)
            || clashing_alteration
            || thirdless_diminished
            || (extent == Extent::Seventh && has(OmitThird))
    }

    #[test]
    fn round_trip_recovers_root() {
        use Modifier::*;
        let mod_sets: [&[Modifier]; 15] = [
            &[],
            &[AddNine],
            &[AddEleven],
            &[AddThirteen],
            &[Sus2],
            &[Sus4],
            &[OmitThird],
            &[OmitFifth],
            &[OmitFifth, AddNine],
            &[OmitFifth, AddEleven],
            &[OmitFifth, AddThirteen],
            &[OmitThird, OmitFifth],
            &[Augment],
            &[Diminish],
            &[AddNine, AddThirteen],
        ];
        for mode in Mode::ALL {
            for key_root in PitchClass::ALL {
                let key = Key::new(key_root, mode);
                let scale = key.scale();
                for degree in 0..7 {
                    let root = scale.pitch(degree);
                    let quality = scale.qualities[degree];
                    for extent in Extent::ALL {
                        for mod_list in mod_sets {
                            let mods: Modifiers = mod_list.iter().copied().collect();
                            let chord = synthesize(root, quality, extent, mods, &scale);
                            let result = analyze(chord, Some(root), key);
                            let context = format!(
                                "{:?} {:?} {:?} in {}: {}",
                                root,
                                extent,
                                mod_list,
                                key.name(),
                                result.primary
                            );

                            if unreadable(quality, extent, mod_list, chord, root) {
                                assert_eq!(detect_from_root(chord, root), None, "{}", context);
                                assert!(
                                    result.candidates.iter().all(|c| c.root != root),
                                    "{}",
                                    context
                                );
                                if chord.len() < 3 {
                                    assert_eq!(result.primary, Analysis::UNKNOWN_SHAPE, "{}", context);
                                }
                                continue;
                            }

                            let best = result
                                .candidates
                                .first()
                                .unwrap_or_else(|| panic!("{}", context));
                            assert_eq!(best.root, root, "{}", context);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn omit_fifth_presets_read_as_no_fifth() {
        let key = c_major();
        let scale = key.scale();
        let mods = Modifiers::none().with(Modifier::OmitFifth).with(Modifier::AddNine);
        let chord = synthesize(PitchClass::C, TriadQuality::Major, Extent::Triad, mods, &scale);
        assert_eq!(chord, pcs(&[0, 2, 4]));
        assert_eq!(analyze(chord, Some(PitchClass::C), key).primary, "C(add9)(no5)");

        let a = PitchClass::new(9);
        let mods = Modifiers::none().with(Modifier::OmitFifth).with(Modifier::AddThirteen);
        let chord = synthesize(a, TriadQuality::Minor, Extent::Triad, mods, &scale);
        assert_eq!(chord, pcs(&[0, 6, 9]));
        assert_eq!(analyze(chord, Some(a), key).primary, "Am(add6)(no5)");

        // the plain dyad stays unknown
        let mods = Modifiers::none().with(Modifier::OmitFifth);
        let chord = synthesize(PitchClass::C, TriadQuality::Major, Extent::Triad, mods, &scale);
        assert_eq!(analyze(chord, Some(PitchClass::C), key).primary, Analysis::UNKNOWN_SHAPE);
    }

    #[test]
    fn round_trip_alterations() {
        let key = c_major();
        let scale = key.scale();
        let aug = synthesize(PitchClass::C, TriadQuality::Major, Extent::Triad, Modifiers::none().with(Modifier::Augment), &scale);
        assert_eq!(analyze(aug, Some(PitchClass::C), key).primary, "Caug");
        let dim = synthesize(PitchClass::new(2), TriadQuality::Minor, Extent::Triad, Modifiers::none().with(Modifier::Diminish), &scale);
        assert_eq!(analyze(dim, Some(PitchClass::new(2)), key).primary, "Ddim");
    }
}
