//! Chord synthesis: root + quality + extent + modifiers -> pitch set.

use serde::{Deserialize, Serialize};

use crate::pitch::{PitchClass, PitchSet};
use crate::state::music::{Scale, TriadQuality};

/// How far the chord is stacked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Extent {
    #[default]
    Triad,
    Seventh,
}

impl Extent {
    pub const ALL: [Extent; 2] = [Extent::Triad, Extent::Seventh];

    pub fn name(&self) -> &'static str {
        match self {
            Extent::Triad => "Triad",
            Extent::Seventh => "7th",
        }
    }
}

/// An add/omit/sus/alteration applied on top of the base chord
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modifier {
    AddNine,
    AddEleven,
    /// add13 / add6
    AddThirteen,
    OmitThird,
    OmitFifth,
    Sus2,
    Sus4,
    Augment,
    Diminish,
}

impl Modifier {
    pub const ALL: [Modifier; 9] = [
        Modifier::AddNine,
        Modifier::AddEleven,
        Modifier::AddThirteen,
        Modifier::OmitThird,
        Modifier::OmitFifth,
        Modifier::Sus2,
        Modifier::Sus4,
        Modifier::Augment,
        Modifier::Diminish,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Modifier::AddNine => "add9",
            Modifier::AddEleven => "add11",
            Modifier::AddThirteen => "add13",
            Modifier::OmitThird => "no3",
            Modifier::OmitFifth => "no5",
            Modifier::Sus2 => "sus2",
            Modifier::Sus4 => "sus4",
            Modifier::Augment => "aug",
            Modifier::Diminish => "dim",
        }
    }

    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

/// Set of active modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Modifiers(u16);

impl Modifiers {
    pub fn none() -> Self {
        Self(0)
    }

    pub fn with(mut self, modifier: Modifier) -> Self {
        self.0 |= modifier.bit();
        self
    }

    pub fn contains(self, modifier: Modifier) -> bool {
        self.0 & modifier.bit() != 0
    }

    pub fn toggle(&mut self, modifier: Modifier) {
        self.0 ^= modifier.bit();
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Modifier> {
        Modifier::ALL.into_iter().filter(move |m| self.contains(*m))
    }
}

impl FromIterator<Modifier> for Modifiers {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        iter.into_iter().fold(Modifiers::none(), Modifiers::with)
    }
}

const THIRDS: [u8; 2] = [3, 4];
const FIFTHS: [u8; 2] = [6, 7];

/// Concrete pitch classes for a chord.
///
/// A seventh chord takes its third, fifth and seventh from `scale` when the
/// root is diatonic, so every degree gets its own diatonic seventh (the
/// leading-tone triad becomes half-diminished). This is the one place the key
/// feeds into synthesis. Non-diatonic roots fall back to the seventh the
/// diatonic degrees of that quality would produce.
///
/// Modifiers apply in a fixed order: omissions, alterations, sus, extensions.
pub fn synthesize(
    root: PitchClass,
    quality: TriadQuality,
    extent: Extent,
    modifiers: Modifiers,
    scale: &Scale,
) -> PitchSet {
    let mut intervals = PitchSet::new();
    intervals.insert(PitchClass::C);
    for i in quality.intervals() {
        intervals.insert(PitchClass::new(i));
    }

    if extent == Extent::Seventh {
        intervals = match scale.degree_of(root) {
            Some(degree) => [0, 2, 4, 6]
                .iter()
                .map(|step| PitchClass::new(root.interval_to(scale.pitch(degree + step))))
                .collect(),
            None => {
                let seventh = match quality {
                    TriadQuality::Major | TriadQuality::Augmented => 11,
                    TriadQuality::Minor | TriadQuality::Diminished => 10,
                };
                intervals.insert(PitchClass::new(seventh));
                intervals
            }
        };
    }

    let strip = |set: &mut PitchSet, semis: &[u8]| {
        for &s in semis {
            set.remove(PitchClass::new(s));
        }
    };
    let add = |set: &mut PitchSet, semis: u8| set.insert(PitchClass::new(semis));

    if modifiers.contains(Modifier::OmitThird)
        || modifiers.contains(Modifier::Sus2)
        || modifiers.contains(Modifier::Sus4)
    {
        strip(&mut intervals, &THIRDS);
    }
    if modifiers.contains(Modifier::OmitFifth) {
        strip(&mut intervals, &FIFTHS);
    }

    if modifiers.contains(Modifier::Augment) {
        strip(&mut intervals, &FIFTHS);
        add(&mut intervals, 8);
    }
    if modifiers.contains(Modifier::Diminish) {
        strip(&mut intervals, &[7, 8]);
        add(&mut intervals, 6);
    }

    if modifiers.contains(Modifier::Sus4) {
        add(&mut intervals, 5);
    }
    if modifiers.contains(Modifier::Sus2) {
        add(&mut intervals, 2);
    }

    if modifiers.contains(Modifier::AddNine) {
        add(&mut intervals, 2);
    }
    if modifiers.contains(Modifier::AddEleven) {
        add(&mut intervals, 5);
    }
    if modifiers.contains(Modifier::AddThirteen) {
        add(&mut intervals, 9);
    }

    intervals.iter().map(|i| root.transpose(i.get())).collect()
}
