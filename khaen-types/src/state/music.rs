use serde::{Deserialize, Serialize};

use crate::pitch::{PitchClass, Spelling};

/// Diatonic mode of the selected key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Major,
    /// Natural minor
    Minor,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Major, Mode::Minor];

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Major => "Major",
            Mode::Minor => "Minor",
        }
    }

    /// Semitone intervals from root for this mode
    pub fn intervals(&self) -> &'static [u8; 7] {
        match self {
            Mode::Major => &[0, 2, 4, 5, 7, 9, 11],
            Mode::Minor => &[0, 2, 3, 5, 7, 8, 10],
        }
    }

    /// Diatonic triad quality per degree, aligned with `intervals()`
    pub fn triad_qualities(&self) -> &'static [TriadQuality; 7] {
        use TriadQuality::*;
        match self {
            Mode::Major => &[Major, Minor, Minor, Major, Major, Minor, Diminished],
            Mode::Minor => &[Minor, Diminished, Major, Minor, Minor, Major, Major],
        }
    }
}

/// Selected key. Immutable; a key change builds a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Key {
    pub root: PitchClass,
    pub mode: Mode,
}

impl Key {
    pub fn new(root: PitchClass, mode: Mode) -> Self {
        Self { root, mode }
    }

    pub fn spelling(&self) -> Spelling {
        Spelling::for_key(*self)
    }

    /// e.g. "Bb Major"
    pub fn name(&self) -> String {
        format!("{} {}", self.root.name(self.spelling()), self.mode.name())
    }

    pub fn scale(&self) -> Scale {
        build_scale(*self)
    }
}

/// Quality of a triad built on a scale degree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriadQuality {
    Major,
    Minor,
    Diminished,
    /// Never produced by the diatonic tables; only by stacked-third measurement
    Augmented,
}

impl TriadQuality {
    pub fn name(&self) -> &'static str {
        match self {
            TriadQuality::Major => "Major",
            TriadQuality::Minor => "minor",
            TriadQuality::Diminished => "diminished",
            TriadQuality::Augmented => "augmented",
        }
    }

    /// Third and fifth above the root
    pub fn intervals(&self) -> [u8; 2] {
        match self {
            TriadQuality::Major => [4, 7],
            TriadQuality::Minor => [3, 7],
            TriadQuality::Diminished => [3, 6],
            TriadQuality::Augmented => [4, 8],
        }
    }
}

/// The seven degrees of a key with their diatonic triad qualities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scale {
    pub key: Key,
    pub degrees: [PitchClass; 7],
    pub qualities: [TriadQuality; 7],
}

impl Scale {
    pub fn degree_of(&self, pc: PitchClass) -> Option<usize> {
        self.degrees.iter().position(|&d| d == pc)
    }

    pub fn contains(&self, pc: PitchClass) -> bool {
        self.degree_of(pc).is_some()
    }

    pub fn pitch(&self, degree: usize) -> PitchClass {
        self.degrees[degree % 7]
    }

    /// Roman numeral for the diatonic triad on `degree`: upper case for major,
    /// lower case for minor, a trailing "°" for diminished.
    pub fn numeral(&self, degree: usize) -> String {
        const NUMERALS: [&str; 7] = ["I", "II", "III", "IV", "V", "VI", "VII"];
        let base = NUMERALS[degree % 7];
        match self.qualities[degree % 7] {
            TriadQuality::Major => base.to_string(),
            TriadQuality::Minor => base.to_lowercase(),
            TriadQuality::Diminished => format!("{}°", base.to_lowercase()),
            TriadQuality::Augmented => format!("{}+", base),
        }
    }

    pub fn names(&self) -> Vec<&'static str> {
        let spelling = self.key.spelling();
        self.degrees.iter().map(|pc| pc.name(spelling)).collect()
    }
}

/// Build the 7-degree scale for a key. Pure; a key change is a full rebuild.
pub fn build_scale(key: Key) -> Scale {
    let intervals = key.mode.intervals();
    let mut degrees = [PitchClass::C; 7];
    for (slot, &interval) in degrees.iter_mut().zip(intervals.iter()) {
        *slot = key.root.transpose(interval);
    }
    Scale {
        key,
        degrees,
        qualities: *key.mode.triad_qualities(),
    }
}

/// Measure the triad on `degree` by stacking the scale's own thirds.
pub fn triad_quality_from_thirds(scale: &Scale, degree: usize) -> TriadQuality {
    let root = scale.pitch(degree);
    let third = root.interval_to(scale.pitch(degree + 2));
    let fifth = root.interval_to(scale.pitch(degree + 4));
    match (third, fifth) {
        (4, 8) => TriadQuality::Augmented,
        (4, _) => TriadQuality::Major,
        (3, 6) => TriadQuality::Diminished,
        _ => TriadQuality::Minor,
    }
}
