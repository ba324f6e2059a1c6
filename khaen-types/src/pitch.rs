//! Pitch-class arithmetic and enharmonic spelling.
//!
//! All arithmetic is mod 12. Spelling is a display projection only and never
//! takes part in equality or interval math.

use serde::{Deserialize, Serialize};

use crate::state::music::{Key, Mode};

/// Chromatic position relative to C, always in `0..12`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct PitchClass(u8);

impl PitchClass {
    pub const C: PitchClass = PitchClass(0);

    pub const ALL: [PitchClass; 12] = [
        PitchClass(0),
        PitchClass(1),
        PitchClass(2),
        PitchClass(3),
        PitchClass(4),
        PitchClass(5),
        PitchClass(6),
        PitchClass(7),
        PitchClass(8),
        PitchClass(9),
        PitchClass(10),
        PitchClass(11),
    ];

    /// Reduces any value mod 12.
    pub fn new(value: u8) -> Self {
        Self(value % 12)
    }

    /// Pitch class of a raw MIDI note number.
    pub fn from_midi(note: u8) -> Self {
        Self::new(note)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Semitones from `self` up to `other`, mod 12.
    pub fn interval_to(self, other: PitchClass) -> u8 {
        (other.0 + 12 - self.0) % 12
    }

    pub fn transpose(self, semitones: u8) -> Self {
        Self::new(self.0 + semitones % 12)
    }

    pub fn name(self, spelling: Spelling) -> &'static str {
        match spelling {
            Spelling::Sharps => SHARP_NAMES[self.0 as usize],
            Spelling::Flats => FLAT_NAMES[self.0 as usize],
        }
    }

    /// Parse a note name such as "C", "F#", "Fs" or "Bb".
    pub fn parse(s: &str) -> Option<Self> {
        let mut chars = s.trim().chars();
        let letter = chars.next()?.to_ascii_uppercase();
        let natural = match letter {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return None,
        };
        let accidental = chars.as_str();
        let offset = match accidental {
            "" => 0,
            "#" | "s" | "♯" => 1,
            "b" | "♭" => 11,
            _ => return None,
        };
        Some(Self::new(natural + offset))
    }
}

impl std::fmt::Display for PitchClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name(Spelling::Sharps))
    }
}

const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Enharmonic spelling preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Spelling {
    #[default]
    Sharps,
    Flats,
}

impl Spelling {
    /// Flats for F Bb Eb Ab Db Gb major and their relative minors.
    pub fn for_key(key: Key) -> Self {
        let flat = match key.mode {
            Mode::Major => matches!(key.root.get(), 5 | 10 | 3 | 8 | 1 | 6),
            Mode::Minor => matches!(key.root.get(), 2 | 7 | 0 | 5 | 10 | 3),
        };
        if flat {
            Spelling::Flats
        } else {
            Spelling::Sharps
        }
    }
}

/// A de-duplicated set of pitch classes stored as a 12-bit mask.
/// Iteration is always ascending from C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "u16", into = "u16")]
pub struct PitchSet(u16);

impl PitchSet {
    const MASK: u16 = 0x0FFF;

    pub fn new() -> Self {
        Self(0)
    }

    pub fn bits(self) -> u16 {
        self.0
    }

    pub fn from_bits(bits: u16) -> Self {
        Self(bits & Self::MASK)
    }

    pub fn insert(&mut self, pc: PitchClass) {
        self.0 |= 1 << pc.get();
    }

    pub fn remove(&mut self, pc: PitchClass) {
        self.0 &= !(1 << pc.get());
    }

    /// Returns true if the pitch is present after the toggle.
    pub fn toggle(&mut self, pc: PitchClass) -> bool {
        self.0 ^= 1 << pc.get();
        self.contains(pc)
    }

    pub fn contains(self, pc: PitchClass) -> bool {
        self.0 & (1 << pc.get()) != 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = PitchClass> {
        PitchClass::ALL.into_iter().filter(move |pc| self.contains(*pc))
    }

    /// The set re-expressed as intervals above `root`.
    pub fn intervals_from(self, root: PitchClass) -> PitchSet {
        self.iter().map(|pc| PitchClass::new(root.interval_to(pc))).collect()
    }

    /// Spelled names in ascending order.
    pub fn names(self, spelling: Spelling) -> Vec<&'static str> {
        self.iter().map(|pc| pc.name(spelling)).collect()
    }
}

/// Deserialization rejects out-of-range values instead of wrapping them.
impl TryFrom<u8> for PitchClass {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value < 12 {
            Ok(Self(value))
        } else {
            Err(format!("pitch class out of range: {}", value))
        }
    }
}

impl From<PitchClass> for u8 {
    fn from(pc: PitchClass) -> Self {
        pc.0
    }
}

impl From<u16> for PitchSet {
    fn from(bits: u16) -> Self {
        Self::from_bits(bits)
    }
}

impl From<PitchSet> for u16 {
    fn from(set: PitchSet) -> Self {
        set.bits()
    }
}

impl FromIterator<PitchClass> for PitchSet {
    fn from_iter<I: IntoIterator<Item = PitchClass>>(iter: I) -> Self {
        let mut set = PitchSet::new();
        for pc in iter {
            set.insert(pc);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pcs(values: &[u8]) -> PitchSet {
        values.iter().map(|&v| PitchClass::new(v)).collect()
    }

    #[test]
    fn new_wraps_mod_12() {
        assert_eq!(PitchClass::new(12), PitchClass::C);
        assert_eq!(PitchClass::new(23).get(), 11);
        assert_eq!(PitchClass::from_midi(60), PitchClass::C);
        assert_eq!(PitchClass::from_midi(64).get(), 4);
    }

    #[test]
    fn interval_wraps_downward() {
        let a = PitchClass::new(9);
        let c = PitchClass::new(0);
        assert_eq!(a.interval_to(c), 3);
        assert_eq!(c.interval_to(a), 9);
        assert_eq!(a.interval_to(a), 0);
    }

    #[test]
    fn transpose_wraps() {
        assert_eq!(PitchClass::new(11).transpose(2).get(), 1);
        assert_eq!(PitchClass::new(5).transpose(24).get(), 5);
    }

    #[test]
    fn spelling_never_changes_identity() {
        let pc = PitchClass::new(10);
        assert_eq!(pc.name(Spelling::Sharps), "A#");
        assert_eq!(pc.name(Spelling::Flats), "Bb");
        assert_eq!(PitchClass::parse("A#"), PitchClass::parse("Bb"));
    }

    #[test]
    fn parse_note_names() {
        assert_eq!(PitchClass::parse("C"), Some(PitchClass::C));
        assert_eq!(PitchClass::parse("F#").map(PitchClass::get), Some(6));
        assert_eq!(PitchClass::parse("Fs").map(PitchClass::get), Some(6));
        assert_eq!(PitchClass::parse("Cb").map(PitchClass::get), Some(11));
        assert_eq!(PitchClass::parse("bb").map(PitchClass::get), Some(10));
        assert_eq!(PitchClass::parse("H"), None);
        assert_eq!(PitchClass::parse(""), None);
        assert_eq!(PitchClass::parse("C##"), None);
    }

    #[test]
    fn flat_keys() {
        let f_major = Key::new(PitchClass::new(5), Mode::Major);
        let g_major = Key::new(PitchClass::new(7), Mode::Major);
        let d_minor = Key::new(PitchClass::new(2), Mode::Minor);
        let a_minor = Key::new(PitchClass::new(9), Mode::Minor);
        assert_eq!(Spelling::for_key(f_major), Spelling::Flats);
        assert_eq!(Spelling::for_key(g_major), Spelling::Sharps);
        assert_eq!(Spelling::for_key(d_minor), Spelling::Flats);
        assert_eq!(Spelling::for_key(a_minor), Spelling::Sharps);
    }

    #[test]
    fn set_deduplicates_and_sorts() {
        let set: PitchSet = [7u8, 0, 4, 12, 19]
            .iter()
            .map(|&v| PitchClass::new(v))
            .collect();
        assert_eq!(set.len(), 3);
        let values: Vec<u8> = set.iter().map(PitchClass::get).collect();
        assert_eq!(values, vec![0, 4, 7]);
    }

    #[test]
    fn toggle_reports_membership() {
        let mut set = PitchSet::new();
        assert!(set.toggle(PitchClass::new(3)));
        assert!(!set.toggle(PitchClass::new(3)));
        assert!(set.is_empty());
    }

    #[test]
    fn intervals_from_root() {
        let a_minor = pcs(&[9, 0, 4]);
        assert_eq!(a_minor.intervals_from(PitchClass::new(9)), pcs(&[0, 3, 7]));
    }

    #[test]
    fn from_bits_masks_high_bits() {
        assert_eq!(PitchSet::from_bits(0xF001).len(), 1);
    }

    #[test]
    fn deserialize_rejects_out_of_range_pitch_class() {
        assert!(serde_json::from_str::<PitchClass>("200").is_err());
        assert!(serde_json::from_str::<PitchClass>("12").is_err());
        let pc: PitchClass = serde_json::from_str("11").unwrap();
        assert_eq!(pc.get(), 11);
        assert_eq!(serde_json::to_string(&pc).unwrap(), "11");
    }

    #[test]
    fn deserialize_masks_pitch_set() {
        let set: PitchSet = serde_json::from_str("61441").unwrap();
        assert_eq!(set, PitchSet::from_bits(0x0001));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![PitchClass::C]);
        assert_eq!(serde_json::to_string(&pcs(&[0, 4])).unwrap(), "17");
    }
}
