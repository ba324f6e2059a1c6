//! Structured chord names and their single text rendering.

use serde::{Deserialize, Serialize};

use crate::pitch::{PitchClass, Spelling};

/// Triad-level shape recognised by the detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape {
    Major,
    Minor,
    Diminished,
    Augmented,
    Sus4,
    Sus2,
    /// Major third, no fifth, at least three notes
    MajorNoFifth,
    /// Minor third, no fifth, at least three notes
    MinorNoFifth,
    /// Root and perfect fifth, nothing else
    Power,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seventh {
    Minor,
    Major,
    Diminished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Extension {
    Ninth,
    Eleventh,
    Thirteenth,
}

impl Extension {
    pub const ALL: [Extension; 3] = [Extension::Ninth, Extension::Eleventh, Extension::Thirteenth];

    /// Interval above the root, mod 12
    pub fn interval(&self) -> u8 {
        match self {
            Extension::Ninth => 2,
            Extension::Eleventh => 5,
            Extension::Thirteenth => 9,
        }
    }

    fn number(&self) -> u8 {
        match self {
            Extension::Ninth => 9,
            Extension::Eleventh => 11,
            Extension::Thirteenth => 13,
        }
    }

    fn add_suffix(&self) -> &'static str {
        match self {
            Extension::Ninth => "(add9)",
            Extension::Eleventh => "(add11)",
            Extension::Thirteenth => "(add6)",
        }
    }
}

/// A detected chord as data. Text only comes from [`ChordName::render`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChordName {
    pub root: PitchClass,
    pub shape: Shape,
    pub seventh: Option<Seventh>,
    /// Ascending, no duplicates
    pub extensions: Vec<Extension>,
}

impl ChordName {
    pub fn triad(root: PitchClass, shape: Shape) -> Self {
        Self {
            root,
            shape,
            seventh: None,
            extensions: Vec::new(),
        }
    }

    /// With a seventh, the highest extension takes the seventh's number
    /// ("maj7" + 9th = "maj9"); otherwise each extension is a parenthetical add.
    pub fn render(&self, spelling: Spelling) -> String {
        let mut out = String::from(self.root.name(spelling));
        match self.seventh {
            Some(seventh) => {
                let number = self
                    .extensions
                    .iter()
                    .max()
                    .map(Extension::number)
                    .unwrap_or(7);
                out.push_str(&seventh_suffix(self.shape, seventh, number));
            }
            None => {
                out.push_str(triad_suffix(self.shape));
                for ext in &self.extensions {
                    out.push_str(ext.add_suffix());
                }
            }
        }
        if matches!(self.shape, Shape::MajorNoFifth | Shape::MinorNoFifth) {
            out.push_str("(no5)");
        }
        out
    }
}

fn triad_suffix(shape: Shape) -> &'static str {
    match shape {
        Shape::Major | Shape::MajorNoFifth => "",
        Shape::Minor | Shape::MinorNoFifth => "m",
        Shape::Diminished => "dim",
        Shape::Augmented => "aug",
        Shape::Sus4 => "sus4",
        Shape::Sus2 => "sus2",
        Shape::Power => "5",
    }
}

fn seventh_suffix(shape: Shape, seventh: Seventh, n: u8) -> String {
    match (shape, seventh) {
        (Shape::Major | Shape::MajorNoFifth | Shape::Power, Seventh::Minor) => format!("{n}"),
        (Shape::Major | Shape::MajorNoFifth | Shape::Power, _) => format!("maj{n}"),
        (Shape::Minor | Shape::MinorNoFifth, Seventh::Minor) => format!("m{n}"),
        (Shape::Minor | Shape::MinorNoFifth, _) => format!("m(maj{n})"),
        (Shape::Diminished, Seventh::Minor) => format!("m{n}b5"),
        (Shape::Diminished, Seventh::Diminished) => format!("dim{n}"),
        (Shape::Diminished, Seventh::Major) => format!("dim(maj{n})"),
        (Shape::Augmented, Seventh::Minor) => format!("aug{n}"),
        (Shape::Augmented, _) => format!("aug(maj{n})"),
        (Shape::Sus4, Seventh::Minor) => format!("{n}sus4"),
        (Shape::Sus4, _) => format!("maj{n}sus4"),
        (Shape::Sus2, Seventh::Minor) => format!("{n}sus2"),
        (Shape::Sus2, _) => format!("maj{n}sus2"),
    }
}
