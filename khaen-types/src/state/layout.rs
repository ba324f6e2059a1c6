//! Physical pipe/hole layout of the khaen.
//!
//! Holes carry a degree index, never a pitch. The sounding pitch is always
//! projected through the current scale so it cannot go stale on a key change.

use serde::{Deserialize, Serialize};

use crate::pitch::{PitchClass, PitchSet};
use crate::state::music::Scale;

/// Which raft of pipes a hole sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn name(&self) -> &'static str {
        match self {
            Side::Left => "Left",
            Side::Right => "Right",
        }
    }
}

/// Display band only; does not affect pitch class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Register {
    Low,
    High,
}

/// Stable identity of a hole: side plus row (0 = nearest the mouthpiece).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HoleId {
    pub side: Side,
    pub row: u8,
}

impl HoleId {
    pub const fn new(side: Side, row: u8) -> Self {
        Self { side, row }
    }
}

impl std::fmt::Display for HoleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.side.name(), self.row)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hole {
    pub id: HoleId,
    /// Conventional numeral painted on the pipe, independent of key
    pub label: &'static str,
    /// Index into the current scale's degrees (0-6)
    pub degree: usize,
    pub register: Register,
}

impl Hole {
    const fn new(side: Side, row: u8, degree: usize, register: Register) -> Self {
        Self {
            id: HoleId::new(side, row),
            label: LABELS[degree],
            degree,
            register,
        }
    }

    pub fn sounding_pitch(&self, scale: &Scale) -> PitchClass {
        sounding_pitch(self, scale)
    }
}

const LABELS: [&str; 7] = ["1", "2", "3", "4", "5", "6", "7"];

pub const HOLES_PER_SIDE: usize = 8;

use Register::{High, Low};
use Side::{Left, Right};

/// The sixteen holes, eight per side. Degree 0 appears on three pipes.
pub static HOLES: [Hole; 16] = [
    Hole::new(Left, 0, 0, Low),
    Hole::new(Left, 1, 4, Low),
    Hole::new(Left, 2, 3, Low),
    Hole::new(Left, 3, 1, Low),
    Hole::new(Left, 4, 0, High),
    Hole::new(Left, 5, 5, High),
    Hole::new(Left, 6, 2, High),
    Hole::new(Left, 7, 6, High),
    Hole::new(Right, 0, 2, Low),
    Hole::new(Right, 1, 6, Low),
    Hole::new(Right, 2, 5, Low),
    Hole::new(Right, 3, 0, Low),
    Hole::new(Right, 4, 4, High),
    Hole::new(Right, 5, 3, High),
    Hole::new(Right, 6, 1, High),
    Hole::new(Right, 7, 4, High),
];

pub fn sounding_pitch(hole: &Hole, scale: &Scale) -> PitchClass {
    scale.pitch(hole.degree)
}

pub fn hole(id: HoleId) -> Option<&'static Hole> {
    HOLES.iter().find(|h| h.id == id)
}

/// Every hole that currently sounds `pc`.
pub fn holes_for_pitch(pc: PitchClass, scale: &Scale) -> impl Iterator<Item = &'static Hole> + '_ {
    HOLES.iter().filter(move |h| sounding_pitch(h, scale) == pc)
}

pub fn is_hole_active(hole: &Hole, active: PitchSet, scale: &Scale) -> bool {
    active.contains(sounding_pitch(hole, scale))
}
