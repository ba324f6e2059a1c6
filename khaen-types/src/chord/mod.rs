//! Chord synthesis and analysis.
//!
//! All chord math lives here: pure functions over pitch-class sets.

pub mod detect;
pub mod name;
pub mod synth;

pub use detect::{analyze, detect_from_root, Analysis};
pub use name::{ChordName, Extension, Seventh, Shape};
pub use synth::{synthesize, Extent, Modifier, Modifiers};
