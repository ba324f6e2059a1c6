//! # khaen-types
//!
//! Pitch mapping and chord analysis for the khaen free-reed mouth organ.
//! Everything here is pure and synchronous: no I/O, no logging, no threads.
//!
//! ## Modules
//!
//! - [`pitch`] : `PitchClass`, `PitchSet`, enharmonic spelling
//! - [`state`] : key/scale model, hole layout, preset selection, `EngineState`
//! - [`chord`] : chord synthesis and detection
//! - [`action`] : action enums and `DispatchResult`
//! - [`reduce`] : pure reducers from one snapshot to the next

pub mod action;
pub mod chord;
mod dispatch;
pub mod pitch;
pub mod reduce;
pub mod state;

pub use action::*;
pub use chord::{
    analyze, synthesize, Analysis, ChordName, Extension, Extent, Modifier, Modifiers, Seventh,
    Shape,
};
pub use dispatch::Dispatcher;
pub use pitch::{PitchClass, PitchSet, Spelling};

// Re-export all state types at crate root for convenience
pub use state::*;
