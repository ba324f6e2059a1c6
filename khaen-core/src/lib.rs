//! # khaen-core
//!
//! Runtime half of the khaen pitch engine. Owns the current `EngineState`
//! snapshot, routes hole clicks, preset picks and MIDI input through the
//! pure reducers in `khaen-types`, and projects each revision into a view.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use khaen_core::config::Config;
//! use khaen_core::engine::Engine;
//! use khaen_core::midi::MidiInputManager;
//! use khaen_types::{Action, PresetAction};
//!
//! // 1. Build the engine from the merged config
//! let config = Config::load();
//! let mut engine = Engine::from_config(&config);
//!
//! // 2. Optionally attach a MIDI controller
//! let mut midi = MidiInputManager::new(config.midi_client_name());
//! if config.midi_auto_connect() {
//!     let _ = midi.connect_matching(config.midi_port());
//! }
//!
//! // 3. Feed input
//! engine.dispatch(&Action::Preset(PresetAction::SelectDegree(4)));
//! engine.pump_midi(&mut midi);
//!
//! // 4. Render
//! let view = engine.view();
//! println!("{} [{}]", view.chord, view.notes);
//! ```
//!
//! ## Module Overview
//!
//! - [`config`]: embedded defaults merged with the user's TOML file
//! - [`dispatch`]: snapshot swap around `reduce_action`, `LocalDispatcher`
//! - [`engine`]: `Engine`, the current snapshot plus memoized analysis
//! - [`midi`]: midir input, note parsing, device availability
//! - [`view`]: `EngineView`, serializable projection of one revision

pub mod config;
pub mod dispatch;
pub mod engine;
pub mod midi;
pub mod view;

pub use khaen_types as types;
