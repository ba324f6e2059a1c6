//! The engine: current snapshot plus memoized analysis.

use std::sync::Arc;

use khaen_types::{analyze, Action, Analysis, DispatchResult, Dispatcher, EngineState};

use crate::config::Config;
use crate::dispatch::LocalDispatcher;
use crate::midi::MidiInputManager;
use crate::view::{project, EngineView};

pub struct Engine {
    state: Arc<EngineState>,
    /// Analysis of `state`, keyed by revision
    analysis: Option<(u64, Arc<Analysis>)>,
}

impl Engine {
    pub fn new(state: EngineState) -> Self {
        Self {
            state: Arc::new(state),
            analysis: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let key = config.key();
        log::info!(target: "engine", "starting in {}", key.name());
        Self::new(EngineState::new(key, config.extent()))
    }

    /// The current revision. Cheap to clone and safe to hold across dispatches.
    pub fn snapshot(&self) -> Arc<EngineState> {
        Arc::clone(&self.state)
    }

    pub fn dispatch(&mut self, action: &Action) -> DispatchResult {
        LocalDispatcher::new(&mut self.state).dispatch(action)
    }

    /// Drain pending MIDI input and device transitions into the engine.
    pub fn pump_midi(&mut self, midi: &mut MidiInputManager) -> DispatchResult {
        let mut merged = DispatchResult::none();
        let availability = midi.refresh_availability();
        let notes = midi.poll_events().into_iter().map(|e| e.to_action());
        for action in availability.into_iter().chain(notes) {
            let r = self.dispatch(&action);
            merged.changed |= r.changed;
            merged.rebound |= r.rebound;
            merged.reanalyze |= r.reanalyze;
        }
        merged
    }

    pub fn analysis(&mut self) -> Arc<Analysis> {
        let revision = self.state.revision;
        if let Some((cached, ref analysis)) = self.analysis {
            if cached == revision {
                return Arc::clone(analysis);
            }
        }
        let state = &self.state;
        let analysis = Arc::new(analyze(state.active, state.hint_root, state.key));
        self.analysis = Some((revision, Arc::clone(&analysis)));
        analysis
    }

    pub fn view(&mut self) -> EngineView {
        let analysis = self.analysis();
        project(&self.state, &analysis)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineState::default())
    }
}
