//! LocalDispatcher: Dispatcher implementation for in-process execution.

use std::sync::Arc;

use khaen_types::{Action, DispatchResult, Dispatcher, EngineState};

use super::dispatch_action;

/// Local dispatcher that executes actions directly on an in-process snapshot.
pub struct LocalDispatcher<'a> {
    pub state: &'a mut Arc<EngineState>,
}

impl<'a> LocalDispatcher<'a> {
    pub fn new(state: &'a mut Arc<EngineState>) -> Self {
        Self { state }
    }
}

impl<'a> Dispatcher for LocalDispatcher<'a> {
    fn dispatch(&mut self, action: &Action) -> DispatchResult {
        dispatch_action(action, self.state)
    }
}
