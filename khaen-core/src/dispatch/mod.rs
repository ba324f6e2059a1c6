mod local;

pub use local::LocalDispatcher;

use std::sync::Arc;

use khaen_types::reduce::reduce_action;
use khaen_types::{Action, DispatchResult, EngineState};

/// Dispatch an action against the current snapshot.
///
/// The reducer builds the next revision from the published one; `state` is
/// only swapped for the new `Arc` once the reduction is complete, so anyone
/// still holding the previous `Arc` keeps a consistent view.
pub fn dispatch_action(action: &Action, state: &mut Arc<EngineState>) -> DispatchResult {
    let next = reduce_action(action, &**state);
    if next.revision == state.revision {
        log::trace!(target: "dispatch", "{:?}: no change", action);
        return DispatchResult::none();
    }

    let result = DispatchResult {
        changed: true,
        rebound: next.key != state.key,
        reanalyze: next.active != state.active
            || next.hint_root != state.hint_root
            || next.key != state.key,
    };

    if next.authority != state.authority {
        log::debug!(
            target: "dispatch",
            "input authority {} -> {}",
            state.authority.name(),
            next.authority.name()
        );
    }
    if result.rebound {
        log::debug!(target: "dispatch", "key {} -> {}", state.key.name(), next.key.name());
    }
    log::debug!(
        target: "dispatch",
        "{:?} -> revision {} ({} active)",
        action,
        next.revision,
        next.active.len()
    );

    *state = Arc::new(next);
    result
}
