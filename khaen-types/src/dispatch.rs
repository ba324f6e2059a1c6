//! Dispatch abstraction.

use crate::{Action, DispatchResult};

/// Trait for dispatching actions to the state engine.
///
/// The presentation layer talks to the engine only through this trait.
pub trait Dispatcher {
    /// Dispatch an action and return the result.
    fn dispatch(&mut self, action: &Action) -> DispatchResult;
}
