//! Errors surfaced by machine registration and execution.

use crate::core::action::ActionError;
use thiserror::Error;

/// Errors that can occur while defining or running a state machine.
///
/// Every error is terminal for the run it occurs in; a failed run never
/// yields a partial outcome. Starting the same definition again afterwards
/// is always safe because each run is isolated.
#[derive(Debug, Error)]
pub enum MachineError {
    /// Registration used an invalid (empty) state name.
    #[error("invalid state name {0:?}: names must be non-empty")]
    InvalidStateName(String),

    /// Registration reused a name; the second action is never installed.
    #[error("state '{0}' is already registered")]
    DuplicateState(String),

    /// Registration was attempted after the machine was first started or
    /// turned into an action.
    #[error("machine is already built; states can no longer be added")]
    AlreadyBuilt,

    /// Start was attempted with no registered states.
    #[error("cannot start a machine with no registered states")]
    EmptyMachine,

    /// The configured or overridden initial state has no registered action.
    #[error("initial state '{name}' not found")]
    InitialStateNotFound { name: String },

    /// A state returned by a prior action has no registered action.
    #[error("state '{name}' not found, requested by state '{previous}'")]
    StateNotFound { name: String, previous: String },

    /// An action failed; the originating error is preserved as the source.
    #[error("action for state '{state}' failed")]
    Action {
        state: String,
        #[source]
        source: ActionError,
    },
}
