//! Run instances: one isolated execution of a machine definition.

use crate::core::memory::MemoryStore;
use crate::core::name::StateName;
use crate::core::trace::RunTrace;
use crate::machine::error::MachineError;
use crate::machine::{Outcome, Registry};
use std::sync::Arc;
use uuid::Uuid;

/// One execution of a machine definition.
///
/// Shares the frozen registry by reference and owns everything mutable: a
/// fresh memory store, a fresh trace, and its own id. Dropped when the run
/// completes, which is all the teardown the memory store needs.
pub(crate) struct Run<N: StateName, V> {
    id: Uuid,
    registry: Arc<Registry<N, V>>,
    memory: MemoryStore<N>,
    trace: RunTrace<N>,
}

impl<N: StateName, V: Send + 'static> Run<N, V> {
    pub(crate) fn new(registry: Arc<Registry<N, V>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            registry,
            memory: MemoryStore::new(),
            trace: RunTrace::new(),
        }
    }

    /// Drive the transition loop from `initial` until an action halts.
    ///
    /// Each iteration looks up the current state's action, hands it the
    /// previous output and a fresh memory accessor, awaits it, and follows
    /// the returned transition. Input threads forward unchanged: a state
    /// that produced no output hands `None` to its successor.
    pub(crate) async fn drive(
        mut self,
        initial: N,
        mut input: Option<V>,
    ) -> Result<Outcome<N, V>, MachineError> {
        let mut current = initial;
        let mut previous: Option<N> = None;

        loop {
            let Some(action) = self.registry.actions.get(&current) else {
                return Err(match previous {
                    Some(previous) => MachineError::StateNotFound {
                        name: current.label().to_string(),
                        previous: previous.label().to_string(),
                    },
                    None => MachineError::InitialStateNotFound {
                        name: current.label().to_string(),
                    },
                });
            };
            let action = Arc::clone(action);

            tracing::debug!(run = %self.id, state = current.label(), "entering state");
            self.trace = self.trace.record(current.clone());
            let memory = self.memory.enter(&current);

            let transition =
                action(input, memory)
                    .await
                    .map_err(|source| MachineError::Action {
                        state: current.label().to_string(),
                        source,
                    })?;

            match transition.next {
                Some(next) => {
                    tracing::debug!(
                        run = %self.id,
                        from = current.label(),
                        to = next.label(),
                        "state transition"
                    );
                    previous = Some(current);
                    current = next;
                    input = transition.output;
                }
                None => {
                    tracing::debug!(run = %self.id, state = current.label(), "run complete");
                    return Ok(Outcome {
                        run_id: self.id,
                        last_state: current,
                        output: transition.output,
                        trace: self.trace,
                    });
                }
            }
        }
    }
}
