//! The state machine engine: definitions, runs, and composition.

use crate::core::action::{boxed_action, Action, ActionError, ActionFuture};
use crate::core::memory::Memory;
use crate::core::name::StateName;
use crate::core::trace::RunTrace;
use crate::core::transition::{NextState, Transition};
use futures::FutureExt;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use uuid::Uuid;

pub mod error;
mod run;

pub use error::MachineError;

use run::Run;

/// The frozen state registry a definition shares with its runs.
pub(crate) struct Registry<N: StateName, V> {
    pub(crate) actions: HashMap<N, Action<N, V>>,
    pub(crate) initial: Option<N>,
}

/// Result of a completed run.
#[derive(Debug)]
pub struct Outcome<N, V> {
    /// Correlation id of the run, also carried by its tracing events.
    pub run_id: Uuid,
    /// The terminal state: the one whose action returned no next state.
    pub last_state: N,
    /// The terminal action's output, if it produced one.
    pub output: Option<V>,
    /// The states the run entered, in order.
    pub trace: RunTrace<N>,
}

/// A state machine definition.
///
/// A definition collects named states, each bound to an async action, then
/// acts as an immutable template: every [`start`](Self::start) produces an
/// isolated run instance with its own memory, so one definition can run many
/// times - concurrently, or nested inside other machines via
/// [`to_action`](Self::to_action).
///
/// The first registered state is the default initial state. The first
/// `start` or `to_action` call builds the machine, after which registration
/// is rejected.
///
/// # Example
///
/// ```rust
/// use statehook::{StateMachine, Transition};
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut machine = StateMachine::<&str, u32>::new();
///     machine
///         .add_state("double", |input: Option<u32>, _memory| async move {
///             let doubled = input.unwrap_or(0) * 2;
///             Ok(Transition::next_with("report", doubled))
///         })?
///         .add_state("report", |input: Option<u32>, _memory| async move {
///             Ok(Transition::halt_with(input.unwrap_or(0)))
///         })?;
///
///     let runtime = tokio::runtime::Runtime::new()?;
///     let outcome = runtime.block_on(machine.start(Some(21)))?;
///
///     assert_eq!(outcome.last_state, "report");
///     assert_eq!(outcome.output, Some(42));
///     Ok(())
/// }
/// ```
pub struct StateMachine<N: StateName, V> {
    registry: Arc<Registry<N, V>>,
    built: AtomicBool,
}

impl<N: StateName, V> std::fmt::Debug for StateMachine<N, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMachine")
            .field("states", &self.registry.actions.len())
            .field("initial", &self.registry.initial)
            .field("built", &self.built.load(Ordering::Acquire))
            .finish()
    }
}

impl<N: StateName, V: Send + 'static> StateMachine<N, V> {
    /// Create a new machine with no states.
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Registry {
                actions: HashMap::new(),
                initial: None,
            }),
            built: AtomicBool::new(false),
        }
    }

    /// Register a state and the action executed on entering it.
    ///
    /// The action receives the previous state's output and a fresh
    /// [`Memory`] accessor, and returns anything convertible into a
    /// [`Transition`]: a next-state name, a `(name, output)` pair, their
    /// `Option` forms, or `()` to halt.
    ///
    /// The first registered state becomes the default initial state. Fails
    /// once the machine is built, on an empty name, or on a duplicate name -
    /// in which case the new action is not installed.
    pub fn add_state<F, Fut, T>(&mut self, name: N, action: F) -> Result<&mut Self, MachineError>
    where
        F: Fn(Option<V>, Memory) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ActionError>> + Send + 'static,
        T: Into<Transition<N, V>>,
    {
        if self.built.load(Ordering::Acquire) {
            return Err(MachineError::AlreadyBuilt);
        }
        if !name.is_valid() {
            return Err(MachineError::InvalidStateName(name.label().to_string()));
        }
        let registry = Arc::get_mut(&mut self.registry).ok_or(MachineError::AlreadyBuilt)?;
        if registry.actions.contains_key(&name) {
            return Err(MachineError::DuplicateState(name.label().to_string()));
        }
        if registry.initial.is_none() {
            registry.initial = Some(name.clone());
        }
        registry.actions.insert(name, boxed_action(action));
        Ok(self)
    }

    /// Run the machine from its default initial state.
    ///
    /// Builds the machine on first use, then executes an isolated run
    /// instance to completion. Resolves to the terminal state and output, or
    /// fails with the first configuration, routing, or action error.
    pub async fn start(&self, input: Option<V>) -> Result<Outcome<N, V>, MachineError> {
        let (registry, initial) = self.freeze()?;
        Run::new(registry).drive(initial, input).await
    }

    /// Run the machine from `initial` instead of the default initial state.
    pub async fn start_from(
        &self,
        initial: N,
        input: Option<V>,
    ) -> Result<Outcome<N, V>, MachineError> {
        let (registry, _) = self.freeze()?;
        Run::new(registry).drive(initial, input).await
    }

    /// Adapt this whole machine into a single action for an outer machine.
    ///
    /// Each invocation of the produced action runs a fresh, fully isolated
    /// inner run: the outer input feeds the inner initial state, the inner
    /// terminal output becomes the action's output, and `next` decides the
    /// outer transition - a literal outer name, [`NextState::Halt`], or a
    /// resolver over the inner run's terminal state via
    /// [`NextState::from_fn`].
    pub fn to_action<M: StateName>(
        &self,
        next: impl Into<NextState<N, M>>,
    ) -> impl Fn(Option<V>, Memory) -> ActionFuture<M, V> + Send + Sync + 'static {
        self.compose(next.into(), None)
    }

    /// Like [`to_action`](Self::to_action), overriding the inner machine's
    /// initial state.
    pub fn to_action_from<M: StateName>(
        &self,
        next: impl Into<NextState<N, M>>,
        initial: N,
    ) -> impl Fn(Option<V>, Memory) -> ActionFuture<M, V> + Send + Sync + 'static {
        self.compose(next.into(), Some(initial))
    }

    fn compose<M: StateName>(
        &self,
        next: NextState<N, M>,
        initial_override: Option<N>,
    ) -> impl Fn(Option<V>, Memory) -> ActionFuture<M, V> + Send + Sync + 'static {
        self.built.store(true, Ordering::Release);
        let registry = Arc::clone(&self.registry);

        move |input: Option<V>, _memory: Memory| {
            let registry = Arc::clone(&registry);
            let next = next.clone();
            let initial = initial_override.clone();
            async move {
                let Some(initial) = initial.or_else(|| registry.initial.clone()) else {
                    return Err(ActionError::from(MachineError::EmptyMachine));
                };
                let outcome = Run::new(registry).drive(initial, input).await?;
                Ok(Transition {
                    next: next.resolve(&outcome.last_state),
                    output: outcome.output,
                })
            }
            .boxed()
        }
    }

    /// Build the machine and hand out the shared registry plus the default
    /// initial state. An empty machine fails here without being built.
    fn freeze(&self) -> Result<(Arc<Registry<N, V>>, N), MachineError> {
        let Some(initial) = self.registry.initial.clone() else {
            return Err(MachineError::EmptyMachine);
        };
        self.built.store(true, Ordering::Release);
        Ok((Arc::clone(&self.registry), initial))
    }
}

impl<N: StateName, V: Send + 'static> Default for StateMachine<N, V> {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
mod integration_tests {
    use super::*;

    fn doubler() -> StateMachine<&'static str, i32> {
        let mut inner = StateMachine::new();
        inner
            .add_state("double", |input: Option<i32>, _memory| async move {
                Ok(Transition::halt_with(input.unwrap_or(0) * 2))
            })
            .unwrap();
        inner
    }

    #[tokio::test]
    async fn composed_machine_acts_as_a_single_state() {
        let inner = doubler();

        let mut outer = StateMachine::<&'static str, i32>::new();
        outer
            .add_state("call", inner.to_action("x"))
            .unwrap()
            .add_state("x", |input: Option<i32>, _memory| async move {
                Ok(Transition::halt_with(input.unwrap_or(0)))
            })
            .unwrap();

        let outcome = outer.start(Some(5)).await.unwrap();
        assert_eq!(outcome.last_state, "x");
        assert_eq!(outcome.output, Some(10));
        assert_eq!(outcome.trace.path(), vec![&"call", &"x"]);
    }

    #[tokio::test]
    async fn composed_machine_can_be_terminal() {
        let inner = doubler();

        let mut outer = StateMachine::<&'static str, i32>::new();
        outer
            .add_state("call", inner.to_action(NextState::Halt))
            .unwrap();

        let outcome = outer.start(Some(3)).await.unwrap();
        assert_eq!(outcome.last_state, "call");
        assert_eq!(outcome.output, Some(6));
    }

    #[tokio::test]
    async fn resolver_maps_inner_terminal_state() {
        let mut inner = StateMachine::<&'static str, i32>::new();
        inner
            .add_state("triage", |input: Option<i32>, _memory| async move {
                if input.unwrap_or(0) >= 0 {
                    Ok(Transition::next_with("accepted", input.unwrap_or(0)))
                } else {
                    Ok(Transition::next_with("rejected", input.unwrap_or(0)))
                }
            })
            .unwrap()
            .add_state("accepted", |input: Option<i32>, _memory| async move {
                Ok(Transition { next: None, output: input })
            })
            .unwrap()
            .add_state("rejected", |input: Option<i32>, _memory| async move {
                Ok(Transition { next: None, output: input })
            })
            .unwrap();

        let route = NextState::from_fn(|last: &&str| match *last {
            "accepted" => Some("ship"),
            _ => Some("discard"),
        });

        let mut outer = StateMachine::<&'static str, i32>::new();
        outer
            .add_state("screen", inner.to_action(route))
            .unwrap()
            .add_state("ship", |_input, _memory| async move {
                Ok(Transition::halt_with(1i32))
            })
            .unwrap()
            .add_state("discard", |_input, _memory| async move {
                Ok(Transition::halt_with(-1i32))
            })
            .unwrap();

        let outcome = outer.start(Some(42)).await.unwrap();
        assert_eq!(outcome.last_state, "ship");

        let outcome = outer.start(Some(-42)).await.unwrap();
        assert_eq!(outcome.last_state, "discard");
    }

    #[tokio::test]
    async fn each_composed_invocation_gets_fresh_memory() {
        let mut inner = StateMachine::<&'static str, u32>::new();
        inner
            .add_state("count", |_input, mut memory: Memory| async move {
                let (visits, set) = memory.slot_or(0u32);
                set.set(visits + 1);
                Ok(Transition::halt_with(visits + 1))
            })
            .unwrap();

        let mut outer = StateMachine::<&'static str, u32>::new();
        outer
            .add_state("first", inner.to_action("second"))
            .unwrap()
            .add_state("second", {
                let again = inner.to_action(NextState::Halt);
                move |input: Option<u32>, memory| {
                    // The inner counter restarted, so it reports 1 again.
                    assert_eq!(input, Some(1));
                    again(input, memory)
                }
            })
            .unwrap();

        let outcome = outer.start(None).await.unwrap();
        assert_eq!(outcome.output, Some(1));
    }

    #[tokio::test]
    async fn to_action_builds_the_inner_machine() {
        let mut inner = StateMachine::<&'static str, i32>::new();
        inner
            .add_state("a", |_input, _memory| async move { Ok(()) })
            .unwrap();

        let _action = inner.to_action::<&'static str>(NextState::Halt);

        let err = inner
            .add_state("b", |_input, _memory| async move { Ok(()) })
            .unwrap_err();
        assert!(matches!(err, MachineError::AlreadyBuilt));
    }

    #[tokio::test]
    async fn inner_failures_surface_through_the_outer_run() {
        let mut inner = StateMachine::<&'static str, i32>::new();
        inner
            .add_state("a", |_input, _memory| async move { Ok("ghost") })
            .unwrap();

        let mut outer = StateMachine::<&'static str, i32>::new();
        outer
            .add_state("call", inner.to_action(NextState::Halt))
            .unwrap();

        let err = outer.start(None).await.unwrap_err();
        match err {
            MachineError::Action { state, source } => {
                assert_eq!(state, "call");
                assert!(source.to_string().contains("ghost"));
            }
            other => panic!("expected Action, got {other:?}"),
        }
    }
}
