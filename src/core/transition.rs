//! Transition values returned by actions.
//!
//! An action reports where the machine goes next and what data travels
//! there. Both halves are optional: an absent next state ends the run, an
//! absent output threads `None` into the next action.

use crate::core::name::StateName;
use std::sync::Arc;

/// The normalized result of one action execution.
///
/// Actions rarely build this struct by hand. Any of the following return
/// values convert into it, so an action states only what it needs:
///
/// - `N` - move to the named state, no output
/// - `(N, V)` - move to the named state, carrying output
/// - `Option<N>` - move or halt, no output
/// - `(Option<N>, V)` - move or halt, carrying output
/// - `()` - halt, no output
///
/// # Example
///
/// ```rust
/// use statehook::Transition;
///
/// let t: Transition<&str, u32> = "next".into();
/// assert_eq!(t.next, Some("next"));
/// assert_eq!(t.output, None);
///
/// let t: Transition<&str, u32> = ("next", 7).into();
/// assert_eq!(t.output, Some(7));
///
/// let t: Transition<&str, u32> = Transition::halt_with(9);
/// assert_eq!(t.next, None);
/// assert_eq!(t.output, Some(9));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Transition<N, V> {
    /// Name of the state to enter next, or `None` to end the run.
    pub next: Option<N>,
    /// Output forwarded as the next state's input, or as the run's final
    /// output when `next` is `None`.
    pub output: Option<V>,
}

impl<N, V> Transition<N, V> {
    /// Move to `state` with no output.
    pub fn next(state: N) -> Self {
        Self {
            next: Some(state),
            output: None,
        }
    }

    /// Move to `state`, forwarding `output` as its input.
    pub fn next_with(state: N, output: V) -> Self {
        Self {
            next: Some(state),
            output: Some(output),
        }
    }

    /// End the run with no output.
    pub fn halt() -> Self {
        Self {
            next: None,
            output: None,
        }
    }

    /// End the run, returning `output` from `start`.
    pub fn halt_with(output: V) -> Self {
        Self {
            next: None,
            output: Some(output),
        }
    }
}

impl<N: StateName, V> From<N> for Transition<N, V> {
    fn from(next: N) -> Self {
        Transition::next(next)
    }
}

impl<N: StateName, V> From<(N, V)> for Transition<N, V> {
    fn from((next, output): (N, V)) -> Self {
        Transition::next_with(next, output)
    }
}

impl<N: StateName, V> From<Option<N>> for Transition<N, V> {
    fn from(next: Option<N>) -> Self {
        Transition { next, output: None }
    }
}

impl<N: StateName, V> From<(Option<N>, V)> for Transition<N, V> {
    fn from((next, output): (Option<N>, V)) -> Self {
        Transition {
            next,
            output: Some(output),
        }
    }
}

impl<N: StateName, V> From<()> for Transition<N, V> {
    fn from(_: ()) -> Self {
        Transition::halt()
    }
}

/// How a composed sub-machine maps its terminal state onto the outer
/// machine's state space.
///
/// Built by [`StateMachine::to_action`](crate::StateMachine::to_action) from
/// either a literal outer name (`From<M>`), absence (`Halt`), or a resolver
/// function over the inner run's last state.
pub enum NextState<N, M> {
    /// The composed action is terminal in the outer machine.
    Halt,
    /// Always continue to this outer state.
    To(M),
    /// Compute the outer state from the inner run's terminal state name.
    Resolve(Arc<dyn Fn(&N) -> Option<M> + Send + Sync>),
}

impl<N, M> NextState<N, M> {
    /// Wrap a resolver function.
    ///
    /// Returning `None` makes the composed action terminal for that run.
    pub fn from_fn<F>(resolver: F) -> Self
    where
        F: Fn(&N) -> Option<M> + Send + Sync + 'static,
    {
        Self::Resolve(Arc::new(resolver))
    }

    /// Map the inner run's terminal state to the outer next state.
    pub(crate) fn resolve(&self, last_state: &N) -> Option<M>
    where
        M: Clone,
    {
        match self {
            Self::Halt => None,
            Self::To(next) => Some(next.clone()),
            Self::Resolve(resolver) => resolver(last_state),
        }
    }
}

impl<N, M> Clone for NextState<N, M>
where
    M: Clone,
{
    fn clone(&self) -> Self {
        match self {
            Self::Halt => Self::Halt,
            Self::To(next) => Self::To(next.clone()),
            Self::Resolve(resolver) => Self::Resolve(Arc::clone(resolver)),
        }
    }
}

impl<N, M: StateName> From<M> for NextState<N, M> {
    fn from(next: M) -> Self {
        Self::To(next)
    }
}

impl<N, M: StateName> From<Option<M>> for NextState<N, M> {
    fn from(next: Option<M>) -> Self {
        match next {
            Some(next) => Self::To(next),
            None => Self::Halt,
        }
    }
}
