//! Ready-made action constructors.
//!
//! These are ordinary consumers of the action contract; the engine gives
//! them no special treatment. Available with the default `tokio` feature.

use crate::core::action::{ActionError, ActionFuture};
use crate::core::memory::Memory;
use crate::core::name::StateName;
use crate::core::transition::Transition;
use futures::FutureExt;
use std::time::Duration;

/// An action that immediately moves to `next`, forwarding its input.
pub fn forward<N, V>(
    next: N,
) -> impl Fn(Option<V>, Memory) -> ActionFuture<N, V> + Send + Sync + 'static
where
    N: StateName,
    V: Send + 'static,
{
    move |input, _memory| {
        let next = next.clone();
        async move {
            Ok::<_, ActionError>(Transition {
                next: Some(next),
                output: input,
            })
        }
        .boxed()
    }
}

/// An action that sleeps for `duration`, then moves to `next` with its
/// input forwarded unchanged.
pub fn delay<N, V>(
    next: N,
    duration: Duration,
) -> impl Fn(Option<V>, Memory) -> ActionFuture<N, V> + Send + Sync + 'static
where
    N: StateName,
    V: Send + 'static,
{
    move |input, _memory| {
        let next = next.clone();
        async move {
            tokio::time::sleep(duration).await;
            Ok::<_, ActionError>(Transition {
                next: Some(next),
                output: input,
            })
        }
        .boxed()
    }
}
