//! The action contract: what a state handler must look like.

use crate::core::memory::Memory;
use crate::core::name::StateName;
use crate::core::transition::Transition;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::future::Future;
use std::sync::Arc;

/// The error type actions fail with.
///
/// Actions may fail with any error; the failure aborts the enclosing run and
/// surfaces from `start` with the originating error attached.
pub type ActionError = anyhow::Error;

/// The future an installed action produces on each invocation.
pub type ActionFuture<N, V> = BoxFuture<'static, Result<Transition<N, V>, ActionError>>;

/// An installed action, as stored in a machine's registry.
///
/// Registration through [`StateMachine::add_state`](crate::StateMachine::add_state)
/// accepts any `Fn(Option<V>, Memory) -> Future` whose output converts into a
/// [`Transition`]; this alias is the erased form those handlers are boxed
/// into. Each invocation receives the previous state's output and a fresh
/// [`Memory`] accessor scoped to the state's slot list.
pub type Action<N, V> = Arc<dyn Fn(Option<V>, Memory) -> ActionFuture<N, V> + Send + Sync>;

/// Box a user handler into the erased registry form, normalizing its return
/// value through the `Into<Transition>` conversions.
pub(crate) fn boxed_action<N, V, F, Fut, T>(action: F) -> Action<N, V>
where
    N: StateName,
    V: Send + 'static,
    F: Fn(Option<V>, Memory) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, ActionError>> + Send + 'static,
    T: Into<Transition<N, V>>,
{
    Arc::new(move |input, memory| {
        action(input, memory)
            .map(|result| result.map(Into::into))
            .boxed()
    })
}
