//! Statehook: an embeddable async finite state machine runtime.
//!
//! Machines are built by registering named states, each bound to an async
//! action. Starting a machine drives the transition loop: every action
//! receives the previous state's output, does its work, and returns where to
//! go next - or nothing, ending the run.
//!
//! # Core Concepts
//!
//! - **States and actions**: named handlers looked up in a frozen registry
//! - **Memory slots**: hook-style per-run, per-state storage, addressed by
//!   call order, for data that must survive repeated visits
//! - **Definition/run split**: one built machine is an immutable template;
//!   every `start` gets an isolated run with fresh memory
//! - **Composition**: a whole machine becomes a single action of an outer
//!   machine via `to_action`
//!
//! # Example
//!
//! ```rust
//! use statehook::{Memory, StateMachine, Transition};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut machine = StateMachine::<&str, u32>::new();
//!     machine
//!         .add_state("poll", |_input, mut memory: Memory| async move {
//!             let (attempts, set) = memory.slot_or(0u32);
//!             set.set(attempts + 1);
//!             if attempts + 1 < 3 {
//!                 Ok(Transition::next("poll"))
//!             } else {
//!                 Ok(Transition::next_with("done", attempts + 1))
//!             }
//!         })?
//!         .add_state("done", |input: Option<u32>, _memory| async move {
//!             Ok(Transition::halt_with(input.unwrap_or(0)))
//!         })?;
//!
//!     let runtime = tokio::runtime::Runtime::new()?;
//!     let outcome = runtime.block_on(machine.start(None))?;
//!
//!     assert_eq!(outcome.last_state, "done");
//!     assert_eq!(outcome.output, Some(3));
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod machine;

#[cfg(feature = "tokio")]
pub mod actions;

mod macros;

// Re-export the whole public surface at the crate root
pub use crate::core::{
    Action, ActionError, ActionFuture, Memory, NextState, RunTrace, Setter, StateName, Transition,
    Visit,
};
pub use crate::machine::{MachineError, Outcome, StateMachine};
