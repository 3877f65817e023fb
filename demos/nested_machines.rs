//! Nested Machines
//!
//! A complete machine becomes a single action of an outer machine via
//! to_action. Each entry into the composed state runs the inner machine
//! from scratch with isolated memory.
//!
//! Run with: cargo run --example nested_machines

use statehook::{NextState, StateMachine, Transition};

fn parser() -> StateMachine<&'static str, i64> {
    let mut inner = StateMachine::new();
    inner
        .add_state("validate", |input: Option<i64>, _memory| async move {
            match input {
                Some(n) if n >= 0 => Ok(Transition::next_with("scale", n)),
                _ => Ok(Transition::next_with("reject", 0)),
            }
        })
        .unwrap()
        .add_state("scale", |input: Option<i64>, _memory| async move {
            Ok(Transition::halt_with(input.unwrap_or(0) * 100))
        })
        .unwrap()
        .add_state("reject", |_input, _memory| async move {
            Ok(Transition::halt())
        })
        .unwrap();
    inner
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let inner = parser();

    // Route on where the inner machine ended up.
    let route = NextState::from_fn(|last: &&str| match *last {
        "scale" => Some("accepted"),
        _ => Some("refused"),
    });

    let mut outer = StateMachine::<&'static str, i64>::new();
    outer
        .add_state("parse", inner.to_action(route))?
        .add_state("accepted", |input: Option<i64>, _memory| async move {
            println!("accepted: {:?}", input);
            Ok(Transition::halt_with(input.unwrap_or(0)))
        })?
        .add_state("refused", |_input, _memory| async move {
            println!("refused");
            Ok(Transition::halt())
        })?;

    let outcome = outer.start(Some(7)).await?;
    println!("first run ended in {:?}", outcome.last_state);

    let outcome = outer.start(Some(-7)).await?;
    println!("second run ended in {:?}", outcome.last_state);

    Ok(())
}
