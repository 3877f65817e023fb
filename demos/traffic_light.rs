//! Traffic Light
//!
//! A minimal machine: three states cycling a fixed number of times, with the
//! cycle count threaded through as the machine's value.
//!
//! Run with: cargo run --example traffic_light

use statehook::{state_names, StateMachine, StateName, Transition};

state_names! {
    enum Light {
        Red,
        Green,
        Yellow,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut machine = StateMachine::<Light, u32>::new();
    machine
        .add_state(Light::Red, |input: Option<u32>, _memory| async move {
            let cycles = input.unwrap_or(0);
            if cycles >= 3 {
                Ok(Transition::halt_with(cycles))
            } else {
                Ok(Transition::next_with(Light::Green, cycles))
            }
        })?
        .add_state(Light::Green, |input: Option<u32>, _memory| async move {
            Ok(Transition::next_with(Light::Yellow, input.unwrap_or(0)))
        })?
        .add_state(Light::Yellow, |input: Option<u32>, _memory| async move {
            Ok(Transition::next_with(Light::Red, input.unwrap_or(0) + 1))
        })?;

    let outcome = machine.start(Some(0)).await?;

    println!("stopped at: {}", outcome.last_state.label());
    println!("full cycles: {:?}", outcome.output);
    println!(
        "path: {:?}",
        outcome
            .trace
            .path()
            .iter()
            .map(|s| s.label())
            .collect::<Vec<_>>()
    );

    Ok(())
}
