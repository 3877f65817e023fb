//! Visit Counter
//!
//! Demonstrates memory slots: a polling state retains its attempt count
//! across visits without any state outside the machine.
//!
//! Run with: cargo run --example visit_counter

use statehook::{Memory, StateMachine, Transition};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut machine = StateMachine::<&str, String>::new();
    machine
        .add_state("poll", |_input, mut memory: Memory| async move {
            let (attempts, set) = memory.slot_or(0u32);
            let attempts = attempts + 1;
            set.set(attempts);

            println!("polling, attempt {attempts}");
            if attempts < 4 {
                Ok(Transition::next("poll"))
            } else {
                Ok(Transition::next_with(
                    "report",
                    format!("ready after {attempts} attempts"),
                ))
            }
        })?
        .add_state("report", |input: Option<String>, _memory| async move {
            Ok(Transition::halt_with(input.unwrap_or_default()))
        })?;

    // Two runs: each gets fresh memory, so both poll four times.
    for _ in 0..2 {
        let outcome = machine.start(None).await?;
        println!("{}", outcome.output.unwrap_or_default());
    }

    Ok(())
}
