//! Traffic Light State Machine
//!
//! This example demonstrates a cyclic, timer-driven state machine.
//!
//! Key concepts:
//! - Time-delayed transitions with `after`
//! - An override transition that forces a flashing mode from any state
//! - The one-tick latency of delayed transitions
//!
//! Run with: cargo run --example traffic_light

use statecraft::Machine;
use std::cell::Cell;
use std::rc::Rc;

fn main() {
    println!("=== Traffic Light State Machine ===\n");

    let fault = Rc::new(Cell::new(false));

    let mut machine = Machine::with_history("light", 32);
    let light = machine.root();
    let red = machine.add_state("red");
    let green = machine.add_state("green");
    let yellow = machine.add_state("yellow");
    let flashing = machine.add_state("flashing");

    machine.start_at(light, red);
    machine.change_to(red, green).after(3.0);
    machine.change_to(green, yellow).after(2.0);
    machine.change_to(yellow, red).after(1.0);
    machine.change_to_sub_state(light, flashing).when({
        let fault = Rc::clone(&fault);
        move || fault.get()
    });
    machine.change_to(flashing, red).when({
        let fault = Rc::clone(&fault);
        move || !fault.get()
    });

    for state in [red, green, yellow, flashing] {
        let name = machine.name(state).to_uppercase();
        machine.on_enter(state, move || println!("  -> {name}"));
    }

    machine.start();

    let delta_time = 0.5;
    for tick in 1..=30 {
        if tick == 20 {
            println!("  (fault detected)");
            fault.set(true);
        }
        if tick == 24 {
            println!("  (fault cleared)");
            fault.set(false);
        }
        machine.update(delta_time);
    }

    println!("\nFinal path: {}", machine.path());
    println!("Transitions fired: {}", machine.history().len());
    println!("Visited: {}", machine.history().path().join(" -> "));

    println!("\n=== Example Complete ===");
}
