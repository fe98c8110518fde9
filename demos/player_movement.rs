//! Player Movement Controller
//!
//! This example drives a small movement controller with scripted input:
//! an intro screen, then forward / stopped / backward movement selected by
//! how many buttons are held, and an end state.
//!
//! Key concepts:
//! - Guards reading shared client state through `Rc<Cell<_>>`
//! - Per-state `on_update` side effects receiving the tick's delta time
//! - A reset override reachable from anywhere in the tree
//! - `tracing` output from the runtime (try `RUST_LOG=statecraft=trace`)
//!
//! Run with: cargo run --example player_movement

use statecraft::Machine;
use std::cell::Cell;
use std::rc::Rc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Default)]
struct Input {
    buttons_held: Cell<u8>,
    submit: Cell<bool>,
    end: Cell<bool>,
    reset: Cell<bool>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}

fn main() {
    init_logging();
    println!("=== Player Movement Controller ===\n");

    let input = Rc::new(Input::default());
    let position = Rc::new(Cell::new(0.0f32));

    let mut machine = Machine::new("root");
    let root = machine.root();
    let intro = machine.add_state("intro");
    let forward = machine.add_state("forward");
    let stopped = machine.add_state("stopped");
    let backward = machine.add_state("backward");
    let end = machine.add_state("end");

    let held = |count: u8| {
        let input = Rc::clone(&input);
        move || input.buttons_held.get() == count
    };

    machine.start_at(root, intro);
    machine
        .change_to_sub_state(root, intro)
        .when({
            let input = Rc::clone(&input);
            move || input.reset.get()
        })
        .then_do({
            let position = Rc::clone(&position);
            move || position.set(0.0)
        });

    machine.change_to(intro, forward).when({
        let input = Rc::clone(&input);
        move || input.submit.get()
    });
    machine
        .change_to(forward, end)
        .when({
            let input = Rc::clone(&input);
            move || input.end.get()
        })
        .then_do(|| println!("  the end"));

    machine.change_to(forward, stopped).when(held(1));
    machine.change_to(forward, backward).when(held(2));
    machine.change_to(stopped, backward).when(held(2));
    machine.change_to(stopped, forward).when(held(0));
    machine.change_to(backward, forward).when(held(0));
    machine.change_to(backward, stopped).when(held(1));

    for (state, label) in [(forward, "green"), (stopped, "red"), (backward, "blue")] {
        machine.on_enter(state, move || println!("  color: {label}"));
    }
    machine.on_update(forward, {
        let position = Rc::clone(&position);
        move |dt| position.set(position.get() + dt)
    });
    machine.on_update(backward, {
        let position = Rc::clone(&position);
        move |dt| position.set(position.get() - dt)
    });

    machine.start();

    // (tick, buttons held, submit, end, reset)
    let script: [(u32, u8, bool, bool, bool); 7] = [
        (2, 0, true, false, false),
        (10, 1, false, false, false),
        (14, 2, false, false, false),
        (20, 0, false, false, false),
        (26, 0, false, false, true),
        (28, 0, true, false, false),
        (34, 0, false, true, false),
    ];

    let delta_time = 0.25;
    for tick in 0..40 {
        input.submit.set(false);
        input.end.set(false);
        input.reset.set(false);
        if let Some(&(_, buttons, submit, end, reset)) = script.iter().find(|s| s.0 == tick) {
            input.buttons_held.set(buttons);
            input.submit.set(submit);
            input.end.set(end);
            input.reset.set(reset);
        }

        machine.update(delta_time);
        machine.fixed_update();
        println!("tick {tick:>2}: {:<20} position {:+.2}", machine.path(), position.get());
    }

    println!("\n=== Example Complete ===");
}
