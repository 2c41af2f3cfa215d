//! Simulated sensor feed wired to an event: a console logger plus two
//! status lamps listen for readings, then one lamp is selectively unbound.
//!
//! Run with `RUST_LOG=debug` to watch the bind/unbind bookkeeping.

use std::cell::RefCell;
use std::rc::Rc;

use beacon_events::Event;
use log::info;

struct StatusLamp {
    label: &'static str,
    threshold: f32,
    lit: bool,
}

impl StatusLamp {
    fn on_reading(&mut self, celsius: f32) {
        self.lit = celsius > self.threshold;
        info!(
            "{} lamp is now {}",
            self.label,
            if self.lit { "lit" } else { "dark" }
        );
    }
}

fn print_reading(celsius: f32) {
    println!("sensor reading: {celsius:.1} C");
}

fn main() {
    env_logger::init();

    let mut on_reading = Event::<f32>::new();
    let warning = Rc::new(RefCell::new(StatusLamp {
        label: "warning",
        threshold: 30.0,
        lit: false,
    }));
    let critical = Rc::new(RefCell::new(StatusLamp {
        label: "critical",
        threshold: 45.0,
        lit: false,
    }));

    on_reading.bind(print_reading);
    on_reading.bind_method_mut(StatusLamp::on_reading, &warning);
    on_reading.bind_method_mut(StatusLamp::on_reading, &critical);

    for celsius in [21.5, 33.0, 48.2] {
        on_reading.emit(celsius);
    }

    // The critical lamp goes offline; only its binding is removed.
    on_reading.unbind_method_mut(StatusLamp::on_reading, &critical);
    on_reading.emit(50.1);

    println!(
        "warning lamp lit: {}, critical lamp lit: {}",
        warning.borrow().lit,
        critical.borrow().lit
    );
}
