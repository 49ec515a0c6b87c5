// Copyright 2026, the nunchuk-input developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/license/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option.  This file may not be copied, modified, or distributed
// except according to those terms.

// Reads a Wii Nunchuk via Linux i2c-dev and prints decoded events.

use std::env::args;
use std::process;

use docopt::Docopt;

use nunchuk_input::events::{Event, EventSink};
use nunchuk_input::linux::LinuxI2CBus;
use nunchuk_input::nunchuk::{Nunchuk, NUNCHUK_SLAVE_ADDR};
use nunchuk_input::poll::{PollConfig, Poller};

const USAGE: &str = "
Reading Wii Nunchuk events via Linux i2cdev.

Usage:
  nunchuck <device> [--interval=<ms>]
  nunchuck (-h | --help)

Options:
  -h --help          Show this help text.
  --interval=<ms>    Poll interval in milliseconds [default: 50].
";

struct PrintSink;

impl EventSink for PrintSink {
    fn event(&mut self, event: Event) {
        print!("{:?}  ", event);
    }

    fn sync(&mut self) {
        println!();
    }
}

fn main() {
    env_logger::init();

    let argv = Docopt::new(USAGE)
        .and_then(|d| d.argv(args()).parse())
        .unwrap_or_else(|e| e.exit());
    let device = argv.get_str("<device>");
    let interval_ms: u64 = argv
        .get_str("--interval")
        .parse()
        .unwrap_or_else(|_| {
            eprintln!("--interval must be an integer number of milliseconds");
            process::exit(2);
        });

    let bus = match LinuxI2CBus::new(device, NUNCHUK_SLAVE_ADDR) {
        Ok(bus) => bus,
        Err(err) => {
            eprintln!("Unable to open {}: {}", device, err);
            process::exit(1);
        }
    };

    let mut poller = Poller::new(
        Nunchuk::new(bus),
        PrintSink,
        PollConfig::from_interval_ms(interval_ms),
    );
    if let Err(err) = poller.attach() {
        eprintln!("Attach failed: {}", err);
        process::exit(1);
    }
    poller.run();
}
